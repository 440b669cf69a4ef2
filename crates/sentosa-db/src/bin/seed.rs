//! # Seed Data Loader
//!
//! Fills a product store for development, either with a built-in warung
//! assortment or with products from a JSON file.
//!
//! ## Usage
//! ```bash
//! # Built-in assortment into the platform data dir
//! cargo run -p sentosa-db --bin seed
//!
//! # Specify database path
//! cargo run -p sentosa-db --bin seed -- --db ./data/sentosa.db
//!
//! # Import a JSON object keyed by code
//! cargo run -p sentosa-db --bin seed -- --file products.json
//! ```
//!
//! ## JSON Format
//! ```json
//! {
//!   "8998866200301": { "name": "Indomie Goreng", "price_sell": 3500,
//!                      "price_wholesale": 110000, "wholesale_qty": 40, "stock": 120 }
//! }
//! ```
//! Missing fields get the usual defaults; rows that fail validation are
//! reported and skipped.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use sentosa_core::{ProductDocument, ProductDraft};
use sentosa_db::{init_tracing, Database, DbConfig};
use tracing::{info, warn};

/// Built-in products: (code, name, sell, wholesale pack price, pack size, stock)
const ASSORTMENT: &[(&str, &str, i64, i64, i64, i64)] = &[
    ("8998866200301", "Indomie Goreng", 3_500, 110_000, 40, 120),
    ("8998866200318", "Indomie Soto", 3_300, 105_000, 40, 80),
    ("8886008101053", "Aqua 600ml", 3_500, 40_000, 24, 96),
    ("8996001600146", "Teh Botol Sosro 450ml", 5_000, 0, 0, 48),
    ("8992761111113", "Gula Pasir 1kg", 17_500, 0, 0, 20),
    ("8999999195649", "Minyak Goreng 2L", 36_000, 210_000, 6, 18),
    ("8992696404441", "Kopi Kapal Api Sachet", 1_500, 13_500, 10, 200),
    ("8993175531218", "Beras Premium 5kg", 72_000, 0, 0, 10),
    ("8996001302019", "Sabun Mandi Batang", 4_000, 45_000, 12, 36),
    ("8999909096004", "Rokok Filter 12", 25_000, 245_000, 10, 50),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("SENTOSA_DB_PATH")
        .ok()
        .map(PathBuf::from)
        .or_else(DbConfig::default_path)
        .unwrap_or_else(|| PathBuf::from("./sentosa_dev.db"));
    let mut file: Option<PathBuf> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--force" => force = true,
            "--help" | "-h" => {
                println!("Sentosa Kasir Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>     Database file (default: SENTOSA_DB_PATH or data dir)");
                println!("  -f, --file <PATH>   JSON object of products keyed by code");
                println!("      --force         Seed even if the store already has products");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 && !force {
        println!("Store at {} already has {} products.", db_path.display(), existing);
        println!("Pass --force to upsert anyway.");
        return Ok(());
    }

    let drafts = match &file {
        Some(path) => {
            info!(path = %path.display(), "Reading products from file");
            let text = std::fs::read_to_string(path)?;
            let documents: BTreeMap<String, ProductDocument> = serde_json::from_str(&text)?;
            drafts_from_documents(documents)
        }
        None => builtin_drafts(),
    };

    let mut saved = 0usize;
    for draft in &drafts {
        match products.save(draft).await {
            Ok(_) => saved += 1,
            Err(e) => warn!(code = %draft.code, error = %e, "Failed to save product"),
        }
    }

    info!(saved, total = drafts.len(), path = %db_path.display(), "Seed complete");
    println!("Seeded {} of {} products into {}", saved, drafts.len(), db_path.display());

    db.close().await;
    Ok(())
}

/// Validates each document; invalid ones are logged and skipped.
fn drafts_from_documents(documents: BTreeMap<String, ProductDocument>) -> Vec<ProductDraft> {
    documents
        .into_iter()
        .filter_map(|(code, document)| match ProductDraft::from_document(&code, &document) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!(code = %code, error = %e, "Skipping invalid product");
                None
            }
        })
        .collect()
}

fn builtin_drafts() -> Vec<ProductDraft> {
    let documents = ASSORTMENT
        .iter()
        .map(|&(code, name, sell, pack_price, pack_size, stock)| {
            let document = ProductDocument {
                name: Some(name.to_string()),
                price_buy: Some(sell * 85 / 100),
                price_sell: Some(sell),
                price_wholesale: Some(pack_price),
                wholesale_qty: Some(pack_size),
                stock: Some(stock),
                updated_at: None,
            };
            (code.to_string(), document)
        })
        .collect();

    drafts_from_documents(documents)
}
