//! End-to-end register flows against an in-memory SQLite store.

use std::time::Duration;

use sentosa_core::{Money, ProductForm};
use sentosa_db::{Database, DbConfig, ProductRepository};
use sentosa_register::commands::{cart, commit, product, restock, scan};
use sentosa_register::{CartState, ErrorCode, RestockState, ScannerState};

async fn store() -> (Database, ProductRepository) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let products = db.products();
    (db, products)
}

async fn register(products: &ProductRepository, code: &str, name: &str, sell: &str, pack_price: &str, pack_size: &str) {
    let form = ProductForm {
        name: name.into(),
        price_sell: sell.into(),
        price_wholesale: pack_price.into(),
        wholesale_qty: pack_size.into(),
        stock: "100".into(),
        ..ProductForm::blank(code)
    };
    product::save_product(products, form).await.unwrap();
}

fn scanner() -> ScannerState {
    let scanner = ScannerState::new(Duration::from_millis(2000), Duration::from_millis(500));
    scanner.arm_now();
    scanner
}

/// Scans `code` once, skipping the cooldown afterwards.
async fn scan_into_cart(products: &ProductRepository, scanner: &ScannerState, cart: &CartState, code: &str) {
    let outcome = scan::scan_to_cart(products, scanner, cart, code).await.unwrap();
    assert!(!outcome.is_ignored());
    scanner.dismiss();
}

async fn stock_of(products: &ProductRepository, code: &str) -> i64 {
    products.get_by_code(code).await.unwrap().unwrap().stock
}

#[tokio::test]
async fn test_wholesale_line_total() {
    let (_db, products) = store().await;
    register(&products, "001", "Kopi Bubuk", "10000", "90000", "10").await;
    let scanner = scanner();
    let cart = CartState::new();

    scan_into_cart(&products, &scanner, &cart, "001").await;
    let response = cart::set_cart_quantity(&cart, "001", "25");

    assert_eq!(response.lines[0].quote.packs, 2);
    assert_eq!(response.lines[0].quote.loose_units, 5);
    assert_eq!(response.totals.total, Money::from_minor(230_000));
}

#[tokio::test]
async fn test_mixed_cart_total_and_checkout() {
    let (_db, products) = store().await;
    register(&products, "A", "Teh Botol", "5000", "", "").await;
    register(&products, "B", "Minyak 1L", "9000", "100000", "10").await;
    let scanner = scanner();
    let cart = CartState::new();

    scan_into_cart(&products, &scanner, &cart, "A").await;
    scan_into_cart(&products, &scanner, &cart, "B").await;
    cart::adjust_cart_quantity(&cart, "A", 2);
    let response = cart::set_cart_quantity(&cart, "B", "12");

    let totals: Vec<Money> = response.lines.iter().map(|l| l.quote.total).collect();
    assert_eq!(totals, vec![Money::from_minor(15_000), Money::from_minor(118_000)]);
    assert_eq!(response.totals.total, Money::from_minor(133_000));

    let receipt = commit::checkout(&products, &cart).await.unwrap();
    assert_eq!(receipt.total, Money::from_minor(133_000));
    assert!(cart::get_cart(&cart).lines.is_empty());
    assert_eq!(stock_of(&products, "A").await, 97);
    assert_eq!(stock_of(&products, "B").await, 88);
}

#[tokio::test]
async fn test_checkout_empty_cart_touches_nothing() {
    let (_db, products) = store().await;
    register(&products, "A", "Teh Botol", "5000", "", "").await;
    let cart = CartState::new();

    let receipt = commit::checkout(&products, &cart).await.unwrap();
    assert!(receipt.is_empty());
    assert_eq!(stock_of(&products, "A").await, 100);
}

#[tokio::test]
async fn test_failed_commit_keeps_lines_and_retry_reissues_all() {
    let (db, products) = store().await;
    register(&products, "A", "Teh Botol", "5000", "", "").await;
    register(&products, "B", "Minyak 1L", "9000", "", "").await;
    let scanner = scanner();
    let cart = CartState::new();

    scan_into_cart(&products, &scanner, &cart, "A").await;
    scan_into_cart(&products, &scanner, &cart, "B").await;

    // "B" disappears from the store between scan and checkout
    sqlx::query("DELETE FROM products WHERE code = 'B'")
        .execute(db.pool())
        .await
        .unwrap();

    let err = commit::checkout(&products, &cart).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CommitFailed);
    assert_eq!(cart::get_cart(&cart).lines.len(), 2);
    assert_eq!(stock_of(&products, "A").await, 99);

    register(&products, "B", "Minyak 1L", "9000", "", "").await;
    commit::checkout(&products, &cart).await.unwrap();

    // both lines were sent again, so "A" came off twice
    assert_eq!(stock_of(&products, "A").await, 98);
    assert_eq!(stock_of(&products, "B").await, 99);
    assert!(cart::get_cart(&cart).lines.is_empty());
}

#[tokio::test]
async fn test_restock_flow() {
    let (_db, products) = store().await;
    register(&products, "A", "Teh Botol", "5000", "", "").await;
    let scanner = scanner();
    let list = RestockState::new();

    scan::scan_to_restock(&products, &scanner, &list, "A").await.unwrap();
    scanner.dismiss();
    scan::scan_to_restock(&products, &scanner, &list, "A").await.unwrap();
    scanner.dismiss();
    restock::set_restock_quantity(&list, "A", "48");

    let err = scan::scan_to_restock(&products, &scanner, &list, "NEW").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let receipt = commit::commit_restock(&products, &list).await.unwrap();
    assert_eq!(receipt.units, 48);
    assert_eq!(stock_of(&products, "A").await, 148);
    assert!(restock::get_restock_list(&list).lines.is_empty());
}

#[tokio::test]
async fn test_price_snapshot_survives_price_change() {
    let (_db, products) = store().await;
    register(&products, "A", "Teh Botol", "5000", "", "").await;
    let scanner = scanner();
    let cart = CartState::new();

    scan_into_cart(&products, &scanner, &cart, "A").await;
    register(&products, "A", "Teh Botol", "6000", "", "").await;
    scan_into_cart(&products, &scanner, &cart, "A").await;

    let response = cart::get_cart(&cart);
    assert_eq!(response.lines[0].line.quantity, 2);
    assert_eq!(response.totals.total, Money::from_minor(10_000));
}

#[tokio::test]
async fn test_edit_keeps_disabled_tier_pack_price() {
    let (_db, products) = store().await;
    register(&products, "G1", "Gula 1kg", "15000", "90000", "").await;

    let loaded = product::load_product_form(&products, "G1").await.unwrap();
    assert_eq!(loaded.form.price_wholesale, "90000");
    assert_eq!(loaded.form.wholesale_qty, "0");

    product::save_product(&products, loaded.form).await.unwrap();
    let reloaded = product::load_product_form(&products, "G1").await.unwrap();
    assert_eq!(reloaded.form.price_wholesale, "90000");

    let stored = products.get_document("G1").await.unwrap().unwrap();
    assert_eq!(stored.price_wholesale, Some(90_000));
}

#[tokio::test]
async fn test_nameless_row_can_be_opened_and_repaired() {
    let (db, products) = store().await;
    sqlx::query("INSERT INTO products (code, price_sell, stock) VALUES ('N1', 1000, 5)")
        .execute(db.pool())
        .await
        .unwrap();
    let scanner = scanner();
    let cart = CartState::new();

    let err = scan::scan_to_cart(&products, &scanner, &cart, "N1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(cart::get_cart(&cart).lines.is_empty());
    scanner.dismiss();

    let loaded = product::load_product_form(&products, "N1").await.unwrap();
    assert!(!loaded.is_new);
    assert!(loaded.form.name.is_empty());
    assert_eq!(loaded.form.price_sell, "1000");
    assert!(loaded.notice.is_some());

    let repaired = ProductForm {
        name: "Permen Mint".into(),
        ..loaded.form
    };
    product::save_product(&products, repaired).await.unwrap();

    scan_into_cart(&products, &scanner, &cart, "N1").await;
    assert_eq!(cart::get_cart(&cart).totals.total, Money::from_minor(1_000));
    assert_eq!(stock_of(&products, "N1").await, 5);
}
