//! # Scanner State
//!
//! Decides whether a decoded barcode is acted on or ignored.
//!
//! ## Scan Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Scan Gate Phases                                │
//! │                                                                         │
//! │            begin_scan()                                                 │
//! │   Ready ───────────────────► Busy                                      │
//! │     ▲                         │                                         │
//! │     │ cooldown elapsed        │ permit dropped      permit.hold()       │
//! │     │                         ▼                         │               │
//! │   CoolingDown { until } ◄─────┘              Held ◄─────┘               │
//! │                                                │                        │
//! │   Ready ◄──────────────── dismiss() ───────────┘                        │
//! │                                                                         │
//! │  A camera keeps decoding the same barcode many times per second; the   │
//! │  gate turns that stream into one lookup per physical scan.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Arming
//! The scanner only accepts scans once its screen has been focused for
//! `arm_delay`. `focus()` schedules arming on a [`DelayedTask`]; `blur()`
//! and drop cancel it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::RegisterConfig;
use crate::timer::DelayedTask;

// =============================================================================
// Scan Gate
// =============================================================================

/// Where the gate is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Accepting scans.
    Ready,
    /// A scan is being resolved.
    Busy,
    /// Ignoring scans until `until`.
    CoolingDown { until: Instant },
    /// Ignoring scans until dismissed (price check on screen).
    Held,
}

/// Time-driven state machine behind [`ScannerState`].
///
/// Takes `now` explicitly so it can be driven without a runtime.
#[derive(Debug, Clone)]
pub struct ScanGate {
    phase: GatePhase,
    cooldown: Duration,
}

impl ScanGate {
    pub fn new(cooldown: Duration) -> Self {
        ScanGate {
            phase: GatePhase::Ready,
            cooldown,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Whether a scan arriving at `now` would be accepted.
    pub fn is_open(&self, now: Instant) -> bool {
        match self.phase {
            GatePhase::Ready => true,
            GatePhase::CoolingDown { until } => now >= until,
            GatePhase::Busy | GatePhase::Held => false,
        }
    }

    /// Moves to `Busy` if open. Returns whether the scan was accepted.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.phase = GatePhase::Busy;
        true
    }

    /// Scan resolved (either way): cool down from `now`.
    pub fn finish(&mut self, now: Instant) {
        self.phase = GatePhase::CoolingDown {
            until: now + self.cooldown,
        };
    }

    /// Scan resolved into something the cashier must dismiss.
    pub fn hold(&mut self) {
        self.phase = GatePhase::Held;
    }

    /// Explicit dismiss: accept scans again immediately.
    pub fn dismiss(&mut self) {
        self.phase = GatePhase::Ready;
    }
}

// =============================================================================
// Scanner State
// =============================================================================

/// Register-owned scanner state: arming plus the scan gate.
#[derive(Debug)]
pub struct ScannerState {
    gate: Mutex<ScanGate>,
    armed: Arc<AtomicBool>,
    arming: Mutex<Option<DelayedTask>>,
    arm_delay: Duration,
}

impl ScannerState {
    pub fn new(cooldown: Duration, arm_delay: Duration) -> Self {
        ScannerState {
            gate: Mutex::new(ScanGate::new(cooldown)),
            armed: Arc::new(AtomicBool::new(false)),
            arming: Mutex::new(None),
            arm_delay,
        }
    }

    pub fn from_config(config: &RegisterConfig) -> Self {
        ScannerState::new(config.scan_cooldown(), config.arm_delay())
    }

    /// The scanner screen gained focus: arm after `arm_delay`.
    ///
    /// Outside a tokio runtime the scanner arms immediately.
    pub fn focus(&self) {
        let mut arming = self.lock_arming();
        // Cancel any earlier pending arm before resetting the flag.
        arming.take();
        self.armed.store(false, Ordering::SeqCst);

        if Handle::try_current().is_err() {
            warn!("No async runtime, arming scanner immediately");
            self.armed.store(true, Ordering::SeqCst);
            return;
        }

        let armed = Arc::clone(&self.armed);
        debug!(delay_ms = self.arm_delay.as_millis() as u64, "Scanner arming");
        *arming = Some(DelayedTask::spawn(self.arm_delay, move || {
            armed.store(true, Ordering::SeqCst);
            debug!("Scanner armed");
        }));
    }

    /// The scanner screen lost focus: cancel pending arming and disarm.
    pub fn blur(&self) {
        self.lock_arming().take();
        self.armed.store(false, Ordering::SeqCst);
        debug!("Scanner disarmed");
    }

    /// Arms without waiting (manual code entry, tests).
    pub fn arm_now(&self) {
        self.lock_arming().take();
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> GatePhase {
        self.lock_gate().phase()
    }

    /// Claims the gate for one scan.
    ///
    /// Returns `None` when the scan must be ignored (disarmed, busy, cooling
    /// down or held). The returned permit releases the gate into cooldown
    /// when dropped, so every exit path of a command cools down.
    pub fn begin_scan(&self) -> Option<ScanPermit<'_>> {
        if !self.is_armed() {
            debug!("Scan ignored: scanner not armed");
            return None;
        }

        let mut gate = self.lock_gate();
        if !gate.try_begin(Instant::now()) {
            debug!(phase = ?gate.phase(), "Scan ignored");
            return None;
        }

        Some(ScanPermit {
            scanner: self,
            hold: false,
        })
    }

    /// Dismisses a held price check (or skips a cooldown).
    pub fn dismiss(&self) {
        self.lock_gate().dismiss();
    }

    fn lock_gate(&self) -> MutexGuard<'_, ScanGate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_arming(&self) -> MutexGuard<'_, Option<DelayedTask>> {
        self.arming.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ScannerState {
    fn default() -> Self {
        ScannerState::from_config(&RegisterConfig::default())
    }
}

/// Exclusive claim on the scan gate for one scan.
#[derive(Debug)]
pub struct ScanPermit<'a> {
    scanner: &'a ScannerState,
    hold: bool,
}

impl ScanPermit<'_> {
    /// Releases into `Held` instead of cooling down.
    pub fn hold(mut self) {
        self.hold = true;
    }
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        let mut gate = self.scanner.lock_gate();
        if self.hold {
            gate.hold();
        } else {
            gate.finish(Instant::now());
        }
    }
}
