#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the storage, ledger, and due-transaction processing
//! primitives behind a mobile task-and-finance tracker. The host shell owns
//! UI, navigation, and notification delivery; it hands this crate a
//! persistence backend and triggers a processing pass whenever the
//! application returns to the foreground.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
