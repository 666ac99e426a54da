//! Tests for tracing initialization.

use std::sync::Mutex;

use rolecall_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn accepts_per_subsystem_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("ROLECALL_LOG", "rolecall_extract=debug,rolecall_storage=warn");
    init_tracing();
    std::env::remove_var("ROLECALL_LOG");
}

#[test]
fn init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still alive after repeated init");
}
