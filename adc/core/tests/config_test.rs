//! Configuration and status tests for adc-scan-core

use adc_scan_core::{channel, Diagnostic, ScanConfig, ScanStatus, DEFAULT_MAX_RESTARTS};

#[test]
fn test_default_config_is_bounded() {
    let config = ScanConfig::default();
    assert_eq!(config.max_restarts, Some(DEFAULT_MAX_RESTARTS));
}

#[test]
fn test_restart_bound() {
    let config = ScanConfig::new().with_max_restarts(Some(2));
    assert!(config.allows_restart(0));
    assert!(config.allows_restart(1));
    assert!(!config.allows_restart(2));
}

#[test]
fn test_zero_bound_never_restarts() {
    let config = ScanConfig::new().with_max_restarts(Some(0));
    assert!(!config.allows_restart(0));
}

#[test]
fn test_unbounded_always_restarts() {
    assert!(ScanConfig::UNBOUNDED.allows_restart(u8::MAX));
}

#[test]
fn test_status_done() {
    assert!(ScanStatus::Idle.is_done());
    assert!(ScanStatus::Complete.is_done());
    assert!(ScanStatus::Aborted.is_done());
    assert!(!ScanStatus::Scanning.is_done());
    assert_eq!(ScanStatus::default(), ScanStatus::Idle);
}

#[test]
fn test_diagnostic_codes() {
    assert_eq!(Diagnostic::Malformed.code(), 0x08);
    let mismatch = Diagnostic::Mismatch { expected: channel!(3), actual: 9 };
    assert_eq!(mismatch.code(), 0x04);
    assert_eq!(Diagnostic::Aborted { restarts: 4 }.code(), 0x10);
}
