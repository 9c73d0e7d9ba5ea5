//! Shared scanner tests for adc-scan
//! The conversion interrupt is played by a second thread; critical sections
//! come from the `std` implementation of `critical-section`.

use std::thread;

use adc_scan::{Completion, Diagnostic, ScanConfig, ScanDriver, ScanError, ScanStatus, SharedScanner};
use adc_scan_hal::DiagnosticHook;
use adc_scan_sim::{RecordingHook, SimConverter};
use adc_scan_trace::{LogHook, SharedDiagnosticLog};

/// Finish the pending conversion and deliver the interrupt
fn interrupt<D: DiagnosticHook>(scanner: &SharedScanner<SimConverter, D>) -> Option<Completion> {
    let fired = scanner.with(|driver| driver.hardware_mut().finish()).unwrap_or(false);
    if fired {
        scanner.on_interrupt()
    } else {
        None
    }
}

#[test]
fn test_empty_slot() {
    static SCANNER: SharedScanner<SimConverter> = SharedScanner::new();

    assert!(!SCANNER.is_installed());
    assert_eq!(SCANNER.initialize(&[1], 1), Err(ScanError::NotConfigured));
    assert_eq!(SCANNER.start_scan(), Err(ScanError::NotConfigured));
    assert_eq!(SCANNER.get_value(0), Err(ScanError::NotConfigured));
    assert_eq!(SCANNER.on_interrupt(), None);
    assert!(SCANNER.is_done());
}

#[test]
fn test_install_and_take() {
    static SCANNER: SharedScanner<SimConverter> = SharedScanner::new();

    assert!(SCANNER.install(ScanDriver::new(SimConverter::new())).is_none());
    SCANNER.initialize(&[2, 3], 2).unwrap();
    assert!(SCANNER.install(ScanDriver::new(SimConverter::new())).is_some());

    let driver = SCANNER.take().unwrap();
    assert!(!driver.is_initialized());
    assert!(!SCANNER.is_installed());
}

#[test]
fn test_scan_through_interrupts() {
    static SCANNER: SharedScanner<SimConverter, RecordingHook> = SharedScanner::new();
    SCANNER.install(ScanDriver::with_hook(
        SimConverter::with_source(|channel| channel + 100),
        RecordingHook::new(),
        ScanConfig::default(),
    ));

    SCANNER.initialize(&[3, 7, 1], 3).unwrap();
    SCANNER.start_scan().unwrap();
    assert_eq!(SCANNER.start_scan(), Err(ScanError::Busy));
    assert_eq!(SCANNER.poll(), Err(nb::Error::WouldBlock));

    let mut completions = Vec::new();
    while !SCANNER.is_done() {
        completions.extend(interrupt(&SCANNER));
    }
    assert_eq!(completions.len(), 3);
    assert_eq!(completions.last(), Some(&Completion::Finished));
    assert_eq!(SCANNER.status(), Ok(ScanStatus::Complete));

    let mut values = [0u8; 8];
    assert_eq!(SCANNER.read_values(&mut values), Ok(3));
    assert_eq!(&values[..3], &[103, 107, 101]);
    assert_eq!(SCANNER.get_value(2), Ok(101));
    assert_eq!(nb::block!(SCANNER.poll()), Ok(()));
}

#[test]
fn test_mismatch_reaches_shared_log() {
    static LOG: SharedDiagnosticLog<8> = SharedDiagnosticLog::new();
    static SCANNER: SharedScanner<SimConverter, LogHook<'static, 8>> = SharedScanner::new();
    SCANNER.install(ScanDriver::with_hook(SimConverter::new(), LOG.hook(), ScanConfig::default()));

    SCANNER.initialize(&[3, 7], 2).unwrap();
    SCANNER.start_scan().unwrap();

    SCANNER.with(|driver| driver.hardware_mut().race_select(9)).unwrap();
    assert!(matches!(interrupt(&SCANNER), Some(Completion::Restarted { actual: 9, .. })));
    assert!(!SCANNER.is_done());

    while !SCANNER.is_done() {
        interrupt(&SCANNER);
    }
    assert_eq!(SCANNER.get_value(0), Ok(3));
    assert_eq!(SCANNER.get_value(1), Ok(7));

    assert_eq!(LOG.counters().mismatch, 1);
    let mut drained = Vec::new();
    assert_eq!(LOG.drain_into(|d| drained.push(d)), 1);
    assert!(matches!(drained[0], Diagnostic::Mismatch { actual: 9, .. }));
}

#[test]
fn test_reconfigure_waits_for_interrupt_driven_scan() {
    static SCANNER: SharedScanner<SimConverter, RecordingHook> = SharedScanner::new();
    SCANNER.install(ScanDriver::with_hook(SimConverter::new(), RecordingHook::new(), ScanConfig::default()));

    SCANNER.initialize(&[3, 7, 1, 12], 4).unwrap();
    SCANNER.start_scan().unwrap();

    let isr = thread::spawn(|| {
        let mut completions = 0;
        while !SCANNER.is_done() {
            if interrupt(&SCANNER).is_some() {
                completions += 1;
            }
            thread::yield_now();
        }
        completions
    });

    loop {
        match SCANNER.reconfigure(&[5], 1) {
            Ok(()) => break,
            Err(ScanError::Busy) => thread::yield_now(),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    // Reconfiguration only lands once the whole scan has completed
    assert_eq!(isr.join().unwrap(), 4);
    let (channels, status, diagnostics) = SCANNER
        .with(|driver| {
            let channels: Vec<u8> = driver.channels().iter().map(|c| c.raw()).collect();
            (channels, driver.status(), driver.hook().events().len())
        })
        .unwrap();
    assert_eq!(channels, vec![5]);
    assert_eq!(status, ScanStatus::Idle);
    assert_eq!(diagnostics, 0);
}
