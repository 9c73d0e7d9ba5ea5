//! Interrupt-safe shared driver
//!
//! The conversion-complete interrupt and the synchronous control code both
//! mutate the channel list, samples, cursor and status. Every entry point
//! here runs its whole check-then-act sequence inside one critical section,
//! so the interrupt can never observe a half-applied reconfiguration.

use core::cell::RefCell;
use critical_section::Mutex;
use adc_scan_core::{ScanError, ScanResult, ScanStatus};
use adc_scan_hal::{ConverterHardware, DiagnosticHook, NoDiagnostics};
use crate::{Completion, ScanDriver};

/// [`ScanDriver`] slot that can live in a `static`
pub struct SharedScanner<H, D = NoDiagnostics> {
    inner: Mutex<RefCell<Option<ScanDriver<H, D>>>>,
}

impl<H, D> SharedScanner<H, D> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }
}

impl<H, D> Default for SharedScanner<H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ConverterHardware, D: DiagnosticHook> SharedScanner<H, D> {
    /// Place a driver in the slot, returning the previous one
    pub fn install(&self, driver: ScanDriver<H, D>) -> Option<ScanDriver<H, D>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(driver))
    }

    /// Remove the driver from the slot
    pub fn take(&self) -> Option<ScanDriver<H, D>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Check if a driver is installed
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the driver inside a critical section
    pub fn with<R>(&self, f: impl FnOnce(&mut ScanDriver<H, D>) -> R) -> ScanResult<R> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            let driver = slot.as_mut().ok_or(ScanError::NotConfigured)?;
            Ok(f(driver))
        })
    }

    /// See [`ScanDriver::initialize`]
    pub fn initialize(&self, channels: &[u8], size: usize) -> ScanResult<()> {
        self.with(|driver| driver.initialize(channels, size))?
    }

    /// See [`ScanDriver::reconfigure`]
    pub fn reconfigure(&self, channels: &[u8], size: usize) -> ScanResult<()> {
        self.with(|driver| driver.reconfigure(channels, size))?
    }

    /// See [`ScanDriver::start_scan`]
    pub fn start_scan(&self) -> ScanResult<()> {
        self.with(|driver| driver.start_scan())?
    }

    /// See [`ScanDriver::is_done`]. An empty slot has nothing in flight.
    pub fn is_done(&self) -> bool {
        self.with(|driver| driver.is_done()).unwrap_or(true)
    }

    /// See [`ScanDriver::status`]
    pub fn status(&self) -> ScanResult<ScanStatus> {
        self.with(|driver| driver.status())
    }

    /// See [`ScanDriver::poll`]
    pub fn poll(&self) -> nb::Result<(), ScanError> {
        self.with(|driver| driver.poll())
            .map_err(nb::Error::Other)?
    }

    /// See [`ScanDriver::get_value`]
    pub fn get_value(&self, index: usize) -> ScanResult<u8> {
        self.with(|driver| driver.get_value(index))?
    }

    /// Copy the last completed scan into `out`, returning the number of samples
    pub fn read_values(&self, out: &mut [u8]) -> ScanResult<usize> {
        self.with(|driver| {
            let values = driver.values()?;
            let count = values.len().min(out.len());
            out[..count].copy_from_slice(&values[..count]);
            Ok(count)
        })?
    }

    /// Conversion-complete interrupt entry point.
    ///
    /// Returns `None` when no driver is installed.
    pub fn on_interrupt(&self) -> Option<Completion> {
        self.with(|driver| driver.on_conversion_complete()).ok()
    }
}
