//! Scan controller: configuration, start, status and reads

use adc_scan_core::{ChannelId, ScanConfig, ScanError, ScanResult, ScanStatus};
use adc_scan_hal::{ConverterHardware, DiagnosticHook, NoDiagnostics};
use crate::{ChannelStore, Completion, ScanMachine};

/// Interrupt-driven scan driver owning the converter and all scan state
///
/// Synchronous code calls [`initialize`](Self::initialize),
/// [`start_scan`](Self::start_scan) and the read methods; the
/// conversion-complete interrupt calls
/// [`on_conversion_complete`](Self::on_conversion_complete). When both run on
/// the same driver, share it through [`SharedScanner`](crate::SharedScanner).
#[derive(Debug)]
pub struct ScanDriver<H, D = NoDiagnostics> {
    hw: H,
    hook: D,
    store: ChannelStore,
    machine: ScanMachine,
    initialized: bool,
}

impl<H: ConverterHardware> ScanDriver<H, NoDiagnostics> {
    /// Create a driver with the default configuration and no diagnostics
    pub const fn new(hw: H) -> Self {
        Self::with_hook(hw, NoDiagnostics, ScanConfig::new())
    }
}

impl<H: ConverterHardware, D: DiagnosticHook> ScanDriver<H, D> {
    /// Create a driver reporting anomalies to `hook`
    pub const fn with_hook(hw: H, hook: D, config: ScanConfig) -> Self {
        Self {
            hw,
            hook,
            store: ChannelStore::new(),
            machine: ScanMachine::new(config),
            initialized: false,
        }
    }

    /// Configure the channel list and bring up the converter.
    ///
    /// The first successful call enables the converter with the
    /// conversion-complete interrupt. Later calls behave like
    /// [`reconfigure`](Self::reconfigure).
    pub fn initialize(&mut self, channels: &[u8], size: usize) -> ScanResult<()> {
        if self.initialized {
            return self.reconfigure(channels, size);
        }
        if self.machine.status().is_scanning() {
            return Err(ScanError::Busy);
        }

        self.configure(channels, size)?;
        self.hw.enable(true);
        self.initialized = true;
        info!("converter enabled");
        Ok(())
    }

    /// Replace the channel list. Refused before [`initialize`](Self::initialize)
    /// and while a scan is in flight.
    pub fn reconfigure(&mut self, channels: &[u8], size: usize) -> ScanResult<()> {
        if !self.initialized {
            return Err(ScanError::NotConfigured);
        }
        if self.machine.status().is_scanning() {
            warn!("reconfigure refused, scan in progress");
            return Err(ScanError::Busy);
        }
        self.configure(channels, size)
    }

    fn configure(&mut self, channels: &[u8], size: usize) -> ScanResult<()> {
        if let Err(err) = self.store.configure(channels, size) {
            debug!("channel list rejected: {}", err);
            return Err(err);
        }
        self.machine.reset();
        debug!("channel list set, {} channels", self.store.len());
        Ok(())
    }

    /// Start converting the first channel of the list
    pub fn start_scan(&mut self) -> ScanResult<()> {
        if !self.initialized {
            return Err(ScanError::NotConfigured);
        }
        self.machine.begin(&self.store, &mut self.hw)?;
        trace!("scan started, {} channels", self.store.len());
        Ok(())
    }

    /// Conversion-complete interrupt entry point
    pub fn on_conversion_complete(&mut self) -> Completion {
        let completion = self.machine.on_complete(&mut self.store, &mut self.hw, &mut self.hook);
        match completion {
            Completion::Finished => trace!("scan complete"),
            Completion::Malformed => warn!("completion without a valid scan, back to idle"),
            Completion::Spurious => warn!("completion while idle ignored"),
            Completion::Restarted { expected, actual } => {
                warn!("expected channel {} but converted {}, restarting", expected.raw(), actual)
            }
            Completion::Aborted => error!("scan aborted after {} restarts", self.machine.restarts()),
            Completion::Advanced { .. } => {}
        }
        completion
    }

    /// Check that no scan is in flight
    pub fn is_done(&self) -> bool {
        self.machine.status().is_done()
    }

    /// Current scan status
    pub fn status(&self) -> ScanStatus {
        self.machine.status()
    }

    /// Non-blocking wait for the current scan.
    ///
    /// `WouldBlock` while scanning, `Ok` once every channel has a fresh
    /// sample.
    pub fn poll(&self) -> nb::Result<(), ScanError> {
        match self.machine.status() {
            ScanStatus::Scanning => Err(nb::Error::WouldBlock),
            ScanStatus::Complete => Ok(()),
            ScanStatus::Aborted => Err(nb::Error::Other(ScanError::Aborted)),
            ScanStatus::Idle => Err(nb::Error::Other(ScanError::StaleRead)),
        }
    }

    /// Sample for the channel at scan position `index` from the last completed scan
    pub fn get_value(&self, index: usize) -> ScanResult<u8> {
        if index >= self.store.len() {
            return Err(ScanError::IndexOutOfRange);
        }
        self.check_readable()?;
        self.store.sample(index).ok_or(ScanError::IndexOutOfRange)
    }

    /// All samples from the last completed scan, in scan order
    pub fn values(&self) -> ScanResult<&[u8]> {
        self.check_readable()?;
        Ok(self.store.samples())
    }

    fn check_readable(&self) -> ScanResult<()> {
        match self.machine.status() {
            ScanStatus::Complete => Ok(()),
            ScanStatus::Aborted => Err(ScanError::Aborted),
            ScanStatus::Idle | ScanStatus::Scanning => Err(ScanError::StaleRead),
        }
    }

    /// Configured channels in scan order
    pub fn channels(&self) -> &[ChannelId] {
        self.store.channels()
    }

    /// Check if the converter has been brought up
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Active configuration
    pub fn config(&self) -> ScanConfig {
        self.machine.config()
    }

    /// Scan position of the channel being converted
    pub fn cursor(&self) -> usize {
        self.machine.cursor()
    }

    /// Mismatch restarts in the current or last scan
    pub fn restarts(&self) -> u8 {
        self.machine.restarts()
    }

    /// Get the converter
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Get the converter mutably
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Get the diagnostic hook
    pub fn hook(&self) -> &D {
        &self.hook
    }

    /// Release the converter and hook
    pub fn release(self) -> (H, D) {
        (self.hw, self.hook)
    }
}

#[cfg(test)]
impl<H, D> ScanDriver<H, D> {
    pub(crate) fn machine_mut(&mut self) -> &mut ScanMachine {
        &mut self.machine
    }
}
