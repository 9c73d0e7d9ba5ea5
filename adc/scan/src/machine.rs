//! Conversion-complete state machine
//!
//! Runs in interrupt context. Each call to [`ScanMachine::on_complete`]
//! handles one conversion-complete event and either advances the scan,
//! finishes it, restarts it from the first channel, or gives up.

use adc_scan_core::{ChannelId, Diagnostic, ScanConfig, ScanError, ScanResult, ScanStatus};
use adc_scan_hal::{ConverterHardware, DiagnosticHook};
use crate::ChannelStore;

/// Transition taken for one conversion-complete event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// No usable scan state; the driver dropped back to idle
    Malformed,
    /// Completion arrived while no scan was in flight; state unchanged
    Spurious,
    /// Sample stored, conversion started on the next channel
    Advanced {
        next: ChannelId,
    },
    /// Sample stored for the last channel, scan complete
    Finished,
    /// Hardware converted the wrong channel, scan restarted from the first
    Restarted {
        expected: ChannelId,
        actual: u8,
    },
    /// Restart bound exceeded, scan abandoned
    Aborted,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Completion {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Completion::Malformed => defmt::write!(fmt, "Malformed"),
            Completion::Spurious => defmt::write!(fmt, "Spurious"),
            Completion::Advanced { next } => defmt::write!(fmt, "Advanced(next={})", next),
            Completion::Finished => defmt::write!(fmt, "Finished"),
            Completion::Restarted { expected, actual } => {
                defmt::write!(fmt, "Restarted(expected={}, actual={})", expected, actual)
            }
            Completion::Aborted => defmt::write!(fmt, "Aborted"),
        }
    }
}

/// Scan cursor, status and restart accounting
#[derive(Debug, Clone)]
pub struct ScanMachine {
    status: ScanStatus,
    cursor: usize,
    restarts: u8,
    config: ScanConfig,
}

impl ScanMachine {
    /// Create an idle machine
    pub const fn new(config: ScanConfig) -> Self {
        Self {
            status: ScanStatus::Idle,
            cursor: 0,
            restarts: 0,
            config,
        }
    }

    /// Current status
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    /// Scan position of the channel being converted
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Mismatch restarts in the current or last scan
    pub fn restarts(&self) -> u8 {
        self.restarts
    }

    /// Active configuration
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Return to (cursor 0, idle). Used whenever the channel list is replaced.
    pub fn reset(&mut self) {
        self.status = ScanStatus::Idle;
        self.cursor = 0;
        self.restarts = 0;
    }

    /// Start a scan at the first channel of `store`
    pub fn begin<H>(&mut self, store: &ChannelStore, hw: &mut H) -> ScanResult<()>
    where
        H: ConverterHardware,
    {
        if self.status.is_scanning() {
            return Err(ScanError::Busy);
        }
        let first = store.channel(0).ok_or(ScanError::NotConfigured)?;

        self.status = ScanStatus::Scanning;
        self.cursor = 0;
        self.restarts = 0;

        hw.select_channel(first);
        hw.start_conversion();
        Ok(())
    }

    /// Handle one conversion-complete event
    pub fn on_complete<H, D>(&mut self, store: &mut ChannelStore, hw: &mut H, hook: &mut D) -> Completion
    where
        H: ConverterHardware,
        D: DiagnosticHook,
    {
        let expected = match store.channel(self.cursor) {
            Some(channel) => channel,
            None => {
                // Empty list or cursor past the end
                self.status = ScanStatus::Idle;
                hook.emit(Diagnostic::Malformed);
                return Completion::Malformed;
            }
        };

        if !self.status.is_scanning() {
            hook.emit(Diagnostic::Malformed);
            return Completion::Spurious;
        }

        let actual = hw.last_converted_channel();
        if !expected.matches(actual) {
            return self.restart(store, hw, hook, expected, actual);
        }

        store.record(self.cursor, hw.read_converted_value());

        if self.cursor + 1 >= store.len() {
            self.status = ScanStatus::Complete;
            return Completion::Finished;
        }

        self.cursor += 1;
        match store.channel(self.cursor) {
            Some(next) => {
                hw.select_channel(next);
                hw.start_conversion();
                Completion::Advanced { next }
            }
            None => {
                self.status = ScanStatus::Idle;
                hook.emit(Diagnostic::Malformed);
                Completion::Malformed
            }
        }
    }

    fn restart<H, D>(
        &mut self,
        store: &ChannelStore,
        hw: &mut H,
        hook: &mut D,
        expected: ChannelId,
        actual: u8,
    ) -> Completion
    where
        H: ConverterHardware,
        D: DiagnosticHook,
    {
        hook.emit(Diagnostic::Mismatch { expected, actual });

        if !self.config.allows_restart(self.restarts) {
            self.status = ScanStatus::Aborted;
            hook.emit(Diagnostic::Aborted { restarts: self.restarts });
            return Completion::Aborted;
        }

        self.restarts = self.restarts.saturating_add(1);
        self.cursor = 0;

        // Non-empty: `expected` came from this list
        let Some(first) = store.channel(0) else {
            self.status = ScanStatus::Idle;
            return Completion::Malformed;
        };
        hw.select_channel(first);
        hw.start_conversion();
        Completion::Restarted { expected, actual }
    }
}

impl Default for ScanMachine {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

#[cfg(test)]
impl ScanMachine {
    pub(crate) fn force(&mut self, status: ScanStatus, cursor: usize) {
        self.status = status;
        self.cursor = cursor;
    }
}
