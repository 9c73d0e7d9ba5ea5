//! Host-side converter simulation for the scan driver.
//!
//! [`SimConverter`] stands in for the converter peripheral: it records every
//! register-level operation, produces samples from a source function and
//! lets a test decide when a conversion finishes and what the hardware
//! reports, including the select-register race that yields a mismatch.

use adc_scan_core::{ChannelId, Diagnostic};
use adc_scan_hal::{ConverterHardware, DiagnosticHook};

/// Hardware operation observed by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwOp {
    Enable { interrupt: bool },
    Select(u8),
    Start,
    Read,
}

/// Simulated single-conversion converter
#[derive(Debug, Clone)]
pub struct SimConverter {
    enabled: bool,
    interrupt: bool,
    selected: u8,
    pending: bool,
    latched_channel: u8,
    latched_value: u8,
    source: fn(u8) -> u8,
    ops: Vec<HwOp>,
    conversions: usize,
}

impl SimConverter {
    /// Create a converter whose sample for channel `n` is `n`
    pub fn new() -> Self {
        Self::with_source(|channel| channel)
    }

    /// Create a converter producing samples from `source(channel)`
    pub fn with_source(source: fn(u8) -> u8) -> Self {
        Self {
            enabled: false,
            interrupt: false,
            selected: 0,
            pending: false,
            latched_channel: 0,
            latched_value: 0,
            source,
            ops: Vec::new(),
            conversions: 0,
        }
    }

    /// Finish the pending conversion on the selected channel.
    ///
    /// Returns `false` if no conversion was started.
    pub fn finish(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.latch(self.selected, (self.source)(self.selected));
        true
    }

    /// Force what the hardware reports for the finished conversion
    pub fn latch(&mut self, channel: u8, value: u8) {
        self.pending = false;
        self.latched_channel = channel;
        self.latched_value = value;
        self.conversions += 1;
    }

    /// Overwrite the select register without a recorded operation, as a
    /// competing writer would between start and latch
    pub fn race_select(&mut self, channel: u8) {
        self.selected = channel;
    }

    /// Recorded operations, oldest first
    pub fn ops(&self) -> &[HwOp] {
        &self.ops
    }

    /// Forget recorded operations
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Channel numbers written to the select register, oldest first
    pub fn selections(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                HwOp::Select(channel) => Some(*channel),
                _ => None,
            })
            .collect()
    }

    /// Last channel written to the select register
    pub fn last_selected(&self) -> Option<u8> {
        self.selections().last().copied()
    }

    /// Number of times the converter was enabled
    pub fn enable_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, HwOp::Enable { .. }))
            .count()
    }

    /// Current select register value
    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Check if a conversion is running
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Check if the converter is powered
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if the conversion-complete interrupt is enabled
    pub fn interrupt_enabled(&self) -> bool {
        self.interrupt
    }

    /// Number of finished conversions
    pub fn conversions(&self) -> usize {
        self.conversions
    }
}

impl Default for SimConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterHardware for SimConverter {
    fn enable(&mut self, interrupt_on_complete: bool) {
        self.enabled = true;
        self.interrupt = interrupt_on_complete;
        self.ops.push(HwOp::Enable { interrupt: interrupt_on_complete });
    }

    fn select_channel(&mut self, channel: ChannelId) {
        self.selected = channel.raw();
        self.ops.push(HwOp::Select(channel.raw()));
    }

    fn start_conversion(&mut self) {
        self.pending = true;
        self.ops.push(HwOp::Start);
    }

    fn last_converted_channel(&self) -> u8 {
        self.latched_channel
    }

    fn read_converted_value(&mut self) -> u8 {
        self.ops.push(HwOp::Read);
        self.latched_value
    }
}

/// Hook that keeps every diagnostic it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    events: Vec<Diagnostic>,
}

impl RecordingHook {
    /// Create an empty hook
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics received, oldest first
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Diagnostic codes received, oldest first
    pub fn codes(&self) -> Vec<u8> {
        self.events.iter().map(Diagnostic::code).collect()
    }

    /// Number of diagnostics with `code`
    pub fn count(&self, code: u8) -> usize {
        self.events.iter().filter(|d| d.code() == code).count()
    }

    /// Forget received diagnostics
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DiagnosticHook for RecordingHook {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }
}
