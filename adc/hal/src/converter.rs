//! Converter and diagnostic traits

use adc_scan_core::{ChannelId, Diagnostic};

/// Single-channel, interrupt-completing analog to digital converter
///
/// All methods are register accesses and cannot fail. Implementations must be
/// callable from the conversion-complete interrupt.
pub trait ConverterHardware {
    /// Power the converter and optionally enable the conversion-complete interrupt
    fn enable(&mut self, interrupt_on_complete: bool);

    /// Program the active input channel
    fn select_channel(&mut self, channel: ChannelId);

    /// Trigger one conversion on the currently selected channel
    fn start_conversion(&mut self);

    /// Raw number of the channel the hardware most recently converted
    fn last_converted_channel(&self) -> u8;

    /// Most recent 8-bit conversion result
    fn read_converted_value(&mut self) -> u8;
}

impl<H: ConverterHardware + ?Sized> ConverterHardware for &mut H {
    fn enable(&mut self, interrupt_on_complete: bool) {
        (**self).enable(interrupt_on_complete)
    }

    fn select_channel(&mut self, channel: ChannelId) {
        (**self).select_channel(channel)
    }

    fn start_conversion(&mut self) {
        (**self).start_conversion()
    }

    fn last_converted_channel(&self) -> u8 {
        (**self).last_converted_channel()
    }

    fn read_converted_value(&mut self) -> u8 {
        (**self).read_converted_value()
    }
}

/// Observability hook for anomalies seen by the completion handler
pub trait DiagnosticHook {
    /// Report a diagnostic. Called from interrupt context.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Hook that discards every diagnostic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDiagnostics;

impl DiagnosticHook for NoDiagnostics {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

impl<F: FnMut(Diagnostic)> DiagnosticHook for F {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}
