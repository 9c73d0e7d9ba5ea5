//! Register-level adapter for multiplexer-select converters
//!
//! Targets converters laid out as an 8-bit multiplexer register (reference
//! and alignment in the top bits, channel select in the low five bits), an
//! 8-bit control register and a left-adjusted result register whose high
//! byte is the 8-bit sample.

use adc_scan_core::ChannelId;
use crate::ConverterHardware;

/// Register bit layout
pub mod bits {
    /// Channel select field in the multiplexer register
    pub const MUX_CHANNEL_MASK: u8 = 0b0001_1111;
    /// Internal reference, left-adjusted result, channel 0
    pub const MUX_INIT: u8 = 0b1110_0000;

    /// Converter enable
    pub const CTRL_ENABLE: u8 = 1 << 7;
    /// Start conversion, cleared by hardware when the conversion ends
    pub const CTRL_START: u8 = 1 << 6;
    /// Conversion-complete interrupt enable
    pub const CTRL_INTERRUPT_ENABLE: u8 = 1 << 3;
    /// Clock prescaler field
    pub const CTRL_PRESCALER_MASK: u8 = 0b0000_0111;
    /// Prescaler setting written at enable
    pub const CTRL_PRESCALER: u8 = 0b0000_0110;
}

/// Raw access to the converter's registers
pub trait MuxRegisters {
    /// Read the multiplexer register
    fn mux(&self) -> u8;

    /// Write the multiplexer register
    fn set_mux(&mut self, value: u8);

    /// Read the control register
    fn control(&self) -> u8;

    /// Write the control register
    fn set_control(&mut self, value: u8);

    /// Read the high byte of the result register
    fn result_high(&self) -> u8;
}

/// [`ConverterHardware`] over a [`MuxRegisters`] block
#[derive(Debug)]
pub struct MuxConverter<R> {
    regs: R,
}

impl<R: MuxRegisters> MuxConverter<R> {
    /// Wrap a register block
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Get the register block
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Get the register block mutably
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Release the register block
    pub fn free(self) -> R {
        self.regs
    }
}

impl<R: MuxRegisters> ConverterHardware for MuxConverter<R> {
    fn enable(&mut self, interrupt_on_complete: bool) {
        self.regs.set_mux(bits::MUX_INIT);

        let mut control = bits::CTRL_ENABLE | bits::CTRL_PRESCALER;
        if interrupt_on_complete {
            control |= bits::CTRL_INTERRUPT_ENABLE;
        }
        self.regs.set_control(control);
    }

    fn select_channel(&mut self, channel: ChannelId) {
        let mux = self.regs.mux() & !bits::MUX_CHANNEL_MASK;
        self.regs.set_mux(mux | (channel.raw() & bits::MUX_CHANNEL_MASK));
    }

    fn start_conversion(&mut self) {
        let control = self.regs.control();
        self.regs.set_control(control | bits::CTRL_START);
    }

    fn last_converted_channel(&self) -> u8 {
        self.regs.mux() & bits::MUX_CHANNEL_MASK
    }

    fn read_converted_value(&mut self) -> u8 {
        self.regs.result_high()
    }
}
