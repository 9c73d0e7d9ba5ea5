//! Register adapter tests for adc-scan-hal

use adc_scan_core::{channel, Diagnostic};
use adc_scan_hal::mux::bits;
use adc_scan_hal::{ConverterHardware, DiagnosticHook, MuxConverter, MuxRegisters};

#[derive(Debug, Default)]
struct FakeRegisters {
    mux: u8,
    control: u8,
    result: u8,
    control_writes: usize,
}

impl MuxRegisters for FakeRegisters {
    fn mux(&self) -> u8 {
        self.mux
    }

    fn set_mux(&mut self, value: u8) {
        self.mux = value;
    }

    fn control(&self) -> u8 {
        self.control
    }

    fn set_control(&mut self, value: u8) {
        self.control = value;
        self.control_writes += 1;
    }

    fn result_high(&self) -> u8 {
        self.result
    }
}

#[test]
fn test_enable_with_interrupt() {
    let mut adc = MuxConverter::new(FakeRegisters::default());
    adc.enable(true);

    assert_eq!(adc.registers().mux, 0b1110_0000);
    assert_eq!(adc.registers().control, 0b1000_1110);
}

#[test]
fn test_enable_without_interrupt() {
    let mut adc = MuxConverter::new(FakeRegisters::default());
    adc.enable(false);

    let control = adc.registers().control;
    assert_eq!(control & bits::CTRL_INTERRUPT_ENABLE, 0);
    assert_eq!(control & bits::CTRL_ENABLE, bits::CTRL_ENABLE);
    assert_eq!(control & bits::CTRL_PRESCALER_MASK, bits::CTRL_PRESCALER);
}

#[test]
fn test_select_preserves_reference_bits() {
    let mut adc = MuxConverter::new(FakeRegisters::default());
    adc.enable(true);

    adc.select_channel(channel!(31));
    assert_eq!(adc.registers().mux, 0b1111_1111);

    adc.select_channel(channel!(5));
    assert_eq!(adc.registers().mux, 0b1110_0101);
    assert_eq!(adc.last_converted_channel(), 5);
}

#[test]
fn test_start_sets_start_bit_only() {
    let mut adc = MuxConverter::new(FakeRegisters::default());
    adc.enable(true);
    let before = adc.registers().control;

    adc.start_conversion();
    assert_eq!(adc.registers().control, before | bits::CTRL_START);
    assert_eq!(adc.registers().control_writes, 2);
}

#[test]
fn test_read_uses_high_result_byte() {
    let mut adc = MuxConverter::new(FakeRegisters { result: 0xA5, ..Default::default() });
    assert_eq!(adc.read_converted_value(), 0xA5);
    assert_eq!(adc.free().result, 0xA5);
}

#[test]
fn test_closure_hook() {
    let mut seen = Vec::new();
    {
        let mut hook = |d: Diagnostic| seen.push(d.code());
        hook.emit(Diagnostic::Malformed);
        hook.emit(Diagnostic::Aborted { restarts: 1 });
    }
    assert_eq!(seen, vec![0x08, 0x10]);
}
