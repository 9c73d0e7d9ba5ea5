#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # ADC Scan
//!
//! Interrupt-driven scanning of an ordered channel list on a converter that
//! performs one conversion at a time.
//!
//! The caller configures a channel list and starts a scan. The converter's
//! conversion-complete interrupt calls back into the driver, which checks
//! that the hardware converted the channel it scheduled, stores the sample
//! and schedules the next channel. A completion that reports the wrong
//! channel restarts the scan from the first channel.
//!
//! ```rust,ignore
//! use adc_scan::{ScanDriver, SharedScanner};
//!
//! static ADC: SharedScanner<Board> = SharedScanner::new();
//!
//! ADC.install(ScanDriver::new(Board::take()));
//! ADC.initialize(&[3, 7, 1], 3)?;
//! ADC.start_scan()?;
//!
//! // conversion-complete interrupt
//! fn adc_isr() {
//!     ADC.on_interrupt();
//! }
//!
//! let battery = nb::block!(ADC.poll()).and_then(|()| ADC.get_value(0));
//! ```

#[macro_use]
mod fmt;

pub mod driver;
pub mod machine;
pub mod shared;
pub mod store;

pub use adc_scan_core::*;
pub use adc_scan_hal::{ConverterHardware, DiagnosticHook, NoDiagnostics};
pub use driver::*;
pub use machine::*;
pub use shared::*;
pub use store::*;

#[cfg(test)]
mod tests;
