//! Hardware boundary for the ADC scan driver
//!
//! This crate holds the narrow interface the scan state machine drives
//! ([`ConverterHardware`]), the observability hook it reports anomalies to
//! ([`DiagnosticHook`]), and a register-level adapter for converters with a
//! channel multiplexer register ([`mux::MuxConverter`]).

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod converter;
pub mod mux;

// Re-export commonly used types
pub use converter::{ConverterHardware, DiagnosticHook, NoDiagnostics};
pub use mux::{MuxConverter, MuxRegisters};
