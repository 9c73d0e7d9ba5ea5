#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # ADC Scan Core
//!
//! Types shared by every layer of the scan driver: validated channel
//! identifiers, scan status, diagnostics and the error type returned by
//! configuration and read operations.

use core::fmt;

pub mod channel;
pub mod config;
pub mod status;

pub use channel::*;
pub use config::*;
pub use status::*;

/// Driver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of channels in one scan list
pub const MAX_CHANNELS: usize = 32;

/// Result type used throughout the scan driver
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors reported by the scan driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Size is zero with a non-empty sequence, exceeds the channel ceiling,
    /// or is larger than the sequence supplied
    InvalidSize,
    /// Channel identifier outside the addressable range
    InvalidChannel(u8),
    /// Operation refused because a scan is in progress
    Busy,
    /// No channels configured, or the driver has not been installed
    NotConfigured,
    /// No completed scan backs the sample buffer
    StaleRead,
    /// Read index past the end of the channel list
    IndexOutOfRange,
    /// The last scan gave up after too many mismatch restarts
    Aborted,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidSize => write!(f, "Invalid channel list size"),
            ScanError::InvalidChannel(id) => write!(f, "Invalid channel identifier {}", id),
            ScanError::Busy => write!(f, "Scan in progress"),
            ScanError::NotConfigured => write!(f, "No channels configured"),
            ScanError::StaleRead => write!(f, "No completed scan to read from"),
            ScanError::IndexOutOfRange => write!(f, "Sample index out of range"),
            ScanError::Aborted => write!(f, "Scan aborted after repeated channel mismatches"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScanError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ScanError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ScanError::InvalidSize => defmt::write!(fmt, "InvalidSize"),
            ScanError::InvalidChannel(id) => defmt::write!(fmt, "InvalidChannel({})", id),
            ScanError::Busy => defmt::write!(fmt, "Busy"),
            ScanError::NotConfigured => defmt::write!(fmt, "NotConfigured"),
            ScanError::StaleRead => defmt::write!(fmt, "StaleRead"),
            ScanError::IndexOutOfRange => defmt::write!(fmt, "IndexOutOfRange"),
            ScanError::Aborted => defmt::write!(fmt, "Aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ScanError::InvalidChannel(40).to_string(), "Invalid channel identifier 40");
        assert_eq!(ScanError::Busy.to_string(), "Scan in progress");
    }

    #[test]
    fn test_channel_ceiling_matches_id_range() {
        assert_eq!(MAX_CHANNELS, ChannelId::MAX.raw() as usize + 1);
    }
}
