//! Scan status and diagnostic signals

use core::fmt;
use crate::ChannelId;

/// Where the driver is in its scan lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStatus {
    /// Configured, but no completed scan backs the sample buffer
    #[default]
    Idle,
    /// A scan is in flight
    Scanning,
    /// The last scan converted every channel
    Complete,
    /// The last scan gave up after too many mismatch restarts
    Aborted,
}

impl ScanStatus {
    /// Check if a scan is in flight
    pub const fn is_scanning(self) -> bool {
        matches!(self, ScanStatus::Scanning)
    }

    /// Check if the driver is ready for a new scan or reconfiguration
    pub const fn is_done(self) -> bool {
        !self.is_scanning()
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Idle => write!(f, "Idle"),
            ScanStatus::Scanning => write!(f, "Scanning"),
            ScanStatus::Complete => write!(f, "Complete"),
            ScanStatus::Aborted => write!(f, "Aborted"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScanStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ScanStatus::Idle => defmt::write!(fmt, "Idle"),
            ScanStatus::Scanning => defmt::write!(fmt, "Scanning"),
            ScanStatus::Complete => defmt::write!(fmt, "Complete"),
            ScanStatus::Aborted => defmt::write!(fmt, "Aborted"),
        }
    }
}

/// Anomaly raised by the completion handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Completion arrived with no scan to attribute it to
    Malformed,
    /// Hardware converted a different channel than the one scheduled
    Mismatch {
        expected: ChannelId,
        actual: u8,
    },
    /// Scan abandoned after the restart bound was exceeded
    Aborted {
        restarts: u8,
    },
}

impl Diagnostic {
    /// Mismatch code, matches the board's race debug line
    pub const MISMATCH_CODE: u8 = 0x04;
    /// Malformed code, matches the board's state debug line
    pub const MALFORMED_CODE: u8 = 0x08;
    /// Aborted code
    pub const ABORTED_CODE: u8 = 0x10;

    /// Stable numeric code for this diagnostic
    pub const fn code(&self) -> u8 {
        match self {
            Diagnostic::Malformed => Self::MALFORMED_CODE,
            Diagnostic::Mismatch { .. } => Self::MISMATCH_CODE,
            Diagnostic::Aborted { .. } => Self::ABORTED_CODE,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Malformed => write!(f, "completion with no scan in progress"),
            Diagnostic::Mismatch { expected, actual } => {
                write!(f, "expected channel {} but hardware converted {}", expected.raw(), actual)
            }
            Diagnostic::Aborted { restarts } => write!(f, "scan aborted after {} restarts", restarts),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Diagnostic {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Diagnostic::Malformed => defmt::write!(fmt, "Malformed"),
            Diagnostic::Mismatch { expected, actual } => {
                defmt::write!(fmt, "Mismatch(expected={}, actual={})", expected, actual)
            }
            Diagnostic::Aborted { restarts } => defmt::write!(fmt, "Aborted(restarts={})", restarts),
        }
    }
}
