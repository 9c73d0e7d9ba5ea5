//! Run-time driver configuration

/// Default bound on mismatch restarts within one scan
pub const DEFAULT_MAX_RESTARTS: u8 = 8;

/// Scan driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Mismatch restarts tolerated per scan before aborting, `None` for no bound
    pub max_restarts: Option<u8>,
}

impl ScanConfig {
    /// Restart on every mismatch, never abort
    pub const UNBOUNDED: Self = Self { max_restarts: None };

    /// Create the default configuration
    pub const fn new() -> Self {
        Self {
            max_restarts: Some(DEFAULT_MAX_RESTARTS),
        }
    }

    /// Set the restart bound
    pub const fn with_max_restarts(mut self, max_restarts: Option<u8>) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Check whether one more restart is allowed after `restarts` so far
    pub const fn allows_restart(&self, restarts: u8) -> bool {
        match self.max_restarts {
            Some(max) => restarts < max,
            None => true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScanConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ScanConfig(max_restarts={})", self.max_restarts);
    }
}
