//! Channel identifiers

use core::fmt;
use crate::{ScanError, ScanResult};

/// Highest addressable channel number
pub const MAX_CHANNEL_ID: u8 = 31;

/// Validated analog input channel identifier in `0..=31`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Lowest addressable channel
    pub const MIN: ChannelId = ChannelId(0);

    /// Highest addressable channel
    pub const MAX: ChannelId = ChannelId(MAX_CHANNEL_ID);

    /// Create a channel identifier, rejecting values past [`ChannelId::MAX`]
    pub const fn new(id: u8) -> ScanResult<Self> {
        if id > Self::MAX.0 {
            Err(ScanError::InvalidChannel(id))
        } else {
            Ok(ChannelId(id))
        }
    }

    /// Create a channel identifier in a const context.
    ///
    /// Panics at compile time when evaluated in a `const` with an out of
    /// range value; prefer the [`channel!`](crate::channel) macro.
    pub const fn new_const(id: u8) -> Self {
        assert!(id <= MAX_CHANNEL_ID, "channel identifier out of range");
        ChannelId(id)
    }

    /// Get the raw channel number
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check whether a raw hardware reading names this channel
    pub const fn matches(self, raw: u8) -> bool {
        self.0 == raw
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = ScanError;

    fn try_from(id: u8) -> ScanResult<Self> {
        ChannelId::new(id)
    }
}

impl From<ChannelId> for u8 {
    fn from(channel: ChannelId) -> u8 {
        channel.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Channel({})", self.0);
    }
}

/// Create a compile-time checked channel constant
#[macro_export]
macro_rules! channel {
    ($value:expr) => {{
        const CHANNEL: $crate::ChannelId = $crate::ChannelId::new_const($value);
        CHANNEL
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_range() {
        assert!(ChannelId::new(0).is_ok());
        assert!(ChannelId::new(31).is_ok());
        assert_eq!(ChannelId::new(32), Err(ScanError::InvalidChannel(32)));
        assert_eq!(ChannelId::new(255), Err(ScanError::InvalidChannel(255)));
    }

    #[test]
    fn test_channel_macro() {
        let ch = channel!(7);
        assert_eq!(ch.raw(), 7);
        assert!(ch.matches(7));
        assert!(!ch.matches(9));
    }
}
