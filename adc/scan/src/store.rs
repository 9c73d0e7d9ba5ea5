//! Channel list and sample buffer

use adc_scan_core::{ChannelId, ScanError, ScanResult, MAX_CHANNELS};
use heapless::Vec;

/// Ordered channel list with one sample slot per channel
///
/// Samples live in a fixed array; only the prefix covered by the channel
/// list is ever exposed, so the list and the buffer always have the same
/// length.
#[derive(Debug, Clone)]
pub struct ChannelStore {
    channels: Vec<ChannelId, MAX_CHANNELS>,
    samples: [u8; MAX_CHANNELS],
}

impl ChannelStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
            samples: [0; MAX_CHANNELS],
        }
    }

    /// Validate the first `size` identifiers of `channels` as a channel list.
    ///
    /// `size == 0` with an empty slice is the "sample nothing" request.
    pub fn validate(channels: &[u8], size: usize) -> ScanResult<Vec<ChannelId, MAX_CHANNELS>> {
        if size == 0 {
            return if channels.is_empty() {
                Ok(Vec::new())
            } else {
                Err(ScanError::InvalidSize)
            };
        }

        if size > MAX_CHANNELS || size > channels.len() {
            return Err(ScanError::InvalidSize);
        }

        let mut list = Vec::new();
        for &raw in &channels[..size] {
            list.push(ChannelId::new(raw)?)
                .map_err(|_| ScanError::InvalidSize)?;
        }
        Ok(list)
    }

    /// Replace the channel list.
    ///
    /// Nothing changes unless validation succeeds. Samples are zeroed.
    pub fn configure(&mut self, channels: &[u8], size: usize) -> ScanResult<()> {
        self.channels = Self::validate(channels, size)?;
        self.samples = [0; MAX_CHANNELS];
        Ok(())
    }

    /// Number of configured channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if sampling is disabled
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channel at a scan position
    pub fn channel(&self, index: usize) -> Option<ChannelId> {
        self.channels.get(index).copied()
    }

    /// Configured channels in scan order
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Last sample stored for a scan position
    pub fn sample(&self, index: usize) -> Option<u8> {
        self.samples().get(index).copied()
    }

    /// Samples in scan order, same length as [`channels`](Self::channels)
    pub fn samples(&self) -> &[u8] {
        &self.samples[..self.channels.len()]
    }

    /// Store a sample. Returns `false` if `index` is past the channel list.
    pub fn record(&mut self, index: usize, value: u8) -> bool {
        if index < self.channels.len() {
            self.samples[index] = value;
            true
        } else {
            false
        }
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
