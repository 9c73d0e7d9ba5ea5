//! Channel store tests

use crate::{ChannelStore, ScanError};

#[test]
fn test_configure_copies_channels() {
    let mut store = ChannelStore::new();
    store.configure(&[3, 7, 1], 3).unwrap();

    let raw: Vec<u8> = store.channels().iter().map(|c| c.raw()).collect();
    assert_eq!(raw, vec![3, 7, 1]);
    assert_eq!(store.samples(), &[0, 0, 0]);
}

#[test]
fn test_configure_uses_prefix() {
    let mut store = ChannelStore::new();
    store.configure(&[4, 5, 6, 40], 2).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.samples().len(), 2);
}

#[test]
fn test_buffer_parity_across_resizes() {
    let mut store = ChannelStore::new();
    for size in [1usize, 32, 5, 0, 17] {
        let channels: Vec<u8> = (0..size as u8).collect();
        store.configure(&channels, size).unwrap();
        assert_eq!(store.channels().len(), store.samples().len());
        assert_eq!(store.len(), size);
    }
}

#[test]
fn test_rejects_invalid_channel() {
    let mut store = ChannelStore::new();
    assert_eq!(store.configure(&[1, 32], 2), Err(ScanError::InvalidChannel(32)));
    assert_eq!(store.configure(&[255], 1), Err(ScanError::InvalidChannel(255)));
}

#[test]
fn test_rejects_invalid_size() {
    let mut store = ChannelStore::new();
    let many = [0u8; 33];
    assert_eq!(store.configure(&[1, 2], 0), Err(ScanError::InvalidSize));
    assert_eq!(store.configure(&many, 33), Err(ScanError::InvalidSize));
    assert_eq!(store.configure(&[1, 2], 3), Err(ScanError::InvalidSize));
}

#[test]
fn test_failed_configure_leaves_store_untouched() {
    let mut store = ChannelStore::new();
    store.configure(&[2, 4], 2).unwrap();
    assert!(store.record(1, 99));

    assert!(store.configure(&[1, 2, 50], 3).is_err());
    assert_eq!(store.len(), 2);
    assert_eq!(store.channel(1).map(|c| c.raw()), Some(4));
    assert_eq!(store.sample(1), Some(99));
}

#[test]
fn test_empty_configure_is_repeatable() {
    let mut store = ChannelStore::new();
    store.configure(&[9], 1).unwrap();

    assert!(store.configure(&[], 0).is_ok());
    assert!(store.configure(&[], 0).is_ok());
    assert!(store.is_empty());
    assert!(store.samples().is_empty());
}

#[test]
fn test_record_out_of_range() {
    let mut store = ChannelStore::new();
    store.configure(&[0, 1], 2).unwrap();
    assert!(!store.record(2, 1));
    assert_eq!(store.sample(2), None);
}
