//! Unit tests for the scan driver

mod store;
