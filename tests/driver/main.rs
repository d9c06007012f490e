//! Integration tests for Layer 3: Driver
//!
//! Tests the prepare/invoke/extract protocol against the in-memory driver.

mod cursors;
mod protocol;
