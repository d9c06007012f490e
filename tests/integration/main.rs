//! End-to-end integration tests
//!
//! Tests the whole pipeline: specification text, call models, configuration,
//! serialized output, and execution against the in-memory driver.

mod end_to_end;
