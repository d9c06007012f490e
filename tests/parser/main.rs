//! Integration tests for Layer 1: Parser
//!
//! Tests for the scanner, the depth-aware splitter, and the declaration parser.

mod declarations;
