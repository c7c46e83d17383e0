//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, object identity, value hashing, and Error.

mod errors;
