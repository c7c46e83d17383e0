//! Integration tests for Layer 1: Types
//!
//! Tests for interned type descriptors, the composition algebra, and
//! checked callables.

mod callables;
