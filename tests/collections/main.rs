//! Integration tests for Layer 2: Collections
//!
//! Tests for Sequence, Set, Map, Optional, cross-container conversion, and
//! parametrized container descriptors.

mod maps;
mod sequences;
mod sets;
