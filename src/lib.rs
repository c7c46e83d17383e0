//! Gradual - Runtime-checked generic collections
//!
//! This crate re-exports all layers of the gradual system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: gradual_collections — Sequence, Set, Map, Optional, Stream
//! Layer 1: gradual_types       — Type descriptors, interning, checked callables
//! Layer 0: gradual_foundation  — Core types (Value, value hashing, Error)
//! ```

pub use gradual_collections as collections;
pub use gradual_foundation as foundation;
pub use gradual_types as types;
