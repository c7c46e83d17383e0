//! Typed generic collections, optionals, and lazy streams for gradual.
//!
//! This crate provides:
//! - [`Sequence`] - Ordered, index-addressable, duplicates allowed
//! - [`Set`] - Unordered, unique by value hash
//! - [`Map`] - Keyed by key hash, typed keys and values
//! - [`Optional`] - Zero or one value
//! - [`Stream`] - Lazy, single-pass, typed pipeline
//! - [`Collectible`] - Mutual conversion between all of the above
//! - Parametrized container types (`sequence_of`, `map_of`, ...)
//!
//! Every mutating operation validates its inputs against the declared
//! element type before committing, so a failed operation never leaves a
//! collection half-modified.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collectible;
pub mod container_types;
pub mod map;
pub mod optional;
pub mod sequence;
pub mod set;
pub mod stream;

pub use collectible::Collectible;
pub use container_types::{map_of, optional_of, sequence_of, set_of, stream_of};
pub use map::Map;
pub use optional::Optional;
pub use sequence::Sequence;
pub use set::Set;
pub use stream::{Stream, StreamIter};
