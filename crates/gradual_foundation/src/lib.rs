//! Dynamic value model, value identity, and error types for gradual.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value type all typed containers hold
//! - [`DynObject`] / [`ObjectRef`] - The object extension point through which
//!   containers themselves become values
//! - [`value_hash`] / [`normalize_index`] - Canonical value identity and
//!   index normalization
//! - [`Error`] - Error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod identity;
pub mod value;

pub use error::{Error, Result};
pub use identity::{IndexMode, deduplicate_by_hash, next_object_id, normalize_index, value_hash};
pub use value::{DynObject, NativeFn, ObjectRef, PlainObject, ResourceId, Value};
