//! Interned runtime type descriptors and composition operators for gradual.
//!
//! This crate provides:
//! - [`Type`] - Immutable, interned type descriptor handles
//! - Composition operators (`tuple`, `array_of`, `union`, `intersection`,
//!   `nullable`, `parametrized`)
//! - [`CheckedCallable`] - Argument and return validation around callables
//!
//! Two structurally identical compositions always return the same descriptor
//! instance, so type equality is an identity comparison.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod callable;
pub mod descriptor;
mod registry;

pub use callable::CheckedCallable;
pub use descriptor::{ContainerTest, Type};
