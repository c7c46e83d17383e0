//! End-to-end integration tests
//!
//! Exercises the full stack: descriptors from the type algebra flowing
//! through collections, streams, callables, and conversions together.
