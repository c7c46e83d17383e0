//! Canonical value identity: hashing, index normalization, deduplication.
//!
//! The value hash is a string derived from a value such that two values
//! considered equal produce the same string. It substitutes for structural
//! equality wherever a container needs a membership or lookup key. The hash
//! is deterministic within a single process run and is not cryptographic:
//! collisions are tolerated as long as they are stable.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::value::Value;

/// Allocator for process-unique object identity tokens.
static OBJECT_IDS: AtomicU64 = AtomicU64::new(1);

/// Returns the next process-unique object identity token.
///
/// Every [`crate::DynObject`] implementation must allocate its token here so
/// that object hashes never collide within a run.
#[must_use]
pub fn next_object_id() -> u64 {
    OBJECT_IDS.fetch_add(1, Ordering::Relaxed)
}

/// Computes the canonical hash string for a value.
///
/// Rules, in priority order:
/// - null hashes to a fixed tag
/// - scalars hash their runtime kind plus payload (floats by bit pattern,
///   strings length-prefixed so no two strings share a hash)
/// - arrays hash their recursively-hashed, order-preserving contents
/// - resources, callables, and objects hash a stable identity token
///   (reference identity, not structural)
#[must_use]
pub fn value_hash(value: &Value) -> String {
    let mut out = String::new();
    write_hash(value, &mut out);
    out
}

fn write_hash(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push('n'),
        Value::Bool(b) => {
            out.push_str(if *b { "b:t" } else { "b:f" });
        }
        Value::Int(n) => {
            let _ = write!(out, "i:{n}");
        }
        Value::Float(n) => {
            let _ = write!(out, "f:{:x}", n.to_bits());
        }
        Value::String(s) => {
            let _ = write!(out, "s:{}:{s}", s.len());
        }
        Value::Array(items) => {
            out.push_str("a:[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_hash(item, out);
            }
            out.push(']');
        }
        Value::Resource(id) => {
            let _ = write!(out, "r:{}", id.0);
        }
        Value::Callable(func) => {
            let _ = write!(out, "c:{:x}", func.func as usize);
        }
        Value::Object(obj) => {
            let _ = write!(out, "o:{}", obj.id());
        }
    }
}

/// How an index is going to be used after normalization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexMode {
    /// Reading or replacing an existing position: valid range `[0, length)`.
    Read,
    /// Inserting at a position: valid range `[0, length]`, where
    /// `index == length` means append.
    Insert,
}

/// Normalizes a possibly-negative index against a collection length.
///
/// Negative indices count from the end (`-1` is the last element).
///
/// # Errors
///
/// Returns [`Error::IndexOutOfBounds`] if the resolved index is outside the
/// valid range for the given mode.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn normalize_index(index: i64, length: usize, mode: IndexMode) -> Result<usize> {
    let len = length as i64;
    let resolved = if index < 0 { len + index } else { index };
    let upper = match mode {
        IndexMode::Read => len,
        IndexMode::Insert => len + 1,
    };
    if resolved < 0 || resolved >= upper {
        return Err(Error::index_out_of_bounds(index, length));
    }
    Ok(resolved as usize)
}

/// Deduplicates values by hash, keeping the first-seen value per hash.
///
/// Used by set-style bulk membership operations (`contains_all`,
/// `retain_all`).
pub fn deduplicate_by_hash(values: impl IntoIterator<Item = Value>) -> HashMap<String, Value> {
    let mut seen = HashMap::new();
    for value in values {
        seen.entry(value_hash(&value)).or_insert(value);
    }
    seen
}
