//! Unordered typed collection, unique by value hash.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;

use gradual_foundation::{
    DynObject, ObjectRef, Result, Value, deduplicate_by_hash, next_object_id, value_hash,
};
use gradual_types::Type;

use crate::collectible::Collectible;

/// Collection of unique elements with a declared element type.
///
/// Membership is decided purely by value hash, so objects deduplicate by
/// identity and scalars by content. Iteration follows hash-table insertion
/// order, which is not a meaningful ordering.
pub struct Set {
    id: u64,
    ty: Type,
    entries: IndexMap<String, Value>,
}

impl Set {
    /// Creates an empty set of the given element type.
    #[must_use]
    pub fn new(ty: Type) -> Self {
        Self {
            id: next_object_id(),
            ty,
            entries: IndexMap::new(),
        }
    }

    /// Creates a set from the given values, validating and deduplicating.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if any value fails the element type.
    pub fn of(ty: Type, values: impl IntoIterator<Item = Value>) -> Result<Self> {
        let mut set = Self::new(ty);
        set.add_all(values)?;
        Ok(set)
    }

    /// Builds a set from values already known to satisfy `ty`.
    pub(crate) fn from_validated(ty: Type, values: Vec<Value>) -> Self {
        let mut entries = IndexMap::new();
        for value in values {
            entries.entry(value_hash(&value)).or_insert(value);
        }
        Self {
            id: next_object_id(),
            ty,
            entries,
        }
    }

    /// Declared element type.
    #[must_use]
    pub fn element_type(&self) -> &Type {
        &self.ty
    }

    /// Number of distinct elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an element; returns true if the set changed.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the value fails the element type.
    pub fn add(&mut self, value: Value) -> Result<bool> {
        self.ty.check(&value)?;
        let hash = value_hash(&value);
        if self.entries.contains_key(&hash) {
            return Ok(false);
        }
        self.entries.insert(hash, value);
        Ok(true)
    }

    /// Inserts all given elements; returns true if any insertion happened.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if any value fails the element type; the set
    /// is unchanged in that case.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = Value>) -> Result<bool> {
        let mut incoming = Vec::new();
        for value in values {
            self.ty.check(&value)?;
            incoming.push(value);
        }
        let mut changed = false;
        for value in incoming {
            let hash = value_hash(&value);
            if !self.entries.contains_key(&hash) {
                self.entries.insert(hash, value);
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Removes an element by hash; returns true if it was present.
    pub fn remove(&mut self, value: &Value) -> bool {
        self.entries.shift_remove(&value_hash(value)).is_some()
    }

    /// Returns true if an element with the same value hash is present.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.entries.contains_key(&value_hash(value))
    }

    /// Returns true if every given value is present (after deduplication).
    pub fn contains_all(&self, values: impl IntoIterator<Item = Value>) -> bool {
        deduplicate_by_hash(values)
            .keys()
            .all(|hash| self.entries.contains_key(hash))
    }

    /// Keeps only elements that also occur in `values`; returns true if the
    /// set changed.
    pub fn retain_all(&mut self, values: impl IntoIterator<Item = Value>) -> bool {
        let keep = deduplicate_by_hash(values);
        let before = self.entries.len();
        self.entries.retain(|hash, _| keep.contains_key(hash));
        self.entries.len() != before
    }

    /// Removes elements matching the predicate; returns true if the set
    /// changed.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&Value) -> bool) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, value| !predicate(value));
        self.entries.len() != before
    }

    /// Keeps only elements matching the predicate; returns true if the set
    /// changed.
    pub fn retain_if(&mut self, mut predicate: impl FnMut(&Value) -> bool) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, value| predicate(value));
        self.entries.len() != before
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates elements in table insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl Collectible for Set {
    fn element_type(&self) -> Type {
        self.ty.clone()
    }

    fn into_vec(self) -> Result<Vec<Value>> {
        Ok(self.entries.into_values().collect())
    }
}

// A clone is a distinct object: it gets a fresh identity token.
impl Clone for Set {
    fn clone(&self) -> Self {
        Self {
            id: next_object_id(),
            ty: self.ty.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl DynObject for Set {
    fn class_name(&self) -> &str {
        "Set"
    }

    fn object_id(&self) -> u64 {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_container(&self) -> bool {
        true
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Value::Object(ObjectRef::new(set))
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set<{}>", self.ty)?;
        f.debug_set().entries(self.iter()).finish()
    }
}
