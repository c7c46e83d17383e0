//! Ordered, index-addressable typed collection.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use gradual_foundation::{
    DynObject, IndexMode, Result, Value, next_object_id, normalize_index, value_hash,
};
use gradual_types::Type;

use crate::collectible::Collectible;

/// One stored element with its precomputed identity hash.
#[derive(Clone)]
pub(crate) struct Entry {
    pub(crate) value: Value,
    pub(crate) hash: String,
}

impl Entry {
    pub(crate) fn new(value: Value) -> Self {
        let hash = value_hash(&value);
        Self { value, hash }
    }
}

/// Ordered collection with a declared element type.
///
/// Duplicates are allowed; iteration follows insertion order; indices may be
/// negative (counting from the end). Every mutator validates its inputs
/// before touching storage, so a failed call leaves the sequence unchanged.
pub struct Sequence {
    id: u64,
    ty: Type,
    entries: Vec<Entry>,
}

impl Sequence {
    /// Creates an empty sequence of the given element type.
    #[must_use]
    pub fn new(ty: Type) -> Self {
        Self {
            id: next_object_id(),
            ty,
            entries: Vec::new(),
        }
    }

    /// Creates a sequence from the given values, validating each.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if any value fails the element type.
    pub fn of(ty: Type, values: impl IntoIterator<Item = Value>) -> Result<Self> {
        let mut seq = Self::new(ty);
        seq.add_all(values)?;
        Ok(seq)
    }

    /// Builds a sequence from values already known to satisfy `ty`.
    pub(crate) fn from_validated(ty: Type, values: Vec<Value>) -> Self {
        Self {
            id: next_object_id(),
            ty,
            entries: values.into_iter().map(Entry::new).collect(),
        }
    }

    /// Declared element type.
    #[must_use]
    pub fn element_type(&self) -> &Type {
        &self.ty
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the sequence has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the element at the normalized index.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error if the index does not resolve to an
    /// existing position.
    pub fn get(&self, index: i64) -> Result<&Value> {
        let at = normalize_index(index, self.entries.len(), IndexMode::Read)?;
        Ok(&self.entries[at].value)
    }

    /// First element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|e| &e.value)
    }

    /// Last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.entries.last().map(|e| &e.value)
    }

    /// Appends one element.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the value fails the element type.
    pub fn add(&mut self, value: Value) -> Result<()> {
        self.ty.check(&value)?;
        self.entries.push(Entry::new(value));
        Ok(())
    }

    /// Appends all given elements.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if any value fails the element type; the
    /// sequence is unchanged in that case.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let incoming = self.validated_entries(values)?;
        self.entries.extend(incoming);
        Ok(())
    }

    /// Splices the given elements in at the normalized index.
    ///
    /// `index == len` (or an omitted-style `-0`) appends. All values are
    /// validated before the index is checked, and nothing is committed until
    /// both pass.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if any value fails the element type, or an
    /// out-of-bounds error if the index is outside `[0, len]`.
    pub fn insert_all(
        &mut self,
        index: i64,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<()> {
        let incoming = self.validated_entries(values)?;
        let at = normalize_index(index, self.entries.len(), IndexMode::Insert)?;
        self.entries.splice(at..at, incoming);
        Ok(())
    }

    /// Removes and returns the element at the normalized index.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error if the index does not resolve to an
    /// existing position.
    pub fn remove_at(&mut self, index: i64) -> Result<Value> {
        let at = normalize_index(index, self.entries.len(), IndexMode::Read)?;
        Ok(self.entries.remove(at).value)
    }

    /// Replaces the element at the normalized index, returning the previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the new value fails the element type, or
    /// an out-of-bounds error for an invalid index.
    pub fn replace_at(&mut self, index: i64, value: Value) -> Result<Value> {
        self.ty.check(&value)?;
        let at = normalize_index(index, self.entries.len(), IndexMode::Read)?;
        let previous = std::mem::replace(&mut self.entries[at], Entry::new(value));
        Ok(previous.value)
    }

    /// Returns true if an element with the same value hash is present.
    ///
    /// Objects are matched by identity, not content.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first element with the same value hash.
    #[must_use]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        let probe = value_hash(value);
        self.entries.iter().position(|e| e.hash == probe)
    }

    /// Extracts a sub-range as a fresh sequence.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error if `index` does not resolve to an
    /// existing position or the range extends past the end.
    pub fn slice(&self, index: i64, length: usize) -> Result<Self> {
        let at = normalize_index(index, self.entries.len(), IndexMode::Read)?;
        let Some(end) = at.checked_add(length).filter(|end| *end <= self.entries.len()) else {
            return Err(gradual_foundation::Error::index_out_of_bounds(
                index,
                self.entries.len(),
            ));
        };
        Ok(Self {
            id: next_object_id(),
            ty: self.ty.clone(),
            entries: self.entries[at..end].to_vec(),
        })
    }

    /// Sorts in place with the supplied three-way comparator (stable).
    pub fn sort(&mut self, mut comparator: impl FnMut(&Value, &Value) -> Ordering) {
        self.entries.sort_by(|a, b| comparator(&a.value, &b.value));
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    fn validated_entries(&self, values: impl IntoIterator<Item = Value>) -> Result<Vec<Entry>> {
        let mut incoming = Vec::new();
        for value in values {
            self.ty.check(&value)?;
            incoming.push(Entry::new(value));
        }
        Ok(incoming)
    }
}

impl Collectible for Sequence {
    fn element_type(&self) -> Type {
        self.ty.clone()
    }

    fn into_vec(self) -> Result<Vec<Value>> {
        Ok(self.entries.into_iter().map(|e| e.value).collect())
    }
}

// A clone is a distinct object: it gets a fresh identity token.
impl Clone for Sequence {
    fn clone(&self) -> Self {
        Self {
            id: next_object_id(),
            ty: self.ty.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl DynObject for Sequence {
    fn class_name(&self) -> &str {
        "Sequence"
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

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Object(gradual_foundation::ObjectRef::new(seq))
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence<{}>", self.ty)?;
        f.debug_list().entries(self.iter()).finish()
    }
}
