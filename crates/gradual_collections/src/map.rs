//! Typed key-value collection keyed by value hash.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;

use gradual_foundation::{DynObject, ObjectRef, Result, Value, next_object_id, value_hash};
use gradual_types::Type;

use crate::collectible::Collectible;
use crate::sequence::Sequence;
use crate::set::Set;

struct MapEntry {
    key: Value,
    value: Value,
}

/// Key-value collection with declared key and value types.
///
/// Keys are compared by value hash, so object keys are looked up by identity
/// and scalar keys by content. Entries keep insertion order.
pub struct Map {
    id: u64,
    key_ty: Type,
    value_ty: Type,
    entries: IndexMap<String, MapEntry>,
}

impl Map {
    /// Creates an empty map with the given key and value types.
    #[must_use]
    pub fn new(key_ty: Type, value_ty: Type) -> Self {
        Self {
            id: next_object_id(),
            key_ty,
            value_ty,
            entries: IndexMap::new(),
        }
    }

    /// Declared key type.
    #[must_use]
    pub fn key_type(&self) -> &Type {
        &self.key_ty
    }

    /// Declared value type.
    #[must_use]
    pub fn value_type(&self) -> &Type {
        &self.value_ty
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces an entry; returns the previous value for the key,
    /// if any.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the key or value fails its declared type;
    /// the map is unchanged in that case.
    pub fn put(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        self.key_ty.check(&key)?;
        self.value_ty.check(&value)?;
        let hash = value_hash(&key);
        Ok(self
            .entries
            .insert(hash, MapEntry { key, value })
            .map(|entry| entry.value))
    }

    /// Looks up the value stored under a key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .get(&value_hash(key))
            .map(|entry| &entry.value)
    }

    /// Removes an entry; returns its value if the key was present.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries
            .shift_remove(&value_hash(key))
            .map(|entry| entry.value)
    }

    /// Returns true if a key with the same value hash is present.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(&value_hash(key))
    }

    /// Returns true if any entry stores a value with the same value hash.
    #[must_use]
    pub fn contains_value(&self, value: &Value) -> bool {
        let probe = value_hash(value);
        self.entries
            .values()
            .any(|entry| value_hash(&entry.value) == probe)
    }

    /// Recomputes the entry for a key from its current value.
    ///
    /// The remapper sees the key and the current value (if any); returning
    /// `Some` stores the new value, returning `None` removes the entry.
    /// Returns the value now stored under the key.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the key or a produced value fails its
    /// declared type; the map is unchanged in that case.
    pub fn compute(
        &mut self,
        key: Value,
        remapper: impl FnOnce(&Value, Option<&Value>) -> Option<Value>,
    ) -> Result<Option<Value>> {
        self.key_ty.check(&key)?;
        let hash = value_hash(&key);
        let current = self.entries.get(&hash).map(|entry| &entry.value);
        match remapper(&key, current) {
            Some(value) => {
                self.value_ty.check(&value)?;
                self.entries.insert(
                    hash,
                    MapEntry {
                        key,
                        value: value.clone(),
                    },
                );
                Ok(Some(value))
            }
            None => {
                self.entries.shift_remove(&hash);
                Ok(None)
            }
        }
    }

    /// Stores a computed value only when the key is absent.
    ///
    /// Returns the value now stored under the key.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the key or a produced value fails its
    /// declared type.
    pub fn compute_if_absent(
        &mut self,
        key: Value,
        producer: impl FnOnce(&Value) -> Value,
    ) -> Result<Value> {
        self.key_ty.check(&key)?;
        let hash = value_hash(&key);
        if let Some(entry) = self.entries.get(&hash) {
            return Ok(entry.value.clone());
        }
        let value = self.value_ty.validate(producer(&key))?;
        self.entries.insert(
            hash,
            MapEntry {
                key,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Recomputes the entry for a key only when it is present.
    ///
    /// Returning `None` from the remapper removes the entry. Returns the
    /// value now stored under the key.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the key or a produced value fails its
    /// declared type.
    pub fn compute_if_present(
        &mut self,
        key: &Value,
        remapper: impl FnOnce(&Value, &Value) -> Option<Value>,
    ) -> Result<Option<Value>> {
        self.key_ty.check(key)?;
        let hash = value_hash(key);
        let Some(entry) = self.entries.get(&hash) else {
            return Ok(None);
        };
        match remapper(&entry.key, &entry.value) {
            Some(value) => {
                self.value_ty.check(&value)?;
                if let Some(entry) = self.entries.get_mut(&hash) {
                    entry.value = value.clone();
                }
                Ok(Some(value))
            }
            None => {
                self.entries.shift_remove(&hash);
                Ok(None)
            }
        }
    }

    /// Snapshots the keys as a [`Set`] of the key type.
    #[must_use]
    pub fn key_set(&self) -> Set {
        Set::from_validated(
            self.key_ty.clone(),
            self.entries.values().map(|entry| entry.key.clone()).collect(),
        )
    }

    /// Snapshots the values as a [`Sequence`] of the value type, in entry
    /// order.
    #[must_use]
    pub fn values_sequence(&self) -> Sequence {
        Sequence::from_validated(
            self.value_ty.clone(),
            self.entries
                .values()
                .map(|entry| entry.value.clone())
                .collect(),
        )
    }

    /// Snapshots the entries as a [`Set`] of `(key, value)` pairs.
    ///
    /// Each pair is a two-element array typed as a tuple of the key and
    /// value types.
    #[must_use]
    pub fn entry_set(&self) -> Set {
        let pair_ty = Type::tuple([self.key_ty.clone(), self.value_ty.clone()]);
        Set::from_validated(
            pair_ty,
            self.entries
                .values()
                .map(|entry| {
                    Value::Array(im::vector![entry.key.clone(), entry.value.clone()])
                })
                .collect(),
        )
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates `(key, value)` pairs in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|entry| (&entry.key, &entry.value))
    }
}

impl Collectible for Map {
    fn element_type(&self) -> Type {
        self.value_ty.clone()
    }

    fn into_vec(self) -> Result<Vec<Value>> {
        Ok(self
            .entries
            .into_values()
            .map(|entry| entry.value)
            .collect())
    }
}

// A clone is a distinct object: it gets a fresh identity token.
impl Clone for Map {
    fn clone(&self) -> Self {
        Self {
            id: next_object_id(),
            key_ty: self.key_ty.clone(),
            value_ty: self.value_ty.clone(),
            entries: self
                .entries
                .iter()
                .map(|(hash, entry)| {
                    (
                        hash.clone(),
                        MapEntry {
                            key: entry.key.clone(),
                            value: entry.value.clone(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl DynObject for Map {
    fn class_name(&self) -> &str {
        "Map"
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

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(ObjectRef::new(map))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map<{}, {}>", self.key_ty, self.value_ty)?;
        f.debug_map().entries(self.iter()).finish()
    }
}
