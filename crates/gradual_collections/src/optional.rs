//! Typed container of zero or one value.

use std::any::Any;
use std::fmt;

use gradual_foundation::{DynObject, Error, ObjectRef, Result, Value, next_object_id};
use gradual_types::Type;

use crate::collectible::Collectible;

/// Holds either one value of a declared type or nothing.
///
/// Unlike a bare `Option<Value>`, an empty optional still carries its
/// element type, so pipelines stay typed through absence.
pub struct Optional {
    id: u64,
    ty: Type,
    value: Option<Value>,
}

impl Optional {
    /// Creates an empty optional of the given element type.
    #[must_use]
    pub fn empty(ty: Type) -> Self {
        Self {
            id: next_object_id(),
            ty,
            value: None,
        }
    }

    /// Wraps a value, rejecting null.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the value is null or fails the element
    /// type.
    pub fn of(ty: Type, value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(Error::type_mismatch(ty.to_string(), "Null"));
        }
        let value = ty.validate(value)?;
        Ok(Self {
            id: next_object_id(),
            ty,
            value: Some(value),
        })
    }

    /// Wraps a value, treating null as empty.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if a non-null value fails the element type.
    pub fn of_nullable(ty: Type, value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::empty(ty));
        }
        Self::of(ty, value)
    }

    /// Declared element type.
    #[must_use]
    pub fn element_type(&self) -> &Type {
        &self.ty
    }

    /// Returns true if a value is present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns true if no value is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrows the contained value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] when empty.
    pub fn get_value(&self) -> Result<&Value> {
        self.value.as_ref().ok_or(Error::Underflow)
    }

    /// Borrows the contained value without failing.
    #[must_use]
    pub fn peek(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Transforms the contained value into a new optional of `out_ty`.
    ///
    /// An empty optional maps to an empty optional of `out_ty`. A mapper
    /// returning null produces an empty optional.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the mapped value fails `out_ty`.
    pub fn map(self, out_ty: Type, mapper: impl FnOnce(Value) -> Value) -> Result<Self> {
        match self.value {
            Some(value) => Self::of_nullable(out_ty, mapper(value)),
            None => Ok(Self::empty(out_ty)),
        }
    }

    /// Transforms the contained value into another optional.
    ///
    /// # Errors
    ///
    /// Propagates the mapper's error.
    pub fn flat_map(self, mapper: impl FnOnce(Value) -> Result<Self>) -> Result<Self> {
        match self.value {
            Some(value) => mapper(value),
            None => Ok(self),
        }
    }

    /// Empties the optional unless the value satisfies the predicate.
    #[must_use]
    pub fn filter(self, predicate: impl FnOnce(&Value) -> bool) -> Self {
        match &self.value {
            Some(value) if predicate(value) => self,
            _ => Self::empty(self.ty),
        }
    }

    /// Returns the contained value or the given fallback.
    #[must_use]
    pub fn or_else(self, fallback: Value) -> Value {
        self.value.unwrap_or(fallback)
    }

    /// Returns the contained value or computes a fallback.
    #[must_use]
    pub fn or_else_get(self, fallback: impl FnOnce() -> Value) -> Value {
        self.value.unwrap_or_else(fallback)
    }

    /// Returns the contained value or the given error.
    ///
    /// # Errors
    ///
    /// Returns `error` when empty.
    pub fn or_else_throw(self, error: impl FnOnce() -> Error) -> Result<Value> {
        self.value.ok_or_else(error)
    }
}

impl Collectible for Optional {
    fn element_type(&self) -> Type {
        self.ty.clone()
    }

    fn into_vec(self) -> Result<Vec<Value>> {
        Ok(self.value.into_iter().collect())
    }
}

// A clone is a distinct object: it gets a fresh identity token.
impl Clone for Optional {
    fn clone(&self) -> Self {
        Self {
            id: next_object_id(),
            ty: self.ty.clone(),
            value: self.value.clone(),
        }
    }
}

impl DynObject for Optional {
    fn class_name(&self) -> &str {
        "Optional"
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

impl From<Optional> for Value {
    fn from(optional: Optional) -> Self {
        Value::Object(ObjectRef::new(optional))
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "Optional<{}>({value:?})", self.ty),
            None => write!(f, "Optional<{}>(empty)", self.ty),
        }
    }
}
