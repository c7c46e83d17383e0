//! Type descriptors: predicate-backed, immutable, interned.
//!
//! A [`Type`] is a cheap-clone handle to an interned node identified by a
//! base name and an ordered list of subtype descriptors. Because descriptors
//! are interned, equality is an identity comparison: two compositions with
//! the same canonical structure are the *same* descriptor.

use std::fmt;
use std::sync::Arc;

use gradual_foundation::{Error, Result, Value};

use crate::registry::intern;

/// Predicate used by parametrized container types.
pub type ContainerTest = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Validation behavior attached to a descriptor node.
pub(crate) enum TypeTest {
    /// Matches only null.
    Null,
    /// Matches any value.
    Mixed,
    /// Matches strings.
    Str,
    /// Matches integers.
    Int,
    /// Matches floats.
    Float,
    /// Matches booleans.
    Bool,
    /// Matches arrays of any content.
    Array,
    /// Matches resource handles.
    Resource,
    /// Matches arrays and container objects.
    Iterable,
    /// Matches callables.
    Callable,
    /// Matches any object.
    Object,
    /// Matches objects whose class name equals the base name.
    OfClass,
    /// Positional match over an array of exactly `subtypes.len()` elements.
    Tuple,
    /// Every array element matches the single subtype.
    ArrayOf,
    /// Any subtype matches.
    Union,
    /// All subtypes match.
    Intersection,
    /// Caller-supplied predicate (parametrized container types).
    Container(ContainerTest),
}

struct TypeNode {
    /// Interning order; doubles as the canonical sort key for unions.
    id: u32,
    base: Arc<str>,
    subtypes: Vec<Type>,
    test: TypeTest,
}

/// Immutable, interned type descriptor handle.
///
/// Cloning is O(1). Equality and hashing use the interned identity, so a
/// `Type` can serve as a cheap comparison or map key.
#[derive(Clone)]
pub struct Type(Arc<TypeNode>);

impl Type {
    pub(crate) fn from_parts(id: u32, base: Arc<str>, subtypes: Vec<Type>, test: TypeTest) -> Self {
        Self(Arc::new(TypeNode {
            id,
            base,
            subtypes,
            test,
        }))
    }

    /// Interning order of this descriptor (process-wide, stable for the run).
    #[must_use]
    pub fn id(&self) -> u32 {
        self.0.id
    }

    /// Base name of this descriptor (`int`, `tuple`, `union`, a class name).
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.0.base
    }

    /// Ordered subtype descriptors.
    #[must_use]
    pub fn sub_types(&self) -> &[Type] {
        &self.0.subtypes
    }

    /// Subtype descriptor at the given position.
    #[must_use]
    pub fn sub_type_at(&self, index: usize) -> Option<&Type> {
        self.0.subtypes.get(index)
    }

    // =========================================================================
    // Primitives (process-wide singletons)
    // =========================================================================

    /// The null type.
    #[must_use]
    pub fn null() -> Self {
        intern("null", vec![], || TypeTest::Null)
    }

    /// The mixed type (matches any value).
    #[must_use]
    pub fn mixed() -> Self {
        intern("mixed", vec![], || TypeTest::Mixed)
    }

    /// The string type.
    #[must_use]
    pub fn string() -> Self {
        intern("string", vec![], || TypeTest::Str)
    }

    /// The int type.
    #[must_use]
    pub fn int() -> Self {
        intern("int", vec![], || TypeTest::Int)
    }

    /// The float type.
    #[must_use]
    pub fn float() -> Self {
        intern("float", vec![], || TypeTest::Float)
    }

    /// The numeric type, defined as `union(float, int)`.
    #[must_use]
    pub fn numeric() -> Self {
        Self::union([Self::float(), Self::int()])
    }

    /// The bool type.
    #[must_use]
    pub fn bool() -> Self {
        intern("bool", vec![], || TypeTest::Bool)
    }

    /// The array type (any contents).
    #[must_use]
    pub fn array() -> Self {
        intern("array", vec![], || TypeTest::Array)
    }

    /// The resource type.
    #[must_use]
    pub fn resource() -> Self {
        intern("resource", vec![], || TypeTest::Resource)
    }

    /// The iterable type: arrays and container objects.
    #[must_use]
    pub fn iterable() -> Self {
        intern("iterable", vec![], || TypeTest::Iterable)
    }

    /// The callable type.
    #[must_use]
    pub fn callable() -> Self {
        intern("callable", vec![], || TypeTest::Callable)
    }

    /// The object type (any class).
    #[must_use]
    pub fn object() -> Self {
        intern("object", vec![], || TypeTest::Object)
    }

    /// Instance-of type for the given class name.
    #[must_use]
    pub fn of_class(name: &str) -> Self {
        intern(name, vec![], || TypeTest::OfClass)
    }

    // =========================================================================
    // Compositions
    // =========================================================================

    /// Tuple type: an array of exactly n elements, positionally matched.
    ///
    /// Tuples are positional: `tuple(A, B)` and `tuple(B, A)` are distinct
    /// descriptors.
    #[must_use]
    pub fn tuple(subtypes: impl IntoIterator<Item = Type>) -> Self {
        intern("tuple", subtypes.into_iter().collect(), || TypeTest::Tuple)
    }

    /// Array-of type: every element of an array matches `element`.
    #[must_use]
    pub fn array_of(element: Type) -> Self {
        intern("array_of", vec![element], || TypeTest::ArrayOf)
    }

    /// Union type: valid iff any operand matches.
    ///
    /// Nested unions are flattened, operands deduplicated by identity, and
    /// the result canonically ordered, so `union(A, B)` and `union(B, A)`
    /// are the same descriptor. A `mixed` operand collapses the whole union
    /// to `mixed`; zero operands collapse to `null`, one to that operand.
    #[must_use]
    pub fn union(operands: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for op in operands {
            match op.0.test {
                TypeTest::Mixed => return Self::mixed(),
                TypeTest::Union => {
                    for sub in op.sub_types() {
                        push_unique(&mut flat, sub.clone());
                    }
                }
                _ => push_unique(&mut flat, op),
            }
        }
        match flat.len() {
            0 => Self::null(),
            1 => flat.remove(0),
            _ => {
                flat.sort_by_key(Type::id);
                intern("union", flat, || TypeTest::Union)
            }
        }
    }

    /// Intersection type: valid iff all operands match.
    ///
    /// The dual of [`Type::union`]: nested intersections are flattened,
    /// `mixed` operands are dropped (identity element), a `null` operand
    /// collapses the whole intersection to `null`, zero operands collapse
    /// to `mixed`, one to that operand, and the rest canonically ordered.
    #[must_use]
    pub fn intersection(operands: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for op in operands {
            match op.0.test {
                TypeTest::Null => return Self::null(),
                TypeTest::Mixed => {}
                TypeTest::Intersection => {
                    for sub in op.sub_types() {
                        push_unique(&mut flat, sub.clone());
                    }
                }
                _ => push_unique(&mut flat, op),
            }
        }
        match flat.len() {
            0 => Self::mixed(),
            1 => flat.remove(0),
            _ => {
                flat.sort_by_key(Type::id);
                intern("intersection", flat, || TypeTest::Intersection)
            }
        }
    }

    /// Nullable type: `union(t, null)`.
    #[must_use]
    pub fn nullable(inner: Type) -> Self {
        Self::union([inner, Self::null()])
    }

    /// Parametrized type backed by a caller-supplied predicate.
    ///
    /// This is the extension point for container types (`sequence(T)`,
    /// `map(K, V)`, ...): the predicate typically downcasts the value's
    /// object and compares declared element types by descriptor identity.
    /// The predicate only runs when the descriptor is first interned for
    /// this `(base, subtypes)` key.
    #[must_use]
    pub fn parametrized(
        base: &str,
        subtypes: impl IntoIterator<Item = Type>,
        test: ContainerTest,
    ) -> Self {
        intern(base, subtypes.into_iter().collect(), || {
            TypeTest::Container(test)
        })
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Returns true if the value satisfies this descriptor's predicate.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        match &self.0.test {
            TypeTest::Null => value.is_null(),
            TypeTest::Mixed => true,
            TypeTest::Str => matches!(value, Value::String(_)),
            TypeTest::Int => matches!(value, Value::Int(_)),
            TypeTest::Float => matches!(value, Value::Float(_)),
            TypeTest::Bool => matches!(value, Value::Bool(_)),
            TypeTest::Array => matches!(value, Value::Array(_)),
            TypeTest::Resource => matches!(value, Value::Resource(_)),
            TypeTest::Callable => matches!(value, Value::Callable(_)),
            TypeTest::Object => matches!(value, Value::Object(_)),
            TypeTest::Iterable => match value {
                Value::Array(_) => true,
                Value::Object(obj) => obj.is_container(),
                _ => false,
            },
            TypeTest::OfClass => value
                .as_object()
                .is_some_and(|obj| obj.class_name() == self.base_name()),
            TypeTest::Tuple => value.as_array().is_some_and(|items| {
                items.len() == self.0.subtypes.len()
                    && items
                        .iter()
                        .zip(self.0.subtypes.iter())
                        .all(|(item, sub)| sub.is_valid(item))
            }),
            TypeTest::ArrayOf => value.as_array().is_some_and(|items| {
                self.0
                    .subtypes
                    .first()
                    .is_some_and(|sub| items.iter().all(|item| sub.is_valid(item)))
            }),
            TypeTest::Union => self.0.subtypes.iter().any(|sub| sub.is_valid(value)),
            TypeTest::Intersection => self.0.subtypes.iter().all(|sub| sub.is_valid(value)),
            TypeTest::Container(test) => test(value),
        }
    }

    /// Checks a value against this descriptor without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the predicate fails.
    pub fn check(&self, value: &Value) -> Result<()> {
        if self.is_valid(value) {
            Ok(())
        } else {
            Err(Error::type_mismatch(self.to_string(), format!("{value:?}")))
        }
    }

    /// Validates a value, returning it unchanged on success.
    ///
    /// Never substitutes or coerces: the returned value is exactly the
    /// input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the predicate fails.
    pub fn validate(&self, value: Value) -> Result<Value> {
        self.check(&value)?;
        Ok(value)
    }
}

fn push_unique(operands: &mut Vec<Type>, candidate: Type) {
    if !operands.iter().any(|existing| *existing == candidate) {
        operands.push(candidate);
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Type {}

impl std::hash::Hash for Type {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_name())?;
        if !self.0.subtypes.is_empty() {
            write!(f, "<")?;
            for (i, sub) in self.0.subtypes.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{sub}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("base", &self.base_name())
            .field("subtypes", &self.0.subtypes)
            .finish()
    }
}
