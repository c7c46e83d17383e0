//! Parametrized type descriptors for the container classes.
//!
//! These are the glue between the type algebra and the collections: each
//! function interns a descriptor whose predicate downcasts a value's object
//! to the matching container and compares declared element types by
//! descriptor identity. `sequence_of(int)` therefore matches exactly the
//! sequences declared over `int`, not sequences that merely happen to hold
//! integers.

use std::sync::Arc;

use gradual_foundation::Value;
use gradual_types::Type;

use crate::map::Map;
use crate::optional::Optional;
use crate::sequence::Sequence;
use crate::set::Set;
use crate::stream::Stream;

/// Descriptor matching sequences declared over `element`.
#[must_use]
pub fn sequence_of(element: Type) -> Type {
    let expected = element.clone();
    Type::parametrized(
        "sequence",
        [element],
        Arc::new(move |value: &Value| {
            value
                .as_object()
                .and_then(|obj| obj.downcast_ref::<Sequence>())
                .is_some_and(|seq| *seq.element_type() == expected)
        }),
    )
}

/// Descriptor matching sets declared over `element`.
#[must_use]
pub fn set_of(element: Type) -> Type {
    let expected = element.clone();
    Type::parametrized(
        "set",
        [element],
        Arc::new(move |value: &Value| {
            value
                .as_object()
                .and_then(|obj| obj.downcast_ref::<Set>())
                .is_some_and(|set| *set.element_type() == expected)
        }),
    )
}

/// Descriptor matching maps declared over `key` and `value` types.
#[must_use]
pub fn map_of(key: Type, value: Type) -> Type {
    let expected_key = key.clone();
    let expected_value = value.clone();
    Type::parametrized(
        "map",
        [key, value],
        Arc::new(move |candidate: &Value| {
            candidate
                .as_object()
                .and_then(|obj| obj.downcast_ref::<Map>())
                .is_some_and(|map| {
                    *map.key_type() == expected_key && *map.value_type() == expected_value
                })
        }),
    )
}

/// Descriptor matching optionals declared over `element`.
#[must_use]
pub fn optional_of(element: Type) -> Type {
    let expected = element.clone();
    Type::parametrized(
        "optional",
        [element],
        Arc::new(move |value: &Value| {
            value
                .as_object()
                .and_then(|obj| obj.downcast_ref::<Optional>())
                .is_some_and(|opt| *opt.element_type() == expected)
        }),
    )
}

/// Descriptor matching streams declared over `element`.
#[must_use]
pub fn stream_of(element: Type) -> Type {
    let expected = element.clone();
    Type::parametrized(
        "stream",
        [element],
        Arc::new(move |value: &Value| {
            value
                .as_object()
                .and_then(|obj| obj.downcast_ref::<Stream>())
                .is_some_and(|stream| *stream.element_type() == expected)
        }),
    )
}
