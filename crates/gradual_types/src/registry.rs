//! Process-wide interning registry for type descriptors.
//!
//! The registry guarantees the single-instance invariant: one canonical
//! descriptor per `(base name, ordered subtype identities)` key, for the
//! lifetime of the process. Construction on a cache miss happens under the
//! same lock as the lookup, so concurrent interning cannot create duplicates.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::descriptor::{Type, TypeTest};

/// Canonical composite key for one descriptor.
#[derive(Clone, PartialEq, Eq, Hash)]
struct TypeKey {
    base: Arc<str>,
    subtypes: Vec<u32>,
}

#[derive(Default)]
struct Registry {
    by_key: HashMap<TypeKey, Type>,
    next_id: u32,
}

impl Registry {
    /// Registers a descriptor that must not exist yet.
    ///
    /// Direct construction of an already-interned descriptor is a
    /// programming error; callers must go through [`intern`], which checks
    /// the cache first.
    fn register(&mut self, key: TypeKey, subtypes: Vec<Type>, test: TypeTest) -> Type {
        assert!(
            !self.by_key.contains_key(&key),
            "type descriptor already interned: {}",
            key.base
        );
        let id = self.next_id;
        self.next_id += 1;
        let ty = Type::from_parts(id, key.base.clone(), subtypes, test);
        self.by_key.insert(key, ty.clone());
        ty
    }
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::default()));

/// Returns the interned descriptor for the given key, constructing it on a
/// miss.
///
/// `make_test` runs only when the descriptor does not exist yet.
pub(crate) fn intern(
    base: &str,
    subtypes: Vec<Type>,
    make_test: impl FnOnce() -> TypeTest,
) -> Type {
    let key = TypeKey {
        base: base.into(),
        subtypes: subtypes.iter().map(Type::id).collect(),
    };
    let mut registry = REGISTRY.lock().expect("type registry poisoned");
    if let Some(existing) = registry.by_key.get(&key) {
        return existing.clone();
    }
    let test = make_test();
    registry.register(key, subtypes, test)
}
