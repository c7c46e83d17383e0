//! Dynamic value type held by every typed container.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::identity::next_object_id;

/// Dynamic value type held by every typed container.
///
/// Values are immutable and cheaply cloneable. Arrays use persistent data
/// structures with structural sharing; objects are reference-counted handles.
#[derive(Clone)]
pub enum Value {
    /// The null value (represents absence).
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Ordered sequence of values.
    Array(im::Vector<Value>),
    /// Opaque external resource handle.
    Resource(ResourceId),
    /// Named native function.
    Callable(NativeFn),
    /// Object reference (identity semantics).
    Object(ObjectRef),
}

/// Opaque identifier for an external resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

/// Native function callable with a uniform argument slice.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name for diagnostics.
    pub name: &'static str,
    /// Function pointer.
    pub func: fn(&[Value]) -> Result<Value>,
}

/// Trait implemented by every object that can live inside a [`Value`].
///
/// This is the extension point through which the generic collections become
/// values: a container implements `DynObject`, reports a class name and a
/// process-unique identity token, and exposes itself for downcasting so
/// parametrized type descriptors can inspect its declared element types.
pub trait DynObject: fmt::Debug + 'static {
    /// Class name used by instance-of checks.
    fn class_name(&self) -> &str;

    /// Process-unique identity token (see [`next_object_id`]).
    fn object_id(&self) -> u64;

    /// Downcasting support.
    fn as_any(&self) -> &dyn Any;

    /// Whether this object is an iterable container.
    fn is_container(&self) -> bool {
        false
    }
}

/// Reference-counted read-only handle to a [`DynObject`].
///
/// Equality is by identity token, not by content.
#[derive(Clone)]
pub struct ObjectRef(Rc<dyn DynObject>);

impl ObjectRef {
    /// Wraps an object into a handle.
    pub fn new<T: DynObject>(object: T) -> Self {
        Self(Rc::new(object))
    }

    /// Class name of the referenced object.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.0.class_name()
    }

    /// Identity token of the referenced object.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.object_id()
    }

    /// Whether the referenced object is an iterable container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.0.is_container()
    }

    /// Attempts to downcast the referenced object to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}#{}>", self.class_name(), self.id())
    }
}

/// Minimal object with a class name and nothing else.
///
/// Useful as an instance for `of_class` type checks.
#[derive(Debug)]
pub struct PlainObject {
    id: u64,
    class: Arc<str>,
}

impl PlainObject {
    /// Creates a plain object of the given class.
    #[must_use]
    pub fn new(class: &str) -> Self {
        Self {
            id: next_object_id(),
            class: class.into(),
        }
    }
}

impl DynObject for PlainObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn object_id(&self) -> u64 {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value {
    /// Creates an object value of the given class.
    #[must_use]
    pub fn object(class: &str) -> Self {
        Self::Object(ObjectRef::new(PlainObject::new(class)))
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of this value's runtime kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Resource(_) => "resource",
            Self::Callable(_) => "callable",
            Self::Object(_) => "object",
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an array reference.
    #[must_use]
    pub const fn as_array(&self) -> Option<&im::Vector<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract an object handle.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Attempts to extract a native function.
    #[must_use]
    pub const fn as_callable(&self) -> Option<&NativeFn> {
        match self {
            Self::Callable(func) => Some(func),
            _ => None,
        }
    }

    /// Attempts to extract a resource identifier.
    #[must_use]
    pub const fn as_resource(&self) -> Option<ResourceId> {
        match self {
            Self::Resource(id) => Some(*id),
            _ => None,
        }
    }

    /// Rank used to order values of different kinds.
    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            // Int and Float share a rank so numerics compare cross-kind.
            Self::Int(_) | Self::Float(_) => 2,
            Self::String(_) => 3,
            Self::Array(_) => 4,
            Self::Resource(_) => 5,
            Self::Callable(_) => 6,
            Self::Object(_) => 7,
        }
    }

    /// Total three-way comparison, usable as the default comparator.
    ///
    /// Values of different kinds order by kind rank, except that integers
    /// and floats compare numerically against each other. Objects order by
    /// identity token, callables by function address.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            // Cross-kind numeric comparison intentionally loses precision for large i64
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Resource(a), Self::Resource(b)) => a.cmp(b),
            (Self::Callable(a), Self::Callable(b)) => (a.func as usize).cmp(&(b.func as usize)),
            (Self::Object(a), Self::Object(b)) => a.id().cmp(&b.id()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Resource(a), Self::Resource(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Resource(id) => write!(f, "<resource #{}>", id.0),
            Self::Callable(func) => write!(f, "{func:?}"),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Resource(id) => write!(f, "<resource #{}>", id.0),
            Self::Callable(func) => write!(f, "{func}"),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

// NativeFn implementations

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.func, other.func)
    }
}

impl Eq for NativeFn {}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl fmt::Display for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        Self::Resource(id)
    }
}

impl From<NativeFn> for Value {
    fn from(func: NativeFn) -> Self {
        Self::Callable(func)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Self::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<im::Vector<Value>> for Value {
    fn from(items: im::Vector<Value>) -> Self {
        Self::Array(items)
    }
}
