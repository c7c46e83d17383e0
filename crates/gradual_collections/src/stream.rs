//! Lazy single-pass typed value pipeline.

use std::any::Any;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use gradual_foundation::{DynObject, ObjectRef, Result, Value, next_object_id, value_hash};
use gradual_types::Type;

use crate::collectible::Collectible;
use crate::optional::Optional;

/// The element iterator behind a [`Stream`].
///
/// Items are `Result` so that lazy validation failures surface at
/// consumption time, at the stage that produced the bad value.
pub type StreamIter = Box<dyn Iterator<Item = Result<Value>>>;

/// Lazy pipeline of typed values.
///
/// Intermediate operations consume `self` and return a new stream, so the
/// borrow checker enforces single use. Nothing runs until a terminal
/// operation pulls; validation happens only at the stages that introduce or
/// transform values (sources, `map`, `flat_map`, `append`, `with_operator`).
pub struct Stream {
    id: u64,
    ty: Type,
    items: StreamIter,
}

impl Stream {
    fn from_iter(ty: Type, items: StreamIter) -> Self {
        Self {
            id: next_object_id(),
            ty,
            items,
        }
    }

    /// Creates a stream over the given values.
    ///
    /// Validation is lazy: a value that fails the element type surfaces as
    /// an error when the pipeline reaches it.
    #[must_use]
    pub fn of(ty: Type, values: impl IntoIterator<Item = Value>) -> Self {
        let values: Vec<Value> = values.into_iter().collect();
        Self::from_iterator(ty, values.into_iter())
    }

    /// Creates a stream pulling from an arbitrary iterator.
    #[must_use]
    pub fn from_iterator(ty: Type, values: impl Iterator<Item = Value> + 'static) -> Self {
        let check = ty.clone();
        let items = values.map(move |value| check.validate(value));
        Self::from_iter(ty, Box::new(items))
    }

    /// Creates a stream with no elements.
    #[must_use]
    pub fn empty(ty: Type) -> Self {
        Self::from_iter(ty, Box::new(std::iter::empty()))
    }

    /// Creates an unbounded stream from a seed and a step function.
    ///
    /// The seed is the first element; each further pull applies `step` to
    /// the previous element, ending when it returns `None`. The step runs
    /// only when the pipeline actually asks for another element.
    #[must_use]
    pub fn iterate(
        ty: Type,
        seed: Value,
        mut step: impl FnMut(&Value) -> Option<Value> + 'static,
    ) -> Self {
        let check = ty.clone();
        let mut seed = Some(seed);
        let mut last: Option<Value> = None;
        // Hand-rolled so the step runs at the start of the pull that needs
        // it, never while yielding the previous element.
        let items = std::iter::from_fn(move || {
            let next = match seed.take() {
                Some(first) => first,
                None => match step(last.as_ref()?) {
                    Some(value) => value,
                    None => {
                        last = None;
                        return None;
                    }
                },
            };
            last = Some(next.clone());
            Some(check.validate(next))
        });
        Self::from_iter(ty, Box::new(items))
    }

    /// Builds a stream over values already known to satisfy `ty`.
    pub(crate) fn from_validated(ty: Type, values: Vec<Value>) -> Self {
        Self::from_iter(ty, Box::new(values.into_iter().map(Ok)))
    }

    /// Declared element type.
    #[must_use]
    pub fn element_type(&self) -> &Type {
        &self.ty
    }

    /// Keeps only elements satisfying the predicate.
    #[must_use]
    pub fn filter(self, mut predicate: impl FnMut(&Value) -> bool + 'static) -> Self {
        let items = self.items.filter(move |item| match item {
            Ok(value) => predicate(value),
            Err(_) => true,
        });
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Transforms each element, producing a stream of `out_ty`.
    #[must_use]
    pub fn map(self, out_ty: Type, mut mapper: impl FnMut(Value) -> Value + 'static) -> Self {
        let check = out_ty.clone();
        let items = self
            .items
            .map(move |item| item.and_then(|value| check.validate(mapper(value))));
        Self::from_iter(out_ty, Box::new(items))
    }

    /// Expands each element into zero or more elements of `out_ty`.
    #[must_use]
    pub fn flat_map(
        self,
        out_ty: Type,
        mut mapper: impl FnMut(Value) -> Vec<Value> + 'static,
    ) -> Self {
        let check = out_ty.clone();
        let items = self.items.flat_map(move |item| -> Vec<Result<Value>> {
            match item {
                Ok(value) => mapper(value)
                    .into_iter()
                    .map(|out| check.validate(out))
                    .collect(),
                Err(error) => vec![Err(error)],
            }
        });
        Self::from_iter(out_ty, Box::new(items))
    }

    /// Drops elements whose value hash was already seen.
    #[must_use]
    pub fn distinct(self) -> Self {
        let mut seen = HashSet::new();
        let items = self.items.filter(move |item| match item {
            Ok(value) => seen.insert(value_hash(value)),
            Err(_) => true,
        });
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Observes each element as it flows through, without changing it.
    #[must_use]
    pub fn peek(self, mut inspector: impl FnMut(&Value) + 'static) -> Self {
        let items = self.items.inspect(move |item| {
            if let Ok(value) = item {
                inspector(value);
            }
        });
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Truncates the stream to at most `count` elements.
    #[must_use]
    pub fn limit(self, count: usize) -> Self {
        let items = self.items.take(count);
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Discards the first `count` elements.
    #[must_use]
    pub fn skip(self, count: usize) -> Self {
        let items = self.items.skip(count);
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Passes elements until the predicate first fails, then ends.
    #[must_use]
    pub fn take_while(self, mut predicate: impl FnMut(&Value) -> bool + 'static) -> Self {
        let items = self.items.take_while(move |item| match item {
            Ok(value) => predicate(value),
            Err(_) => true,
        });
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Discards elements until the predicate first fails, then passes the
    /// rest untested.
    #[must_use]
    pub fn drop_while(self, mut predicate: impl FnMut(&Value) -> bool + 'static) -> Self {
        let mut dropping = true;
        let items = self.items.filter(move |item| {
            if !dropping {
                return true;
            }
            match item {
                Ok(value) if predicate(value) => false,
                _ => {
                    dropping = false;
                    true
                }
            }
        });
        Self::from_iter(self.ty, Box::new(items))
    }

    /// Groups elements into arrays of at most `size`, in order.
    ///
    /// The final batch may be shorter. The resulting element type is an
    /// array of the current element type.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn batch(self, size: usize) -> Self {
        assert!(size > 0, "batch size must be positive");
        let mut items = self.items;
        let batches = std::iter::from_fn(move || {
            let mut chunk = im::Vector::new();
            for item in items.by_ref() {
                match item {
                    Ok(value) => {
                        chunk.push_back(value);
                        if chunk.len() == size {
                            return Some(Ok(Value::Array(chunk)));
                        }
                    }
                    Err(error) => return Some(Err(error)),
                }
            }
            if chunk.is_empty() {
                None
            } else {
                Some(Ok(Value::Array(chunk)))
            }
        });
        Self::from_iter(Type::array_of(self.ty), Box::new(batches))
    }

    /// Chains further streams after this one.
    ///
    /// Appended elements are revalidated against this stream's element
    /// type as they are pulled.
    #[must_use]
    pub fn append(self, others: impl IntoIterator<Item = Stream>) -> Self {
        let ty = self.ty.clone();
        let mut items = self.items;
        for other in others {
            let check = ty.clone();
            let revalidated = other
                .items
                .map(move |item| item.and_then(|value| check.validate(value)));
            items = Box::new(items.chain(revalidated));
        }
        Self::from_iter(ty, items)
    }

    /// Splices a custom iterator transformation into the pipeline.
    ///
    /// The operator receives the upstream iterator and returns the new one;
    /// its output is validated against `out_ty` as it is pulled.
    #[must_use]
    pub fn with_operator(self, out_ty: Type, operator: impl FnOnce(StreamIter) -> StreamIter) -> Self {
        let check = out_ty.clone();
        let items = operator(self.items)
            .map(move |item| item.and_then(|value| check.validate(value)));
        Self::from_iter(out_ty, Box::new(items))
    }

    /// Returns true if every element satisfies the predicate.
    ///
    /// Short-circuits on the first failing element.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn all_match(self, mut predicate: impl FnMut(&Value) -> bool) -> Result<bool> {
        for item in self.items {
            if !predicate(&item?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns true if any element satisfies the predicate.
    ///
    /// Short-circuits on the first matching element.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn any_match(self, mut predicate: impl FnMut(&Value) -> bool) -> Result<bool> {
        for item in self.items {
            if predicate(&item?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns true if no element satisfies the predicate.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn none_match(self, predicate: impl FnMut(&Value) -> bool) -> Result<bool> {
        self.any_match(predicate).map(|any| !any)
    }

    /// Pulls the first element, if any.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn find_first(mut self) -> Result<Optional> {
        match self.items.next() {
            Some(item) => Optional::of_nullable(self.ty, item?),
            None => Ok(Optional::empty(self.ty)),
        }
    }

    /// Smallest element under the canonical value ordering.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn min(self) -> Result<Optional> {
        self.min_by(Value::compare)
    }

    /// Largest element under the canonical value ordering.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn max(self) -> Result<Optional> {
        self.max_by(Value::compare)
    }

    /// Smallest element under a custom ordering.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn min_by(self, mut compare: impl FnMut(&Value, &Value) -> Ordering) -> Result<Optional> {
        let ty = self.ty.clone();
        let mut best: Option<Value> = None;
        for item in self.items {
            let value = item?;
            match &best {
                Some(current) if compare(&value, current) != Ordering::Less => {}
                _ => best = Some(value),
            }
        }
        match best {
            Some(value) => Optional::of_nullable(ty, value),
            None => Ok(Optional::empty(ty)),
        }
    }

    /// Largest element under a custom ordering.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn max_by(self, mut compare: impl FnMut(&Value, &Value) -> Ordering) -> Result<Optional> {
        self.min_by(move |a, b| compare(b, a))
    }

    /// Folds the stream into a single value of `out_ty`.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the seed or any intermediate accumulator
    /// fails `out_ty`, and propagates pipeline errors.
    pub fn reduce(
        self,
        out_ty: Type,
        seed: Value,
        mut accumulator: impl FnMut(Value, Value) -> Value,
    ) -> Result<Value> {
        let mut acc = out_ty.validate(seed)?;
        for item in self.items {
            acc = out_ty.validate(accumulator(acc, item?))?;
        }
        Ok(acc)
    }

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn count(self) -> Result<usize> {
        let mut total = 0;
        for item in self.items {
            item?;
            total += 1;
        }
        Ok(total)
    }

    /// Runs an action on every element.
    ///
    /// # Errors
    ///
    /// Propagates the first pipeline error encountered.
    pub fn for_each(self, mut action: impl FnMut(Value)) -> Result<()> {
        for item in self.items {
            action(item?);
        }
        Ok(())
    }

    /// Hands the remaining items to an arbitrary collector.
    pub fn collect<R>(self, collector: impl FnOnce(StreamIter) -> R) -> R {
        collector(self.items)
    }
}

impl Collectible for Stream {
    fn element_type(&self) -> Type {
        self.ty.clone()
    }

    fn into_vec(self) -> Result<Vec<Value>> {
        self.items.collect()
    }

    fn into_stream(self) -> Result<Stream> {
        Ok(self)
    }
}

impl DynObject for Stream {
    fn class_name(&self) -> &str {
        "Stream"
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

impl From<Stream> for Value {
    fn from(stream: Stream) -> Self {
        Value::Object(ObjectRef::new(stream))
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
