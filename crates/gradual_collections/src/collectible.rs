//! Cross-container conversion capability.

use gradual_foundation::{Result, Value};
use gradual_types::Type;

use crate::sequence::Sequence;
use crate::set::Set;
use crate::stream::Stream;

/// Mutual conversion between the generic containers.
///
/// Implemented by [`Sequence`], [`Set`], [`crate::Map`], [`crate::Optional`],
/// and [`Stream`]. Conversions are deep snapshots, never live views: the
/// produced container owns fresh entries and later mutation of either side
/// is invisible to the other.
///
/// The methods consume `self`, which is the ownership-based rendition of a
/// single-pass source: converting a stream uses it up. The eager containers
/// are `Clone`, so a non-destructive conversion is `seq.clone().into_set()`.
pub trait Collectible {
    /// Declared element type of this container.
    ///
    /// For [`crate::Map`] this is the value type; entries remain reachable
    /// through [`crate::Map::entry_set`].
    fn element_type(&self) -> Type;

    /// Snapshots the elements in iteration order.
    ///
    /// # Errors
    ///
    /// Only a [`Stream`] source can fail here (lazy validation surfaces at
    /// consumption); the eager containers always succeed.
    fn into_vec(self) -> Result<Vec<Value>>;

    /// Converts into a [`Sequence`] preserving iteration order.
    ///
    /// # Errors
    ///
    /// Propagates [`Stream`] consumption errors.
    fn into_sequence(self) -> Result<Sequence>
    where
        Self: Sized,
    {
        let ty = self.element_type();
        Ok(Sequence::from_validated(ty, self.into_vec()?))
    }

    /// Converts into a [`Set`], deduplicating by value hash.
    ///
    /// # Errors
    ///
    /// Propagates [`Stream`] consumption errors.
    fn into_set(self) -> Result<Set>
    where
        Self: Sized,
    {
        let ty = self.element_type();
        Ok(Set::from_validated(ty, self.into_vec()?))
    }

    /// Converts into a [`Stream`] over a snapshot of the elements.
    ///
    /// # Errors
    ///
    /// Propagates [`Stream`] consumption errors.
    fn into_stream(self) -> Result<Stream>
    where
        Self: Sized,
    {
        let ty = self.element_type();
        // Elements are already validated; the stream need not re-check them.
        Ok(Stream::from_validated(ty, self.into_vec()?))
    }
}
