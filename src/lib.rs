#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
pub mod bimap;
mod error;
pub mod intrusive_tree;
pub mod node;

extern crate alloc;

use core::num::NonZeroU32;

pub use bimap::BiMap;
pub use bimap::Cursor;
pub use bimap::IntoIter;
pub use bimap::Iter;
pub use bimap::Position;
pub use error::Error;
pub use error::Side;
pub use intrusive_tree::Compare;
pub use intrusive_tree::Natural;
pub use node::Left;
pub use node::Right;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
/// An index identifying one pair record in a [`BiMap`]'s arena.
///
/// Both trees of a map address the same record through the same `Ptr`, which
/// is what makes flipping a position between the left and right views free.
/// It is **non-generational**: once a pair is erased, its `Ptr` may be re-used
/// by a later insert.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// let pos = map.insert("a", 1);
/// let ptr = pos.ptr().unwrap();
///
/// // The same record backs both views.
/// assert_eq!(pos.flip().ptr(), Some(ptr));
/// ```
pub struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.0.get() - 1)
    }
}

impl Ptr {
    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Ptr: {index}"
        );
        match NonZeroU32::new((index as u32).saturating_add(1)) {
            Some(raw) => Ptr(raw),
            None => unreachable!("saturating_add(1) is never zero"),
        }
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0.get() as usize - 1
    }
}
