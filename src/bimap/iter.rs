use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::arena::Arena;
use crate::bimap::BiMap;
use crate::bimap::View;
use crate::intrusive_tree;
use crate::node::NodeRef;
use crate::node::TreeTag;

/// An iterator over the pairs of a [`BiMap`] in one view's order.
///
/// Created by [`BiMap::iter_left`], which yields `(&left, &right)` in left
/// order, and [`BiMap::iter_right`], which yields `(&right, &left)` in right
/// order.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert("a", 2);
/// map.insert("b", 1);
///
/// let mut iter = map.iter_right();
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next(), Some((&1, &"b")));
/// assert_eq!(iter.next_back(), Some((&2, &"a")));
/// assert_eq!(iter.next(), None);
/// ```
pub struct Iter<'a, T, L, R> {
    arena: &'a Arena<L, R>,
    front: NodeRef,
    back: NodeRef,
    remaining: usize,
    _tag: PhantomData<fn() -> T>,
}

impl<'a, T: TreeTag, L, R> Iter<'a, T, L, R> {
    pub(crate) fn new(arena: &'a Arena<L, R>, len: usize) -> Self {
        Iter {
            arena,
            front: intrusive_tree::first::<T, _>(arena),
            back: intrusive_tree::last::<T, _>(arena),
            remaining: len,
            _tag: PhantomData,
        }
    }
}

impl<T, L, R> Clone for Iter<'_, T, L, R> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _tag: PhantomData,
        }
    }
}

impl<T, L, R> core::fmt::Debug for Iter<'_, T, L, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, T: View<L, R>, L, R> Iterator for Iter<'a, T, L, R> {
    type Item = (&'a T::Key, &'a T::Other);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.front.ptr()?;
        self.remaining -= 1;
        self.front = intrusive_tree::next::<T, _>(self.arena, self.front);

        let record = &self.arena[ptr];
        Some(T::project(&record.left, &record.right))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: View<L, R>, L, R> DoubleEndedIterator for Iter<'_, T, L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.back.ptr()?;
        self.remaining -= 1;
        self.back = intrusive_tree::prev::<T, _>(self.arena, self.back);

        let record = &self.arena[ptr];
        Some(T::project(&record.left, &record.right))
    }
}

impl<T: View<L, R>, L, R> ExactSizeIterator for Iter<'_, T, L, R> {}

impl<T: View<L, R>, L, R> FusedIterator for Iter<'_, T, L, R> {}

/// An owning iterator over the pairs of a [`BiMap`] in left order.
///
/// Created by the [`into_iter`](IntoIterator::into_iter) method on
/// [`BiMap`]. Each pair is unlinked from both views as it is yielded.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert(2, 'b');
/// map.insert(1, 'a');
///
/// let pairs: Vec<(i32, char)> = map.into_iter().collect();
/// assert_eq!(pairs, [(1, 'a'), (2, 'b')]);
/// ```
pub struct IntoIter<L, R, CL, CR> {
    pub(crate) map: BiMap<L, R, CL, CR>,
}

impl<L: core::fmt::Debug, R: core::fmt::Debug, CL, CR> core::fmt::Debug for IntoIter<L, R, CL, CR> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.map).finish()
    }
}

impl<L, R, CL, CR> Iterator for IntoIter<L, R, CL, CR> {
    type Item = (L, R);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_first_left()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<L, R, CL, CR> DoubleEndedIterator for IntoIter<L, R, CL, CR> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_last_left()
    }
}

impl<L, R, CL, CR> ExactSizeIterator for IntoIter<L, R, CL, CR> {}

impl<L, R, CL, CR> FusedIterator for IntoIter<L, R, CL, CR> {}
