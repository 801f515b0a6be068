//! Bidirectional map implementation.
//!
//! This module provides the [`BiMap`] type and its cursors and iterators. A
//! `BiMap` is a one-to-one mapping between left keys and right keys. Every
//! pair lives in exactly one arena slot, and that slot is linked into two
//! ordered trees at once: one ordered by left keys, one by right keys.
//!
//! # Examples
//!
//! ```
//! use tether_bimap::BiMap;
//!
//! let mut map = BiMap::new();
//! map.insert(2, "two");
//! map.insert(1, "one");
//!
//! // Each view iterates in its own key order.
//! let by_left: Vec<_> = map.iter_left().collect();
//! assert_eq!(by_left, [(&1, &"one"), (&2, &"two")]);
//!
//! let by_right: Vec<_> = map.iter_right().collect();
//! assert_eq!(by_right, [(&"one", &1), (&"two", &2)]);
//! ```

mod cursor;
mod iter;

pub use cursor::Cursor;
pub use cursor::Position;
pub use iter::IntoIter;
pub use iter::Iter;

use crate::Ptr;
use crate::arena::Arena;
use crate::arena::LeftKey;
use crate::arena::RightKey;
use crate::error::Error;
use crate::intrusive_tree;
use crate::intrusive_tree::Compare;
use crate::intrusive_tree::IntrusiveTree;
use crate::intrusive_tree::Natural;
use crate::node::Left;
use crate::node::NodeRef;
use crate::node::Right;
use crate::node::TreeTag;

/// Projects a stored pair onto one side: the key that side is ordered by,
/// and the value paired with it on the other side.
///
/// Implemented by the tags [`Left`] and [`Right`].
pub trait View<L, R>: TreeTag {
    /// The key type this side is ordered by.
    type Key;
    /// The key type of the opposite side.
    type Other;

    /// Splits a stored pair into this side's key and the opposite key.
    fn project<'a>(left: &'a L, right: &'a R) -> (&'a Self::Key, &'a Self::Other);
}

impl<L, R> View<L, R> for Left {
    type Key = L;
    type Other = R;

    #[inline]
    fn project<'a>(left: &'a L, right: &'a R) -> (&'a L, &'a R) {
        (left, right)
    }
}

impl<L, R> View<L, R> for Right {
    type Key = R;
    type Other = L;

    #[inline]
    fn project<'a>(left: &'a L, right: &'a R) -> (&'a R, &'a L) {
        (right, left)
    }
}

/// A bidirectional one-to-one map.
///
/// Left keys are pairwise distinct under the left comparator `CL`, and right
/// keys are pairwise distinct under the right comparator `CR`. Both default
/// to [`Natural`], which orders keys by [`Ord`].
///
/// Lookups return [`Cursor`]s, which borrow the map and can step through
/// either view or [`flip`](Cursor::flip) to the same pair in the other view.
/// Mutating calls take [`Position`]s, the `Copy` handles that cursors
/// produce with [`Cursor::position`].
///
/// The two trees are plain binary search trees with no rebalancing: lookups
/// are logarithmic for random insertion orders and linear in the worst case.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert("apple", 5);
/// map.insert("banana", 3);
///
/// assert_eq!(map.at_left(&"apple"), Ok(&5));
/// assert_eq!(map.at_right(&3), Ok(&"banana"));
///
/// // Neither side may repeat a key.
/// assert!(map.insert("cherry", 5).is_end());
/// assert_eq!(map.len(), 2);
/// ```
pub struct BiMap<L, R, CL = Natural, CR = Natural> {
    arena: Arena<L, R>,
    left: IntrusiveTree<Left, LeftKey, CL>,
    right: IntrusiveTree<Right, RightKey, CR>,
    len: usize,
}

impl<L, R> BiMap<L, R> {
    /// Creates an empty map ordered by [`Ord`] on both sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let map: BiMap<i32, String> = BiMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for at least `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        BiMap::with_capacity_and_comparators(capacity, Natural, Natural)
    }
}

impl<L, R, CL: Default, CR: Default> Default for BiMap<L, R, CL, CR> {
    fn default() -> Self {
        BiMap::with_capacity_and_comparators(0, CL::default(), CR::default())
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR> {
    /// Creates an empty map with custom comparators.
    ///
    /// A comparator is any [`Compare`] implementation, including closures of
    /// the form `Fn(&K, &K) -> bool` returning "strictly less than".
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map = BiMap::with_comparators(
    ///     |a: &i32, b: &i32| b < a,
    ///     |a: &&str, b: &&str| a.len() < b.len(),
    /// );
    /// map.insert(1, "a");
    /// map.insert(2, "bb");
    ///
    /// // Left keys run in descending order.
    /// assert_eq!(map.begin_left().get(), Some(&2));
    /// // Right keys are equivalent when they have the same length.
    /// assert!(map.insert(3, "c").is_end());
    /// ```
    pub fn with_comparators(compare_left: CL, compare_right: CR) -> Self {
        Self::with_capacity_and_comparators(0, compare_left, compare_right)
    }

    /// Creates an empty map with custom comparators and room for at least
    /// `capacity` pairs.
    pub fn with_capacity_and_comparators(
        capacity: usize,
        compare_left: CL,
        compare_right: CR,
    ) -> Self {
        BiMap {
            arena: Arena::with_capacity(capacity),
            left: IntrusiveTree::new(compare_left),
            right: IntrusiveTree::new(compare_right),
            len: 0,
        }
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the comparator ordering left keys.
    pub fn left_comparator(&self) -> &CL {
        self.left.compare()
    }

    /// Returns the comparator ordering right keys.
    pub fn right_comparator(&self) -> &CR {
        self.right.compare()
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.len = 0;
    }

    /// Exchanges the contents, comparators included, of two maps.
    ///
    /// No pair is moved or copied, and positions taken from either map stay
    /// valid for the map that now holds their pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut a = BiMap::new();
    /// a.insert(1, 'x');
    /// let mut b = BiMap::new();
    ///
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b.at_left(&1), Ok(&'x'));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Returns a cursor at the first pair in left order, or at the end if the
    /// map is empty.
    pub fn begin_left(&self) -> Cursor<'_, Left, L, R, CL, CR> {
        Cursor::new(self, intrusive_tree::first::<Left, _>(&self.arena))
    }

    /// Returns the end cursor of the left view.
    pub fn end_left(&self) -> Cursor<'_, Left, L, R, CL, CR> {
        Cursor::new(self, self.left.end())
    }

    /// Returns a cursor at the first pair in right order, or at the end if
    /// the map is empty.
    pub fn begin_right(&self) -> Cursor<'_, Right, L, R, CL, CR> {
        Cursor::new(self, intrusive_tree::first::<Right, _>(&self.arena))
    }

    /// Returns the end cursor of the right view.
    pub fn end_right(&self) -> Cursor<'_, Right, L, R, CL, CR> {
        Cursor::new(self, self.right.end())
    }

    /// Returns a cursor at `position` in the left view.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a pair that has been erased.
    pub fn cursor_left(&self, position: Position<Left>) -> Cursor<'_, Left, L, R, CL, CR> {
        self.cursor_at(position)
    }

    /// Returns a cursor at `position` in the right view.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a pair that has been erased.
    pub fn cursor_right(&self, position: Position<Right>) -> Cursor<'_, Right, L, R, CL, CR> {
        self.cursor_at(position)
    }

    fn cursor_at<T: View<L, R>>(&self, position: Position<T>) -> Cursor<'_, T, L, R, CL, CR> {
        if let Some(ptr) = position.ptr() {
            assert!(
                self.arena.is_occupied(ptr),
                "{ptr:?} does not name a pair in this map"
            );
        }
        Cursor::new(self, position.node())
    }

    /// Returns an iterator over `(left, right)` pairs in left order.
    pub fn iter_left(&self) -> Iter<'_, Left, L, R> {
        Iter::new(&self.arena, self.len)
    }

    /// Returns an iterator over `(right, left)` pairs in right order.
    pub fn iter_right(&self) -> Iter<'_, Right, L, R> {
        Iter::new(&self.arena, self.len)
    }

    /// Erases the pair at `position` in the left view from both views and
    /// returns the position that followed it in left order.
    ///
    /// Erasing at the end position does nothing and returns the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a pair that has already been erased.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map = BiMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    ///
    /// let first = map.begin_left().position();
    /// let next = map.erase_left_at(first);
    /// assert_eq!(map.cursor_left(next).get(), Some(&2));
    /// assert!(map.find_right(&'a').is_end());
    /// ```
    pub fn erase_left_at(&mut self, position: Position<Left>) -> Position<Left> {
        let Some(ptr) = position.ptr() else {
            return position;
        };
        let next = intrusive_tree::next::<Left, _>(&self.arena, position.node());
        self.remove_record(ptr);
        Position::from_node(next)
    }

    /// Erases the pair at `position` in the right view from both views and
    /// returns the position that followed it in right order.
    ///
    /// Erasing at the end position does nothing and returns the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` names a pair that has already been erased.
    pub fn erase_right_at(&mut self, position: Position<Right>) -> Position<Right> {
        let Some(ptr) = position.ptr() else {
            return position;
        };
        let next = intrusive_tree::next::<Right, _>(&self.arena, position.node());
        self.remove_record(ptr);
        Position::from_node(next)
    }

    /// Erases every pair from `first` up to, but not including, `last` in
    /// left order. Returns `last`.
    ///
    /// `last` must be reachable from `first` by stepping forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map: BiMap<i32, i32> = (0..6).map(|i| (i, i * 10)).collect();
    /// let first = map.find_left(&1).position();
    /// let last = map.find_left(&4).position();
    ///
    /// map.erase_left_range(first, last);
    /// let left: Vec<_> = map.iter_left().map(|(l, _)| *l).collect();
    /// assert_eq!(left, [0, 4, 5]);
    /// ```
    pub fn erase_left_range(&mut self, first: Position<Left>, last: Position<Left>) -> Position<Left> {
        let mut position = first;
        while position != last && !position.is_end() {
            position = self.erase_left_at(position);
        }
        last
    }

    /// Erases every pair from `first` up to, but not including, `last` in
    /// right order. Returns `last`.
    ///
    /// `last` must be reachable from `first` by stepping forward.
    pub fn erase_right_range(
        &mut self,
        first: Position<Right>,
        last: Position<Right>,
    ) -> Position<Right> {
        let mut position = first;
        while position != last && !position.is_end() {
            position = self.erase_right_at(position);
        }
        last
    }

    fn remove_record(&mut self, ptr: Ptr) -> (L, R) {
        self.left.erase(&mut self.arena, ptr);
        self.right.erase(&mut self.arena, ptr);
        self.len -= 1;
        self.arena.free(ptr).into_pair()
    }

    pub(crate) fn pop_first_left(&mut self) -> Option<(L, R)> {
        let ptr = intrusive_tree::first::<Left, _>(&self.arena).ptr()?;
        Some(self.remove_record(ptr))
    }

    pub(crate) fn pop_last_left(&mut self) -> Option<(L, R)> {
        let ptr = intrusive_tree::last::<Left, _>(&self.arena).ptr()?;
        Some(self.remove_record(ptr))
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    /// Inserts the pair `(left, right)`.
    ///
    /// The pair is rejected if `left` is already present on the left side or
    /// `right` is already present on the right side; the map is then left
    /// untouched and the end position is returned. Otherwise the pair is
    /// linked into both views and its left position is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map = BiMap::new();
    /// let pos = map.insert(1, "one");
    /// assert_eq!(map.cursor_left(pos).get(), Some(&1));
    ///
    /// assert!(map.insert(1, "uno").is_end());
    /// assert!(map.insert(2, "one").is_end());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, left: L, right: R) -> Position<Left> {
        if self.contains_left(&left) || self.contains_right(&right) {
            return Position::end();
        }
        Position::from_node(NodeRef::Record(self.link_new(left, right)))
    }

    // Both keys must be absent.
    fn link_new(&mut self, left: L, right: R) -> Ptr {
        let ptr = self.arena.alloc(left, right);
        self.right.insert(&mut self.arena, ptr, true);
        self.left.insert(&mut self.arena, ptr, true);
        self.len += 1;
        ptr
    }

    /// Returns a cursor at the pair whose left key is equivalent to `left`,
    /// or the end cursor of the left view.
    pub fn find_left(&self, left: &L) -> Cursor<'_, Left, L, R, CL, CR> {
        Cursor::new(self, self.left.find(&self.arena, left))
    }

    /// Returns a cursor at the pair whose right key is equivalent to
    /// `right`, or the end cursor of the right view.
    pub fn find_right(&self, right: &R) -> Cursor<'_, Right, L, R, CL, CR> {
        Cursor::new(self, self.right.find(&self.arena, right))
    }

    /// Returns `true` if `left` is present on the left side.
    pub fn contains_left(&self, left: &L) -> bool {
        !self.left.find(&self.arena, left).is_sentinel()
    }

    /// Returns `true` if `right` is present on the right side.
    pub fn contains_right(&self, right: &R) -> bool {
        !self.right.find(&self.arena, right).is_sentinel()
    }

    /// Returns the right key paired with `left`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `left` is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::{BiMap, Error, Side};
    ///
    /// let mut map = BiMap::new();
    /// map.insert(1, "one");
    ///
    /// assert_eq!(map.at_left(&1), Ok(&"one"));
    /// assert_eq!(map.at_left(&3), Err(Error::KeyNotFound(Side::Left)));
    /// ```
    pub fn at_left(&self, left: &L) -> Result<&R, Error> {
        match self.left.find(&self.arena, left) {
            NodeRef::Record(ptr) => Ok(&self.arena[ptr].right),
            NodeRef::Sentinel => Err(Error::KeyNotFound(Left::SIDE)),
        }
    }

    /// Returns the left key paired with `right`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `right` is not present.
    pub fn at_right(&self, right: &R) -> Result<&L, Error> {
        match self.right.find(&self.arena, right) {
            NodeRef::Record(ptr) => Ok(&self.arena[ptr].left),
            NodeRef::Sentinel => Err(Error::KeyNotFound(Right::SIDE)),
        }
    }

    /// Returns the right key paired with `left`, inserting a default right
    /// key if `left` is absent.
    ///
    /// When `left` is absent and `R::default()` is already paired with some
    /// other left key, that pair is erased first, so the default value moves
    /// to `left`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map: BiMap<i32, String> = BiMap::new();
    /// assert_eq!(map.at_left_or_default(3), "");
    ///
    /// // The default right key is handed over from 3 to 5.
    /// assert_eq!(map.at_left_or_default(5), "");
    /// assert!(map.find_left(&3).is_end());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn at_left_or_default(&mut self, left: L) -> &R
    where
        R: Default,
    {
        if let NodeRef::Record(ptr) = self.left.find(&self.arena, &left) {
            return &self.arena[ptr].right;
        }

        let right = R::default();
        if let NodeRef::Record(ptr) = self.right.find(&self.arena, &right) {
            self.remove_record(ptr);
        }
        let ptr = self.link_new(left, right);
        &self.arena[ptr].right
    }

    /// Returns the left key paired with `right`, inserting a default left
    /// key if `right` is absent.
    ///
    /// When `right` is absent and `L::default()` is already paired with some
    /// other right key, that pair is erased first, so the default value moves
    /// to `right`.
    pub fn at_right_or_default(&mut self, right: R) -> &L
    where
        L: Default,
    {
        if let NodeRef::Record(ptr) = self.right.find(&self.arena, &right) {
            return &self.arena[ptr].left;
        }

        let left = L::default();
        if let NodeRef::Record(ptr) = self.left.find(&self.arena, &left) {
            self.remove_record(ptr);
        }
        let ptr = self.link_new(left, right);
        &self.arena[ptr].left
    }

    /// Erases the pair whose left key is `left`. Returns `true` if a pair was
    /// erased.
    pub fn erase_left(&mut self, left: &L) -> bool {
        self.remove_left(left).is_some()
    }

    /// Erases the pair whose right key is `right`. Returns `true` if a pair
    /// was erased.
    pub fn erase_right(&mut self, right: &R) -> bool {
        self.remove_right(right).is_some()
    }

    /// Removes the pair whose left key is `left` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map = BiMap::new();
    /// map.insert(1, "one");
    /// assert_eq!(map.remove_left(&1), Some((1, "one")));
    /// assert_eq!(map.remove_left(&1), None);
    /// ```
    pub fn remove_left(&mut self, left: &L) -> Option<(L, R)> {
        let ptr = self.left.find(&self.arena, left).ptr()?;
        Some(self.remove_record(ptr))
    }

    /// Removes the pair whose right key is `right` and returns it.
    pub fn remove_right(&mut self, right: &R) -> Option<(L, R)> {
        let ptr = self.right.find(&self.arena, right).ptr()?;
        Some(self.remove_record(ptr))
    }

    /// Returns a cursor at the first pair whose left key is not less than
    /// `left`.
    pub fn lower_bound_left(&self, left: &L) -> Cursor<'_, Left, L, R, CL, CR> {
        Cursor::new(self, self.left.lower_bound(&self.arena, left))
    }

    /// Returns a cursor at the first pair whose left key is greater than
    /// `left`.
    pub fn upper_bound_left(&self, left: &L) -> Cursor<'_, Left, L, R, CL, CR> {
        Cursor::new(self, self.left.upper_bound(&self.arena, left))
    }

    /// Returns a cursor at the first pair whose right key is not less than
    /// `right`.
    pub fn lower_bound_right(&self, right: &R) -> Cursor<'_, Right, L, R, CL, CR> {
        Cursor::new(self, self.right.lower_bound(&self.arena, right))
    }

    /// Returns a cursor at the first pair whose right key is greater than
    /// `right`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether_bimap::BiMap;
    ///
    /// let mut map = BiMap::new();
    /// map.insert('a', 10);
    /// map.insert('b', 20);
    ///
    /// assert_eq!(map.upper_bound_right(&10).get(), Some(&20));
    /// assert_eq!(map.lower_bound_right(&15).flip().get(), Some(&'b'));
    /// assert!(map.upper_bound_right(&20).is_end());
    /// ```
    pub fn upper_bound_right(&self, right: &R) -> Cursor<'_, Right, L, R, CL, CR> {
        Cursor::new(self, self.right.upper_bound(&self.arena, right))
    }
}

impl<L, R, CL, CR> Clone for BiMap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Compare<L> + Clone,
    CR: Compare<R> + Clone,
{
    fn clone(&self) -> Self {
        let mut map = BiMap::with_capacity_and_comparators(
            self.len,
            self.left_comparator().clone(),
            self.right_comparator().clone(),
        );
        for (left, right) in self.iter_left() {
            map.insert(left.clone(), right.clone());
        }
        map
    }
}

impl<L, R, CL, CR> PartialEq for BiMap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    /// Two maps are equal when they hold the same number of pairs and, walked
    /// in left order, each pair of `self` is equivalent to the corresponding
    /// pair of `other` under `self`'s comparators.
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }

        let compare_left = self.left_comparator();
        let compare_right = self.right_comparator();
        self.iter_left()
            .zip(other.iter_left())
            .all(|((l1, r1), (l2, r2))| {
                !(compare_left.less(l1, l2)
                    || compare_left.less(l2, l1)
                    || compare_right.less(r1, r2)
                    || compare_right.less(r2, r1))
            })
    }
}

impl<L, R, CL, CR> Eq for BiMap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
}

impl<L: core::fmt::Debug, R: core::fmt::Debug, CL, CR> core::fmt::Debug for BiMap<L, R, CL, CR> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L, R, CL, CR> FromIterator<(L, R)> for BiMap<L, R, CL, CR>
where
    CL: Compare<L> + Default,
    CR: Compare<R> + Default,
{
    /// Collects pairs into a map. Pairs that repeat an earlier left or right
    /// key are skipped.
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = BiMap::with_capacity_and_comparators(
            iter.size_hint().0,
            CL::default(),
            CR::default(),
        );
        map.extend(iter);
        map
    }
}

impl<L, R, CL, CR> Extend<(L, R)> for BiMap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

impl<'a, L, R, CL, CR> IntoIterator for &'a BiMap<L, R, CL, CR> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, Left, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

impl<L, R, CL, CR> IntoIterator for BiMap<L, R, CL, CR> {
    type Item = (L, R);
    type IntoIter = IntoIter<L, R, CL, CR>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}
