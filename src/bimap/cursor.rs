use core::marker::PhantomData;

use crate::Ptr;
use crate::bimap::BiMap;
use crate::bimap::View;
use crate::intrusive_tree;
use crate::node::NodeRef;
use crate::node::TreeTag;

/// A position in one view of a [`BiMap`]: a pair, or the view's end.
///
/// Positions are plain `Copy` handles that do not borrow the map, so they can
/// be passed to mutating calls such as [`BiMap::erase_left_at`]. A position
/// stays valid until the pair it names is erased. Like [`Ptr`], it is
/// non-generational: after its pair is erased, a later insert may reuse it.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// let pos = map.insert(1, "one");
///
/// // The same pair, seen from the right view.
/// let right = pos.flip();
/// assert_eq!(map.cursor_right(right).get(), Some(&"one"));
/// assert_eq!(right.flip(), pos);
/// ```
pub struct Position<T> {
    node: NodeRef,
    _tag: PhantomData<fn() -> T>,
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for Position<T> {}

impl<T> core::hash::Hash for Position<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<T> core::fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.node {
            NodeRef::Sentinel => f.write_str("End"),
            NodeRef::Record(ptr) => write!(f, "{ptr:?}"),
        }
    }
}

impl<T> Position<T> {
    pub(crate) fn from_node(node: NodeRef) -> Self {
        Position {
            node,
            _tag: PhantomData,
        }
    }

    pub(crate) fn node(self) -> NodeRef {
        self.node
    }

    /// The end position of a view.
    pub fn end() -> Self {
        Position::from_node(NodeRef::Sentinel)
    }

    /// Returns `true` if this is the end position.
    pub fn is_end(self) -> bool {
        self.node.is_sentinel()
    }

    /// Returns the arena index of the pair, or `None` at the end.
    pub fn ptr(self) -> Option<Ptr> {
        self.node.ptr()
    }
}

impl<T: TreeTag> Position<T> {
    /// Returns the position of the same pair in the opposite view. The end
    /// position flips to the end position.
    #[inline]
    pub fn flip(self) -> Position<T::Flip> {
        Position::from_node(self.node)
    }
}

/// A read-only cursor into one view of a [`BiMap`].
///
/// A cursor is either at a pair or at the end of its view. Stepping forward
/// from the end stays at the end; stepping back from the end moves to the
/// last pair; stepping back from the first pair moves to the end.
///
/// The tag `T` is [`Left`](crate::Left) or [`Right`](crate::Right).
/// [`flip`](Cursor::flip) re-addresses the same pair in the other view
/// without searching.
///
/// # Examples
///
/// ```
/// use tether_bimap::BiMap;
///
/// let mut map = BiMap::new();
/// map.insert(1, 'c');
/// map.insert(2, 'b');
/// map.insert(3, 'a');
///
/// let mut cursor = map.find_left(&2);
/// assert_eq!(cursor.pair(), Some((&2, &'b')));
///
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&3));
///
/// // In right order 'a' (paired with 3) comes first.
/// let mut right = cursor.flip();
/// assert_eq!(right.get(), Some(&'a'));
/// right.move_prev();
/// assert!(right.is_end());
/// ```
pub struct Cursor<'m, T, L, R, CL, CR> {
    map: &'m BiMap<L, R, CL, CR>,
    node: NodeRef,
    _tag: PhantomData<fn() -> T>,
}

impl<T, L, R, CL, CR> Clone for Cursor<'_, T, L, R, CL, CR> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, L, R, CL, CR> Copy for Cursor<'_, T, L, R, CL, CR> {}

impl<T, L, R, CL, CR> PartialEq for Cursor<'_, T, L, R, CL, CR> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.map, other.map) && self.node == other.node
    }
}

impl<T, L, R, CL, CR> Eq for Cursor<'_, T, L, R, CL, CR> {}

impl<T, L, R, CL, CR> core::fmt::Debug for Cursor<'_, T, L, R, CL, CR> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Cursor")
            .field(&Position::<T>::from_node(self.node))
            .finish()
    }
}

impl<'m, T, L, R, CL, CR> Cursor<'m, T, L, R, CL, CR> {
    pub(crate) fn new(map: &'m BiMap<L, R, CL, CR>, node: NodeRef) -> Self {
        Cursor {
            map,
            node,
            _tag: PhantomData,
        }
    }

    /// Returns `true` if the cursor is at the end of its view.
    pub fn is_end(&self) -> bool {
        self.node.is_sentinel()
    }

    /// Returns the cursor's position, for use with mutating calls.
    pub fn position(&self) -> Position<T> {
        Position::from_node(self.node)
    }
}

impl<'m, T, L, R, CL, CR> Cursor<'m, T, L, R, CL, CR>
where
    T: View<L, R>,
{
    /// Returns the key this view is ordered by, or `None` at the end.
    pub fn get(&self) -> Option<&'m T::Key> {
        self.pair().map(|(key, _)| key)
    }

    /// Returns the key paired with the current one on the other side, or
    /// `None` at the end.
    pub fn other(&self) -> Option<&'m T::Other> {
        self.pair().map(|(_, other)| other)
    }

    /// Returns this view's key together with its paired key, or `None` at the
    /// end.
    pub fn pair(&self) -> Option<(&'m T::Key, &'m T::Other)> {
        let record = &self.map.arena[self.node.ptr()?];
        Some(T::project(&record.left, &record.right))
    }

    /// Moves to the next pair in this view's order.
    pub fn move_next(&mut self) {
        self.node = intrusive_tree::next::<T, _>(&self.map.arena, self.node);
    }

    /// Moves to the previous pair in this view's order.
    pub fn move_prev(&mut self) {
        self.node = intrusive_tree::prev::<T, _>(&self.map.arena, self.node);
    }

    /// Returns a cursor at the same pair in the opposite view. The end cursor
    /// flips to the other view's end cursor. Flipping twice returns the
    /// original cursor.
    pub fn flip(&self) -> Cursor<'m, T::Flip, L, R, CL, CR> {
        Cursor::new(self.map, self.node)
    }
}
