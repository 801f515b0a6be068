//! Embeddable tree links.
//!
//! A [`Links`] value holds the parent / left-child / right-child relations of
//! one node in one binary search tree. A record that belongs to several trees
//! embeds one `Links` per tree, each tagged with a marker type ([`Left`],
//! [`Right`], or any caller-defined type) so the relations of different trees
//! can never be mixed up.
//!
//! Relations are arena indices ([`Ptr`]) rather than addresses. The parent of
//! a tree's root is [`NodeRef::Sentinel`], the keyless anchor whose left child
//! is the root and which doubles as the tree's end marker.

use core::marker::PhantomData;

use crate::Ptr;
use crate::error::Side;

/// Either the keyless sentinel of a tree or a record in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// The tree's anchor. Its left child is the root; it is never an element.
    Sentinel,
    /// A real record.
    Record(Ptr),
}

impl NodeRef {
    /// Returns the record index, or `None` for the sentinel.
    #[inline]
    pub fn ptr(self) -> Option<Ptr> {
        match self {
            NodeRef::Sentinel => None,
            NodeRef::Record(ptr) => Some(ptr),
        }
    }

    /// Returns `true` if this is the sentinel.
    #[inline]
    pub fn is_sentinel(self) -> bool {
        matches!(self, NodeRef::Sentinel)
    }
}

impl From<Ptr> for NodeRef {
    fn from(ptr: Ptr) -> Self {
        NodeRef::Record(ptr)
    }
}

/// The three tree relations of a node, tagged by the tree they belong to.
///
/// `Links` is not `Clone`. A copy would claim a tree position that is already
/// held by the original.
pub struct Links<T> {
    pub(crate) parent: Option<NodeRef>,
    pub(crate) left: Option<Ptr>,
    pub(crate) right: Option<Ptr>,
    _tag: PhantomData<fn() -> T>,
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Links::new()
    }
}

impl<T> core::fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Links")
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<T> Links<T> {
    /// Creates unlinked relations: no parent, no children.
    pub const fn new() -> Self {
        Links {
            parent: None,
            left: None,
            right: None,
            _tag: PhantomData,
        }
    }

    /// The parent node, or `None` if the node is not linked into a tree.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
    }

    /// The left child.
    #[inline]
    pub fn left(&self) -> Option<Ptr> {
        self.left
    }

    /// The right child.
    #[inline]
    pub fn right(&self) -> Option<Ptr> {
        self.right
    }

    /// Returns `true` if all three relations are empty.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.parent.is_none() && self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
    }
}

/// Storage that can hand out the [`Links`] of tree `T` for any node,
/// including the tree's sentinel.
pub trait LinkStore<T> {
    /// Returns the relations of `node` in tree `T`.
    fn links(&self, node: NodeRef) -> &Links<T>;

    /// Returns the relations of `node` in tree `T` mutably.
    fn links_mut(&mut self, node: NodeRef) -> &mut Links<T>;
}

/// A marker type naming one of the two trees of a [`BiMap`](crate::BiMap).
///
/// Each tag knows its opposite, which is what lets a position in one tree be
/// re-tagged as the position of the same record in the other tree.
pub trait TreeTag: Copy + Eq + core::fmt::Debug + 'static + sealed::Sealed {
    /// The tag of the opposite tree.
    type Flip: TreeTag<Flip = Self>;

    /// The side this tag names, for error reporting.
    const SIDE: Side;

    /// Selects this tree's links out of a node's [`DualLinks`].
    fn select(links: &DualLinks) -> &Links<Self>;

    /// Selects this tree's links out of a node's [`DualLinks`] mutably.
    fn select_mut(links: &mut DualLinks) -> &mut Links<Self>;
}

/// A node's links in both trees of a [`BiMap`](crate::BiMap): one set tagged
/// [`Left`], one tagged [`Right`]. Every pair record embeds one, and so does
/// the sentinel shared by the two trees.
#[derive(Debug, Default)]
pub struct DualLinks {
    pub(crate) left: Links<Left>,
    pub(crate) right: Links<Right>,
}

impl DualLinks {
    /// Creates links that are unlinked in both trees.
    pub const fn new() -> Self {
        DualLinks {
            left: Links::new(),
            right: Links::new(),
        }
    }

    /// Returns `true` if the node is linked into neither tree.
    pub fn is_unlinked(&self) -> bool {
        self.left.is_unlinked() && self.right.is_unlinked()
    }
}

/// Tag of the tree ordered by left keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Left;

/// Tag of the tree ordered by right keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Right;

impl TreeTag for Left {
    type Flip = Right;
    const SIDE: Side = Side::Left;

    #[inline]
    fn select(links: &DualLinks) -> &Links<Left> {
        &links.left
    }

    #[inline]
    fn select_mut(links: &mut DualLinks) -> &mut Links<Left> {
        &mut links.left
    }
}

impl TreeTag for Right {
    type Flip = Left;
    const SIDE: Side = Side::Right;

    #[inline]
    fn select(links: &DualLinks) -> &Links<Right> {
        &links.right
    }

    #[inline]
    fn select_mut(links: &mut DualLinks) -> &mut Links<Right> {
        &mut links.right
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Left {}
    impl Sealed for super::Right {}
}

#[cold]
#[inline(never)]
fn unlinked(ptr: Ptr) -> ! {
    panic!("{ptr:?} is not linked into a tree");
}

/// Replaces `old`'s position under its parent with `new`.
///
/// Whichever child slot of `old`'s parent held `old` is rewritten to hold
/// `new`, and if `new` is a node its parent is pointed at that same parent.
/// `old`'s own relations are left untouched.
///
/// # Panics
///
/// Panics if `old` has no parent.
pub fn replace_under_parent<T, S>(store: &mut S, old: Ptr, new: Option<Ptr>)
where
    S: LinkStore<T> + ?Sized,
{
    let Some(parent) = store.links(NodeRef::Record(old)).parent else {
        unlinked(old)
    };

    let parent_links = store.links_mut(parent);
    if parent_links.left == Some(old) {
        parent_links.left = new;
    } else {
        parent_links.right = new;
    }

    if let Some(new) = new {
        store.links_mut(NodeRef::Record(new)).parent = Some(parent);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::vec::Vec;

    use super::*;

    pub(crate) struct VecStore {
        pub(crate) sentinel: Links<()>,
        pub(crate) nodes: Vec<Links<()>>,
    }

    impl VecStore {
        pub(crate) fn with_nodes(count: usize) -> Self {
            VecStore {
                sentinel: Links::new(),
                nodes: (0..count).map(|_| Links::new()).collect(),
            }
        }
    }

    impl LinkStore<()> for VecStore {
        fn links(&self, node: NodeRef) -> &Links<()> {
            match node {
                NodeRef::Sentinel => &self.sentinel,
                NodeRef::Record(ptr) => &self.nodes[ptr.unchecked_get()],
            }
        }

        fn links_mut(&mut self, node: NodeRef) -> &mut Links<()> {
            match node {
                NodeRef::Sentinel => &mut self.sentinel,
                NodeRef::Record(ptr) => &mut self.nodes[ptr.unchecked_get()],
            }
        }
    }

    fn p(index: usize) -> Ptr {
        Ptr::unchecked_from(index)
    }

    // 0 is the root, 1 its left child, 2 its right child.
    fn three_node_store() -> VecStore {
        let mut store = VecStore::with_nodes(4);
        store.sentinel.left = Some(p(0));
        store.nodes[0].parent = Some(NodeRef::Sentinel);
        store.nodes[0].left = Some(p(1));
        store.nodes[0].right = Some(p(2));
        store.nodes[1].parent = Some(NodeRef::Record(p(0)));
        store.nodes[2].parent = Some(NodeRef::Record(p(0)));
        store
    }

    #[test]
    fn test_links_default_is_unlinked() {
        let links: Links<Left> = Links::default();
        assert!(links.is_unlinked());
        assert_eq!(links.parent(), None);
        assert_eq!(links.left(), None);
        assert_eq!(links.right(), None);
    }

    #[test]
    fn test_node_ref_accessors() {
        assert!(NodeRef::Sentinel.is_sentinel());
        assert_eq!(NodeRef::Sentinel.ptr(), None);
        assert_eq!(NodeRef::from(p(5)).ptr(), Some(p(5)));
        assert!(!NodeRef::from(p(5)).is_sentinel());
    }

    #[test]
    fn test_replace_left_child() {
        let mut store = three_node_store();
        replace_under_parent(&mut store, p(1), Some(p(3)));

        assert_eq!(store.nodes[0].left, Some(p(3)));
        assert_eq!(store.nodes[0].right, Some(p(2)));
        assert_eq!(store.nodes[3].parent, Some(NodeRef::Record(p(0))));
        // The replaced node keeps its own relations.
        assert_eq!(store.nodes[1].parent, Some(NodeRef::Record(p(0))));
    }

    #[test]
    fn test_replace_right_child_with_none() {
        let mut store = three_node_store();
        replace_under_parent(&mut store, p(2), None);

        assert_eq!(store.nodes[0].left, Some(p(1)));
        assert_eq!(store.nodes[0].right, None);
    }

    #[test]
    fn test_replace_root_under_sentinel() {
        let mut store = three_node_store();
        replace_under_parent(&mut store, p(0), Some(p(1)));

        assert_eq!(store.sentinel.left, Some(p(1)));
        assert_eq!(store.nodes[1].parent, Some(NodeRef::Sentinel));
    }

    #[test]
    #[should_panic]
    fn test_replace_unlinked_node_panics() {
        let mut store = three_node_store();
        replace_under_parent(&mut store, p(3), None);
    }

    #[test]
    fn test_dual_links_select() {
        let mut links = DualLinks::new();
        Left::select_mut(&mut links).left = Some(p(1));
        Right::select_mut(&mut links).right = Some(p(2));

        assert_eq!(Left::select(&links).left(), Some(p(1)));
        assert_eq!(Left::select(&links).right(), None);
        assert_eq!(Right::select(&links).right(), Some(p(2)));
        assert!(!links.is_unlinked());
        assert!(DualLinks::default().is_unlinked());
    }

    #[test]
    fn test_tree_tags_flip() {
        fn flip_side<T: TreeTag>() -> Side {
            <T::Flip as TreeTag>::SIDE
        }
        assert_eq!(flip_side::<Left>(), Side::Right);
        assert_eq!(flip_side::<Right>(), Side::Left);
    }
}
