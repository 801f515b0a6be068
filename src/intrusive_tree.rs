//! Ordered intrusive binary search tree.
//!
//! An [`IntrusiveTree`] owns no nodes. It operates purely on the [`Links`]
//! embedded in records that live in some external [`LinkStore`], reads keys
//! through an injected [`KeyGetter`], and orders them with an injected
//! [`Compare`]. Several trees can therefore index the same records, each
//! through its own tag-typed set of links.
//!
//! Positions are [`NodeRef`]s: a record, or the tree's sentinel which serves
//! as the end position. The tree is not balanced; every walk is iterative so
//! a degenerate (sorted-insert) tree costs time but never stack depth.

use core::marker::PhantomData;

use crate::Ptr;
use crate::node::LinkStore;
use crate::node::NodeRef;
use crate::node::replace_under_parent;

/// A strict weak ordering over keys, expressed as "less than".
///
/// Two keys are *equivalent* when neither is less than the other. Any
/// `Fn(&K, &K) -> bool` closure is a comparator.
///
/// # Examples
///
/// ```
/// use tether_bimap::{Compare, Natural};
///
/// assert!(Natural.less(&1, &2));
///
/// let by_len = |a: &&str, b: &&str| a.len() < b.len();
/// assert!(by_len.less(&"ab", &"abc"));
/// assert!(!by_len.less(&"ab", &"cd"));
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;
}

/// The comparator that uses the key's [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Extracts the key of a record stored in `S`.
pub trait KeyGetter<S: ?Sized> {
    /// The key type the tree is ordered by.
    type Key: ?Sized;

    /// Returns the key of the record at `node`.
    fn get(store: &S, node: Ptr) -> &Self::Key;
}

/// An ordered set of records threaded through the `Links<T>` of a store.
///
/// The tree holds only its comparator; the sentinel and every node's links
/// live in the store passed to each operation.
pub struct IntrusiveTree<T, G, C> {
    compare: C,
    _marker: PhantomData<fn() -> (T, G)>,
}

impl<T, G, C: Clone> Clone for IntrusiveTree<T, G, C> {
    fn clone(&self) -> Self {
        IntrusiveTree::new(self.compare.clone())
    }
}

impl<T, G, C: core::fmt::Debug> core::fmt::Debug for IntrusiveTree<T, G, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntrusiveTree")
            .field("compare", &self.compare)
            .finish()
    }
}

impl<T, G, C: Default> Default for IntrusiveTree<T, G, C> {
    fn default() -> Self {
        IntrusiveTree::new(C::default())
    }
}

impl<T, G, C> IntrusiveTree<T, G, C> {
    /// Creates a tree ordered by `compare`.
    pub const fn new(compare: C) -> Self {
        IntrusiveTree {
            compare,
            _marker: PhantomData,
        }
    }

    /// Returns the comparator.
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// The end position: the sentinel. It is never an element.
    #[inline]
    pub fn end(&self) -> NodeRef {
        NodeRef::Sentinel
    }

    /// Returns the first position in order, or the sentinel if the tree is
    /// empty.
    pub fn begin<S>(&self, store: &S) -> NodeRef
    where
        S: LinkStore<T> + ?Sized,
    {
        first::<T, S>(store)
    }

    /// Returns `true` if no record is linked into the tree.
    pub fn is_empty<S>(&self, store: &S) -> bool
    where
        S: LinkStore<T> + ?Sized,
    {
        store.links(NodeRef::Sentinel).left.is_none()
    }

    /// Returns the first record whose key is not less than `key`, or the
    /// sentinel if there is none.
    pub fn lower_bound<S>(&self, store: &S, key: &G::Key) -> NodeRef
    where
        S: LinkStore<T> + ?Sized,
        G: KeyGetter<S>,
        C: Compare<G::Key>,
    {
        let mut best = NodeRef::Sentinel;
        let mut current = store.links(NodeRef::Sentinel).left;

        while let Some(ptr) = current {
            let node_key = G::get(store, ptr);
            if self.compare.less(node_key, key) {
                current = store.links(NodeRef::Record(ptr)).right;
            } else {
                best = NodeRef::Record(ptr);
                if !self.compare.less(key, node_key) {
                    break;
                }
                current = store.links(NodeRef::Record(ptr)).left;
            }
        }

        best
    }

    /// Returns the first record whose key is strictly greater than `key`, or
    /// the sentinel if there is none.
    pub fn upper_bound<S>(&self, store: &S, key: &G::Key) -> NodeRef
    where
        S: LinkStore<T> + ?Sized,
        G: KeyGetter<S>,
        C: Compare<G::Key>,
    {
        let bound = self.lower_bound(store, key);
        match bound {
            NodeRef::Record(ptr) if self.equivalent(G::get(store, ptr), key) => {
                next::<T, S>(store, bound)
            }
            _ => bound,
        }
    }

    /// Returns the record whose key is equivalent to `key`, or the sentinel.
    pub fn find<S>(&self, store: &S, key: &G::Key) -> NodeRef
    where
        S: LinkStore<T> + ?Sized,
        G: KeyGetter<S>,
        C: Compare<G::Key>,
    {
        match self.lower_bound(store, key) {
            NodeRef::Record(ptr) if self.equivalent(G::get(store, ptr), key) => {
                NodeRef::Record(ptr)
            }
            _ => NodeRef::Sentinel,
        }
    }

    /// Links the record at `node` into the tree.
    ///
    /// Unless `skip_duplicate_check` is set, a record whose key is already
    /// present is rejected: the tree is left untouched and the sentinel is
    /// returned. Otherwise returns the position of the inserted record. Keys
    /// equivalent to an existing key are placed after it.
    ///
    /// `node` must not currently be linked into this tree.
    pub fn insert<S>(&self, store: &mut S, node: Ptr, skip_duplicate_check: bool) -> NodeRef
    where
        S: LinkStore<T> + ?Sized,
        G: KeyGetter<S>,
        C: Compare<G::Key>,
    {
        debug_assert!(
            store.links(NodeRef::Record(node)).is_unlinked(),
            "{node:?} is already linked"
        );

        if !skip_duplicate_check {
            let shared: &S = store;
            if !self.find(shared, G::get(shared, node)).is_sentinel() {
                return NodeRef::Sentinel;
            }
        }

        let mut parent = NodeRef::Sentinel;
        let mut go_left = true;
        let mut current = store.links(NodeRef::Sentinel).left;

        while let Some(ptr) = current {
            parent = NodeRef::Record(ptr);
            let shared: &S = store;
            go_left = self
                .compare
                .less(G::get(shared, node), G::get(shared, ptr));
            let links = store.links(parent);
            current = if go_left { links.left } else { links.right };
        }

        let parent_links = store.links_mut(parent);
        if go_left {
            parent_links.left = Some(node);
        } else {
            parent_links.right = Some(node);
        }
        store.links_mut(NodeRef::Record(node)).parent = Some(parent);

        NodeRef::Record(node)
    }

    /// Unlinks the record at `node` and hands it back to the caller.
    ///
    /// The tree never frees anything; the returned `Ptr` is the caller's to
    /// release. A node with two children is replaced by its in-order
    /// predecessor. All three relations of `node` are cleared.
    pub fn erase<S>(&self, store: &mut S, node: Ptr) -> Ptr
    where
        S: LinkStore<T> + ?Sized,
    {
        let (left, right) = {
            let links = store.links(NodeRef::Record(node));
            (links.left, links.right)
        };

        match (left, right) {
            (Some(left), Some(right)) => {
                let pred = rightmost::<T, S>(store, left);
                if store.links(NodeRef::Record(pred)).parent != Some(NodeRef::Record(node)) {
                    let pred_left = store.links(NodeRef::Record(pred)).left;
                    replace_under_parent::<T, S>(store, pred, pred_left);
                    store.links_mut(NodeRef::Record(pred)).left = Some(left);
                    store.links_mut(NodeRef::Record(left)).parent = Some(NodeRef::Record(pred));
                }
                store.links_mut(NodeRef::Record(pred)).right = Some(right);
                store.links_mut(NodeRef::Record(right)).parent = Some(NodeRef::Record(pred));
                replace_under_parent::<T, S>(store, node, Some(pred));
            }
            (child, None) | (None, child) => replace_under_parent::<T, S>(store, node, child),
        }

        store.links_mut(NodeRef::Record(node)).clear();
        node
    }

    fn equivalent<K: ?Sized>(&self, a: &K, b: &K) -> bool
    where
        C: Compare<K>,
    {
        !(self.compare.less(a, b) || self.compare.less(b, a))
    }
}

/// Returns the leftmost record of the subtree rooted at `from`.
pub fn leftmost<T, S>(store: &S, mut from: Ptr) -> Ptr
where
    S: LinkStore<T> + ?Sized,
{
    while let Some(left) = store.links(NodeRef::Record(from)).left {
        from = left;
    }
    from
}

/// Returns the rightmost record of the subtree rooted at `from`.
pub fn rightmost<T, S>(store: &S, mut from: Ptr) -> Ptr
where
    S: LinkStore<T> + ?Sized,
{
    while let Some(right) = store.links(NodeRef::Record(from)).right {
        from = right;
    }
    from
}

/// Returns the first record of the tree, or the sentinel if it is empty.
pub fn first<T, S>(store: &S) -> NodeRef
where
    S: LinkStore<T> + ?Sized,
{
    match store.links(NodeRef::Sentinel).left {
        Some(root) => NodeRef::Record(leftmost::<T, S>(store, root)),
        None => NodeRef::Sentinel,
    }
}

/// Returns the last record of the tree, or the sentinel if it is empty.
pub fn last<T, S>(store: &S) -> NodeRef
where
    S: LinkStore<T> + ?Sized,
{
    match store.links(NodeRef::Sentinel).left {
        Some(root) => NodeRef::Record(rightmost::<T, S>(store, root)),
        None => NodeRef::Sentinel,
    }
}

/// Steps to the in-order successor of `node`.
///
/// The successor of the last record is the sentinel. Stepping forward from
/// the sentinel stays at the sentinel.
pub fn next<T, S>(store: &S, node: NodeRef) -> NodeRef
where
    S: LinkStore<T> + ?Sized,
{
    let NodeRef::Record(mut ptr) = node else {
        return NodeRef::Sentinel;
    };

    if let Some(right) = store.links(node).right {
        return NodeRef::Record(leftmost::<T, S>(store, right));
    }

    loop {
        match store.links(NodeRef::Record(ptr)).parent {
            Some(NodeRef::Record(parent))
                if store.links(NodeRef::Record(parent)).right == Some(ptr) =>
            {
                ptr = parent;
            }
            Some(parent) => return parent,
            None => return NodeRef::Sentinel,
        }
    }
}

/// Steps to the in-order predecessor of `node`.
///
/// The predecessor of the sentinel is the last record. Stepping back from the
/// first record yields the sentinel.
pub fn prev<T, S>(store: &S, node: NodeRef) -> NodeRef
where
    S: LinkStore<T> + ?Sized,
{
    let NodeRef::Record(mut ptr) = node else {
        return last::<T, S>(store);
    };

    if let Some(left) = store.links(node).left {
        return NodeRef::Record(rightmost::<T, S>(store, left));
    }

    loop {
        match store.links(NodeRef::Record(ptr)).parent {
            Some(NodeRef::Record(parent))
                if store.links(NodeRef::Record(parent)).left == Some(ptr) =>
            {
                ptr = parent;
            }
            Some(NodeRef::Record(parent)) => return NodeRef::Record(parent),
            Some(NodeRef::Sentinel) | None => return NodeRef::Sentinel,
        }
    }
}
