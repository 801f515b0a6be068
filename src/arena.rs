use alloc::vec::Vec;
use core::ops::Index;
use core::ops::IndexMut;

use crate::Ptr;
use crate::intrusive_tree::KeyGetter;
use crate::node::DualLinks;
use crate::node::LinkStore;
use crate::node::Links;
use crate::node::NodeRef;
use crate::node::TreeTag;

#[cold]
#[inline(never)]
fn assert_free() -> ! {
    panic!("Attempted to access data of free slot");
}

/// One stored pair, linked into both trees through its two link sets.
#[derive(Debug)]
pub struct PairRecord<L, R> {
    pub(crate) links: DualLinks,
    pub(crate) left: L,
    pub(crate) right: R,
}

impl<L, R> PairRecord<L, R> {
    fn new(left: L, right: R) -> Self {
        PairRecord {
            links: DualLinks::new(),
            left,
            right,
        }
    }

    pub(crate) fn into_pair(self) -> (L, R) {
        (self.left, self.right)
    }
}

#[derive(Debug)]
enum Slot<L, R> {
    Free { next_free: Option<Ptr> },
    Occupied(PairRecord<L, R>),
}

impl<L, R> Slot<L, R> {
    fn record(&self) -> &PairRecord<L, R> {
        match self {
            Slot::Occupied(record) => record,
            Slot::Free { .. } => assert_free(),
        }
    }

    fn record_mut(&mut self) -> &mut PairRecord<L, R> {
        match self {
            Slot::Occupied(record) => record,
            Slot::Free { .. } => assert_free(),
        }
    }
}

/// Owns every pair record of a map, plus both tree sentinels.
///
/// Freed slots are threaded onto a free list and reused by later
/// allocations, so a [`Ptr`] is stable for as long as its record lives.
#[derive(Debug)]
pub struct Arena<L, R> {
    slots: Vec<Slot<L, R>>,
    free_head: Option<Ptr>,
    // Keyless anchor of both trees; each root is the left child of its links.
    sentinel: DualLinks,
}

impl<L, R> Arena<L, R> {
    pub(crate) fn new() -> Self {
        Arena::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            sentinel: DualLinks::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.sentinel = DualLinks::new();
    }

    pub(crate) fn alloc(&mut self, left: L, right: R) -> Ptr {
        let record = Slot::Occupied(PairRecord::new(left, right));
        match self.free_head {
            Some(ptr) => {
                let old = core::mem::replace(&mut self.slots[ptr.unchecked_get()], record);
                self.free_head = match old {
                    Slot::Free { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                ptr
            }
            None => {
                let ptr = Ptr::unchecked_from(self.slots.len());
                self.slots.push(record);
                ptr
            }
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(
            self.slots.get(ptr.unchecked_get()),
            Some(Slot::Occupied(_))
        )
    }

    /// Releases the slot at `ptr` and returns its record. The record must
    /// already be unlinked from both trees.
    pub(crate) fn free(&mut self, ptr: Ptr) -> PairRecord<L, R> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        let old = core::mem::replace(
            &mut self.slots[ptr.unchecked_get()],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(ptr);

        let record = match old {
            Slot::Occupied(record) => record,
            Slot::Free { .. } => assert_free(),
        };
        debug_assert!(record.links.is_unlinked());
        record
    }
}

impl<L, R> Index<Ptr> for Arena<L, R> {
    type Output = PairRecord<L, R>;

    fn index(&self, index: Ptr) -> &Self::Output {
        self.slots[index.unchecked_get()].record()
    }
}

impl<L, R> IndexMut<Ptr> for Arena<L, R> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        self.slots[index.unchecked_get()].record_mut()
    }
}

impl<T: TreeTag, L, R> LinkStore<T> for Arena<L, R> {
    fn links(&self, node: NodeRef) -> &Links<T> {
        match node {
            NodeRef::Sentinel => T::select(&self.sentinel),
            NodeRef::Record(ptr) => T::select(&self[ptr].links),
        }
    }

    fn links_mut(&mut self, node: NodeRef) -> &mut Links<T> {
        match node {
            NodeRef::Sentinel => T::select_mut(&mut self.sentinel),
            NodeRef::Record(ptr) => T::select_mut(&mut self[ptr].links),
        }
    }
}

/// Reads the left key of a record.
#[derive(Debug)]
pub struct LeftKey;

impl<L, R> KeyGetter<Arena<L, R>> for LeftKey {
    type Key = L;

    #[inline]
    fn get(store: &Arena<L, R>, node: Ptr) -> &L {
        &store[node].left
    }
}

/// Reads the right key of a record.
#[derive(Debug)]
pub struct RightKey;

impl<L, R> KeyGetter<Arena<L, R>> for RightKey {
    type Key = R;

    #[inline]
    fn get(store: &Arena<L, R>, node: Ptr) -> &R {
        &store[node].right
    }
}
