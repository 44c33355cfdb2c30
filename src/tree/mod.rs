use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Index;

use crate::order::{Natural, Order};

mod insert;
mod iter;
mod node;
mod query;
mod remove;
mod rotate;

pub use iter::Iter;
pub use node::NodeId;

pub(crate) use node::{Color, NIL, Slot};

/// A Red-Black tree whose nodes are also threaded into a sorted doubly linked list.
///
/// Insertion, removal and lookup take O(log n). Stepping to the first, last,
/// next or previous node is O(1) because every node caches its in-order
/// neighbours, and those links are repaired on every structural change.
///
/// Nodes live in an arena and refer to each other by index; the index
/// `NIL` plays the part of the shared black sentinel. Items are unique
/// under the order policy `O`: inserting an item equal to a stored one leaves
/// the tree untouched.
///
/// Key features:
/// - Stable [`NodeId`] handles for O(1) neighbour walks and removal without a search
/// - Slot reuse through an internal free list
/// - Compile-time order policy, see [`Order`]
#[derive(Debug, Clone)]
pub struct RbTree<T, O = Natural> {
    /// Arena of nodes, addressed by index
    pub(crate) slots: Vec<Slot<T>>,

    /// Stack of vacant slot indices, reused before the arena grows
    pub(crate) free_list: Vec<usize>,

    /// Number of items currently stored in the tree
    pub(crate) len: usize,

    /// Index of the root node, NIL when the tree is empty
    pub(crate) root: usize,

    /// Index of the smallest node, NIL when the tree is empty
    pub(crate) first: usize,

    /// Index of the largest node, NIL when the tree is empty
    pub(crate) last: usize,

    _order: PhantomData<O>,
}

/// Returned by [`RbTree::insert`] when an equal item is already stored.
///
/// The tree is left unchanged; the rejected item is handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupied<T> {
    /// Handle of the node already holding an equal item
    pub node: NodeId,
    /// The item that was not inserted
    pub item: T,
}

impl<T, O> RbTree<T, O> {
    /// Creates an empty tree.
    ///
    /// # Returns
    ///
    /// * `Self` - The `RbTree` instance
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            root: NIL,
            first: NIL,
            last: NIL,
            _order: PhantomData,
        }
    }

    /// Creates an empty tree with room for `capacity` items before the arena grows.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of nodes to pre-allocate
    ///
    /// # Returns
    ///
    /// * `Self` - The `RbTree` instance
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Returns the number of items stored in the tree
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no items
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of items the tree can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Removes every item, keeping the allocated arena for reuse.
    ///
    /// Every outstanding [`NodeId`] becomes stale.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
        self.root = NIL;
        self.first = NIL;
        self.last = NIL;

        tracing::trace!("tree reset");
    }

    /// Returns the item behind a handle
    ///
    /// # Arguments
    ///
    /// * `id` - Handle obtained from this tree
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The item, or `None` if the handle does not name a live node
    #[inline]
    pub fn item(&self, id: NodeId) -> Option<&T> {
        self.try_node(id.0).map(|node| &node.item)
    }

    /// Returns the smallest item
    #[inline]
    pub fn min(&self) -> Option<&T> {
        self.try_node(self.first).map(|node| &node.item)
    }

    /// Returns the largest item
    #[inline]
    pub fn max(&self) -> Option<&T> {
        self.try_node(self.last).map(|node| &node.item)
    }

    /// Returns an iterator over the items in ascending order
    pub fn iter(&self) -> Iter<'_, T, O> {
        Iter::new(self)
    }
}

impl<T, O> Default for RbTree<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> Index<NodeId> for RbTree<T, O> {
    type Output = T;

    /// Panics if `id` does not name a live node.
    fn index(&self, id: NodeId) -> &T {
        match self.item(id) {
            Some(item) => item,
            None => panic!("invalid node handle {}", id.index()),
        }
    }
}

impl<T, O: Order<T>> Extend<T> for RbTree<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.insert(item);
        }
    }
}

impl<T, O: Order<T>> FromIterator<T> for RbTree<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, O> IntoIterator for &'a RbTree<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
