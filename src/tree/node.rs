use super::RbTree;

/// Index standing in for an absent node.
///
/// Used for missing children, the parent of the root, and both ends of the
/// ordered list. It never addresses a slot, so reads through it go via the
/// `get_*` accessors which return constants instead of touching the arena.
pub(crate) const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// A node of the tree holding one item plus its tree and list links.
///
/// `left`, `right` and `parent` describe the tree shape. `prev` and `next`
/// thread the same nodes in sorted order; they only mirror the shape and
/// never decide which slots are live.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// The stored item
    pub(crate) item: T,

    /// Color of this node (Red or Black) used for Red-Black tree balancing
    pub(crate) color: Color,

    /// Index of parent node in the arena (NIL if this is root)
    pub(crate) parent: usize,

    /// Index of left child node in the arena (NIL if no left child)
    pub(crate) left: usize,

    /// Index of right child node in the arena (NIL if no right child)
    pub(crate) right: usize,

    /// Index of the in-order predecessor (NIL for the first node)
    pub(crate) prev: usize,

    /// Index of the in-order successor (NIL for the last node)
    pub(crate) next: usize,
}

/// One arena cell; vacant cells are listed in the tree's free list.
#[derive(Debug, Clone)]
pub(crate) enum Slot<T> {
    Occupied(Node<T>),
    Vacant,
}

/// Handle to a node stored in an [`RbTree`].
///
/// A handle keeps naming the same item until that item is removed, even when
/// removals elsewhere move its node around inside the tree. Once the item is
/// removed the slot may be handed out again to a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the arena index behind this handle
    ///
    /// # Returns
    ///
    /// * `usize` - The slot index of the node
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl<T, O> RbTree<T, O> {
    /// Places `item` in a free slot as a detached red node.
    pub(crate) fn allocate_node(&mut self, item: T, parent: usize) -> usize {
        let node = Node {
            item,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
            prev: NIL,
            next: NIL,
        };

        match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    /// Vacates the slot at `node_idx` and hands back its item.
    pub(crate) fn deallocate_node(&mut self, node_idx: usize) -> T {
        match core::mem::replace(&mut self.slots[node_idx], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free_list.push(node_idx);
                node.item
            }
            Slot::Vacant => unreachable!("slot {node_idx} freed twice"),
        }
    }

    /// Returns the node at `idx` if the slot is live.
    #[inline]
    pub(crate) fn try_node(&self, idx: usize) -> Option<&Node<T>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: usize) -> &Node<T> {
        match &self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("link to vacant slot {idx}"),
        }
    }

    #[inline]
    pub(crate) fn node_at_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("link to vacant slot {idx}"),
        }
    }

    #[inline]
    pub(crate) fn get_color(&self, node_idx: usize) -> Color {
        if node_idx == NIL {
            Color::Black
        } else {
            self.node_at(node_idx).color
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, node_idx: usize, color: Color) {
        if node_idx != NIL {
            self.node_at_mut(node_idx).color = color;
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Black
    }

    #[inline]
    pub(crate) fn get_parent(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).parent
        }
    }

    #[inline]
    pub(crate) fn get_left(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).left
        }
    }

    #[inline]
    pub(crate) fn get_right(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).right
        }
    }

    /// Sets the parent link of `node` unless it is the sentinel.
    #[inline]
    pub(crate) fn set_parent(&mut self, node: usize, parent: usize) {
        if node != NIL {
            self.node_at_mut(node).parent = parent;
        }
    }
}
