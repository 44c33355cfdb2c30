use crate::order::Order;

use super::{NIL, NodeId, RbTree};

impl<T, O> RbTree<T, O> {
    /// Returns the leftmost node of the subtree rooted at `node`.
    pub(crate) fn find_minimum(&self, mut node: usize) -> usize {
        while node != NIL {
            let left = self.node_at(node).left;
            if left == NIL {
                break;
            }
            node = left;
        }
        node
    }

    /// Returns the rightmost node of the subtree rooted at `node`.
    #[cfg(any(test, feature = "validate"))]
    pub(crate) fn find_maximum(&self, mut node: usize) -> usize {
        while node != NIL {
            let right = self.node_at(node).right;
            if right == NIL {
                break;
            }
            node = right;
        }
        node
    }

    /// In-order successor found through the tree shape, NIL for the maximum.
    ///
    /// Only insertion needs this; everything else follows the cached `next` link.
    pub(crate) fn successor(&self, mut node: usize) -> usize {
        if node == NIL {
            return NIL;
        }

        let right = self.node_at(node).right;
        if right != NIL {
            return self.find_minimum(right);
        }

        let mut parent = self.node_at(node).parent;
        while parent != NIL && node == self.node_at(parent).right {
            node = parent;
            parent = self.node_at(parent).parent;
        }
        parent
    }

    #[inline]
    fn to_handle(idx: usize) -> Option<NodeId> {
        (idx != NIL).then_some(NodeId(idx))
    }

    /// Returns the node holding the smallest item in O(1)
    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        Self::to_handle(self.first)
    }

    /// Returns the node holding the largest item in O(1)
    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        Self::to_handle(self.last)
    }

    /// Returns the node that follows `id` in sorted order
    ///
    /// # Arguments
    ///
    /// * `id` - Handle of a live node
    ///
    /// # Returns
    ///
    /// * `Option<NodeId>` - The next node, or `None` if `id` is the last node or not live
    #[inline]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.try_node(id.0).and_then(|node| Self::to_handle(node.next))
    }

    /// Returns the node that precedes `id` in sorted order
    ///
    /// # Arguments
    ///
    /// * `id` - Handle of a live node
    ///
    /// # Returns
    ///
    /// * `Option<NodeId>` - The previous node, or `None` if `id` is the first node or not live
    #[inline]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.try_node(id.0).and_then(|node| Self::to_handle(node.prev))
    }
}

impl<T, O: Order<T>> RbTree<T, O> {
    /// Descends from the root looking for a node equal to `item`, NIL if absent.
    pub(crate) fn search(&self, item: &T) -> usize {
        let mut current = self.root;

        while current != NIL {
            let node = self.node_at(current);
            if O::less(&node.item, item) {
                current = node.right;
            } else if O::less(item, &node.item) {
                current = node.left;
            } else {
                break;
            }
        }
        current
    }

    /// Finds the node holding an item equal to `item`
    ///
    /// # Arguments
    ///
    /// * `item` - The item to look up
    ///
    /// # Returns
    ///
    /// * `Option<NodeId>` - Handle of the matching node, if any
    #[inline]
    pub fn get(&self, item: &T) -> Option<NodeId> {
        Self::to_handle(self.search(item))
    }

    /// Returns true if an item equal to `item` is stored
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.search(item) != NIL
    }
}
