use crate::order::Order;

use super::{Color, NIL, NodeId, Occupied, RbTree};

impl<T, O: Order<T>> RbTree<T, O> {
    /// Inserts an item
    ///
    /// Items are unique: if an equal item is already stored the tree is left
    /// untouched and the existing node is reported instead. To replace an item,
    /// remove the old one first.
    ///
    /// # Arguments
    ///
    /// * `item` - The item to insert
    ///
    /// # Returns
    ///
    /// * `Result<NodeId, Occupied<T>>` - Handle of the new node, or the existing
    ///   equal node together with the rejected item
    pub fn insert(&mut self, item: T) -> Result<NodeId, Occupied<T>> {
        let mut parent = NIL;
        let mut current = self.root;
        let mut is_left = false;

        while current != NIL {
            parent = current;
            let node = self.node_at(current);
            if O::less(&item, &node.item) {
                is_left = true;
                current = node.left;
            } else if O::less(&node.item, &item) {
                is_left = false;
                current = node.right;
            } else {
                return Err(Occupied {
                    node: NodeId(current),
                    item,
                });
            }
        }

        let new_idx = self.allocate_node(item, parent);
        self.link_to_parent(new_idx, parent, is_left);
        self.len += 1;

        self.fix_insertion_violations(new_idx);
        self.link_into_list(new_idx);

        tracing::trace!(index = new_idx, len = self.len, "inserted node");

        #[cfg(all(debug_assertions, feature = "validate"))]
        self.debug_check("insertion");

        Ok(NodeId(new_idx))
    }
}

impl<T, O> RbTree<T, O> {
    fn link_to_parent(&mut self, node_idx: usize, parent_idx: usize, is_left: bool) {
        if parent_idx == NIL {
            self.root = node_idx;
        } else if is_left {
            self.node_at_mut(parent_idx).left = node_idx;
        } else {
            self.node_at_mut(parent_idx).right = node_idx;
        }
    }

    /// Restores the color rules after a red leaf was attached at `node`.
    ///
    /// The only possible violation on each pass is `node` and its parent both
    /// being red.
    fn fix_insertion_violations(&mut self, mut node: usize) {
        while self.is_red(self.get_parent(node)) {
            let parent = self.get_parent(node);
            let grandparent = self.get_parent(parent);

            if parent == self.get_left(grandparent) {
                let uncle = self.get_right(grandparent);

                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.get_left(grandparent);

                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        self.set_color(self.root, Color::Black);
    }

    /// Threads a freshly placed node into the sorted list.
    ///
    /// Must run once the shape is final. The node is not in the list yet, so
    /// its successor's `prev` (or `last` when it has none) is its predecessor.
    fn link_into_list(&mut self, node_idx: usize) {
        let next = self.successor(node_idx);
        let prev = if next == NIL {
            self.last
        } else {
            self.node_at(next).prev
        };

        let node = self.node_at_mut(node_idx);
        node.prev = prev;
        node.next = next;

        if next == NIL {
            self.last = node_idx;
        } else {
            self.node_at_mut(next).prev = node_idx;
        }

        if prev == NIL {
            self.first = node_idx;
        } else {
            self.node_at_mut(prev).next = node_idx;
        }
    }
}
