use crate::order::Order;

use super::{Color, NIL, NodeId, RbTree};

impl<T, O: Order<T>> RbTree<T, O> {
    /// Removes the item equal to `item`
    ///
    /// # Arguments
    ///
    /// * `item` - The item to look up
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The stored item, or `None` if no equal item was found
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let node_idx = self.search(item);
        if node_idx == NIL {
            return None;
        }
        Some(self.remove_checked(node_idx))
    }

    /// Removes the node behind a handle without searching for it
    ///
    /// # Arguments
    ///
    /// * `id` - Handle obtained from an earlier insertion or lookup
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The stored item, or `None` if the handle does not name a live node
    pub fn remove_node(&mut self, id: NodeId) -> Option<T> {
        self.try_node(id.0)?;
        Some(self.remove_checked(id.0))
    }

    /// Removes and returns the smallest item
    pub fn pop_first(&mut self) -> Option<T> {
        if self.first == NIL {
            return None;
        }
        Some(self.remove_checked(self.first))
    }

    /// Removes and returns the largest item
    pub fn pop_last(&mut self) -> Option<T> {
        if self.last == NIL {
            return None;
        }
        Some(self.remove_checked(self.last))
    }

    fn remove_checked(&mut self, node_idx: usize) -> T {
        let item = self.delete_node(node_idx);

        #[cfg(all(debug_assertions, feature = "validate"))]
        self.debug_check("removal");

        item
    }
}

impl<T, O> RbTree<T, O> {
    fn delete_node(&mut self, node_to_delete: usize) -> T {
        self.unlink_from_list(node_to_delete);

        let (removed_color, fixup_node, fixup_parent) = self.perform_deletion(node_to_delete);
        if removed_color == Color::Black {
            self.fix_deletion_violations(fixup_node, fixup_parent);
        }

        self.len -= 1;
        tracing::trace!(index = node_to_delete, len = self.len, "removed node");

        self.deallocate_node(node_to_delete)
    }

    /// Joins the list neighbours of `node_idx` to each other.
    fn unlink_from_list(&mut self, node_idx: usize) {
        let node = self.node_at(node_idx);
        let (prev, next) = (node.prev, node.next);

        if next == NIL {
            self.last = prev;
        } else {
            self.node_at_mut(next).prev = prev;
        }

        if prev == NIL {
            self.first = next;
        } else {
            self.node_at_mut(prev).next = next;
        }
    }

    /// Detaches `node` from the tree shape.
    ///
    /// With two children the successor node itself moves into `node`'s place
    /// and takes over its color, so handles to the successor stay valid.
    ///
    /// Returns the color that left the tree together with the node that took
    /// its position and that node's parent. The parent is reported separately
    /// because the replacement may be the sentinel.
    fn perform_deletion(&mut self, node: usize) -> (Color, usize, usize) {
        let color = self.get_color(node);
        let left = self.node_at(node).left;
        let right = self.node_at(node).right;

        if left == NIL {
            let parent = self.node_at(node).parent;
            self.transplant(node, right);
            return (color, right, parent);
        }

        if right == NIL {
            let parent = self.node_at(node).parent;
            self.transplant(node, left);
            return (color, left, parent);
        }

        let successor = self.find_minimum(right);
        let successor_color = self.get_color(successor);
        let fixup_node = self.node_at(successor).right;

        let fixup_parent = if self.node_at(successor).parent == node {
            successor
        } else {
            let parent = self.node_at(successor).parent;
            self.transplant(successor, fixup_node);
            self.node_at_mut(successor).right = right;
            self.node_at_mut(right).parent = successor;
            parent
        };

        self.transplant(node, successor);
        self.node_at_mut(successor).left = left;
        self.node_at_mut(left).parent = successor;
        self.node_at_mut(successor).color = color;

        (successor_color, fixup_node, fixup_parent)
    }

    /// Restores the black height after a black node left the tree.
    ///
    /// `node` carries an extra black and may be the sentinel, so its parent is
    /// tracked in `parent` instead of being read from the node.
    fn fix_deletion_violations(&mut self, mut node: usize, mut parent: usize) {
        while node != self.root && self.is_black(node) {
            if node != NIL {
                parent = self.node_at(node).parent;
            }

            if node == self.get_left(parent) {
                let mut sibling = self.get_right(parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.get_right(parent);
                }

                if self.is_black(self.get_left(sibling)) && self.is_black(self.get_right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.get_right(sibling)) {
                        self.set_color(self.get_left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.get_right(parent);
                    }

                    self.set_color(sibling, self.get_color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.get_right(sibling), Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.get_left(parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.get_left(parent);
                }

                if self.is_black(self.get_right(sibling)) && self.is_black(self.get_left(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.get_left(sibling)) {
                        self.set_color(self.get_right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.get_left(parent);
                    }

                    self.set_color(sibling, self.get_color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.get_left(sibling), Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        self.set_color(node, Color::Black);
    }
}
