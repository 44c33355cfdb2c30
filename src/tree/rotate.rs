use super::{NIL, RbTree};

impl<T, O> RbTree<T, O> {
    /// Points whatever referenced `old` (its parent's child slot, or the root)
    /// at `new` instead.
    #[inline]
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.node_at(parent).left == old {
            self.node_at_mut(parent).left = new;
        } else {
            self.node_at_mut(parent).right = new;
        }
    }

    /// Lifts the right child of `pivot` into its place.
    ///
    /// ```text
    ///     pivot              child
    ///     /   \              /   \
    ///    a   child   =>   pivot   c
    ///        /   \        /   \
    ///       b     c      a     b
    /// ```
    ///
    /// Colors and list links are untouched. Does nothing if `pivot` has no
    /// right child.
    pub(crate) fn rotate_left(&mut self, pivot: usize) {
        let child = self.get_right(pivot);
        if child == NIL {
            return;
        }

        let inner = self.node_at(child).left;
        self.node_at_mut(pivot).right = inner;
        self.set_parent(inner, pivot);

        let parent = self.node_at(pivot).parent;
        self.node_at_mut(child).parent = parent;
        self.replace_child(parent, pivot, child);

        self.node_at_mut(child).left = pivot;
        self.node_at_mut(pivot).parent = child;
    }

    /// Mirror image of [`Self::rotate_left`]: lifts the left child of `pivot`
    /// into its place.
    pub(crate) fn rotate_right(&mut self, pivot: usize) {
        let child = self.get_left(pivot);
        if child == NIL {
            return;
        }

        let inner = self.node_at(child).right;
        self.node_at_mut(pivot).left = inner;
        self.set_parent(inner, pivot);

        let parent = self.node_at(pivot).parent;
        self.node_at_mut(child).parent = parent;
        self.replace_child(parent, pivot, child);

        self.node_at_mut(child).right = pivot;
        self.node_at_mut(pivot).parent = child;
    }

    /// Puts `new` where `old` hangs in the tree, leaving `old`'s own links alone.
    pub(crate) fn transplant(&mut self, old: usize, new: usize) {
        let parent = self.node_at(old).parent;
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }
}
