use core::iter::FusedIterator;

use super::{NIL, RbTree};

/// Iterator over the items of an [`RbTree`] in sorted order.
///
/// Follows the cached `next`/`prev` links, so each step is O(1) and both ends
/// can be consumed.
#[derive(Debug)]
pub struct Iter<'a, T, O> {
    tree: &'a RbTree<T, O>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T, O> Iter<'a, T, O> {
    pub(crate) fn new(tree: &'a RbTree<T, O>) -> Self {
        Self {
            tree,
            front: tree.first,
            back: tree.last,
            remaining: tree.len,
        }
    }
}

impl<T, O> Clone for Iter<'_, T, O> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, O> Iterator for Iter<'a, T, O> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 || self.front == NIL {
            return None;
        }

        let node = self.tree.node_at(self.front);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, O> DoubleEndedIterator for Iter<'a, T, O> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 || self.back == NIL {
            return None;
        }

        let node = self.tree.node_at(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.item)
    }
}

impl<T, O> ExactSizeIterator for Iter<'_, T, O> {}

impl<T, O> FusedIterator for Iter<'_, T, O> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::RbTree;

    #[test]
    fn test_iter_empty() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn test_iter_both_ends_meet() {
        let tree: RbTree<i32> = [4, 2, 6, 1, 3, 5].into_iter().collect();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_rev_and_into_iter() {
        let tree: RbTree<char> = "hello".chars().collect();
        assert_eq!(tree.iter().rev().collect::<Vec<_>>(), vec![&'o', &'l', &'h', &'e']);

        let mut seen = Vec::new();
        for c in &tree {
            seen.push(*c);
        }
        assert_eq!(seen, vec!['e', 'h', 'l', 'o']);
    }
}
