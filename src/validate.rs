//! Invariant checks for [`RbTree`], compiled for tests and the `validate` feature.

use ahash::RandomState;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::order::Order;
use crate::tree::{NIL, RbTree};

/// A broken tree invariant.
///
/// Every variant points at a bug in the tree itself, never at caller input.
/// Indices are arena slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The root is red
    #[error("root node {0} is red")]
    RedRoot(usize),

    /// The root has a parent
    #[error("root node {0} has a parent")]
    RootHasParent(usize),

    /// A child does not point back at its parent
    #[error("node {0} does not point back at its parent")]
    BrokenParent(usize),

    /// A red node has a red child
    #[error("red node {0} has a red child")]
    RedChild(usize),

    /// Root to leaf paths disagree on their black count
    #[error("path through node {node} has black height {found}, expected {expected}")]
    BlackHeight {
        /// Node whose missing child ends the offending path
        node: usize,
        /// Black count of the first path seen
        expected: usize,
        /// Black count of the offending path
        found: usize,
    },

    /// An item does not sort strictly after its in-order predecessor
    #[error("node {0} is not greater than its predecessor")]
    OutOfOrder(usize),

    /// A list link disagrees with the in-order sequence
    #[error("list links of node {0} disagree with the tree order")]
    ListMismatch(usize),

    /// The cached list endpoints are not the tree's extremes
    #[error("first/last do not match the tree's extremes")]
    Endpoints,

    /// A node is reachable twice
    #[error("node {0} is reachable twice")]
    Cycle(usize),

    /// The stored length disagrees with the reachable node count
    #[error("length is {expected} but {found} nodes are reachable")]
    Count {
        /// The tree's stored length
        expected: usize,
        /// Nodes reachable from the root
        found: usize,
    },
}

impl<T, O> RbTree<T, O> {
    /// Visits every node in sorted order without recursion
    ///
    /// `visit` receives the node's arena index and the number of black nodes
    /// on the path from the root down to and including it. Stops at the first
    /// error, and reports a [`Violation::Cycle`] if a node is reached twice.
    ///
    /// # Arguments
    ///
    /// * `visit` - Callback run once per node
    ///
    /// # Returns
    ///
    /// * `Result<(), Violation>` - The first error raised by `visit` or the walk
    pub fn walk_in_order<F>(&self, mut visit: F) -> Result<(), Violation>
    where
        F: FnMut(usize, usize) -> Result<(), Violation>,
    {
        let mut seen: HashSet<usize, RandomState> = HashSet::with_hasher(RandomState::default());
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut current = self.root;
        let mut depth = 0;

        loop {
            while current != NIL {
                if !seen.insert(current) {
                    return Err(Violation::Cycle(current));
                }
                depth += usize::from(self.is_black(current));
                stack.push((current, depth));
                current = self.get_left(current);
            }

            let Some((node, node_depth)) = stack.pop() else {
                return Ok(());
            };
            visit(node, node_depth)?;

            current = self.get_right(node);
            depth = node_depth;
        }
    }
}

impl<T, O: Order<T>> RbTree<T, O> {
    /// Checks every tree invariant
    ///
    /// Verifies parent links, the color rules, equal black height on every
    /// path, strictly increasing items, agreement of the `prev`/`next` list
    /// with the in-order sequence, the cached endpoints, and the length.
    ///
    /// # Returns
    ///
    /// * `Result<usize, Violation>` - The black height of the tree, or the first broken invariant
    pub fn validate(&self) -> Result<usize, Violation> {
        if self.root != NIL {
            if self.is_red(self.root) {
                return Err(Violation::RedRoot(self.root));
            }
            if self.get_parent(self.root) != NIL {
                return Err(Violation::RootHasParent(self.root));
            }
        }

        let mut black_height = None;
        let mut previous = NIL;
        let mut count = 0;

        self.walk_in_order(|idx, depth| {
            let node = self.node_at(idx);

            for child in [node.left, node.right] {
                if child == NIL {
                    match black_height {
                        None => black_height = Some(depth),
                        Some(expected) if expected != depth => {
                            return Err(Violation::BlackHeight {
                                node: idx,
                                expected,
                                found: depth,
                            });
                        }
                        Some(_) => {}
                    }
                } else {
                    if self.get_parent(child) != idx {
                        return Err(Violation::BrokenParent(child));
                    }
                    if self.is_red(idx) && self.is_red(child) {
                        return Err(Violation::RedChild(idx));
                    }
                }
            }

            if node.prev != previous {
                return Err(Violation::ListMismatch(idx));
            }
            if previous != NIL {
                let before = self.node_at(previous);
                if before.next != idx {
                    return Err(Violation::ListMismatch(previous));
                }
                if !O::less(&before.item, &node.item) {
                    return Err(Violation::OutOfOrder(idx));
                }
            } else if self.first != idx {
                return Err(Violation::Endpoints);
            }

            previous = idx;
            count += 1;
            Ok(())
        })?;

        if self.last != previous
            || self.get_next(previous) != NIL
            || self.first != self.find_minimum(self.root)
            || self.last != self.find_maximum(self.root)
        {
            return Err(Violation::Endpoints);
        }
        if count != self.len {
            return Err(Violation::Count {
                expected: self.len,
                found: count,
            });
        }

        Ok(black_height.unwrap_or(0))
    }

    /// Panics with the broken invariant if [`Self::validate`] fails
    pub fn assert_valid(&self) {
        if let Err(violation) = self.validate() {
            panic!("red-black tree invariant violated: {violation}");
        }
    }

    #[cfg(all(debug_assertions, feature = "validate"))]
    pub(crate) fn debug_check(&self, operation: &str) {
        if let Err(violation) = self.validate() {
            panic!("red-black tree invariant violated after {operation}: {violation}");
        }
    }

    fn get_next(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).next
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::*;
    use crate::tree::Color;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    }

    fn corrupt_color(tree: &mut RbTree<i32>, item: i32, color: Color) {
        let idx = tree.search(&item);
        tree.node_at_mut(idx).color = color;
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_black_height_of_small_trees() {
        let tree: RbTree<i32> = [1].into_iter().collect();
        assert_eq!(tree.validate(), Ok(1));

        let tree: RbTree<i32> = (1..=7).collect();
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        corrupt_color(&mut tree, 2, Color::Red);
        assert_eq!(tree.validate(), Err(Violation::RedRoot(tree.root)));
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        corrupt_color(&mut tree, 1, Color::Black);
        assert!(matches!(
            tree.validate(),
            Err(Violation::BlackHeight { .. })
        ));
    }

    #[test]
    fn test_detects_red_red() {
        let mut tree: RbTree<i32> = [2, 1, 3, 4].into_iter().collect();
        corrupt_color(&mut tree, 3, Color::Red);
        corrupt_color(&mut tree, 1, Color::Red);
        assert_eq!(tree.validate(), Err(Violation::RedChild(tree.search(&3))));
    }

    #[test]
    fn test_detects_broken_list() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        let one = tree.search(&1);
        let three = tree.search(&3);
        tree.node_at_mut(one).next = three;
        assert_eq!(tree.validate(), Err(Violation::ListMismatch(one)));
    }

    #[test]
    fn test_detects_out_of_order_items() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        let one = tree.search(&1);
        tree.node_at_mut(one).item = 5;
        assert_eq!(tree.validate(), Err(Violation::OutOfOrder(tree.search(&2))));
    }

    #[test]
    fn test_detects_cycle() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        let root = tree.root;
        let three = tree.search(&3);
        tree.node_at_mut(three).left = root;
        assert_eq!(tree.validate(), Err(Violation::Cycle(root)));
    }

    #[test]
    fn test_detects_count_mismatch() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        tree.len = 4;
        assert_eq!(
            tree.validate(),
            Err(Violation::Count {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn test_assert_valid_panics() {
        let mut tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
        tree.last = tree.first;
        tree.assert_valid();
    }

    #[test]
    fn test_random_workload_against_sorted_set() {
        init_tracing();

        const COUNT: i32 = 1000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut values: Vec<i32> = (0..COUNT).map(|i| (i * 7) % (COUNT * 7 / 10)).collect();
        values.shuffle(&mut rng);

        let mut tree = RbTree::<i32>::new();
        let mut expected = alloc::collections::BTreeSet::new();

        for &value in &values {
            let fresh = expected.insert(value);
            match tree.insert(value) {
                Ok(id) => {
                    assert!(fresh);
                    assert_eq!(tree[id], value);
                }
                Err(occupied) => {
                    assert!(!fresh);
                    assert_eq!(tree[occupied.node], value);
                }
            }
            assert_eq!(tree.len(), expected.len());
            tree.assert_valid();
        }

        assert!(tree.iter().eq(expected.iter()));

        for value in 0..COUNT {
            assert_eq!(tree.get(&value).is_some(), expected.contains(&value));
        }

        values.shuffle(&mut rng);
        for &value in &values {
            let was_present = expected.remove(&value);
            assert_eq!(tree.remove(&value), was_present.then_some(value));
            assert_eq!(tree.len(), expected.len());
            tree.assert_valid();
        }
        assert!(tree.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16),
        Remove(u16),
        RemoveHandle(u16),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u16>().prop_map(|v| Op::Insert(v % 512)),
            2 => any::<u16>().prop_map(|v| Op::Remove(v % 512)),
            1 => any::<u16>().prop_map(|v| Op::RemoveHandle(v % 512)),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut tree = RbTree::<u16>::new();
            let mut expected = alloc::collections::BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(v) => {
                        let fresh = expected.insert(v);
                        prop_assert_eq!(tree.insert(v).is_ok(), fresh);
                    }
                    Op::Remove(v) => {
                        let present = expected.remove(&v);
                        prop_assert_eq!(tree.remove(&v), present.then_some(v));
                    }
                    Op::RemoveHandle(v) => {
                        if let Some(id) = tree.get(&v) {
                            expected.remove(&v);
                            prop_assert_eq!(tree.remove_node(id), Some(v));
                        }
                    }
                    Op::PopFirst => {
                        prop_assert_eq!(tree.pop_first(), expected.pop_first());
                    }
                    Op::PopLast => {
                        prop_assert_eq!(tree.pop_last(), expected.pop_last());
                    }
                }

                prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
                prop_assert_eq!(tree.len(), expected.len());
                prop_assert!(tree.iter().eq(expected.iter()));
                prop_assert!(tree.iter().rev().eq(expected.iter().rev()));
            }
        }

        #[test]
        fn prop_insert_then_remove_round_trips(
            values in prop::collection::btree_set(any::<i32>(), 0..200),
            extra in any::<i32>(),
        ) {
            let mut tree: RbTree<i32> = values.iter().copied().collect();
            let before: Vec<i32> = tree.iter().copied().collect();

            if tree.insert(extra).is_ok() {
                prop_assert_eq!(tree.remove(&extra), Some(extra));
            }
            prop_assert_eq!(tree.len(), values.len());
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
            tree.assert_valid();
        }

        #[test]
        fn prop_handles_survive_unrelated_removals(
            values in prop::collection::btree_set(0u32..10_000, 1..200),
            seed in any::<u64>(),
        ) {
            let mut tree = RbTree::<u32>::new();
            let mut handles: Vec<_> = values
                .iter()
                .map(|&v| (v, tree.insert(v).unwrap()))
                .collect();
            handles.shuffle(&mut StdRng::seed_from_u64(seed));

            let (removed, kept) = handles.split_at(handles.len() / 2);
            for &(value, id) in removed {
                prop_assert_eq!(tree.remove_node(id), Some(value));
            }
            for &(value, id) in kept {
                prop_assert_eq!(tree.item(id), Some(&value));
                prop_assert_eq!(tree.get(&value), Some(id));
            }
            tree.assert_valid();
        }
    }
}
