//! # Splay-Tree Memo Table
//!
//! Self-adjusting binary search tree used as an unbounded memoization store.
//! Every successful lookup and every insert splays the touched node to the
//! root, so recently used keys stay shallow without any stored balance
//! information.
//!
//! ## Architecture
//!
//! ```text
//!   nodes: Vec<Node<K, V>>         (append-only arena, addressed by NodeId)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ NodeId │ Node { key, value, parent, left, right }     │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │   0    │ { 5, .., parent: Some(2), left: None, .. }   │
//!   │   1    │ { 9, .., parent: Some(2), .. }               │
//!   │   2    │ { 7, .., parent: None, left: 0, right: 1 }   │ ◄── root
//!   └────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Nodes are never removed, so a `NodeId` stays valid for the lifetime of the
//! tree and links are plain indices.
//!
//! ## Splay Cases
//!
//! ```text
//!   Zig (parent is root)        Zig-Zig (same side)          Zig-Zag (opposite sides)
//!
//!        p          x                 g        x                  g           x
//!       /     ─►     \               /          \                /          /   \
//!      x              p             p     ─►     p              p     ─►   p     g
//!                                  /              \              \
//!                                 x                g              x
//! ```
//!
//! | Case     | Rotations                                                   |
//! |----------|-------------------------------------------------------------|
//! | Zig      | rotate `p` away from `x`'s side                             |
//! | Zig-Zig  | rotate `g`, then `p`, both away from the shared side        |
//! | Zig-Zag  | rotate `p` away from `x`'s side, then `g` away from `p`'s   |
//!
//! ## Example Usage
//!
//! ```
//! use memokit::memo::splay::SplayMemo;
//!
//! let mut memo = SplayMemo::new();
//! memo.insert(3, "three");
//! memo.insert(1, "one");
//! memo.insert(2, "two");
//!
//! assert_eq!(memo.find(&1), Some(&"one"));
//! assert_eq!(memo.root_key(), Some(&1));
//! assert_eq!(memo.find(&4), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SplayMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SplayMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MemoMetricsRecorder, MetricsSnapshotProvider, SplayMetricsRecorder};
use crate::traits::MemoStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Splay tree keyed by `K`, memoizing values of type `V`. Never evicts.
pub struct SplayMemo<K, V>
where
    K: Ord,
{
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    #[cfg(feature = "metrics")]
    metrics: SplayMetrics,
}

impl<K, V> SplayMemo<K, V>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            #[cfg(feature = "metrics")]
            metrics: SplayMetrics::default(),
        }
    }

    /// Looks up `key`; on a hit the node is splayed to the root.
    ///
    /// A miss leaves the tree untouched.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_find_hit();

                    self.splay(id);
                    return Some(&self.nodes[id.0].value);
                },
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_find_miss();

        None
    }

    /// Inserts `key` or overwrites its value, then splays it to the root.
    pub fn insert(&mut self, key: K, value: V) {
        let Some(mut current) = self.root else {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();

            let id = self.alloc(key, value, None);
            self.root = Some(id);
            return;
        };

        let mut depth = 0usize;
        loop {
            let node = &mut self.nodes[current.0];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_update();

                    node.value = value;
                    self.splay(current);
                    return;
                },
            };

            depth += 1;
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_new();

                    let id = self.alloc(key, value, Some(current));
                    self.nodes[current.0].set_child(side, Some(id));
                    tracing::trace!("[splay]: attached leaf at depth {}", depth);
                    self.splay(id);
                    return;
                },
            }
        }
    }

    /// Number of memoized keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Key currently at the root, i.e. the most recently touched key.
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[id.0].key)
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.nodes[id.0];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        max
    }

    /// In-order `(key, value)` iterator; keys come out strictly ascending.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Verifies parent/child agreement, search order and reachability.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantError::new("nodes allocated but tree has no root"))
            };
        };
        if self.nodes[root.0].parent.is_some() {
            return Err(InvariantError::new("root has a parent"));
        }

        let mut stack = vec![root];
        let mut reached = 0usize;
        while let Some(id) = stack.pop() {
            reached += 1;
            if reached > self.nodes.len() {
                return Err(InvariantError::new("cycle detected in child links"));
            }
            let node = &self.nodes[id.0];
            for side in [Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    if self.nodes[child.0].parent != Some(id) {
                        return Err(InvariantError::new(format!(
                            "node {} does not point back to parent {}",
                            child.0, id.0
                        )));
                    }
                    stack.push(child);
                }
            }
        }
        if reached != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "reached {} of {} nodes from the root",
                reached,
                self.nodes.len()
            )));
        }

        let mut keys = self.iter().map(|(k, _)| k);
        if let Some(mut prev) = keys.next() {
            for key in keys {
                if prev >= key {
                    return Err(InvariantError::new("in-order keys are not strictly ascending"));
                }
                prev = key;
            }
        }
        Ok(())
    }

    fn alloc(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });
        id
    }

    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self.nodes[parent.0].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Rotates `x` up until it is the root.
    fn splay(&mut self, x: NodeId) {
        #[cfg(feature = "metrics")]
        self.metrics.record_splay();

        while let Some(p) = self.nodes[x.0].parent {
            let x_side = self.side_of(x, p);
            match self.nodes[p.0].parent {
                // zig
                None => self.rotate(p, x_side.opposite()),
                Some(g) => {
                    let p_side = self.side_of(p, g);
                    if x_side == p_side {
                        // zig-zig
                        self.rotate(g, x_side.opposite());
                        self.rotate(p, x_side.opposite());
                    } else {
                        // zig-zag
                        self.rotate(p, x_side.opposite());
                        self.rotate(g, p_side.opposite());
                    }
                },
            }
        }
        debug_assert_eq!(self.root, Some(x));
    }

    /// Rotates `pivot` towards `dir`: its child on the opposite side takes
    /// its place and `pivot` becomes that child's `dir` child.
    fn rotate(&mut self, pivot: NodeId, dir: Side) {
        let lifted_side = dir.opposite();
        let Some(lifted) = self.nodes[pivot.0].child(lifted_side) else {
            return;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_rotation();

        let inner = self.nodes[lifted.0].child(dir);
        self.nodes[pivot.0].set_child(lifted_side, inner);
        if let Some(inner) = inner {
            self.nodes[inner.0].parent = Some(pivot);
        }

        let grand = self.nodes[pivot.0].parent;
        self.nodes[lifted.0].parent = grand;
        match grand {
            None => self.root = Some(lifted),
            Some(g) => {
                let side = self.side_of(pivot, g);
                self.nodes[g.0].set_child(side, Some(lifted));
            },
        }

        self.nodes[lifted.0].set_child(dir, Some(pivot));
        self.nodes[pivot.0].parent = Some(lifted);
    }
}

#[cfg(feature = "metrics")]
impl<K, V> SplayMemo<K, V>
where
    K: Ord,
{
    pub fn metrics_snapshot(&self) -> SplayMetricsSnapshot {
        SplayMetricsSnapshot {
            find_calls: self.metrics.memo.find_calls,
            find_hits: self.metrics.memo.find_hits,
            find_misses: self.metrics.memo.find_misses,
            insert_new: self.metrics.memo.insert_new,
            insert_updates: self.metrics.memo.insert_updates,
            splays: self.metrics.splays,
            rotations: self.metrics.rotations,
            len: self.nodes.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<SplayMetricsSnapshot> for SplayMemo<K, V>
where
    K: Ord,
{
    fn snapshot(&self) -> SplayMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> MemoStore<K, V> for SplayMemo<K, V>
where
    K: Ord,
{
    #[inline]
    fn find(&mut self, key: &K) -> Option<&V> {
        SplayMemo::find(self, key)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) {
        SplayMemo::insert(self, key, value)
    }
}

impl<K, V> Default for SplayMemo<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for SplayMemo<K, V>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayMemo")
            .field("len", &self.len())
            .field("root", &self.root_key())
            .finish_non_exhaustive()
    }
}

/// In-order iterator over a [`SplayMemo`].
pub struct Iter<'a, K, V>
where
    K: Ord,
{
    tree: &'a SplayMemo<K, V>,
    stack: Vec<NodeId>,
}

impl<K, V> Iter<'_, K, V>
where
    K: Ord,
{
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.nodes[id.0].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id.0];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(memo: &SplayMemo<i64, V>) -> Vec<i64> {
        memo.iter().map(|(k, _)| *k).collect()
    }

    mod correctness {
        use super::*;

        #[test]
        fn empty_tree_misses() {
            let mut memo: SplayMemo<i64, i64> = SplayMemo::new();
            assert_eq!(memo.find(&0), None);
            assert!(memo.is_empty());
            assert_eq!(memo.root_key(), None);
            assert_eq!(memo.height(), 0);
            memo.check_invariants().unwrap();
        }

        #[test]
        fn first_insert_becomes_root() {
            let mut memo = SplayMemo::new();
            memo.insert(5, 50);
            assert_eq!(memo.root_key(), Some(&5));
            assert_eq!(memo.len(), 1);
            assert_eq!(memo.find(&5), Some(&50));
        }

        #[test]
        fn every_insert_ends_at_root() {
            let mut memo = SplayMemo::new();
            for key in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
                memo.insert(key, key * 2);
                assert_eq!(memo.root_key(), Some(&key));
                memo.check_invariants().unwrap();
            }
            assert_eq!(keys(&memo), vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
        }

        #[test]
        fn find_hit_splays_to_root() {
            let mut memo = SplayMemo::new();
            for key in 0..20 {
                memo.insert(key, key);
            }
            for key in [0, 19, 7, 7, 12, 3] {
                assert_eq!(memo.find(&key), Some(&key));
                assert_eq!(memo.root_key(), Some(&key));
                memo.check_invariants().unwrap();
            }
        }

        #[test]
        fn find_miss_leaves_tree_unchanged() {
            let mut memo = SplayMemo::new();
            for key in [10, 20, 30] {
                memo.insert(key, ());
            }
            let root_before = memo.root_key().copied();
            let height_before = memo.height();
            assert_eq!(memo.find(&25), None);
            assert_eq!(memo.root_key().copied(), root_before);
            assert_eq!(memo.height(), height_before);
        }

        #[test]
        fn repeat_insert_overwrites_without_growing() {
            let mut memo = SplayMemo::new();
            memo.insert(1, "a");
            memo.insert(2, "b");
            memo.insert(1, "c");
            assert_eq!(memo.len(), 2);
            assert_eq!(memo.root_key(), Some(&1));
            assert_eq!(memo.find(&1), Some(&"c"));
        }

        #[test]
        fn ascending_inserts_form_left_spine_then_rebalance() {
            let mut memo = SplayMemo::new();
            for key in 0..64 {
                memo.insert(key, ());
            }
            // each new maximum is splayed over the previous root
            assert_eq!(memo.height(), 64);

            memo.find(&0);
            assert_eq!(memo.root_key(), Some(&0));
            assert!(memo.height() < 64);
            memo.check_invariants().unwrap();
        }

        #[test]
        fn zig_zag_from_both_sides() {
            let mut memo = SplayMemo::new();
            for key in [50, 10, 90] {
                memo.insert(key, ());
            }
            // 30 lands right of 10, which hangs left of 50: zig-zag, then zig
            memo.insert(30, ());
            assert_eq!(memo.root_key(), Some(&30));
            memo.insert(70, ());
            assert_eq!(memo.root_key(), Some(&70));
            memo.check_invariants().unwrap();
            assert_eq!(keys(&memo), vec![10, 30, 50, 70, 90]);
        }

        #[test]
        fn debug_shows_root_not_values() {
            let mut memo = SplayMemo::new();
            memo.insert(3i64, "payload");
            let dbg = format!("{:?}", memo);
            assert!(dbg.contains("root: Some(3)"));
            assert!(!dbg.contains("payload"));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn repeated_find_is_a_hit_without_insert() {
            let mut memo = SplayMemo::new();
            memo.insert(1i64, 1i64);
            memo.insert(2, 2);
            memo.find(&1);
            memo.find(&1);
            memo.find(&9);

            let snap = memo.metrics_snapshot();
            assert_eq!(snap.find_hits, 2);
            assert_eq!(snap.find_misses, 1);
            assert_eq!(snap.insert_new, 2);
            assert_eq!(snap.len, 2);
        }

        #[test]
        fn splay_at_root_needs_no_rotation() {
            let mut memo = SplayMemo::new();
            memo.insert(1i64, ());
            memo.insert(2, ());
            let rotations = memo.metrics_snapshot().rotations;
            memo.find(&2);
            assert_eq!(memo.metrics_snapshot().rotations, rotations);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: in-order keys are strictly ascending after any insert sequence.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_in_order_is_sorted(
                keys_in in prop::collection::vec(-500i64..500, 0..200)
            ) {
                let mut memo = SplayMemo::new();
                for key in &keys_in {
                    memo.insert(*key, *key);
                }
                let mut expected = keys_in.clone();
                expected.sort_unstable();
                expected.dedup();
                prop_assert_eq!(keys(&memo), expected);
                prop_assert!(memo.check_invariants().is_ok());
            }

            /// Property: a successful find leaves the key at the root.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_find_hit_is_root(
                keys_in in prop::collection::vec(0i64..100, 1..100),
                probes in prop::collection::vec(0i64..100, 1..50)
            ) {
                let mut memo = SplayMemo::new();
                for key in &keys_in {
                    memo.insert(*key, key * 3);
                }
                for probe in probes {
                    let present = keys_in.contains(&probe);
                    let found = memo.find(&probe).copied();
                    prop_assert_eq!(found.is_some(), present);
                    if present {
                        prop_assert_eq!(found, Some(probe * 3));
                        prop_assert_eq!(memo.root_key(), Some(&probe));
                    }
                    prop_assert!(memo.check_invariants().is_ok());
                }
            }
        }
    }
}
