use std::fmt;

use crate::error::{RangeError, check_position, check_range};
use crate::priority::{PrioritySource, XorShift64};
use crate::summary::Summary;
use crate::traits::PermutationSequence;

/// Implicit treap over `i64` keys, indexed by rank.
///
/// Every node caches a [`Summary`] of its subtree, which is enough to answer
/// range sums and to find the trailing non-increasing run that drives
/// next-permutation.
#[derive(Clone)]
pub struct ImplicitTreap<R = XorShift64> {
    root: Link,
    prio: R,
}

#[derive(Clone)]
struct Node {
    key: i64,
    prio: u32,
    /// Children still have to be reversed. The children of this node are
    /// already swapped and `summary` already describes the reversed order.
    rev: bool,
    summary: Summary,
    left: Link,
    right: Link,
}

type Link = Option<Box<Node>>;

impl Node {
    fn new(key: i64, prio: u32) -> Self {
        Self {
            key,
            prio,
            rev: false,
            summary: Summary::from_key(key),
            left: None,
            right: None,
        }
    }

    fn size(node: &Link) -> usize {
        node.as_ref().map_or(0, |n| n.summary.size as usize)
    }

    fn summary(node: &Link) -> Option<&Summary> {
        node.as_deref().map(|n| &n.summary)
    }

    fn recalc(&mut self) {
        self.summary = Summary::merge(
            Self::summary(&self.left),
            self.key,
            Self::summary(&self.right),
        );
    }

    fn apply_reverse(&mut self) {
        self.rev = !self.rev;
        std::mem::swap(&mut self.left, &mut self.right);
        self.summary = self.summary.reversed();
    }

    /// Hands a pending reversal down to the children. Must be called before
    /// the children of this node are read or replaced.
    fn push(&mut self) {
        if !self.rev {
            return;
        }
        if let Some(left) = self.left.as_deref_mut() {
            left.apply_reverse();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.apply_reverse();
        }
        self.rev = false;
    }
}

impl ImplicitTreap<XorShift64> {
    pub fn new() -> Self {
        Self::with_priorities(XorShift64::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_priorities(XorShift64::new(seed))
    }
}

impl<R> ImplicitTreap<R> {
    pub fn with_priorities(prio: R) -> Self {
        Self { root: None, prio }
    }

    fn split(root: Link, left_count: usize) -> (Link, Link) {
        let mut node = match root {
            Some(node) => node,
            None => return (None, None),
        };
        node.push();
        if left_count == 0 {
            return (None, Some(node));
        }
        if left_count >= node.summary.size as usize {
            return (Some(node), None);
        }

        let left_size = Node::size(&node.left);
        if left_count <= left_size {
            let (left, right) = Self::split(node.left.take(), left_count);
            node.left = right;
            node.recalc();
            (left, Some(node))
        } else {
            let (left, right) = Self::split(node.right.take(), left_count - left_size - 1);
            node.right = left;
            node.recalc();
            (Some(node), right)
        }
    }

    /// Splits a subtree whose in-order sequence is non-increasing into the
    /// keys strictly greater than `pivot` and the rest.
    fn split_greater(root: Link, pivot: i64) -> (Link, Link) {
        let mut node = match root {
            Some(node) => node,
            None => return (None, None),
        };
        node.push();
        if node.key > pivot {
            let (left, right) = Self::split_greater(node.right.take(), pivot);
            node.right = left;
            node.recalc();
            (Some(node), right)
        } else {
            let (left, right) = Self::split_greater(node.left.take(), pivot);
            node.left = right;
            node.recalc();
            (left, Some(node))
        }
    }

    fn merge(left: Link, right: Link) -> Link {
        match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(mut left), Some(mut right)) => {
                if left.prio > right.prio {
                    left.push();
                    left.right = Self::merge(left.right.take(), Some(right));
                    left.recalc();
                    Some(left)
                } else {
                    right.push();
                    right.left = Self::merge(Some(left), right.left.take());
                    right.recalc();
                    Some(right)
                }
            }
        }
    }

    /// Detaches `[start, end)` (0-indexed) from the tree. The caller must
    /// hand the three parts back to [`Self::reattach`].
    fn isolate(&mut self, start: usize, end: usize) -> (Link, Link, Link) {
        let (rest, right) = Self::split(self.root.take(), end);
        let (left, mid) = Self::split(rest, start);
        (left, mid, right)
    }

    fn reattach(&mut self, left: Link, mid: Link, right: Link) {
        self.root = Self::merge(Self::merge(left, mid), right);
    }

    /// Rewrites an isolated range into its next permutation. Returns `false`
    /// when the range was already the last one and wrapped around.
    fn next_permutation_tree(mut mid: Box<Node>) -> (Link, bool) {
        let size = mid.summary.size as usize;
        let run = mid.summary.dec_run as usize;
        if mid.summary.is_non_increasing() {
            mid.apply_reverse();
            return (Some(mid), false);
        }

        // The element right before the run is strictly smaller than the
        // first element of the run, otherwise the run would be longer.
        let (prefix, suffix) = Self::split(Some(mid), size - run);
        let (prefix, pivot) = Self::split(prefix, size - run - 1);
        let pivot_key = pivot.as_ref().map(|p| p.key).expect("prefix is non-empty");

        // Rightmost element of the run strictly greater than the pivot.
        let (greater, rest) = Self::split_greater(suffix, pivot_key);
        let greater_len = Node::size(&greater);
        debug_assert!(greater_len > 0);
        let (greater, target) = Self::split(greater, greater_len - 1);

        // The pivot takes the target's place; the run stays non-increasing.
        let mut tail = Self::merge(Self::merge(greater, pivot), rest);
        if let Some(node) = tail.as_deref_mut() {
            node.apply_reverse();
        }
        (Self::merge(Self::merge(prefix, target), tail), true)
    }

    fn set_node(node: &mut Link, index: usize, value: i64) {
        let Some(node_ref) = node.as_deref_mut() else {
            return;
        };
        node_ref.push();
        let left_size = Node::size(&node_ref.left);
        if index < left_size {
            Self::set_node(&mut node_ref.left, index, value);
        } else if index == left_size {
            node_ref.key = value;
        } else {
            Self::set_node(&mut node_ref.right, index - left_size - 1, value);
        }
        node_ref.recalc();
    }

    /// Reads the key at `index` without resolving pending reversals, by
    /// tracking the reversal parity along the path.
    fn get_node(mut node: &Link, mut index: usize) -> Option<i64> {
        let mut flip = false;
        while let Some(node_ref) = node.as_deref() {
            let (first, second) = if flip {
                (&node_ref.right, &node_ref.left)
            } else {
                (&node_ref.left, &node_ref.right)
            };
            let first_size = Node::size(first);
            flip ^= node_ref.rev;
            if index < first_size {
                node = first;
            } else if index == first_size {
                return Some(node_ref.key);
            } else {
                index -= first_size + 1;
                node = second;
            }
        }
        None
    }

    fn collect(node: &Link, flip: bool, out: &mut Vec<i64>) {
        let Some(node_ref) = node.as_deref() else {
            return;
        };
        let (first, second) = if flip {
            (&node_ref.right, &node_ref.left)
        } else {
            (&node_ref.left, &node_ref.right)
        };
        let child_flip = flip ^ node_ref.rev;
        Self::collect(first, child_flip, out);
        out.push(node_ref.key);
        Self::collect(second, child_flip, out);
    }

    /// Summary of the inclusive 1-indexed range `[left, right]`.
    pub fn summary(&mut self, left: usize, right: usize) -> Result<Summary, RangeError> {
        let (start, end) = check_range(left, right, Node::size(&self.root))?;
        let (l, mid, r) = self.isolate(start, end);
        let summary = *Node::summary(&mid).expect("isolated range is non-empty");
        self.reattach(l, mid, r);
        Ok(summary)
    }
}

impl<R: PrioritySource> ImplicitTreap<R> {
    fn build(elements: &[i64], prio: &mut R) -> Link {
        match elements.len() {
            0 => None,
            1 => Some(Box::new(Node::new(elements[0], prio.next_priority()))),
            len => {
                let (left, right) = elements.split_at(len / 2);
                let left = Self::build(left, prio);
                let right = Self::build(right, prio);
                Self::merge(left, right)
            }
        }
    }

    pub fn from_slice_with(elements: &[i64], prio: R) -> Self {
        let mut treap = Self::with_priorities(prio);
        treap.assign(elements);
        treap
    }
}

impl Default for ImplicitTreap<XorShift64> {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<i64> for ImplicitTreap<XorShift64> {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let elements: Vec<i64> = iter.into_iter().collect();
        Self::from_slice_with(&elements, XorShift64::default())
    }
}

impl<R> fmt::Debug for ImplicitTreap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::with_capacity(Node::size(&self.root));
        Self::collect(&self.root, false, &mut out);
        f.debug_list().entries(out).finish()
    }
}

impl<R: PrioritySource> PermutationSequence for ImplicitTreap<R> {
    fn len(&self) -> usize {
        Node::size(&self.root)
    }

    fn assign(&mut self, elements: &[i64]) {
        self.root = Self::build(elements, &mut self.prio);
        tracing::debug!(len = elements.len(), "built treap");
    }

    fn get(&self, position: usize) -> Result<i64, RangeError> {
        let index = check_position(position, self.len())?;
        Ok(Self::get_node(&self.root, index).expect("index is within bounds"))
    }

    fn sum(&mut self, left: usize, right: usize) -> Result<i128, RangeError> {
        self.summary(left, right).map(|summary| summary.sum)
    }

    fn set(&mut self, position: usize, value: i64) -> Result<(), RangeError> {
        let index = check_position(position, self.len())?;
        Self::set_node(&mut self.root, index, value);
        Ok(())
    }

    fn insert(&mut self, position: usize, value: i64) -> Result<(), RangeError> {
        let index = check_position(position, self.len() + 1)?;
        let node = Some(Box::new(Node::new(value, self.prio.next_priority())));
        let (left, right) = Self::split(self.root.take(), index);
        self.reattach(left, node, right);
        Ok(())
    }

    fn reverse(&mut self, left: usize, right: usize) -> Result<(), RangeError> {
        let (start, end) = check_range(left, right, self.len())?;
        let (l, mut mid, r) = self.isolate(start, end);
        if let Some(node) = mid.as_deref_mut() {
            node.apply_reverse();
        }
        self.reattach(l, mid, r);
        Ok(())
    }

    fn rotate_left(&mut self, left: usize, right: usize, shift: usize) -> Result<(), RangeError> {
        let (start, end) = check_range(left, right, self.len())?;
        let shift = shift % (end - start);
        if shift == 0 {
            return Ok(());
        }
        let (l, mid, r) = self.isolate(start, end);
        let (head, tail) = Self::split(mid, shift);
        self.reattach(l, Self::merge(tail, head), r);
        Ok(())
    }

    fn next_permutation(&mut self, left: usize, right: usize) -> Result<bool, RangeError> {
        let (start, end) = check_range(left, right, self.len())?;
        let (l, mid, r) = self.isolate(start, end);
        let mid = mid.expect("isolated range is non-empty");
        let (mid, advanced) = Self::next_permutation_tree(mid);
        if !advanced {
            tracing::trace!(left, right, "last permutation, wrapped to ascending order");
        }
        self.reattach(l, mid, r);
        Ok(advanced)
    }

    fn to_vec(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        Self::collect(&self.root, false, &mut out);
        out
    }
}
