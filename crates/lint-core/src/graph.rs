//! Generic dependency ordering via topological sort.
//!
//! Components declare "runs before X" / "runs after Y" constraints without
//! knowing anything about each other's internals; the sorter turns those
//! declarations into one total order. Ties are broken by a LIFO policy over
//! registration order: zero-in-degree nodes enter and leave the ready queue
//! at the front, so the most-recently-seen unconstrained node is emitted
//! first. Registration order is therefore meaningful and repeated sorts are
//! reproducible.
//!
//! # Example
//!
//! ```
//! use lint_core::graph::DependencySorter;
//!
//! let mut sorter = DependencySorter::new();
//! sorter.add("a");
//! sorter.add("b");
//! sorter.add_before("a", ["b"]);
//!
//! let order = sorter.sorted().unwrap();
//! assert_eq!(order, vec!["b", "a"]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// The ordering graph admits no linearization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<T> {
    /// Items left unemitted once the sort stalled: every cycle participant,
    /// plus anything constrained to run after one.
    pub remaining: Vec<T>,
}

struct Node<T> {
    item: T,
    /// Indices of nodes that must come after this one, in edge insertion
    /// order, deduplicated.
    successors: Vec<usize>,
}

/// Topological sorter over an arbitrary item type with explicit
/// before/after edge declarations.
pub struct DependencySorter<T> {
    nodes: Vec<Node<T>>,
    index: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> DependencySorter<T> {
    /// Create an empty sorter.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Ensure a node exists for `item`, creating it on first sight.
    /// Registration order is first-sight order.
    pub fn add(&mut self, item: T) -> usize {
        if let Some(&ix) = self.index.get(&item) {
            return ix;
        }
        let ix = self.nodes.len();
        self.index.insert(item.clone(), ix);
        self.nodes.push(Node {
            item,
            successors: Vec::new(),
        });
        ix
    }

    /// Record that each of `deps` must run before `item`.
    pub fn add_before<I>(&mut self, item: T, deps: I)
    where
        I: IntoIterator<Item = T>,
    {
        let item_ix = self.add(item);
        for dep in deps {
            let dep_ix = self.add(dep);
            Self::link(&mut self.nodes, dep_ix, item_ix);
        }
    }

    /// Record that each of `deps` must run after `item`. This is the
    /// symmetric declaration: both forms normalize to the same directed
    /// edge representation.
    pub fn add_after<I>(&mut self, item: T, deps: I)
    where
        I: IntoIterator<Item = T>,
    {
        let item_ix = self.add(item);
        for dep in deps {
            let dep_ix = self.add(dep);
            Self::link(&mut self.nodes, item_ix, dep_ix);
        }
    }

    fn link(nodes: &mut [Node<T>], from: usize, to: usize) {
        let successors = &mut nodes[from].successors;
        if !successors.contains(&to) {
            successors.push(to);
        }
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the sorter holds no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Produce a total order satisfying every recorded constraint.
    ///
    /// Kahn's algorithm. In-degrees are rebuilt from scratch on every call
    /// so the sorter can be queried repeatedly without accumulating stale
    /// counts. Isolated nodes are included like any other.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if fewer items are emitted than registered;
    /// the order is never truncated to a partial result.
    pub fn sorted(&self) -> Result<Vec<T>, CycleError<T>> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        for node in &self.nodes {
            for &succ in &node.successors {
                in_degree[succ] += 1;
            }
        }

        let mut queue: VecDeque<usize> = VecDeque::new();
        for ix in 0..self.nodes.len() {
            if in_degree[ix] == 0 {
                queue.push_front(ix);
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut emitted = vec![false; self.nodes.len()];
        while let Some(ix) = queue.pop_front() {
            emitted[ix] = true;
            order.push(self.nodes[ix].item.clone());
            for &succ in &self.nodes[ix].successors {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    queue.push_front(succ);
                }
            }
        }

        if order.len() != self.nodes.len() {
            let remaining = self
                .nodes
                .iter()
                .enumerate()
                .filter(|(ix, _)| !emitted[*ix])
                .map(|(_, node)| node.item.clone())
                .collect();
            return Err(CycleError { remaining });
        }
        Ok(order)
    }
}

impl<T: Clone + Eq + Hash> Default for DependencySorter<T> {
    fn default() -> Self {
        Self::new()
    }
}
