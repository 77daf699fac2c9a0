//! Array-backed binary min-heap of weighted nodes.
//!
//! The heap keeps the node with the smallest weight at index 0. Parent and
//! child positions follow the usual layout:
//!
//! ```text
//! parent(i) = (i - 1) / 2
//! left(i)   = 2i + 1
//! right(i)  = 2i + 2
//! ```
//!
//! Ties are never broken by a secondary key: a node only moves when a
//! neighbour is *strictly* lighter. The order in which equal-weight nodes
//! come out therefore depends only on the order of insertion, which is what
//! lets the decoder rebuild exactly the tree the encoder used.

use crate::node::Node;
use oxihuff_core::{HuffError, Result};

/// Min-priority queue over [`Node`] weights.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    /// Nodes in heap order.
    nodes: Vec<Node>,
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty queue with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The minimum-weight node, if any.
    pub fn peek_min(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Backing array in heap order.
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    /// Consume the queue and return the backing array in heap order.
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }

    /// Add a node and restore heap order by sifting it up. O(log n).
    pub fn insert(&mut self, node: Node) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    /// Remove and return the minimum-weight node. O(log n).
    ///
    /// The last node takes the root's place and is sifted down.
    pub fn extract_min(&mut self) -> Result<Node> {
        if self.nodes.is_empty() {
            return Err(HuffError::EmptyQueue);
        }

        let min = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Change the weight of the leaf carrying `symbol`. O(n).
    ///
    /// Returns `false` when no queued leaf carries `symbol`. The node is
    /// sifted up when its weight decreased and down otherwise.
    pub fn update_weight(&mut self, symbol: u8, new_weight: u64) -> bool {
        let Some(index) = self
            .nodes
            .iter()
            .position(|node| node.symbol() == Some(symbol))
        else {
            return false;
        };

        let old_weight = self.nodes[index].weight();
        self.nodes[index].set_weight(new_weight);

        if new_weight < old_weight {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        true
    }

    /// Replace the contents with `nodes` and heapify bottom-up. O(n).
    ///
    /// Repair starts at the last internal position and walks back to the
    /// root, so each sift-down is bounded by the height of its subtree.
    pub fn build_from_array(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        for i in (0..self.nodes.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// Check the heap-order invariant over the whole array.
    pub fn is_heap(&self) -> bool {
        (1..self.nodes.len()).all(|i| self.nodes[parent(i)].weight() <= self.nodes[i].weight())
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 && self.nodes[i].weight() < self.nodes[parent(i)].weight() {
            self.nodes.swap(i, parent(i));
            i = parent(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        while left(i) < n {
            let l = left(i);
            let r = l + 1;
            let mut smallest = i;

            if self.nodes[l].weight() < self.nodes[smallest].weight() {
                smallest = l;
            }
            if r < n && self.nodes[r].weight() < self.nodes[smallest].weight() {
                smallest = r;
            }
            if smallest == i {
                break;
            }

            self.nodes.swap(i, smallest);
            i = smallest;
        }
    }
}

impl From<Vec<Node>> for PriorityQueue {
    fn from(nodes: Vec<Node>) -> Self {
        let mut queue = Self::new();
        queue.build_from_array(nodes);
        queue
    }
}
