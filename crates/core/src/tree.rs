//! Huffman tree construction.
//!
//! # Algorithm
//!
//! One leaf per distinct symbol goes into a priority queue (min-heap) keyed
//! by weight. The two lowest-weight roots are popped, merged under a new
//! internal node whose weight is their sum, and the merged root is pushed
//! back. When a single root remains it is the encoding tree.
//!
//! # Determinism
//!
//! Equal weights are ordered by a sequence number: leaves are numbered in
//! the frequency table's first-appearance order and every merged node takes
//! the next number. The first root popped becomes the left child.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the Huffman tree. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Own frequency for a leaf, sum of children for an internal node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Number of leaves under (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A root waiting in the merge queue.
#[derive(Debug)]
struct QueuedNode {
    node: Node,
    seq: u64,
}

impl QueuedNode {
    fn key(&self) -> (u64, u64) {
        (self.node.weight(), self.seq)
    }
}

// Implement ordering for the heap (min-heap: lowest weight, then lowest seq)
impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other.key().cmp(&self.key())
    }
}

/// Build the Huffman tree for a frequency table.
///
/// # Errors
/// Returns `HuffmanError::EmptyAlphabet` if the table has no symbols.
pub fn build_tree(frequencies: &FrequencyTable) -> Result<Node> {
    let mut heap: BinaryHeap<QueuedNode> = frequencies
        .iter()
        .enumerate()
        .map(|(seq, (symbol, weight))| QueuedNode {
            node: Node::Leaf { symbol, weight },
            seq: seq as u64,
        })
        .collect();

    let mut next_seq = heap.len() as u64;

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };

        let weight = left.node.weight() + right.node.weight();
        heap.push(QueuedNode {
            node: Node::Internal {
                weight,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
            seq: next_seq,
        });
        next_seq += 1;
    }

    let root = heap.pop().ok_or(HuffmanError::EmptyAlphabet)?.node;
    tracing::trace!(
        leaves = root.leaf_count(),
        depth = root.depth(),
        weight = root.weight(),
        "built huffman tree"
    );
    Ok(root)
}
