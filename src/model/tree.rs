// src/model/tree.rs

//! Huffman tree construction.
//!
//! The tree is built with a min-priority queue: the two lightest nodes are
//! merged until one root is left. The first node extracted becomes the left
//! child and the second the right child. Equal weights are resolved by
//! [`MergeOrder`], which makes the tree shape (and so the serialized layout)
//! a pure function of the frequency table.

use crate::model::codes::CodeTable;
use crate::model::frequency::FrequencyTable;
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Node in a Huffman tree.
///
/// Each child is owned by its parent, so dropping the root tears down the
/// whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Joins two nodes under a new internal node. `first` goes left.
    pub fn merge(first: Self, second: Self) -> Self {
        HuffNode::Internal {
            weight: first.weight() + second.weight(),
            left: Box::new(first),
            right: Box::new(second),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<(u8, u64)>) {
        match self {
            HuffNode::Leaf { symbol, weight } => out.push((*symbol, *weight)),
            HuffNode::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

/// Extraction key for the builder's priority queue.
///
/// Lower weight comes out first. Among equal weights the node that entered
/// the queue earlier comes out first. Leaves enter in ascending symbol order
/// with sequence numbers `0..L`; each merged node takes the next number when
/// it is pushed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergeOrder {
    pub weight: u64,
    pub seq: u32,
}

struct Queued {
    order: MergeOrder,
    node: HuffNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }
}

/// A single-rooted Huffman tree over the symbols of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree for `table`, or `None` when the table is empty.
    ///
    /// With a single distinct symbol the root is that symbol's leaf and no
    /// internal node is created.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(table.distinct());
        let mut seq = 0u32;

        for (symbol, count) in table.iter() {
            heap.push(Reverse(Queued {
                order: MergeOrder { weight: count, seq },
                node: HuffNode::Leaf {
                    symbol,
                    weight: count,
                },
            }));
            seq += 1;
        }

        while heap.len() > 1 {
            let Reverse(first) = heap.pop()?;
            let Reverse(second) = heap.pop()?;
            let node = HuffNode::merge(first.node, second.node);
            heap.push(Reverse(Queued {
                order: MergeOrder {
                    weight: node.weight(),
                    seq,
                },
                node,
            }));
            seq += 1;
        }

        let root = heap.pop()?.0.node;
        let tree = Self { root };
        debug!(
            "Built Huffman tree: {} leaves, weight {}, depth {}",
            tree.leaf_count(),
            tree.weight(),
            tree.depth()
        );
        Some(tree)
    }

    /// Counts `bytes` and builds the tree in one step.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::build(&FrequencyTable::build(bytes))
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn into_root(self) -> HuffNode {
        self.root
    }

    /// Root weight, i.e. the number of bytes the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    pub fn internal_count(&self) -> usize {
        self.leaf_count() - 1
    }

    /// Longest root-to-leaf path, in edges. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// `(symbol, weight)` of every leaf in pre-order.
    pub fn leaves(&self) -> Vec<(u8, u64)> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut out);
        out
    }

    /// Derives the per-symbol bitcodes.
    pub fn codes(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}
