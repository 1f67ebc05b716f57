// src/codec/tree_format.rs

//! Bit-level serialization of the Huffman tree.
//!
//! The tree is written in pre-order. An internal node is a single `0` bit
//! followed by its left and then its right subtree. A leaf is a single `1`
//! bit followed by its symbol as eight bits, high bit first. Both go through
//! the same [`BitWriter`], so the payload that follows continues in the same
//! byte-packed stream without realignment.

use crate::bitio::{BitReader, BitWriter};
use crate::model::tree::HuffNode;
use crate::utils::error::{HuffError, Result};
use std::io::{Read, Write};

/// Deepest tree a 256-symbol alphabet can produce.
const MAX_DEPTH: usize = 255;

/// Writes `node` and its subtree. Does not flush.
pub fn write_tree<W: Write>(writer: &mut BitWriter<W>, node: &HuffNode) -> Result<()> {
    match node {
        HuffNode::Internal { left, right, .. } => {
            writer.write_bit(false)?;
            write_tree(writer, left)?;
            write_tree(writer, right)
        }
        HuffNode::Leaf { symbol, .. } => {
            writer.write_bit(true)?;
            writer.write_byte(*symbol)
        }
    }
}

/// Size in bits of a serialized tree with `leaves` leaves.
///
/// One control bit per node (`leaves` leaves, `leaves - 1` internal nodes)
/// plus eight bits per leaf symbol.
pub const fn tree_bit_len(leaves: usize) -> u64 {
    if leaves == 0 {
        return 0;
    }
    (leaves + (leaves - 1) + 8 * leaves) as u64
}

/// Tree shape recovered from a stream. Weights are not serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeNode {
    Leaf(u8),
    Branch(Box<DecodeNode>, Box<DecodeNode>),
}

impl DecodeNode {
    pub fn leaf_count(&self) -> usize {
        match self {
            DecodeNode::Leaf(_) => 1,
            DecodeNode::Branch(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl From<&HuffNode> for DecodeNode {
    fn from(node: &HuffNode) -> Self {
        match node {
            HuffNode::Leaf { symbol, .. } => DecodeNode::Leaf(*symbol),
            HuffNode::Internal { left, right, .. } => DecodeNode::Branch(
                Box::new(DecodeNode::from(left.as_ref())),
                Box::new(DecodeNode::from(right.as_ref())),
            ),
        }
    }
}

/// Reads a tree written by [`write_tree`].
///
/// Rejects trees that repeat a symbol (and so can never hold more than 256
/// leaves) or that nest deeper than a byte alphabet allows.
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<DecodeNode> {
    let mut seen = [false; 256];
    read_node(reader, 0, &mut seen)
}

fn read_node<R: Read>(
    reader: &mut BitReader<R>,
    depth: usize,
    seen: &mut [bool; 256],
) -> Result<DecodeNode> {
    if depth > MAX_DEPTH {
        return Err(HuffError::CorruptTree(format!(
            "tree is deeper than {} levels",
            MAX_DEPTH
        )));
    }

    if reader.read_bit()? {
        let symbol = reader.read_byte()?;
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(HuffError::CorruptTree(format!(
                "symbol {:#04x} appears in more than one leaf",
                symbol
            )));
        }
        Ok(DecodeNode::Leaf(symbol))
    } else {
        let left = read_node(reader, depth + 1, seen)?;
        let right = read_node(reader, depth + 1, seen)?;
        Ok(DecodeNode::Branch(Box::new(left), Box::new(right)))
    }
}
