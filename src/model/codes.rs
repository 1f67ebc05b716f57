// src/model/codes.rs

use crate::model::frequency::FrequencyTable;
use crate::model::tree::{HuffNode, HuffmanTree};
use bitvec::prelude::*;

/// A root-to-leaf path: `0` for left, `1` for right.
pub type Code = BitVec<u8, Msb0>;

/// Bitcode for every symbol present in a tree.
///
/// A tree made of a single leaf has no edges, so its symbol is given the
/// one-bit code `0`; that keeps every input byte at least one payload bit
/// long and lets the decoder count symbols from the bitstream alone.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self {
            codes: vec![None; 256],
        };
        match tree.root() {
            HuffNode::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = Some(bitvec![u8, Msb0; 0]);
            }
            root => {
                let mut path = Code::new();
                table.assign(root, &mut path);
            }
        }
        table
    }

    fn assign(&mut self, node: &HuffNode, path: &mut Code) {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                self.codes[*symbol as usize] = Some(path.clone());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push(false);
                self.assign(left, path);
                path.pop();

                path.push(true);
                self.assign(right, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|c| (symbol as u8, c)))
    }

    /// Payload size in bits for an input with the given counts.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }
}
