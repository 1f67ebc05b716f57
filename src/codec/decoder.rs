// src/codec/decoder.rs

//! Inverse of [`encoder`](super::encoder).

use super::tree_format::{DecodeNode, read_tree};
use crate::bitio::BitReader;
use crate::utils::error::{HuffError, Result};
use log::{error, info};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Decodes a complete encoded stream held in memory.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let Some((&last_byte_bits, stream)) = data.split_last() else {
        return Ok(Vec::new());
    };
    if stream.is_empty() {
        return Err(HuffError::CorruptStream(
            "trailer without a bitstream".to_string(),
        ));
    }
    if !(1..=8).contains(&last_byte_bits) {
        return Err(HuffError::CorruptStream(format!(
            "trailer claims {} bits in the final byte",
            last_byte_bits
        )));
    }
    let total_bits = (stream.len() as u64 - 1) * 8 + last_byte_bits as u64;

    let mut reader = BitReader::new(stream);
    let tree = read_tree(&mut reader)?;
    if reader.bit_position() > total_bits {
        return Err(HuffError::Truncated);
    }

    let mut out = Vec::new();
    while reader.bit_position() < total_bits {
        out.push(decode_symbol(&tree, &mut reader)?);
    }
    if reader.bit_position() != total_bits {
        // the last code ran into the padding
        return Err(HuffError::Truncated);
    }
    Ok(out)
}

fn decode_symbol<R: Read>(root: &DecodeNode, reader: &mut BitReader<R>) -> Result<u8> {
    if let DecodeNode::Leaf(symbol) = root {
        // a lone symbol is coded as a single 0 bit
        if reader.read_bit()? {
            return Err(HuffError::CorruptStream(
                "unexpected 1 bit in a single-symbol payload".to_string(),
            ));
        }
        return Ok(*symbol);
    }

    let mut node = root;
    loop {
        match node {
            DecodeNode::Leaf(symbol) => return Ok(*symbol),
            DecodeNode::Branch(left, right) => {
                node = if reader.read_bit()? { right } else { left };
            }
        }
    }
}

/// Decodes the file at `input` into `output`, returning the decoded length.
pub fn decode_file(input: &Path, output: &Path) -> Result<u64> {
    let result = decode_file_inner(input, output);
    match &result {
        Ok(len) => info!(
            "Decompressed {} -> {} ({} bytes)",
            input.display(),
            output.display(),
            len
        ),
        Err(e) => error!(
            "Failed to decompress {} -> {}: {}",
            input.display(),
            output.display(),
            e
        ),
    }
    result
}

fn decode_file_inner(input: &Path, output: &Path) -> Result<u64> {
    let mut source = fs::File::open(input).map_err(|e| HuffError::open(input, e))?;
    let mut data = Vec::new();
    source.read_to_end(&mut data).map_err(HuffError::Read)?;

    let decoded = decode(&data)?;
    let mut sink = fs::File::create(output).map_err(|e| HuffError::open(output, e))?;
    sink.write_all(&decoded)?;
    sink.flush()?;
    Ok(decoded.len() as u64)
}
