// src/codec/encoder.rs

//! Whole-input Huffman encoding.
//!
//! Output layout, as one MSB-first bitstream followed by a trailer byte:
//!
//! ```text
//! [tree section][payload section][zero padding] [trailer]
//! ```
//!
//! The tree section is described in [`tree_format`](super::tree_format). The
//! payload is the bitcode of every input byte, in input order. The trailer
//! holds the number of meaningful bits (1-8) in the last byte of the
//! bitstream, so a decoder can tell payload bits from padding. An empty input
//! produces an empty output: no tree, no trailer.

use super::options::EncodeOptions;
use super::tree_format::write_tree;
use crate::bitio::BitWriter;
use crate::model::frequency::FrequencyTable;
use crate::model::tree::HuffmanTree;
use crate::utils::error::{HuffError, Result};
use byteorder::WriteBytesExt;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Length of the framing byte that follows the bitstream.
pub const TRAILER_LEN: u64 = 1;

/// Sizes reported by one encode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub input_bytes: u64,
    /// Bitstream bytes plus the trailer.
    pub output_bytes: u64,
    pub distinct_symbols: usize,
    pub tree_bits: u64,
    pub payload_bits: u64,
}

impl EncodeSummary {
    /// Output size over input size; 0.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Huffman encoder driving counting, tree construction and bit emission.
#[derive(Debug, Clone, Default)]
pub struct HuffmanEncoder {
    options: EncodeOptions,
}

impl HuffmanEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encodes `data` into `sink` and flushes it.
    pub fn encode_to<W: Write>(&self, data: &[u8], sink: W) -> Result<EncodeSummary> {
        let table = self.count_frequencies(data);

        let Some(tree) = HuffmanTree::build(&table) else {
            debug!("Empty input, nothing to encode");
            let mut sink = sink;
            sink.flush()?;
            return Ok(EncodeSummary::default());
        };
        let codes = tree.codes();

        let mut writer = BitWriter::new(sink);
        write_tree(&mut writer, tree.root())?;
        let tree_bits = writer.bits_written();

        for &byte in data {
            let code = codes.get(byte).ok_or(HuffError::MissingCode(byte))?;
            writer.write_bits(code)?;
        }
        let payload_bits = writer.bits_written() - tree_bits;

        let last_byte_bits = writer.last_byte_bits();
        writer.flush()?;
        let stream_bytes = writer.bytes_written();

        let mut sink = writer.into_inner();
        sink.write_u8(last_byte_bits)?;
        sink.flush()?;

        let summary = EncodeSummary {
            input_bytes: data.len() as u64,
            output_bytes: stream_bytes + TRAILER_LEN,
            distinct_symbols: tree.leaf_count(),
            tree_bits,
            payload_bits,
        };
        debug!(
            "Encoded {} bytes: {} symbols, {} tree bits, {} payload bits, {} output bytes",
            summary.input_bytes,
            summary.distinct_symbols,
            summary.tree_bits,
            summary.payload_bits,
            summary.output_bytes
        );
        Ok(summary)
    }

    /// Encodes the file at `input` into `output`, replacing it if it exists.
    pub fn encode_file(&self, input: &Path, output: &Path) -> Result<EncodeSummary> {
        let result = self.encode_file_inner(input, output);
        match &result {
            Ok(summary) => info!(
                "Compressed {} ({} bytes) -> {} ({} bytes)",
                input.display(),
                summary.input_bytes,
                output.display(),
                summary.output_bytes
            ),
            Err(e) => error!(
                "Failed to compress {} -> {}: {}",
                input.display(),
                output.display(),
                e
            ),
        }
        result
    }

    fn encode_file_inner(&self, input: &Path, output: &Path) -> Result<EncodeSummary> {
        let mut source = File::open(input).map_err(|e| HuffError::open(input, e))?;
        let capacity = self.options.buffer_capacity;

        if self.options.atomic {
            let dir = match output.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let temp = NamedTempFile::new_in(dir).map_err(|e| HuffError::open(output, e))?;
            if let Ok(existing) = fs::metadata(output) {
                temp.as_file()
                    .set_permissions(existing.permissions())
                    .map_err(|e| HuffError::open(output, e))?;
            }
            let data = read_all(&mut source)?;
            let summary = self.encode_to(&data, BufWriter::with_capacity(capacity, temp.as_file()))?;
            temp.persist(output)
                .map_err(|e| HuffError::open(output, e.error))?;
            Ok(summary)
        } else {
            let file = File::create(output).map_err(|e| HuffError::open(output, e))?;
            let data = read_all(&mut source)?;
            self.encode_to(&data, BufWriter::with_capacity(capacity, file))
        }
    }

    fn count_frequencies(&self, data: &[u8]) -> FrequencyTable {
        match self.options.parallel_chunk {
            #[cfg(feature = "rayon")]
            Some(chunk) => FrequencyTable::build_parallel(data, chunk),
            #[cfg(not(feature = "rayon"))]
            Some(_) => {
                debug!("parallel_chunk ignored: built without the rayon feature");
                FrequencyTable::build(data)
            }
            None => FrequencyTable::build(data),
        }
    }
}

fn read_all<R: Read>(source: &mut R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    source.read_to_end(&mut data).map_err(HuffError::Read)?;
    Ok(data)
}

/// Encodes `data` into `sink` with default options.
pub fn encode_to<W: Write>(data: &[u8], sink: W) -> Result<EncodeSummary> {
    HuffmanEncoder::default().encode_to(data, sink)
}

/// Encodes the file at `input` into `output` with default options.
pub fn encode_file(input: &Path, output: &Path) -> Result<EncodeSummary> {
    HuffmanEncoder::default().encode_file(input, output)
}
