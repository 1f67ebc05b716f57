//! # huffpack
//!
//! Whole-file Huffman compression with a self-describing bit-level format.
//!
//! This library is organized into several modules:
//! - `utils`: error handling
//! - `bitio`: MSB-first bit writer and reader
//! - `model`: frequency counting, tree construction and bitcode derivation
//! - `codec`: tree serialization, the encoder, the decoder and encode options
//!
//! ```no_run
//! use std::path::Path;
//!
//! let summary = huffpack::encode_file(Path::new("input.txt"), Path::new("input.huf"))?;
//! println!("{} -> {} bytes", summary.input_bytes, summary.output_bytes);
//! huffpack::decode_file(Path::new("input.huf"), Path::new("roundtrip.txt"))?;
//! # Ok::<(), huffpack::HuffError>(())
//! ```

// Re-export commonly used types at the crate root
pub use utils::error::{HuffError, Result};

pub mod utils {
    pub mod error;
}

pub mod bitio {
    pub mod bit_reader;
    pub mod bit_writer;

    pub use self::bit_reader::BitReader;
    pub use self::bit_writer::BitWriter;
}

pub mod model {
    pub mod codes;
    pub mod frequency;
    pub mod tree;

    pub use self::codes::{Code, CodeTable};
    pub use self::frequency::FrequencyTable;
    pub use self::tree::{HuffNode, HuffmanTree, MergeOrder};
}

pub mod codec {
    pub mod decoder;
    pub mod encoder;
    pub mod options;
    pub mod tree_format;

    pub use self::decoder::{decode, decode_file};
    pub use self::encoder::{EncodeSummary, HuffmanEncoder, encode_file, encode_to};
    pub use self::options::EncodeOptions;
    pub use self::tree_format::{DecodeNode, read_tree, tree_bit_len, write_tree};
}

// Public API exports
pub use bitio::{BitReader, BitWriter};
pub use codec::{
    DecodeNode, EncodeOptions, EncodeSummary, HuffmanEncoder, decode, decode_file, encode_file,
    encode_to,
};
pub use model::{CodeTable, FrequencyTable, HuffNode, HuffmanTree};
