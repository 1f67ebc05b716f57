use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the huffpack library.
#[derive(Error, Debug)]
pub enum HuffError {
    /// An input or output path could not be opened
    #[error("Failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input could not be read after it was opened
    #[error("Read error: {0}")]
    Read(#[source] io::Error),
    /// The sink rejected a write mid-stream
    #[error("Write error: {0}")]
    Write(#[from] io::Error),
    /// A bit was written after the writer was flushed
    #[error("Bit writer already flushed")]
    WriterFinished,
    /// A symbol reached the payload stage without a bitcode
    #[error("Symbol {0:#04x} has no code")]
    MissingCode(u8),
    /// The bitstream ended inside the tree or inside a code
    #[error("Bitstream ended unexpectedly")]
    Truncated,
    /// The serialized tree is malformed
    #[error("Corrupt tree: {0}")]
    CorruptTree(String),
    /// The stream framing is malformed
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),
}

impl HuffError {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        HuffError::Open {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A specialized `Result` type for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffError>;
