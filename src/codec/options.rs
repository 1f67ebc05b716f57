// src/codec/options.rs

/// Settings for file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write to a temporary file next to the destination and rename it into
    /// place only once the whole stream is written. When `false` the
    /// destination is truncated up front and a failed encode leaves whatever
    /// was already flushed. A replaced destination keeps its permissions; a
    /// new one is created with the temporary file's owner-only mode.
    pub atomic: bool,
    /// Capacity of the buffer between the bit writer and the file.
    pub buffer_capacity: usize,
    /// Chunk size for parallel frequency counting. Only honored with the
    /// `rayon` feature.
    pub parallel_chunk: Option<usize>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_capacity: 64 * 1024,
            parallel_chunk: None,
        }
    }
}
