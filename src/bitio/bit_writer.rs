// src/bitio/bit_writer.rs

//! MSB-first bit packing on top of any `std::io::Write` sink.

use crate::utils::error::{HuffError, Result};
use bitvec::prelude::*;
use std::io::Write;

/// A bit-level writer for writing compressed data.
///
/// Bits are placed most-significant-first in each byte. A byte is handed to
/// the sink as soon as its eighth bit arrives; `flush` zero-pads whatever is
/// left. The accumulator belongs to this value alone, so independent encodes
/// never share state.
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_in_current: u8,
    bits_written: u64,
    bytes_written: u64,
    finished: bool,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new BitWriter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_in_current: 0,
            bits_written: 0,
            bytes_written: 0,
            finished: false,
        }
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.finished {
            return Err(HuffError::WriterFinished);
        }

        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            self.emit_current()?;
        }
        Ok(())
    }

    /// Writes a whole byte as eight bit-writes, high bit first.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        for i in (0..8).rev() {
            self.write_bit((byte >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Writes every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Pads the pending byte with zeros, writes it, and flushes the sink.
    ///
    /// Further writes fail with [`HuffError::WriterFinished`], as they do
    /// after any sink error. Flushing twice is a no-op.
    pub fn flush(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        if self.bits_in_current > 0 {
            self.emit_current()?;
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    // a sink error finishes the writer
    fn emit_current(&mut self) -> Result<()> {
        let byte = std::mem::take(&mut self.current_byte);
        self.bits_in_current = 0;
        if let Err(e) = self.writer.write_all(&[byte]) {
            self.finished = true;
            return Err(e.into());
        }
        self.bytes_written += 1;
        Ok(())
    }

    /// Total number of bits written, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Number of bytes handed to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bits waiting in the accumulator (0-7).
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_current
    }

    /// Number of meaningful bits (1-8) in the last byte of the stream.
    ///
    /// Returns 0 while nothing has been written.
    pub fn last_byte_bits(&self) -> u8 {
        match self.bits_written % 8 {
            0 if self.bits_written == 0 => 0,
            0 => 8,
            n => n as u8,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the sink. Pending bits that were never flushed are dropped.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
