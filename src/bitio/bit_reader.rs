// src/bitio/bit_reader.rs

use crate::utils::error::{HuffError, Result};
use std::io::{ErrorKind, Read};

/// A bit-level reader for reading compressed data.
///
/// Mirrors [`BitWriter`](super::BitWriter): bits come out most-significant
/// first, and the reader keeps count of how many it has handed out so the
/// decoder can stop at the last meaningful bit.
pub struct BitReader<R: Read> {
    reader: R,
    current_byte: u8,
    bits_remaining: u8,
    position: u64,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: 0,
            bits_remaining: 0,
            position: 0,
        }
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_remaining == 0 {
            let mut byte = [0u8; 1];
            match self.reader.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(HuffError::Truncated),
                Err(e) => return Err(HuffError::Read(e)),
            }
            self.current_byte = byte[0];
            self.bits_remaining = 8;
        }

        self.bits_remaining -= 1;
        self.position += 1;
        Ok((self.current_byte >> self.bits_remaining) & 1 == 1)
    }

    /// Reads eight bits, high bit first.
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.read_bit()? as u8;
        }
        Ok(byte)
    }

    /// Number of bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.position
    }
}
