// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SkipStream` decodes the run-length "skip map" side-channel used by
//! format 10 into a lazy sequence of per-block skip flags.
//!
//! The map is read 16-bit words at a time, each word consumed bit-by-bit
//! from least-significant to most-significant: a clear bit means the block
//! is skipped this pass, a set bit means an opcode follows for that block.
//! Format 10 walks the same map three times per frame (see `format10`
//! module docs), so the stream supports [`SkipStream::reset`] rather than
//! being single-pass.

use symphonia_core::errors::{map_exhausted, Result};

pub struct SkipStream<'a> {
    words: &'a [u8],
    word_index: usize,
    bit_index: u32,
}

impl<'a> SkipStream<'a> {
    /// Wraps a raw skip-map byte buffer. `words` must have an even length;
    /// a trailing odd byte (if present) is never consulted.
    pub fn new(words: &'a [u8]) -> Self {
        SkipStream { words, word_index: 0, bit_index: 0 }
    }

    /// Rewinds the stream to its first bit, for format 10's repeated passes.
    pub fn reset(&mut self) {
        self.word_index = 0;
        self.bit_index = 0;
    }

    /// Returns whether the next block is skipped (`true`) or carries an
    /// opcode (`false`), and advances by one bit.
    ///
    /// Fails with [`symphonia_core::errors::Error::MapExhausted`] if the
    /// block count exceeds the available word supply.
    pub fn skip(&mut self) -> Result<bool> {
        let byte_offset = self.word_index * 2;
        if byte_offset + 1 >= self.words.len() {
            return map_exhausted();
        }

        let word = u16::from_le_bytes([self.words[byte_offset], self.words[byte_offset + 1]]);
        let bit = (word >> self.bit_index) & 1;

        self.bit_index += 1;
        if self.bit_index == 16 {
            self.bit_index = 0;
            self.word_index += 1;
        }

        Ok(bit == 0)
    }
}
