// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BitSource` is a thin view over the container's byte source.
//!
//! Despite the name (kept for continuity with the format this decoder is
//! modeled on), it never does sub-byte bit-packing: Interplay MVE packs
//! everything on byte boundaries. What makes it worth a wrapper rather than
//! using `ReadBytes` directly is the mixed endianness baked into the
//! container (opcode tags are big-endian; every other multi-byte field is
//! little-endian, see demuxer module docs) and the `skip`/`read_bytes`
//! helpers the demuxer and codecs share.

use symphonia_core::errors::Result;
use symphonia_core::io::ReadBytes;

/// A byte-oriented reader over the container stream or a buffered frame
/// payload. Generic over any [`ReadBytes`] implementation so the same API
/// serves both the live container stream (`MediaSourceStream`) and buffered
/// side-channel data (`BufReader`).
pub struct BitSource<R: ReadBytes> {
    reader: R,
}

impl<R: ReadBytes> BitSource<R> {
    /// Wraps a reader as a `BitSource`.
    pub fn new(reader: R) -> Self {
        BitSource { reader }
    }

    /// Reads a little-endian unsigned 16-bit integer.
    pub fn read_u16le(&mut self) -> Result<u16> {
        self.reader.read_u16le()
    }

    /// Reads a big-endian unsigned 16-bit integer. Used only for opcode tags.
    pub fn read_u16be(&mut self) -> Result<u16> {
        self.reader.read_u16be()
    }

    /// Reads a little-endian unsigned 32-bit integer.
    pub fn read_u32le(&mut self) -> Result<u32> {
        self.reader.read_u32le()
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.reader.read_byte()
    }

    /// Reads exactly `len` bytes into a freshly allocated boxed slice.
    pub fn read_bytes(&mut self, len: usize) -> Result<Box<[u8]>> {
        self.reader.read_boxed_slice_exact(len)
    }

    /// Skips exactly `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.reader.ignore_bytes(len as u64)
    }

    /// The number of bytes consumed from this source so far.
    pub fn pos(&self) -> u64 {
        self.reader.pos()
    }

    /// Unwraps the `BitSource`, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
