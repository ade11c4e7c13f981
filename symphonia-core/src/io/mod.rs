// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `io` module implements composable byte-level I/O.
//!
//! Unlike upstream Symphonia's `io` module, there is no seek support here:
//! the Interplay MVE container is read strictly forward (see spec
//! Non-goals), so [`MediaSourceStream`] only ever consumes bytes in order.

mod buf_reader;
mod media_source_stream;

pub use buf_reader::BufReader;
pub use media_source_stream::MediaSourceStream;

use crate::errors::{Error, Result};

/// `ReadBytes` provides methods to read bytes from a stream and interpret
/// them as little- or big-endian unsigned integers.
///
/// The Interplay MVE container mixes endianness within a single opcode
/// record (the opcode tag is big-endian, its length and every other
/// multi-byte field is little-endian) so both byte orders are provided
/// directly on the trait rather than requiring the caller to pick a mode.
pub trait ReadBytes {
    /// Reads a single byte from the stream.
    fn read_byte(&mut self) -> Result<u8>;

    /// Reads exactly `buf.len()` bytes into `buf`, or fails with
    /// [`Error::Truncated`].
    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Ignores (skips over) `count` bytes of the stream.
    fn ignore_bytes(&mut self, count: u64) -> Result<()>;

    /// The number of bytes read from the stream so far.
    fn pos(&self) -> u64;

    /// Reads a little-endian unsigned 16-bit integer.
    #[inline]
    fn read_u16le(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_buf_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Reads a big-endian unsigned 16-bit integer.
    #[inline]
    fn read_u16be(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_buf_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reads a little-endian unsigned 32-bit integer.
    #[inline]
    fn read_u32le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_buf_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Reads `len` bytes and returns them as an owned, boxed slice.
    fn read_boxed_slice_exact(&mut self, len: usize) -> Result<Box<[u8]>> {
        let mut buf = vec![0u8; len];
        self.read_buf_exact(&mut buf)?;
        Ok(buf.into_boxed_slice())
    }
}

impl<'b, R: ReadBytes + ?Sized> ReadBytes for &'b mut R {
    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    #[inline]
    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_buf_exact(buf)
    }

    #[inline]
    fn ignore_bytes(&mut self, count: u64) -> Result<()> {
        (**self).ignore_bytes(count)
    }

    #[inline]
    fn pos(&self) -> u64 {
        (**self).pos()
    }
}

/// Returns a [`Error::Truncated`] error. Shared by both [`BufReader`] and
/// [`MediaSourceStream`] underrun paths.
pub(crate) fn truncated<T>() -> Result<T> {
    Err(Error::Truncated)
}
