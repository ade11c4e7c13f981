// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Read;

use super::ReadBytes;
use crate::errors::{Error, Result};

/// `MediaSourceStream` is a thin, forward-only view over an externally
/// owned byte source.
///
/// The source is any `Read` implementation (a file, a `Cursor<Vec<u8>>`, a
/// network stream, ...); ownership of it remains with the host, matching
/// spec §3: "the byte source is externally owned; the decoder holds a
/// non-owning reference". Symphonia's `MediaSourceStream` additionally
/// buffers for backward seeking; that capability is dropped here since the
/// container is read strictly forward.
pub struct MediaSourceStream<'s> {
    source: &'s mut dyn Read,
    pos: u64,
}

impl<'s> MediaSourceStream<'s> {
    /// Wraps a byte source for forward-only reading.
    pub fn new(source: &'s mut dyn Read) -> Self {
        MediaSourceStream { source, pos: 0 }
    }
}

impl ReadBytes for MediaSourceStream<'_> {
    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_buf_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_buf_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.source.read_exact(buf).map_err(|err| -> Error { err.into() })?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn ignore_bytes(&mut self, count: u64) -> Result<()> {
        // There is no portable way to skip bytes on an arbitrary `Read` without
        // either seeking (unsupported; forward-only) or copying through a
        // buffer, so drain in fixed-size chunks.
        let mut remaining = count;
        let mut scratch = [0u8; 1024];

        while remaining > 0 {
            let chunk = remaining.min(scratch.len() as u64) as usize;
            self.read_buf_exact(&mut scratch[..chunk])?;
            remaining -= chunk as u64;
        }

        Ok(())
    }

    fn pos(&self) -> u64 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tracks_position_across_reads() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5, 6]);
        let mut mss = MediaSourceStream::new(&mut cursor);

        assert_eq!(mss.read_u16le().unwrap(), 0x0201);
        assert_eq!(mss.pos(), 2);
        mss.ignore_bytes(2).unwrap();
        assert_eq!(mss.pos(), 4);
        assert_eq!(mss.read_byte().unwrap(), 5);
    }

    #[test]
    fn underrun_is_truncated() {
        let mut cursor = Cursor::new(vec![1u8]);
        let mut mss = MediaSourceStream::new(&mut cursor);
        assert!(matches!(mss.read_u16le(), Err(Error::Truncated)));
    }
}
