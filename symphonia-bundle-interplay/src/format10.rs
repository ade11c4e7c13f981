// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "format 10" frame codec.
//!
//! Format 10 makes three passes over the same skip map, using `R0` as a
//! scratch workspace built from the previous frame's `R1`. Pass 1 writes
//! literal blocks into `R0`; pass 2 overwrites non-literal blocks in `R0`
//! with motion-compensated data sourced from `R0` or `R1`; pass 3 copies
//! the finished `R0` into `F` for presentation. `R0`/`R1` are swapped once
//! the frame is done, so the next frame's workspace starts from what was
//! just shown.

use symphonia_core::errors::{truncated_if, Result};
use symphonia_core::io::{BufReader, ReadBytes};

use crate::buffers::{decode_offset, FrameBuffers, SurfaceId};
use crate::skipmap::SkipStream;

const HEADER_LEN: usize = 14;
const BLOCK_BYTES: usize = 64;

/// Reconstructs `F` from `skip_map`, `decoding_map`, and `frame_data` (the
/// buffered `0x1000` payload), per spec §4.5, and rotates `R0`/`R1`.
pub fn decode(
    buffers: &mut FrameBuffers,
    skip_map: &[u8],
    decoding_map: &[u8],
    frame_data: &[u8],
) -> Result<()> {
    truncated_if(frame_data.len() < HEADER_LEN)?;
    let literal_data = &frame_data[HEADER_LEN..];
    let mut literals = BufReader::new(literal_data);

    let block_count = buffers.block_count();
    let mut skip = SkipStream::new(skip_map);
    let mut map = BufReader::new(decoding_map);

    // Pass 1: literal blocks land directly in R0.
    for block in 0..block_count {
        if skip.skip()? {
            continue;
        }
        let op = map.read_u16le()?;
        if op == 0 {
            let literal = literals.read_boxed_slice_exact(BLOCK_BYTES)?;
            buffers.copy_literal_block(SurfaceId::R0, block, &literal);
        }
    }

    // Pass 2: motion-compensated blocks overwrite R0 in place.
    skip.reset();
    let mut map = BufReader::new(decoding_map);
    for block in 0..block_count {
        if skip.skip()? {
            continue;
        }
        let op = map.read_u16le()?;
        if op != 0 {
            let offset = decode_offset(op);
            let source = if op & 0x8000 != 0 { SurfaceId::R1 } else { SurfaceId::R0 };
            buffers.copy_block_with_offset(SurfaceId::R0, source, block, offset);
        }
    }

    // Pass 3: present the finished workspace. Skipped blocks keep F's
    // existing contents from the prior frame.
    skip.reset();
    for block in 0..block_count {
        if skip.skip()? {
            continue;
        }
        buffers.copy_block_with_offset(SurfaceId::F, SurfaceId::R0, block, 0);
    }

    buffers.swap_r0_r1();

    Ok(())
}
