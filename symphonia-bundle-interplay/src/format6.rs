// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "format 6" frame codec.
//!
//! Format 6 reconstructs `F` directly from a two-pass opcode map embedded in
//! the frame buffer, plus a literal-block bitstream. Reference rotation
//! happens up front (`R0 -> R1`, `F -> R0`) so that by the time the passes
//! run, `R0` is the previous displayed frame and `R1` is two frames back;
//! pass 2 can then also read the in-progress `F` for intra-frame motion,
//! since blocks are visited in the same row-major order they were written.

use symphonia_core::errors::{truncated_if, Result};
use symphonia_core::io::{BufReader, ReadBytes};

use crate::buffers::{decode_offset, FrameBuffers, SurfaceId};

const HEADER_LEN: usize = 14;
const BLOCK_BYTES: usize = 64;

/// Reconstructs `F` for `frame_number` from `frame_data` (the buffered
/// `0x0600` payload), per spec §4.4.
pub fn decode(buffers: &mut FrameBuffers, frame_data: &[u8], frame_number: i64) -> Result<()> {
    if frame_number > 1 {
        buffers.copy_surface(SurfaceId::R1, SurfaceId::R0);
    }
    if frame_number > 0 {
        buffers.copy_surface(SurfaceId::R0, SurfaceId::F);
    }

    let block_count = buffers.block_count();
    let map_len = 2 * block_count;
    truncated_if(frame_data.len() < HEADER_LEN + map_len)?;

    let map = &frame_data[HEADER_LEN..HEADER_LEN + map_len];
    let literal_data = &frame_data[HEADER_LEN + map_len..];
    let mut literals = BufReader::new(literal_data);

    // Pass 1: literal blocks and R1 copy-forward.
    {
        let mut map_reader = BufReader::new(map);
        for block in 0..block_count {
            let op = map_reader.read_u16le()?;
            if op == 0 {
                let literal = literals.read_boxed_slice_exact(BLOCK_BYTES)?;
                buffers.copy_literal_block(SurfaceId::F, block, &literal);
            } else if frame_number > 1 {
                buffers.copy_block_with_offset(SurfaceId::F, SurfaceId::R1, block, 0);
            }
        }
    }

    // Pass 2: motion compensation from R0 (inter-frame) or F (intra-frame).
    let mut map_reader = BufReader::new(map);
    for block in 0..block_count {
        let op = map_reader.read_u16le()?;
        if op == 0 {
            continue;
        }

        let offset = decode_offset(op);
        if op & 0x8000 != 0 {
            if frame_number > 0 {
                buffers.copy_block_with_offset(SurfaceId::F, SurfaceId::R0, block, offset);
            }
        } else {
            buffers.copy_block_with_offset(SurfaceId::F, SurfaceId::F, block, offset);
        }
    }

    Ok(())
}
