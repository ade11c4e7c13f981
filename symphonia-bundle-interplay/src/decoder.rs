// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MveDecoder` is the host-facing façade over [`crate::demuxer::PacketMachine`].
//!
//! `load` validates the container signature and drains configuration
//! packets up to (but not including) the first video packet. Each
//! subsequent `advance_frame` call resumes draining until a `SendVideo`
//! opcode has executed, leaving the current surface and palette coherent
//! for presentation.

use std::io::Read;

use symphonia_core::errors::{Error, Result};
use symphonia_core::io::{MediaSourceStream, ReadBytes};
use symphonia_core::units::FrameRate;

use crate::audio::AudioStream;
use crate::bitsource::BitSource;
use crate::buffers::FrameBuffers;
use crate::demuxer::{Outcome, PacketMachine};

const SIGNATURE: &[u8] = b"Interplay MVE File\x1A";
const MAGIC_WORDS: [u16; 3] = [0x001A, 0x0100, 0x1133];

/// Packets of kind `< 3` carry pre-video configuration; kind `3` carries a
/// video frame (see glossary).
const FIRST_VIDEO_PACKET_KIND: u16 = 3;

pub struct MveDecoder<'s> {
    source: BitSource<MediaSourceStream<'s>>,
    machine: PacketMachine,
}

impl<'s> MveDecoder<'s> {
    /// Validates the signature, reads the fixed header, and drains packets
    /// up to (but not including) the first video packet.
    pub fn load(source: &'s mut dyn Read) -> Result<Self> {
        let mut mss = MediaSourceStream::new(source);
        validate_signature(&mut mss)?;
        let mut source = BitSource::new(mss);

        let mut machine = PacketMachine::new();
        machine.read_first_packet_header(&mut source)?;

        let mut decoder = MveDecoder { source, machine };
        decoder.drain_configuration()?;
        Ok(decoder)
    }

    fn drain_configuration(&mut self) -> Result<()> {
        while self.machine.current_packet_kind() < FIRST_VIDEO_PACKET_KIND && !self.machine.is_done()
        {
            self.machine.process_opcode(&mut self.source)?;
        }
        Ok(())
    }

    /// Drains packets until a video frame has been produced or the stream
    /// has ended.
    pub fn advance_frame(&mut self) -> Result<bool> {
        loop {
            if self.machine.is_done() {
                return Ok(false);
            }
            match self.machine.process_opcode(&mut self.source)? {
                Outcome::Continue => continue,
                Outcome::SentVideo => return Ok(true),
                Outcome::Done => return Ok(false),
            }
        }
    }

    /// A read-only view of the current output surface `F`.
    pub fn current_surface(&self) -> &[u8] {
        self.buffers().current_surface()
    }

    pub fn palette(&self) -> &[u8; 768] {
        self.buffers().palette()
    }

    pub fn palette_dirty(&self) -> bool {
        self.buffers().palette_dirty()
    }

    pub fn clear_palette_dirty(&mut self) {
        self.buffers_mut().clear_palette_dirty()
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.machine.frame_rate()
    }

    /// The number of `SendVideo` opcodes executed so far, starting at `-1`
    /// before the first frame.
    pub fn frame_index(&self) -> i64 {
        self.machine.frame_number()
    }

    /// Surface dimensions in pixels, `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        let buffers = self.buffers();
        (buffers.width(), buffers.height())
    }

    pub fn audio_stream(&self) -> Option<&AudioStream> {
        self.machine.audio()
    }

    pub fn audio_stream_mut(&mut self) -> Option<&mut AudioStream> {
        self.machine.audio_mut()
    }

    fn buffers(&self) -> &FrameBuffers {
        self.machine.buffers().expect("video not yet initialized (no InitVideo opcode seen)")
    }

    fn buffers_mut(&mut self) -> &mut FrameBuffers {
        self.machine.buffers_mut().expect("video not yet initialized (no InitVideo opcode seen)")
    }
}

fn validate_signature(source: &mut MediaSourceStream<'_>) -> Result<()> {
    // A short read here is a genuine Truncated, not an InvalidSignature: the
    // two only diverge once enough bytes are in hand to compare.
    let mut signature = [0u8; 19];
    source.read_buf_exact(&mut signature)?;
    if signature != *SIGNATURE {
        return Err(Error::InvalidSignature);
    }

    for &expected in &MAGIC_WORDS {
        let word = source.read_u16le()?;
        if word != expected {
            return Err(Error::InvalidSignature);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct StreamBuilder {
        buf: Vec<u8>,
    }

    impl StreamBuilder {
        fn new() -> Self {
            let mut buf = Vec::new();
            buf.extend_from_slice(SIGNATURE);
            for word in MAGIC_WORDS {
                buf.extend_from_slice(&word.to_le_bytes());
            }
            StreamBuilder { buf }
        }

        fn packet_header(mut self, length: u16, kind: u16) -> Self {
            self.buf.extend_from_slice(&length.to_le_bytes());
            self.buf.extend_from_slice(&kind.to_le_bytes());
            self
        }

        fn opcode(mut self, tag: u16, payload: &[u8]) -> Self {
            self.buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
            self.buf.extend_from_slice(&tag.to_be_bytes());
            self.buf.extend_from_slice(payload);
            self
        }

        fn end_packet(self, next_length: u16, next_kind: u16) -> Self {
            self.opcode(0x0100, &[]).packet_header(next_length, next_kind)
        }

        fn end(self) -> Self {
            self.opcode(0x0000, &[])
        }

        fn finish(self) -> Vec<u8> {
            self.buf
        }
    }

    fn timer_payload(rate: u32, subdiv: u16) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&rate.to_le_bytes());
        p.extend_from_slice(&subdiv.to_le_bytes());
        p
    }

    fn video_init_payload(w_blocks: u16, h_blocks: u16) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&w_blocks.to_le_bytes());
        p.extend_from_slice(&h_blocks.to_le_bytes());
        p.extend_from_slice(&0u16.to_le_bytes());
        p.extend_from_slice(&0u16.to_le_bytes());
        p
    }

    fn palette_payload(start: u8, triples: &[(u8, u8, u8)]) -> Vec<u8> {
        let mut p = vec![start, triples.len() as u8];
        for &(r, g, b) in triples {
            p.extend_from_slice(&[r, g, b]);
        }
        if p.len() % 2 != 0 {
            p.push(0);
        }
        p
    }

    fn format6_frame(map: &[u16], literals: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; 14];
        for &op in map {
            buf.extend_from_slice(&op.to_le_bytes());
        }
        buf.extend_from_slice(literals);
        buf
    }

    fn send_video_payload() -> Vec<u8> {
        vec![0, 0, 0, 0, 0, 0]
    }

    /// S1: a single format-6 frame, all-literal, checked pixel-by-pixel.
    #[test]
    fn s1_minimal_literal_frame() {
        let literal: Vec<u8> = (0u8..64).collect();
        let data = StreamBuilder::new()
            .packet_header(0, 0)
            .opcode(0x0200, &timer_payload(1_000_000 / 30, 1))
            .opcode(0x0502, &video_init_payload(1, 1))
            .opcode(0x0C00, &palette_payload(0, &[(0x00, 0x15, 0x2A)]))
            .end_packet(0, 3)
            .opcode(0x0600, &format6_frame(&[0x0000], &literal))
            .opcode(0x0701, &send_video_payload())
            .end()
            .finish();

        let mut cursor = Cursor::new(data);
        let mut decoder = MveDecoder::load(&mut cursor).unwrap();
        assert!(decoder.palette_dirty());
        assert!(decoder.advance_frame().unwrap());
        assert_eq!(decoder.current_surface(), &literal[..]);
        assert_eq!(decoder.frame_index(), 0);
    }

    /// S5: an unknown opcode tag is fatal.
    #[test]
    fn s5_unknown_opcode_fails() {
        let data = StreamBuilder::new()
            .packet_header(0, 0)
            .opcode(0xBEEF, &[])
            .end()
            .finish();

        let mut cursor = Cursor::new(data);
        assert!(MveDecoder::load(&mut cursor).is_err());
    }

    /// S4: audio init plus one silent-PCM audio frame enqueues that many
    /// samples.
    #[test]
    fn s4_audio_frame_is_queued() {
        let samples = vec![0x80u8; 1024];
        let mut audio_payload = vec![0u8, 0, 0, 0];
        audio_payload.extend_from_slice(&1024u16.to_le_bytes());
        audio_payload.extend_from_slice(&samples);

        let data = StreamBuilder::new()
            .packet_header(0, 0)
            .opcode(0x0300, &[0, 0, 0, 0, 0x22, 0x56, 0, 0])
            .opcode(0x0800, &audio_payload)
            .end()
            .finish();

        let mut cursor = Cursor::new(data);
        let decoder = MveDecoder::load(&mut cursor).unwrap();
        let audio = decoder.audio_stream().unwrap();
        assert_eq!(audio.sample_count(), 1024);
    }

    /// Invariant 2: frame_index advances by exactly one per SendVideo.
    #[test]
    fn frame_index_advances_by_one_per_frame() {
        let literal: Vec<u8> = vec![0u8; 64];
        let data = StreamBuilder::new()
            .packet_header(0, 0)
            .opcode(0x0502, &video_init_payload(1, 1))
            .end_packet(0, 3)
            .opcode(0x0600, &format6_frame(&[0x0000], &literal))
            .opcode(0x0701, &send_video_payload())
            .end_packet(0, 3)
            .opcode(0x0600, &format6_frame(&[0x0000], &literal))
            .opcode(0x0701, &send_video_payload())
            .end()
            .finish();

        let mut cursor = Cursor::new(data);
        let mut decoder = MveDecoder::load(&mut cursor).unwrap();
        assert_eq!(decoder.frame_index(), -1);
        assert!(decoder.advance_frame().unwrap());
        assert_eq!(decoder.frame_index(), 0);
        assert!(decoder.advance_frame().unwrap());
        assert_eq!(decoder.frame_index(), 1);
        assert!(!decoder.advance_frame().unwrap());
    }

    #[test]
    fn invalid_signature_is_rejected() {
        let data = b"not an mve file at all".to_vec();
        let mut cursor = Cursor::new(data);
        assert!(matches!(MveDecoder::load(&mut cursor), Err(Error::InvalidSignature)));
    }
}
