// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `PacketMachine` is the top-level opcode-driven state machine.
//!
//! It reads one opcode at a time, each framed as
//! `(payloadLength: u16LE, opcodeTag: u16BE)` followed by `payloadLength`
//! raw bytes (note the tag is read big-endian while every other multi-byte
//! field in the container, including the length right next to it, is
//! little-endian — see [`crate::bitsource`]). Packets are an outer framing
//! unit: opcode `0x0100` reads the next packet header and yields control
//! back to the caller; opcode `0x0000` marks the stream's end.

use log::{debug, warn};

use symphonia_core::errors::{bad_configuration, unknown_opcode, Error, Result};
use symphonia_core::io::{BufReader, ReadBytes};
use symphonia_core::units::FrameRate;

use crate::audio::AudioStream;
use crate::bitsource::BitSource;
use crate::buffers::FrameBuffers;
use crate::{format10, format6};

/// The codec a buffered frame payload should be decoded with once
/// `SendVideo` arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFormat {
    Six,
    Ten,
}

/// What happened while processing one opcode; drives the caller's loop.
pub enum Outcome {
    /// An ordinary opcode ran; keep draining.
    Continue,
    /// `0x0701` ran a full frame decode.
    SentVideo,
    /// `0x0000`; the stream is exhausted.
    Done,
}

pub struct PacketMachine {
    done: bool,
    current_packet_kind: u16,
    frame_rate: FrameRate,
    frame_number: i64,
    pending_format: Option<PendingFormat>,
    frame_data: Vec<u8>,
    skip_map: Vec<u8>,
    decoding_map: Vec<u8>,
    buffers: Option<FrameBuffers>,
    audio: Option<AudioStream>,
}

impl PacketMachine {
    pub fn new() -> Self {
        PacketMachine {
            done: false,
            current_packet_kind: 0,
            frame_rate: FrameRate::default(),
            frame_number: -1,
            pending_format: None,
            frame_data: Vec::new(),
            skip_map: Vec::new(),
            decoding_map: Vec::new(),
            buffers: None,
            audio: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn current_packet_kind(&self) -> u16 {
        self.current_packet_kind
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn frame_number(&self) -> i64 {
        self.frame_number
    }

    pub fn buffers(&self) -> Option<&FrameBuffers> {
        self.buffers.as_ref()
    }

    pub fn buffers_mut(&mut self) -> Option<&mut FrameBuffers> {
        self.buffers.as_mut()
    }

    pub fn audio(&self) -> Option<&AudioStream> {
        self.audio.as_ref()
    }

    pub fn audio_mut(&mut self) -> Option<&mut AudioStream> {
        self.audio.as_mut()
    }

    /// Reads the first packet header. Called once, right after the
    /// container signature has been validated.
    pub fn read_first_packet_header<R: ReadBytes>(&mut self, src: &mut BitSource<R>) -> Result<()> {
        let _length = src.read_u16le()?;
        self.current_packet_kind = src.read_u16le()?;
        Ok(())
    }

    /// Processes exactly one opcode record.
    pub fn process_opcode<R: ReadBytes>(&mut self, src: &mut BitSource<R>) -> Result<Outcome> {
        let payload_length = src.read_u16le()? as usize;
        let tag = src.read_u16be()?;
        let payload = src.read_bytes(payload_length)?;
        let mut body = BufReader::new(&payload);

        match tag {
            0x0000 => {
                debug!("interplay: end of stream");
                self.done = true;
                return Ok(Outcome::Done);
            }
            0x0100 => {
                let _length = src.read_u16le()?;
                self.current_packet_kind = src.read_u16le()?;
                debug!("interplay: entering packet of kind {}", self.current_packet_kind);
            }
            0x0200 => {
                let rate = body.read_u32le()?;
                let subdiv = body.read_u16le()?;
                let fps = 1_000_000.0 / (rate as f64 * subdiv as f64);
                self.frame_rate = FrameRate::try_from_fps(fps).ok_or(Error::BadConfiguration(
                    "timer opcode produced a non-finite or non-positive frame rate",
                ))?;
                debug!("interplay: frame rate set to {}", self.frame_rate);
            }
            0x0300 => {
                let _unk = body.read_u16le()?;
                let flags = body.read_u16le()?;
                let sample_rate = body.read_u16le()?;
                let _buf_len = body.read_u16le()?;
                if flags & 0x3 != 0 {
                    return bad_configuration(
                        "audio stream requests stereo or 16-bit samples, only mono 8-bit is supported",
                    );
                }
                self.audio = Some(AudioStream::new(sample_rate));
                debug!("interplay: audio initialized at {} Hz", sample_rate);
            }
            0x0400 => {
                // StartAudio: informational, playback may begin.
            }
            0x0502 => {
                let w_blocks = body.read_u16le()? as usize;
                let h_blocks = body.read_u16le()? as usize;
                let _count = body.read_u16le()?;
                let _true_color = body.read_u16le()?;
                self.buffers = Some(FrameBuffers::new(w_blocks, h_blocks)?);
                debug!("interplay: video geometry {}x{} blocks", w_blocks, h_blocks);
            }
            0x0600 => {
                self.frame_data = payload.into_vec();
                self.pending_format = Some(PendingFormat::Six);
            }
            0x0701 => {
                let _pal_start = body.read_u16le()?;
                let _pal_count = body.read_u16le()?;
                let _unk = body.read_u16le()?;
                self.send_video()?;
                debug!("interplay: sent frame {}", self.frame_number);
                return Ok(Outcome::SentVideo);
            }
            0x0800 => {
                let _seq = body.read_u16le()?;
                let _mask = body.read_u16le()?;
                let len = body.read_u16le()? as usize;
                let samples = body.read_boxed_slice_exact(len)?;
                if let Some(audio) = self.audio.as_mut() {
                    audio.push(samples);
                } else {
                    warn!("interplay: audio frame with no initialized audio stream, dropping");
                }
            }
            0x0900 => {
                let _seq = body.read_u16le()?;
                let _mask = body.read_u16le()?;
                let len = body.read_u16le()? as usize;
                if let Some(audio) = self.audio.as_mut() {
                    audio.push_silence(len);
                } else {
                    warn!("interplay: silent audio frame with no initialized audio stream, dropping");
                }
            }
            0x0A00 => {
                // SetMode: informational, ignored by the core.
            }
            0x0C00 => {
                let pal_start = body.read_byte()? as usize;
                let pal_count = body.read_byte()? as usize;
                let mut triples = Vec::with_capacity(pal_count);
                for _ in 0..pal_count {
                    let r = body.read_byte()?;
                    let g = body.read_byte()?;
                    let b = body.read_byte()?;
                    triples.push((r, g, b));
                }
                if let Some(buffers) = self.buffers.as_mut() {
                    buffers.set_palette(pal_start, &triples);
                } else {
                    warn!("interplay: palette update before video init, dropping");
                }
            }
            0x0E00 => {
                self.skip_map = payload.into_vec();
            }
            0x0F00 => {
                self.decoding_map = payload.into_vec();
            }
            0x1000 => {
                self.frame_data = payload.into_vec();
                self.pending_format = Some(PendingFormat::Ten);
            }
            other => {
                return unknown_opcode(other);
            }
        }

        Ok(Outcome::Continue)
    }

    fn send_video(&mut self) -> Result<()> {
        self.frame_number += 1;

        let buffers = match self.buffers.as_mut() {
            Some(buffers) => buffers,
            None => return bad_configuration("send-video opcode before video init"),
        };

        match self.pending_format {
            Some(PendingFormat::Six) => {
                format6::decode(buffers, &self.frame_data, self.frame_number)?;
            }
            Some(PendingFormat::Ten) => {
                format10::decode(buffers, &self.skip_map, &self.decoding_map, &self.frame_data)?;
            }
            None => {
                // No frame data arrived yet; leave F as-is (still a valid,
                // if degenerate, frame).
            }
        }

        Ok(())
    }
}

impl Default for PacketMachine {
    fn default() -> Self {
        PacketMachine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opcode(tag: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        buf.extend_from_slice(&tag.to_be_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn end_opcode_sets_done() {
        let data = opcode(0x0000, &[]);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        let outcome = machine.process_opcode(&mut reader).unwrap();
        assert!(matches!(outcome, Outcome::Done));
        assert!(machine.is_done());
    }

    #[test]
    fn unknown_opcode_is_fatal() {
        let data = opcode(0xBEEF, &[]);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        assert!(machine.process_opcode(&mut reader).is_err());
    }

    #[test]
    fn timer_opcode_sets_frame_rate() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1_000_000u32.to_le_bytes());
        payload.extend_from_slice(&30u16.to_le_bytes());
        let data = opcode(0x0200, &payload);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        machine.process_opcode(&mut reader).unwrap();
        assert!((machine.frame_rate().fps() - (1.0 / 30.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_rate_timer_is_rejected_not_a_panic() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&0u32.to_le_bytes());
        payload.extend_from_slice(&0u16.to_le_bytes());
        let data = opcode(0x0200, &payload);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        assert!(machine.process_opcode(&mut reader).is_err());
    }

    #[test]
    fn stereo_audio_is_rejected() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&0u16.to_le_bytes());
        payload.extend_from_slice(&1u16.to_le_bytes()); // flags: stereo bit set
        payload.extend_from_slice(&22050u16.to_le_bytes());
        payload.extend_from_slice(&0u16.to_le_bytes());
        let data = opcode(0x0300, &payload);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        assert!(machine.process_opcode(&mut reader).is_err());
    }

    #[test]
    fn odd_palette_count_consumes_its_pad_byte() {
        let mut payload = vec![0u8, 3]; // palStart=0, palCount=3
        payload.extend_from_slice(&[0x00, 0x15, 0x2A, 0x10, 0x20, 0x30, 0x01, 0x02, 0x03]);
        payload.push(0); // pad byte
        let data = opcode(0x0C00, &payload);
        let mut reader = BitSource::new(BufReader::new(&data));
        let mut machine = PacketMachine::new();
        machine.buffers = Some(FrameBuffers::new(1, 1).unwrap());
        machine.process_opcode(&mut reader).unwrap();
        assert!(machine.buffers().unwrap().palette_dirty());

        // The opcode record framing after the palette must still be intact.
        let mut trailing = BufReader::new(&data);
        trailing.ignore_bytes(4 + payload.len() as u64).unwrap();
    }
}
