// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

// Justification: block-copy geometry reads more clearly with the explicit
// `+ 0` anchor terms left in than factored out.
#![allow(clippy::identity_op)]

//! A demuxer and decoder for the Interplay MVE container, the interleaved
//! audio/video format used by Interplay/Westwood adventure games of the
//! 1990s.
//!
//! The container interleaves configuration opcodes, palette updates, one of
//! two block-based video codecs ("format 6" and "format 10"), and queued
//! unsigned 8-bit PCM audio. This crate owns the full decode path: container
//! framing ([`demuxer`]), the triple-buffer video reconstruction state
//! ([`buffers`]), both frame codecs ([`format6`], [`format10`]), and the
//! host-facing façade ([`decoder`]).

mod audio;
mod bitsource;
mod buffers;
mod demuxer;
mod error;
mod format6;
mod format10;
mod skipmap;

pub mod decoder;

pub use audio::AudioStream;
pub use buffers::FrameBuffers;
pub use decoder::MveDecoder;
pub use error::{Error, Result};
