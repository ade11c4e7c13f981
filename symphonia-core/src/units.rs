// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common units shared between the demuxer and decoder.
//!
//! Scoped down from upstream Symphonia's `units` module (which also carries
//! sample-rate and channel-count newtypes for PCM/compressed audio formats in
//! general): the Interplay MVE container only ever produces one fixed audio
//! configuration, so only a frame rate newtype is needed here.

use std::fmt;

/// The container's fixed video frame rate, expressed as frames per second.
///
/// Interplay MVE does not encode a frame rate in the stream itself; it is a
/// convention of the playback engine. `FrameRate` exists so callers don't
/// have to remember whether a raw `f64` is frames-per-second or
/// seconds-per-frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
    /// The frame rate used by Interplay MVE playback, unless overridden.
    pub const DEFAULT: FrameRate = FrameRate(1000.0 / 66.667);

    /// Constructs a `FrameRate` from a frames-per-second value.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not a finite, positive value. Reserved for
    /// callers holding a value they already know is well-formed (e.g. a
    /// literal or a value returned by `try_from_fps`); a value computed
    /// from an untrusted stream should go through
    /// [`FrameRate::try_from_fps`] instead.
    pub fn from_fps(fps: f64) -> FrameRate {
        assert!(fps.is_finite() && fps > 0.0, "frame rate must be finite and positive");
        FrameRate(fps)
    }

    /// Constructs a `FrameRate` from a frames-per-second value, returning
    /// `None` instead of panicking if it is not finite and positive.
    ///
    /// Stream-supplied rate fields (e.g. the `0x0200` Timer opcode's
    /// `rate`/`subdiv`) can be zero or produce a non-finite quotient; this
    /// is the fallible entry point for values derived from such fields.
    pub fn try_from_fps(fps: f64) -> Option<FrameRate> {
        if fps.is_finite() && fps > 0.0 {
            Some(FrameRate(fps))
        } else {
            None
        }
    }

    /// The frame rate in frames per second.
    pub fn fps(self) -> f64 {
        self.0
    }

    /// The duration of one frame, in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        1.0 / self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::DEFAULT
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} fps", self.0)
    }
}
