// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Shared infrastructure used by the Interplay MVE bundle crate: a small
//! byte/bit I/O layer and a common error taxonomy. Both are deliberately
//! scoped down from upstream Symphonia's `symphonia-core`: there is no
//! format/codec registry, no probing, and no seeking support, since the
//! Interplay MVE container is demuxed and decoded strictly forward by a
//! single, known decoder (see `errors` and `io` module docs for details).

pub mod errors;
pub mod io;
pub mod units;
