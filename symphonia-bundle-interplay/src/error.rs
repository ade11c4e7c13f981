// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Re-exports the workspace-common error taxonomy under the crate root so
//! callers only need `symphonia_bundle_interplay::{Error, Result}`.

pub use symphonia_core::errors::{
    bad_configuration, map_exhausted, unknown_opcode, Error, Result,
};
