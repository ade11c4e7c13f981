// Symphonia
// Copyright (c) 2019 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type shared by every crate
//! in the workspace.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// `Error` enumerates every way loading or decoding an Interplay MVE stream
/// can fail. Each variant corresponds to one entry of the error taxonomy.
#[derive(Debug)]
pub enum Error {
    /// The container header did not match the expected `Interplay MVE File`
    /// signature and magic words. Recoverable: the caller may try a
    /// different source.
    InvalidSignature,
    /// The byte source ended before a declared payload, packet, or opcode
    /// was fully read. Fatal for this stream.
    Truncated,
    /// An opcode tag was encountered that is not in the opcode table.
    /// Fatal.
    UnknownOpcode(u16),
    /// Audio flags requested an unsupported configuration (stereo or
    /// 16-bit), or video geometry was zero. Fatal.
    BadConfiguration(&'static str),
    /// A skip map or decoding map ran out of data before every block in the
    /// frame was visited. Fatal.
    MapExhausted,
    /// An I/O error occurred reading from the underlying byte source that
    /// is not an end-of-stream condition.
    Io(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSignature => write!(f, "invalid Interplay MVE signature"),
            Error::Truncated => write!(f, "truncated stream"),
            Error::UnknownOpcode(tag) => write!(f, "unknown opcode: {:#06x}", tag),
            Error::BadConfiguration(msg) => write!(f, "bad configuration: {}", msg),
            Error::MapExhausted => write!(f, "skip or decoding map exhausted before block count"),
            Error::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::Truncated,
            _ => Error::Io(Box::new(err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an `Error::BadConfiguration`.
pub fn bad_configuration<T>(msg: &'static str) -> Result<T> {
    Err(Error::BadConfiguration(msg))
}

/// Convenience function to create an `Error::UnknownOpcode`.
pub fn unknown_opcode<T>(tag: u16) -> Result<T> {
    Err(Error::UnknownOpcode(tag))
}

/// Convenience function to create an `Error::MapExhausted`.
pub fn map_exhausted<T>() -> Result<T> {
    Err(Error::MapExhausted)
}

/// Fails with `Error::Truncated` if `cond` is true, otherwise succeeds.
/// Used to guard against short buffered payloads before slicing them.
pub fn truncated_if(cond: bool) -> Result<()> {
    if cond {
        Err(Error::Truncated)
    } else {
        Ok(())
    }
}
