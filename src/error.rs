// Copyright (C) 2026 the fanlog developers
//
// This file is part of fanlog.
//
// fanlog is free software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// fanlog is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with fanlog.  If not,
// see <http://www.gnu.org/licenses/>.

//! [fanlog](crate) errors

use backtrace::Backtrace;

/// [fanlog](crate) error type
///
/// [fanlog](crate) eschews libraries like [thiserror], [anyhow] & [Snafu] in favor of a
/// straightforward enumeration with a few match arms chosen on the basis of what the caller will
/// need to respond. Validation & construction failures are raised synchronously, before any side
/// effect; backend write failures surface as [`Error::Store`] or [`Error::Transport`] from the
/// sender that hit them.
///
/// [thiserror]: https://docs.rs/thiserror
/// [anyhow]: https://docs.rs/anyhow
/// [Snafu]: https://docs.rs/snafu/latest/snafu
#[non_exhaustive]
pub enum Error {
    /// Hostname that is not ASCII, or too long for a syslog line
    BadHostname {
        name: String,
        back: Backtrace,
    },
    /// Malformed inbound JSON payload
    BadPayload {
        source: serde_json::Error,
        back: Backtrace,
    },
    /// Collection name the document store cannot open
    BadCollectionName {
        name: String,
        back: Backtrace,
    },
    /// Tag that is not ASCII, or too long for a syslog line
    BadTag {
        name: String,
        back: Backtrace,
    },
    /// Integral level outside the severity scale; carries the number as it arrived
    InvalidLevel {
        value: serde_json::Number,
        back: Backtrace,
    },
    /// Level that is not an integer at all-- no coercion is attempted
    NonIntegerLevel {
        value: serde_json::Value,
        back: Backtrace,
    },
    /// A value that could not be flattened to a plain mapping
    Normalize {
        source: serde_json::Error,
        back: Backtrace,
    },
    /// Document store write failure
    Store {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
    /// General transport layer error
    Transport {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        back: Backtrace,
    },
}

impl std::fmt::Display for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadHostname { name, .. } => {
                write!(f, "{:?} is not a usable syslog hostname", name)
            }
            Error::BadPayload { source, .. } => {
                write!(f, "While parsing an inbound log payload, got {}", source)
            }
            Error::BadCollectionName { name, .. } => {
                write!(f, "{:?} does not name a document collection", name)
            }
            Error::BadTag { name, .. } => write!(f, "{:?} is not a usable syslog tag", name),
            Error::InvalidLevel { value, .. } => {
                write!(f, "{} is outside the severity scale [0,7]", value)
            }
            Error::NonIntegerLevel { value, .. } => {
                write!(f, "{} is not an integral severity level", value)
            }
            Error::Normalize { source, .. } => write!(
                f,
                "While flattening a value to a plain mapping, got {}",
                source
            ),
            Error::Store { source, .. } => {
                write!(f, "While writing to a document store, got {}", source)
            }
            Error::Transport { source, .. } => {
                write!(f, "While sending a syslog message, got {}", source)
            }
            _ => write!(f, "Other fanlog error"),
        }
    }
}

impl std::fmt::Debug for Error {
    // `Error` is non-exhaustive so that adding variants won't be a breaking change to our
    // callers. That means the compiler won't catch us if we miss a variant here, so we
    // always include a `_` arm.
    #[allow(unreachable_patterns)]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadHostname { name: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::BadPayload { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::BadCollectionName { name: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::BadTag { name: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::InvalidLevel { value: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::NonIntegerLevel { value: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Normalize { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Store { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            Error::Transport { source: _, back } => write!(f, "{}\n{:#?}", self, back),
            _ => write!(f, "{}", self),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
