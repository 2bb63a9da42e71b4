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

//! Normalization primitives: arbitrary runtime values in, transport-safe forms out.
//!
//! # Introduction
//!
//! Senders persist or transmit whatever the caller handed to `log()`; these functions make that
//! safe. [`objectify`] turns any value into a plain keyed mapping (with one deliberate
//! exception-- instants become their ISO-8601 text, see [`objectify_instant`]). [`stringify`]
//! turns any value into message text.
//!
//! [`serde_json::Value`] is the crate's transport-safe value model. Typed ("classed") shapes
//! enter it through [`objectify_struct`], which flattens a value to the mapping of its own
//! fields by serde reflection-- the result has the input's fields & values but none of its type
//! identity.
//!
//! All of these are pure: none of them mutates its input, and a caller-supplied mapping is
//! passed through rather than defensively copied. Copy-on-write is the *caller's* job (the
//! store sender, for instance, clones the context before stamping it).

use crate::error::{Error, Result};

use backtrace::Backtrace;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

/// Convert an arbitrary value into a plain keyed mapping.
///
/// - a mapping passes through unchanged;
/// - a sequence becomes a mapping with its integer indices as keys (`"0"`, `"1"`, ...),
///   discarding sequence-specific behavior;
/// - a scalar (string including the empty string, number including `-0`, boolean, `null`)
///   becomes the single-key mapping `{ "value": <original> }`, the original preserved exactly
///   (`serde_json::Number` keeps the sign of a negative zero).
pub fn objectify(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        Value::Array(items) => {
            let mut map = Map::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                map.insert(index.to_string(), item);
            }
            Value::Object(map)
        }
        scalar => {
            let mut map = Map::with_capacity(1);
            map.insert("value".to_owned(), scalar);
            Value::Object(map)
        }
    }
}

/// Convert an instant into its ISO-8601 UTC text.
///
/// The single case in which "objectify" does *not* produce an object: a date is more useful to
/// every transport as `"2026-08-30T12:00:00.000Z"` than as a bag of fields.
pub fn objectify_instant<Tz: TimeZone>(when: &DateTime<Tz>) -> Value {
    Value::String(
        when.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Flatten a typed value to the plain mapping of its own fields.
///
/// Serde is the reflection here: whatever fields the type serializes are the keys the mapping
/// carries, and the type identity is gone. A type that serializes to something other than a
/// mapping is routed back through [`objectify`], so the result is a plain mapping (or ISO-8601
/// text, if the type serializes as an instant already).
pub fn objectify_struct<T: serde::Serialize>(value: &T) -> Result<Value> {
    let flat = serde_json::to_value(value).map_err(|err| Error::Normalize {
        source: err,
        back: Backtrace::new(),
    })?;
    Ok(objectify(flat))
}

/// Objectify a float, including the non-finite ones JSON cannot carry.
///
/// `NaN` & `±Infinity` have no `serde_json::Number` representation; they become their
/// conventional names as strings. Finite floats-- `-0.0` and its sign included-- become numbers.
pub fn objectify_f64(value: f64) -> Value {
    let inner = match serde_json::Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => Value::String(
            if value.is_nan() {
                "NaN"
            } else if value > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            }
            .to_owned(),
        ),
    };
    objectify(inner)
}

/// Convert an arbitrary value into message text.
///
/// - a string passes through verbatim (no quoting);
/// - a mapping carrying a `"message"` field yields that field, stringified in turn;
/// - everything else renders as its structural dump-- `42`, `true`, `{}` for an empty mapping,
///   `[]` for an empty sequence. The dump is a diagnostic fallback for malformed inputs, not an
///   error.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("message") {
            Some(message) => stringify(message),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// The "custom text conversion" hook: a typed message renders however its [`Display`]
/// implementation says it should.
///
/// [`Display`]: std::fmt::Display
pub fn stringify_display<T: std::fmt::Display>(message: &T) -> String {
    message.to_string()
}
