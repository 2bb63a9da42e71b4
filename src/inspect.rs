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

//! Depth-limited structural rendering.
//!
//! Text transports (a syslog line, say) need the context on one line and of bounded size;
//! [`inspect`] renders a value structurally while carrying a remaining-depth budget. A container
//! nested past the budget renders as an elision marker-- `[Object]` or `[Array]`-- instead of
//! expanding; everything within the budget renders with its actual nested values. The depth knob
//! is the caller's only trade between serialization completeness & output size.
//!
//! The renderer is an explicit recursion, not a language-provided inspector, so the depth
//! contract stays precise: `depth` is the number of container levels expanded *below* the root.
//! With [`DEFAULT_DEPTH`] (2), the root, its children & grandchildren expand; anything deeper
//! elides.

use serde_json::{Map, Value};

use std::fmt::Write;

/// How many container levels below the root expand when the caller doesn't say.
pub const DEFAULT_DEPTH: usize = 2;

/// Render `value` on a single line, expanding containers at most `depth` levels below the root.
pub fn inspect(value: &Value, depth: usize) -> String {
    let mut out = String::new();
    render(value, depth + 1, &mut out);
    out
}

/// Render a keyed mapping on a single line; the braces count as the root level.
pub fn inspect_map(map: &Map<String, Value>, depth: usize) -> String {
    let mut out = String::new();
    render_map(map, depth + 1, &mut out);
    out
}

fn render(value: &Value, budget: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => {
            let _ = write!(out, "'{}'", escape(s));
        }
        Value::Array(items) => {
            if budget == 0 {
                out.push_str("[Array]");
            } else if items.is_empty() {
                out.push_str("[]");
            } else {
                out.push_str("[ ");
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    render(item, budget - 1, out);
                }
                out.push_str(" ]");
            }
        }
        Value::Object(map) => render_map(map, budget, out),
    }
}

fn render_map(map: &Map<String, Value>, budget: usize, out: &mut String) {
    if budget == 0 {
        out.push_str("[Object]");
    } else if map.is_empty() {
        out.push_str("{}");
    } else {
        out.push_str("{ ");
        for (index, (key, item)) in map.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}: ", key);
            render(item, budget - 1, out);
        }
        out.push_str(" }");
    }
}

// One line, always: newlines in string values would break line-oriented transports.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
