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

//! Logger configuration.
//!
//! An explicit struct enumerating every recognized option with its documented default, in place
//! of optional-parameter defaults scattered through constructors. Merging is deterministic: a
//! field the caller spells out wins, anything absent takes the default (serde field defaults do
//! the merge).
//!
//! # Examples
//!
//! Wire a logger from a parsed configuration:
//!
//! ```rust
//! use std::sync::Arc;
//! use fanlog::store::{MemoryStore, StoreSender};
//! use fanlog::{Config, LeveledStrategy, Logger, Sender};
//!
//! let config = Config::from_json(r#"{ "collection_name": "audit", "min_low": 6 }"#).unwrap();
//!
//! let store = MemoryStore::new();
//! let collected: Arc<dyn Sender> = Arc::new(
//!     StoreSender::open(config.accepted_levels.clone(), &store, &config.collection_name)
//!         .unwrap(),
//! );
//! let strategy = Arc::new(LeveledStrategy::with_thresholds(
//!     Arc::clone(&collected),
//!     Arc::clone(&collected),
//!     collected,
//!     config.min_low,
//!     config.max_high,
//! ));
//! let logger = Logger::new(Vec::new(), strategy);
//! logger
//!     .log(6, &serde_json::json!("configured"), &serde_json::Map::new())
//!     .unwrap();
//! ```

use crate::{
    error::{Error, Result},
    inspect::DEFAULT_DEPTH,
    severity::Severity,
};

use backtrace::Backtrace;
use serde::Deserialize;

/// Everything the process wiring can configure, with its defaults.
///
/// | field | default |
/// |-------|---------|
/// | `serve_path` | `"/log"` |
/// | `collection_name` | `"log"` |
/// | `depth` | `2` |
/// | `accepted_levels` | empty (accept all) |
/// | `min_low` | `7` (debug) |
/// | `max_high` | `3` (err) |
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path the (out-of-core) ingestion endpoint serves.
    pub serve_path: String,
    /// Collection the document-store sender writes to.
    pub collection_name: String,
    /// Context nesting levels the syslog sender expands.
    pub depth: usize,
    /// Levels the configured senders act on; empty accepts all.
    pub accepted_levels: Vec<Severity>,
    /// Least severe end of the leveled strategy's "low interest" band.
    pub min_low: Severity,
    /// Most severe end of the "high interest" band.
    pub max_high: Severity,
}

impl std::default::Default for Config {
    fn default() -> Self {
        Config {
            serve_path: "/log".to_owned(),
            collection_name: "log".to_owned(),
            depth: DEFAULT_DEPTH,
            accepted_levels: Vec::new(),
            min_low: Severity::Debug,
            max_high: Severity::Error,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON text; absent fields take their defaults.
    pub fn from_json(text: &str) -> Result<Config> {
        serde_json::from_str(text).map_err(|err| Error::BadPayload {
            source: err,
            back: Backtrace::new(),
        })
    }
}
