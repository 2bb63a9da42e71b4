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

//! A leveled, multi-sender structured logging router.
//!
//! # Introduction
//!
//! Applications that log seriously rarely log to one place: the chatter goes somewhere cheap, the
//! alarms somewhere a human will see them, and everything in between somewhere queryable. What
//! stays constant is the call site-- `log(level, message, context)`-- and what varies is where a
//! record of a given seriousness should land.
//!
//! [fanlog](crate) keeps those concerns apart with three seams:
//!
//! 1. a [`Sender`] performs one side-effecting write to one backend (a document store, a syslog
//!    daemon), optionally filtered by an accepted-level list;
//!
//! 2. a [`Strategy`] maps a severity level to the ordered set of senders that should receive the
//!    record;
//!
//! 3. the [`Logger`] validates the level once, asks the strategy, and fans the raw record out to
//!    each selected sender in order.
//!
//! Normalization-- making arbitrary runtime values safe to persist or transmit-- is deliberately
//! a *per-sender* concern: the store sender keeps structure, the syslog sender flattens to one
//! depth-limited line, and both work from the same untouched caller context. The pure conversion
//! rules live in [`normalize`] & [`inspect`].
//!
//! Dispatch is fire-and-forget: `log()` returns once every selected `send` has been issued.
//! Delivery, ordering across senders, and retry are transport responsibilities, not the
//! router's.
//!
//! # Usage
//!
//! Route the severity scale into three bands, one collection each:
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::{json, Map};
//! use fanlog::store::{DocumentStore, MemoryStore, StoreSender};
//! use fanlog::{LeveledStrategy, Logger};
//!
//! let store = MemoryStore::new();
//! let chatter = Arc::new(StoreSender::open(Vec::new(), &store, "chatter").unwrap());
//! let middle = Arc::new(StoreSender::open(Vec::new(), &store, "middle").unwrap());
//! let alarms = Arc::new(StoreSender::open(Vec::new(), &store, "alarms").unwrap());
//!
//! // level 7 is "low interest"; levels 0-3 are "high"
//! let strategy = Arc::new(LeveledStrategy::new(chatter, middle, alarms));
//! let logger = Logger::new(Vec::new(), strategy);
//!
//! logger.log(3, &json!("disk failing"), &Map::new()).unwrap();
//! logger.log(7, &json!("tick"), &Map::new()).unwrap();
//!
//! assert_eq!(store.collection("alarms").unwrap().len(), 1);
//! assert_eq!(store.collection("chatter").unwrap().len(), 1);
//! assert!(store.collection("middle").unwrap().is_empty());
//! ```
//!
//! A syslog sender on the same logger would receive the very same record and render it as one
//! line through its [`Transport`](transport::Transport); see [`syslog`].

pub mod config;
pub mod error;
pub mod inspect;
pub mod logger;
pub mod normalize;
pub mod payload;
pub mod sender;
pub mod severity;
pub mod store;
pub mod strategy;
pub mod syslog;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use logger::Logger;
pub use payload::Payload;
pub use sender::Sender;
pub use severity::{Facility, Severity};
pub use strategy::{LeveledStrategy, Strategy};
