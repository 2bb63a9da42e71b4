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

//! The sender contract.
//!
//! A [`Sender`] is a backend-writing capability: it accepts a validated `(severity, message,
//! context)` triple and performs one side-effecting write. Concrete implementations live in
//! [`store`] & [`syslog`]; routing strategies and the logger consume the trait polymorphically,
//! holding senders by shared reference ([`Arc<dyn Sender>`]) for the process lifetime.
//!
//! [`store`]: crate::store
//! [`syslog`]: crate::syslog
//! [`Arc<dyn Sender>`]: std::sync::Arc
//!
//! Each sender optionally filters by an accepted-level list: an empty list accepts everything; a
//! non-empty list that excludes the record's severity makes `send` a silent no-op, not an error.
//! Normalization is a per-sender concern-- the logger hands every sender the *same* raw message &
//! context, by shared reference, so two senders may persist different normalized shapes of one
//! logical record, and none of them may mutate the caller's context. A sender needing derived
//! fields (a storage timestamp, say) works on its own clone.

use crate::{error::Result, severity::Severity};

use serde_json::{Map, Value};

/// Operations all senders must support.
pub trait Sender: Send + Sync {
    /// The levels this sender will act on; empty means "all of them".
    fn accepted_levels(&self) -> &[Severity];

    /// Consulted before any side effect.
    fn accepts(&self, severity: Severity) -> bool {
        let accepted = self.accepted_levels();
        accepted.is_empty() || accepted.contains(&severity)
    }

    /// Write one record to this sender's backend (a no-op if `severity` isn't accepted).
    ///
    /// The router treats this as fire-and-forget: an implementation may kick off I/O that
    /// completes later, and the error it returns reports only what went wrong *issuing* the
    /// write.
    fn send(&self, severity: Severity, message: &Value, context: &Map<String, Value>)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Picky(Vec<Severity>);

    impl Sender for Picky {
        fn accepted_levels(&self) -> &[Severity] {
            &self.0
        }
        fn send(
            &self,
            _severity: Severity,
            _message: &Value,
            _context: &Map<String, Value>,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn an_empty_list_accepts_everything() {
        let sender = Picky(Vec::new());
        for code in 0..=7i64 {
            assert!(sender.accepts(Severity::from_code(code).unwrap()));
        }
    }

    #[test]
    fn a_non_empty_list_filters() {
        let sender = Picky(vec![Severity::Error, Severity::Debug]);
        assert!(sender.accepts(Severity::Error));
        assert!(sender.accepts(Severity::Debug));
        assert!(!sender.accepts(Severity::Informational));
        assert!(!sender.accepts(Severity::Emergency));
    }
}
