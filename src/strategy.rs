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

//! Routing strategies.
//!
//! A [`Strategy`] is the policy seam between one `log()` call and the senders that should see
//! it: given a severity, it returns the ordered set of senders to invoke. A strategy may also
//! contribute senders to the logger's installed set at construction time
//! ([`customize_senders`]), and post-process the logger itself ([`customize_logger`]).
//!
//! [`customize_senders`]: Strategy::customize_senders
//! [`customize_logger`]: Strategy::customize_logger
//!
//! [`LeveledStrategy`] is the reference implementation: it carves the severity scale into three
//! interest bands and routes each band to its own sender.

use crate::{logger::Logger, sender::Sender, severity::Severity};

use std::sync::Arc;

/// Operations all routing strategies must support.
pub trait Strategy: Send + Sync {
    /// The ordered senders that should receive a record at `severity`. Duplicates aren't
    /// forbidden, just wasteful.
    fn select_senders(&self, severity: Severity) -> Vec<Arc<dyn Sender>>;

    /// Senders this strategy contributes to the logger's installed set, applied once at logger
    /// construction. `current` is what's installed so far.
    fn customize_senders(&self, _current: &[Arc<dyn Sender>]) -> Vec<Arc<dyn Sender>> {
        Vec::new()
    }

    /// Post-process the logger itself, applied once at construction.
    fn customize_logger(&self, _logger: &mut Logger) {}
}

/// Route by interest band: the least severe levels to a "low interest" sender, the most severe
/// to a "high interest" sender, and the band between to a "medium interest" sender.
///
/// Because severity increases toward 0, "low interest" catches the numerically *large* levels
/// first:
///
/// 1. `severity >= min_low` selects the low-interest sender;
/// 2. otherwise `severity <= max_high` selects the high-interest sender;
/// 3. otherwise the medium-interest sender.
///
/// The thresholds must satisfy `max_high < min_low` for the medium band to be non-empty; the
/// strategy does not validate this, and a degenerate configuration silently starves the medium
/// sender. Only values satisfying the [`Sender`] contract can be supplied at all-- the capability
/// check is the type system's.
pub struct LeveledStrategy {
    low: Arc<dyn Sender>,
    medium: Arc<dyn Sender>,
    high: Arc<dyn Sender>,
    min_low: Severity,
    max_high: Severity,
}

impl LeveledStrategy {
    /// Default thresholds: only level 7 is "low interest"; levels 0 through 3 are "high".
    pub fn new(
        low: Arc<dyn Sender>,
        medium: Arc<dyn Sender>,
        high: Arc<dyn Sender>,
    ) -> LeveledStrategy {
        LeveledStrategy::with_thresholds(low, medium, high, Severity::Debug, Severity::Error)
    }

    pub fn with_thresholds(
        low: Arc<dyn Sender>,
        medium: Arc<dyn Sender>,
        high: Arc<dyn Sender>,
        min_low: Severity,
        max_high: Severity,
    ) -> LeveledStrategy {
        LeveledStrategy {
            low,
            medium,
            high,
            min_low,
            max_high,
        }
    }
}

impl Strategy for LeveledStrategy {
    fn select_senders(&self, severity: Severity) -> Vec<Arc<dyn Sender>> {
        if severity >= self.min_low {
            vec![Arc::clone(&self.low)]
        } else if severity <= self.max_high {
            vec![Arc::clone(&self.high)]
        } else {
            vec![Arc::clone(&self.medium)]
        }
    }

    fn customize_senders(&self, current: &[Arc<dyn Sender>]) -> Vec<Arc<dyn Sender>> {
        // contribute the three leveled senders, minus any already installed
        let mut extra: Vec<Arc<dyn Sender>> = Vec::new();
        for sender in [&self.low, &self.medium, &self.high] {
            if !current
                .iter()
                .any(|installed| Arc::ptr_eq(installed, sender))
            {
                extra.push(Arc::clone(sender));
            }
        }
        extra
    }
}
