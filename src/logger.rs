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

//! The router: one log call in, a fan-out of sender writes out.
//!
//! [`Logger`] orchestrates a single `log(level, message, context)` call:
//!
//! 1. validate the level-- on failure the error propagates to the caller and *no* sender is
//!    contacted;
//! 2. ask the installed [`Strategy`] for the sender set for this level;
//! 3. invoke each selected sender with the raw message & context, sequentially, in the order
//!    the strategy returned.
//!
//! The router performs no normalization itself; that's a per-sender concern. The caller's
//! context mapping is passed by shared reference to every sender and never mutated.
//!
//! Dispatch is fire-and-forget: `log` returns once every `send` has been *issued*, and a
//! sender's write failure is reported on the diagnostic channel rather than surfaced to the
//! caller-- delivery confirmation is a capability this core does not provide. No ordering is
//! guaranteed between overlapping `log` calls from concurrent callers.

use crate::{
    error::Result,
    sender::Sender,
    severity::Severity,
    strategy::Strategy,
};

use serde_json::{Map, Value};

use std::sync::Arc;

/// A logging front-end: a set of installed senders and the strategy that routes among them.
///
/// The installed set is the union of the explicitly configured senders and whatever the
/// strategy contributes at construction time. The strategy is shared, not owned-- one strategy
/// may in principle serve several loggers, though typical usage is 1:1.
pub struct Logger {
    senders: Vec<Arc<dyn Sender>>,
    strategy: Arc<dyn Strategy>,
}

impl Logger {
    /// Construct a logger, applying the strategy's construction-time hooks exactly once:
    /// [`customize_senders`] may add to the installed set, then [`customize_logger`] may
    /// post-process the result.
    ///
    /// [`customize_senders`]: Strategy::customize_senders
    /// [`customize_logger`]: Strategy::customize_logger
    pub fn new(senders: Vec<Arc<dyn Sender>>, strategy: Arc<dyn Strategy>) -> Logger {
        let mut senders = senders;
        let contributed = strategy.customize_senders(&senders);
        senders.extend(contributed);
        let mut logger = Logger {
            senders,
            strategy: Arc::clone(&strategy),
        };
        strategy.customize_logger(&mut logger);
        logger
    }

    /// The installed senders, in installation order.
    pub fn senders(&self) -> &[Arc<dyn Sender>] {
        &self.senders
    }

    /// Add a sender to the installed set (for use from [`Strategy::customize_logger`]).
    pub fn install_sender(&mut self, sender: Arc<dyn Sender>) {
        self.senders.push(sender);
    }

    /// Log one record at an integral level.
    ///
    /// Fails with a validation error-- before any sender is contacted-- unless `level` is an
    /// integer in `[0,7]`.
    pub fn log(&self, level: i64, message: &Value, context: &Map<String, Value>) -> Result<()> {
        let severity = Severity::from_code(level)?;
        self.dispatch(severity, message, context);
        Ok(())
    }

    /// Log one record at a level arriving as arbitrary JSON (the ingestion boundary); the same
    /// no-coercion validation as [`Severity::from_value`].
    pub fn log_value(
        &self,
        level: &Value,
        message: &Value,
        context: &Map<String, Value>,
    ) -> Result<()> {
        let severity = Severity::from_value(level)?;
        self.dispatch(severity, message, context);
        Ok(())
    }

    fn dispatch(&self, severity: Severity, message: &Value, context: &Map<String, Value>) {
        for sender in self.strategy.select_senders(severity) {
            // Fire-and-forget: a failed write must not keep the record from the other senders,
            // or reach the caller.
            if let Err(err) = sender.send(severity, message, context) {
                tracing::error!("sender failed at {}: {}", severity, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    use backtrace::Backtrace;
    use serde_json::json;

    use std::sync::Mutex;

    /// Records every `(severity, message, context)` it's handed; optionally fails.
    struct RecordingSender {
        calls: Mutex<Vec<(Severity, Value, Map<String, Value>)>>,
        fail: bool,
    }

    impl RecordingSender {
        fn new() -> RecordingSender {
            RecordingSender {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }
        fn failing() -> RecordingSender {
            RecordingSender {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
        fn calls(&self) -> Vec<(Severity, Value, Map<String, Value>)> {
            self.calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    impl Sender for RecordingSender {
        fn accepted_levels(&self) -> &[Severity] {
            &[]
        }
        fn send(
            &self,
            severity: Severity,
            message: &Value,
            context: &Map<String, Value>,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push((severity, message.clone(), context.clone()));
            if self.fail {
                Err(Error::Store {
                    source: "backend down".into(),
                    back: Backtrace::new(),
                })
            } else {
                Ok(())
            }
        }
    }

    /// Routes everything to every sender it was built with, in order.
    struct Broadcast(Vec<Arc<dyn Sender>>);

    impl Strategy for Broadcast {
        fn select_senders(&self, _severity: Severity) -> Vec<Arc<dyn Sender>> {
            self.0.clone()
        }
    }

    #[test]
    fn valid_levels_reach_the_strategy_choice() {
        let sender = Arc::new(RecordingSender::new());
        let logger = Logger::new(
            vec![sender.clone()],
            Arc::new(Broadcast(vec![sender.clone()])),
        );
        for level in 0..=7i64 {
            logger.log(level, &json!("hello"), &Map::new()).unwrap();
        }
        let calls = sender.calls();
        assert_eq!(calls.len(), 8);
        for (index, (severity, message, _)) in calls.iter().enumerate() {
            assert_eq!(severity.code() as usize, index);
            assert_eq!(message, &json!("hello"));
        }
    }

    #[test]
    fn invalid_levels_touch_no_sender() {
        let sender = Arc::new(RecordingSender::new());
        let logger = Logger::new(
            vec![sender.clone()],
            Arc::new(Broadcast(vec![sender.clone()])),
        );
        assert!(logger.log(8, &json!("hello"), &Map::new()).is_err());
        assert!(logger.log(-1, &json!("hello"), &Map::new()).is_err());
        assert!(logger
            .log_value(&json!("7"), &json!("hello"), &Map::new())
            .is_err());
        assert!(logger
            .log_value(&json!(3.5), &json!("hello"), &Map::new())
            .is_err());
        assert!(sender.calls().is_empty());
    }

    #[test]
    fn the_context_is_never_mutated() {
        let sender = Arc::new(RecordingSender::new());
        let logger = Logger::new(
            vec![sender.clone()],
            Arc::new(Broadcast(vec![sender.clone()])),
        );
        let context = json!({ "outer": { "inner": [1, 2, 3] }, "user": "holly" })
            .as_object()
            .unwrap()
            .clone();
        let snapshot = context.clone();
        logger.log(5, &json!("hi"), &context).unwrap();
        assert_eq!(context, snapshot);
    }

    #[test]
    fn a_failing_sender_is_not_surfaced_and_does_not_stop_the_fan_out() {
        let first = Arc::new(RecordingSender::failing());
        let second = Arc::new(RecordingSender::new());
        let logger = Logger::new(
            Vec::new(),
            Arc::new(Broadcast(vec![first.clone(), second.clone()])),
        );
        logger.log(2, &json!("boom"), &Map::new()).unwrap();
        assert_eq!(first.calls().len(), 1);
        assert_eq!(second.calls().len(), 1);
    }

    #[test]
    fn strategy_contributions_are_installed_once() {
        struct Contributing(Arc<dyn Sender>);
        impl Strategy for Contributing {
            fn select_senders(&self, _severity: Severity) -> Vec<Arc<dyn Sender>> {
                vec![Arc::clone(&self.0)]
            }
            fn customize_senders(&self, _current: &[Arc<dyn Sender>]) -> Vec<Arc<dyn Sender>> {
                vec![Arc::clone(&self.0)]
            }
            fn customize_logger(&self, logger: &mut Logger) {
                // exercise the post-construction hook too
                logger.install_sender(Arc::new(RecordingSender::new()));
            }
        }

        let contributed = Arc::new(RecordingSender::new());
        let explicit: Arc<dyn Sender> = Arc::new(RecordingSender::new());
        let logger = Logger::new(
            vec![Arc::clone(&explicit)],
            Arc::new(Contributing(contributed.clone())),
        );
        // explicit + contributed + the one installed by customize_logger
        assert_eq!(logger.senders().len(), 3);
    }
}
