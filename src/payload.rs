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

//! The ingestion boundary: the payload shape an HTTP (or any other) listener hands the logger.
//!
//! The listener itself-- method validation, response codes-- is not this crate's concern; what
//! *is* specified here is the shape of the JSON body it accepts, `{level?, message, context?}`,
//! and what happens to it: the message is stringified, the context objectified (an array or
//! scalar context arrives as a keyed mapping, not an error), an absent level
//! defaults to 7 (debug), and the result goes through [`Logger::log_value`] with full
//! no-coercion level validation. A malformed body fails [`Payload::from_slice`] with
//! [`Error::BadPayload`]; the listener is expected to log that to its diagnostic channel and
//! answer the request rather than crash.
//!
//! [`Logger::log_value`]: crate::logger::Logger::log_value
//! [`Error::BadPayload`]: crate::error::Error::BadPayload

use crate::{
    error::{Error, Result},
    logger::Logger,
    normalize::{objectify, stringify},
    severity::Severity,
};

use backtrace::Backtrace;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One inbound log request: `{level?, message, context?}`.
#[derive(Debug, Deserialize)]
pub struct Payload {
    /// Left as raw JSON so that level validation-- not deserialization-- rejects a bad level.
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub message: Value,
    /// Any JSON shape; [`objectify`] turns it into a keyed mapping before dispatch.
    #[serde(default)]
    pub context: Option<Value>,
}

impl Payload {
    /// Parse one JSON body.
    pub fn from_slice(bytes: &[u8]) -> Result<Payload> {
        serde_json::from_slice(bytes).map_err(|err| Error::BadPayload {
            source: err,
            back: Backtrace::new(),
        })
    }

    /// Normalize & hand this payload to `logger`.
    ///
    /// An absent level means "debug" (7); a *present* but non-integral level is an error, raised
    /// by the logger before any sender is contacted.
    pub fn dispatch(self, logger: &Logger) -> Result<()> {
        let level = self
            .level
            .unwrap_or_else(|| Value::from(Severity::Debug.code()));
        let message = Value::String(stringify(&self.message));
        let context = match self.context.map(objectify) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        logger.log_value(&level, &message, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{sender::Sender, strategy::Strategy};

    use serde_json::json;

    use std::sync::{Arc, Mutex};

    struct CaptureSender {
        calls: Mutex<Vec<(Severity, Value, Map<String, Value>)>>,
    }

    impl CaptureSender {
        fn new() -> CaptureSender {
            CaptureSender {
                calls: Mutex::new(Vec::new()),
            }
        }
        fn calls(&self) -> Vec<(Severity, Value, Map<String, Value>)> {
            self.calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    impl Sender for CaptureSender {
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
            Ok(())
        }
    }

    struct ToOne(Arc<dyn Sender>);

    impl Strategy for ToOne {
        fn select_senders(&self, _severity: Severity) -> Vec<Arc<dyn Sender>> {
            vec![Arc::clone(&self.0)]
        }
    }

    fn logger_and_capture() -> (Logger, Arc<CaptureSender>) {
        let capture = Arc::new(CaptureSender::new());
        let logger = Logger::new(Vec::new(), Arc::new(ToOne(capture.clone())));
        (logger, capture)
    }

    #[test]
    fn an_absent_level_means_debug() {
        let (logger, capture) = logger_and_capture();
        let payload = Payload::from_slice(br#"{ "message": "hi" }"#).unwrap();
        payload.dispatch(&logger).unwrap();
        let calls = capture.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Severity::Debug);
        assert_eq!(calls[0].1, json!("hi"));
    }

    #[test]
    fn message_and_context_are_normalized() {
        let (logger, capture) = logger_and_capture();
        let payload = Payload::from_slice(
            br#"{ "level": 4, "message": { "message": "inner" }, "context": { "k": 1 } }"#,
        )
        .unwrap();
        payload.dispatch(&logger).unwrap();
        let calls = capture.calls();
        assert_eq!(calls[0].0, Severity::Warning);
        assert_eq!(calls[0].1, json!("inner"));
        assert_eq!(calls[0].2, *json!({ "k": 1 }).as_object().unwrap());
    }

    #[test]
    fn a_non_integral_level_is_rejected_before_any_sender() {
        let (logger, capture) = logger_and_capture();
        let payload =
            Payload::from_slice(br#"{ "level": "7", "message": "hi" }"#).unwrap();
        assert!(payload.dispatch(&logger).is_err());
        let payload = Payload::from_slice(br#"{ "level": 6.5, "message": "hi" }"#).unwrap();
        assert!(payload.dispatch(&logger).is_err());
        assert!(capture.calls().is_empty());
    }

    #[test]
    fn a_non_mapping_context_is_objectified() {
        let (logger, capture) = logger_and_capture();
        let payload =
            Payload::from_slice(br#"{ "message": "hi", "context": [1, 2] }"#).unwrap();
        payload.dispatch(&logger).unwrap();
        assert_eq!(
            capture.calls()[0].2,
            *json!({ "0": 1, "1": 2 }).as_object().unwrap()
        );

        let payload =
            Payload::from_slice(br#"{ "message": "hi", "context": "lone" }"#).unwrap();
        payload.dispatch(&logger).unwrap();
        assert_eq!(
            capture.calls()[1].2,
            *json!({ "value": "lone" }).as_object().unwrap()
        );
    }

    #[test]
    fn a_malformed_body_is_a_payload_error() {
        assert!(matches!(
            Payload::from_slice(b"{ not json"),
            Err(Error::BadPayload { .. })
        ));
    }

    #[test]
    fn a_messageless_body_still_logs_its_dump() {
        let (logger, capture) = logger_and_capture();
        let payload = Payload::from_slice(br#"{ "level": 5 }"#).unwrap();
        payload.dispatch(&logger).unwrap();
        // `message` defaulted to null; its structural dump is the text
        assert_eq!(capture.calls()[0].1, json!("null"));
    }
}
