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

//! The syslog sender.
//!
//! [`SyslogSender`] writes each accepted record as a single text line through a [`Transport`]
//! implementation:
//!
//! ```text
//! <hostname> <tag> <facility>.<severity>: <message> <context>
//! ```
//!
//! The facility & severity appear as their textual names (the `Display` tables in
//! [`severity`](crate::severity)); the context is rendered by the depth-limited inspector, so
//! anything nested past the sender's `depth` (default 2) shows as `[Object]` rather than
//! expanding. Depth is the caller's only knob for trading serialization completeness against
//! line size.
//!
//! # Examples
//!
//! ```rust
//! use fanlog::severity::{Facility, Severity};
//! use fanlog::syslog::SyslogSender;
//! use fanlog::transport::UdpTransport;
//!
//! let sender = SyslogSender::builder(UdpTransport::local().unwrap())
//!     .facility(Facility::Daemon)
//!     .accepted_levels(vec![Severity::Error, Severity::Warning])
//!     .depth(4)
//!     .build();
//! ```

use crate::{
    error::{Error, Result},
    inspect::{inspect_map, DEFAULT_DEPTH},
    normalize::stringify,
    sender::Sender,
    severity::{Facility, Severity},
    transport::Transport,
};

use backtrace::Backtrace;

use serde_json::{Map, Value};

type StdResult<T, E> = std::result::Result<T, E>;

/// A syslog tag: at most forty-eight bytes of ASCII.
pub struct Tag(String);

impl Tag {
    pub fn new(name: String) -> Result<Tag> {
        if name.is_ascii() && name.len() < 49 {
            Ok(Tag(name))
        } else {
            Err(Error::BadTag {
                name,
                back: Backtrace::new(),
            })
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl std::convert::TryFrom<String> for Tag {
    type Error = Error;
    fn try_from(x: String) -> StdResult<Self, Error> {
        Tag::new(x)
    }
}

impl std::default::Default for Tag {
    /// Attempt to figure out a tag from the current executable's file name; if that can't be
    /// retrieved, or isn't usable ASCII, simply "-".
    fn default() -> Self {
        std::env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .and_then(|name| Tag::new(name).ok())
            .unwrap_or_else(|| Tag("-".to_owned()))
    }
}

/// A hostname as it will appear on the line: at most 255 bytes of ASCII.
pub struct Hostname(String);

impl Hostname {
    pub fn new(name: String) -> Result<Hostname> {
        if name.is_ascii() && name.len() < 256 {
            Ok(Hostname(name))
        } else {
            Err(Error::BadHostname {
                name,
                back: Backtrace::new(),
            })
        }
    }
}

impl std::fmt::Display for Hostname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl std::convert::TryFrom<String> for Hostname {
    type Error = Error;
    fn try_from(x: String) -> StdResult<Self, Error> {
        Hostname::new(x)
    }
}

impl std::default::Default for Hostname {
    /// Attempt to discover this host's name; failing that, simply "-".
    fn default() -> Self {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .and_then(|name| Hostname::new(name).ok())
            .unwrap_or_else(|| Hostname("-".to_owned()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      struct SyslogSender                                       //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// A [`Sender`] that writes one name-mapped syslog line per accepted record.
pub struct SyslogSender<T: Transport> {
    accepted: Vec<Severity>,
    hostname: Hostname,
    tag: Tag,
    facility: Facility,
    depth: usize,
    transport: T,
}

impl<T: Transport> SyslogSender<T> {
    /// A sender over `transport` with discovered hostname & tag, the `user` facility, all levels
    /// accepted, and the default depth.
    pub fn new(transport: T) -> SyslogSender<T> {
        SyslogSender {
            accepted: Vec::new(),
            hostname: Hostname::default(),
            tag: Tag::default(),
            facility: Facility::default(),
            depth: DEFAULT_DEPTH,
            transport,
        }
    }

    pub fn builder(transport: T) -> SyslogSenderBuilder<T> {
        SyslogSenderBuilder {
            imp: SyslogSender::new(transport),
        }
    }
}

pub struct SyslogSenderBuilder<T: Transport> {
    imp: SyslogSender<T>,
}

impl<T: Transport> SyslogSenderBuilder<T> {
    pub fn accepted_levels(mut self, accepted: Vec<Severity>) -> Self {
        self.imp.accepted = accepted;
        self
    }
    pub fn facility(mut self, facility: Facility) -> Self {
        self.imp.facility = facility;
        self
    }
    /// Container levels to expand below the root when rendering the context.
    pub fn depth(mut self, depth: usize) -> Self {
        self.imp.depth = depth;
        self
    }
    pub fn tag(mut self, tag: Tag) -> Self {
        self.imp.tag = tag;
        self
    }
    pub fn tag_as_string(mut self, tag: String) -> Result<Self> {
        self.imp.tag = Tag::try_from(tag)?;
        Ok(self)
    }
    pub fn hostname(mut self, hostname: Hostname) -> Self {
        self.imp.hostname = hostname;
        self
    }
    pub fn hostname_as_string(mut self, hostname: String) -> Result<Self> {
        self.imp.hostname = Hostname::try_from(hostname)?;
        Ok(self)
    }
    pub fn build(self) -> SyslogSender<T> {
        self.imp
    }
}

impl<T: Transport> Sender for SyslogSender<T> {
    fn accepted_levels(&self) -> &[Severity] {
        &self.accepted
    }

    fn send(
        &self,
        severity: Severity,
        message: &Value,
        context: &Map<String, Value>,
    ) -> Result<()> {
        if !self.accepts(severity) {
            return Ok(());
        }

        let mut buf = format!(
            "{} {} {}.{}: {}",
            self.hostname,
            self.tag,
            self.facility,
            severity,
            stringify(message)
        )
        .into_bytes();

        use bytes::BufMut;
        if !context.is_empty() {
            buf.put_u8(b' ');
            buf.put_slice(inspect_map(context, self.depth).as_bytes());
        }

        self.transport.send(&buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use std::sync::Mutex;

    /// A [`Transport`] that just captures each line it's handed.
    #[derive(Default)]
    struct CaptureTransport {
        lines: Mutex<Vec<String>>,
    }

    impl CaptureTransport {
        fn lines(&self) -> Vec<String> {
            self.lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    impl Transport for &CaptureTransport {
        fn send(&self, buf: &[u8]) -> Result<usize> {
            self.lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(String::from_utf8(buf.to_vec()).unwrap());
            Ok(buf.len())
        }
    }

    fn sender(transport: &CaptureTransport, depth: usize) -> SyslogSender<&CaptureTransport> {
        SyslogSender::builder(transport)
            .hostname_as_string("bree.local".to_owned())
            .unwrap()
            .tag_as_string("prototyping".to_owned())
            .unwrap()
            .depth(depth)
            .build()
    }

    fn deep_context() -> Map<String, Value> {
        json!({ "a": { "b": { "c": { "d": { "e": { "f": "bottom" } } } } } })
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn one_line_with_mapped_names() {
        let capture = CaptureTransport::default();
        let sender = sender(&capture, DEFAULT_DEPTH);
        sender
            .send(Severity::Warning, &json!("look out"), &Map::new())
            .unwrap();
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "bree.local prototyping user.warning: look out");
    }

    #[test]
    fn default_depth_elides_deep_context() {
        let capture = CaptureTransport::default();
        let sender = sender(&capture, DEFAULT_DEPTH);
        sender
            .send(Severity::Error, &json!("deep"), &deep_context())
            .unwrap();
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("bottom"));
        assert!(lines[0].contains("[Object]"));
    }

    #[test]
    fn a_generous_depth_shows_deep_context() {
        let capture = CaptureTransport::default();
        let sender = sender(&capture, 10);
        sender
            .send(Severity::Error, &json!("deep"), &deep_context())
            .unwrap();
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("'bottom'"));
        assert!(!lines[0].contains("[Object]"));
    }

    #[test]
    fn filtered_levels_write_nothing() {
        let capture = CaptureTransport::default();
        let sender = SyslogSender::builder(&capture)
            .accepted_levels(vec![Severity::Emergency, Severity::Alert])
            .build();
        sender
            .send(Severity::Debug, &json!("chatter"), &Map::new())
            .unwrap();
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn tag_and_hostname_bounds() {
        assert!(Tag::new("a".repeat(48)).is_ok());
        assert!(Tag::new("a".repeat(49)).is_err());
        assert!(Tag::new("日誌".to_owned()).is_err());
        assert!(Hostname::new("h".repeat(255)).is_ok());
        assert!(Hostname::new("h".repeat(256)).is_err());
        // discovery defaults never fail
        let _ = Tag::default();
        let _ = Hostname::default();
    }
}
