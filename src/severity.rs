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

//! Severity scale & syslog facility definitions.
//!
//! [`Severity`] is the fixed total order of eight integer levels every log call carries, 0 the
//! most severe through 7 the least, per RFC [5424]. [`Facility`] replicates the names used in
//! `<syslog.h>`; the syslog sender uses it to label the source of a message.
//!
//! [5424]: https://datatracker.ietf.org/doc/html/rfc5424
//!
//! Only integers already in `[0,7]` are valid levels. Validation never coerces: a fractional
//! number, a numeric string, or anything else that merely *looks* like a level is rejected with
//! an error, not rounded or parsed (see [`Severity::from_value`]).

use crate::error::{Error, Result};

use backtrace::Backtrace;

type StdResult<T, E> = std::result::Result<T, E>;

/// RFC [5424] defines eight severity levels for messages, 0 ("system is unusable") the most
/// severe through 7 ("debug-level message") the least. The discriminants duplicate the numeric
/// codes from the RFC & `<syslog.h>`.
///
/// [5424]: https://datatracker.ietf.org/doc/html/rfc5424
///
/// The derived ordering is the *numeric* ordering, so `Severity::Debug > Severity::Emergency`:
/// "greater" means *less* interesting. Routing strategies lean on this when carving the scale
/// into bands (see [`LeveledStrategy`]).
///
/// [`LeveledStrategy`]: crate::strategy::LeveledStrategy
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    /// system is unusable
    Emergency = 0,
    /// action must be taken immediately
    Alert = 1,
    /// critical conditions
    Critical = 2,
    /// error conditions
    Error = 3,
    /// warning conditions
    Warning = 4,
    /// normal, but significant condition
    Notice = 5,
    /// informational message
    Informational = 6,
    /// debug-level message
    Debug = 7,
}

impl Severity {
    /// The numeric code on the wire & in stored documents.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Validate an integral level.
    ///
    /// Fails with [`Error::InvalidLevel`] for any integer outside `[0,7]`.
    pub fn from_code(value: i64) -> Result<Severity> {
        match value {
            0 => Ok(Severity::Emergency),
            1 => Ok(Severity::Alert),
            2 => Ok(Severity::Critical),
            3 => Ok(Severity::Error),
            4 => Ok(Severity::Warning),
            5 => Ok(Severity::Notice),
            6 => Ok(Severity::Informational),
            7 => Ok(Severity::Debug),
            _ => Err(Error::InvalidLevel {
                value: value.into(),
                back: Backtrace::new(),
            }),
        }
    }

    /// Validate a level arriving as arbitrary JSON (the ingestion boundary).
    ///
    /// Accepts only JSON numbers with a zero fractional part; `3.5`, `"3"`, `true` & friends are
    /// rejected with [`Error::NonIntegerLevel`] rather than coerced. `3.0` *is* accepted-- it has
    /// no fraction, however it was spelled on the wire.
    pub fn from_value(value: &serde_json::Value) -> Result<Severity> {
        let non_integer = || Error::NonIntegerLevel {
            value: value.clone(),
            back: Backtrace::new(),
        };
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Severity::from_code(i)
                } else if let Some(f) = n.as_f64() {
                    if f.fract() != 0.0 {
                        Err(non_integer())
                    } else if (0.0..=7.0).contains(&f) {
                        Severity::from_code(f as i64)
                    } else {
                        // integral, but out of scale-- a u64 past i64::MAX lands here, too;
                        // report the number as it arrived
                        Err(Error::InvalidLevel {
                            value: n.clone(),
                            back: Backtrace::new(),
                        })
                    }
                } else {
                    Err(non_integer())
                }
            }
            _ => Err(non_integer()),
        }
    }
}

impl std::convert::TryFrom<i64> for Severity {
    type Error = Error;
    fn try_from(value: i64) -> StdResult<Severity, Error> {
        Severity::from_code(value)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Severity::Emergency => "emerg",
                Severity::Alert => "alert",
                Severity::Critical => "crit",
                Severity::Error => "err",
                Severity::Warning => "warning",
                Severity::Notice => "notice",
                Severity::Informational => "info",
                Severity::Debug => "debug",
            }
        )
    }
}

impl serde::Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Severity, D::Error> {
        let code = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Severity::from_code(code).map_err(serde::de::Error::custom)
    }
}

/// RFC [5424] defines twenty-four "facilities" for messages. The names duplicate the constants
/// defined in `<syslog.h>`; [`Facility::code`] yields the value multiplied by 8 as used when
/// forming syslog message headers (which again mirrors the `#define`s in `<syslog.h>`).
///
/// [5424]: https://datatracker.ietf.org/doc/html/rfc5424
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Facility {
    /// kernel messages
    Kern = 0,
    /// random user-level messages
    User = 1,
    /// mail system
    Mail = 2,
    /// system daemons
    Daemon = 3,
    /// security/authorization messages
    Auth = 4,
    /// messages generated internally by syslogd
    Syslog = 5,
    /// line printer subsystem
    Lpr = 6,
    /// network news subsystem
    News = 7,
    /// UUCP subsystem
    Uucp = 8,
    /// clock daemon
    Cron = 9,
    /// security/authorization messages (private)
    Authpriv = 10,
    /// ftp daemon
    Ftp = 11,
    /// NTP subsystem
    Ntp = 12,
    /// log audit
    Audit = 13,
    /// log alert
    Alert = 14,
    /// clock daemon (alternate)
    Clock = 15,
    /// reserved for local use
    Local0 = 16,
    /// reserved for local use
    Local1 = 17,
    /// reserved for local use
    Local2 = 18,
    /// reserved for local use
    Local3 = 19,
    /// reserved for local use
    Local4 = 20,
    /// reserved for local use
    Local5 = 21,
    /// reserved for local use
    Local6 = 22,
    /// reserved for local use
    Local7 = 23,
}

impl Facility {
    /// The `<syslog.h>` facility code (the enumeration value shifted left by three).
    pub fn code(self) -> u8 {
        (self as u8) << 3
    }
}

impl std::default::Default for Facility {
    /// The default facility is `User`.
    fn default() -> Self {
        Facility::User
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Facility::Kern => "kern",
                Facility::User => "user",
                Facility::Mail => "mail",
                Facility::Daemon => "daemon",
                Facility::Auth => "auth",
                Facility::Syslog => "syslog",
                Facility::Lpr => "lpr",
                Facility::News => "news",
                Facility::Uucp => "uucp",
                Facility::Cron => "cron",
                Facility::Authpriv => "authpriv",
                Facility::Ftp => "ftp",
                Facility::Ntp => "ntp",
                Facility::Audit => "audit",
                Facility::Alert => "alert",
                Facility::Clock => "clock",
                Facility::Local0 => "local0",
                Facility::Local1 => "local1",
                Facility::Local2 => "local2",
                Facility::Local3 => "local3",
                Facility::Local4 => "local4",
                Facility::Local5 => "local5",
                Facility::Local6 => "local6",
                Facility::Local7 => "local7",
            }
        )
    }
}
