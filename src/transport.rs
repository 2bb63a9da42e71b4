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

//! Wire transports for the syslog sender.
//!
//! [`SyslogSender`] assembles each record into one line of bytes and hands it to a [`Transport`];
//! everything below that-- datagrams versus streams, framing, where the daemon lives-- is decided
//! here. Three implementations cover the usual deployments: UDP datagrams ([`UdpTransport`]),
//! newline-framed TCP ([`TcpTransport`]) and, on Linux, the local daemon's own datagram socket
//! ([`UnixSocket`]).
//!
//! [`SyslogSender`]: crate::syslog::SyslogSender
//!
//! # Examples
//!
//! A daemon on the conventional UDP port on this machine:
//!
//! ```rust
//! use fanlog::transport::UdpTransport;
//! let transport = UdpTransport::local().unwrap();
//! ```
//!
//! Construction resolves & connects up front, so a bogus endpoint fails there, not at the first
//! log call:
//!
//! ```rust
//! use fanlog::transport::UdpTransport;
//! assert!(UdpTransport::new("no-such-host.invalid:5514").is_err());
//! ```

use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::net::TcpStream;
#[cfg(target_os = "linux")]
use std::{os::unix::net::UnixDatagram, path::Path};

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      transport mechanisms                                      //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// One write of an assembled log line to wherever syslog lines go.
///
/// `Send + Sync` because senders-- and the transports inside them-- are shared across whatever
/// threads call the logger.
pub trait Transport: Send + Sync {
    /// Deliver `buf`, one complete line with no trailing newline (stream transports append their
    /// own framing). Returns the count of payload bytes sent.
    fn send(&self, buf: &[u8]) -> Result<usize>;
}

/// One UDP datagram per line.
pub struct UdpTransport {
    socket: std::net::UdpSocket,
}

impl UdpTransport {
    /// Connect a datagram socket (bound to an ephemeral local port) to the daemon at `addr`.
    pub fn new<A: std::net::ToSocketAddrs>(addr: A) -> Result<UdpTransport> {
        let socket = std::net::UdpSocket::bind("127.0.0.1:0").map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        socket.connect(addr).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(UdpTransport { socket })
    }
    /// The conventional local endpoint, `localhost:514`.
    pub fn local() -> Result<UdpTransport> {
        UdpTransport::new("localhost:514")
    }
}

impl Transport for UdpTransport {
    fn send(&self, buf: &[u8]) -> Result<usize> {
        self.socket.send(buf).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })
    }
}

/// One line per write on a connected TCP stream, framed by a trailing newline.
pub struct TcpTransport {
    socket: TcpStream,
}

impl TcpTransport {
    /// Connect a stream to the daemon at `addr`.
    pub fn new<A: std::net::ToSocketAddrs>(addr: A) -> Result<TcpTransport> {
        Ok(TcpTransport {
            socket: TcpStream::connect(addr).map_err(|err| Error::Transport {
                source: Box::new(err),
                back: Backtrace::new(),
            })?,
        })
    }
    /// The conventional local endpoint, `localhost:514`.
    pub fn try_default() -> Result<TcpTransport> {
        TcpTransport::new("localhost:514")
    }
}

impl Transport for TcpTransport {
    fn send(&self, buf: &[u8]) -> Result<usize> {
        use std::io::Write;
        // `Write` wants `&mut self` and we only have `&self`; `Write` is implemented on
        // `&TcpStream` as well as `TcpStream`, so take a `&mut &TcpStream` receiver.
        let mut writer: &TcpStream = &self.socket;
        writer.write_all(buf).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        writer.write_all(&[10]).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        writer.flush().map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;

        Ok(buf.len())
    }
}

/// The local daemon's datagram socket, `/dev/log` by convention.
#[cfg(target_os = "linux")]
pub struct UnixSocket {
    socket: UnixDatagram,
}

#[cfg(target_os = "linux")]
impl UnixSocket {
    /// Connect an unbound datagram socket to the daemon listening at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<UnixSocket> {
        let sock = UnixDatagram::unbound().map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        sock.connect(path).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(UnixSocket { socket: sock })
    }
    pub fn try_default() -> Result<UnixSocket> {
        UnixSocket::new("/dev/log")
    }
}

#[cfg(target_os = "linux")]
impl Transport for UnixSocket {
    fn send(&self, buf: &[u8]) -> Result<usize> {
        let cb_written = self.socket.send(buf).map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(cb_written)
    }
}
