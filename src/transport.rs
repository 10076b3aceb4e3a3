//! The byte-stream boundary the client speaks HTTP over.
//!
//! The client does not own sockets. It owns a [`Transport`]: something that
//! can dial the API host and hand back a fresh bidirectional byte stream,
//! once per logical request. The plain-TCP implementation below covers tests
//! and proxied deployments; a TLS transport is the same trait over a TLS
//! stream and lives with the embedding application, which also owns
//! certificate policy.

use std::future::Future;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Host name of the production Data API.
pub const YOUTUBE_API_HOST: &str = "www.googleapis.com";

/// Dialer for the byte stream a single request/response cycle runs over.
///
/// One [`connect`](Transport::connect) call backs one logical request; the
/// client shuts the stream down when the response has been consumed, so
/// implementations must be able to dial repeatedly.
pub trait Transport {
    /// The stream type produced by [`connect`](Transport::connect).
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Host name to place in the HTTP `Host` header.
    fn host(&self) -> &str;

    /// Opens a fresh byte stream to the API host.
    fn connect(&mut self) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Plain-TCP transport.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
}

impl TcpTransport {
    /// A transport dialing `host:port` for every request.
    ///
    /// The production API only answers TLS on 443; plain TCP is what tests
    /// and local proxies use, and doubles as the reference for writing a TLS
    /// transport.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Transport for TcpTransport {
    type Stream = TcpStream;

    fn host(&self) -> &str {
        &self.host
    }

    async fn connect(&mut self) -> io::Result<TcpStream> {
        TcpStream::connect((self.host.as_str(), self.port)).await
    }
}
