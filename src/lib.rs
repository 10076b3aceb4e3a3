//! Client for the YouTube Data API v3 over an abstract byte-stream
//! transport.
//!
//! Most HTTP stacks hide the wire; this crate deliberately does not. The
//! embedding application supplies the byte stream (anything implementing
//! [`Transport`] — a TCP socket, a TLS session, an in-memory pipe in tests),
//! and the crate does the rest by hand: it builds bounded request paths for
//! a fixed set of query modes, walks the response's header block without
//! buffering it, decodes the JSON document defensively, and parses the API's
//! rigid text encodings (RFC 3339-subset timestamps, ISO 8601-subset
//! durations) into plain calendar values.
//!
//! # Outcomes
//!
//! Every operation keeps four ends of a request apart:
//!
//! - `Err(Error::Transport(_))` — the byte stream failed or stalled past the
//!   read timeout.
//! - `Err(Error::Status { .. })` — the API answered with a non-2xx code,
//!   preserved verbatim.
//! - `Ok(None)` — a well-formed answer with zero matching resources. An
//!   unknown video id lands here, not in an error.
//! - `Err(Error::Json(_) | Error::Field(_))` — the answer could not be
//!   understood: the body was not JSON, or a fixed-format field (timestamp,
//!   duration, counter) was corrupt.
//!
//! # Example
//!
//! ```rust,no_run
//! use youtube_data_api::{ApiKey, TcpTransport, YouTubeClient};
//!
//! # async fn example() -> youtube_data_api::Result<()> {
//! let key = ApiKey::new(std::env::var("YT_API_KEY").expect("YT_API_KEY set"))?;
//! let mut client = YouTubeClient::new(key, TcpTransport::new("www.googleapis.com", 80));
//!
//! if let Some(details) = client.get_video_content_details("dQw4w9WgXcQ").await? {
//!     println!("runs for {}s", details.duration.total_seconds());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # One request, one connection
//!
//! The client asks for `Connection: close` and shuts the stream down after
//! every logical request, so the [`Transport`] is a *dialer*, not a held
//! socket. Operations take `&mut self`; a client instance serves one request
//! at a time.

pub mod channels;
mod client;
pub mod error;
pub mod fields;
mod http;
pub mod playlists;
mod request;
pub mod transport;
mod types;
pub mod videos;

pub use client::{DEFAULT_READ_TIMEOUT, YouTubeClient};
pub use error::{Error, FieldError, Result};
pub use fields::{CalendarTime, VideoDuration, parse_duration, parse_timestamp};
pub use request::{API_KEY_MAX_LEN, ApiKey, QueryMode};
pub use transport::{TcpTransport, Transport, YOUTUBE_API_HOST};

// Re-export the per-resource result types for convenience.
pub use channels::ChannelStatistics;
pub use playlists::PlaylistItem;
pub use videos::{VideoContentDetails, VideoSnippet, VideoStatistics, VideoStatus};
