//! The HTTP/1.1 subset the client speaks: a single `GET`, a header skip that
//! extracts the status code, and a body decode with an explicit notion of an
//! empty document.

use crate::error::{Error, Result};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

/// Writes a single `GET` for `path` and flushes it.
///
/// `Connection: close` pins the one-request-per-connection lifecycle: the
/// response body ends at EOF, so no transfer-encoding handling is needed on
/// the way back.
pub(crate) async fn send_get<S>(stream: &mut S, host: &str, path: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    let request = format!(
        "GET {path} HTTP/1.1\r\nHost: {host}\r\nAccept: application/json\r\nConnection: close\r\n\r\n"
    );
    tracing::trace!(%path, "send GET");
    stream.write_all(request.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Advances `reader` past the response's header block.
///
/// Returns the status code extracted from the status line. Lines arrive
/// however the transport fragments them; the buffered reader reassembles
/// each one, and a single line buffer is reused so an arbitrarily large
/// header block never accumulates in memory. On success the read cursor sits
/// on the first body byte.
pub(crate) async fn skip_headers<S>(
    reader: &mut BufReader<S>,
    read_timeout: Duration,
) -> Result<u16>
where
    S: AsyncRead + Unpin,
{
    let mut line = String::new();
    let mut status = None;
    loop {
        line.clear();
        let n = read_line_bounded(reader, &mut line, read_timeout).await?;
        if n == 0 {
            return Err(Error::MalformedResponse {
                reason: "connection closed inside the header block".into(),
            });
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        match status {
            None => {
                let code = parse_status_line(trimmed)?;
                tracing::trace!(code, "status line");
                status = Some(code);
            }
            // The blank line: headers are over, the body starts here.
            Some(code) if trimmed.is_empty() => return Ok(code),
            Some(_) => tracing::trace!(header = trimmed, "skip"),
        }
    }
}

/// Extracts the three-digit status code from `HTTP/1.x NNN reason`.
fn parse_status_line(line: &str) -> Result<u16> {
    let malformed = || Error::MalformedResponse {
        reason: format!("status line {line:?}"),
    };
    let mut parts = line.split_whitespace();
    let version = parts.next().ok_or_else(malformed)?;
    if !version.starts_with("HTTP/") {
        return Err(malformed());
    }
    let code = parts.next().ok_or_else(malformed)?;
    if code.len() != 3 {
        return Err(malformed());
    }
    code.parse().map_err(|_| malformed())
}

/// Reads the body to EOF and classifies it.
///
/// Three outcomes, kept strictly apart:
/// - `Ok(Some(doc))`: valid JSON with at least one entry under `items`.
/// - `Ok(None)`: a zero-byte body, or valid JSON whose `items` is missing,
///   not an array, or empty. Queries for unknown ids land here; this is the
///   "not found" outcome, not a failure, and is never logged as one.
/// - `Err(Error::Json(_))`: the body exists but is not JSON.
pub(crate) async fn decode_body<S>(
    reader: &mut BufReader<S>,
    read_timeout: Duration,
) -> Result<Option<Value>>
where
    S: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    let mut chunk = [0u8; 2048];
    loop {
        let n = timeout(read_timeout, reader.read(&mut chunk))
            .await
            .map_err(|_| stalled(read_timeout))?
            .map_err(Error::Transport)?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    if body.is_empty() {
        tracing::debug!("empty response body");
        return Ok(None);
    }

    let doc: Value = serde_json::from_slice(&body)?;
    if is_empty_response(&doc) {
        tracing::debug!("document carries no items");
        return Ok(None);
    }
    tracing::trace!(bytes = body.len(), "decoded response body");
    Ok(Some(doc))
}

/// Structural emptiness: does the document carry any items at all?
///
/// A missing `items` key and a type-mismatched `items` both count as empty
/// rather than as errors; the API legitimately answers well-formed
/// zero-result documents for valid queries.
fn is_empty_response(doc: &Value) -> bool {
    match doc.get("items").and_then(Value::as_array) {
        Some(items) => items.is_empty(),
        None => true,
    }
}

/// `read_line` with the transport-stall bound applied.
async fn read_line_bounded<S>(
    reader: &mut BufReader<S>,
    line: &mut String,
    read_timeout: Duration,
) -> Result<usize>
where
    S: AsyncRead + Unpin,
{
    timeout(read_timeout, reader.read_line(line))
        .await
        .map_err(|_| stalled(read_timeout))?
        .map_err(Error::Transport)
}

/// A stalled read is a transport failure, surfaced with `TimedOut`.
fn stalled(after: Duration) -> Error {
    Error::Transport(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!("no data from transport within {after:?}"),
    ))
}
