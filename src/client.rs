//! Client facade: one YouTube Data API query per call over a fresh
//! transport connection.

use crate::channels::{ChannelListResponse, ChannelStatistics};
use crate::error::{Error, Result};
use crate::http;
use crate::playlists::{PlaylistItem, PlaylistItemListResponse};
use crate::request::{self, ApiKey, QueryMode};
use crate::transport::Transport;
use crate::videos::{
    VideoContentDetails, VideoListResponse, VideoSnippet, VideoStatistics, VideoStatus,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::instrument;

/// How long a single read may stall before the request fails.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1500);

/// Client for the YouTube Data API v3 over a caller-supplied transport.
///
/// One instance serves one request at a time: every operation takes
/// `&mut self`, dials a fresh connection through the [`Transport`], and
/// shuts it down before returning. There is no keep-alive, no internal
/// retry, no spawned task, and no shared state beyond the API key and the
/// transport itself. Run requests concurrently by creating more clients.
///
/// Every operation returns `Ok(None)` when the API answers a well-formed
/// zero-result document — an unknown id is "not found", not an error.
///
/// # Example
///
/// ```rust,no_run
/// use youtube_data_api::{ApiKey, TcpTransport, YouTubeClient};
///
/// # async fn example() -> youtube_data_api::Result<()> {
/// let key = ApiKey::new("AIza...")?;
/// let mut client = YouTubeClient::new(key, TcpTransport::new("www.googleapis.com", 80));
/// match client.get_video_statistics("dQw4w9WgXcQ").await? {
///     Some(stats) => println!("views: {:?}", stats.view_count),
///     None => println!("no such video"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct YouTubeClient<T> {
    api_key: ApiKey,
    transport: T,
    read_timeout: Duration,
}

impl<T: Transport> YouTubeClient<T> {
    /// A client issuing requests with `api_key` over `transport`.
    pub fn new(api_key: ApiKey, transport: T) -> Self {
        Self {
            api_key,
            transport,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Replaces the per-read stall bound (default [`DEFAULT_READ_TIMEOUT`]).
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Fetches view/like/comment counters for a video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self), ret)]
    pub async fn get_video_statistics(
        &mut self,
        video_id: &str,
    ) -> Result<Option<VideoStatistics>> {
        let Some(response) = self.list::<VideoListResponse>(QueryMode::VideoStatistics, video_id).await?
        else {
            return Ok(None);
        };
        tracing::debug!(
            total_results = response.page_info.total_results,
            "fetched video statistics"
        );
        match response.items.into_iter().next().and_then(|v| v.statistics) {
            Some(raw) => VideoStatistics::from_raw(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Fetches basic details (title, description, upload time) for a video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self), ret)]
    pub async fn get_video_snippet(&mut self, video_id: &str) -> Result<Option<VideoSnippet>> {
        let Some(response) = self.list::<VideoListResponse>(QueryMode::VideoSnippet, video_id).await?
        else {
            return Ok(None);
        };
        match response.items.into_iter().next().and_then(|v| v.snippet) {
            Some(raw) => VideoSnippet::from_raw(raw),
            None => Ok(None),
        }
    }

    /// Fetches technical details (duration, definition, captions) for a
    /// video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self), ret)]
    pub async fn get_video_content_details(
        &mut self,
        video_id: &str,
    ) -> Result<Option<VideoContentDetails>> {
        let Some(response) = self
            .list::<VideoListResponse>(QueryMode::VideoContentDetails, video_id)
            .await?
        else {
            return Ok(None);
        };
        match response.items.into_iter().next().and_then(|v| v.content_details) {
            Some(raw) => VideoContentDetails::from_raw(raw),
            None => Ok(None),
        }
    }

    /// Fetches upload, privacy, and licensing state for a video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self), ret)]
    pub async fn get_video_status(&mut self, video_id: &str) -> Result<Option<VideoStatus>> {
        let Some(response) = self.list::<VideoListResponse>(QueryMode::VideoStatus, video_id).await?
        else {
            return Ok(None);
        };
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|v| v.status)
            .map(VideoStatus::from_raw))
    }

    /// Fetches aggregate counters for a channel.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self), ret)]
    pub async fn get_channel_statistics(
        &mut self,
        channel_id: &str,
    ) -> Result<Option<ChannelStatistics>> {
        let Some(response) = self
            .list::<ChannelListResponse>(QueryMode::ChannelStatistics, channel_id)
            .await?
        else {
            return Ok(None);
        };
        tracing::debug!(
            total_results = response.page_info.total_results,
            "fetched channel statistics"
        );
        match response.items.into_iter().next().and_then(|c| c.statistics) {
            Some(raw) => ChannelStatistics::from_raw(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the first page of a playlist's entries.
    ///
    /// Entries missing their video id or timestamp (private or deleted
    /// videos) are skipped. `nextPageToken` is not followed.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub async fn get_playlist_items(
        &mut self,
        playlist_id: &str,
    ) -> Result<Option<Vec<PlaylistItem>>> {
        let Some(response) = self
            .list::<PlaylistItemListResponse>(QueryMode::PlaylistItems, playlist_id)
            .await?
        else {
            return Ok(None);
        };
        let mut items = Vec::with_capacity(response.items.len());
        for resource in response.items {
            match PlaylistItem::from_raw(resource)? {
                Some(item) => items.push(item),
                None => tracing::debug!("skip structurally incomplete playlist item"),
            }
        }
        tracing::debug!(
            total_results = response.page_info.total_results,
            returned_items = items.len(),
            has_next_page = response.next_page_token.is_some(),
            "fetched playlist items"
        );
        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(items))
    }

    /// One request cycle for `mode`, deserialized into the endpoint's wire
    /// shape.
    async fn list<R: DeserializeOwned>(
        &mut self,
        mode: QueryMode,
        resource_id: &str,
    ) -> Result<Option<R>> {
        let Some(doc) = self.fetch(mode, resource_id).await? else {
            return Ok(None);
        };
        match serde_json::from_value(doc) {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                // A shape the wire types don't recognize carries nothing we
                // can extract; same outcome as an empty document.
                tracing::debug!(%e, "response shape mismatch");
                Ok(None)
            }
        }
    }

    /// One full request/response cycle: build path, dial, send, skip
    /// headers, gate on the status code, decode the body.
    async fn fetch(&mut self, mode: QueryMode, resource_id: &str) -> Result<Option<Value>> {
        let path = request::build_request(mode, &self.api_key, resource_id)?;
        tracing::debug!(?mode, resource_id, "dispatch API query");

        let mut stream = self.transport.connect().await.map_err(Error::Transport)?;
        http::send_get(&mut stream, self.transport.host(), &path).await?;

        let mut reader = BufReader::new(stream);
        let status = http::skip_headers(&mut reader, self.read_timeout).await?;
        if !(200..300).contains(&status) {
            return Err(Error::Status { code: status });
        }

        let doc = http::decode_body(&mut reader, self.read_timeout).await;

        // One logical request, one connection.
        let mut stream = reader.into_inner();
        let _ = stream.shutdown().await;

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, DuplexStream};

    /// A transport whose "server" answers every connection with the same
    /// canned bytes, recording the request it saw.
    struct Scripted {
        response: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Scripted {
        fn new(response: &'static str) -> Self {
            Self {
                response,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Transport for Scripted {
        type Stream = DuplexStream;

        fn host(&self) -> &str {
            "api.test.invalid"
        }

        async fn connect(&mut self) -> io::Result<DuplexStream> {
            let (client, mut server) = tokio::io::duplex(16 * 1024);
            let response = self.response;
            let seen = Arc::clone(&self.seen);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match server.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                seen.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&request).into_owned());
                let _ = server.write_all(response.as_bytes()).await;
                // Dropping the server half closes the connection.
            });
            Ok(client)
        }
    }

    fn key() -> ApiKey {
        ApiKey::new("TESTKEY").unwrap()
    }

    fn ok_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{body}"
        )
    }

    #[tokio::test]
    async fn full_cycle_parses_statistics() {
        let response = "HTTP/1.1 200 OK\r\n\
            Content-Type: application/json; charset=UTF-8\r\n\
            \r\n\
            {\"kind\":\"youtube#videoListResponse\",\
             \"pageInfo\":{\"totalResults\":1,\"resultsPerPage\":1},\
             \"items\":[{\"id\":\"dQw4w9WgXcQ\",\
                \"statistics\":{\"viewCount\":\"1463\",\"likeCount\":\"52\",\
                                \"commentCount\":\"7\"}}]}";
        let transport = Scripted::new(response);
        let seen = Arc::clone(&transport.seen);
        let mut client = YouTubeClient::new(key(), transport);

        let stats = client
            .get_video_statistics("dQw4w9WgXcQ")
            .await
            .unwrap()
            .expect("one matching video");
        assert_eq!(stats.view_count, Some(1463));
        assert_eq!(stats.like_count, Some(52));
        assert_eq!(stats.comment_count, Some(7));

        let requests = seen.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(
            request.starts_with(
                "GET /youtube/v3/videos?part=statistics&id=dQw4w9WgXcQ&key=TESTKEY HTTP/1.1\r\n"
            ),
            "{request}"
        );
        assert!(request.contains("Host: api.test.invalid\r\n"), "{request}");
        assert!(request.contains("Connection: close\r\n"), "{request}");
        assert_eq!(request.matches("TESTKEY").count(), 1);
    }

    #[tokio::test]
    async fn zero_result_document_is_not_found() {
        let mut client = YouTubeClient::new(
            key(),
            Scripted::new("HTTP/1.1 200 OK\r\n\r\n{\"items\":[]}"),
        );
        let stats = client.get_video_statistics("nope").await.unwrap();
        assert_eq!(stats, None);
    }

    #[tokio::test]
    async fn non_2xx_status_short_circuits_with_the_raw_code() {
        let mut client = YouTubeClient::new(
            key(),
            Scripted::new(
                "HTTP/1.1 403 Forbidden\r\n\r\n{\"error\":{\"code\":403,\"message\":\"quota\"}}",
            ),
        );
        let err = client.get_video_statistics("x").await.unwrap_err();
        assert!(matches!(err, Error::Status { code: 403 }), "{err:?}");
    }

    #[tokio::test]
    async fn garbage_body_is_a_parse_error_not_not_found() {
        let mut client = YouTubeClient::new(key(), Scripted::new("HTTP/1.1 200 OK\r\n\r\nnot json"));
        let err = client.get_video_statistics("x").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unexpected_shape_degrades_to_not_found() {
        let mut client = YouTubeClient::new(
            key(),
            Scripted::new("HTTP/1.1 200 OK\r\n\r\n{\"items\":[\"just a string\"]}"),
        );
        let stats = client.get_video_statistics("x").await.unwrap();
        assert_eq!(stats, None);
    }

    #[tokio::test]
    async fn each_operation_dials_a_fresh_connection() {
        let response_body =
            "{\"items\":[{\"statistics\":{\"viewCount\":\"1\"}}],\"pageInfo\":{\"totalResults\":1}}";
        let response: &'static str =
            Box::leak(ok_response(response_body).into_boxed_str());
        let transport = Scripted::new(response);
        let seen = Arc::clone(&transport.seen);
        let mut client = YouTubeClient::new(key(), transport);

        client.get_video_statistics("a").await.unwrap();
        client.get_video_statistics("b").await.unwrap();

        let requests = seen.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].contains("id=a&"));
        assert!(requests[1].contains("id=b&"));
    }
}
