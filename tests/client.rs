//! End-to-end tests over a real local socket.
//!
//! Each test runs a one-shot HTTP responder on a loopback listener, points
//! the client's TCP transport at it, and drives a full request/response
//! cycle: path construction, header skip, status gate, body decode, field
//! parsing.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use youtube_data_api::{ApiKey, Error, TcpTransport, YouTubeClient};

/// Accepts one connection, answers it with `response`, and hands back the
/// raw request bytes for assertions.
async fn serve_one(response: String) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(request).unwrap()
    });
    (addr, handle)
}

fn ok_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json; charset=UTF-8\r\n\
         Vary: Origin\r\n\
         Server: ESF\r\n\
         \r\n\
         {body}"
    )
}

fn client_for(addr: SocketAddr) -> YouTubeClient<TcpTransport> {
    let key = ApiKey::new("TESTKEY").unwrap();
    YouTubeClient::new(key, TcpTransport::new(addr.ip().to_string(), addr.port()))
}

#[tokio::test]
async fn video_snippet_round_trip() {
    let body = r#"{
        "kind": "youtube#videoListResponse",
        "pageInfo": {"totalResults": 1, "resultsPerPage": 1},
        "items": [{
            "kind": "youtube#video",
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "publishedAt": "2009-10-25T06:57:33Z",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "title": "Rick Astley - Never Gonna Give You Up",
                "description": "The official video.",
                "channelTitle": "Rick Astley",
                "categoryId": "10",
                "liveBroadcastContent": "none"
            }
        }]
    }"#;
    let (addr, server) = serve_one(ok_response(body)).await;

    let snippet = client_for(addr)
        .get_video_snippet("dQw4w9WgXcQ")
        .await
        .unwrap()
        .expect("one matching video");

    assert_eq!(snippet.title, "Rick Astley - Never Gonna Give You Up");
    assert_eq!(snippet.channel_title, "Rick Astley");
    assert_eq!(snippet.published_at.year, 2009);
    assert_eq!(snippet.published_at.month, 10);
    assert_eq!(snippet.published_at.day, 25);
    assert_eq!(snippet.published_at.hour, 6);

    let request = server.await.unwrap();
    assert!(
        request.starts_with("GET /youtube/v3/videos?part=snippet&id=dQw4w9WgXcQ&key=TESTKEY HTTP/1.1\r\n"),
        "{request}"
    );
    assert!(request.contains(&format!("Host: {}\r\n", addr.ip())), "{request}");
}

#[tokio::test]
async fn content_details_round_trip_parses_the_duration() {
    let body = r#"{
        "items": [{
            "id": "9bZkp7q19f0",
            "contentDetails": {
                "duration": "PT4M13S",
                "dimension": "2d",
                "definition": "hd",
                "caption": "true",
                "licensedContent": true
            }
        }]
    }"#;
    let (addr, _server) = serve_one(ok_response(body)).await;

    let details = client_for(addr)
        .get_video_content_details("9bZkp7q19f0")
        .await
        .unwrap()
        .expect("one matching video");

    assert_eq!(details.duration.minutes, 4);
    assert_eq!(details.duration.seconds, 13);
    assert_eq!(details.duration.total_seconds(), 253);
    assert_eq!(details.definition.as_deref(), Some("hd"));
    assert_eq!(details.caption, Some(true));
}

#[tokio::test]
async fn channel_statistics_round_trip() {
    let body = r#"{
        "items": [{
            "id": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "statistics": {
                "viewCount": "276544121",
                "subscriberCount": "2290000",
                "hiddenSubscriberCount": false,
                "videoCount": "364"
            }
        }]
    }"#;
    let (addr, _server) = serve_one(ok_response(body)).await;

    let stats = client_for(addr)
        .get_channel_statistics("UCuAXFkgsw1L7xaCfnd5JJOw")
        .await
        .unwrap()
        .expect("one matching channel");

    assert_eq!(stats.view_count, Some(276_544_121));
    assert_eq!(stats.subscriber_count, Some(2_290_000));
    assert_eq!(stats.video_count, Some(364));
}

#[tokio::test]
async fn playlist_items_round_trip_skips_incomplete_entries() {
    let body = r#"{
        "pageInfo": {"totalResults": 3, "resultsPerPage": 3},
        "items": [
            {
                "snippet": {
                    "publishedAt": "2022-11-04T09:00:00Z",
                    "title": "Episode 1",
                    "position": 0,
                    "resourceId": {"kind": "youtube#video", "videoId": "aaa"}
                },
                "contentDetails": {"videoId": "aaa"}
            },
            {
                "snippet": {"title": "Private video", "position": 1}
            },
            {
                "snippet": {
                    "publishedAt": "2022-11-11T09:00:00Z",
                    "title": "Episode 2",
                    "position": 2,
                    "resourceId": {"videoId": "bbb"}
                }
            }
        ]
    }"#;
    let (addr, server) = serve_one(ok_response(body)).await;

    let items = client_for(addr)
        .get_playlist_items("PLtest")
        .await
        .unwrap()
        .expect("playlist has entries");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].video_id, "aaa");
    assert_eq!(items[0].position, Some(0));
    assert_eq!(items[1].video_id, "bbb");
    assert_eq!(items[1].published_at.day, 11);

    let request = server.await.unwrap();
    assert!(request.contains("playlistId=PLtest&key=TESTKEY"), "{request}");
}

#[tokio::test]
async fn unknown_id_is_not_found_rather_than_an_error() {
    let body = r#"{"kind": "youtube#videoListResponse",
                   "pageInfo": {"totalResults": 0, "resultsPerPage": 0},
                   "items": []}"#;
    let (addr, _server) = serve_one(ok_response(body)).await;

    let stats = client_for(addr).get_video_statistics("nosuchvideo").await.unwrap();
    assert!(stats.is_none());
}

#[tokio::test]
async fn quota_errors_surface_the_raw_status() {
    let response = "HTTP/1.1 403 Forbidden\r\n\
        Content-Type: application/json; charset=UTF-8\r\n\
        \r\n\
        {\"error\":{\"code\":403,\"message\":\"quotaExceeded\"}}"
        .to_string();
    let (addr, _server) = serve_one(response).await;

    let err = client_for(addr).get_video_statistics("x").await.unwrap_err();
    assert!(matches!(err, Error::Status { code: 403 }), "{err:?}");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Bind then drop, so the port is very likely closed when we dial it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).get_video_statistics("x").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");
}
