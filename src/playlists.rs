//! YouTube PlaylistItems API types.

use crate::error::Result;
use crate::fields::{self, CalendarTime};
use crate::types::PageInfo;
use serde::Deserialize;

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PlaylistItemListResponse {
    pub items: Vec<PlaylistItemResource>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    /// Present when the playlist has more than one page; following it is the
    /// embedding application's concern.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource as returned on the wire.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PlaylistItemResource {
    pub snippet: Option<RawPlaylistItemSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<RawPlaylistItemContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPlaylistItemSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub title: Option<String>,
    pub position: Option<u32>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<RawResourceId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// One entry of a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    /// The entry's title.
    pub title: String,
    /// The ID of the video the entry refers to.
    pub video_id: String,
    /// Zero-based position within the playlist.
    pub position: Option<u32>,
    /// When the entry was added to the playlist, in UTC.
    pub published_at: CalendarTime,
}

impl PlaylistItem {
    /// `None` when the wire resource lacks a video id or its timestamp;
    /// present but malformed fields are parse errors.
    pub(crate) fn from_raw(raw: PlaylistItemResource) -> Result<Option<Self>> {
        let snippet = raw.snippet.unwrap_or_default();
        let video_id = raw
            .content_details
            .and_then(|d| d.video_id)
            .or_else(|| snippet.resource_id.and_then(|r| r.video_id));
        let (Some(video_id), Some(published_at)) = (video_id, snippet.published_at) else {
            return Ok(None);
        };
        Ok(Some(Self {
            title: snippet.title.unwrap_or_default(),
            video_id,
            position: snippet.position,
            published_at: fields::parse_timestamp(&published_at)?,
        }))
    }
}
