//! YouTube Videos API types: the wire shapes `videos.list` answers with, and
//! the parsed forms handed to callers.
//!
//! Wire structs mirror the resource parts the API serializes (counters as
//! JSON strings, timestamps and durations as text tokens) and are tolerant
//! of missing keys. The public types carry the same fields after the fixed
//! format parsers in [`crate::fields`] have run.

use crate::error::Result;
use crate::fields::{self, CalendarTime, VideoDuration};
use crate::types::PageInfo;
use serde::Deserialize;

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct VideoListResponse {
    pub items: Vec<VideoResource>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A `video` resource as returned on the wire.
///
/// Only the part named in the request's `part` selector is populated.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct VideoResource {
    pub statistics: Option<RawVideoStatistics>,
    pub snippet: Option<RawVideoSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<RawVideoContentDetails>,
    pub status: Option<RawVideoStatus>,
}

/// The statistics part as serialized: every counter is a JSON string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideoSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(rename = "liveBroadcastContent")]
    pub live_broadcast_content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideoContentDetails {
    pub duration: Option<String>,
    pub dimension: Option<String>,
    pub definition: Option<String>,
    /// Serialized as the strings `"true"` / `"false"`, not a JSON bool.
    pub caption: Option<String>,
    #[serde(rename = "licensedContent")]
    pub licensed_content: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideoStatus {
    #[serde(rename = "uploadStatus")]
    pub upload_status: Option<String>,
    #[serde(rename = "privacyStatus")]
    pub privacy_status: Option<String>,
    pub license: Option<String>,
    pub embeddable: Option<bool>,
    #[serde(rename = "publicStatsViewable")]
    pub public_stats_viewable: Option<bool>,
    #[serde(rename = "madeForKids")]
    pub made_for_kids: Option<bool>,
}

/// Engagement counters for a video.
///
/// Counters the channel owner has hidden are `None`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    pub view_count: Option<u64>,
    /// The number of users who have indicated that they liked the video.
    pub like_count: Option<u64>,
    /// The number of comments on the video.
    pub comment_count: Option<u64>,
}

impl VideoStatistics {
    pub(crate) fn from_raw(raw: RawVideoStatistics) -> Result<Self> {
        Ok(Self {
            view_count: parse_opt_count(raw.view_count)?,
            like_count: parse_opt_count(raw.like_count)?,
            comment_count: parse_opt_count(raw.comment_count)?,
        })
    }
}

fn parse_opt_count(raw: Option<String>) -> Result<Option<u64>> {
    Ok(raw.as_deref().map(fields::parse_count).transpose()?)
}

/// Basic details about a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSnippet {
    /// When the video was published, in UTC.
    pub published_at: CalendarTime,
    /// The ID of the channel the video was uploaded to.
    pub channel_id: String,
    /// The video's title.
    pub title: String,
    /// The video's description.
    pub description: String,
    /// The channel's display title.
    pub channel_title: String,
    /// The YouTube video category associated with the video.
    pub category_id: Option<String>,
    /// Whether the video is an upcoming, active, or completed live broadcast
    /// (`none` for plain uploads).
    pub live_broadcast_content: Option<String>,
}

impl VideoSnippet {
    /// `None` when the wire snippet lacks its timestamp; a present but
    /// malformed timestamp is a parse error.
    pub(crate) fn from_raw(raw: RawVideoSnippet) -> Result<Option<Self>> {
        let Some(published_at) = raw.published_at else {
            return Ok(None);
        };
        Ok(Some(Self {
            published_at: fields::parse_timestamp(&published_at)?,
            channel_id: raw.channel_id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            channel_title: raw.channel_title.unwrap_or_default(),
            category_id: raw.category_id,
            live_broadcast_content: raw.live_broadcast_content,
        }))
    }
}

/// Technical details about a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoContentDetails {
    /// The video's length.
    pub duration: VideoDuration,
    /// `2d` or `3d`.
    pub dimension: Option<String>,
    /// `hd` or `sd`.
    pub definition: Option<String>,
    /// Whether captions are available.
    pub caption: Option<bool>,
    /// Whether the video represents licensed content.
    pub licensed_content: bool,
}

impl VideoContentDetails {
    /// `None` when the wire part lacks its duration token; a present but
    /// malformed duration is a parse error.
    pub(crate) fn from_raw(raw: RawVideoContentDetails) -> Result<Option<Self>> {
        let Some(duration) = raw.duration else {
            return Ok(None);
        };
        Ok(Some(Self {
            duration: fields::parse_duration(&duration)?,
            dimension: raw.dimension,
            definition: raw.definition,
            caption: raw.caption.as_deref().map(|c| c == "true"),
            licensed_content: raw.licensed_content.unwrap_or(false),
        }))
    }
}

/// Upload, privacy, and licensing state of a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#status>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStatus {
    /// `uploaded`, `processed`, `failed`, `rejected`, or `deleted`.
    pub upload_status: Option<String>,
    /// `public`, `unlisted`, or `private`.
    pub privacy_status: Option<String>,
    /// `youtube` or `creativeCommon`.
    pub license: Option<String>,
    /// Whether the video can be embedded on another website.
    pub embeddable: bool,
    /// Whether the extended statistics on the watch page are public.
    pub public_stats_viewable: bool,
    /// The made-for-kids designation, when the API discloses it.
    pub made_for_kids: Option<bool>,
}

impl VideoStatus {
    pub(crate) fn from_raw(raw: RawVideoStatus) -> Self {
        Self {
            upload_status: raw.upload_status,
            privacy_status: raw.privacy_status,
            license: raw.license,
            embeddable: raw.embeddable.unwrap_or(false),
            public_stats_viewable: raw.public_stats_viewable.unwrap_or(false),
            made_for_kids: raw.made_for_kids,
        }
    }
}
