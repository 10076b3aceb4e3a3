//! YouTube Channels API types.

use crate::error::Result;
use crate::fields;
use crate::types::PageInfo;
use serde::Deserialize;

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChannelListResponse {
    pub items: Vec<ChannelResource>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

/// A `channel` resource as returned on the wire.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChannelResource {
    pub statistics: Option<RawChannelStatistics>,
}

/// The statistics part as serialized: counters are JSON strings, the
/// hidden-subscriber flag is a real bool.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawChannelStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: Option<bool>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

/// Aggregate counters for a channel.
///
/// The subscriber count is rounded by the API and absent entirely when the
/// channel hides it, in which case [`hidden_subscriber_count`] is set.
///
/// [`hidden_subscriber_count`]: ChannelStatistics::hidden_subscriber_count
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStatistics {
    /// The number of times the channel has been viewed.
    pub view_count: Option<u64>,
    /// The number of subscribers the channel has.
    pub subscriber_count: Option<u64>,
    /// Whether the channel's subscriber count is publicly visible.
    pub hidden_subscriber_count: bool,
    /// The number of public videos uploaded to the channel.
    pub video_count: Option<u64>,
}

impl ChannelStatistics {
    pub(crate) fn from_raw(raw: RawChannelStatistics) -> Result<Self> {
        Ok(Self {
            view_count: raw.view_count.as_deref().map(fields::parse_count).transpose()?,
            subscriber_count: raw
                .subscriber_count
                .as_deref()
                .map(fields::parse_count)
                .transpose()?,
            hidden_subscriber_count: raw.hidden_subscriber_count.unwrap_or(false),
            video_count: raw.video_count.as_deref().map(fields::parse_count).transpose()?,
        })
    }
}
