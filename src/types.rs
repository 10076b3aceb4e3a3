//! Wire types shared by every list endpoint.

use serde::Deserialize;

/// Paging details for lists of resources.
///
/// Only logged here; pagination itself (following `nextPageToken`) is the
/// embedding application's concern.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}
