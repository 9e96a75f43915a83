use crate::domain::{QueryWindow, TagRecord};
use crate::error::error_chain_fmt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Common wrapper object of every Stack Exchange API response.
/// Stack Exchange documentation: https://api.stackexchange.com/docs/wrapper
#[derive(Deserialize)]
struct SEResponse<T> {
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
    quota_remaining: Option<u32>,
}

/// A Tag object from the Stack Exchange API.
/// Stack Exchange documentation: https://api.stackexchange.com/docs/types/tag
#[derive(Deserialize)]
struct SETag {
    name: String,
    count: u64,
}

impl From<SETag> for TagRecord {
    fn from(tag: SETag) -> Self {
        TagRecord::new(tag.name, tag.count)
    }
}

/// Query string of the `/tags` method.
/// Stack Exchange documentation: https://api.stackexchange.com/docs/tags
#[derive(Serialize)]
struct TagsQuery<'a> {
    site: &'a str,
    fromdate: i64,
    todate: i64,
    order: &'static str,
    sort: &'static str,
    pagesize: u32,
}

#[derive(thiserror::Error)]
pub enum FetchError {
    #[error("Failed to complete the request to the tag endpoint")]
    Request(#[source] reqwest::Error),
    #[error("The tag endpoint responded with status {0}")]
    Status(StatusCode),
    #[error("The tag endpoint response doesn't match the expected JSON schema")]
    Decode(#[source] serde_json::Error),
}

impl std::fmt::Debug for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Client for the tag statistics of a single Stack Exchange site.
pub struct TagClient {
    http_client: Client,
    base_url: String,
    site: String,
    page_size: u32,
}

impl TagClient {
    pub fn new(http_client: Client, base_url: String, site: String, page_size: u32) -> Self {
        Self {
            http_client,
            base_url,
            site,
            page_size,
        }
    }

    fn tags_url(&self) -> String {
        format!("{}/tags", self.base_url.trim_end_matches('/'))
    }

    /// Retrieves the first page of tags used within the window, most popular first.
    #[tracing::instrument(
        name = "Fetching the most popular tags",
        skip(self, window),
        fields(
            site = %self.site,
            from = %window.from_date,
            to = %window.to_date,
            page_size = self.page_size
        )
    )]
    pub async fn fetch_popular_tags(
        &self,
        window: &QueryWindow,
    ) -> Result<Vec<TagRecord>, FetchError> {
        let query = TagsQuery {
            site: &self.site,
            fromdate: window.from_date.timestamp(),
            todate: window.to_date.timestamp(),
            order: "desc",
            sort: "popular",
            pagesize: self.page_size,
        };
        let response = self
            .http_client
            .get(self.tags_url())
            .query(&query)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        let packet: SEResponse<SETag> =
            serde_json::from_slice(&body).map_err(FetchError::Decode)?;
        tracing::debug!(
            has_more = packet.has_more,
            quota_remaining = ?packet.quota_remaining,
            "Received {} tags",
            packet.items.len()
        );

        Ok(packet.items.into_iter().map(TagRecord::from).collect())
    }
}
