pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{Page, SubscribedChannel};

use serde::de::DeserializeOwned;
use types::{Channel, CommentThread, ListResponse, PlaylistItem, Subscription};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page `playlistItems.list` will serve.
pub const MAX_PLAYLIST_ITEMS_PAGE: u32 = 50;

/// Largest page `commentThreads.list` will serve.
pub const MAX_COMMENT_THREADS_PAGE: u32 = 100;

/// Largest page `subscriptions.list` will serve.
pub const MAX_SUBSCRIPTIONS_PAGE: u32 = 50;

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(BASE_URL, api_key)
    }

    /// Point the client at a different API root (a proxy or a local stub).
    pub fn with_base_url(base_url: &str, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Look up a channel's uploads playlist. `Ok(None)` when the channel does not exist.
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        let resp: ListResponse<Channel> = self
            .list(
                "channels",
                &[("part", "contentDetails"), ("id", channel_id)],
            )
            .await?;

        Ok(resp
            .items
            .first()
            .and_then(Channel::uploads_playlist_id)
            .map(str::to_string))
    }

    /// Resolve an `@handle` (with or without the `@`) to a channel id.
    pub async fn channel_id_for_handle(&self, handle: &str) -> Result<Option<String>> {
        let resp: ListResponse<Channel> = self
            .list("channels", &[("part", "id"), ("forHandle", handle)])
            .await?;

        Ok(resp.items.into_iter().next().map(|c| c.id))
    }

    /// One page of video ids from a playlist.
    pub async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        let max_results = max_results.clamp(1, MAX_PLAYLIST_ITEMS_PAGE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp: ListResponse<PlaylistItem> = self.list("playlistItems", &params).await?;
        Ok(resp.into_page(PlaylistItem::into_video_id))
    }

    /// One page of comment threads on a video, reduced to each top-level author's channel id.
    /// Threads whose author has no channel id come back as `None`.
    pub async fn comment_thread_authors(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Option<String>>> {
        let max_results = max_results.clamp(1, MAX_COMMENT_THREADS_PAGE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp: ListResponse<CommentThread> = self.list("commentThreads", &params).await?;
        Ok(resp.into_page(|thread| Some(thread.into_author_channel_id())))
    }

    /// One page of the channels `channel_id` is publicly subscribed to.
    pub async fn subscriptions(
        &self,
        channel_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SubscribedChannel>> {
        let max_results = max_results.clamp(1, MAX_SUBSCRIPTIONS_PAGE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp: ListResponse<Subscription> = self.list("subscriptions", &params).await?;
        Ok(resp.into_page(Subscription::into_subscribed_channel))
    }

    /// Count of subscription ids on the first page, requesting at most `max_results`.
    /// Uses `part=id`, the cheapest way to ask "is this list visible at all".
    pub async fn subscription_id_count(&self, channel_id: &str, max_results: u32) -> Result<usize> {
        let max_results = max_results.clamp(1, MAX_SUBSCRIPTIONS_PAGE).to_string();
        let resp: ListResponse<Subscription> = self
            .list(
                "subscriptions",
                &[
                    ("part", "id"),
                    ("channelId", channel_id),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(resp.items.len())
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<ListResponse<T>> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::trace!(resource, ?params, "YouTube API request");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::from_response(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
