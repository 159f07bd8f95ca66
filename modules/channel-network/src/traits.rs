// The remote API surface the pipeline depends on.
//
// YouTubeClient is the production implementation; testing::MockYouTube
// serves canned pages so the whole pipeline runs without network.

use async_trait::async_trait;
use youtube_client::{Page, Result, SubscribedChannel, YouTubeClient};

#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// `Ok(None)` when the channel does not exist.
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>>;

    /// `Ok(None)` when no channel owns the handle.
    async fn channel_id_for_handle(&self, handle: &str) -> Result<Option<String>>;

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>>;

    /// Top-level comment author per thread; `None` where the author has no channel.
    async fn comment_thread_authors(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Option<String>>>;

    async fn subscriptions(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SubscribedChannel>>;

    /// Number of subscription ids on a first page of at most `max_results`.
    async fn subscription_id_count(&self, channel_id: &str, max_results: u32) -> Result<usize>;
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        self.uploads_playlist_id(channel_id).await
    }

    async fn channel_id_for_handle(&self, handle: &str) -> Result<Option<String>> {
        self.channel_id_for_handle(handle).await
    }

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        self.playlist_video_ids(playlist_id, page_size, page_token)
            .await
    }

    async fn comment_thread_authors(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Option<String>>> {
        self.comment_thread_authors(video_id, page_size, page_token)
            .await
    }

    async fn subscriptions(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SubscribedChannel>> {
        self.subscriptions(channel_id, page_size, page_token).await
    }

    async fn subscription_id_count(&self, channel_id: &str, max_results: u32) -> Result<usize> {
        self.subscription_id_count(channel_id, max_results).await
    }
}
