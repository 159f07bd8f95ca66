//! Cursor-following pagination over the listing endpoints.
//!
//! [`paginate`] turns an endpoint descriptor into a lazy stream of items.
//! Pages are requested only as the consumer pulls items, so dropping the
//! stream is all it takes to stop early. A failed page fetch is yielded
//! once as `Err` and ends the stream; the caller decides how to log it and
//! what to skip.

use async_stream::stream;
use async_trait::async_trait;
use futures::Stream;
use youtube_client::{
    Page, Result, SubscribedChannel, YouTubeError, MAX_COMMENT_THREADS_PAGE,
    MAX_PLAYLIST_ITEMS_PAGE, MAX_SUBSCRIPTIONS_PAGE,
};

use crate::traits::YouTubeApi;

/// A paginated listing: which resource, filtered how, in what page size.
#[async_trait]
pub trait ListEndpoint: Send + Sync {
    type Item: Send;

    /// Short label for logs, e.g. `commentThreads(videoId=abc)`.
    fn describe(&self) -> String;

    fn page_size(&self) -> u32;

    async fn fetch_page(
        &self,
        api: &dyn YouTubeApi,
        page_token: Option<&str>,
    ) -> Result<Page<Self::Item>>;
}

/// Video ids in a playlist.
#[derive(Debug, Clone)]
pub struct PlaylistVideos {
    pub playlist_id: String,
}

impl PlaylistVideos {
    pub fn new(playlist_id: impl Into<String>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
        }
    }
}

#[async_trait]
impl ListEndpoint for PlaylistVideos {
    type Item = String;

    fn describe(&self) -> String {
        format!("playlistItems(playlistId={})", self.playlist_id)
    }

    fn page_size(&self) -> u32 {
        MAX_PLAYLIST_ITEMS_PAGE
    }

    async fn fetch_page(
        &self,
        api: &dyn YouTubeApi,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        api.playlist_video_ids(&self.playlist_id, self.page_size(), page_token)
            .await
    }
}

/// Top-level comment authors on a video.
#[derive(Debug, Clone)]
pub struct CommentThreads {
    pub video_id: String,
}

impl CommentThreads {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

#[async_trait]
impl ListEndpoint for CommentThreads {
    type Item = Option<String>;

    fn describe(&self) -> String {
        format!("commentThreads(videoId={})", self.video_id)
    }

    fn page_size(&self) -> u32 {
        MAX_COMMENT_THREADS_PAGE
    }

    async fn fetch_page(
        &self,
        api: &dyn YouTubeApi,
        page_token: Option<&str>,
    ) -> Result<Page<Option<String>>> {
        api.comment_thread_authors(&self.video_id, self.page_size(), page_token)
            .await
    }
}

/// Channels a commenter is subscribed to.
#[derive(Debug, Clone)]
pub struct Subscriptions {
    pub channel_id: String,
    page_size: u32,
}

impl Subscriptions {
    /// `wanted` caps the page size so a small per-commenter cap doesn't pull full pages.
    pub fn new(channel_id: impl Into<String>, wanted: usize) -> Self {
        let page_size = wanted.clamp(1, MAX_SUBSCRIPTIONS_PAGE as usize) as u32;
        Self {
            channel_id: channel_id.into(),
            page_size,
        }
    }
}

#[async_trait]
impl ListEndpoint for Subscriptions {
    type Item = SubscribedChannel;

    fn describe(&self) -> String {
        format!("subscriptions(channelId={})", self.channel_id)
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn fetch_page(
        &self,
        api: &dyn YouTubeApi,
        page_token: Option<&str>,
    ) -> Result<Page<SubscribedChannel>> {
        api.subscriptions(&self.channel_id, self.page_size, page_token)
            .await
    }
}

/// Stream every item of `endpoint`, following `nextPageToken` until the API stops sending one.
///
/// Each call starts again from the first page.
pub fn paginate<'a, E>(
    api: &'a dyn YouTubeApi,
    endpoint: E,
) -> impl Stream<Item = std::result::Result<E::Item, YouTubeError>> + 'a
where
    E: ListEndpoint + 'a,
{
    stream! {
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;
        loop {
            let page = match endpoint.fetch_page(api, page_token.as_deref()).await {
                Ok(page) => page,
                Err(err) => {
                    yield Err(err);
                    break;
                }
            };
            pages += 1;
            tracing::trace!(
                endpoint = %endpoint.describe(),
                page = pages,
                items = page.items.len(),
                "Fetched page"
            );

            let Page { items, next_page_token } = page;
            for item in items {
                yield Ok(item);
            }

            match next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::pin::pin;

    use futures::StreamExt;

    use super::*;
    use crate::testing::MockYouTube;

    #[tokio::test]
    async fn follows_cursor_until_last_page() {
        let api = MockYouTube::new()
            .on_playlist_page("UUchan", None, Page::with_next(vec!["v1".into(), "v2".into()], "p2"))
            .on_playlist_page("UUchan", Some("p2"), Page::with_next(vec!["v3".into()], "p3"))
            .on_playlist_page("UUchan", Some("p3"), Page::last(vec!["v4".into()]));

        let ids: Vec<String> = paginate(&api, PlaylistVideos::new("UUchan"))
            .map(|item| item.unwrap())
            .collect()
            .await;

        assert_eq!(ids, vec!["v1", "v2", "v3", "v4"]);
        assert_eq!(api.calls().playlist_pages, 3);
    }

    #[tokio::test]
    async fn stopping_early_skips_remaining_pages() {
        let api = MockYouTube::new()
            .on_playlist_page("UUchan", None, Page::with_next(vec!["v1".into(), "v2".into()], "p2"))
            .on_playlist_page("UUchan", Some("p2"), Page::last(vec!["v3".into()]));

        let mut stream = pin!(paginate(&api, PlaylistVideos::new("UUchan")));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, "v1");

        assert_eq!(api.calls().playlist_pages, 1);
    }

    #[tokio::test]
    async fn page_error_is_yielded_once_and_ends_the_stream() {
        let api = MockYouTube::new()
            .on_playlist_page("UUchan", None, Page::with_next(vec!["v1".into()], "p2"));
        // No page registered for "p2": the mock answers with an API error.

        let items: Vec<_> = paginate(&api, PlaylistVideos::new("UUchan")).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "v1");
        assert!(items[1].is_err());
        assert_eq!(api.calls().playlist_pages, 2);
    }

    #[test]
    fn subscription_page_size_tracks_the_cap() {
        assert_eq!(Subscriptions::new("UCa", 5).page_size(), 5);
        assert_eq!(Subscriptions::new("UCa", 500).page_size(), MAX_SUBSCRIPTIONS_PAGE);
        assert_eq!(Subscriptions::new("UCa", 0).page_size(), 1);
    }
}
