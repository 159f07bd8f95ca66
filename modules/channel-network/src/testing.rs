// Test mock for the YouTubeApi boundary.
//
// MockYouTube serves pages registered by (resource id, page token). Anything
// not registered answers with an API error, the same way an unknown or
// private resource does on the real API. Every request is counted so tests
// can assert that early exits really stop asking.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use youtube_client::{Page, Result, SubscribedChannel, YouTubeError};

use crate::traits::YouTubeApi;

type PageKey = (String, Option<String>);

/// Request counters, snapshotted by [`MockYouTube::calls`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub channel_lookups: u32,
    pub handle_lookups: u32,
    pub playlist_pages: u32,
    pub comment_pages: u32,
    pub subscription_pages: u32,
    pub probes: u32,
    /// Video ids in the order their comment pages were requested.
    pub comment_videos: Vec<String>,
    /// Channel ids in the order their subscription pages were requested.
    pub subscription_channels: Vec<String>,
}

/// HashMap-based YouTube API.
/// Builder pattern: `.on_channel()`, `.on_uploads()`, `.on_comments()`, `.on_subscriptions()`.
pub struct MockYouTube {
    channels: HashMap<String, Option<String>>,
    handles: HashMap<String, String>,
    playlist_pages: HashMap<PageKey, Page<String>>,
    comment_pages: HashMap<PageKey, Page<Option<String>>>,
    subscription_pages: HashMap<PageKey, Page<SubscribedChannel>>,
    subscription_errors: HashSet<PageKey>,
    probes: HashMap<String, usize>,
    calls: Mutex<CallCounts>,
}

impl Default for MockYouTube {
    fn default() -> Self {
        Self::new()
    }
}

impl MockYouTube {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            handles: HashMap::new(),
            playlist_pages: HashMap::new(),
            comment_pages: HashMap::new(),
            subscription_pages: HashMap::new(),
            subscription_errors: HashSet::new(),
            probes: HashMap::new(),
            calls: Mutex::new(CallCounts::default()),
        }
    }

    /// Register a channel and its uploads playlist.
    pub fn on_channel(mut self, channel_id: &str, uploads_playlist_id: &str) -> Self {
        self.channels.insert(
            channel_id.to_string(),
            Some(uploads_playlist_id.to_string()),
        );
        self
    }

    /// A channel lookup that succeeds with zero items.
    pub fn on_missing_channel(mut self, channel_id: &str) -> Self {
        self.channels.insert(channel_id.to_string(), None);
        self
    }

    pub fn on_handle(mut self, handle: &str, channel_id: &str) -> Self {
        self.handles
            .insert(handle.trim_start_matches('@').to_string(), channel_id.to_string());
        self
    }

    /// Single-page playlist.
    pub fn on_uploads(self, playlist_id: &str, video_ids: &[&str]) -> Self {
        let ids = video_ids.iter().map(|s| s.to_string()).collect();
        self.on_playlist_page(playlist_id, None, Page::last(ids))
    }

    pub fn on_playlist_page(
        mut self,
        playlist_id: &str,
        page_token: Option<&str>,
        page: Page<String>,
    ) -> Self {
        self.playlist_pages
            .insert(key(playlist_id, page_token), page);
        self
    }

    /// Single page of comment threads, one per author.
    pub fn on_comments(self, video_id: &str, authors: &[&str]) -> Self {
        self.on_comment_page(video_id, None, authors_page(authors, None))
    }

    pub fn on_comment_page(
        mut self,
        video_id: &str,
        page_token: Option<&str>,
        page: Page<Option<String>>,
    ) -> Self {
        self.comment_pages.insert(key(video_id, page_token), page);
        self
    }

    /// Single page of subscriptions. Also answers the privacy probe.
    pub fn on_subscriptions(self, channel_id: &str, subscribed: Vec<SubscribedChannel>) -> Self {
        self.on_subscription_page(channel_id, None, Page::last(subscribed))
    }

    pub fn on_subscription_page(
        mut self,
        channel_id: &str,
        page_token: Option<&str>,
        page: Page<SubscribedChannel>,
    ) -> Self {
        self.subscription_pages
            .insert(key(channel_id, page_token), page);
        self
    }

    /// Make one subscriptions page fail, even if a page is registered for it.
    pub fn on_subscription_error(mut self, channel_id: &str, page_token: Option<&str>) -> Self {
        self.subscription_errors.insert(key(channel_id, page_token));
        self
    }

    /// Fix what the privacy probe sees, independent of the registered pages.
    pub fn on_probe(mut self, channel_id: &str, visible: usize) -> Self {
        self.probes.insert(channel_id.to_string(), visible);
        self
    }

    pub fn calls(&self) -> CallCounts {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, f: impl FnOnce(&mut CallCounts)) {
        f(&mut self.calls.lock().unwrap());
    }
}

#[async_trait]
impl YouTubeApi for MockYouTube {
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        self.record(|c| c.channel_lookups += 1);
        self.channels
            .get(channel_id)
            .cloned()
            .ok_or_else(|| not_found("channels", channel_id))
    }

    async fn channel_id_for_handle(&self, handle: &str) -> Result<Option<String>> {
        self.record(|c| c.handle_lookups += 1);
        Ok(self.handles.get(handle.trim_start_matches('@')).cloned())
    }

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        self.record(|c| c.playlist_pages += 1);
        self.playlist_pages
            .get(&key(playlist_id, page_token))
            .cloned()
            .ok_or_else(|| not_found("playlistItems", playlist_id))
    }

    async fn comment_thread_authors(
        &self,
        video_id: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Option<String>>> {
        self.record(|c| {
            c.comment_pages += 1;
            c.comment_videos.push(video_id.to_string());
        });
        self.comment_pages
            .get(&key(video_id, page_token))
            .cloned()
            .ok_or_else(|| forbidden("commentsDisabled", video_id))
    }

    async fn subscriptions(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SubscribedChannel>> {
        self.record(|c| {
            c.subscription_pages += 1;
            c.subscription_channels.push(channel_id.to_string());
        });
        let k = key(channel_id, page_token);
        if self.subscription_errors.contains(&k) {
            return Err(forbidden("quotaExceeded", channel_id));
        }
        let mut page = self
            .subscription_pages
            .get(&k)
            .cloned()
            .ok_or_else(|| forbidden("subscriptionForbidden", channel_id))?;
        // The real API never returns more than maxResults.
        page.items.truncate(page_size as usize);
        Ok(page)
    }

    async fn subscription_id_count(&self, channel_id: &str, max_results: u32) -> Result<usize> {
        self.record(|c| c.probes += 1);
        if let Some(visible) = self.probes.get(channel_id) {
            return Ok((*visible).min(max_results as usize));
        }
        let k = key(channel_id, None);
        if self.subscription_errors.contains(&k) {
            return Err(forbidden("quotaExceeded", channel_id));
        }
        self.subscription_pages
            .get(&k)
            .map(|page| page.items.len().min(max_results as usize))
            .ok_or_else(|| forbidden("subscriptionForbidden", channel_id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key(id: &str, page_token: Option<&str>) -> PageKey {
    (id.to_string(), page_token.map(str::to_string))
}

fn not_found(resource: &str, id: &str) -> YouTubeError {
    YouTubeError::Api {
        status: 404,
        reason: "notFound".to_string(),
        message: format!("MockYouTube: no {resource} registered for {id}"),
    }
}

fn forbidden(reason: &str, id: &str) -> YouTubeError {
    YouTubeError::Api {
        status: 403,
        reason: reason.to_string(),
        message: format!("MockYouTube: {reason} for {id}"),
    }
}

/// A subscribed-to channel without a thumbnail.
pub fn channel(channel_id: &str, title: &str) -> SubscribedChannel {
    SubscribedChannel {
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        thumbnail_url: None,
    }
}

/// A page of comment threads, one per author id.
pub fn authors_page(authors: &[&str], next_page_token: Option<&str>) -> Page<Option<String>> {
    Page {
        items: authors.iter().map(|a| Some(a.to_string())).collect(),
        next_page_token: next_page_token.map(str::to_string),
    }
}
