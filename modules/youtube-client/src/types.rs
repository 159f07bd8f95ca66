use serde::Deserialize;

// --- Envelope ---

/// Every `*.list` endpoint answers with this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

impl<T> ListResponse<T> {
    /// Convert into a [`Page`], mapping each item. Items mapping to `None` are dropped.
    pub fn into_page<U>(self, f: impl FnMut(T) -> Option<U>) -> Page<U> {
        Page {
            items: self.items.into_iter().filter_map(f).collect(),
            next_page_token: self.next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token. `None` means this was the last page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    pub fn with_next(items: Vec<T>, token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: Some(token.into()),
        }
    }
}

// --- channels.list ---

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

impl Channel {
    /// The channel's implicit uploads playlist.
    pub fn uploads_playlist_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()?
            .related_playlists
            .as_ref()?
            .uploads
            .as_deref()
    }
}

// --- playlistItems.list ---

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(rename = "resourceId")]
    pub resource_id: Option<ResourceId>,
}

/// Pointer to another resource. Playlist items set `videoId`, subscriptions set `channelId`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

impl PlaylistItem {
    pub fn into_video_id(self) -> Option<String> {
        self.snippet?.resource_id?.video_id.filter(|id| !id.is_empty())
    }
}

// --- commentThreads.list ---

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "authorChannelId")]
    pub author_channel_id: Option<AuthorChannelId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorChannelId {
    pub value: Option<String>,
}

impl CommentThread {
    /// Channel id of the top-level comment's author. Absent for deleted or anonymous authors.
    pub fn into_author_channel_id(self) -> Option<String> {
        self.snippet?
            .top_level_comment?
            .snippet?
            .author_channel_id?
            .value
            .filter(|id| !id.is_empty())
    }
}

// --- subscriptions.list ---

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: Option<String>,
    pub snippet: Option<SubscriptionSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionSnippet {
    pub title: Option<String>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<ResourceId>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// A subscribed-to channel, flattened out of a subscription resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribedChannel {
    pub channel_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

impl Subscription {
    /// Flatten into the target channel. Items without a target channel id are dropped;
    /// a missing title becomes `"(unknown)"`.
    pub fn into_subscribed_channel(self) -> Option<SubscribedChannel> {
        let snippet = self.snippet?;
        let channel_id = snippet
            .resource_id?
            .channel_id
            .filter(|id| !id.is_empty())?;
        Some(SubscribedChannel {
            channel_id,
            title: snippet.title.unwrap_or_else(|| "(unknown)".to_string()),
            thumbnail_url: snippet.thumbnails.and_then(|t| t.default).map(|t| t.url),
        })
    }
}

// --- errors ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: Option<String>,
    #[serde(default = "Vec::new")]
    pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorItem {
    pub reason: Option<String>,
}
