//! Walk a channel's uploads and gather distinct commenters whose
//! subscriptions are public.

use std::collections::HashSet;
use std::pin::pin;

use futures::StreamExt;
use serde::Serialize;

use crate::fetcher::{paginate, CommentThreads, PlaylistVideos};
use crate::privacy;
use crate::stats::RunStats;
use crate::traits::YouTubeApi;

/// A channel that wrote at least one top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Commenter {
    pub channel_id: String,
}

/// Commenters in the order they were found, each at most once.
#[derive(Debug, Default, Clone)]
pub struct CommenterSet {
    order: Vec<Commenter>,
    seen: HashSet<String>,
}

impl CommenterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the commenter was already present.
    pub fn insert(&mut self, commenter: Commenter) -> bool {
        if !self.seen.insert(commenter.channel_id.clone()) {
            return false;
        }
        self.order.push(commenter);
        true
    }

    pub fn contains(&self, channel_id: &str) -> bool {
        self.seen.contains(channel_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Commenter> {
        self.order.iter()
    }
}

impl FromIterator<Commenter> for CommenterSet {
    fn from_iter<I: IntoIterator<Item = Commenter>>(iter: I) -> Self {
        let mut set = CommenterSet::new();
        for commenter in iter {
            set.insert(commenter);
        }
        set
    }
}

pub struct CommenterCollector<'a> {
    api: &'a dyn YouTubeApi,
}

impl<'a> CommenterCollector<'a> {
    pub fn new(api: &'a dyn YouTubeApi) -> Self {
        Self { api }
    }

    /// Scan comment threads video by video until `max_commenters` commenters with
    /// public subscriptions are found or the uploads run out.
    ///
    /// Reaching the cap returns immediately; no further comment pages or videos are requested.
    pub async fn collect(
        &self,
        uploads_playlist_id: &str,
        max_commenters: usize,
        stats: &mut RunStats,
    ) -> CommenterSet {
        let mut commenters = CommenterSet::new();
        if max_commenters == 0 {
            return commenters;
        }

        // Probe answers don't change within a run; don't pay for the same "no" twice.
        let mut rejected: HashSet<String> = HashSet::new();

        let mut videos = pin!(paginate(self.api, PlaylistVideos::new(uploads_playlist_id)));
        while let Some(video) = videos.next().await {
            let video_id = match video {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(
                        playlist_id = uploads_playlist_id,
                        error = %err,
                        "Uploads listing failed, no further videos"
                    );
                    stats.playlist_truncated = true;
                    break;
                }
            };

            stats.videos_scanned += 1;
            tracing::info!(video_id = video_id.as_str(), "Scanning comments for video");

            let mut threads = pin!(paginate(self.api, CommentThreads::new(video_id.as_str())));
            while let Some(thread) = threads.next().await {
                let author = match thread {
                    Ok(author) => author,
                    Err(err) => {
                        tracing::warn!(
                            video_id = video_id.as_str(),
                            error = %err,
                            "Skipping comments for video due to API error"
                        );
                        stats.videos_skipped += 1;
                        break;
                    }
                };
                stats.comment_threads_seen += 1;

                let Some(channel_id) = author else {
                    continue;
                };
                if commenters.contains(&channel_id) || rejected.contains(&channel_id) {
                    continue;
                }

                stats.commenters_probed += 1;
                if !privacy::has_public_subscriptions(self.api, &channel_id).await {
                    stats.commenters_rejected += 1;
                    rejected.insert(channel_id);
                    continue;
                }

                commenters.insert(Commenter { channel_id });
                stats.commenters_qualified += 1;
                tracing::info!(total = commenters.len(), "Found commenter with public subs");

                if commenters.len() >= max_commenters {
                    tracing::info!(max_commenters, "Reached max_commenters");
                    return commenters;
                }
            }
        }

        tracing::info!(
            count = commenters.len(),
            "Collected commenters with public subscriptions"
        );
        commenters
    }
}
