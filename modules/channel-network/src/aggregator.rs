//! Fold commenters' public subscriptions into a frequency table.

use std::collections::{HashMap, HashSet};
use std::pin::pin;

use futures::{stream, StreamExt};
use youtube_client::{SubscribedChannel, YouTubeError};

use crate::collector::CommenterSet;
use crate::fetcher::{paginate, Subscriptions};
use crate::stats::RunStats;
use crate::traits::YouTubeApi;

/// Identity of a counted channel. Title is part of the key, so a channel seen
/// under two titles is counted as two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub channel_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub key: ChannelKey,
    pub count: u64,
    /// First thumbnail seen for this key.
    pub thumbnail_url: Option<String>,
}

/// Multiset of subscribed-to channels. Iterates in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    entries: Vec<TableEntry>,
    index: HashMap<ChannelKey, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, channel: &SubscribedChannel) {
        let key = ChannelKey {
            channel_id: channel.channel_id.clone(),
            title: channel.title.clone(),
        };
        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.count += 1;
                if entry.thumbnail_url.is_none() {
                    entry.thumbnail_url = channel.thumbnail_url.clone();
                }
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(TableEntry {
                    key,
                    count: 1,
                    thumbnail_url: channel.thumbnail_url.clone(),
                });
            }
        }
    }

    pub fn count(&self, channel_id: &str, title: &str) -> u64 {
        let key = ChannelKey {
            channel_id: channel_id.to_string(),
            title: title.to_string(),
        };
        self.index
            .get(&key)
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }
}

/// Outcome of reading one commenter's subscriptions.
#[derive(Debug)]
pub struct CommenterSubscriptions {
    pub channel_id: String,
    /// What was read before the cap, the end of the list, or an error.
    pub channels: Vec<SubscribedChannel>,
    pub error: Option<YouTubeError>,
}

/// Read up to `cap` distinct subscriptions of one channel.
///
/// Pagination stops as soon as the cap is reached, mid-page if need be.
pub async fn fetch_subscriptions(
    api: &dyn YouTubeApi,
    channel_id: &str,
    cap: usize,
) -> CommenterSubscriptions {
    let mut outcome = CommenterSubscriptions {
        channel_id: channel_id.to_string(),
        channels: Vec::new(),
        error: None,
    };
    if cap == 0 {
        return outcome;
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut subs = pin!(paginate(api, Subscriptions::new(channel_id, cap)));
    while let Some(item) = subs.next().await {
        match item {
            Ok(channel) => {
                if !seen.insert(channel.channel_id.clone()) {
                    continue;
                }
                outcome.channels.push(channel);
                if outcome.channels.len() >= cap {
                    break;
                }
            }
            Err(err) => {
                outcome.error = Some(err);
                break;
            }
        }
    }
    outcome
}

pub struct SubscriptionAggregator<'a> {
    api: &'a dyn YouTubeApi,
    concurrency: usize,
}

impl<'a> SubscriptionAggregator<'a> {
    /// Sequential: one commenter at a time.
    pub fn new(api: &'a dyn YouTubeApi) -> Self {
        Self {
            api,
            concurrency: 1,
        }
    }

    /// Fetch up to `concurrency` commenters at once. Results are still folded
    /// in commenter order, so the table comes out the same as a sequential run.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn aggregate(
        &self,
        commenters: &CommenterSet,
        max_subscriptions_per_commenter: usize,
        stats: &mut RunStats,
    ) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        let total = commenters.len();

        let api = self.api;
        let mut fetches = pin!(stream::iter(commenters.iter())
            .map(|commenter| {
                fetch_subscriptions(api, &commenter.channel_id, max_subscriptions_per_commenter)
            })
            .buffered(self.concurrency));

        let mut idx = 0usize;
        while let Some(outcome) = fetches.next().await {
            idx += 1;
            if let Some(err) = &outcome.error {
                stats.subscription_fetches_failed += 1;
                tracing::debug!(
                    channel_id = outcome.channel_id.as_str(),
                    error = %err,
                    kept = outcome.channels.len(),
                    "Could not fetch subscriptions"
                );
            }

            for channel in &outcome.channels {
                table.increment(channel);
            }
            stats.subscriptions_counted += outcome.channels.len() as u32;

            tracing::info!(
                "[{}/{}] Processed {} subscriptions for commenter {}",
                idx,
                total,
                outcome.channels.len(),
                outcome.channel_id
            );
        }

        stats.distinct_channels = table.len() as u32;
        table
    }
}
