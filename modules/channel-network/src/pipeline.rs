//! Resolve channel → collect commenters → aggregate subscriptions → rank.

use std::sync::Arc;

use serde::Serialize;
use youtube_client::YouTubeClient;

use crate::aggregator::SubscriptionAggregator;
use crate::channel_ref::ChannelRef;
use crate::collector::CommenterCollector;
use crate::config::{Credential, Limits};
use crate::error::Result;
use crate::ranking::{top_entries, RankedEntry};
use crate::stats::RunStats;
use crate::traits::YouTubeApi;

/// Everything a run produced. `entries` may be empty; that is a normal outcome.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// The resolved channel id, if resolution succeeded.
    pub channel_id: Option<String>,
    pub entries: Vec<RankedEntry>,
    pub stats: RunStats,
}

pub struct Pipeline {
    api: Arc<dyn YouTubeApi>,
}

impl Pipeline {
    pub fn new(api: Arc<dyn YouTubeApi>) -> Self {
        Self { api }
    }

    /// Build a pipeline over the real API.
    pub fn with_credential(credential: &Credential, api_base_url: Option<&str>) -> Self {
        let key = credential.expose().to_string();
        let client = match api_base_url {
            Some(url) => YouTubeClient::with_base_url(url, key),
            None => YouTubeClient::new(key),
        };
        Self::new(Arc::new(client))
    }

    /// Run every stage once. Only invalid limits return `Err`; remote failures
    /// shrink the result instead.
    pub async fn run(&self, channel: &ChannelRef, limits: &Limits) -> Result<RunReport> {
        limits.validate()?;
        let api = self.api.as_ref();
        let mut report = RunReport::default();

        let Some(channel_id) = self.resolve_channel_id(channel).await else {
            return Ok(report);
        };
        report.channel_id = Some(channel_id.clone());

        let Some(uploads_playlist_id) = self.uploads_playlist_id(&channel_id).await else {
            tracing::error!(
                channel_id = channel_id.as_str(),
                "Could not determine uploads playlist for channel"
            );
            return Ok(report);
        };
        tracing::info!(
            channel_id = channel_id.as_str(),
            uploads_playlist_id = uploads_playlist_id.as_str(),
            "Resolved uploads playlist"
        );

        let commenters = CommenterCollector::new(api)
            .collect(&uploads_playlist_id, limits.max_commenters, &mut report.stats)
            .await;
        if commenters.is_empty() {
            tracing::warn!("No commenters with public subscriptions found");
            return Ok(report);
        }

        let table = SubscriptionAggregator::new(api)
            .with_concurrency(limits.subscription_concurrency)
            .aggregate(
                &commenters,
                limits.max_subscriptions_per_commenter,
                &mut report.stats,
            )
            .await;

        report.entries = top_entries(&table, limits.num_nodes);
        tracing::info!(
            ranked = report.entries.len(),
            distinct = table.len(),
            "Ranking complete"
        );
        Ok(report)
    }

    async fn resolve_channel_id(&self, channel: &ChannelRef) -> Option<String> {
        let handle = match channel {
            ChannelRef::Id(id) => return Some(id.clone()),
            ChannelRef::Handle(handle) => handle,
        };

        match self.api.channel_id_for_handle(&format!("@{handle}")).await {
            Ok(Some(id)) => {
                tracing::info!(handle = handle.as_str(), channel_id = id.as_str(), "Resolved handle");
                Some(id)
            }
            Ok(None) => {
                tracing::error!(handle = handle.as_str(), "No channel found for handle");
                None
            }
            Err(err) => {
                tracing::error!(handle = handle.as_str(), error = %err, "YouTube API error while resolving handle");
                None
            }
        }
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> Option<String> {
        match self.api.uploads_playlist_id(channel_id).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                tracing::warn!(channel_id, "No channel found for id");
                None
            }
            Err(err) => {
                tracing::error!(channel_id, error = %err, "YouTube API error while fetching channel contentDetails");
                None
            }
        }
    }
}

/// One-shot entry point: validate the credential and channel reference, then run
/// against the real API and return the ranked channels.
///
/// The credential is checked before any request is made.
pub async fn most_common_subscriptions(
    api_key: &str,
    channel: &str,
    limits: &Limits,
) -> Result<Vec<RankedEntry>> {
    let credential = Credential::new(api_key)?;
    let channel = ChannelRef::parse(channel)?;
    let report = Pipeline::with_credential(&credential, None)
        .run(&channel, limits)
        .await?;
    Ok(report.entries)
}
