use youtube_client::YouTubeError;

use crate::traits::YouTubeApi;

/// What a single-item subscriptions request told us about a channel.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// At least one subscription is publicly listed.
    Public,
    /// The listing succeeded but was empty.
    Empty,
    /// The listing failed (private subscriptions, quota, network). Not retried.
    Unverifiable(YouTubeError),
}

impl ProbeOutcome {
    pub fn is_public(&self) -> bool {
        matches!(self, ProbeOutcome::Public)
    }
}

/// Ask for one subscription id of `channel_id`.
pub async fn probe(api: &dyn YouTubeApi, channel_id: &str) -> ProbeOutcome {
    match api.subscription_id_count(channel_id, 1).await {
        Ok(0) => ProbeOutcome::Empty,
        Ok(_) => ProbeOutcome::Public,
        Err(err) => ProbeOutcome::Unverifiable(err),
    }
}

/// True only when the channel's subscriptions are visibly listed.
/// Empty listings and failed requests both count as "no".
pub async fn has_public_subscriptions(api: &dyn YouTubeApi, channel_id: &str) -> bool {
    let outcome = probe(api, channel_id).await;
    match &outcome {
        ProbeOutcome::Public => {}
        ProbeOutcome::Empty => {
            tracing::debug!(channel_id, "No public subscriptions listed");
        }
        ProbeOutcome::Unverifiable(err) => {
            tracing::debug!(channel_id, error = %err, "Could not check subscriptions");
        }
    }
    outcome.is_public()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel, MockYouTube};

    #[tokio::test]
    async fn listed_subscriptions_are_public() {
        let api = MockYouTube::new().on_subscriptions("UCpub", vec![channel("UCa", "Alpha")]);
        assert!(has_public_subscriptions(&api, "UCpub").await);
        assert_eq!(api.calls().probes, 1);
    }

    #[tokio::test]
    async fn empty_listing_and_error_are_indistinguishable() {
        let api = MockYouTube::new()
            .on_subscriptions("UCempty", vec![])
            .on_subscription_error("UCquota", None);

        assert!(!has_public_subscriptions(&api, "UCempty").await);
        assert!(!has_public_subscriptions(&api, "UCquota").await);
        // Never registered: the mock answers subscriptionForbidden.
        assert!(!has_public_subscriptions(&api, "UCprivate").await);
    }

    #[tokio::test]
    async fn probe_reports_why() {
        let api = MockYouTube::new().on_subscriptions("UCempty", vec![]);

        assert!(matches!(probe(&api, "UCempty").await, ProbeOutcome::Empty));
        match probe(&api, "UCprivate").await {
            ProbeOutcome::Unverifiable(err) => {
                assert_eq!(err.reason(), Some("subscriptionForbidden"))
            }
            other => panic!("expected Unverifiable, got {other:?}"),
        }
    }
}
