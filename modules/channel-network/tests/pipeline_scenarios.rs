//! End-to-end pipeline scenarios against MockYouTube.
//!
//! Each test sets up the fake API, runs the real pipeline, and checks the
//! ranked output plus which requests were (and were not) made.

use std::sync::Arc;

use channel_network::aggregator::SubscriptionAggregator;
use channel_network::collector::CommenterCollector;
use channel_network::ranking::top_entries;
use channel_network::stats::RunStats;
use channel_network::testing::{channel, MockYouTube};
use channel_network::{ChannelRef, Limits, Pipeline, RankedEntry};
use youtube_client::Page;

const CHAN: &str = "UCX6OQ3DkcsbYNE6H8uQQuVA";

fn entry(id: &str, title: &str, count: u64) -> RankedEntry {
    RankedEntry {
        channel_id: id.to_string(),
        title: title.to_string(),
        count,
        thumbnail_url: None,
    }
}

async fn run(api: MockYouTube, limits: Limits) -> (Vec<RankedEntry>, RunStats, Arc<MockYouTube>) {
    let api = Arc::new(api);
    let report = Pipeline::new(api.clone())
        .run(&ChannelRef::Id(CHAN.to_string()), &limits)
        .await
        .expect("limits are valid");
    (report.entries, report.stats, api)
}

// ---------------------------------------------------------------------------
// Channel lookup returns no items → []
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_channel_returns_empty_list() {
    let (entries, _, api) = run(MockYouTube::new().on_missing_channel(CHAN), Limits::default()).await;

    assert!(entries.is_empty());
    assert_eq!(api.calls().playlist_pages, 0);
}

// ---------------------------------------------------------------------------
// One video, two qualifying commenters sharing a subscription
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shared_subscription_ranks_first() {
    let api = MockYouTube::new()
        .on_channel(CHAN, "UUchan")
        .on_uploads("UUchan", &["v1"])
        .on_comments("v1", &["UCc1", "UCc2"])
        .on_subscriptions("UCc1", vec![channel("A", "Alpha")])
        .on_subscriptions("UCc2", vec![channel("A", "Alpha"), channel("B", "Beta")]);

    let (entries, stats, _) = run(api, Limits::builder().num_nodes(10).build()).await;

    assert_eq!(entries, vec![entry("A", "Alpha", 2), entry("B", "Beta", 1)]);
    assert_eq!(stats.commenters_qualified, 2);
    assert_eq!(stats.subscriptions_counted, 3);
}

#[tokio::test]
async fn table_and_format_match_expected_counts() {
    let api = MockYouTube::new()
        .on_uploads("UUchan", &["v1"])
        .on_comments("v1", &["UCc1", "UCc2"])
        .on_subscriptions("UCc1", vec![channel("A", "Alpha")])
        .on_subscriptions("UCc2", vec![channel("A", "Alpha"), channel("B", "Beta")]);

    let mut stats = RunStats::default();
    let commenters = CommenterCollector::new(&api)
        .collect("UUchan", 50, &mut stats)
        .await;
    let table = SubscriptionAggregator::new(&api)
        .aggregate(&commenters, 50, &mut stats)
        .await;

    assert_eq!(table.count("A", "Alpha"), 2);
    assert_eq!(table.count("B", "Beta"), 1);
    assert_eq!(table.len(), 2);
    assert_eq!(
        top_entries(&table, 10),
        vec![entry("A", "Alpha", 2), entry("B", "Beta", 1)]
    );
}

// ---------------------------------------------------------------------------
// max_commenters=1 with 3 qualifying commenters available
// ---------------------------------------------------------------------------

#[tokio::test]
async fn commenter_cap_of_one_stops_collection() {
    let api = MockYouTube::new()
        .on_channel(CHAN, "UUchan")
        .on_playlist_page("UUchan", None, Page::with_next(vec!["v1".to_string()], "p2"))
        .on_playlist_page("UUchan", Some("p2"), Page::last(vec!["v2".to_string()]))
        .on_comments("v1", &["UCc1", "UCc2"])
        .on_comments("v2", &["UCc3"])
        .on_subscriptions("UCc1", vec![channel("A", "Alpha")])
        .on_subscriptions("UCc2", vec![channel("B", "Beta")])
        .on_subscriptions("UCc3", vec![channel("C", "Gamma")]);

    let (entries, stats, api) = run(api, Limits::builder().max_commenters(1).build()).await;

    assert_eq!(entries, vec![entry("A", "Alpha", 1)]);
    assert_eq!(stats.commenters_qualified, 1);

    let calls = api.calls();
    assert_eq!(calls.playlist_pages, 1, "second uploads page never requested");
    assert_eq!(calls.comment_videos, vec!["v1"]);
    assert_eq!(calls.probes, 1);
    assert_eq!(calls.subscription_channels, vec!["UCc1"]);
}

// ---------------------------------------------------------------------------
// One commenter's subscription fetch errors entirely
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_commenter_does_not_disturb_others() {
    let api = MockYouTube::new()
        .on_channel(CHAN, "UUchan")
        .on_uploads("UUchan", &["v1"])
        .on_comments("v1", &["UCc1", "UCbroken", "UCc2"])
        .on_subscriptions("UCc1", vec![channel("A", "Alpha"), channel("B", "Beta")])
        .on_probe("UCbroken", 1)
        .on_subscription_error("UCbroken", None)
        .on_subscriptions("UCc2", vec![channel("B", "Beta")]);

    let (entries, stats, _) = run(api, Limits::default()).await;

    assert_eq!(entries, vec![entry("B", "Beta", 2), entry("A", "Alpha", 1)]);
    assert_eq!(stats.commenters_qualified, 3);
    assert_eq!(stats.subscription_fetches_failed, 1);
    assert_eq!(stats.subscriptions_counted, 3);
}

// ---------------------------------------------------------------------------
// Caps are hard upper bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn caps_bound_every_stage() {
    let many: Vec<_> = (0..10)
        .map(|i| channel(&format!("S{i}"), &format!("Sub {i}")))
        .collect();
    let authors: Vec<String> = (0..8).map(|i| format!("UCc{i}")).collect();
    let author_refs: Vec<&str> = authors.iter().map(String::as_str).collect();

    let mut api = MockYouTube::new()
        .on_channel(CHAN, "UUchan")
        .on_uploads("UUchan", &["v1"])
        .on_comments("v1", &author_refs);
    for author in &authors {
        api = api.on_subscriptions(author, many.clone());
    }

    let limits = Limits::builder()
        .num_nodes(4)
        .max_commenters(5)
        .max_subscriptions_per_commenter(3)
        .build();
    let (entries, stats, api) = run(api, limits).await;

    assert!(entries.len() <= 4);
    assert!(stats.commenters_qualified <= 5);
    assert!(stats.subscriptions_counted <= 5 * 3);
    assert!(entries.iter().all(|e| e.count <= 5));
    assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));

    // Every commenter reads the same first three, so they tie at five.
    assert_eq!(
        entries,
        vec![
            entry("S0", "Sub 0", 5),
            entry("S1", "Sub 1", 5),
            entry("S2", "Sub 2", 5),
        ]
    );
    assert_eq!(api.calls().subscription_channels.len(), 5);
}

#[tokio::test]
async fn concurrent_aggregation_ranks_like_sequential() {
    let build = || {
        MockYouTube::new()
            .on_channel(CHAN, "UUchan")
            .on_uploads("UUchan", &["v1"])
            .on_comments("v1", &["UCc1", "UCc2", "UCc3"])
            .on_subscriptions("UCc1", vec![channel("B", "Beta"), channel("A", "Alpha")])
            .on_subscriptions("UCc2", vec![channel("A", "Alpha"), channel("C", "Gamma")])
            .on_subscriptions("UCc3", vec![channel("C", "Gamma"), channel("B", "Beta")])
    };

    let (sequential, _, _) = run(build(), Limits::default()).await;
    let (concurrent, _, _) = run(
        build(),
        Limits::builder().subscription_concurrency(3).build(),
    )
    .await;

    assert_eq!(sequential, concurrent);
    let ids: Vec<&str> = sequential.iter().map(|e| e.channel_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
}
