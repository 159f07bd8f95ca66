use serde::Serialize;

use crate::aggregator::FrequencyTable;

/// One related channel, as handed to the visualization layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub channel_id: String,
    pub title: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// The `num_nodes` most frequent channels, highest count first.
///
/// Equal counts keep the table's first-seen order.
pub fn top_entries(table: &FrequencyTable, num_nodes: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<_> = table.iter().collect();
    // stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    entries
        .into_iter()
        .take(num_nodes)
        .map(|e| RankedEntry {
            channel_id: e.key.channel_id.clone(),
            title: e.key.title.clone(),
            count: e.count,
            thumbnail_url: e.thumbnail_url.clone(),
        })
        .collect()
}
