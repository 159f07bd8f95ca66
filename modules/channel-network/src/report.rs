use std::fmt::Write;

use crate::ranking::RankedEntry;

/// Aligned plain-text table, one row per entry.
pub fn render_table(entries: &[RankedEntry]) -> String {
    if entries.is_empty() {
        return "No related channels found.\n".to_string();
    }

    let title_width = entries
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("title".len());
    let id_width = entries
        .iter()
        .map(|e| e.channel_id.len())
        .max()
        .unwrap_or(0)
        .max("channel_id".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<title_width$}  {:<id_width$}  {:>5}",
        "#", "title", "channel_id", "count"
    );
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<title_width$}  {:<id_width$}  {:>5}",
            i + 1,
            entry.title,
            entry.channel_id,
            entry.count
        );
    }
    out
}

/// Pretty JSON array of `{channel_id, title, count[, thumbnail_url]}`.
pub fn render_json(entries: &[RankedEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
