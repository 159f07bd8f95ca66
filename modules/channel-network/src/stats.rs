use serde::Serialize;

/// Stats from a pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub videos_scanned: u32,
    pub videos_skipped: u32,
    pub comment_threads_seen: u32,
    pub commenters_probed: u32,
    pub commenters_qualified: u32,
    pub commenters_rejected: u32,
    pub subscription_fetches_failed: u32,
    pub subscriptions_counted: u32,
    pub distinct_channels: u32,
    pub playlist_truncated: bool,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Channel Network Run Complete ===")?;
        writeln!(f, "Videos scanned:        {}", self.videos_scanned)?;
        writeln!(f, "Videos skipped:        {}", self.videos_skipped)?;
        writeln!(f, "Comment threads seen:  {}", self.comment_threads_seen)?;
        writeln!(f, "Commenters probed:     {}", self.commenters_probed)?;
        writeln!(f, "  with public subs:    {}", self.commenters_qualified)?;
        writeln!(f, "  private/empty:       {}", self.commenters_rejected)?;
        writeln!(f, "Subscriptions counted: {}", self.subscriptions_counted)?;
        writeln!(f, "  failed fetches:      {}", self.subscription_fetches_failed)?;
        write!(f, "Distinct channels:     {}", self.distinct_channels)?;
        if self.playlist_truncated {
            write!(f, "\n(uploads listing ended early on an API error)")?;
        }
        Ok(())
    }
}
