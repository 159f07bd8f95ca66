use std::fmt;

use url::Url;

use crate::error::{NetworkError, Result};

/// What the user pointed us at: a channel id, or a handle that still needs resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(String),
    /// Stored without the leading `@`.
    Handle(String),
}

impl ChannelRef {
    /// Accepts `UC…` ids, `@handle`, `youtube.com/channel/<id>`, `youtube.com/@handle`,
    /// legacy `/c/<name>` and `/user/<name>` URLs, or a bare channel name.
    ///
    /// Bare names are treated as handles with whitespace removed ("Mr Beast" → `@MrBeast`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(NetworkError::InvalidChannelRef(input.to_string()));
        }

        if input.contains("youtube.com") || input.starts_with("http://") || input.starts_with("https://") {
            return Self::parse_url(input);
        }

        if let Some(handle) = input.strip_prefix('@') {
            return Self::handle(handle, input);
        }

        if is_channel_id(input) {
            return Ok(ChannelRef::Id(input.to_string()));
        }

        Self::handle(input, input)
    }

    fn parse_url(input: &str) -> Result<Self> {
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{input}")
        };
        let invalid = || NetworkError::InvalidChannelRef(input.to_string());

        let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["channel", id, ..] if is_channel_id(id) => Ok(ChannelRef::Id(id.to_string())),
            ["c", name, ..] | ["user", name, ..] => Self::handle(name, input),
            [first, ..] if first.starts_with('@') => Self::handle(&first[1..], input),
            _ => Err(invalid()),
        }
    }

    fn handle(raw: &str, input: &str) -> Result<Self> {
        let handle: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if handle.is_empty() {
            return Err(NetworkError::InvalidChannelRef(input.to_string()));
        }
        Ok(ChannelRef::Handle(handle))
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "{id}"),
            ChannelRef::Handle(handle) => write!(f, "@{handle}"),
        }
    }
}

/// Channel ids are `UC` followed by 22 URL-safe base64 characters.
fn is_channel_id(s: &str) -> bool {
    s.len() == 24
        && s.starts_with("UC")
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
