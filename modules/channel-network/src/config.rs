use std::fmt;

use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::error::{NetworkError, Result};

/// The single opaque API key. Never printed in full.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Rejects empty or whitespace-only keys.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(NetworkError::MissingCredential);
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `AIzaS...(39 chars)`
    pub fn preview(&self) -> String {
        let n = self
            .0
            .char_indices()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        format!("{}...({} chars)", &self.0[..n], self.0.len())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.preview()).finish()
    }
}

/// Environment-sourced settings: the API key and an optional API root override.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub api_key: Credential,
    pub api_base_url: Option<String>,
}

impl NetworkConfig {
    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = Credential::new(std::env::var("YT_API_KEY").unwrap_or_default())?;
        let config = Self {
            api_key,
            api_base_url: std::env::var("YT_API_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  YT_API_KEY: {}", self.api_key.preview());
        tracing::info!(
            "  YT_API_BASE_URL: {}",
            self.api_base_url.as_deref().unwrap_or("<default>")
        );
    }
}

/// Caps bounding one run. Every cap is a hard upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TypedBuilder)]
pub struct Limits {
    /// How many ranked channels to return.
    #[builder(default = 10)]
    pub num_nodes: usize,
    /// Stop collecting once this many commenters with public subscriptions are found.
    #[builder(default = 50)]
    pub max_commenters: usize,
    /// Read at most this many subscriptions per commenter.
    #[builder(default = 50)]
    pub max_subscriptions_per_commenter: usize,
    /// Commenters whose subscriptions are fetched at once. 1 is fully sequential.
    #[builder(default = 1)]
    pub subscription_concurrency: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Limits {
    pub fn validate(&self) -> Result<()> {
        if self.subscription_concurrency == 0 {
            return Err(NetworkError::InvalidConfig(
                "subscription_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
