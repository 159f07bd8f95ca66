pub mod aggregator;
pub mod channel_ref;
pub mod collector;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod privacy;
pub mod ranking;
pub mod report;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use channel_ref::ChannelRef;
pub use config::{Credential, Limits, NetworkConfig};
pub use error::{NetworkError, Result};
pub use pipeline::{most_common_subscriptions, Pipeline, RunReport};
pub use ranking::RankedEntry;
