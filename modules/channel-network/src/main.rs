use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use channel_network::report::{render_json, render_table};
use channel_network::{ChannelRef, Limits, NetworkConfig, Pipeline};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
#[command(
    name = "channel-network",
    about = "Rank the channels a YouTube channel's commenters subscribe to most"
)]
struct Cli {
    /// Channel id (UC…), @handle, channel URL, or channel name
    channel: String,

    /// Number of related channels to report
    #[arg(long, default_value_t = 10)]
    nodes: usize,

    /// Commenters with public subscriptions to collect
    #[arg(long, default_value_t = 50)]
    commenters: usize,

    /// Subscriptions to read per commenter
    #[arg(long = "subs-per-commenter", default_value_t = 50)]
    subs_per_commenter: usize,

    /// Commenters whose subscriptions are fetched at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("channel_network=info,youtube_client=info")
    });
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // Credential is checked before anything touches the network.
    let config = NetworkConfig::from_env()?;
    let channel = ChannelRef::parse(&cli.channel)?;
    let limits = Limits::builder()
        .num_nodes(cli.nodes)
        .max_commenters(cli.commenters)
        .max_subscriptions_per_commenter(cli.subs_per_commenter)
        .subscription_concurrency(cli.concurrency)
        .build();

    info!(channel = %channel, ?limits, "Channel network starting...");

    let pipeline = Pipeline::with_credential(&config.api_key, config.api_base_url.as_deref());
    let report = pipeline.run(&channel, &limits).await?;
    info!("{}", report.stats);

    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&report.entries)),
        OutputFormat::Json => println!("{}", render_json(&report.entries)?),
    }

    Ok(())
}
