use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use aggregator::cli::{Cli, Commands};
use aggregator::config::Config;
use aggregator::domain::{Category, Limit};
use aggregator::errors::AggregatorResult;
use aggregator::services::AggregateService;
use aggregator::sources::FeedRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> AggregatorResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind);
            aggregator::run_server(config, addr).await
        }
        Commands::Fetch { category, limit } => cmd_fetch(&config, &category, limit).await,
        Commands::Feeds { category } => cmd_feeds(category.as_deref()),
    }
}

async fn cmd_fetch(config: &Config, category: &str, limit: i64) -> AggregatorResult<()> {
    let category: Category = category.parse()?;
    let limit = Limit::try_from(limit)?;

    let service = AggregateService::from_config(config)?;
    let articles = service.aggregate(category, limit).await?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &articles)?;
    writeln!(stdout)?;

    Ok(())
}

fn cmd_feeds(category: Option<&str>) -> AggregatorResult<()> {
    let category: Category = category.unwrap_or("all").parse()?;
    let feeds = FeedRegistry::new().for_category(category);

    if feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Configured feeds:\n");
    for feed in feeds {
        println!("  {} [{}]", feed.source, feed.category);
        println!("    URL: {}", feed.url);
        println!();
    }

    Ok(())
}
