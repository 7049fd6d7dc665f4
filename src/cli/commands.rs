use std::net::SocketAddr;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "news-aggregator")]
#[command(about = "Korean news RSS aggregator with a cached JSON API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve GET /api/rss over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "AGGREGATOR_BIND")]
        bind: Option<SocketAddr>,
    },

    /// Aggregate once and print the articles as JSON
    Fetch {
        /// Category to aggregate (politics, economy, society, world, sports, entertainment, tech, all)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Maximum number of articles, -1 for all of them
        #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
        limit: i64,
    },

    /// List configured feeds with their derived category and source
    Feeds {
        /// Only show feeds of this category
        #[arg(short, long)]
        category: Option<String>,
    },
}
