//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "zeitgeist",
    version,
    about = "Surfaces representative posts for the major factions of opinion within a topic",
    long_about = "Zeitgeist samples a corpus of short social-media posts for a topic, clusters \
                  them over lexical and sentiment features, and reports a small set of \
                  representative posts annotated with how many records each stands for and how \
                  central it is to its group."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/zeitgeist/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the pseudo-random generator (reproducible runs)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Number of records to sample from the source
    #[arg(long, global = true, value_name = "N")]
    pub sample_size: Option<usize>,

    /// Skip clustering and synthesize mock representatives (requires --seed)
    #[arg(long, global = true)]
    pub mock: bool,

    /// Print results as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run both the topical and sentiment passes for a topic
    Process {
        /// Topic name, matching a CSV file in the data directory
        topic: String,
    },

    /// Find representative posts by word usage (topical factions)
    Cluster {
        /// Topic name, matching a CSV file in the data directory
        topic: String,

        /// Number of clusters to surface
        #[arg(short, long)]
        num_clusters: Option<usize>,

        /// Use the threshold-driven stopping rule instead of a fixed count
        #[arg(long)]
        auto: bool,
    },

    /// Find representative posts by sentiment polarity (emotional factions)
    Sentiment {
        /// Topic name, matching a CSV file in the data directory
        topic: String,
    },

    /// List topics with a record file in the data directory
    Topics,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the active configuration
    Show,

    /// Print the config file path
    Path,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
