use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::services::timeline_bucketizer::Granularity;
use crate::services::timeline_output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate stage timelines for every opportunity and write them to a file
    Timeline {
        /// Planning config YAML
        #[arg(short, long, env = "RESOURCE_PLANNER_CONFIG")]
        config: String,
        /// Opportunities YAML
        #[arg(short, long)]
        input: String,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Date used to mark stages as past (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_today())]
        today: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Aggregate stage FTE into weekly, monthly, quarterly or per-stage buckets
    Buckets {
        /// Planning config YAML
        #[arg(short, long, env = "RESOURCE_PLANNER_CONFIG")]
        config: String,
        /// Opportunities YAML
        #[arg(short, long)]
        input: String,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Bucket granularity
        #[arg(short, long, value_enum, default_value_t = Granularity::Month)]
        granularity: Granularity,
        /// Only include this opportunity
        #[arg(long)]
        opportunity: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Print a text report of each opportunity's timeline
    Report {
        /// Planning config YAML
        #[arg(short, long, env = "RESOURCE_PLANNER_CONFIG")]
        config: String,
        /// Opportunities YAML
        #[arg(short, long)]
        input: String,
        /// Date used to mark stages as past (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_today())]
        today: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
