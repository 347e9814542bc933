use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "dermalens", version, about = "Dermalens skin assessment API server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve,

    /// Manage stored analysis records
    Analysis {
        #[command(subcommand)]
        action: AnalysisAction,
    },
}

#[derive(Subcommand)]
pub enum AnalysisAction {
    /// List stored analyses
    List,

    /// Show a single analysis as JSON
    Get {
        id: Uuid,
    },

    /// Delete an analysis
    Delete {
        id: Uuid,
    },
}
