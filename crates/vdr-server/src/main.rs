//! Visual Document Retrieval server binary
//!
//! ```text
//! vdr --config /etc/vdr/vdr.toml
//! ```

// Force-link vdr-providers so its linkme registrations are included
extern crate vdr_providers;

use clap::Parser;
use vdr_server::run;

/// Command line interface for the Visual Document Retrieval server
#[derive(Parser, Debug)]
#[command(name = "vdr")]
#[command(about = "Visual Document Retrieval - page image embedding and search server")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli.config.as_deref()).await
}
