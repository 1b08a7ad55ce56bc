pub mod export;
pub mod init;
pub mod migrate;
pub mod seo;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogdesk")]
#[command(version)]
#[command(about = "Blog post admin backend", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "blogdesk.toml", env = "BLOGDESK_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config and data directories
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Apply pending database migrations
    Migrate,
    /// Run the API server
    Serve {
        /// Overrides server.host from the config
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Overrides server.port from the config
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the SEO report of a stored post
    Seo { id: i64 },
    /// Dump posts as JSON
    Export {
        #[arg(short, long, default_value = "./posts.json")]
        output: PathBuf,
        #[arg(long)]
        include_drafts: bool,
    },
}
