//! Command-line interface for quickmatch.

use clap::Parser;

/// Quickmatch - realtime matchmaking server for two-player tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "quickmatch")]
#[command(about = "Realtime matchmaking and session server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "3000")]
    pub port: u16,
}
