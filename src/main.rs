// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;
mod config;
mod core;
mod daemon;
mod log;
mod services;

use clap::Parser;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Args::parse();

    app::daemon_mode::run(args).await
}
