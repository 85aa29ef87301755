// Author: Dustin Pilgrim
// License: MIT

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "focustrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track window focus, screen lock and connectivity into a daily log"
)]
pub struct Args {
    /// Log path prefix; the current day is appended as `_YYYY-MM-DD`
    #[arg(short, long = "log-prefix", value_name = "PATH")]
    pub log_prefix: Option<PathBuf>,

    /// Also record short focus sessions and other debug lines
    #[arg(short, long, action)]
    pub verbose: bool,

    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
