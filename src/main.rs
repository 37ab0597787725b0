//! `srq`: query and maintain a snapshot of municipal service requests.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
