use std::io;

use clap::Parser;
use srindex::Config;
use tracing::instrument;

use super::{
    OutputFormat,
    list::{print_json, print_table},
};

#[derive(Debug, Parser)]
#[command(about = "List the most urgent requests")]
pub struct Urgent {
    /// How many requests to show (defaults to the configured count)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

impl Urgent {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let snapshot = super::open_snapshot(config)?;
        let index = snapshot.index();
        let count = self.count.unwrap_or_else(|| config.top());
        let records: Vec<_> = index.top_priority(count).collect();

        let mut out = io::stdout().lock();
        match self.output {
            OutputFormat::Json => print_json(&mut out, &records),
            OutputFormat::Table => print_table(&mut out, &records, self.quiet),
        }
    }
}
