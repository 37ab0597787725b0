use std::io::{self, Write};

use clap::Parser;
use srindex::{Config, domain::ReferenceKey};
use tracing::instrument;

use super::{
    OutputFormat,
    list::{print_json, print_table},
    terminal::Colorize,
};

#[derive(Debug, Parser)]
#[command(about = "Find a request by reference code or identifier")]
pub struct Find {
    /// The 8-character reference code or the full identifier
    reference: String,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Find {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let Some(key) = ReferenceKey::parse(&self.reference) else {
            eprintln!("{}", "Please enter a reference code.".warning());
            std::process::exit(1);
        };

        let snapshot = super::open_snapshot(config)?;
        let index = snapshot.index();

        let Some(record) = index.find_by_reference(key.as_str()) else {
            eprintln!("No service request found with reference {key}");
            std::process::exit(1);
        };

        let mut out = io::stdout().lock();
        match self.output {
            OutputFormat::Json => print_json(&mut out, &[record]),
            OutputFormat::Table => {
                writeln!(out, "{}", format!("Result for reference {key}:").success())?;
                print_table(&mut out, &[record], false)?;
                if !record.description().is_empty() {
                    writeln!(out, "\n{}", record.description())?;
                }
                Ok(())
            }
        }
    }
}
