use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use srindex::{Config, RequestRecord};
use tracing::instrument;

use super::{OutputFormat, terminal::Colorize};

/// Command arguments for `srq list`.
#[derive(Debug, Parser, Default)]
#[command(about = "List requests ordered by identifier")]
pub struct List {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let snapshot = super::open_snapshot(config)?;
        let index = snapshot.index();
        let records: Vec<_> = index.ordered_by_id().collect();

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.output {
            OutputFormat::Json => print_json(&mut out, &records)?,
            OutputFormat::Table => print_table(&mut out, &records, self.quiet)?,
        }
        Ok(())
    }
}

/// Writes records as a JSON array.
pub fn print_json(out: &mut impl Write, records: &[&RequestRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records).context("failed to serialize records")?;
    writeln!(out)?;
    Ok(())
}

/// Writes records as an aligned table, one row per record.
pub fn print_table(
    out: &mut impl Write,
    records: &[&RequestRecord],
    quiet: bool,
) -> anyhow::Result<()> {
    if records.is_empty() {
        if !quiet {
            writeln!(out, "{}", "No service requests.".dim())?;
        }
        return Ok(());
    }

    let location_width = records
        .iter()
        .map(|record| record.location().chars().count())
        .max()
        .unwrap_or(0)
        .max("LOCATION".len());

    if !quiet {
        writeln!(
            out,
            "{}",
            format!(
                "{:<8}  {:<3}  {:<10}  {:<location_width$}  {:<11}  CREATED",
                "REF", "PRI", "CATEGORY", "LOCATION", "STATUS"
            )
            .dim()
        )?;
    }

    for record in records {
        writeln!(
            out,
            "{:<8}  {}   {:<10}  {:<location_width$}  {:<11}  {}",
            record.reference_code(),
            super::terminal::priority_label(record.priority()),
            record.category(),
            record.location(),
            record.status(),
            record.created().format("%Y-%m-%d %H:%M"),
        )?;
    }
    Ok(())
}
