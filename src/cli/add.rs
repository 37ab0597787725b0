use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use srindex::{Category, Config, Priority, RequestRecord};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Log a new service request")]
pub struct Add {
    /// Where the problem was observed
    #[arg(long)]
    location: String,

    /// Sanitation, Roads, Utilities, Safety or Other
    #[arg(long)]
    category: Category,

    /// Urgency from 1 (most urgent) to 5 (least urgent)
    #[arg(long)]
    priority: Priority,

    /// What the problem is
    #[arg(long)]
    description: String,

    /// Path of a photo or PDF supporting the report
    #[arg(long)]
    attachment: Option<PathBuf>,
}

impl Add {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut snapshot = super::open_snapshot(config)?;

        let mut record =
            RequestRecord::new(&self.location, self.category, self.priority, &self.description);
        if let Some(attachment) = self.attachment {
            record = record.with_attachment(attachment);
        }

        let reference = snapshot
            .add(record)
            .context("request rejected")?
            .reference_code();
        snapshot.save().with_context(|| {
            format!("failed to save snapshot {}", snapshot.path().display())
        })?;

        println!(
            "{}",
            format!("Your report has been logged. Ref: {reference}").success()
        );
        Ok(())
    }
}
