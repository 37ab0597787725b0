use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use srindex::Config;
use tracing::instrument;

use super::{OutputFormat, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the location adjacency graph")]
pub struct Graph {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Graph {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let snapshot = super::open_snapshot(config)?;
        let index = snapshot.index();
        let graph = index.location_graph();
        let mut out = io::stdout().lock();

        if self.output == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut out, &index.location_adjacency())
                .context("failed to serialize location graph")?;
            writeln!(out)?;
            return Ok(());
        }

        if graph.is_empty() {
            writeln!(out, "{}", "No locations.".dim())?;
            return Ok(());
        }

        // Walk in first-seen order rather than the alphabetical adjacency map.
        for &location in graph.locations() {
            let neighbors: Vec<_> = graph
                .neighbors(location)
                .into_iter()
                .flatten()
                .collect();
            writeln!(out, "{location}: {}", neighbors.join(", "))?;
        }
        Ok(())
    }
}
