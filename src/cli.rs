use std::path::{Path, PathBuf};

mod add;
mod find;
mod graph;
mod list;
mod route;
mod terminal;
mod urgent;

use add::Add;
use anyhow::Context;
use clap::{ArgAction, ValueEnum};
use find::Find;
use graph::Graph;
use list::List;
use route::Route;
use srindex::{Config, storage::Snapshot};
use tracing::debug;
use urgent::Urgent;

/// Name of the configuration file looked up in the working directory.
const CONFIG_FILE: &str = "srq.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the snapshot file (overrides the configured path)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = load_config(self.config.as_deref())?;
        if let Some(snapshot) = self.snapshot {
            config.set_snapshot(snapshot);
        }

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the explicit config file, or `srq.toml` if present, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).map_err(|e| anyhow::anyhow!(e));
    }

    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        debug!(path = %path.display(), "loading configuration");
        Config::load(path).map_err(|e| anyhow::anyhow!(e))
    } else {
        Ok(Config::default())
    }
}

fn open_snapshot(config: &Config) -> anyhow::Result<Snapshot> {
    Snapshot::open(config.snapshot())
        .with_context(|| format!("failed to open snapshot {}", config.snapshot().display()))
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Log a new service request
    Add(Add),

    /// List requests ordered by identifier (default)
    List(List),

    /// List the most urgent requests
    Urgent(Urgent),

    /// Show the inspection route over report locations
    Route(Route),

    /// Show the location adjacency graph
    Graph(Graph),

    /// Find a request by reference code or identifier
    Find(Find),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Add(command) => command.run(config)?,
            Self::List(command) => command.run(config)?,
            Self::Urgent(command) => command.run(config)?,
            Self::Route(command) => command.run(config)?,
            Self::Graph(command) => command.run(config)?,
            Self::Find(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn no_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["srq"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_snapshot_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["srq", "urgent", "--snapshot", "data.yaml"]).unwrap();
        assert_eq!(cli.snapshot, Some(PathBuf::from("data.yaml")));
        assert!(matches!(cli.command, Some(Command::Urgent(_))));
    }

    #[test]
    fn find_requires_a_reference() {
        assert!(Cli::try_parse_from(["srq", "find"]).is_err());
    }

    #[test]
    fn add_rejects_out_of_range_priority() {
        let result = Cli::try_parse_from([
            "srq",
            "add",
            "--location",
            "Main Road",
            "--category",
            "roads",
            "--priority",
            "7",
            "--description",
            "Pothole",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&tmp.path().join("missing.toml"))).is_err());
    }
}
