use std::io::{self, Write};

use clap::Parser;
use srindex::Config;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show the inspection route over report locations")]
pub struct Route {
    /// Print bare `from<TAB>to` pairs.
    #[arg(long)]
    quiet: bool,
}

impl Route {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let snapshot = super::open_snapshot(config)?;
        let index = snapshot.index();
        let mut out = io::stdout().lock();
        write_route(&mut out, index.inspection_route(), self.quiet)
    }
}

fn write_route<'a>(
    out: &mut impl Write,
    route: impl Iterator<Item = (&'a str, &'a str)>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut steps = 0;
    for (step, (from, to)) in route.enumerate() {
        if quiet {
            writeln!(out, "{from}\t{to}")?;
        } else {
            writeln!(out, "{:>3}. {from} {} {to}", step + 1, "->".dim())?;
        }
        steps += 1;
    }

    if steps == 0 && !quiet {
        writeln!(out, "{}", "No route: fewer than two distinct locations.".dim())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_route_is_tab_separated() {
        let mut out = Vec::new();
        write_route(&mut out, [("A", "B"), ("B", "C")].into_iter(), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A\tB\nB\tC\n");
    }

    #[test]
    fn empty_quiet_route_prints_nothing() {
        let mut out = Vec::new();
        write_route(&mut out, std::iter::empty(), true).unwrap();
        assert!(out.is_empty());
    }
}
