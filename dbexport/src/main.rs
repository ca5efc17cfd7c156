//! Exports every table of every SQLite database in the current directory.
//!
//! Database files (`*.db`) are opened read-only and each table is written to
//! `exports/<database>_<table>.csv`. Files or tables that fail are logged and
//! skipped; the run still exits successfully.

use clap::{Args, Parser};
use dbexport_core::{ExportConfig, Result, init_logging, run};
use tracing::error;

#[derive(Parser)]
#[command(name = "dbexport")]
#[command(about = "Export SQLite tables in the current directory to CSV files")]
#[command(version)]
#[command(long_about = "
dbexport - SQLite to CSV table export

Scans the current directory (not recursively) for *.db files, lists the user
tables of each one and writes every table to exports/<database>_<table>.csv
with a header row of column names.

Databases are opened read-only. A file that is not a valid database, or a
table that cannot be exported, is reported and skipped.

Cell rendering: NULL is an empty field, BLOBs are written as base64:<data>.
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    run(&ExportConfig::default()).await.map_err(|e| {
        error!("Export aborted: {}", e.detailed());
        e
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_needed() {
        let cli = Cli::try_parse_from(["dbexport"]).unwrap();
        assert_eq!(cli.global.verbose, 0);
        assert!(!cli.global.quiet);
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["dbexport", "-vv"]).unwrap();
        assert_eq!(cli.global.verbose, 2);

        let cli = Cli::try_parse_from(["dbexport", "--quiet"]).unwrap();
        assert!(cli.global.quiet);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["dbexport", "other_dir"]).is_err());
    }
}
