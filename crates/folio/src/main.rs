//! Folio CLI - documentation generator.
//!
//! Provides commands for:
//! - `build`: Build a static site with the configured builder
//! - `catalogs compile`: Compile gettext catalogs to `.mo` files

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CatalogsCommand};
use output::Output;

/// Folio - documentation generator.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise `RUST_LOG` applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site.
    Build(BuildArgs),
    /// Translation catalog commands.
    #[command(subcommand)]
    Catalogs(CatalogsCommand),
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Catalogs(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_filter_defaults_to_warn() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(log_filter(false).to_string(), "warn");
        assert_eq!(log_filter(true).to_string(), "info");
    }

    #[test]
    fn parse_build_with_builder() {
        let cli = Cli::try_parse_from(["folio", "build", "-b", "dirhtml", "--no-parallel", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn update_conflicts_with_domains() {
        let result = Cli::try_parse_from(["folio", "catalogs", "compile", "--update", "admonitions"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["folio", "catalogs", "compile", "admonitions", "markup"]).unwrap();
        assert!(matches!(cli.command, Commands::Catalogs(_)));
    }
}
