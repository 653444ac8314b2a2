//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_builder::{Registry, StaticSiteBuilder};
use folio_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Builder to use, e.g. "html" or "dirhtml" (overrides config).
    #[arg(short, long, env = "FOLIO_BUILDER")]
    builder: Option<String>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Target language for catalog compilation (overrides config).
    #[arg(short = 'D', long, env = "FOLIO_LANGUAGE")]
    language: Option<String>,

    /// Write pages sequentially.
    #[arg(long)]
    no_parallel: bool,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            builder: self.builder,
            language: self.language,
            parallel: self.no_parallel.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.path("Source", &config.build_resolved.source_dir);
        output.path("Output", &config.build_resolved.output_dir);

        let registry = Registry::with_builtins()?;
        let site = StaticSiteBuilder::new(&config, &registry)?;
        tracing::debug!(
            builder = site.builder().name(),
            parallel = site.is_parallel(),
            "Site builder ready"
        );
        let report = site.build()?;

        for domain in &report.catalogs_compiled {
            output.compiled(domain);
        }
        if report.pages_written == 0 {
            output.warning("no documents found");
        }
        output.finished(format_args!(
            "{} page(s) with '{}' in {}",
            report.pages_written,
            site.builder().name(),
            report.output_dir.display()
        ));
        Ok(())
    }
}
