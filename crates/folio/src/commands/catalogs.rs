//! `folio catalogs` subcommand group.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_builder::{Registry, StaticSiteBuilder};
use folio_config::{CliSettings, Config};
use folio_i18n::CompileReport;

use crate::error::CliError;
use crate::output::Output;

/// Catalog commands.
#[derive(Subcommand)]
pub(crate) enum CatalogsCommand {
    /// Compile `.po` catalogs of the configured language to `.mo` files.
    Compile(CompileArgs),
}

impl CatalogsCommand {
    /// Execute the catalogs subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Compile(args) => args.execute(),
        }
    }
}

/// Arguments for the catalogs compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Domains to compile (default: all catalogs).
    domains: Vec<String>,

    /// Only compile catalogs whose `.mo` is missing or out of date.
    #[arg(long, conflicts_with = "domains")]
    update: bool,

    /// Target language (overrides config).
    #[arg(short = 'D', long, env = "FOLIO_LANGUAGE")]
    language: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CompileArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            language: self.language,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let Some(language) = config.i18n_resolved.language.clone() else {
            output.warning("no language configured, nothing to compile");
            return Ok(());
        };

        let registry = Registry::with_builtins()?;
        let site = StaticSiteBuilder::new(&config, &registry)?;
        let report = if self.update {
            site.compile_update_catalogs()
        } else if self.domains.is_empty() {
            site.compile_all_catalogs()
        } else {
            site.compile_specific_catalogs(&self.domains)
        };

        summarize(&output, &language, &report)
    }
}

fn summarize(output: &Output, language: &str, report: &CompileReport) -> Result<(), CliError> {
    for domain in &report.compiled {
        output.compiled(domain);
    }
    for domain in &report.failed {
        output.failed(domain);
    }
    if !report.failed.is_empty() {
        return Err(CliError::Catalogs(format!(
            "{} catalog(s) failed to compile: {}",
            report.failed.len(),
            report.failed.join(", ")
        )));
    }
    output.finished(format_args!(
        "{} catalog(s) for '{language}'",
        report.compiled.len()
    ));
    Ok(())
}
