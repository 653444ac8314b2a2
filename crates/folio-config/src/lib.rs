//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `project.name`
//! - `build.builder`
//! - `i18n.language`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override documentation source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override builder name.
    pub builder: Option<String>,
    /// Override target language.
    pub language: Option<String>,
    /// Override parallel page writing.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project metadata.
    pub project: ProjectConfig,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Internationalization configuration (paths are relative strings from TOML).
    i18n: I18nConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Resolved internationalization configuration (set after loading).
    #[serde(skip)]
    pub i18n_resolved: I18nConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Project metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, used as the site title.
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Documentation".to_owned(),
        }
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    builder: Option<String>,
    out_suffix: Option<String>,
    parallel: Option<bool>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing markdown sources.
    pub source_dir: PathBuf,
    /// Directory the site is written to.
    pub output_dir: PathBuf,
    /// Name of the builder to run (e.g. "html", "dirhtml").
    pub builder: String,
    /// Suffix appended to output files (e.g. ".html").
    pub out_suffix: String,
    /// Whether pages may be written in parallel.
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("_build"),
            builder: "html".to_owned(),
            out_suffix: ".html".to_owned(),
            parallel: true,
        }
    }
}

/// Raw i18n configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct I18nConfigRaw {
    language: Option<String>,
    locale_dirs: Option<Vec<String>>,
    gettext_compact: Option<bool>,
    gettext_auto_build: Option<bool>,
    gettext_allow_fuzzy_translations: Option<bool>,
}

/// Resolved internationalization configuration.
#[derive(Debug, Clone)]
pub struct I18nConfig {
    /// Target language code. `None` disables catalog handling.
    pub language: Option<String>,
    /// Directories holding `<lang>/LC_MESSAGES/*.po` catalogs.
    pub locale_dirs: Vec<PathBuf>,
    /// Map every document in a top-level directory to one catalog domain.
    pub gettext_compact: bool,
    /// Compile outdated catalogs at the start of every build.
    pub gettext_auto_build: bool,
    /// Keep fuzzy translations when compiling.
    pub gettext_allow_fuzzy_translations: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: None,
            locale_dirs: vec![PathBuf::from("locales")],
            gettext_compact: true,
            gettext_auto_build: true,
            gettext_allow_fuzzy_translations: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`i18n.language`").
        field: String,
        /// Error message (e.g., "${`DOCS_LANG`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        let defaults = BuildConfig::default();
        Self {
            project: ProjectConfig::default(),
            build: BuildConfigRaw::default(),
            i18n: I18nConfigRaw::default(),
            build_resolved: BuildConfig {
                source_dir: base.join(&defaults.source_dir),
                output_dir: base.join(&defaults.output_dir),
                ..defaults
            },
            i18n_resolved: I18nConfig {
                locale_dirs: vec![base.join("locales")],
                ..I18nConfig::default()
            },
            config_path: None,
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(builder) = &settings.builder {
            self.build_resolved.builder.clone_from(builder);
        }
        if let Some(language) = &settings.language {
            self.i18n_resolved.language = Some(language.clone());
        }
        if let Some(parallel) = settings.parallel {
            self.build_resolved.parallel = parallel;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_build()?;
        self.validate_i18n()?;
        Ok(())
    }

    fn validate_build(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.build_resolved.builder, "build.builder")?;

        let suffix = &self.build_resolved.out_suffix;
        if !suffix.starts_with('.') || suffix.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "build.out_suffix must start with '.' (got {suffix:?})"
            )));
        }

        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        if let Some(language) = &self.i18n_resolved.language {
            require_non_empty(language, "i18n.language")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.project.name = expand::expand_env(&self.project.name, "project.name")?;

        if let Some(ref builder) = self.build.builder {
            self.build.builder = Some(expand::expand_env(builder, "build.builder")?);
        }

        if let Some(ref language) = self.i18n.language {
            self.i18n.language = Some(expand::expand_env(language, "i18n.language")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let build_defaults = BuildConfig::default();
        let i18n_defaults = I18nConfig::default();

        self.build_resolved = BuildConfig {
            source_dir: resolve(self.build.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.build.output_dir.as_deref(), "_build"),
            builder: self.build.builder.clone().unwrap_or(build_defaults.builder),
            out_suffix: self
                .build
                .out_suffix
                .clone()
                .unwrap_or(build_defaults.out_suffix),
            parallel: self.build.parallel.unwrap_or(build_defaults.parallel),
        };

        let locale_dirs = match &self.i18n.locale_dirs {
            Some(dirs) => dirs.iter().map(|d| config_dir.join(d)).collect(),
            None => vec![config_dir.join("locales")],
        };

        self.i18n_resolved = I18nConfig {
            language: self.i18n.language.clone(),
            locale_dirs,
            gettext_compact: self
                .i18n
                .gettext_compact
                .unwrap_or(i18n_defaults.gettext_compact),
            gettext_auto_build: self
                .i18n
                .gettext_auto_build
                .unwrap_or(i18n_defaults.gettext_auto_build),
            gettext_allow_fuzzy_translations: self
                .i18n
                .gettext_allow_fuzzy_translations
                .unwrap_or(i18n_defaults.gettext_allow_fuzzy_translations),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.project.name, "Documentation");
        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/test/_build")
        );
        assert_eq!(config.build_resolved.builder, "html");
        assert_eq!(config.build_resolved.out_suffix, ".html");
        assert!(config.build_resolved.parallel);
        assert_eq!(config.i18n_resolved.language, None);
        assert_eq!(
            config.i18n_resolved.locale_dirs,
            vec![PathBuf::from("/test/locales")]
        );
        assert!(config.i18n_resolved.gettext_compact);
        assert!(config.i18n_resolved.gettext_auto_build);
        assert!(!config.i18n_resolved.gettext_allow_fuzzy_translations);
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.project.name, "Documentation");
        assert_eq!(config.build_resolved.builder, "html");
        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/project/docs")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[project]
name = "Widget Manual"

[build]
source_dir = "source"
output_dir = "out/site"
builder = "dirhtml"
out_suffix = ".htm"
parallel = false

[i18n]
language = "en"
locale_dirs = ["locale", "shared/locale"]
gettext_compact = false
gettext_allow_fuzzy_translations = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.project.name, "Widget Manual");
        assert_eq!(
            config.build_resolved.source_dir,
            PathBuf::from("/project/source")
        );
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/project/out/site")
        );
        assert_eq!(config.build_resolved.builder, "dirhtml");
        assert_eq!(config.build_resolved.out_suffix, ".htm");
        assert!(!config.build_resolved.parallel);
        assert_eq!(config.i18n_resolved.language.as_deref(), Some("en"));
        assert_eq!(
            config.i18n_resolved.locale_dirs,
            vec![
                PathBuf::from("/project/locale"),
                PathBuf::from("/project/shared/locale")
            ]
        );
        assert!(!config.i18n_resolved.gettext_compact);
        assert!(config.i18n_resolved.gettext_auto_build);
        assert!(config.i18n_resolved.gettext_allow_fuzzy_translations);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[build]\nbuilder = \"dirhtml\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.build_resolved.builder, "dirhtml");
        assert_eq!(config.build_resolved.source_dir, tmp.path().join("docs"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[build\nbuilder = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            builder: Some("dirhtml".to_owned()),
            language: Some("fr".to_owned()),
            parallel: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.build_resolved.builder, "dirhtml");
        assert_eq!(config.i18n_resolved.language.as_deref(), Some("fr"));
        assert!(!config.build_resolved.parallel);
        // Unchanged
        assert_eq!(config.build_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.build_resolved.builder, "html");
        assert_eq!(config.i18n_resolved.language, None);
    }

    #[test]
    fn test_expand_env_vars_language() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_CONFIG_TEST_LANG", "ja");
        }

        let toml = r#"
[i18n]
language = "${FOLIO_CONFIG_TEST_LANG}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.i18n_resolved.language.as_deref(), Some("ja"));

        unsafe {
            std::env::remove_var("FOLIO_CONFIG_TEST_LANG");
        }
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().expect_err("Expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_builder() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build_resolved.builder = String::new();
        assert_validation_error(&config, &["build.builder", "empty"]);
    }

    #[test]
    fn test_validate_out_suffix_without_dot() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build_resolved.out_suffix = "html".to_owned();
        assert_validation_error(&config, &["out_suffix"]);
    }

    #[test]
    fn test_validate_empty_language() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.i18n_resolved.language = Some(String::new());
        assert_validation_error(&config, &["i18n.language", "empty"]);
    }
}
