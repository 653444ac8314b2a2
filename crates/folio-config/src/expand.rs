//! `${VAR}` / `${VAR:-default}` expansion for string settings.

use crate::ConfigError;

/// Expand environment variable references in a config value.
///
/// Only the braced form is expanded; a bare `$VAR` is kept as written so
/// suffixes and paths containing `$` survive untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that had no value and no default.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_language_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_LANG", "de");
        }
        let result = expand_env("${FOLIO_TEST_LANG}", "i18n.language").unwrap();
        assert_eq!(result, "de");
        unsafe {
            std::env::remove_var("FOLIO_TEST_LANG");
        }
    }

    #[test]
    fn test_expand_falls_back_to_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_BUILDER");
        }
        let result = expand_env("${FOLIO_TEST_UNSET_BUILDER:-dirhtml}", "build.builder").unwrap();
        assert_eq!(result, "dirhtml");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "project.name").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("FOLIO_TEST_MISSING"));
        assert!(msg.contains("project.name"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_PRODUCT", "Widget");
        }
        let result = expand_env("${FOLIO_TEST_PRODUCT} Manual", "project.name").unwrap();
        assert_eq!(result, "Widget Manual");
        unsafe {
            std::env::remove_var("FOLIO_TEST_PRODUCT");
        }
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("en", "i18n.language").unwrap(), "en");
        assert_eq!(expand_env("$HOME", "project.name").unwrap(), "$HOME");
    }
}
