//! Environment variable expansion for configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$VAR` is kept
/// literally. `field` names the configuration key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(VarError::NotPresent) => Err(env_error(field, format!("${{{name}}} not set"))),
        Err(VarError::NotUnicode(_)) => Err(env_error(field, format!("${{{name}}} is not UTF-8"))),
    };

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(e.cause),
    }
}

fn env_error(field: &str, message: String) -> ConfigError {
    ConfigError::EnvVar {
        field: field.to_owned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPREVIEW_EXPAND_OUT", "/tmp/out");
        }
        let result = expand_env("${MDPREVIEW_EXPAND_OUT}/preview.html", "watch.output").unwrap();
        assert_eq!(result, "/tmp/out/preview.html");
        unsafe {
            std::env::remove_var("MDPREVIEW_EXPAND_OUT");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDPREVIEW_EXPAND_UNSET");
        }
        let result = expand_env("${MDPREVIEW_EXPAND_UNSET:-preview.html}", "watch.output").unwrap();
        assert_eq!(result, "preview.html");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDPREVIEW_EXPAND_MISSING");
        }
        let err = expand_env("${MDPREVIEW_EXPAND_MISSING}", "watch.output").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MDPREVIEW_EXPAND_MISSING"));
        assert!(err.to_string().contains("watch.output"));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("out/preview.html", "watch.output").unwrap(), "out/preview.html");
        assert_eq!(expand_env("$HOME/x", "watch.output").unwrap(), "$HOME/x");
    }
}
