//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", e.var_name, e.cause),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(
            expand_env("https://docs.example.com", "source.base_url").unwrap(),
            "https://docs.example.com"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${FOLIO_TEST_UNSET_HOST:-localhost}", "server.host").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_missing_variable_names_field() {
        let err = expand_env("${FOLIO_TEST_MISSING_VAR}", "source.base_url").unwrap_err();

        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "source.base_url");
                assert!(message.contains("FOLIO_TEST_MISSING_VAR"), "{message}");
            }
            other => panic!("expected EnvVar error, got {other:?}"),
        }
    }
}
