use crate::error::ConfigError;
use crate::pipeline::domain::DEFAULT_PRODUCT_NAME;
use config::Environment;
use serde::Deserialize;

/// Prefix of the environment variables read by [`Configuration::from_env`].
pub const ENV_PREFIX: &str = "LABEL_SCAN";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Configuration {
    pub default_product_name: String,
    pub trace_extracted_text: bool,
    pub trace_text_limit: usize,
    pub log_filter: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_product_name: DEFAULT_PRODUCT_NAME.to_string(),
            trace_extracted_text: true,
            trace_text_limit: 2000,
            log_filter: "info".to_string(),
        }
    }
}

impl Configuration {
    /// Defaults overridden by `LABEL_SCAN_*` environment variables, e.g.
    /// `LABEL_SCAN_TRACE_EXTRACTED_TEXT=false`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("default_product_name", defaults.default_product_name)?
            .set_default("trace_extracted_text", defaults.trace_extracted_text)?
            .set_default("trace_text_limit", defaults.trace_text_limit as u64)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(environment.try_parsing(true))
            .build()?;

        let configuration: Configuration = settings.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_product_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Default product name must not be empty".to_string(),
            ));
        }

        if self.trace_text_limit == 0 {
            return Err(ConfigError::Invalid(
                "Trace text limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults_without_overrides() {
        let configuration = Configuration::from_environment(environment(&[])).unwrap();
        assert_eq!(configuration, Configuration::default());
        assert_eq!(configuration.default_product_name, "Unknown Product");
    }

    #[test]
    fn test_environment_overrides() {
        let configuration = Configuration::from_environment(environment(&[
            ("LABEL_SCAN_TRACE_EXTRACTED_TEXT", "false"),
            ("LABEL_SCAN_TRACE_TEXT_LIMIT", "120"),
            ("LABEL_SCAN_LOG_FILTER", "label_scan=debug"),
        ]))
        .unwrap();
        assert!(!configuration.trace_extracted_text);
        assert_eq!(configuration.trace_text_limit, 120);
        assert_eq!(configuration.log_filter, "label_scan=debug");
        assert_eq!(configuration.default_product_name, "Unknown Product");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Configuration::from_environment(environment(&[(
            "LABEL_SCAN_TRACE_TEXT_LIMIT",
            "0",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let configuration = Configuration {
            default_product_name: "  ".to_string(),
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());
    }
}
