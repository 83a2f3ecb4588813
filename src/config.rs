use crate::cli::Cli;
use crate::models::OutputFormat;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable supplying the default API credential.
pub const API_KEY_ENV: &str = "SILICONFLOW_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key provided: pass -k/--api-key or set {API_KEY_ENV}")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Builds the effective configuration from parsed CLI arguments,
    /// falling back to the environment for the credential.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let config = Config {
            api_key,
            api_url: cli.api_url.clone(),
            model: cli.model.clone(),
            prompt: cli.prompt.clone(),
            max_tokens: cli.max_tokens,
            timeout_secs: cli.timeout_secs,
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            output: cli.output.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "max-tokens must be greater than 0".into(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout-secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::env;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["silicon-ocr"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    // Single test because the scenarios share the process-wide env var.
    #[test]
    fn test_api_key_resolution() {
        // flag wins over environment
        env::set_var(API_KEY_ENV, "sk-from-env");
        let cli = parse(&["-k", "sk-from-flag", "a.png"]);
        let config = Config::resolve(&cli).expect("Failed to resolve config");
        assert_eq!(config.api_key, "sk-from-flag");

        // environment supplies the default
        let cli = parse(&["a.png"]);
        let config = Config::resolve(&cli).expect("Failed to resolve config");
        assert_eq!(config.api_key, "sk-from-env");

        // no flag, no env var: fatal with a message naming both sources
        env::remove_var(API_KEY_ENV);
        let cli = parse(&["a.png"]);
        let result = Config::resolve(&cli);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("SILICONFLOW_API_KEY"));
        assert!(message.contains("--api-key"));

        // a blank flag value does not count as a credential
        let cli = parse(&["-k", "   ", "a.png"]);
        assert!(matches!(
            Config::resolve(&cli),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let cli = parse(&["-k", "sk-test", "--api-url", "not-a-url", "a.png"]);
        let result = Config::resolve(&cli);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http:// or https://"));
    }

    #[test]
    fn test_validation_rejects_zero_max_tokens() {
        let cli = parse(&["-k", "sk-test", "--max-tokens", "0", "a.png"]);
        let result = Config::resolve(&cli);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max-tokens"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let cli = parse(&["-k", "sk-test", "--timeout-secs", "0", "a.png"]);
        let result = Config::resolve(&cli);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout-secs"));
    }

    #[test]
    fn test_format_selection_and_timeout() {
        let cli = parse(&["-k", "sk-test", "-j", "--timeout-secs", "5", "a.png"]);
        let config = Config::resolve(&cli).expect("Failed to resolve config");

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let cli = parse(&["-k", "sk-test", "a.png"]);
        let config = Config::resolve(&cli).expect("Failed to resolve config");
        assert_eq!(config.format, OutputFormat::Text);
    }
}
