use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means heuristic-only operation.
    pub openai_api_key: Option<String>,
    pub ai_enabled: bool,
    pub port: u16,
    pub rust_log: String,
    pub max_input_chars: usize,
    pub max_upload_bytes: usize,
    /// Reject low-confidence resumes with 422 instead of annotating and proceeding.
    pub strict_resume_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            ai_enabled: true,
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            strict_resume_validation: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            ai_enabled: parse_or(&lookup, "AI_ENABLED", defaults.ai_enabled)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_input_chars: parse_or(&lookup, "MAX_INPUT_CHARS", defaults.max_input_chars)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            strict_resume_validation: parse_or(
                &lookup,
                "STRICT_RESUME_VALIDATION",
                defaults.strict_resume_validation,
            )?,
        })
    }

    /// The API key, when AI assistance should be used at all.
    pub fn ai_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref().filter(|_| self.ai_enabled)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_input_chars, 20_000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.ai_enabled);
        assert!(!config.strict_resume_validation);
        assert_eq!(config.ai_key(), None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "3000"),
            ("STRICT_RESUME_VALIDATION", "true"),
            ("MAX_INPUT_CHARS", "5000"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.strict_resume_validation);
        assert_eq!(config.max_input_chars, 5000);
        assert_eq!(config.ai_key(), Some("sk-test"));
    }

    #[test]
    fn test_ai_disabled_hides_key() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-test"), ("AI_ENABLED", "false")]).unwrap();
        assert_eq!(config.ai_key(), None);
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = config_from(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_invalid_values_fail_with_context() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config_from(&[("AI_ENABLED", "yes")]).is_err());
    }
}
