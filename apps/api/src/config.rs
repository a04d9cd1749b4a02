use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SAMPLE_CSV_PATH: &str = "data/AutoPitchGPT_with_Pitches.csv";
const DEFAULT_SAMPLE_LIMIT: usize = 5;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub sample_csv_path: PathBuf,
    /// How many sample startups the selector offers.
    pub sample_limit: usize,
    pub max_upload_bytes: usize,
    /// Credential placeholder. Loaded and reported, never used for formatting.
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_csv_path: PathBuf::from(DEFAULT_SAMPLE_CSV_PATH),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            openai_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            sample_csv_path: std::env::var("SAMPLE_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.sample_csv_path),
            sample_limit: parse_env("SAMPLE_LIMIT", defaults.sample_limit)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: usize = parse_env("AUTOPITCH_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("AUTOPITCH_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("AUTOPITCH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("AUTOPITCH_TEST_BAD_PORT"));
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("AUTOPITCH_TEST_LIMIT", " 12 ");
        let value: usize = parse_env("AUTOPITCH_TEST_LIMIT", 5).unwrap();
        assert_eq!(value, 12);
    }

    #[test]
    fn test_default_sample_path() {
        let config = Config::default();
        assert_eq!(
            config.sample_csv_path,
            PathBuf::from("data/AutoPitchGPT_with_Pitches.csv")
        );
        assert_eq!(config.sample_limit, 5);
    }
}
