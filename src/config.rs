//! Application Configuration
//! Environment-driven settings; `.env` files are honored via dotenv.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "regional_stress_index.csv";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fixed path of the pre-computed indicator file.
    pub data_path: PathBuf,
    /// Credential for the text-generation service. Optional at startup;
    /// required before a question can be submitted.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_path = env::var("STRESSBOARD_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = env::var("STRESSBOARD_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout = match env::var("STRESSBOARD_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("invalid STRESSBOARD_TIMEOUT_SECS: {}", raw))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            data_path,
            api_key,
            model,
            request_timeout,
        })
    }

    pub fn copilot_ready(&self) -> bool {
        self.api_key.is_some()
    }
}
