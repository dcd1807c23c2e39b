use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use config::{Config, Environment};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_SERVICE_STATUS_URL: &str = "https://api.mta.info/serviceStatus";
pub const DEFAULT_SAMPLE_STATUS_PATH: &str = "data/sample-service-status.xml";
pub const DEFAULT_STATUS_ENDPOINT: &str = "http://localhost:3000/api/status";

/// Server settings, read from the process environment (PORT, HOST,
/// MTA_SERVICE_STATUS_URL, MTA_API_KEY, SAMPLE_STATUS_PATH).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    #[serde(rename = "mta_service_status_url")]
    pub service_status_url: String,
    #[serde(rename = "mta_api_key", default)]
    api_key: Option<String>,
    pub sample_status_path: PathBuf,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_environment(Environment::default())
    }

    pub fn from_environment(environment: Environment) -> anyhow::Result<Self> {
        let builder = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("mta_service_status_url", DEFAULT_SERVICE_STATUS_URL)?
            .set_default("sample_status_path", DEFAULT_SAMPLE_STATUS_PATH)?;

        build(builder, environment)
    }

    /// Blank keys count as not configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Settings for the terminal status board (STATUS_BOARD_ENDPOINT).
#[derive(Debug, Clone, Deserialize)]
pub struct BoardSettings {
    pub status_board_endpoint: String,
}

impl BoardSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_environment(Environment::default())
    }

    pub fn from_environment(environment: Environment) -> anyhow::Result<Self> {
        let builder = Config::builder()
            .set_default("status_board_endpoint", DEFAULT_STATUS_ENDPOINT)?;

        build(builder, environment)
    }
}

fn build<T: DeserializeOwned>(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    environment: Environment,
) -> anyhow::Result<T> {
    builder
        .add_source(environment)
        .build()
        .context("Failed to build configuration")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")
}

/// Environment source backed by a fixed map instead of the process env.
pub fn environment_from(vars: &[(&str, &str)]) -> Environment {
    let source: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Environment::default().source(Some(source))
}
