use crate::output::OutputFormat;
use crate::stack_exchange::TagClient;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use std::time::Duration;

/// Largest page the Stack Exchange API will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub output: OutputSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub site: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_size: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn client(&self) -> Result<TagClient, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout())
            .build()?;
        Ok(TagClient::new(
            http_client,
            self.base_url.clone(),
            self.site.clone(),
            self.page_size,
        ))
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct OutputSettings {
    pub path: PathBuf,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    /// Rejects settings that could only fail once the request is already made.
    pub fn validate(self) -> Result<Self, String> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.api.page_size) {
            return Err(format!(
                "api.page_size={} must be between 1 and {}",
                self.api.page_size, MAX_PAGE_SIZE
            ));
        }
        if self.api.site.trim().is_empty() {
            return Err("api.site must not be empty".into());
        }
        OutputFormat::from_path(&self.output.path).map_err(|e| e.to_string())?;
        Ok(self)
    }
}

/// Reads the settings from built-in defaults, then an optional `configuration` file
/// (e.g. `configuration.yaml`) in the working directory, then `APP_*` environment
/// variables such as `APP_API__PAGE_SIZE=20`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let settings = config::Config::builder()
        .set_default("api.base_url", "https://api.stackexchange.com/2.3")?
        .set_default("api.site", "stackoverflow")?
        .set_default("api.page_size", 10)?
        .set_default("api.timeout_seconds", 30)?
        .set_default("api.user_agent", user_agent)?
        .set_default("output.path", "popular_tags.json")?
        .set_default("telemetry.level", "info")?
        .set_default("telemetry.format", "pretty")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings
        .try_deserialize::<Settings>()?
        .validate()
        .map_err(config::ConfigError::Message)
}
