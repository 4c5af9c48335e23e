use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "adpulse.toml",
    "config/adpulse.toml",
    "crates/config/adpulse.toml",
    "../adpulse.toml",
    "../config/adpulse.toml",
    "../crates/config/adpulse.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://adpulse.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the WebSocket hub and the dashboard refresh cadence.
///
/// ```
/// use adpulse_config::RealtimeConfig;
///
/// let realtime = RealtimeConfig::default();
/// assert_eq!(realtime.refresh_interval_seconds, 5);
/// assert_eq!(realtime.channel_capacity, 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    #[serde(default = "RealtimeConfig::default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    #[serde(default = "RealtimeConfig::default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    const fn default_refresh_interval() -> u64 {
        5
    }

    const fn default_channel_capacity() -> usize {
        100
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: Self::default_refresh_interval(),
            channel_capacity: Self::default_channel_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default = "InsightsConfig::default_placeholder_image_base_url")]
    pub placeholder_image_base_url: String,
    #[serde(default = "InsightsConfig::default_language")]
    pub default_language: String,
}

impl InsightsConfig {
    fn default_placeholder_image_base_url() -> String {
        "https://placehold.co".to_string()
    }

    fn default_language() -> String {
        "ar".to_string()
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            placeholder_image_base_url: Self::default_placeholder_image_base_url(),
            default_language: Self::default_language(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// User assumed for requests that carry no `x-user-id` header.
    #[serde(default = "AuthConfig::default_user_id")]
    pub default_user_id: i64,
}

impl AuthConfig {
    const fn default_user_id() -> i64 {
        1
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_user_id: Self::default_user_id(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use adpulse_config::load;
///
/// std::env::remove_var("ADPULSE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let refresh_interval =
        i64::try_from(defaults.realtime.refresh_interval_seconds).unwrap_or(i64::MAX);
    let channel_capacity = i64::try_from(defaults.realtime.channel_capacity).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("realtime.refresh_interval_seconds", refresh_interval)?
        .set_default("realtime.channel_capacity", channel_capacity)?
        .set_default(
            "insights.placeholder_image_base_url",
            defaults.insights.placeholder_image_base_url.clone(),
        )?
        .set_default(
            "insights.default_language",
            defaults.insights.default_language.clone(),
        )?
        .set_default("auth.default_user_id", defaults.auth.default_user_id)?;

    let environment_overrides = config::Environment::with_prefix("ADPULSE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ADPULSE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ADPULSE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.realtime.channel_capacity == 0 {
        config.realtime.channel_capacity = RealtimeConfig::default_channel_capacity();
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
