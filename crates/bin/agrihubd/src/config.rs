//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `agrihub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use agrihub_adapter_mqtt::MqttConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WebSocket/HTTP server settings.
    pub server: ServerConfig,
    /// MQTT transport settings.
    pub mqtt: MqttSection,
    /// Synthetic-fleet settings, used when MQTT is disabled or unreachable.
    pub simulator: SimulatorConfig,
    /// Pipeline timing settings.
    pub pipeline: PipelineConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// MQTT transport section: a toggle plus the adapter's connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MqttSection {
    /// Try the live broker first. Defaults to on; a failed connect still
    /// falls back to the simulator.
    pub enabled: bool,
    #[serde(flatten)]
    pub connection: MqttConfig,
}

impl Default for MqttSection {
    fn default() -> Self {
        Self {
            enabled: true,
            connection: MqttConfig::default(),
        }
    }
}

/// Synthetic sensor fleet configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seconds between simulated readings per sensor.
    pub tick_secs: u64,
}

/// Pipeline timing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seconds between rule/threshold snapshot reloads.
    pub reload_interval_secs: u64,
    /// Alarm deduplication window in seconds.
    pub dedup_window_secs: i64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `agrihub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("agrihub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    // Takes the variable lookup as a closure so tests don't touch the
    // process-global environment.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AGRIHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("AGRIHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("AGRIHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("AGRIHUB_MQTT_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.mqtt.enabled = enabled;
            }
        }
        if let Some(val) = var("AGRIHUB_MQTT_HOST") {
            self.mqtt.connection.broker_host = val;
        }
        if let Some(val) = var("AGRIHUB_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.connection.broker_port = port;
            }
        }
        if let Some(val) = var("AGRIHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.simulator.tick_secs == 0 {
            return Err(ConfigError::Validation(
                "simulator tick must be non-zero".to_string(),
            ));
        }
        if self.pipeline.reload_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "reload interval must be non-zero".to_string(),
            ));
        }
        if self.pipeline.dedup_window_secs < 0 {
            return Err(ConfigError::Validation(
                "dedup window must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self { tick_secs: 30 }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reload_interval_secs: 300,
            dedup_window_secs: 3600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "agrihubd=info,agrihub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
