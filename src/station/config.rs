use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings of a sampling station, usually stored as JSON on the device
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Free text location stored with every record
    pub location: String,
    /// Networks to try, in order, when the station is not connected yet
    pub networks: Vec<Credentials>,
    pub connect_timeout_ms: u64,
    /// How long the caller should sleep between cycles
    pub sleep_ms: u64,
    pub device: DeviceIdentity,
    /// Where records are uploaded to
    pub store: StoreConfig,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            location: "sauna".to_string(),
            networks: Vec::new(),
            connect_timeout_ms: 10_000,
            sleep_ms: 150_000,
            device: DeviceIdentity::default(),
            store: StoreConfig::default(),
        }
    }
}

impl StationConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn sleep_duration(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl Credentials {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
        }
    }
}

// Keeps passwords out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .finish_non_exhaustive()
    }
}

/// Document store endpoint and its basic auth credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5984".to_string(),
            database: "home-sensors".to_string(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl StoreConfig {
    /// URL documents are posted to
    pub fn database_url(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), self.database)
    }
}

// Keeps passwords out of logs
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Identifies the board that took a reading
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceIdentity {
    pub model: String,
    pub id: String,
    pub release: String,
}
