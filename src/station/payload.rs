use serde::Serialize;

use super::config::StationConfig;
use crate::reading::Reading;

/// The document uploaded for every successful cycle
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    pub temp_f: f32,
    pub hum_rel: f32,
    pub dt: String,
    pub loc: String,
    pub device_model: String,
    pub device_id: String,
    pub device_release: String,
}

impl SampleRecord {
    pub fn new(reading: &Reading, timestamp: String, config: &StationConfig) -> Self {
        Self {
            temp_f: reading.fahrenheit(),
            hum_rel: reading.humidity_percent(),
            dt: timestamp,
            loc: config.location.clone(),
            device_model: config.device.model.clone(),
            device_id: config.device.id.clone(),
            device_release: config.device.release.clone(),
        }
    }
}

/// Uploaded instead of a record when a cycle fails
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub exc: String,
}
