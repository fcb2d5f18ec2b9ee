//! One wake cycle of a sampling station: join a network, timestamp, measure,
//! upload, signal the result.
//!
//! The radio, the clock, the document store and the status LEDs are all
//! reached through the traits in [`ports`], the station only sequences them.

pub mod config;
mod cycle;
pub mod payload;
pub mod ports;

pub use config::{Credentials, DeviceIdentity, StationConfig, StoreConfig};
pub use cycle::Station;
pub use payload::{FailureReport, SampleRecord};
pub use ports::{Clock, DocumentStore, Indicator, Network, PortError, SensorReader, Signal};

use crate::error::SHTError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, StationError>;

#[derive(Error, Debug)]
pub enum StationError {
    #[error("Could not join any of the {0} configured networks")]
    NoNetwork(usize),
    #[error("Clock unavailable: {0}")]
    Clock(PortError),
    #[error("Sensor error: {0}")]
    Sensor(#[from] SHTError),
    #[error("Could not serialize the record: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Upload failed: {0}")]
    Upload(PortError),
    #[error("Document store answered with status {status}")]
    Rejected { status: u16 },
}
