//! Collaborators of a sampling cycle. Implementations live with the board
//! support code, tests use fakes.

use std::time::Duration;

use embedded_hal::blocking::{delay::DelayMs, i2c};
use thiserror::Error;

use super::config::{Credentials, StoreConfig};
use crate::error::Result;
use crate::reading::Reading;
use crate::SHT30;

/// Failure reported by a port implementation, kept as text since every board
/// has its own error types
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct PortError(pub String);

impl PortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub trait SensorReader {
    /// Take a fresh measurement
    fn measure(&mut self) -> Result<Reading>;
}

impl<I2C, D> SensorReader for SHT30<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u16>,
{
    fn measure(&mut self) -> Result<Reading> {
        SHT30::measure(self)
    }
}

pub trait Network {
    fn is_connected(&mut self) -> bool;

    /// Joins `credentials` and waits at most `timeout` for the link to come up
    fn connect(&mut self, credentials: &Credentials, timeout: Duration) -> bool;
}

pub trait Clock {
    /// Current wall clock time, ISO 8601
    fn timestamp(&mut self) -> core::result::Result<String, PortError>;
}

pub trait DocumentStore {
    /// Posts a JSON document to `store`'s database, authenticating with its
    /// credentials, and returns the HTTP status code
    fn post(&mut self, store: &StoreConfig, body: &[u8]) -> core::result::Result<u16, PortError>;
}

/// What the status LEDs show
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Signal {
    Pending,
    Success,
    Failure,
    Off,
}

pub trait Indicator {
    fn show(&mut self, signal: Signal);
}
