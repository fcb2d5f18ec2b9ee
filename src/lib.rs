pub mod checksum;
pub mod command;
pub mod error;
pub mod reading;
pub mod scan;
pub mod station;
pub mod status;

use command::{Accuracy, Command};
use checksum::WORD_LEN;
use embedded_hal::blocking::{delay::DelayMs, i2c};
use error::{BusFault, Result, SHTError};
use reading::Reading;
use status::Status;

pub mod prelude {
    pub use super::{
        command::Accuracy, command::Command, error::BusFault, error::SHTError,
        reading::FixedPoint, reading::Reading, station::SensorReader, status::Status, DeviceAddr,
        SHT30,
    };
}

/// Time the sensor needs after power up before it takes commands
pub const SETTLE_DELAY_MS: u16 = 50;
/// Time between issuing a command and reading its response
pub const READ_DELAY_MS: u16 = 100;

const MEASUREMENT_LEN: usize = 2 * WORD_LEN;

/// The temperature and humidity sensor
#[derive(Debug)]
pub struct SHT30<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    accuracy: Accuracy,
    read_delay_ms: u16,
    last_reading: Option<Reading>,
}

/// The two addresses selectable by strapping the ADDR pin
#[allow(dead_code)]
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum DeviceAddr {
    /// ADDR pin connected to VSS
    #[default]
    AD0 = 0x44,
    /// ADDR pin connected to VDD
    AD1 = 0x45,
}

impl<I2C, D> SHT30<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u16>,
{
    /// Create a new sensor on the default address and wait for it to settle.
    /// I2C clock frequency must be at most 1000 kHz, 400 kHz is the usual choice
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_raw_address(i2c, delay, DeviceAddr::default() as u8)
    }

    /// Create a new sensor on whichever address answers a bus scan first
    pub fn discover(mut i2c: I2C, delay: D) -> Result<Self> {
        let address = scan::first_responder(&mut i2c)?;
        log::info!("Found sensor at {:#x}", address);
        Ok(Self::with_raw_address(i2c, delay, address))
    }

    fn with_raw_address(i2c: I2C, delay: D, address: u8) -> Self {
        let mut sensor = Self {
            i2c,
            delay,
            address,
            accuracy: Accuracy::default(),
            read_delay_ms: READ_DELAY_MS,
            last_reading: None,
        };
        sensor.delay.delay_ms(SETTLE_DELAY_MS);
        sensor
    }

    /// Change the sensor's I2C address
    pub fn with_address(mut self, address: DeviceAddr) -> Self {
        self.address = address as u8;
        self
    }

    /// The I2C address the sensor is talked to on
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Change the sensor's repeatability which also influences how long it takes to read
    pub fn set_accuracy(&mut self, accuracy: Accuracy) {
        self.accuracy = accuracy;
    }

    /// Change the sensor's repeatability which also influences how long it takes to read
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Sets the millisecond delay between a command and reading its response
    pub fn set_read_delay(&mut self, ms_delay: u16) {
        self.read_delay_ms = ms_delay
    }

    /// Sets the millisecond delay between a command and reading its response
    pub fn with_read_delay(mut self, ms_delay: u16) -> Self {
        self.set_read_delay(ms_delay);
        self
    }

    /// Gives back the bus and the delay
    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn i2c_write(&mut self, bytes: &[u8]) -> Result<()> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| SHTError::BusFault(BusFault::Write))
    }

    fn i2c_read(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .read(self.address, buffer)
            .map_err(|_| SHTError::BusFault(BusFault::Read))
    }

    /// Sends `command` and fills `response` with its validated answer.
    ///
    /// `response` must hold exactly three bytes per word the command answers
    /// with, so commands without an answer take an empty buffer. A buffer of
    /// any other size is rejected before anything goes on the bus. Nothing is
    /// retried.
    pub fn send_command(&mut self, command: Command, response: &mut [u8]) -> Result<()> {
        let expected = command.response_words() * WORD_LEN;
        if response.len() != expected {
            return Err(BusFault::Length {
                expected,
                actual: response.len(),
            }
            .into());
        }

        log::debug!("Sending {:?} to {:#x}", command, self.address);
        if let Err(err) = self.i2c_write(&command.to_bytes()) {
            log::warn!("{:?} could not be written: {}", command, err);
            return Err(err);
        }

        if response.is_empty() {
            return Ok(());
        }

        self.delay.delay_ms(self.read_delay_ms);

        let result = self.read_response(command, response);
        if let Err(err) = &result {
            log::warn!("{:?} response rejected: {}", command, err);
            response.fill(0);
        }
        result
    }

    fn read_response(&mut self, command: Command, response: &mut [u8]) -> Result<()> {
        self.i2c_read(response)?;
        checksum::validate_response(response, command.response_words())
    }

    fn measurement(&mut self) -> Result<[u8; MEASUREMENT_LEN]> {
        let mut buffer = [0; MEASUREMENT_LEN];
        self.send_command(Command::Measure(self.accuracy), &mut buffer)?;
        Ok(buffer)
    }

    /// Takes a measurement and keeps it as the last known reading
    pub fn measure(&mut self) -> Result<Reading> {
        let reading = Reading::from_response(self.measurement()?);
        log::debug!(
            "Measured {} C, {} %RH",
            reading.temperature,
            reading.humidity
        );
        self.last_reading = Some(reading);
        Ok(reading)
    }

    /// Takes a measurement and returns the checked bytes as they came off the
    /// bus, for diagnostics. The last known reading is left alone.
    pub fn measure_raw(&mut self) -> Result<[u8; MEASUREMENT_LEN]> {
        self.measurement()
    }

    /// Reads the status register
    pub fn read_status(&mut self) -> Result<Status> {
        let mut buffer = [0; WORD_LEN];
        self.send_command(Command::Status, &mut buffer)?;
        Ok(Status::from_response(buffer))
    }

    /// Clears the alert and reset flags of the status register
    pub fn clear_status(&mut self) -> Result<()> {
        self.send_command(Command::ClearStatus, &mut [])
    }

    /// Soft reset, the sensor reloads its calibration data
    pub fn reset(&mut self) -> Result<()> {
        self.send_command(Command::Reset, &mut [])
    }

    /// Switches the internal heater on or off
    pub fn set_heater(&mut self, enabled: bool) -> Result<()> {
        let command = if enabled {
            Command::EnableHeater
        } else {
            Command::DisableHeater
        };
        self.send_command(command, &mut [])
    }
}

impl<I2C, D> SHT30<I2C, D> {
    /// The last successful measurement
    pub fn last_reading(&self) -> Result<Reading> {
        self.last_reading.ok_or(SHTError::NoReadingYet)
    }

    pub fn temperature_celsius(&self) -> Result<f32> {
        Ok(self.last_reading()?.celsius())
    }

    pub fn temperature_fahrenheit(&self) -> Result<f32> {
        Ok(self.last_reading()?.fahrenheit())
    }

    pub fn humidity_percent(&self) -> Result<f32> {
        Ok(self.last_reading()?.humidity_percent())
    }
}
