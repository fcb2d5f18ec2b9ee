use thiserror::Error;

pub type Result<T> = core::result::Result<T, SHTError>;

#[derive(Error, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum SHTError {
    #[error("No device responded on the I2C bus")]
    NoDeviceFound,
    #[error("I2C bus fault: {0}")]
    BusFault(#[from] BusFault),
    #[error("Word {word} bytes [{bytes_start:#x}, {bytes_end:#x}] carried checksum {received_checksum:#x} but the calculated checksum is {calculated_checksum:#x}")]
    ChecksumError {
        word: usize,
        bytes_start: u8,
        bytes_end: u8,
        received_checksum: u8,
        calculated_checksum: u8,
    },
    #[error("No measurement has succeeded yet")]
    NoReadingYet,
}

/// What went wrong on the bus. Every bus-layer failure is reported as one of these,
/// the underlying HAL error is not carried upward.
#[derive(Error, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum BusFault {
    #[error("Write I2C Error")]
    Write,
    #[error("Read I2C Error")]
    Read,
    /// Every byte of the response was zero, the data line is stuck low or the
    /// device is gone
    #[error("Response was all zeroes")]
    StuckLine,
    #[error("Expected {expected} response bytes but got {actual}")]
    Length { expected: usize, actual: usize },
}
