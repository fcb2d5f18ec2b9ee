use std::ops::RangeInclusive;

use embedded_hal::blocking::i2c;

use crate::error::{Result, SHTError};

/// 7 bit addresses outside the ranges reserved by the I2C specification
pub const SCAN_RANGE: RangeInclusive<u8> = 0x08..=0x77;

/// Probes every address in [`SCAN_RANGE`] with an empty write and returns the
/// ones that acknowledged, lowest first
pub fn scan<I2C>(i2c: &mut I2C) -> Vec<u8>
where
    I2C: i2c::Write,
{
    let responders: Vec<u8> = SCAN_RANGE
        .filter(|&address| i2c.write(address, &[]).is_ok())
        .collect();
    log::debug!("I2C scan found {:x?}", responders);
    responders
}

/// The lowest address that answers a scan
pub fn first_responder<I2C>(i2c: &mut I2C) -> Result<u8>
where
    I2C: i2c::Write,
{
    let responders = scan(i2c);
    match responders.split_first() {
        Some((&address, [])) => Ok(address),
        Some((&address, others)) => {
            log::warn!(
                "Several devices answered, using {:#x} and ignoring {:x?}",
                address,
                others
            );
            Ok(address)
        }
        None => Err(SHTError::NoDeviceFound),
    }
}
