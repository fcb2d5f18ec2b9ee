use std::fmt;

// 2**16 - 1
const CONVERSION_DENOM: u32 = 65535;

// Constants used to convert temperature values
const CELSIUS_PAIR: (i16, u32) = (45, 175);
const HUMIDITY_SCALE: u32 = 100;

/// A value kept as an integer part and two decimal digits, e.g. 24.05 is `(24, 5)`.
///
/// The value is always `integer + hundredths / 100`, so `(-43, 67)` stands for -42.33.
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct FixedPoint {
    integer: i16,
    hundredths: u8,
}

impl FixedPoint {
    /// `hundredths` must be below 100
    pub const fn new(integer: i16, hundredths: u8) -> Self {
        debug_assert!(hundredths < 100);
        Self {
            integer,
            hundredths,
        }
    }

    pub const fn integer(&self) -> i16 {
        self.integer
    }

    pub const fn hundredths(&self) -> u8 {
        self.hundredths
    }

    /// The whole value as one signed count of hundredths, -42.33 is -4233
    pub const fn as_hundredths(&self) -> i32 {
        self.integer as i32 * 100 + self.hundredths as i32
    }

    pub fn as_f32(&self) -> f32 {
        self.as_hundredths() as f32 / 100f32
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.as_hundredths();
        let sign = if value < 0 { "-" } else { "" };
        let abs = value.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Represents a decoded measurement, temperature in Celsius and relative humidity in percent
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reading {
    pub temperature: FixedPoint,
    pub humidity: FixedPoint,
}

impl Reading {
    /// Decodes a validated 6 byte measurement response. Checksums are not looked at.
    pub fn from_response(buffer: [u8; 6]) -> Self {
        let raw_temp = u16::from_be_bytes([buffer[0], buffer[1]]);
        let raw_humidity = u16::from_be_bytes([buffer[3], buffer[4]]);

        Self {
            temperature: decode_temperature(raw_temp),
            humidity: decode_humidity(raw_humidity),
        }
    }

    pub fn celsius(&self) -> f32 {
        self.temperature.as_f32()
    }

    pub fn fahrenheit(&self) -> f32 {
        celsius_to_fahrenheit(self.celsius())
    }

    pub fn humidity_percent(&self) -> f32 {
        self.humidity.as_f32()
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32f32
}

/// Splits `aux / 65535` into its floored integer part and floored hundredths
fn split(aux: u32) -> (u32, u8) {
    let integer = aux / CONVERSION_DENOM;
    let hundredths = (aux % CONVERSION_DENOM) * 100 / CONVERSION_DENOM;
    (integer, hundredths as u8)
}

pub(crate) fn decode_temperature(raw: u16) -> FixedPoint {
    let (sub, mul) = CELSIUS_PAIR;
    let (integer, hundredths) = split(raw as u32 * mul);
    FixedPoint::new(integer as i16 - sub, hundredths)
}

pub(crate) fn decode_humidity(raw: u16) -> FixedPoint {
    let (integer, hundredths) = split(raw as u32 * HUMIDITY_SCALE);
    FixedPoint::new(integer as i16, hundredths)
}
