/// The sensor's 16 bit status register, see table 17 of the SHT3x datasheet
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Status(pub u16);

const ALERT_PENDING: u16 = 1 << 15;
const HEATER_ON: u16 = 1 << 13;
const HUMIDITY_ALERT: u16 = 1 << 11;
const TEMPERATURE_ALERT: u16 = 1 << 10;
const RESET_DETECTED: u16 = 1 << 4;
const COMMAND_FAILED: u16 = 1 << 1;
const WRITE_CHECKSUM_FAILED: u16 = 1;

impl Status {
    pub fn from_response(buffer: [u8; 3]) -> Self {
        Status(u16::from_be_bytes([buffer[0], buffer[1]]))
    }

    /// At least one alert is pending
    pub fn alert_pending(self) -> bool {
        self.0 & ALERT_PENDING != 0
    }

    pub fn heater_on(self) -> bool {
        self.0 & HEATER_ON != 0
    }

    pub fn humidity_alert(self) -> bool {
        self.0 & HUMIDITY_ALERT != 0
    }

    pub fn temperature_alert(self) -> bool {
        self.0 & TEMPERATURE_ALERT != 0
    }

    /// A hard reset, soft reset or power cycle happened since the last clear
    pub fn reset_detected(self) -> bool {
        self.0 & RESET_DETECTED != 0
    }

    /// The last command was not processed, either invalid or its checksum failed
    pub fn command_failed(self) -> bool {
        self.0 & COMMAND_FAILED != 0
    }

    pub fn write_checksum_failed(self) -> bool {
        self.0 & WRITE_CHECKSUM_FAILED != 0
    }
}
