/// Determines the repeatability of a single shot measurement, the higher the
/// repeatability the longer it'll take and the more accurate it will be
#[allow(dead_code)]
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Accuracy {
    High,
    Medium,
    #[default]
    Low,
}

/// Commands understood by the sensor, sent as a big endian 16 bit opcode
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Command {
    /// Single shot measurement with clock stretching enabled
    Measure(Accuracy),
    Status,
    Reset,
    ClearStatus,
    EnableHeater,
    DisableHeater,
}

impl Command {
    pub const fn opcode(self) -> u16 {
        match self {
            Command::Measure(Accuracy::High) => 0x2C06,
            Command::Measure(Accuracy::Medium) => 0x2C0D,
            Command::Measure(Accuracy::Low) => 0x2C10,
            Command::Status => 0xF32D,
            Command::Reset => 0x30A2,
            Command::ClearStatus => 0x3041,
            Command::EnableHeater => 0x306D,
            Command::DisableHeater => 0x3066,
        }
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.opcode().to_be_bytes()
    }

    /// Number of checksummed words the sensor answers with
    pub const fn response_words(self) -> usize {
        match self {
            Command::Measure(_) => 2,
            Command::Status => 1,
            Command::Reset
            | Command::ClearStatus
            | Command::EnableHeater
            | Command::DisableHeater => 0,
        }
    }
}
