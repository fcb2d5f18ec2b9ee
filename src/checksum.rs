use crc::{Algorithm, Crc};

use crate::error::{BusFault, Result, SHTError};

/// CRC-8 from the SHT3x datasheet: x^8 + x^5 + x^4 + 1, MSB first, no reflection.
const CRC_ALGORITHM: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_ALGORITHM);

/// Bytes per data word on the wire: high byte, low byte, checksum
pub const WORD_LEN: usize = 3;

/// Checksum of the two data bytes of a word
pub fn crc8(data: [u8; 2]) -> u8 {
    CRC.checksum(&data)
}

/// Checks a response of `words` data words.
///
/// The length guard comes first, then the all-zero guard, then the checksum of
/// every word. An all-zero block is reported as a bus fault even though its
/// checksums are wrong too, since it means the line is wedged and not that the
/// data got corrupted.
pub fn validate_response(response: &[u8], words: usize) -> Result<()> {
    let expected = words * WORD_LEN;
    if response.len() != expected {
        return Err(BusFault::Length {
            expected,
            actual: response.len(),
        }
        .into());
    }

    if !response.is_empty() && response.iter().all(|&byte| byte == 0) {
        return Err(BusFault::StuckLine.into());
    }

    for (word, group) in response.chunks_exact(WORD_LEN).enumerate() {
        let calculated = crc8([group[0], group[1]]);
        if calculated != group[2] {
            return Err(SHTError::ChecksumError {
                word,
                bytes_start: group[0],
                bytes_end: group[1],
                received_checksum: group[2],
                calculated_checksum: calculated,
            });
        }
    }

    Ok(())
}
