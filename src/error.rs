/// Sentinel returned in place of a reading when the sensor never answered.
pub const ERROR_I2C_TIMEOUT: u16 = 998;

/// Sentinel returned in place of a reading when the checksum did not match.
pub const ERROR_BAD_CRC: u16 = 999;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error<E> {
    #[error("i2c bus error: {0:?}")]
    Bus(E),

    #[error("no response from the sensor within the polling budget")]
    Timeout,

    #[error("checksum mismatch for {value:#06x}: expected {expected:#04x}, received {received:#04x}")]
    ChecksumMismatch { value: u16, expected: u8, received: u8 },
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;

impl<E> Error<E> {
    /// Numeric code for callers that report failures in-band. Bus failures share the timeout
    /// code since both mean the sensor could not be reached.
    pub fn code(&self) -> u16 {
        match self {
            Error::Bus(_) | Error::Timeout => ERROR_I2C_TIMEOUT,
            Error::ChecksumMismatch { .. } => ERROR_BAD_CRC,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }
}
