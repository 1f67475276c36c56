use std::fmt;

/// Default 7-bit bus address of the SHT20, fixed in hardware.
pub const DEFAULT_ADDRESS: u16 = 0x40;

#[allow(dead_code)]
pub(crate) mod constants {
    pub const CMD_TRIGGER_TEMP_HOLD: u8 = 0xe3;
    pub const CMD_TRIGGER_HUMIDITY_HOLD: u8 = 0xe5;
    pub const CMD_TRIGGER_TEMP_NOHOLD: u8 = 0xf3;
    pub const CMD_TRIGGER_HUMIDITY_NOHOLD: u8 = 0xf5;
    pub const CMD_WRITE_USER_REG: u8 = 0xe6;
    pub const CMD_READ_USER_REG: u8 = 0xe7;
    pub const CMD_SOFT_RESET: u8 = 0xfe;

    // user register layout
    pub const USER_REG_RESOLUTION_MASK: u8 = 0x81;
    pub const USER_REG_END_OF_BATTERY: u8 = 0x40;
    pub const USER_REG_HEATER_ENABLED: u8 = 0x04;
    pub const USER_REG_DISABLE_OTP_RELOAD: u8 = 0x02;

    // x^8 + x^5 + x^4 + 1, aligned with bit 23 of a 24-bit dividend
    pub const CRC_POLYNOMIAL: u8 = 0x31;
    pub const SHIFTED_DIVISOR: u32 = 0x988000;

    // the two least significant bits of a measurement carry status, not data
    pub const STATUS_BITS_MASK: u16 = 0xfffc;
}
use constants::*;

/// Command bytes understood by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    TriggerTempHold = CMD_TRIGGER_TEMP_HOLD,
    TriggerHumidityHold = CMD_TRIGGER_HUMIDITY_HOLD,
    TriggerTempNoHold = CMD_TRIGGER_TEMP_NOHOLD,
    TriggerHumidityNoHold = CMD_TRIGGER_HUMIDITY_NOHOLD,
    WriteUserRegister = CMD_WRITE_USER_REG,
    ReadUserRegister = CMD_READ_USER_REG,
    SoftReset = CMD_SOFT_RESET,
}

impl Command {
    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Selects the trigger command for a measurement kind and bus mode.
    pub fn trigger(measurement: Measurement, mode: Mode) -> Self {
        match (measurement, mode) {
            (Measurement::Temperature, Mode::Hold) => Command::TriggerTempHold,
            (Measurement::Humidity, Mode::Hold) => Command::TriggerHumidityHold,
            (Measurement::Temperature, Mode::NoHold) => Command::TriggerTempNoHold,
            (Measurement::Humidity, Mode::NoHold) => Command::TriggerHumidityNoHold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Temperature,
    Humidity,
}

/// Whether the sensor holds the bus (clock stretching) until the conversion is done, or releases
/// it and has to be polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Hold,
    #[default]
    NoHold,
}

/// Measurement resolution stored in bits 7 and 0 of the user register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Resolution {
    #[default]
    Rh12Temp14 = 0x00,
    Rh8Temp12 = 0x01,
    Rh10Temp13 = 0x80,
    Rh11Temp11 = 0x81,
}

impl Resolution {
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Two data bytes and the checksum exactly as received from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReading {
    pub value: u16,
    pub checksum: u8,
}

impl RawReading {
    pub fn from_bytes(buf: [u8; 3]) -> Self {
        Self {
            value: u16::from_be_bytes([buf[0], buf[1]]),
            checksum: buf[2],
        }
    }

    pub fn is_valid(&self) -> bool {
        check_crc(self.value, self.checksum)
    }

    /// Measurement data with the status bits cleared.
    pub fn masked(&self) -> u16 {
        mask_status(self.value)
    }
}

/// Device status flags reported by the user register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// Supply voltage dropped below 2.25V.
    pub end_of_battery: bool,
    pub heater_enabled: bool,
    pub otp_reload_disabled: bool,
}

impl Status {
    pub fn from_register(register: u8) -> Self {
        Self {
            end_of_battery: register & USER_REG_END_OF_BATTERY != 0,
            heater_enabled: register & USER_REG_HEATER_ENABLED != 0,
            otp_reload_disabled: register & USER_REG_DISABLE_OTP_RELOAD != 0,
        }
    }

    pub(crate) fn lines(&self) -> [(&'static str, bool); 3] {
        [
            ("End of battery", self.end_of_battery),
            ("Heater enabled", self.heater_enabled),
            ("Disable OTP reload", self.otp_reload_disabled),
        ]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, set)) in self.lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", label, yes_no(*set))?;
        }
        Ok(())
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// CRC-8 as computed by the sensor: polynomial 0x31, initial value 0, no reflection.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Checks a 16-bit value against the checksum byte sent with it. The value and checksum are
/// treated as one 24-bit dividend; it is valid iff the polynomial division leaves no remainder.
pub fn check_crc(value: u16, check: u8) -> bool {
    let mut remainder = (u32::from(value) << 8) | u32::from(check);
    let mut divisor = SHIFTED_DIVISOR;
    for i in 0..16 {
        if remainder & (1 << (23 - i)) != 0 {
            remainder ^= divisor;
        }
        divisor >>= 1;
    }
    remainder == 0
}

#[inline]
pub fn mask_status(raw: u16) -> u16 {
    raw & STATUS_BITS_MASK
}

/// Relative humidity in percent. Status bits are cleared before conversion.
pub fn humidity_from_raw(raw: u16) -> f32 {
    -6.0 + 125.0 * f32::from(mask_status(raw)) / 65536.0
}

/// Temperature in degrees Celsius. Status bits are cleared before conversion.
pub fn temperature_from_raw(raw: u16) -> f32 {
    -46.85 + 175.72 * f32::from(mask_status(raw)) / 65536.0
}

pub(crate) fn convert(measurement: Measurement, raw: u16) -> f32 {
    match measurement {
        Measurement::Temperature => temperature_from_raw(raw),
        Measurement::Humidity => humidity_from_raw(raw),
    }
}

/// Replaces the resolution bits of a user register value, leaving every other bit as it was.
pub fn apply_resolution(register: u8, resolution: Resolution) -> u8 {
    (register & !USER_REG_RESOLUTION_MASK) | (resolution.bits() & USER_REG_RESOLUTION_MASK)
}

pub fn decode_resolution(register: u8) -> Resolution {
    match register & USER_REG_RESOLUTION_MASK {
        0x00 => Resolution::Rh12Temp14,
        0x01 => Resolution::Rh8Temp12,
        0x80 => Resolution::Rh10Temp13,
        _ => Resolution::Rh11Temp11,
    }
}
