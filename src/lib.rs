//! Driver for the Sensirion SHT20 humidity and temperature sensor.
//!
//! The driver talks to the sensor through any bus implementing [`i2c::BulkTransfer`] and waits
//! using an [`embedded_hal::delay::DelayNs`] provider, e.g. [`StdDelay`].
//!
//! ```ignore
//! let mut sht = sht20::Sht20::new(bus, sht20::StdDelay);
//! sht.initialize()?;
//! println!("RH = {:.1}%", sht.read_humidity()?);
//! println!(" T = {:.1}°C", sht.read_temperature()?);
//! ```

mod config;
mod delay;
mod error;
mod protocol;
mod sht20;

#[cfg(test)]
mod mock;

pub use config::*;
pub use delay::StdDelay;
pub use error::*;
pub use protocol::{
    apply_resolution, check_crc, crc8, decode_resolution, humidity_from_raw, mask_status,
    temperature_from_raw, Command, Measurement, Mode, RawReading, Resolution, Status,
    DEFAULT_ADDRESS,
};
pub use sht20::Sht20;
pub use embedded_hal;
pub use i2c;
