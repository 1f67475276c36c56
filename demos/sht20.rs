//! Reads ambient temperature and humidity from an SHT20 attached to an i2c-tiny-usb adapter.
//!
//! ```
//! $ cargo run --example sht20
//! End of battery: no
//! Heater enabled: no
//! Disable OTP reload: yes
//! RH = 42.30%
//!  T = 22.14°C
//! ```

use sht20::{Sht20, StdDelay};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn main() -> Result<()> {
    let bus = i2c_tiny_usb::I2c::open_single_device()?;
    let mut sensor = Sht20::new(bus, StdDelay);

    // soft reset, waits 15ms for the sensor to come back
    sensor.initialize()?;

    let status = sensor.query_status()?;
    println!("{}", status);

    let humidity = sensor.read_humidity()?;
    let temp = sensor.read_temperature()?;

    println!("RH = {:.2}%", humidity);
    println!(" T = {:.2}°C", temp);

    Ok(())
}
