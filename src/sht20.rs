use embedded_hal::delay::DelayNs;
use i2c::{BulkTransfer, Message};
use log::{debug, info, trace};

use crate::delay::wait;
use crate::protocol::{self, Command, Measurement, Mode, RawReading, Resolution, Status};
use crate::{Config, Error, Result};

/// Driver for a single SHT20 sensor. Owns the bus handle and the delay provider for its lifetime;
/// use [`Sht20::release`] to get them back.
pub struct Sht20<B, D> {
    bus: B,
    delay: D,
    config: Config,
}

impl<B: BulkTransfer, D: DelayNs> Sht20<B, D> {
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_config(bus, delay, Config::default())
    }

    pub fn with_config(bus: B, delay: D, config: Config) -> Self {
        Self { bus, delay, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Soft-resets the sensor and waits for the reset to complete. The user register returns to
    /// its default except for the heater bit.
    pub fn initialize(&mut self) -> Result<(), B::Error> {
        self.write_command(Command::SoftReset)?;
        wait(&mut self.delay, self.config.reset_delay);
        Ok(())
    }

    /// Relative humidity in percent.
    pub fn read_humidity(&mut self) -> Result<f32, B::Error> {
        self.read(Measurement::Humidity)
    }

    /// Temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f32, B::Error> {
        self.read(Measurement::Temperature)
    }

    fn read(&mut self, measurement: Measurement) -> Result<f32, B::Error> {
        let raw = self.measure(measurement, Mode::NoHold)?;
        Ok(protocol::convert(measurement, raw))
    }

    /// Runs one measurement and returns the checksum-verified value with the status bits cleared.
    pub fn measure(&mut self, measurement: Measurement, mode: Mode) -> Result<u16, B::Error> {
        let reading = self.read_raw(measurement, mode)?;
        Ok(reading.masked())
    }

    /// Triggers a measurement and reads back the unmasked result. In hold mode a single read is
    /// enough since the sensor stretches the clock until the data is ready; no-hold is polled.
    pub fn read_raw(
        &mut self,
        measurement: Measurement,
        mode: Mode,
    ) -> Result<RawReading, B::Error> {
        self.write_command(Command::trigger(measurement, mode))?;

        let mut buf = [0u8; 3];
        match mode {
            Mode::Hold => self.read_bytes(&mut buf).map_err(Error::Bus)?,
            Mode::NoHold => self.poll(&mut buf)?,
        }

        let reading = RawReading::from_bytes(buf);
        if !reading.is_valid() {
            let expected = protocol::crc8(&buf[..2]);
            debug!(
                "bad checksum for {:#06x}: expected {:#04x}, received {:#04x}",
                reading.value, expected, reading.checksum
            );
            return Err(Error::ChecksumMismatch {
                value: reading.value,
                expected,
                received: reading.checksum,
            });
        }
        Ok(reading)
    }

    /// Reads the user register and reports the battery, heater and OTP reload flags.
    pub fn query_status(&mut self) -> Result<Status, B::Error> {
        let status = Status::from_register(self.read_user_register()?);
        for (label, set) in status.lines() {
            info!("{}: {}", label, protocol::yes_no(set));
        }
        Ok(status)
    }

    pub fn read_user_register(&mut self) -> Result<u8, B::Error> {
        self.write_command(Command::ReadUserRegister)?;
        let mut buf = [0u8; 1];
        self.read_bytes(&mut buf).map_err(Error::Bus)?;
        trace!("user register = {:#04x}", buf[0]);
        Ok(buf[0])
    }

    pub fn write_user_register(&mut self, value: u8) -> Result<(), B::Error> {
        trace!("writing user register {:#04x}", value);
        self.write(&[Command::WriteUserRegister.byte(), value])
    }

    /// Changes the measurement resolution. The other user register bits are read back and written
    /// unchanged.
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), B::Error> {
        let register = self.read_user_register()?;
        self.write_user_register(protocol::apply_resolution(register, resolution))
    }

    pub fn resolution(&mut self) -> Result<Resolution, B::Error> {
        Ok(protocol::decode_resolution(self.read_user_register()?))
    }

    fn poll(&mut self, buf: &mut [u8]) -> Result<(), B::Error> {
        for attempt in 1..=self.config.max_attempts {
            wait(&mut self.delay, self.config.poll_interval);
            // the sensor doesn't acknowledge reads until the conversion is finished
            if self.read_bytes(buf).is_ok() {
                debug!("measurement ready after {} attempt(s)", attempt);
                return Ok(());
            }
        }
        debug!("no measurement after {} attempts", self.config.max_attempts);
        Err(Error::Timeout)
    }

    fn write_command(&mut self, command: Command) -> Result<(), B::Error> {
        trace!("command {:?} ({:#04x})", command, command.byte());
        self.write(&[command.byte()])
    }

    fn write(&mut self, data: &[u8]) -> Result<(), B::Error> {
        self.bus
            .i2c_transfer(&mut [Message::Write {
                address: self.config.address,
                data,
                flags: Default::default(),
            }])
            .map_err(Error::Bus)
    }

    fn read_bytes(&mut self, data: &mut [u8]) -> std::result::Result<(), B::Error> {
        self.bus.i2c_transfer(&mut [Message::Read {
            address: self.config.address,
            data,
            flags: Default::default(),
        }])
    }
}
