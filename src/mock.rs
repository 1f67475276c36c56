//! Test doubles for the bus and delay provider. `MockBus` records every write and replays
//! scheduled read responses in order.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use i2c::{Message, ReadFlags, WriteFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Nack,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub address: u16,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
enum Response {
    Data(Transaction),
    Nack,
}

#[derive(Debug, Default)]
pub struct MockBus {
    pub writes: Vec<Transaction>,
    next_reads: VecDeque<Response>,
    pub read_attempts: usize,
    pub fail_writes: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn schedule_read(&mut self, address: u16, data: &[u8]) {
        self.next_reads.push_back(Response::Data(Transaction {
            address,
            data: data.into(),
        }));
    }

    pub fn schedule_nacks(&mut self, count: usize) {
        for _ in 0..count {
            self.next_reads.push_back(Response::Nack);
        }
    }

    /// Pops the oldest recorded write and compares it with the expected one.
    pub fn pop_write(&mut self, address: u16, data: &[u8]) -> bool {
        if self.writes.is_empty() {
            return false;
        }
        let t = self.writes.remove(0);
        t.address == address && t.data == data
    }

    pub fn has_writes(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn has_pending_reads(&self) -> bool {
        !self.next_reads.is_empty()
    }

    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), MockError> {
        self.read_attempts += 1;
        match self.next_reads.pop_front() {
            // an unscheduled read looks like a device that doesn't acknowledge
            None | Some(Response::Nack) => Err(MockError::Nack),
            Some(Response::Data(t)) => {
                if t.address != address || t.data.len() != buf.len() {
                    return Err(MockError::Io);
                }
                buf.copy_from_slice(&t.data);
                Ok(())
            }
        }
    }
}

impl i2c::Master for MockBus {
    type Error = MockError;
}

impl i2c::BulkTransfer for MockBus {
    fn i2c_transfer_support(&mut self) -> Result<(ReadFlags, WriteFlags), MockError> {
        Ok(Default::default())
    }

    fn i2c_transfer(&mut self, messages: &mut [Message]) -> Result<(), MockError> {
        for message in messages.iter_mut() {
            match message {
                Message::Read { address, data, .. } => self.read(*address, data)?,
                Message::Write { address, data, .. } => {
                    if self.fail_writes {
                        return Err(MockError::Io);
                    }
                    self.writes.push(Transaction {
                        address: *address,
                        data: data.to_vec(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct MockDelay {
    delays_ns: Vec<u64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn calls(&self) -> usize {
        self.delays_ns.len()
    }

    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.delays_ns.iter().sum())
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns.into());
    }
}
