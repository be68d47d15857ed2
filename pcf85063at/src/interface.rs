//! Register transport
//!
//! The driver only ever needs two primitives, a burst read and a burst write starting
//! at some register. Everything else (masked writes, flag clearing) is built on top of
//! them in [`crate::Pcf85063at`].

use embedded_hal::blocking::i2c::{Read, Write, WriteRead};
use log::trace;

use crate::registers::{Register, MAX_BURST};

/// How the register pointer write and the data read are joined on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartCondition {
    /// Write the pointer, then read after a repeated START
    #[default]
    Repeated,
    /// Write the pointer and STOP, then read in a second transaction
    StopStart,
}

/// Burst access to consecutive registers. The address auto-increments on the chip.
pub trait RegisterAccess {
    type Error;

    fn read_registers(
        &mut self,
        start: Register,
        buf: &mut [u8],
        condition: StartCondition,
    ) -> Result<(), Self::Error>;

    fn write_registers(&mut self, start: Register, data: &[u8]) -> Result<(), Self::Error>;
}

/// Transport over an `embedded-hal` blocking I2C bus
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Bus errors of the three e-h traits are expected to agree
impl<I2C, E> RegisterAccess for I2cInterface<I2C>
where
    I2C: Write<Error = E> + Read<Error = E> + WriteRead<Error = E>,
{
    type Error = E;

    fn read_registers(
        &mut self,
        start: Register,
        buf: &mut [u8],
        condition: StartCondition,
    ) -> Result<(), E> {
        let pointer = [start.addr()];
        match condition {
            StartCondition::Repeated => self.i2c.write_read(self.address, &pointer, buf)?,
            StartCondition::StopStart => {
                self.i2c.write(self.address, &pointer)?;
                self.i2c.read(self.address, buf)?;
            }
        }
        trace!("read {:?} {:02x?}", start, buf);
        Ok(())
    }

    fn write_registers(&mut self, start: Register, data: &[u8]) -> Result<(), E> {
        // Pointer byte followed by the data, in one transaction
        let mut frame = [0_u8; MAX_BURST + 1];
        let len = data.len().min(MAX_BURST);
        frame[0] = start.addr();
        frame[1..=len].copy_from_slice(&data[..len]);
        trace!("write {:?} {:02x?}", start, &data[..len]);
        self.i2c.write(self.address, &frame[..=len])
    }
}
