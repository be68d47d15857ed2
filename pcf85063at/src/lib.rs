//! Driver for the NXP PCF85063AT real-time clock
//!
//! The crate is split in two halves. The codec modules ([`time`], [`alarm`],
//! [`offset`], [`timer`], [`control`]) turn values into register images and back
//! without touching the bus. [`Pcf85063at`] moves those images over a
//! [`RegisterAccess`] transport, by default an `embedded-hal` I2C bus.
//!
//! ```ignore
//! let mut rtc = Pcf85063at::new_with_i2c(i2c);
//! rtc.software_reset()?;
//! rtc.configure(&DEFAULT_CONFIG)?;
//! let now = rtc.time()?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod bcd;
pub mod control;
mod device;
pub mod error;
pub mod interface;
pub mod interrupt;
pub mod offset;
pub mod registers;
pub mod time;
pub mod timer;

pub use alarm::{AlarmEnables, AlarmField, AlarmValue};
pub use control::{ClockOut, LoadCapacitance, RegisterWrite, DEFAULT_CONFIG};
pub use device::Pcf85063at;
pub use error::{status, Error};
pub use interface::{I2cInterface, RegisterAccess, StartCondition};
pub use interrupt::{Event, Flags};
pub use offset::{OffsetMode, OffsetValue};
pub use registers::Register;
pub use time::{HourMode, Meridiem, TimeValue};
pub use timer::{TimerConfig, TimerFrequency, TimerInterruptMode};

/// 7 bit I2C address, 0xA2 write / 0xA3 read
pub const DEFAULT_ADDRESS: u8 = 0x51;
