//! PCF85063AT register map
//!
//! Every bit field is described by a [`Field`] (mask + shift) so that packing never
//! depends on struct layout. See section 8 of the NXP PCF85063AT datasheet.

/// Register addresses
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Control1 = 0x00,
    Control2 = 0x01,
    Offset = 0x02,
    RamByte = 0x03,
    Seconds = 0x04,
    Minutes = 0x05,
    Hours = 0x06,
    Days = 0x07,
    Weekdays = 0x08,
    Months = 0x09,
    Years = 0x0A,
    SecondAlarm = 0x0B,
    MinuteAlarm = 0x0C,
    HourAlarm = 0x0D,
    DayAlarm = 0x0E,
    WeekdayAlarm = 0x0F,
    TimerValue = 0x10,
    TimerMode = 0x11,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Number of time registers, `Seconds` through `Years`
pub const TIME_LEN: usize = 7;
/// Number of alarm registers, `SecondAlarm` through `WeekdayAlarm`
pub const ALARM_LEN: usize = 5;
/// Longest register burst the driver will ever issue
pub const MAX_BURST: usize = 18;

/// Value written to Control_1 to trigger a software reset
pub const SOFTWARE_RESET: u8 = 0x58;

/// A bit field inside a single register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub mask: u8,
    pub shift: u8,
}

impl Field {
    pub const fn new(mask: u8, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Position `value` inside the field, dropping bits that don't fit
    pub const fn bits(self, value: u8) -> u8 {
        (value << self.shift) & self.mask
    }

    /// Pull the field's value out of a raw register byte
    pub const fn extract(self, raw: u8) -> u8 {
        (raw & self.mask) >> self.shift
    }

    /// Replace the field inside `raw`, every bit outside the mask is kept
    pub const fn insert(self, raw: u8, value: u8) -> u8 {
        (raw & !self.mask) | self.bits(value)
    }

    pub const fn is_set(self, raw: u8) -> bool {
        raw & self.mask != 0
    }
}

/// Control_1 (0x00)
pub mod control_1 {
    use super::Field;

    pub const EXT_TEST: Field = Field::new(0b1000_0000, 7);
    /// 0 = clock runs, 1 = clock stopped
    pub const STOP: Field = Field::new(0b0010_0000, 5);
    pub const SR: Field = Field::new(0b0001_0000, 4);
    /// Correction interrupt enable
    pub const CIE: Field = Field::new(0b0000_0100, 2);
    /// 0 = 24 hour mode, 1 = 12 hour mode
    pub const MODE_12_24: Field = Field::new(0b0000_0010, 1);
    /// 0 = 7 pF, 1 = 12.5 pF
    pub const CAP_SEL: Field = Field::new(0b0000_0001, 0);
}

/// Control_2 (0x01)
pub mod control_2 {
    use super::Field;

    pub const AIE: Field = Field::new(0b1000_0000, 7);
    pub const AF: Field = Field::new(0b0100_0000, 6);
    pub const MI: Field = Field::new(0b0010_0000, 5);
    pub const HMI: Field = Field::new(0b0001_0000, 4);
    pub const TF: Field = Field::new(0b0000_1000, 3);
    pub const COF: Field = Field::new(0b0000_0111, 0);

    /// AF and TF. Writing 0 clears a flag, writing 1 leaves it as it is.
    pub const FLAGS: u8 = AF.mask | TF.mask;
}

/// Offset (0x02)
pub mod offset {
    use super::Field;

    /// 0 = normal mode, 1 = course mode
    pub const MODE: Field = Field::new(0b1000_0000, 7);
    pub const OFFSET: Field = Field::new(0b0111_1111, 0);
}

/// Seconds through Years (0x04 - 0x0A)
pub mod time {
    use super::Field;

    /// Oscillator stop flag, shares the Seconds register
    pub const OS: Field = Field::new(0b1000_0000, 7);
    pub const SECONDS: Field = Field::new(0b0111_1111, 0);
    pub const MINUTES: Field = Field::new(0b0111_1111, 0);
    /// Hours in 24 hour mode. Also the write mask of the Hours register in both modes
    pub const HOURS_24H: Field = Field::new(0b0011_1111, 0);
    pub const HOURS_12H: Field = Field::new(0b0001_1111, 0);
    /// 0 = AM, 1 = PM. Only meaningful in 12 hour mode
    pub const AM_PM: Field = Field::new(0b0010_0000, 5);
    pub const DAYS: Field = Field::new(0b0011_1111, 0);
    pub const WEEKDAYS: Field = Field::new(0b0000_0111, 0);
    pub const MONTHS: Field = Field::new(0b0001_1111, 0);
    pub const YEARS: Field = Field::new(0b1111_1111, 0);
}

/// Second_alarm through Weekday_alarm (0x0B - 0x0F)
pub mod alarm {
    use super::Field;

    /// Alarm enable, inverted: 0 = enabled, 1 = disabled
    pub const AEN: Field = Field::new(0b1000_0000, 7);
    pub const SECONDS: Field = Field::new(0b0111_1111, 0);
    pub const MINUTES: Field = Field::new(0b0111_1111, 0);
    pub const HOURS_24H: Field = Field::new(0b0011_1111, 0);
    pub const HOURS_12H: Field = Field::new(0b0001_1111, 0);
    pub const AM_PM: Field = Field::new(0b0010_0000, 5);
    pub const DAYS: Field = Field::new(0b0011_1111, 0);
    pub const WEEKDAYS: Field = Field::new(0b0000_0111, 0);
}

/// Timer_mode (0x11)
pub mod timer_mode {
    use super::Field;

    pub const TCF: Field = Field::new(0b0001_1000, 3);
    pub const TE: Field = Field::new(0b0000_0100, 2);
    pub const TIE: Field = Field::new(0b0000_0010, 1);
    /// 0 = interrupt follows the timer flag, 1 = interrupt is a pulse
    pub const TI_TP: Field = Field::new(0b0000_0001, 0);
}
