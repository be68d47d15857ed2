//! Offset register (0x02): frequency correction
//!
//! The correction is a signed value in [-64, 63] stored as 7 bit two's complement,
//! with the correction mode in bit 7.

use crate::{error::InvalidParam, registers::offset};

pub const OFFSET_MIN: i8 = -64;
pub const OFFSET_MAX: i8 = 63;

/// How often the correction pulse is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMode {
    /// Once every two hours
    #[default]
    Normal,
    /// Every 4 minutes, larger current draw
    Course,
}

impl OffsetMode {
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            OffsetMode::Normal
        } else {
            OffsetMode::Course
        }
    }

    pub const fn bit(self) -> u8 {
        match self {
            OffsetMode::Normal => 0,
            OffsetMode::Course => 1,
        }
    }

    /// Correction per LSB in parts per billion
    pub const fn ppb_per_step(self) -> i32 {
        match self {
            OffsetMode::Normal => 4340,
            OffsetMode::Course => 4069,
        }
    }
}

/// 7 bit two's complement, bit 7 is left clear for the mode
pub fn encode_offset(value: i8) -> Result<u8, InvalidParam> {
    if !(OFFSET_MIN..=OFFSET_MAX).contains(&value) {
        return Err(InvalidParam);
    }
    Ok(offset::OFFSET.bits(value as u8))
}

/// Sign extends bit 6, the mode bit is ignored
pub const fn decode_offset(raw: u8) -> i8 {
    // shift the 7 bit value to the top so the arithmetic shift back extends the sign
    ((offset::OFFSET.extract(raw) << 1) as i8) >> 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetValue {
    pub offset: i8,
    pub mode: OffsetMode,
}

impl OffsetValue {
    /// Full register image, mode included
    pub fn to_register(self) -> Result<u8, InvalidParam> {
        Ok(offset::MODE.insert(encode_offset(self.offset)?, self.mode.bit()))
    }

    pub const fn from_register(raw: u8) -> Self {
        Self {
            offset: decode_offset(raw),
            mode: OffsetMode::from_bit(offset::MODE.extract(raw)),
        }
    }

    /// Total correction in parts per billion
    pub const fn ppb(self) -> i32 {
        self.offset as i32 * self.mode.ppb_per_step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(encode_offset(OFFSET_MAX), Ok(0x3F));
        assert_eq!(encode_offset(OFFSET_MIN), Ok(0x40));
        assert_eq!(encode_offset(-1), Ok(0x7F));
        assert_eq!(encode_offset(0), Ok(0x00));
        assert_eq!(decode_offset(0x3F), OFFSET_MAX);
        assert_eq!(decode_offset(0x40), OFFSET_MIN);
        assert_eq!(decode_offset(0x7F), -1);
    }

    #[test]
    fn every_value_survives() {
        for value in OFFSET_MIN..=OFFSET_MAX {
            assert_eq!(decode_offset(encode_offset(value).unwrap()), value);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(encode_offset(64), Err(InvalidParam));
        assert_eq!(encode_offset(-65), Err(InvalidParam));
        assert_eq!(encode_offset(i8::MIN), Err(InvalidParam));
    }

    #[test]
    fn mode_bit_does_not_leak_into_the_value() {
        let value = OffsetValue {
            offset: -3,
            mode: OffsetMode::Course,
        };
        let raw = value.to_register().unwrap();
        assert_eq!(raw, 0x80 | 0x7D);
        assert_eq!(OffsetValue::from_register(raw), value);
        assert_eq!(decode_offset(raw), -3);
    }

    #[test]
    fn correction_in_ppb() {
        let value = OffsetValue {
            offset: -2,
            mode: OffsetMode::Normal,
        };
        assert_eq!(value.ppb(), -8680);
    }
}
