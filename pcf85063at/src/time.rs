//! Time registers (Seconds through Years) and the 12/24 hour encoding they share
//! with the alarm registers.
//!
//! The hour register is the only field whose layout is not fixed: in 24 hour mode
//! bits 0 - 5 hold the BCD hour (0 - 23), in 12 hour mode bits 0 - 4 hold the BCD
//! hour (1 - 12) and bit 5 is the AM/PM flag. The mode bit lives in Control_1, so
//! every encode/decode takes an explicit [`HourMode`].

use crate::{
    bcd,
    error::InvalidParam,
    registers::{time, Field, TIME_LEN},
};

/// The 12_24 bit of Control_1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourMode {
    #[default]
    H24,
    H12,
}

impl HourMode {
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            HourMode::H24
        } else {
            HourMode::H12
        }
    }

    pub const fn bit(self) -> u8 {
        match self {
            HourMode::H24 => 0,
            HourMode::H12 => 1,
        }
    }
}

/// AM/PM designation, `H24` whenever the clock is in 24 hour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Meridiem {
    Am,
    Pm,
    #[default]
    H24,
}

pub const WEEKDAY_NAMES: [&str; 7] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

/// 0 is Sunday, like the chip
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(weekday as usize).copied()
}

/// A snapshot of the calendar registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeValue {
    /// 0 - 59
    pub second: u8,
    /// 0 - 59
    pub minute: u8,
    /// 0 - 23 in 24 hour mode, 1 - 12 in 12 hour mode
    pub hour: u8,
    /// 1 - 31
    pub day: u8,
    /// 0 (Sunday) - 6 (Saturday)
    pub weekday: u8,
    /// 1 - 12
    pub month: u8,
    /// 0 - 99
    pub year: u8,
    pub meridiem: Meridiem,
}

/// Value masks of the seven time registers, in register order. The Seconds mask
/// leaves the oscillator stop flag alone.
pub const TIME_FIELDS: [Field; TIME_LEN] = [
    time::SECONDS,
    time::MINUTES,
    time::HOURS_24H,
    time::DAYS,
    time::WEEKDAYS,
    time::MONTHS,
    time::YEARS,
];

pub(crate) fn check_range(value: u8, min: u8, max: u8) -> Result<u8, InvalidParam> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidParam)
    }
}

/// Encode an hour for either the Hours or the Hour_alarm register. The meridiem
/// has to agree with the mode.
pub fn encode_hour(hour: u8, meridiem: Meridiem, mode: HourMode) -> Result<u8, InvalidParam> {
    match (mode, meridiem) {
        (HourMode::H24, Meridiem::H24) => {
            Ok(time::HOURS_24H.bits(bcd::encode(check_range(hour, 0, 23)?)))
        }
        (HourMode::H12, Meridiem::Am | Meridiem::Pm) => {
            let hour = time::HOURS_12H.bits(bcd::encode(check_range(hour, 1, 12)?));
            let pm = matches!(meridiem, Meridiem::Pm) as u8;
            Ok(time::AM_PM.insert(hour, pm))
        }
        _ => Err(InvalidParam),
    }
}

pub fn decode_hour(raw: u8, mode: HourMode) -> (u8, Meridiem) {
    match mode {
        HourMode::H24 => (bcd::decode(time::HOURS_24H.extract(raw)), Meridiem::H24),
        HourMode::H12 => {
            let meridiem = if time::AM_PM.is_set(raw) {
                Meridiem::Pm
            } else {
                Meridiem::Am
            };
            (bcd::decode(time::HOURS_12H.extract(raw)), meridiem)
        }
    }
}

/// Pack a time into the seven register images, Seconds first. Only value bits are
/// set; the caller merges them into the live registers.
pub fn encode_time(value: &TimeValue, mode: HourMode) -> Result<[u8; TIME_LEN], InvalidParam> {
    Ok([
        time::SECONDS.bits(bcd::encode(check_range(value.second, 0, 59)?)),
        time::MINUTES.bits(bcd::encode(check_range(value.minute, 0, 59)?)),
        encode_hour(value.hour, value.meridiem, mode)?,
        time::DAYS.bits(bcd::encode(check_range(value.day, 1, 31)?)),
        time::WEEKDAYS.bits(check_range(value.weekday, 0, 6)?),
        time::MONTHS.bits(bcd::encode(check_range(value.month, 1, 12)?)),
        time::YEARS.bits(bcd::encode(check_range(value.year, 0, 99)?)),
    ])
}

pub fn decode_time(raw: &[u8; TIME_LEN], mode: HourMode) -> TimeValue {
    let (hour, meridiem) = decode_hour(raw[2], mode);
    TimeValue {
        second: bcd::decode(time::SECONDS.extract(raw[0])),
        minute: bcd::decode(time::MINUTES.extract(raw[1])),
        hour,
        day: bcd::decode(time::DAYS.extract(raw[3])),
        weekday: time::WEEKDAYS.extract(raw[4]),
        month: bcd::decode(time::MONTHS.extract(raw[5])),
        year: bcd::decode(time::YEARS.extract(raw[6])),
        meridiem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturday_afternoon() -> TimeValue {
        TimeValue {
            second: 0,
            minute: 30,
            hour: 14,
            day: 15,
            weekday: 6,
            month: 6,
            year: 24,
            meridiem: Meridiem::H24,
        }
    }

    #[test]
    fn encode_24h() {
        let raw = encode_time(&saturday_afternoon(), HourMode::H24).unwrap();
        assert_eq!(raw, [0x00, 0x30, 0x14, 0x15, 0x06, 0x06, 0x24]);
        assert_eq!(decode_time(&raw, HourMode::H24), saturday_afternoon());
    }

    #[test]
    fn round_trip_both_modes() {
        for hour in 0..24_u8 {
            let t = TimeValue {
                hour,
                ..saturday_afternoon()
            };
            let raw = encode_time(&t, HourMode::H24).unwrap();
            assert_eq!(decode_time(&raw, HourMode::H24), t);
        }
        for meridiem in [Meridiem::Am, Meridiem::Pm] {
            for hour in 1..=12_u8 {
                let t = TimeValue {
                    hour,
                    meridiem,
                    second: 59,
                    minute: 59,
                    day: 31,
                    weekday: 0,
                    month: 12,
                    year: 99,
                };
                let raw = encode_time(&t, HourMode::H12).unwrap();
                assert_eq!(decode_time(&raw, HourMode::H12), t);
            }
        }
    }

    #[test]
    fn meridiem_bit() {
        let pm = encode_hour(5, Meridiem::Pm, HourMode::H12).unwrap();
        assert_eq!(pm, 0b0010_0101);
        assert_eq!(decode_hour(pm, HourMode::H12), (5, Meridiem::Pm));

        let am = encode_hour(5, Meridiem::Am, HourMode::H12).unwrap();
        assert_eq!(am & 0b0010_0000, 0);
        assert_eq!(decode_hour(am, HourMode::H12), (5, Meridiem::Am));

        let twelve_pm = encode_hour(12, Meridiem::Pm, HourMode::H12).unwrap();
        assert_eq!(twelve_pm, 0b0011_0010);
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let t = TimeValue {
            hour: 25,
            ..saturday_afternoon()
        };
        assert_eq!(encode_time(&t, HourMode::H24), Err(InvalidParam));

        let t = TimeValue {
            hour: 13,
            meridiem: Meridiem::Pm,
            ..saturday_afternoon()
        };
        assert_eq!(encode_time(&t, HourMode::H12), Err(InvalidParam));

        let t = TimeValue {
            hour: 0,
            meridiem: Meridiem::Am,
            ..saturday_afternoon()
        };
        assert_eq!(encode_time(&t, HourMode::H12), Err(InvalidParam));
    }

    #[test]
    fn rejects_meridiem_that_disagrees_with_mode() {
        assert_eq!(encode_hour(5, Meridiem::Pm, HourMode::H24), Err(InvalidParam));
        assert_eq!(encode_hour(5, Meridiem::H24, HourMode::H12), Err(InvalidParam));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let base = saturday_afternoon();
        for t in [
            TimeValue { second: 60, ..base },
            TimeValue { minute: 60, ..base },
            TimeValue { day: 0, ..base },
            TimeValue { day: 32, ..base },
            TimeValue { weekday: 7, ..base },
            TimeValue { month: 0, ..base },
            TimeValue { month: 13, ..base },
            TimeValue { year: 100, ..base },
        ] {
            assert_eq!(encode_time(&t, HourMode::H24), Err(InvalidParam));
        }
    }

    #[test]
    fn decode_ignores_flag_bits() {
        // Oscillator stop flag set, 12h 11 PM
        let raw = [0x80 | 0x42, 0x07, 0x31, 0x01, 0x03, 0x02, 0x00];
        let t = decode_time(&raw, HourMode::H12);
        assert_eq!(t.second, 42);
        assert_eq!(t.hour, 11);
        assert_eq!(t.meridiem, Meridiem::Pm);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), Some("SUNDAY"));
        assert_eq!(weekday_name(6), Some("SATURDAY"));
        assert_eq!(weekday_name(7), None);
    }
}
