//! Alarm registers (Second_alarm through Weekday_alarm)
//!
//! Each register carries a BCD value and an enable bit in bit 7 with inverted
//! polarity: a cleared bit means the field takes part in the alarm match.

use crate::{
    bcd,
    error::InvalidParam,
    registers::{alarm, Field, Register, ALARM_LEN},
    time::{check_range, decode_hour, encode_hour, HourMode, Meridiem},
};

/// One of the five alarm registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmField {
    Second,
    Minute,
    Hour,
    Day,
    Weekday,
}

impl AlarmField {
    pub const ALL: [AlarmField; ALARM_LEN] = [
        AlarmField::Second,
        AlarmField::Minute,
        AlarmField::Hour,
        AlarmField::Day,
        AlarmField::Weekday,
    ];

    pub const fn register(self) -> Register {
        match self {
            AlarmField::Second => Register::SecondAlarm,
            AlarmField::Minute => Register::MinuteAlarm,
            AlarmField::Hour => Register::HourAlarm,
            AlarmField::Day => Register::DayAlarm,
            AlarmField::Weekday => Register::WeekdayAlarm,
        }
    }

    /// Offset from `Second_alarm`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value bits of the register. For the hour this is the 24 hour mask, which also
    /// covers the AM/PM bit.
    pub const fn value_field(self) -> Field {
        match self {
            AlarmField::Second => alarm::SECONDS,
            AlarmField::Minute => alarm::MINUTES,
            AlarmField::Hour => alarm::HOURS_24H,
            AlarmField::Day => alarm::DAYS,
            AlarmField::Weekday => alarm::WEEKDAYS,
        }
    }
}

/// Which alarm fields take part in the match. Everything starts disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmEnables {
    pub second: bool,
    pub minute: bool,
    pub hour: bool,
    pub day: bool,
    pub weekday: bool,
}

impl AlarmEnables {
    pub const fn get(&self, field: AlarmField) -> bool {
        match field {
            AlarmField::Second => self.second,
            AlarmField::Minute => self.minute,
            AlarmField::Hour => self.hour,
            AlarmField::Day => self.day,
            AlarmField::Weekday => self.weekday,
        }
    }

    pub fn set(&mut self, field: AlarmField, enabled: bool) {
        match field {
            AlarmField::Second => self.second = enabled,
            AlarmField::Minute => self.minute = enabled,
            AlarmField::Hour => self.hour = enabled,
            AlarmField::Day => self.day = enabled,
            AlarmField::Weekday => self.weekday = enabled,
        }
    }

    pub fn any(&self) -> bool {
        AlarmField::ALL.iter().any(|field| self.get(*field))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmValue {
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
    pub meridiem: Meridiem,
    pub enabled: AlarmEnables,
}

/// Put the enable bit on top of an already packed value
pub const fn encode_enable(value_bits: u8, enabled: bool) -> u8 {
    // AEN is active low
    alarm::AEN.insert(value_bits, !enabled as u8)
}

pub const fn decode_enable(raw: u8) -> bool {
    !alarm::AEN.is_set(raw)
}

/// Pack a single, non-hour alarm field. The hour needs a mode and meridiem, use
/// [`encode_alarm_hour`] for it.
pub fn encode_alarm_field(field: AlarmField, value: u8, enabled: bool) -> Result<u8, InvalidParam> {
    let (min, max) = match field {
        AlarmField::Second | AlarmField::Minute => (0, 59),
        AlarmField::Day => (1, 31),
        AlarmField::Weekday => (0, 6),
        AlarmField::Hour => return Err(InvalidParam),
    };
    let value = check_range(value, min, max)?;
    let bits = match field {
        AlarmField::Weekday => alarm::WEEKDAYS.bits(value),
        _ => field.value_field().bits(bcd::encode(value)),
    };
    Ok(encode_enable(bits, enabled))
}

/// Unpack a single, non-hour alarm field into its value and enable flag. The hour
/// is rejected, see [`decode_alarm_hour`].
pub fn decode_alarm_field(field: AlarmField, raw: u8) -> Result<(u8, bool), InvalidParam> {
    match field {
        AlarmField::Hour => Err(InvalidParam),
        _ => Ok((field_value(field, raw), decode_enable(raw))),
    }
}

fn field_value(field: AlarmField, raw: u8) -> u8 {
    match field {
        AlarmField::Weekday => alarm::WEEKDAYS.extract(raw),
        _ => bcd::decode(field.value_field().extract(raw)),
    }
}

/// Pack the Hour_alarm register for the given mode
pub fn encode_alarm_hour(
    hour: u8,
    meridiem: Meridiem,
    mode: HourMode,
    enabled: bool,
) -> Result<u8, InvalidParam> {
    Ok(encode_enable(encode_hour(hour, meridiem, mode)?, enabled))
}

/// Unpack the Hour_alarm register into hour, meridiem and enable flag
pub fn decode_alarm_hour(raw: u8, mode: HourMode) -> (u8, Meridiem, bool) {
    let (hour, meridiem) = decode_hour(raw, mode);
    (hour, meridiem, decode_enable(raw))
}

/// Pack the five alarm registers, Second_alarm first, enable bits included
pub fn encode_alarm(value: &AlarmValue, mode: HourMode) -> Result<[u8; ALARM_LEN], InvalidParam> {
    let enabled = &value.enabled;
    Ok([
        encode_alarm_field(AlarmField::Second, value.second, enabled.second)?,
        encode_alarm_field(AlarmField::Minute, value.minute, enabled.minute)?,
        encode_alarm_hour(value.hour, value.meridiem, mode, enabled.hour)?,
        encode_alarm_field(AlarmField::Day, value.day, enabled.day)?,
        encode_alarm_field(AlarmField::Weekday, value.weekday, enabled.weekday)?,
    ])
}

pub fn decode_alarm(raw: &[u8; ALARM_LEN], mode: HourMode) -> AlarmValue {
    let plain = |field: AlarmField| {
        let bits = raw[field.index()];
        (field_value(field, bits), decode_enable(bits))
    };
    let (second, second_enabled) = plain(AlarmField::Second);
    let (minute, minute_enabled) = plain(AlarmField::Minute);
    let (hour, meridiem, hour_enabled) = decode_alarm_hour(raw[AlarmField::Hour.index()], mode);
    let (day, day_enabled) = plain(AlarmField::Day);
    let (weekday, weekday_enabled) = plain(AlarmField::Weekday);
    AlarmValue {
        second,
        minute,
        hour,
        day,
        weekday,
        meridiem,
        enabled: AlarmEnables {
            second: second_enabled,
            minute: minute_enabled,
            hour: hour_enabled,
            day: day_enabled,
            weekday: weekday_enabled,
        },
    }
}
