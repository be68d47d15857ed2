//! Countdown timer (Timer_value 0x10, Timer_mode 0x11)

use crate::{error::InvalidParam, registers::timer_mode};

/// Source clock of the countdown timer, the TCF field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerFrequency {
    /// 4.096 kHz, 244 us - 62.256 ms
    Hz4096,
    /// 64 Hz, 15.625 ms - 3.984 s
    Hz64,
    /// 1 Hz, 1 s - 255 s
    Hz1,
    /// 1/60 Hz, 60 s - 4 h 15 min. Reset value
    #[default]
    Hz1_60,
}

impl TimerFrequency {
    pub const ALL: [TimerFrequency; 4] = [
        TimerFrequency::Hz4096,
        TimerFrequency::Hz64,
        TimerFrequency::Hz1,
        TimerFrequency::Hz1_60,
    ];

    pub const fn bits(self) -> u8 {
        match self {
            TimerFrequency::Hz4096 => 0b00,
            TimerFrequency::Hz64 => 0b01,
            TimerFrequency::Hz1 => 0b10,
            TimerFrequency::Hz1_60 => 0b11,
        }
    }

    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => TimerFrequency::Hz4096,
            0b01 => TimerFrequency::Hz64,
            0b10 => TimerFrequency::Hz1,
            _ => TimerFrequency::Hz1_60,
        }
    }

    /// Ticks per minute, which keeps 1/60 Hz an integer
    pub const fn ticks_per_minute(self) -> u32 {
        match self {
            TimerFrequency::Hz4096 => 4096 * 60,
            TimerFrequency::Hz64 => 64 * 60,
            TimerFrequency::Hz1 => 60,
            TimerFrequency::Hz1_60 => 1,
        }
    }

    /// Countdown value that gives `millis` at this frequency, rounded down.
    /// Durations that round to 0 ticks or need more than 255 are rejected.
    pub fn countdown_for_millis(self, millis: u32) -> Result<u8, InvalidParam> {
        let ticks = millis as u64 * self.ticks_per_minute() as u64 / 60_000;
        match u8::try_from(ticks) {
            Ok(0) | Err(_) => Err(InvalidParam),
            Ok(ticks) => Ok(ticks),
        }
    }

    /// Length of `countdown` ticks in milliseconds, rounded down
    pub const fn duration_millis(self, countdown: u8) -> u32 {
        (countdown as u64 * 60_000 / self.ticks_per_minute() as u64) as u32
    }

    /// Shortest duration [`Self::countdown_for_millis`] accepts
    pub const fn min_millis(self) -> u32 {
        let per_minute = self.ticks_per_minute();
        (60_000 + per_minute - 1) / per_minute
    }

    pub const fn max_millis(self) -> u32 {
        self.duration_millis(u8::MAX)
    }
}

/// The TI_TP bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerInterruptMode {
    /// INT follows the timer flag
    #[default]
    FollowFlag,
    /// INT generates a pulse
    Pulse,
}

impl TimerInterruptMode {
    pub const fn bit(self) -> u8 {
        match self {
            TimerInterruptMode::FollowFlag => 0,
            TimerInterruptMode::Pulse => 1,
        }
    }

    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            TimerInterruptMode::FollowFlag
        } else {
            TimerInterruptMode::Pulse
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerConfig {
    pub frequency: TimerFrequency,
    pub countdown: u8,
    pub interrupt_mode: TimerInterruptMode,
    pub interrupt_enabled: bool,
    pub enabled: bool,
}

impl TimerConfig {
    /// Timer_mode image. Bits 7:5 are unused and stay clear.
    pub const fn mode_bits(&self) -> u8 {
        timer_mode::TCF.bits(self.frequency.bits())
            | timer_mode::TE.bits(self.enabled as u8)
            | timer_mode::TIE.bits(self.interrupt_enabled as u8)
            | timer_mode::TI_TP.bits(self.interrupt_mode.bit())
    }

    pub const fn from_registers(value: u8, mode: u8) -> Self {
        Self {
            frequency: TimerFrequency::from_bits(timer_mode::TCF.extract(mode)),
            countdown: value,
            interrupt_mode: TimerInterruptMode::from_bit(timer_mode::TI_TP.extract(mode)),
            interrupt_enabled: timer_mode::TIE.is_set(mode),
            enabled: timer_mode::TE.is_set(mode),
        }
    }

    pub const fn duration_millis(&self) -> u32 {
        self.frequency.duration_millis(self.countdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_bits() {
        for frequency in TimerFrequency::ALL {
            assert_eq!(TimerFrequency::from_bits(frequency.bits()), frequency);
        }
        assert_eq!(TimerFrequency::Hz1.bits(), 0b10);
    }

    #[test]
    fn countdown_from_duration() {
        assert_eq!(TimerFrequency::Hz1.countdown_for_millis(10_000), Ok(10));
        assert_eq!(TimerFrequency::Hz64.countdown_for_millis(1_000), Ok(64));
        assert_eq!(TimerFrequency::Hz4096.countdown_for_millis(62), Ok(253));
        assert_eq!(TimerFrequency::Hz1_60.countdown_for_millis(15_300_000), Ok(255));
    }

    #[test]
    fn countdown_out_of_range() {
        assert_eq!(TimerFrequency::Hz1.countdown_for_millis(999), Err(InvalidParam));
        assert_eq!(TimerFrequency::Hz1.countdown_for_millis(256_000), Err(InvalidParam));
        assert_eq!(TimerFrequency::Hz1_60.countdown_for_millis(59_999), Err(InvalidParam));
    }

    #[test]
    fn duration_of_countdown() {
        assert_eq!(TimerFrequency::Hz1.duration_millis(255), 255_000);
        assert_eq!(TimerFrequency::Hz64.duration_millis(1), 15);
        assert_eq!(TimerFrequency::Hz1_60.max_millis(), 15_300_000);
        assert_eq!(TimerFrequency::Hz4096.min_millis(), 1);
    }

    #[test]
    fn accepted_range() {
        for frequency in TimerFrequency::ALL {
            assert!(frequency.countdown_for_millis(frequency.min_millis()).is_ok());
            assert!(frequency
                .countdown_for_millis(frequency.min_millis() - 1)
                .is_err());
            assert!(frequency.countdown_for_millis(frequency.max_millis()).is_ok());
        }
        assert_eq!(TimerFrequency::Hz64.min_millis(), 16);
    }

    #[test]
    fn mode_register_image() {
        let config = TimerConfig {
            frequency: TimerFrequency::Hz1,
            countdown: 30,
            interrupt_mode: TimerInterruptMode::Pulse,
            interrupt_enabled: true,
            enabled: true,
        };
        assert_eq!(config.mode_bits(), 0b0001_0111);
        assert_eq!(TimerConfig::from_registers(30, 0b0001_0111), config);
        assert_eq!(config.duration_millis(), 30_000);
    }

    #[test]
    fn reset_state() {
        // Timer_mode resets to 0x18: 1/60 Hz, everything off
        assert_eq!(TimerConfig::from_registers(0, 0x18), TimerConfig::default());
    }
}
