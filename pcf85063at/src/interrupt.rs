//! Interrupt sources reported on INTB

use crate::registers::control_2;

/// Something the chip pulled INTB low for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// AF, an alarm matched
    Alarm,
    /// TF, the countdown timer expired or a (half) minute passed
    Timer,
}

/// Pending flags as read from Control_2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub alarm: bool,
    pub timer: bool,
}

impl Flags {
    pub const fn from_control_2(raw: u8) -> Self {
        Self {
            alarm: control_2::AF.is_set(raw),
            timer: control_2::TF.is_set(raw),
        }
    }

    pub const fn any(&self) -> bool {
        self.alarm || self.timer
    }

    /// Pending events, alarm first
    pub fn events(self) -> impl Iterator<Item = Event> {
        [(self.alarm, Event::Alarm), (self.timer, Event::Timer)]
            .into_iter()
            .filter_map(|(pending, event)| pending.then_some(event))
    }

    /// Mask of the flag bits that are set
    pub const fn mask(&self) -> u8 {
        control_2::AF.bits(self.alarm as u8) | control_2::TF.bits(self.timer as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_from_control_2() {
        // AIE, AF and COF set, TF clear
        let flags = Flags::from_control_2(0b1100_0111);
        assert!(flags.alarm);
        assert!(!flags.timer);
        assert_eq!(flags.mask(), 0b0100_0000);
    }

    #[test]
    fn events_in_order() {
        let flags = Flags {
            alarm: true,
            timer: true,
        };
        let mut events = flags.events();
        assert_eq!(events.next(), Some(Event::Alarm));
        assert_eq!(events.next(), Some(Event::Timer));
        assert_eq!(events.next(), None);
        assert_eq!(Flags::default().events().count(), 0);
    }
}
