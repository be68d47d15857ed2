//! Settings that live in Control_1 and Control_2 besides the flags

use crate::registers::{control_1, control_2, Register};

/// Internal oscillator load capacitance, the CAP_SEL bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadCapacitance {
    #[default]
    Cap7pF,
    Cap12_5pF,
}

impl LoadCapacitance {
    pub const fn bit(self) -> u8 {
        match self {
            LoadCapacitance::Cap7pF => 0,
            LoadCapacitance::Cap12_5pF => 1,
        }
    }

    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            LoadCapacitance::Cap7pF
        } else {
            LoadCapacitance::Cap12_5pF
        }
    }
}

/// CLKOUT pin frequency, the COF field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockOut {
    #[default]
    Hz32768,
    Hz16384,
    Hz8192,
    Hz4096,
    Hz2048,
    Hz1024,
    Hz1,
    /// CLKOUT held low
    Off,
}

impl ClockOut {
    pub const ALL: [ClockOut; 8] = [
        ClockOut::Hz32768,
        ClockOut::Hz16384,
        ClockOut::Hz8192,
        ClockOut::Hz4096,
        ClockOut::Hz2048,
        ClockOut::Hz1024,
        ClockOut::Hz1,
        ClockOut::Off,
    ];

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b111) as usize]
    }

    /// Output frequency in Hz, `None` when disabled
    pub const fn hertz(self) -> Option<u16> {
        match self {
            ClockOut::Off => None,
            ClockOut::Hz1 => Some(1),
            _ => Some(32768 >> self.bits()),
        }
    }
}

/// One masked register write of a configuration list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub register: Register,
    pub value: u8,
    pub mask: u8,
}

impl RegisterWrite {
    pub const fn new(register: Register, value: u8, mask: u8) -> Self {
        Self {
            register,
            value,
            mask,
        }
    }

    /// Merge into the current register value
    pub const fn apply(&self, current: u8) -> u8 {
        (current & !self.mask) | (self.value & self.mask)
    }
}

/// Power up configuration: 12 hour mode, clock running, CLKOUT off
pub const DEFAULT_CONFIG: [RegisterWrite; 3] = [
    RegisterWrite::new(
        Register::Control1,
        control_1::MODE_12_24.bits(1),
        control_1::MODE_12_24.mask,
    ),
    RegisterWrite::new(Register::Control1, control_1::STOP.bits(0), control_1::STOP.mask),
    RegisterWrite::new(
        Register::Control2,
        control_2::COF.bits(ClockOut::Off.bits()),
        control_2::COF.mask,
    ),
];
