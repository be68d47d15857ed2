//! Pin types to improve type safety

use arduino_hal::{
    hal::port,
    port::{
        mode::{Input, PullUp},
        Pin,
    },
};

pub mod rtc {
    use super::*;
    /// INTB is open drain, active low. D2 is INT0.
    pub type Intb = Pin<Input<PullUp>, port::PD2>;
}

pub mod i2c {
    use super::*;
    pub type Sda = Pin<Input<PullUp>, port::PC4>;
    pub type Scl = Pin<Input<PullUp>, port::PC5>;
}

pub struct I2cPins {
    pub sda: i2c::Sda,
    pub scl: i2c::Scl,
}
