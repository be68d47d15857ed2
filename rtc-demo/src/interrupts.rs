//! Interrupts

use avr_device::{
    atmega328p::exint::{eicra::EICRA_SPEC, eimsk::EIMSK_SPEC},
    generic::Reg,
    interrupt,
};
use core::sync::atomic::{AtomicBool, Ordering::SeqCst};

use crate::pins;

pub use intb::{intb_init, intb_pending};

/// The RTC's INTB line on external interrupt 0
mod intb {
    use super::*;

    /// Set on every falling edge of INTB. The registers are read by the main loop,
    /// never from the interrupt.
    static INTB_FIRED: AtomicBool = AtomicBool::new(false);

    /// Taking the pin makes sure INTB really is wired to INT0
    pub fn intb_init(eicra: &Reg<EICRA_SPEC>, eimsk: &Reg<EIMSK_SPEC>, _intb: &pins::rtc::Intb) {
        // Falling edge
        eicra.modify(|_, w| w.isc0().bits(0x02));
        eimsk.modify(|_, w| w.int0().set_bit());
    }

    #[avr_device::interrupt(atmega328p)]
    #[allow(non_snake_case)]
    fn INT0() {
        INTB_FIRED.store(true, SeqCst);
    }

    /// Whether INTB fell since the last call
    pub fn intb_pending() -> bool {
        // No compare and exchanges :(
        interrupt::free(|_critical_section| {
            if INTB_FIRED.load(SeqCst) {
                INTB_FIRED.store(false, SeqCst);
                true
            } else {
                false
            }
        })
    }
}
