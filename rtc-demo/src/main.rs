#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(stmt_expr_attributes)]

use arduino_hal::{default_serial, I2c};
use pcf85063at::{Pcf85063at, DEFAULT_CONFIG};

use crate::{
    console::{debug, println, set_console},
    menu::Flow,
    shared::{Rtc, UsbSerial},
};

pub mod console;
pub mod interrupts;
mod menu;
pub mod panic;
pub mod pins;
mod prompt;
pub mod shared;

#[arduino_hal::entry]
fn main() -> ! {
    let peripherals = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(peripherals);
    let serial: UsbSerial = default_serial!(peripherals, pins, shared::BAUD_RATE);
    set_console(serial);

    println!("PCF85063AT RTC driver demo");

    // Set up pin handles
    let intb_pin: pins::rtc::Intb = pins.d2.into_pull_up_input();
    let i2c_pins = pins::I2cPins {
        sda: pins.a4.into_pull_up_input(),
        scl: pins.a5.into_pull_up_input(),
    };

    // Initialize interrupts
    interrupts::intb_init(
        &peripherals.EXINT.eicra,
        &peripherals.EXINT.eimsk,
        &intb_pin,
    );
    unsafe { avr_device::interrupt::enable() };

    debug!("[DEBUG] I2C & RTC initialization");
    let i2c = I2c::new(
        peripherals.TWI,
        i2c_pins.sda,
        i2c_pins.scl,
        shared::I2C_SPEED,
    );
    let mut rtc: Rtc = Pcf85063at::new_with_i2c(i2c);

    // Reset first so the configuration lands on known register contents
    match rtc.software_reset() {
        Ok(()) => println!("Initial software reset completed"),
        Err(e) => println!("Initial software reset failed: {}", e.describe()),
    }
    match rtc.configure(&DEFAULT_CONFIG) {
        Ok(()) => println!("Successfully applied RTC configuration"),
        Err(e) => println!("RTC configuration failed: {}", e.describe()),
    }

    // Main loop
    loop {
        menu::print_menu();
        let choice = prompt::read_ranged_with(1, menu::ITEMS.len() as u8, &mut || {
            if interrupts::intb_pending() {
                menu::report_intb(&mut rtc);
            }
        });
        if menu::run(&mut rtc, choice) == Flow::Exit {
            break;
        }
        prompt::wait_for_enter();
    }

    // Give the bus back, nothing talks to the RTC from here on
    let _i2c = rtc.release().release();
    loop {}
}
