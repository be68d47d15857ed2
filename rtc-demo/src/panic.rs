//! Panic handler, prints where it happened and halts

use arduino_hal::prelude::_void_ResultVoidExt;
use core::panic::PanicInfo;

use crate::shared::BAUD_RATE;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    avr_device::interrupt::disable();

    // The console may be borrowed by whoever panicked, take the USART over directly
    let peripherals = unsafe { arduino_hal::Peripherals::steal() };
    let pins = arduino_hal::pins!(peripherals);
    let mut serial = arduino_hal::default_serial!(peripherals, pins, BAUD_RATE);

    ufmt::uwriteln!(&mut serial, "\r\nFirmware panic!\r").void_unwrap();
    if let Some(location) = info.location() {
        ufmt::uwriteln!(
            &mut serial,
            "  At {}:{}:{}\r",
            location.file(),
            location.line(),
            location.column()
        )
        .void_unwrap();
    }

    loop {}
}
