//! Global serial console
//!
//! The USART lives behind a critical section mutex so printing works from anywhere
//! without passing the serial handle around.

use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;
use embedded_hal::serial::Read;

use crate::shared::UsbSerial;

pub static CONSOLE: Mutex<RefCell<Option<UsbSerial>>> = Mutex::new(RefCell::new(None));

pub fn set_console(console: UsbSerial) {
    interrupt::free(|critical_section| {
        CONSOLE.borrow(critical_section).replace(Some(console));
    });
}

/// Next received byte, `None` if nothing is waiting. Never blocks.
pub fn try_read_byte() -> Option<u8> {
    interrupt::free(|critical_section| {
        CONSOLE
            .borrow(critical_section)
            .borrow_mut()
            .as_mut()
            .and_then(|console| match console.read() {
                Ok(byte) => Some(byte),
                Err(nb::Error::WouldBlock) => None,
                Err(nb::Error::Other(never)) => match never {},
            })
    })
}

macro_rules! print {
    ($($arg:tt)*) => {
        ::avr_device::interrupt::free(|critical_section| {
            if let Some(console) = $crate::console::CONSOLE
                .borrow(critical_section)
                .borrow_mut()
                .as_mut()
            {
                let _ = ::ufmt::uwrite!(console, $($arg)*);
            }
        })
    };
}

/// Terminals want CRLF
macro_rules! println {
    () => {
        $crate::console::print!("\r\n")
    };
    ($($arg:tt)*) => {{
        $crate::console::print!($($arg)*);
        $crate::console::print!("\r\n");
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        $crate::console::println!($($arg)*);
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        $crate::console::println!($($arg)*);
    };
}

pub(crate) use {debug, print, println, trace};
