//! Line input over the console

use core::str::FromStr;
use heapless::String;
use ufmt::uDisplay;

use crate::{
    console::{print, println, trace, try_read_byte},
    shared::LINE_LENGTH,
};

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

pub type Line = String<LINE_LENGTH>;

/// Read a line, echoing what was typed. `idle` runs whenever nothing is waiting.
/// Characters past the line length are dropped.
pub fn read_line_with(idle: &mut impl FnMut()) -> Line {
    let mut line = Line::new();
    loop {
        let byte = match try_read_byte() {
            Some(byte) => byte,
            None => {
                idle();
                continue;
            }
        };
        match byte {
            // The \n of a CRLF pair
            b'\n' if line.is_empty() => {}
            byte if ends_line(byte) => {
                println!();
                trace!("[TRACE] [PROMPT] Line: {}", line.as_str());
                return line;
            }
            BACKSPACE | DELETE => {
                if line.pop().is_some() {
                    print!("\x08 \x08");
                }
            }
            byte if byte.is_ascii_graphic() || byte == b' ' => {
                if line.push(byte as char).is_ok() {
                    print!("{}", byte as char);
                }
            }
            _ => {}
        }
    }
}

pub fn read_line() -> Line {
    read_line_with(&mut || {})
}

/// Re-prompt until the input parses and lies in `min..=max`
pub fn read_ranged_with<T>(min: T, max: T, idle: &mut impl FnMut()) -> T
where
    T: FromStr + PartialOrd + Copy + uDisplay,
{
    loop {
        print!("Enter your choice ({} - {}) :- ", min, max);
        match read_line_with(idle).trim().parse::<T>() {
            Ok(value) if value >= min && value <= max => return value,
            _ => println!("Invalid value, please enter a value from {} to {}", min, max),
        }
    }
}

pub fn read_ranged<T>(min: T, max: T) -> T
where
    T: FromStr + PartialOrd + Copy + uDisplay,
{
    read_ranged_with(min, max, &mut || {})
}

/// Pick one of `count` numbered options, 1 based
pub fn read_choice(count: u8) -> u8 {
    read_ranged(1, count)
}

/// Two numbered options, true for the first
pub fn read_yes_no(first: &str, second: &str) -> bool {
    println!("1. {}", first);
    println!("2. {}", second);
    read_choice(2) == 1
}

/// CR, LF or either half of CRLF
const fn ends_line(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

pub fn wait_for_enter() {
    // Leftover LF of the last CRLF
    while try_read_byte().is_some() {}
    println!("Press Enter to return to the main menu");
    while !try_read_byte().is_some_and(ends_line) {}
}
