//! The main menu and everything behind it

use pcf85063at::{
    time::weekday_name, AlarmField, AlarmValue, Error, Event, Flags, HourMode, Meridiem,
    OffsetMode, TimeValue, TimerFrequency, TimerInterruptMode,
};
use ufmt::{uDisplay, uWrite, Formatter};

use crate::{
    console::{debug, print, println},
    prompt::{read_choice, read_ranged, read_yes_no},
    shared::Rtc,
};

pub const ITEMS: [&str; 15] = [
    "RTC Start",
    "RTC Stop",
    "Get Time and Date",
    "Set Time and Date",
    "Software Reset",
    "Minutes Interrupt",
    "Half Minute Interrupt",
    "Get Alarm Time",
    "Set Alarm Time",
    "Alarm Interrupt",
    "Timer configuration",
    "Correction Interrupt",
    "Set Offset/Correction Mode",
    "Clear Interrupts",
    "Exit",
];

#[derive(PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Zero padded to two digits
struct TwoDigits(u8);

impl uDisplay for TwoDigits {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        if self.0 < 10 {
            f.write_str("0")?;
        }
        uDisplay::fmt(&self.0, f)
    }
}

/// Print what failed, hand back the value otherwise
fn report<T, E>(result: Result<T, Error<E>>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            println!("{} failed: {} (status {})", what, e.describe(), e.code());
            None
        }
    }
}

/// Print `done` on success
fn confirm<E>(result: Result<(), Error<E>>, what: &str, done: &str) {
    if report(result, what).is_some() {
        println!("{}", done);
    }
}

pub fn print_menu() {
    println!();
    println!("*********** Main Menu ***************");
    for (number, item) in ITEMS.iter().enumerate() {
        println!("{}. {}", number + 1, *item);
    }
    println!();
}

pub fn run(rtc: &mut Rtc, choice: u8) -> Flow {
    debug!("[DEBUG] [MENU] Choice {}", choice);
    match choice {
        1 => confirm(rtc.start(), "RTC start", "RTC started"),
        2 => confirm(rtc.stop(), "RTC stop", "RTC stopped"),
        3 => get_time(rtc),
        4 => set_time(rtc),
        5 => confirm(rtc.software_reset(), "Software reset", "Software reset done"),
        6 => {
            let enable = read_yes_no("Enable Minutes Interrupt", "Disable Minutes Interrupt");
            confirm(
                rtc.set_minute_interrupt(enable),
                "Minutes interrupt",
                if enable { "Minutes interrupt enabled" } else { "Minutes interrupt disabled" },
            );
        }
        7 => {
            let enable = read_yes_no("Enable Half Minute Interrupt", "Disable Half Minute Interrupt");
            confirm(
                rtc.set_half_minute_interrupt(enable),
                "Half minute interrupt",
                if enable {
                    "Half minute interrupt enabled"
                } else {
                    "Half minute interrupt disabled"
                },
            );
        }
        8 => get_alarm(rtc),
        9 => set_alarm(rtc),
        10 => alarm_interrupt(rtc),
        11 => timer_configuration(rtc),
        12 => {
            let enable = read_yes_no("Enable Correction Interrupt", "Disable Correction Interrupt");
            confirm(
                rtc.set_correction_interrupt(enable),
                "Correction interrupt",
                if enable {
                    "Correction interrupt enabled, corrected pulses appear on INTB"
                } else {
                    "Correction interrupt disabled"
                },
            );
        }
        13 => set_offset(rtc),
        14 => clear_interrupts(rtc),
        _ => {
            println!(".....Bye");
            rtc.deinit();
            return Flow::Exit;
        }
    }
    Flow::Continue
}

fn print_clock(hour: u8, minute: u8, second: u8, meridiem: Meridiem) {
    print!(
        "TIME :- {}:{}:{}",
        TwoDigits(hour),
        TwoDigits(minute),
        TwoDigits(second)
    );
    match meridiem {
        Meridiem::Am => println!(" AM"),
        Meridiem::Pm => println!(" PM"),
        Meridiem::H24 => println!(" 24H Mode"),
    }
}

fn print_weekday(weekday: u8) {
    match weekday_name(weekday) {
        Some(name) => println!("{}", name),
        None => println!("Unknown weekday {}", weekday),
    }
}

fn get_time(rtc: &mut Rtc) {
    let time = match report(rtc.time(), "Get time") {
        Some(time) => time,
        None => return,
    };
    print_clock(time.hour, time.minute, time.second, time.meridiem);
    println!(
        "DATE [DD/MM/YY]:- {}/{}/{}",
        TwoDigits(time.day),
        TwoDigits(time.month),
        TwoDigits(time.year)
    );
    print_weekday(time.weekday);
    if let Some(true) = report(rtc.oscillator_stopped(), "Oscillator check") {
        println!("Oscillator was stopped, set the time to clear the flag");
    }
}

fn read_hour(mode: HourMode) -> (u8, Meridiem) {
    match mode {
        HourMode::H24 => {
            println!("Hour (0 - 23)");
            (read_ranged(0, 23), Meridiem::H24)
        }
        HourMode::H12 => {
            println!("Hour (1 - 12)");
            let hour = read_ranged(1, 12);
            let meridiem = if read_yes_no("AM", "PM") {
                Meridiem::Am
            } else {
                Meridiem::Pm
            };
            (hour, meridiem)
        }
    }
}

fn read_weekday() -> u8 {
    println!("Weekday");
    for (number, name) in pcf85063at::time::WEEKDAY_NAMES.iter().enumerate() {
        println!("{}. {}", number, *name);
    }
    read_ranged(0, 6)
}

fn set_time(rtc: &mut Rtc) {
    println!("Choose the clock format");
    let mode = if read_yes_no("12 hour", "24 hour") {
        HourMode::H12
    } else {
        HourMode::H24
    };
    if report(rtc.set_hour_mode(mode), "Set hour mode").is_none() {
        return;
    }

    let (hour, meridiem) = read_hour(mode);
    println!("Minute (0 - 59)");
    let minute = read_ranged(0, 59);
    println!("Second (0 - 59)");
    let second = read_ranged(0, 59);
    println!("Day (1 - 31)");
    let day = read_ranged(1, 31);
    let weekday = read_weekday();
    println!("Month (1 - 12)");
    let month = read_ranged(1, 12);
    println!("Year (0 - 99)");
    let year = read_ranged(0, 99);

    let time = TimeValue {
        second,
        minute,
        hour,
        day,
        weekday,
        month,
        year,
        meridiem,
    };
    if report(rtc.set_time(&time), "Set time").is_some() {
        // A freshly set clock can be trusted again
        let _ = report(rtc.clear_oscillator_stopped(), "Clear oscillator flag");
        println!("Time set");
    }
}

fn get_alarm(rtc: &mut Rtc) {
    let alarm = match report(rtc.alarm(), "Get alarm time") {
        Some(alarm) => alarm,
        None => return,
    };
    print_clock(alarm.hour, alarm.minute, alarm.second, alarm.meridiem);
    println!("DATE :- {}", alarm.day);
    print_weekday(alarm.weekday);
    println!("Enabled fields:");
    for (field, name) in AlarmField::ALL.iter().zip(ALARM_FIELD_NAMES) {
        if alarm.enabled.get(*field) {
            println!("  {}", name);
        }
    }
    if !alarm.enabled.any() {
        println!("  none");
    }
}

fn set_alarm(rtc: &mut Rtc) {
    let mode = match report(rtc.hour_mode(), "Get hour mode") {
        Some(mode) => mode,
        None => return,
    };
    let (hour, meridiem) = read_hour(mode);
    println!("Minute (0 - 59)");
    let minute = read_ranged(0, 59);
    println!("Second (0 - 59)");
    let second = read_ranged(0, 59);
    println!("Day (1 - 31)");
    let day = read_ranged(1, 31);
    let weekday = read_weekday();

    let alarm = AlarmValue {
        second,
        minute,
        hour,
        day,
        weekday,
        meridiem,
        ..AlarmValue::default()
    };
    confirm(
        rtc.set_alarm_time(&alarm),
        "Set alarm time",
        "Alarm time set, enable the fields to match with Alarm Interrupt",
    );
}

const ALARM_FIELD_NAMES: [&str; 5] = ["Second", "Minute", "Hour", "Day", "Weekday"];

fn alarm_interrupt(rtc: &mut Rtc) {
    if read_yes_no("Enable Alarm Interrupt", "Disable Alarm Interrupt") {
        println!("Alarm on");
        for (number, name) in ALARM_FIELD_NAMES.iter().enumerate() {
            println!("{}. {}", number + 1, *name);
        }
        let field = AlarmField::ALL[read_choice(5) as usize - 1];
        if report(rtc.clear_alarm_flag(), "Alarm flag clear").is_none() {
            return;
        }
        confirm(
            rtc.enable_alarm_interrupt(field),
            "Alarm interrupt enable",
            "Alarm interrupt enabled",
        );
    } else {
        if report(rtc.clear_alarm_flag(), "Alarm flag clear").is_none() {
            return;
        }
        confirm(
            rtc.disable_alarm_interrupt(),
            "Alarm interrupt disable",
            "Alarm interrupt disabled",
        );
    }
}

const FREQUENCY_NAMES: [&str; 4] = ["4.096 kHz", "64 Hz", "1 Hz", "1/60 Hz"];

fn timer_configuration(rtc: &mut Rtc) {
    println!("1. Choose Timer Clock Frequency");
    println!("2. Set Timer Interrupt Mode");
    println!("3. Enable/Disable Timer Interrupt");
    println!("4. Start/Stop Timer");
    match read_choice(4) {
        1 => timer_frequency(rtc),
        2 => {
            let mode = if read_yes_no("Interrupt generates Pulse", "Interrupt follows Timer Flag") {
                TimerInterruptMode::Pulse
            } else {
                TimerInterruptMode::FollowFlag
            };
            confirm(
                rtc.set_timer_interrupt_mode(mode),
                "Timer interrupt mode",
                "Timer interrupt mode set",
            );
        }
        3 => {
            let enable = read_yes_no("Enable Timer Interrupt", "Disable Timer Interrupt");
            confirm(
                rtc.set_timer_interrupt(enable),
                "Timer interrupt",
                if enable { "Timer interrupt enabled" } else { "Timer interrupt disabled" },
            );
        }
        _ => {
            let enable = read_yes_no("Start Timer", "Stop Timer");
            confirm(
                rtc.set_timer_enabled(enable),
                "Timer",
                if enable { "Timer started" } else { "Timer stopped" },
            );
        }
    }
}

fn timer_frequency(rtc: &mut Rtc) {
    for (number, (frequency, name)) in TimerFrequency::ALL.iter().zip(FREQUENCY_NAMES).enumerate() {
        println!(
            "{}. {} ({} ms - {} ms)",
            number + 1,
            name,
            frequency.min_millis(),
            frequency.max_millis()
        );
    }
    let frequency = TimerFrequency::ALL[read_choice(4) as usize - 1];
    if report(rtc.set_timer_frequency(frequency), "Timer frequency").is_none() {
        return;
    }
    println!("Timer clock frequency selected");

    println!("Countdown in milliseconds");
    let millis = read_ranged(frequency.min_millis(), frequency.max_millis());
    if let Some(countdown) = report(rtc.set_timer_duration(millis), "Timer countdown") {
        println!(
            "Timer for {} ms set ({} ticks)",
            frequency.duration_millis(countdown),
            countdown
        );
    }
}

fn set_offset(rtc: &mut Rtc) {
    println!("Make sure the correction interrupt is enabled to watch the pulses");
    let mode = if read_yes_no("Normal Mode", "Course Mode") {
        OffsetMode::Normal
    } else {
        OffsetMode::Course
    };
    if report(rtc.set_offset_mode(mode), "Offset mode").is_none() {
        return;
    }
    println!("Offset value");
    let value: i8 = read_ranged(pcf85063at::offset::OFFSET_MIN, pcf85063at::offset::OFFSET_MAX);
    if report(rtc.set_offset(value), "Offset").is_none() {
        return;
    }
    if let Some(offset) = report(rtc.offset(), "Offset read back") {
        println!("Offset {} steps, {} ppb", offset.offset, offset.ppb());
    }
}

fn event_name(event: Event) -> &'static str {
    match event {
        Event::Alarm => "Alarm",
        Event::Timer => "Minutes, Half Minute or Countdown Timer",
    }
}

fn clear_interrupts(rtc: &mut Rtc) {
    let serviced = rtc.service_interrupts(|event| {
        println!("{} interrupt occurred", event_name(event));
    });
    match report(serviced, "Clear interrupts") {
        Some(flags) if flags.any() => println!("Interrupts cleared"),
        Some(_) => println!("No interrupt pending"),
        None => {}
    }
}

/// Tell the operator what INTB was pulled for, without clearing anything
pub fn report_intb(rtc: &mut Rtc) {
    debug!("[DEBUG] [INTB] Falling edge");
    if let Some(flags) = report(rtc.interrupt_flags(), "Interrupt flags") {
        print_events(flags);
    }
}

fn print_events(flags: Flags) {
    for event in flags.events() {
        println!();
        println!("INTB: {} interrupt, use Clear Interrupts to acknowledge", event_name(event));
    }
}
