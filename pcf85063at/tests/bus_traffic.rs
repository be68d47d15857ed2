//! Exact I2C traffic for the common operations

use embedded_hal_mock::{
    i2c::{Mock as I2cMock, Transaction as I2cTrans},
    MockError,
};
use pcf85063at::{
    registers::Register, AlarmField, Error, HourMode, Meridiem, Pcf85063at, StartCondition,
    TimeValue, DEFAULT_ADDRESS, DEFAULT_CONFIG,
};
use std::io::ErrorKind;

const ADDR: u8 = DEFAULT_ADDRESS;

fn io_error() -> MockError {
    MockError::Io(ErrorKind::Other)
}

#[test]
fn start_clears_only_the_stop_bit() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0b0010_0011]),
        I2cTrans::write(ADDR, vec![0x00, 0b0000_0011]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.start().unwrap();
    rtc.release().release().done();
}

#[test]
fn software_reset_writes_the_reset_pattern() {
    let expectations = [I2cTrans::write(ADDR, vec![0x00, 0x58])];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.software_reset().unwrap();
    rtc.release().release().done();
}

#[test]
fn get_time_is_one_burst_after_the_mode() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0b0000_0010]),
        I2cTrans::write_read(
            ADDR,
            vec![0x04],
            vec![0x59, 0x59, 0x31, 0x31, 0x06, 0x12, 0x99],
        ),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    assert_eq!(
        rtc.time().unwrap(),
        TimeValue {
            second: 59,
            minute: 59,
            hour: 11,
            day: 31,
            weekday: 6,
            month: 12,
            year: 99,
            meridiem: Meridiem::Pm,
        }
    );
    rtc.release().release().done();
}

#[test]
fn set_time_merges_into_the_live_registers() {
    let value = TimeValue {
        second: 0,
        minute: 30,
        hour: 14,
        day: 15,
        weekday: 6,
        month: 6,
        year: 24,
        meridiem: Meridiem::H24,
    };
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x00]),
        // OS flag set, stale time
        I2cTrans::write_read(ADDR, vec![0x04], vec![0x80, 0, 0, 1, 0, 1, 0]),
        I2cTrans::write(ADDR, vec![0x04, 0x80, 0x30, 0x14, 0x15, 0x06, 0x06, 0x24]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.set_time(&value).unwrap();
    rtc.release().release().done();
}

#[test]
fn stop_start_reads_use_two_transactions() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x03]),
        I2cTrans::read(ADDR, vec![0x3C]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations))
        .with_start_condition(StartCondition::StopStart);
    assert_eq!(rtc.ram_byte().unwrap(), 0x3C);
    rtc.release().release().done();
}

#[test]
fn default_config_selects_12h_and_runs() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0b0010_0000]),
        I2cTrans::write(ADDR, vec![0x00, 0b0010_0010]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0b0010_0010]),
        I2cTrans::write(ADDR, vec![0x00, 0b0000_0010]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0x00]),
        // AF and TF written as 1 are left alone by the chip
        I2cTrans::write(ADDR, vec![0x01, 0b0100_1111]),
        I2cTrans::write_read(ADDR, vec![0x00], vec![0b0000_0010]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.configure(&DEFAULT_CONFIG).unwrap();
    assert_eq!(rtc.hour_mode().unwrap(), HourMode::H12);
    rtc.release().release().done();
}

#[test]
fn alarm_interrupt_enables_one_field() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x01], vec![0b0000_0111]),
        I2cTrans::write(ADDR, vec![0x01, 0b1100_1111]),
        I2cTrans::write_read(ADDR, vec![0x0D], vec![0x80 | 0x07]),
        I2cTrans::write(ADDR, vec![0x0D, 0x07]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.enable_alarm_interrupt(AlarmField::Hour).unwrap();
    rtc.release().release().done();
}

#[test]
fn bus_errors_keep_their_direction() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x00]).with_error(io_error()),
        I2cTrans::write(ADDR, vec![0x03, 0x3C]).with_error(io_error()),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    assert!(matches!(rtc.time(), Err(Error::Read(_))));
    let err = rtc.set_ram_byte(0x3C).unwrap_err();
    assert!(matches!(err, Error::Write(_)));
    assert_eq!(err.code(), 4);
    rtc.release().release().done();
}

#[test]
fn rejected_values_never_reach_the_bus() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0x00], vec![0x00])];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    let value = TimeValue {
        hour: 25,
        day: 1,
        month: 1,
        ..TimeValue::default()
    };
    assert!(matches!(rtc.set_time(&value), Err(Error::InvalidParam)));
    rtc.release().release().done();
}

#[test]
fn clearing_one_flag_writes_the_other_as_one() {
    let expectations = [
        // AIE, AF, MI, COF = off; TF clear when read
        I2cTrans::write_read(ADDR, vec![0x01], vec![0b1110_0111]),
        I2cTrans::write(ADDR, vec![0x01, 0b1010_1111]),
        I2cTrans::write_read(ADDR, vec![0x01], vec![0b1100_1111]),
        I2cTrans::write(ADDR, vec![0x01, 0b1100_0111]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.clear_alarm_flag().unwrap();
    rtc.clear_timer_flag().unwrap();
    rtc.release().release().done();
}

#[test]
fn service_writes_untouched_flags_as_one() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x01], vec![0b1010_1000]),
        I2cTrans::write(ADDR, vec![0x01, 0b1110_0000]),
    ];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    let flags = rtc.service_interrupts(|_| {}).unwrap();
    assert!(flags.timer && !flags.alarm);
    rtc.release().release().done();
}

#[test]
fn bursts_past_the_last_register_are_rejected() {
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&[]));
    let data = [0_u8; 20];
    assert!(matches!(
        rtc.write_registers(Register::RamByte, &data),
        Err(Error::InvalidParam)
    ));
    // RamByte through TimerMode is 15 registers
    assert!(matches!(
        rtc.write_registers(Register::RamByte, &data[..16]),
        Err(Error::InvalidParam)
    ));
    let mut buf = [0_u8; 19];
    assert!(matches!(
        rtc.read_registers(Register::Control1, &mut buf),
        Err(Error::InvalidParam)
    ));
    rtc.release().release().done();
}

#[test]
fn burst_up_to_the_last_register_goes_out_whole() {
    let data: Vec<u8> = (0..15).collect();
    let mut frame = vec![0x03];
    frame.extend_from_slice(&data);
    let expectations = [I2cTrans::write(ADDR, frame)];
    let mut rtc = Pcf85063at::new_with_i2c(I2cMock::new(&expectations));
    rtc.write_registers(Register::RamByte, &data).unwrap();
    rtc.release().release().done();
}
