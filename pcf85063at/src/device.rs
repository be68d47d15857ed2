//! The driver handle
//!
//! Every operation is a handful of blocking register transfers. Field updates are
//! read-modify-write against the field mask so that neighbouring bits survive.

use log::{debug, warn};

use crate::{
    alarm::{decode_alarm, encode_alarm, encode_enable, AlarmField, AlarmValue},
    control::{ClockOut, LoadCapacitance, RegisterWrite},
    error::Error,
    interface::{I2cInterface, RegisterAccess, StartCondition},
    interrupt::{Event, Flags},
    offset::{encode_offset, OffsetMode, OffsetValue},
    registers::{
        alarm, control_1, control_2, offset, time, timer_mode, Field, Register, ALARM_LEN,
        MAX_BURST, SOFTWARE_RESET, TIME_LEN,
    },
    time::{decode_time, encode_time, HourMode, TimeValue, TIME_FIELDS},
    timer::{TimerConfig, TimerFrequency, TimerInterruptMode},
    DEFAULT_ADDRESS,
};

pub struct Pcf85063at<I> {
    interface: I,
    start: StartCondition,
    initialized: bool,
}

impl<I2C> Pcf85063at<I2cInterface<I2C>>
where
    I2cInterface<I2C>: RegisterAccess,
{
    /// Driver on an I2C bus at the fixed address 0x51
    pub fn new_with_i2c(i2c: I2C) -> Self {
        Self::initialize(I2cInterface::new(i2c, DEFAULT_ADDRESS))
    }
}

impl<I, E> Pcf85063at<I>
where
    I: RegisterAccess<Error = E>,
{
    /// Bind the driver to a transport. Nothing is sent to the chip.
    pub fn initialize(interface: I) -> Self {
        debug!("initialized");
        Self {
            interface,
            start: StartCondition::default(),
            initialized: true,
        }
    }

    /// Start condition used by every register read
    pub fn with_start_condition(mut self, start: StartCondition) -> Self {
        self.start = start;
        self
    }

    pub fn start_condition(&self) -> StartCondition {
        self.start
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Every later operation fails with [`Error::NotInitialized`]
    pub fn deinit(&mut self) {
        debug!("deinit");
        self.initialized = false;
    }

    pub fn release(self) -> I {
        self.interface
    }

    fn ensure_initialized(&self) -> Result<(), Error<E>> {
        if self.initialized {
            Ok(())
        } else {
            warn!("used after deinit");
            Err(Error::NotInitialized)
        }
    }

    /// Bursts may not run past the last register
    fn check_burst(start: Register, len: usize) -> Result<(), Error<E>> {
        if start.addr() as usize + len > MAX_BURST {
            warn!("burst of {} from {:?} runs past the register file", len, start);
            return Err(Error::InvalidParam);
        }
        Ok(())
    }

    /// Burst read starting at `start`
    pub fn read_registers(&mut self, start: Register, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.ensure_initialized()?;
        Self::check_burst(start, buf.len())?;
        self.interface
            .read_registers(start, buf, self.start)
            .map_err(Error::Read)
    }

    /// Burst write starting at `start`
    pub fn write_registers(&mut self, start: Register, data: &[u8]) -> Result<(), Error<E>> {
        self.ensure_initialized()?;
        Self::check_burst(start, data.len())?;
        self.interface
            .write_registers(start, data)
            .map_err(Error::Write)
    }

    pub fn read_register(&mut self, register: Register) -> Result<u8, Error<E>> {
        let mut buf = [0];
        self.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }

    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error<E>> {
        self.write_registers(register, &[value])
    }

    /// Replace the bits under `mask`, keep the rest. A full mask skips the read.
    ///
    /// Control_2 flags outside the mask are written as 1 so that a flag raised
    /// between the read and the write is not lost.
    pub fn write_masked(&mut self, register: Register, value: u8, mask: u8) -> Result<(), Error<E>> {
        let write = RegisterWrite::new(register, value, mask);
        let current = if mask == 0xFF {
            0
        } else {
            self.read_register(register)?
        };
        let mut next = write.apply(current);
        if register == Register::Control2 {
            next |= control_2::FLAGS & !mask;
        }
        self.write_register(register, next)
    }

    fn write_field(&mut self, register: Register, field: Field, value: u8) -> Result<(), Error<E>> {
        self.write_masked(register, field.bits(value), field.mask)
    }

    fn read_field(&mut self, register: Register, field: Field) -> Result<u8, Error<E>> {
        Ok(field.extract(self.read_register(register)?))
    }

    /// Apply a list of masked register writes in order, stopping at the first failure
    pub fn configure(&mut self, writes: &[RegisterWrite]) -> Result<(), Error<E>> {
        debug!("configure, {} writes", writes.len());
        writes
            .iter()
            .try_for_each(|write| self.write_masked(write.register, write.value, write.mask))
    }

    /* Control_1 */

    pub fn start(&mut self) -> Result<(), Error<E>> {
        debug!("clock start");
        self.write_field(Register::Control1, control_1::STOP, 0)
    }

    pub fn stop(&mut self) -> Result<(), Error<E>> {
        debug!("clock stop");
        self.write_field(Register::Control1, control_1::STOP, 1)
    }

    pub fn is_running(&mut self) -> Result<bool, Error<E>> {
        Ok(self.read_field(Register::Control1, control_1::STOP)? == 0)
    }

    /// Every register goes back to its reset value; the chip takes a moment to recover
    pub fn software_reset(&mut self) -> Result<(), Error<E>> {
        debug!("software reset");
        self.write_register(Register::Control1, SOFTWARE_RESET)
    }

    pub fn set_hour_mode(&mut self, mode: HourMode) -> Result<(), Error<E>> {
        debug!("hour mode {:?}", mode);
        self.write_field(Register::Control1, control_1::MODE_12_24, mode.bit())
    }

    pub fn hour_mode(&mut self) -> Result<HourMode, Error<E>> {
        Ok(HourMode::from_bit(
            self.read_field(Register::Control1, control_1::MODE_12_24)?,
        ))
    }

    pub fn set_load_capacitance(&mut self, capacitance: LoadCapacitance) -> Result<(), Error<E>> {
        self.write_field(Register::Control1, control_1::CAP_SEL, capacitance.bit())
    }

    pub fn load_capacitance(&mut self) -> Result<LoadCapacitance, Error<E>> {
        Ok(LoadCapacitance::from_bit(
            self.read_field(Register::Control1, control_1::CAP_SEL)?,
        ))
    }

    /// External clock test mode, off for normal operation
    pub fn set_external_test(&mut self, enabled: bool) -> Result<(), Error<E>> {
        self.write_field(Register::Control1, control_1::EXT_TEST, enabled as u8)
    }

    /// Correction pulses are output on INTB while enabled
    pub fn set_correction_interrupt(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("correction interrupt {}", enabled);
        self.write_field(Register::Control1, control_1::CIE, enabled as u8)
    }

    /* Time */

    /// The hour is encoded for whatever mode the chip is in at the time of the call
    pub fn set_time(&mut self, value: &TimeValue) -> Result<(), Error<E>> {
        let mode = self.hour_mode()?;
        let encoded = encode_time(value, mode).map_err(|e| {
            warn!("time rejected: {:?}", value);
            e
        })?;
        debug!("set time {:?}", value);

        let mut raw = [0; TIME_LEN];
        self.read_registers(Register::Seconds, &mut raw)?;
        for ((current, field), new) in raw.iter_mut().zip(TIME_FIELDS).zip(encoded) {
            *current = field.insert(*current, field.extract(new));
        }
        self.write_registers(Register::Seconds, &raw)
    }

    pub fn time(&mut self) -> Result<TimeValue, Error<E>> {
        let mode = self.hour_mode()?;
        let mut raw = [0; TIME_LEN];
        self.read_registers(Register::Seconds, &mut raw)?;
        Ok(decode_time(&raw, mode))
    }

    /// Set when the oscillator stopped since the flag was last cleared, the time is
    /// then not to be trusted
    pub fn oscillator_stopped(&mut self) -> Result<bool, Error<E>> {
        Ok(self.read_field(Register::Seconds, time::OS)? != 0)
    }

    pub fn clear_oscillator_stopped(&mut self) -> Result<(), Error<E>> {
        self.write_field(Register::Seconds, time::OS, 0)
    }

    /* Alarm */

    /// Alarm values only; which fields are enabled stays as it is
    pub fn set_alarm_time(&mut self, value: &AlarmValue) -> Result<(), Error<E>> {
        let mode = self.hour_mode()?;
        let encoded = encode_alarm(value, mode)?;
        debug!("set alarm time {:?}", value);

        let mut raw = [0; ALARM_LEN];
        self.read_registers(Register::SecondAlarm, &mut raw)?;
        for ((current, field), new) in raw.iter_mut().zip(AlarmField::ALL).zip(encoded) {
            let value_field = field.value_field();
            *current = value_field.insert(*current, value_field.extract(new));
        }
        self.write_registers(Register::SecondAlarm, &raw)
    }

    /// Alarm values and the enable bit of every field
    pub fn set_alarm(&mut self, value: &AlarmValue) -> Result<(), Error<E>> {
        let mode = self.hour_mode()?;
        let encoded = encode_alarm(value, mode)?;
        debug!("set alarm {:?}", value);

        let mut raw = [0; ALARM_LEN];
        self.read_registers(Register::SecondAlarm, &mut raw)?;
        for ((current, field), new) in raw.iter_mut().zip(AlarmField::ALL).zip(encoded) {
            let mask = field.value_field().mask | alarm::AEN.mask;
            *current = (*current & !mask) | (new & mask);
        }
        self.write_registers(Register::SecondAlarm, &raw)
    }

    pub fn alarm(&mut self) -> Result<AlarmValue, Error<E>> {
        let mode = self.hour_mode()?;
        let mut raw = [0; ALARM_LEN];
        self.read_registers(Register::SecondAlarm, &mut raw)?;
        Ok(decode_alarm(&raw, mode))
    }

    /// Make one field take part in the alarm match. Other fields are left alone.
    pub fn enable_alarm_field(&mut self, field: AlarmField) -> Result<(), Error<E>> {
        debug!("alarm field {:?} on", field);
        self.write_masked(field.register(), encode_enable(0, true), alarm::AEN.mask)
    }

    pub fn disable_alarm_field(&mut self, field: AlarmField) -> Result<(), Error<E>> {
        debug!("alarm field {:?} off", field);
        self.write_masked(field.register(), encode_enable(0, false), alarm::AEN.mask)
    }

    /// Raise INTB when the alarm matches on `field` (and whatever else is enabled)
    pub fn enable_alarm_interrupt(&mut self, field: AlarmField) -> Result<(), Error<E>> {
        self.write_field(Register::Control2, control_2::AIE, 1)?;
        self.enable_alarm_field(field)
    }

    /// Alarm enables are kept, only INTB stays quiet
    pub fn disable_alarm_interrupt(&mut self) -> Result<(), Error<E>> {
        self.write_field(Register::Control2, control_2::AIE, 0)
    }

    /* Control_2 */

    pub fn set_minute_interrupt(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("minute interrupt {}", enabled);
        self.write_field(Register::Control2, control_2::MI, enabled as u8)
    }

    pub fn set_half_minute_interrupt(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("half minute interrupt {}", enabled);
        self.write_field(Register::Control2, control_2::HMI, enabled as u8)
    }

    pub fn set_clock_out(&mut self, clock_out: ClockOut) -> Result<(), Error<E>> {
        self.write_field(Register::Control2, control_2::COF, clock_out.bits())
    }

    pub fn clock_out(&mut self) -> Result<ClockOut, Error<E>> {
        Ok(ClockOut::from_bits(
            self.read_field(Register::Control2, control_2::COF)?,
        ))
    }

    pub fn interrupt_flags(&mut self) -> Result<Flags, Error<E>> {
        Ok(Flags::from_control_2(self.read_register(Register::Control2)?))
    }

    pub fn alarm_flag(&mut self) -> Result<bool, Error<E>> {
        Ok(self.interrupt_flags()?.alarm)
    }

    /// Timer, minute or half minute flag
    pub fn timer_flag(&mut self) -> Result<bool, Error<E>> {
        Ok(self.interrupt_flags()?.timer)
    }

    pub fn clear_alarm_flag(&mut self) -> Result<(), Error<E>> {
        self.write_field(Register::Control2, control_2::AF, 0)
    }

    pub fn clear_timer_flag(&mut self) -> Result<(), Error<E>> {
        self.write_field(Register::Control2, control_2::TF, 0)
    }

    /// Hand each pending flag to `on_event`, then clear exactly those flags.
    /// Returns what was pending.
    pub fn service_interrupts(&mut self, mut on_event: impl FnMut(Event)) -> Result<Flags, Error<E>> {
        let raw = self.read_register(Register::Control2)?;
        let flags = Flags::from_control_2(raw);
        if !flags.any() {
            return Ok(flags);
        }
        debug!("servicing {:?}", flags);
        flags.events().for_each(&mut on_event);
        self.write_register(
            Register::Control2,
            (raw | control_2::FLAGS) & !flags.mask(),
        )?;
        Ok(flags)
    }

    /* Timer */

    pub fn set_timer_frequency(&mut self, frequency: TimerFrequency) -> Result<(), Error<E>> {
        debug!("timer frequency {:?}", frequency);
        self.write_field(Register::TimerMode, timer_mode::TCF, frequency.bits())
    }

    pub fn set_timer_countdown(&mut self, countdown: u8) -> Result<(), Error<E>> {
        debug!("timer countdown {}", countdown);
        self.write_register(Register::TimerValue, countdown)
    }

    /// Pick the countdown that gives `millis` at the configured frequency
    pub fn set_timer_duration(&mut self, millis: u32) -> Result<u8, Error<E>> {
        let frequency =
            TimerFrequency::from_bits(self.read_field(Register::TimerMode, timer_mode::TCF)?);
        let countdown = frequency.countdown_for_millis(millis)?;
        self.set_timer_countdown(countdown)?;
        Ok(countdown)
    }

    pub fn set_timer_interrupt_mode(&mut self, mode: TimerInterruptMode) -> Result<(), Error<E>> {
        self.write_field(Register::TimerMode, timer_mode::TI_TP, mode.bit())
    }

    pub fn timer_interrupt_mode(&mut self) -> Result<TimerInterruptMode, Error<E>> {
        Ok(TimerInterruptMode::from_bit(
            self.read_field(Register::TimerMode, timer_mode::TI_TP)?,
        ))
    }

    pub fn set_timer_interrupt(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("timer interrupt {}", enabled);
        self.write_field(Register::TimerMode, timer_mode::TIE, enabled as u8)
    }

    pub fn set_timer_enabled(&mut self, enabled: bool) -> Result<(), Error<E>> {
        debug!("timer {}", enabled);
        self.write_field(Register::TimerMode, timer_mode::TE, enabled as u8)
    }

    /// Writes Timer_value and Timer_mode in one burst
    pub fn set_timer(&mut self, config: &TimerConfig) -> Result<(), Error<E>> {
        debug!("set timer {:?}", config);
        let mut raw = [0; 2];
        self.read_registers(Register::TimerValue, &mut raw)?;
        let mask = timer_mode::TCF.mask
            | timer_mode::TE.mask
            | timer_mode::TIE.mask
            | timer_mode::TI_TP.mask;
        raw[0] = config.countdown;
        raw[1] = (raw[1] & !mask) | config.mode_bits();
        self.write_registers(Register::TimerValue, &raw)
    }

    pub fn timer(&mut self) -> Result<TimerConfig, Error<E>> {
        let mut raw = [0; 2];
        self.read_registers(Register::TimerValue, &mut raw)?;
        Ok(TimerConfig::from_registers(raw[0], raw[1]))
    }

    /* Offset */

    pub fn set_offset_mode(&mut self, mode: OffsetMode) -> Result<(), Error<E>> {
        debug!("offset mode {:?}", mode);
        self.write_field(Register::Offset, offset::MODE, mode.bit())
    }

    /// Correction value in [-64, 63], the mode bit is kept
    pub fn set_offset(&mut self, value: i8) -> Result<(), Error<E>> {
        let encoded = encode_offset(value).map_err(|e| {
            warn!("offset {} out of range", value);
            e
        })?;
        debug!("offset {}", value);
        self.write_masked(Register::Offset, encoded, offset::OFFSET.mask)
    }

    pub fn set_offset_value(&mut self, value: OffsetValue) -> Result<(), Error<E>> {
        debug!("offset {:?}", value);
        self.write_register(Register::Offset, value.to_register()?)
    }

    pub fn offset(&mut self) -> Result<OffsetValue, Error<E>> {
        Ok(OffsetValue::from_register(self.read_register(Register::Offset)?))
    }

    /* RAM */

    pub fn set_ram_byte(&mut self, value: u8) -> Result<(), Error<E>> {
        self.write_register(Register::RamByte, value)
    }

    pub fn ram_byte(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::RamByte)
    }
}
