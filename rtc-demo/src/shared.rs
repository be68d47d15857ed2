use arduino_hal::{
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin,
    },
    I2c, Usart,
};
use pcf85063at::{I2cInterface, Pcf85063at};

pub const BAUD_RATE: u32 = 57_600;
/// Standard mode, the PCF85063AT also does 400 kHz
pub const I2C_SPEED: u32 = 100_000;
/// Longest line the console prompt accepts
pub const LINE_LENGTH: usize = 16;

pub type UsbSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;
pub type Rtc = Pcf85063at<I2cInterface<I2c>>;
