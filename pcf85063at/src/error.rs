use core::fmt;

/// Driver errors, generic over the bus error `E`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A field was out of range or the request was malformed
    InvalidParam,
    /// The handle was used after [`crate::Pcf85063at::deinit`]
    NotInitialized,
    /// Reading a register failed on the bus
    Read(E),
    /// Writing a register failed on the bus
    Write(E),
}

impl<E> Error<E> {
    /// Integer status as reported to the console, 0 is reserved for success
    pub const fn code(&self) -> i32 {
        match self {
            Error::InvalidParam => 1,
            Error::NotInitialized => 3,
            Error::Write(_) => 4,
            Error::Read(_) => 5,
        }
    }

    /// Short description for consoles without `core::fmt`
    pub const fn describe(&self) -> &'static str {
        match self {
            Error::InvalidParam => "invalid parameter",
            Error::NotInitialized => "device not initialized",
            Error::Read(_) => "register read failed",
            Error::Write(_) => "register write failed",
        }
    }

    /// Swap the bus error, keeping the kind of failure
    pub fn map_bus<F>(self, f: impl FnOnce(E) -> F) -> Error<F> {
        match self {
            Error::InvalidParam => Error::InvalidParam,
            Error::NotInitialized => Error::NotInitialized,
            Error::Read(e) => Error::Read(f(e)),
            Error::Write(e) => Error::Write(f(e)),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) | Error::Write(e) => write!(f, "{}: {:?}", self.describe(), e),
            _ => f.write_str(self.describe()),
        }
    }
}

/// A value handed to the codec was outside the range its register can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidParam;

impl<E> From<InvalidParam> for Error<E> {
    fn from(_: InvalidParam) -> Self {
        Error::InvalidParam
    }
}

/// Status code of an operation result, 0 on success
pub fn status<T, E>(result: &Result<T, Error<E>>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(status::<(), ()>(&Ok(())), 0);
        assert_eq!(status::<(), ()>(&Err(Error::InvalidParam)), 1);
        assert_eq!(status::<(), ()>(&Err(Error::NotInitialized)), 3);
        assert_eq!(status::<(), ()>(&Err(Error::Write(()))), 4);
        assert_eq!(status::<(), ()>(&Err(Error::Read(()))), 5);
    }

    #[test]
    fn map_bus_keeps_the_kind() {
        let e: Error<u8> = Error::Read(7);
        assert_eq!(e.map_bus(u16::from), Error::Read(7_u16));
        let e: Error<u8> = Error::InvalidParam;
        assert_eq!(e.map_bus(u16::from), Error::<u16>::InvalidParam);
    }

    #[test]
    fn codec_rejections_become_invalid_param() {
        let e: Error<()> = InvalidParam.into();
        assert_eq!(e, Error::InvalidParam);
    }

    #[test]
    fn display_includes_bus_error() {
        let e: Error<&str> = Error::Write("nack");
        assert_eq!(std::format!("{}", e), "register write failed: \"nack\"");
    }
}
