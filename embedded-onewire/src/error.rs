use core::fmt;

/// One wire communication error type.
#[derive(Debug, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Other(E),
    /// Indicates that no device is present on the bus.
    NoDevicePresent,
    /// Indicates that a short circuit was detected on the bus.
    ShortCircuit,
    /// Indicates that the operation is not implemented by the bus master.
    Unimplemented,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}

impl<E: fmt::Debug> fmt::Display for OneWireError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(e) => write!(f, "bus master error: {e:?}"),
            Self::NoDevicePresent => f.write_str("no device answered the reset pulse"),
            Self::ShortCircuit => f.write_str("1-Wire line is shorted"),
            Self::Unimplemented => f.write_str("operation not supported by the bus master"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for OneWireError<E> {}
