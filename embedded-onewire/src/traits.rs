use crate::{ONEWIRE_SKIP_ROM_CMD, OneWireError, OneWireResult};

/// Status of the bus reported by a reset/presence-detect cycle.
pub trait OneWireStatus {
    /// Returns `true` if a device answered the reset pulse with a presence pulse.
    fn presence(&self) -> bool;

    /// Returns `true` if the line was held low when it should have been released.
    fn shortcircuit(&self) -> bool;

    /// Logic level of the line sampled after the reset cycle, if the bus master reports it.
    fn logic_level(&self) -> Option<bool> {
        None
    }
}

/// Trait for 1-Wire communication.
/// This trait defines the basic operations required for 1-Wire communication, such as resetting the bus,
/// writing and reading bytes, and writing and reading bits.
///
/// All multi-bit transfers are least-significant bit first.
pub trait OneWire {
    /// The status type returned by the reset operation.
    /// This type must implement the [OneWireStatus] trait.
    type Status: OneWireStatus;
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware or communication.
    type BusError;

    /// Resets the 1-Wire bus and returns the status of the bus.
    ///
    /// # Returns
    /// A result containing the status of the bus after the reset operation.
    ///
    /// # Errors
    /// This method returns an error if the reset operation fails. Bus masters
    /// are free to report a missing presence pulse either through
    /// [OneWireStatus::presence] or as [OneWireError::NoDevicePresent].
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a byte to the 1-Wire bus.
    /// # Arguments
    /// * `byte` - The byte to write to the bus.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError>;

    /// Reads a byte from the 1-Wire bus.
    /// # Returns
    /// Byte read from the bus.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError>;

    /// Writes a single bit to the 1-Wire bus.
    /// # Arguments
    ///
    /// * `bit` - The bit to write. `true` generates a write-one time slot, `false` a write-zero time slot.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit from the 1-Wire bus.
    /// # Returns
    /// The bit read from the bus.
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Issues a reset pulse and reports whether a device answered it.
    ///
    /// A [OneWireError::NoDevicePresent] from [OneWire::reset] is reported as `Ok(false)`.
    /// A short circuit is reported as [OneWireError::ShortCircuit].
    fn presence(&mut self) -> OneWireResult<bool, Self::BusError> {
        match self.reset() {
            Ok(status) if status.shortcircuit() => Err(OneWireError::ShortCircuit),
            Ok(status) => Ok(status.presence()),
            Err(OneWireError::NoDevicePresent) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Broadcasts the Skip ROM command so that the next command addresses every device on the bus.
    ///
    /// Must follow a [OneWire::reset]. Only valid with a single device on the bus.
    fn skip_rom(&mut self) -> OneWireResult<(), Self::BusError> {
        self.write_byte(ONEWIRE_SKIP_ROM_CMD)
    }

    /// Reads `buf.len()` bytes from the 1-Wire bus into `buf`.
    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Status {
        presence: bool,
        short: bool,
    }

    impl OneWireStatus for Status {
        fn presence(&self) -> bool {
            self.presence
        }

        fn shortcircuit(&self) -> bool {
            self.short
        }
    }

    /// Bus that replays a fixed reset answer and counts up from `next` on reads.
    struct ScriptedBus {
        reset: Result<Status, OneWireError<()>>,
        written: Vec<u8>,
        next: u8,
    }

    impl ScriptedBus {
        fn answering(reset: Result<Status, OneWireError<()>>) -> Self {
            Self {
                reset,
                written: Vec::new(),
                next: 0,
            }
        }
    }

    impl OneWire for ScriptedBus {
        type Status = Status;
        type BusError = ();

        fn reset(&mut self) -> OneWireResult<Status, ()> {
            match &self.reset {
                Ok(s) => Ok(*s),
                Err(OneWireError::NoDevicePresent) => Err(OneWireError::NoDevicePresent),
                Err(_) => Err(OneWireError::Other(())),
            }
        }

        fn write_byte(&mut self, byte: u8) -> OneWireResult<(), ()> {
            self.written.push(byte);
            Ok(())
        }

        fn read_byte(&mut self) -> OneWireResult<u8, ()> {
            let b = self.next;
            self.next += 1;
            Ok(b)
        }

        fn write_bit(&mut self, _bit: bool) -> OneWireResult<(), ()> {
            Ok(())
        }

        fn read_bit(&mut self) -> OneWireResult<bool, ()> {
            Ok(true)
        }
    }

    #[test]
    fn test_presence_from_status() {
        let mut bus = ScriptedBus::answering(Ok(Status {
            presence: true,
            short: false,
        }));
        assert_eq!(bus.presence(), Ok(true));

        let mut bus = ScriptedBus::answering(Ok(Status {
            presence: false,
            short: false,
        }));
        assert_eq!(bus.presence(), Ok(false));
    }

    #[test]
    fn test_presence_maps_no_device_error() {
        let mut bus = ScriptedBus::answering(Err(OneWireError::NoDevicePresent));
        assert_eq!(bus.presence(), Ok(false));
    }

    #[test]
    fn test_presence_reports_short() {
        let mut bus = ScriptedBus::answering(Ok(Status {
            presence: true,
            short: true,
        }));
        assert_eq!(bus.presence(), Err(OneWireError::ShortCircuit));
    }

    #[test]
    fn test_presence_propagates_hardware_error() {
        let mut bus = ScriptedBus::answering(Err(OneWireError::Other(())));
        assert_eq!(bus.presence(), Err(OneWireError::Other(())));
    }

    #[test]
    fn test_skip_rom_and_read_bytes() {
        let mut bus = ScriptedBus::answering(Err(OneWireError::NoDevicePresent));
        bus.skip_rom().unwrap();
        assert_eq!(bus.written, [ONEWIRE_SKIP_ROM_CMD]);

        let mut buf = [0xff; 4];
        bus.read_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0, 1, 2, 3]);
    }
}
