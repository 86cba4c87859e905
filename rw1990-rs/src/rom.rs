use crate::{
    BIT_DELAY_MS, Identifier, RW1990_WRITE_MODE_CMD, RW1990_WRITE_ROM_CMD, SETTLE_DELAY_MS,
};
use embedded_hal::delay::DelayNs;
use embedded_onewire::{ONEWIRE_READ_ROM_CMD, ONEWIRE_ROM_LEN, OneWire, OneWireError, OneWireResult};

/// Reads the identifier of the only device on the bus.
///
/// Must be called right after a reset that saw a presence pulse, e.g. a
/// successful [`OneWire::presence`]: that reset opens the Read ROM session.
/// The identifier is returned as read; its CRC byte is not checked.
pub fn read_identifier<O: OneWire>(bus: &mut O) -> OneWireResult<Identifier, O::BusError> {
    bus.write_byte(ONEWIRE_READ_ROM_CMD)?;
    let mut rom = [0; ONEWIRE_ROM_LEN];
    bus.read_bytes(&mut rom)?;
    let id = Identifier::new(rom);
    log::debug!("read identifier {id}");
    Ok(id)
}

/// Overwrites the identifier of an RW1990 key on the bus with `id`.
///
/// Runs the fixed RW1990 write sequence:
///
/// | Step | Bus traffic |
/// |------|-------------|
/// | 1 | reset, Skip ROM, wait [SETTLE_DELAY_MS] |
/// | 2 | `0xD1`, reset (the reset latches write mode) |
/// | 3 | `0xD5`, then 64 inverted bits, each after [BIT_DELAY_MS] |
/// | 4 | reset |
/// | 5 | `0xD1`, reset |
///
/// The key stores the complement of every bit it receives, so each bit is
/// sent inverted. The sequence is write-only: a key removed halfway is not
/// detected and the remaining steps run against an empty bus. Resets inside
/// the sequence ignore both absence and a shorted line, so only hardware
/// errors of the bus master abort it.
pub fn write_identifier<O: OneWire, D: DelayNs>(
    bus: &mut O,
    delay: &mut D,
    id: &Identifier,
) -> OneWireResult<(), O::BusError> {
    log::debug!("writing identifier {id}");
    reset_any(bus)?;
    bus.skip_rom()?;
    delay.delay_ms(SETTLE_DELAY_MS);

    bus.write_byte(RW1990_WRITE_MODE_CMD)?;
    reset_any(bus)?;

    bus.write_byte(RW1990_WRITE_ROM_CMD)?;
    for &byte in id.as_bytes() {
        write_byte_inverted(bus, delay, byte)?;
    }
    reset_any(bus)?;

    bus.write_byte(RW1990_WRITE_MODE_CMD)?;
    reset_any(bus)?;
    log::trace!("write sequence complete");
    Ok(())
}

/// Resets the bus, whether or not a device answers.
fn reset_any<O: OneWire>(bus: &mut O) -> OneWireResult<(), O::BusError> {
    match bus.reset() {
        Ok(_) | Err(OneWireError::NoDevicePresent) => Ok(()),
        Err(OneWireError::ShortCircuit) => {
            log::warn!("bus shorted during write sequence");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Sends the complement of `byte`, LSB first, waiting [BIT_DELAY_MS] before each bit.
fn write_byte_inverted<O: OneWire, D: DelayNs>(
    bus: &mut O,
    delay: &mut D,
    byte: u8,
) -> OneWireResult<(), O::BusError> {
    for i in 0..8 {
        delay.delay_ms(BIT_DELAY_MS);
        bus.write_bit(byte & (1 << i) == 0)?;
    }
    Ok(())
}
