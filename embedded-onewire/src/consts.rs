//! Command constants for 1-Wire communication.

/// Command to read the 64-bit ROM code of the only device on the bus.
///
/// The device answers with eight bytes: family code, six serial number
/// bytes and the CRC-8 of the preceding seven bytes. The command is only
/// meaningful on a single-drop bus; with more than one device the
/// open-drain line returns the wired-AND of all ROM codes.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Command to skip ROM address in 1-Wire communication (non-overdrive mode)
///
/// On a single-drop bus this command can save time by
/// allowing the bus master to access the control functions
/// without providing the 64-bit ROM code.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Length of a 1-Wire ROM code in bytes.
pub const ONEWIRE_ROM_LEN: usize = 8;
