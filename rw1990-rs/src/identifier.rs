use core::{fmt, str::FromStr};
use embedded_onewire::ONEWIRE_ROM_LEN;

/// The 64-bit ROM code of a 1-Wire device, in bus order.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0 | Family code (`0x01` for DS1990A and RW1990 keys) |
/// | 1-6 | Serial number |
/// | 7 | CRC-8 of bytes 0-6 |
///
/// The CRC byte is carried as-is; it is never checked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier([u8; ONEWIRE_ROM_LEN]);

impl Identifier {
    /// Creates an identifier from bytes in bus order.
    pub const fn new(bytes: [u8; ONEWIRE_ROM_LEN]) -> Self {
        Self(bytes)
    }

    /// Bytes in bus order.
    pub const fn as_bytes(&self) -> &[u8; ONEWIRE_ROM_LEN] {
        &self.0
    }

    /// Family code.
    pub const fn family(&self) -> u8 {
        self.0[0]
    }

    /// Serial number bytes.
    pub fn serial(&self) -> &[u8] {
        &self.0[1..7]
    }

    /// Checksum byte as read from the device.
    pub const fn checksum(&self) -> u8 {
        self.0[7]
    }
}

impl From<[u8; ONEWIRE_ROM_LEN]> for Identifier {
    fn from(bytes: [u8; ONEWIRE_ROM_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Identifier> for [u8; ONEWIRE_ROM_LEN] {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// The family code occupies the least significant byte.
impl From<u64> for Identifier {
    fn from(rom: u64) -> Self {
        Self(rom.to_le_bytes())
    }
}

impl From<Identifier> for u64 {
    fn from(id: Identifier) -> Self {
        u64::from_le_bytes(id.0)
    }
}

/// Upper-case hex bytes in bus order separated by spaces, e.g. `01 A2 B3 C4 D5 E6 F7 08`.
impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing an [Identifier] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIdentifierError {
    /// The text does not hold exactly 16 hex digits.
    InvalidLength,
    /// The text holds a character that is neither a hex digit nor a separator.
    InvalidDigit(char),
}

impl fmt::Display for ParseIdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "identifier must be {} hex digits", ONEWIRE_ROM_LEN * 2),
            Self::InvalidDigit(c) => write!(f, "invalid hex digit {c:?} in identifier"),
        }
    }
}

impl core::error::Error for ParseIdentifierError {}

/// Parses 16 hex digits in bus order. Spaces, `:` and `-` between digits are ignored,
/// so the [Display](fmt::Display) form parses back.
impl FromStr for Identifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; ONEWIRE_ROM_LEN];
        let mut digits = 0;
        for c in s.chars().filter(|c| !matches!(c, ' ' | ':' | '-')) {
            let nibble = c
                .to_digit(16)
                .ok_or(ParseIdentifierError::InvalidDigit(c))? as u8;
            if digits == ONEWIRE_ROM_LEN * 2 {
                return Err(ParseIdentifierError::InvalidLength);
            }
            bytes[digits / 2] = (bytes[digits / 2] << 4) | nibble;
            digits += 1;
        }
        if digits != ONEWIRE_ROM_LEN * 2 {
            return Err(ParseIdentifierError::InvalidLength);
        }
        Ok(Self(bytes))
    }
}
