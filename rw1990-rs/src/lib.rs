#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # rw1990
//! Read and clone the identifier of an RW1990 iButton.
//!
//! The crate is generic over any bus master implementing [OneWire] and any
//! timer implementing [`DelayNs`](embedded_hal::delay::DelayNs):
//! - [read_identifier] issues Read ROM and returns the 8-byte [Identifier].
//! - [write_identifier] runs the RW1990 write sequence that overwrites the
//!   identifier of a blank key.
//! - [Cloner] ties both to a presence poll, a [Ui] and an [Input], one
//!   transaction per [Cloner::poll] call.
//!
//! Only single-device buses are supported; every command is broadcast with Skip ROM.

mod cloner;
mod identifier;
mod rom;
#[cfg(test)]
mod mock;

pub use cloner::{Cloner, Input, PollOutcome, Ui};
pub use embedded_onewire::{OneWire, OneWireError, OneWireResult, OneWireStatus};
pub use identifier::{Identifier, ParseIdentifierError};
pub use rom::{read_identifier, write_identifier};

/// RW1990 command that enters write mode when followed by a reset, and
/// finalizes the written identifier when sent again after the data phase.
pub const RW1990_WRITE_MODE_CMD: u8 = 0xd1;

/// RW1990 command that starts the identifier data phase.
pub const RW1990_WRITE_ROM_CMD: u8 = 0xd5;

/// Wait after Skip ROM before entering write mode, in milliseconds.
pub const SETTLE_DELAY_MS: u32 = 20;

/// Wait before every bit of the identifier data phase, in milliseconds.
pub const BIT_DELAY_MS: u32 = 25;

/// Time the user is given to remove a freshly written key, in milliseconds.
pub const COOLDOWN_MS: u32 = 3000;

/// Interval between two [Cloner::poll] calls, in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 500;
