#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std trait definition for driving a single device on a 1-Wire bus.
//!
//! The [OneWire] trait defines the basic operations required for 1-Wire communication, such as resetting the bus,
//! writing and reading bytes, and writing and reading bits. Bus masters (bit-banged GPIO, bridge chips, ...)
//! implement it; chip-level protocols such as ROM readers and writers are built on top of it.
//!
//! Only single-device buses are addressed: commands are broadcast with [Skip ROM](ONEWIRE_SKIP_ROM_CMD).

mod consts;
mod error;
mod traits;
pub use consts::*;
pub use error::OneWireError;
pub use traits::{OneWire, OneWireStatus};

/// Error type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
