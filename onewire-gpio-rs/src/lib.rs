#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/*! # onewire-gpio
 *
 * Bit-banged 1-Wire bus master on a single open-drain GPIO pin.
 *
 * The pin must read back the real line level while it is released
 * (open-drain output with an external or internal pull-up). Slot timing
 * follows the standard-speed values of Analog Devices application note 126.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult, OneWireStatus};
mod onewire;
mod status;

pub use status::BusStatus;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

/// Default number of times the line is polled for release before a reset
/// pulse, 2µs apart.
pub const DEFAULT_SHORT_RETRIES: u8 = 125;

/// 1-Wire slot timing, in microseconds.
///
/// Field names follow the A..J parameters of application note 126.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTiming {
    /// Write-one and read-initiate low time.
    pub a: u32,
    /// Write-one recovery.
    pub b: u32,
    /// Write-zero low time.
    pub c: u32,
    /// Write-zero recovery.
    pub d: u32,
    /// Read sample offset after release.
    pub e: u32,
    /// Read slot recovery.
    pub f: u32,
    /// Delay before the reset pulse.
    pub g: u32,
    /// Reset pulse low time.
    pub h: u32,
    /// Presence sample offset after release.
    pub i: u32,
    /// Presence slot recovery.
    pub j: u32,
}

impl SlotTiming {
    /// Standard speed timing.
    pub const STANDARD: Self = Self {
        a: 6,
        b: 64,
        c: 60,
        d: 10,
        e: 9,
        f: 55,
        g: 0,
        h: 480,
        i: 70,
        j: 410,
    };
}

impl Default for SlotTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A bit-banged 1-Wire bus master.
///
/// Takes ownership of a GPIO pin (implementing both [`InputPin`](embedded_hal::digital::InputPin)
/// and [`OutputPin`](embedded_hal::digital::OutputPin)) and a timer object implementing the
/// [`DelayNs`](embedded_hal::delay::DelayNs) trait. Setting the pin high releases the line.
pub struct GpioOneWire<P, D> {
    pub(crate) pin: P,
    pub(crate) delay: D,
    pub(crate) timing: SlotTiming,
    pub(crate) short_retries: u8,
}

/// Builder for creating a [`GpioOneWire`] instance with custom configuration.
#[derive(Debug, Clone, Copy)]
pub struct GpioOneWireBuilder {
    pub(crate) timing: SlotTiming,
    pub(crate) short_retries: u8,
}

impl Default for GpioOneWireBuilder {
    fn default() -> Self {
        GpioOneWireBuilder {
            timing: SlotTiming::STANDARD,
            short_retries: DEFAULT_SHORT_RETRIES,
        }
    }
}

impl GpioOneWireBuilder {
    /// Sets the slot timing.
    pub fn with_timing(mut self, timing: SlotTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the retry count for the short-circuit check.
    ///
    /// Before every reset pulse the line is released and polled
    /// this many times, 2µs apart. If it never reads high the
    /// bus is reported as shorted.
    pub fn with_short_retries(mut self, retries: u8) -> Self {
        self.short_retries = retries;
        self
    }

    /// Builds a new `GpioOneWire` instance, leaving the line released.
    pub fn build<P: InputPin + OutputPin, D: DelayNs>(
        self,
        mut pin: P,
        delay: D,
    ) -> Result<GpioOneWire<P, D>, P::Error> {
        pin.set_high()?;
        Ok(GpioOneWire {
            pin,
            delay,
            timing: self.timing,
            short_retries: self.short_retries,
        })
    }
}

impl<P, D> GpioOneWire<P, D> {
    /// Slot timing in use.
    pub fn timing(&self) -> SlotTiming {
        self.timing
    }

    /// Releases the pin and the delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
