use crate::{BusStatus, GpioOneWire};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};
use embedded_onewire::{OneWire, OneWireResult};

/// Interval between line samples while waiting for the line to be released.
const RELEASE_POLL_US: u32 = 2;

impl<P: InputPin + OutputPin, D: DelayNs> GpioOneWire<P, D> {
    /// Releases the line and waits for the pull-up to bring it high.
    ///
    /// Returns `false` if the line is still low after all retries.
    fn wait_released(&mut self) -> Result<bool, P::Error> {
        self.pin.set_high()?;
        for _ in 0..=self.short_retries {
            if self.pin.is_high()? {
                return Ok(true);
            }
            self.delay.delay_us(RELEASE_POLL_US);
        }
        Ok(false)
    }

    /// Drives the line low for `low_us`, releases it, then waits `release_us`.
    fn pulse(&mut self, low_us: u32, release_us: u32) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(low_us);
        self.pin.set_high()?;
        self.delay.delay_us(release_us);
        Ok(())
    }
}

impl<P: InputPin + OutputPin, D: DelayNs> OneWire for GpioOneWire<P, D> {
    type Status = BusStatus;

    type BusError = P::Error;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        let t = self.timing;
        let mut status = BusStatus::new();
        if !self.wait_released()? {
            // no point pulsing a line we cannot release
            return Ok(status.with_short_detect(true));
        }
        self.delay.delay_us(t.g);
        self.pulse(t.h, t.i)?;
        status.set_presence_pulse(self.pin.is_low()?);
        self.delay.delay_us(t.j);
        status.set_logic_level(self.pin.is_high()?);
        Ok(status)
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        let t = self.timing;
        if bit {
            self.pulse(t.a, t.b)?;
        } else {
            self.pulse(t.c, t.d)?;
        }
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        let t = self.timing;
        self.pulse(t.a, t.e)?;
        let bit = self.pin.is_high()?;
        self.delay.delay_us(t.f);
        Ok(bit)
    }
}
