//! Recording collaborators for unit tests.

use crate::{Identifier, Input, Ui};
use core::cell::RefCell;
use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireError, OneWireResult, OneWireStatus};
use std::{rc::Rc, vec::Vec};

/// Something the code under test did, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Reset,
    WriteByte(u8),
    WriteBit(bool),
    ReadByte,
    ReadBit,
    DelayNs(u32),
    DelayMs(u32),
    Show(Screen),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Waiting,
    Identifier(Identifier),
    WriteProgress,
    WriteComplete,
}

/// Shared call log handed to every mock of one test.
#[derive(Debug, Clone, Default)]
pub(crate) struct Log(Rc<RefCell<Vec<Call>>>);

impl Log {
    pub(crate) fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub(crate) fn bus(&self, reset: ResetAnswer, rom: [u8; 8]) -> MockBus {
        MockBus {
            log: self.clone(),
            reset,
            rom,
            cursor: 0,
            resets: 0,
        }
    }

    pub(crate) fn delay(&self) -> MockDelay {
        MockDelay { log: self.clone() }
    }

    pub(crate) fn ui(&self) -> MockUi {
        MockUi { log: self.clone() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResetAnswer {
    Present,
    Absent,
    /// Absence reported as [OneWireError::NoDevicePresent].
    AbsentError,
    Shorted,
    /// Short reported as [OneWireError::ShortCircuit].
    ShortedError,
    /// Hardware error on every reset.
    Broken,
    /// Present for the first `n` resets, then a hardware error.
    BreaksAfter(usize),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MockStatus {
    presence: bool,
    short: bool,
}

impl OneWireStatus for MockStatus {
    fn presence(&self) -> bool {
        self.presence
    }

    fn shortcircuit(&self) -> bool {
        self.short
    }
}

/// Bus that logs every call and replays `rom` on reads.
pub(crate) struct MockBus {
    log: Log,
    reset: ResetAnswer,
    rom: [u8; 8],
    cursor: usize,
    resets: usize,
}

impl OneWire for MockBus {
    type Status = MockStatus;
    type BusError = &'static str;

    fn reset(&mut self) -> OneWireResult<MockStatus, &'static str> {
        self.log.push(Call::Reset);
        self.cursor = 0;
        self.resets += 1;
        let (presence, short) = match self.reset {
            ResetAnswer::Present => (true, false),
            ResetAnswer::BreaksAfter(n) if self.resets <= n => (true, false),
            ResetAnswer::Absent => (false, false),
            ResetAnswer::AbsentError => return Err(OneWireError::NoDevicePresent),
            ResetAnswer::Shorted => (true, true),
            ResetAnswer::ShortedError => return Err(OneWireError::ShortCircuit),
            ResetAnswer::Broken | ResetAnswer::BreaksAfter(_) => {
                return Err(OneWireError::Other("pin stuck"));
            }
        };
        Ok(MockStatus { presence, short })
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), &'static str> {
        self.log.push(Call::WriteByte(byte));
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, &'static str> {
        self.log.push(Call::ReadByte);
        let b = self.rom[self.cursor % 8];
        self.cursor += 1;
        Ok(b)
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), &'static str> {
        self.log.push(Call::WriteBit(bit));
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, &'static str> {
        self.log.push(Call::ReadBit);
        Ok(true)
    }
}

pub(crate) struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Call::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Call::DelayMs(ms));
    }
}

pub(crate) struct MockUi {
    log: Log,
}

impl Ui for MockUi {
    fn display_waiting(&mut self) {
        self.log.push(Call::Show(Screen::Waiting));
    }

    fn display_identifier(&mut self, id: &Identifier) {
        self.log.push(Call::Show(Screen::Identifier(*id)));
    }

    fn display_write_progress(&mut self) {
        self.log.push(Call::Show(Screen::WriteProgress));
    }

    fn display_write_complete(&mut self) {
        self.log.push(Call::Show(Screen::WriteComplete));
    }
}

/// Button state held constant for a whole poll.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Buttons {
    pub(crate) select: bool,
    pub(crate) cancel: bool,
}

impl Input for Buttons {
    fn select_pressed(&mut self) -> bool {
        self.select
    }

    fn cancel_pressed(&mut self) -> bool {
        self.cancel
    }
}

/// The 64 bus calls of a write data phase for `payload`.
pub(crate) fn data_phase(payload: &[u8; 8]) -> Vec<Call> {
    let mut calls = Vec::new();
    for &byte in payload {
        for i in 0..8 {
            calls.push(Call::DelayMs(crate::BIT_DELAY_MS));
            calls.push(Call::WriteBit(byte & (1 << i) == 0));
        }
    }
    calls
}
