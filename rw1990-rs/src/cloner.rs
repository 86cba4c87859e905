use crate::{COOLDOWN_MS, Identifier, read_identifier, write_identifier};
use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireResult};

/// Screen the cloner reports to.
///
/// Implementations decide layout; the cloner only says what to show.
pub trait Ui {
    /// Nothing to do until a key touches the reader.
    fn display_waiting(&mut self);
    /// An identifier was read; writing it is now possible.
    fn display_identifier(&mut self, id: &Identifier);
    /// A write sequence is starting.
    fn display_write_progress(&mut self);
    /// A write sequence finished and the key should be removed.
    fn display_write_complete(&mut self);
}

/// Buttons the cloner samples once per poll.
pub trait Input {
    /// Select/confirm is held.
    ///
    /// A key detected while held is written with the current payload. With
    /// no payload yet the key is read instead, so a blank buffer is never
    /// written.
    fn select_pressed(&mut self) -> bool;
    /// Cancel/back is held.
    fn cancel_pressed(&mut self) -> bool;
}

/// Result of a single [Cloner::poll].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Cancel was pressed; no bus traffic took place.
    Cancelled,
    /// No device answered the reset pulse.
    NoDevice,
    /// A device was read.
    Read(Identifier),
    /// The payload was written to the device.
    Written(Identifier),
}

/// Poll-driven reader/writer of RW1990 keys.
///
/// Each [poll](Cloner::poll) is one `Idle -> {Reading | Writing} -> Idle`
/// transaction. The caller schedules polls, nominally every
/// [POLL_INTERVAL_MS](crate::POLL_INTERVAL_MS).
#[derive(Debug)]
pub struct Cloner<U> {
    ui: U,
    payload: Option<Identifier>,
}

impl<U: Ui> Cloner<U> {
    /// Creates a cloner with no payload.
    pub fn new(ui: U) -> Self {
        Self { ui, payload: None }
    }

    /// Sets the identifier written when select is held, without reading it first.
    pub fn with_payload(mut self, id: Identifier) -> Self {
        self.payload = Some(id);
        self
    }

    /// Identifier that the next write will use.
    pub fn payload(&self) -> Option<Identifier> {
        self.payload
    }

    /// The UI collaborator.
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Shows the waiting screen. Call once before the first poll.
    pub fn start(&mut self) {
        self.ui.display_waiting();
    }

    /// Runs one poll cycle.
    ///
    /// 1. Cancel held: returns [PollOutcome::Cancelled] before touching the bus.
    /// 2. Reset pulse unanswered: returns [PollOutcome::NoDevice].
    /// 3. Select held and a payload is known: writes the payload, shows
    ///    completion, blocks for [COOLDOWN_MS] so the key can be removed,
    ///    then shows the waiting screen again.
    /// 4. Otherwise reads the key, keeps its identifier as the payload and
    ///    shows it.
    ///
    /// # Errors
    /// Hardware errors of the bus master, and [ShortCircuit](embedded_onewire::OneWireError::ShortCircuit)
    /// if the reset found the line shorted. A write that fails puts the
    /// waiting screen back before returning the error.
    pub fn poll<O: OneWire, D: DelayNs, I: Input>(
        &mut self,
        bus: &mut O,
        delay: &mut D,
        input: &mut I,
    ) -> OneWireResult<PollOutcome, O::BusError> {
        if input.cancel_pressed() {
            return Ok(PollOutcome::Cancelled);
        }
        if !bus.presence()? {
            return Ok(PollOutcome::NoDevice);
        }
        if input.select_pressed() {
            if let Some(id) = self.payload {
                self.ui.display_write_progress();
                if let Err(e) = write_identifier(bus, delay, &id) {
                    self.ui.display_waiting();
                    return Err(e);
                }
                self.ui.display_write_complete();
                delay.delay_ms(COOLDOWN_MS);
                self.ui.display_waiting();
                return Ok(PollOutcome::Written(id));
            }
            log::debug!("select held without a payload, reading instead");
        }
        let id = read_identifier(bus)?;
        self.payload = Some(id);
        self.ui.display_identifier(&id);
        Ok(PollOutcome::Read(id))
    }
}
