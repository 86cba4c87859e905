//! Terminal screen and push buttons for the cloner.

use embedded_hal::digital::InputPin;
use rw1990::{Identifier, Input, Ui};
use std::io::Write;

/// Prints each screen as a block of lines.
pub struct TerminalUi<W> {
    out: W,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn show(&mut self, lines: &[&dyn std::fmt::Display]) {
        let res = lines
            .iter()
            .try_for_each(|l| writeln!(self.out, "{l}"))
            .and_then(|_| writeln!(self.out))
            .and_then(|_| self.out.flush());
        if let Err(e) = res {
            log::warn!("Failed to update screen: {}", e);
        }
    }
}

impl<W: Write> Ui for TerminalUi<W> {
    fn display_waiting(&mut self) {
        self.show(&[&"Waiting iButton..."]);
    }

    fn display_identifier(&mut self, id: &Identifier) {
        self.show(&[&"iButton ID:", id, &"Hold OK to copy"]);
    }

    fn display_write_progress(&mut self) {
        self.show(&[&"Wait..."]);
    }

    fn display_write_complete(&mut self) {
        self.show(&[&"COPIED", &"Release button"]);
    }
}

/// Select and cancel buttons, both pulling their line low when pressed.
pub struct PanelButtons<P> {
    select: P,
    cancel: P,
}

impl<P: InputPin> PanelButtons<P> {
    pub fn new(select: P, cancel: P) -> Self {
        Self { select, cancel }
    }
}

fn pressed<P: InputPin>(pin: &mut P, name: &str) -> bool {
    pin.is_low().unwrap_or_else(|e| {
        log::warn!("Failed to sample {} button: {:?}", name, e);
        false
    })
}

impl<P: InputPin> Input for PanelButtons<P> {
    fn select_pressed(&mut self) -> bool {
        pressed(&mut self.select, "select")
    }

    fn cancel_pressed(&mut self) -> bool {
        pressed(&mut self.cancel, "cancel")
    }
}
