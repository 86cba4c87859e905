use bitfield_struct::bitfield;
use embedded_onewire::OneWireStatus;

/// Bus status sampled during a reset/presence-detect cycle.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct BusStatus {
    /// A device pulled the line low during the presence-detect window.
    pub(crate) presence_pulse: bool,
    /// The line did not return high after being released before the reset pulse.
    pub(crate) short_detect: bool,
    /// Level of the line at the end of the reset cycle.
    pub logic_level: bool,
    #[bits(5)]
    __: u8,
}

impl OneWireStatus for BusStatus {
    fn presence(&self) -> bool {
        self.presence_pulse()
    }

    fn shortcircuit(&self) -> bool {
        self.short_detect()
    }

    fn logic_level(&self) -> Option<bool> {
        Some(self.logic_level())
    }
}
