use clap::Parser;
use embedded_hal::delay::DelayNs;
use linux_embedded_hal::{
    CdevPin, Delay,
    gpio_cdev::{Chip, LineRequestFlags, errors::Error as GpioError},
};
use onewire_gpio::GpioOneWireBuilder;
use rw1990::{Cloner, Identifier, OneWireError, POLL_INTERVAL_MS, PollOutcome};

mod panel;

use panel::{PanelButtons, TerminalUi};

/// Read RW1990 iButtons and clone them onto blank keys.
///
/// Touch a key to the reader to read it. Hold select while touching a
/// blank key to write the last identifier read. Press cancel to quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the GPIO character device (e.g., /dev/gpiochip0)
    #[arg(short, long, default_value = "/dev/gpiochip0")]
    chip: String,
    /// Line offset of the 1-Wire data line
    #[arg(short, long)]
    data: u32,
    /// Line offset of the select button (active low)
    #[arg(short, long)]
    select: u32,
    /// Line offset of the cancel button (active low)
    #[arg(short = 'x', long)]
    cancel: u32,
    /// Identifier to write without reading a key first (16 hex digits)
    #[arg(short, long)]
    payload: Option<Identifier>,
}

fn request(
    chip: &mut Chip,
    offset: u32,
    flags: LineRequestFlags,
    default: u8,
    label: &str,
) -> Result<CdevPin, GpioError> {
    let handle = chip.get_line(offset)?.request(flags, default, label)?;
    CdevPin::new(handle)
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Open the GPIO chip and claim the lines
    let mut chip = Chip::new(&args.chip).expect("Failed to open GPIO chip");
    let data = request(
        &mut chip,
        args.data,
        LineRequestFlags::OUTPUT | LineRequestFlags::OPEN_DRAIN,
        1,
        "rw1990-data",
    )
    .expect("Failed to request 1-Wire data line");
    let select = request(&mut chip, args.select, LineRequestFlags::INPUT, 0, "rw1990-select")
        .expect("Failed to request select button line");
    let cancel = request(&mut chip, args.cancel, LineRequestFlags::INPUT, 0, "rw1990-cancel")
        .expect("Failed to request cancel button line");
    let mut buttons = PanelButtons::new(select, cancel);
    // Bit-banged bus master on the data line
    let mut bus = GpioOneWireBuilder::default()
        .build(data, Delay)
        .expect("Failed to release 1-Wire data line");
    let mut delay = Delay;

    let mut cloner = Cloner::new(TerminalUi::new(std::io::stdout()));
    if let Some(id) = args.payload {
        log::info!("Payload set to {}", id);
        cloner = cloner.with_payload(id);
    }
    cloner.start();
    loop {
        match cloner.poll(&mut bus, &mut delay, &mut buttons) {
            Ok(PollOutcome::Cancelled) => break,
            Ok(PollOutcome::NoDevice) => {}
            Ok(PollOutcome::Read(id)) => log::debug!("Read {}", id),
            Ok(PollOutcome::Written(id)) => log::info!("Wrote {}", id),
            Err(e @ OneWireError::ShortCircuit) => log::warn!("{}", e),
            Err(e) => log::error!("{}", e),
        }
        delay.delay_ms(POLL_INTERVAL_MS);
    }
    if let Some(id) = cloner.payload() {
        log::info!("Last identifier: {}", id);
    }
}
