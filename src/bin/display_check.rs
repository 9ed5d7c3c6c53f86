//! Drives a display's init and reset sequence through the Linux binding
//! and reports which lines and buses came up.
//!
//! Usage: `display-check [config.toml]`, default `monohal.toml`.

use anyhow::{anyhow, Context, Result};
use monohal::{
    BusRegistry, ByteMessage, Config, Delay, DisplayBinding, Error, GpioMessage, Interface,
    LineState, LinuxError, LinuxPeripherals, PinRole,
};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "monohal.toml";

/// Reset pulse of a typical monochrome controller
const RESET_SEQUENCE: [GpioMessage; 6] = [
    GpioMessage::Gpio(PinRole::Reset, true),
    GpioMessage::Delay(Delay::Millis(1)),
    GpioMessage::Gpio(PinRole::Reset, false),
    GpioMessage::Delay(Delay::Millis(10)),
    GpioMessage::Gpio(PinRole::Reset, true),
    GpioMessage::Delay(Delay::Millis(10)),
];

fn checked<T>(result: Result<T, Error<LinuxError>>, step: &str) -> Result<T> {
    result.map_err(|e| anyhow!("{}: {}", step, e))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = Config::load(&path).with_context(|| format!("loading {}", path))?;
    let display = config
        .display
        .ok_or_else(|| anyhow!("{} has no [display] table", path))?;
    let setup = display.setup().with_context(|| format!("checking {}", path))?;
    let interface = setup.interface;
    let bus = setup.bus;

    let mut registry = BusRegistry::new(LinuxPeripherals::new(display.gpio_backend));
    let mut binding = DisplayBinding::new(setup);

    checked(
        binding.gpio_and_delay(&mut registry, GpioMessage::Init),
        "GPIO init",
    )?;
    for message in RESET_SEQUENCE {
        checked(binding.gpio_and_delay(&mut registry, message), "reset")?;
    }
    checked(binding.byte(&mut registry, ByteMessage::Init), "bus init")?;

    for role in PinRole::ALL {
        match binding.context().line_state(role) {
            LineState::Unwired => {}
            LineState::Unusable => warn!(%role, "line unusable"),
            state => info!(%role, ?state, "line"),
        }
    }
    let bus_open = match interface {
        Interface::HwI2c => registry.is_i2c_open(bus),
        Interface::HwSpi => registry.is_spi_open(bus),
    };
    if bus_open {
        info!(?interface, bus, "bus open");
    } else {
        warn!(?interface, bus, "bus not open");
    }

    let lines = binding.teardown();
    let buses = registry.close_all();
    info!(lines, buses, "closed");
    Ok(())
}
