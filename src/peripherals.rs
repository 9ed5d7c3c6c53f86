//! Peripheral access seam.
//!
//! [`Peripherals`] is implemented by whatever opens GPIO lines, I2C buses and
//! SPI buses. [`LinuxPeripherals`](crate::linux::LinuxPeripherals) talks to
//! the kernel's userspace interfaces; tests substitute a recording fake.

use crate::enums::{PinRole, SpiSettings};
use core::fmt;
use embedded_hal::{
    blocking::{i2c, spi},
    digital::v2::OutputPin,
};
use std::path::PathBuf;

///
/// Opens handles to the peripherals a display is wired to. Handles are
/// closed by dropping them.
///
pub trait Peripherals {
    type Error: fmt::Debug + fmt::Display;
    type I2c: i2c::Write<Error = Self::Error>;
    type Spi: spi::Transfer<u8, Error = Self::Error>;
    type Line: OutputPin<Error = Self::Error>;

    fn open_i2c(&mut self, bus: u8) -> Result<Self::I2c, Self::Error>;

    fn open_spi(&mut self, bus: u8, settings: &SpiSettings) -> Result<Self::Spi, Self::Error>;

    ///
    /// Opens `line` on GPIO chip `chip` as an output driven high.
    ///
    fn open_line(&mut self, chip: u8, line: u8, role: PinRole) -> Result<Self::Line, Self::Error>;
}

/// `/dev/gpiochip<chip>`
pub fn gpio_chip_device(chip: u8) -> PathBuf {
    PathBuf::from(format!("/dev/gpiochip{}", chip))
}

/// `/dev/i2c-<bus>`
pub fn i2c_device(bus: u8) -> PathBuf {
    PathBuf::from(format!("/dev/i2c-{}", bus))
}

///
/// SPI bus indices pack bus and chip select into nibbles: `0x12` is
/// `/dev/spidev1.2`.
///
pub fn spi_device(bus: u8) -> PathBuf {
    PathBuf::from(format!("/dev/spidev{}.{}", bus >> 4, bus & 0x0f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_paths() {
        assert_eq!(gpio_chip_device(0), PathBuf::from("/dev/gpiochip0"));
        assert_eq!(i2c_device(1), PathBuf::from("/dev/i2c-1"));
        assert_eq!(spi_device(0x12), PathBuf::from("/dev/spidev1.2"));
        assert_eq!(spi_device(0x00), PathBuf::from("/dev/spidev0.0"));
    }
}
