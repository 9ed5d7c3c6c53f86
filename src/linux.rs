//! Peripherals backed by the Linux userspace device interfaces.

use crate::enums::{PinRole, SpiMode, SpiSettings};
use crate::peripherals::{gpio_chip_device, i2c_device, spi_device, Peripherals};
use core::fmt;
use embedded_hal::{
    blocking::{i2c, spi},
    digital::v2::OutputPin,
};
use linux_embedded_hal::{
    gpio_cdev::{self, Chip, LineRequestFlags},
    i2cdev::linux::LinuxI2CError,
    spidev::{SpiModeFlags, SpidevOptions},
    sysfs_gpio, CdevPin, I2cdev, Spidev, SysfsPin,
};
use serde::Deserialize;
use std::io;

///
/// How GPIO lines are requested from the kernel
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpioBackend {
    /// Character device, `/dev/gpiochip<N>`
    #[default]
    Cdev,
    /// Legacy `/sys/class/gpio` interface; the chip index is ignored
    Sysfs,
}

#[derive(Debug)]
pub enum LinuxError {
    Io(io::Error),
    I2c(LinuxI2CError),
    Cdev(gpio_cdev::errors::Error),
    Sysfs(sysfs_gpio::Error),
}

impl fmt::Display for LinuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinuxError::Io(e) => write!(f, "{}", e),
            LinuxError::I2c(e) => write!(f, "{}", e),
            LinuxError::Cdev(e) => write!(f, "{}", e),
            LinuxError::Sysfs(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LinuxError {}

impl From<io::Error> for LinuxError {
    fn from(e: io::Error) -> Self {
        LinuxError::Io(e)
    }
}

impl From<LinuxI2CError> for LinuxError {
    fn from(e: LinuxI2CError) -> Self {
        LinuxError::I2c(e)
    }
}

impl From<gpio_cdev::errors::Error> for LinuxError {
    fn from(e: gpio_cdev::errors::Error) -> Self {
        LinuxError::Cdev(e)
    }
}

impl From<sysfs_gpio::Error> for LinuxError {
    fn from(e: sysfs_gpio::Error) -> Self {
        LinuxError::Sysfs(e)
    }
}

///
/// Opens `/dev/i2c-N`, `/dev/spidevN.M` and GPIO lines through
/// `linux-embedded-hal`.
///
#[derive(Debug, Clone, Default)]
pub struct LinuxPeripherals {
    gpio: GpioBackend,
}

impl LinuxPeripherals {
    pub fn new(gpio: GpioBackend) -> Self {
        Self { gpio }
    }
}

impl Peripherals for LinuxPeripherals {
    type Error = LinuxError;
    type I2c = LinuxI2c;
    type Spi = LinuxSpi;
    type Line = LinuxLine;

    fn open_i2c(&mut self, bus: u8) -> Result<LinuxI2c, LinuxError> {
        Ok(LinuxI2c(I2cdev::new(i2c_device(bus))?))
    }

    fn open_spi(&mut self, bus: u8, settings: &SpiSettings) -> Result<LinuxSpi, LinuxError> {
        let mut spi = Spidev::open(spi_device(bus))?;
        let mode = match settings.mode {
            SpiMode::Mode0 => SpiModeFlags::SPI_MODE_0,
            SpiMode::Mode1 => SpiModeFlags::SPI_MODE_1,
            SpiMode::Mode2 => SpiModeFlags::SPI_MODE_2,
            SpiMode::Mode3 => SpiModeFlags::SPI_MODE_3,
        };
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(settings.speed_hz)
            .lsb_first(false)
            .mode(mode)
            .build();
        spi.configure(&options)?;
        Ok(LinuxSpi(spi))
    }

    fn open_line(&mut self, chip: u8, line: u8, role: PinRole) -> Result<LinuxLine, LinuxError> {
        match self.gpio {
            GpioBackend::Cdev => {
                let mut chip = Chip::new(gpio_chip_device(chip))?;
                let handle = chip.get_line(line as u32)?.request(
                    LineRequestFlags::OUTPUT,
                    1,
                    &format!("monohal-{}", role),
                )?;
                Ok(LinuxLine::Cdev(CdevPin::new(handle)?))
            }
            GpioBackend::Sysfs => {
                let pin = SysfsPin::new(line as u64);
                pin.0.export()?;
                pin.0.set_direction(sysfs_gpio::Direction::High)?;
                Ok(LinuxLine::Sysfs(pin))
            }
        }
    }
}

pub struct LinuxI2c(I2cdev);

impl i2c::Write for LinuxI2c {
    type Error = LinuxError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), LinuxError> {
        i2c::Write::write(&mut self.0, address, bytes).map_err(LinuxError::I2c)
    }
}

pub struct LinuxSpi(Spidev);

impl spi::Transfer<u8> for LinuxSpi {
    type Error = LinuxError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], LinuxError> {
        spi::Transfer::transfer(&mut self.0, words).map_err(LinuxError::Io)
    }
}

pub enum LinuxLine {
    Cdev(CdevPin),
    Sysfs(SysfsPin),
}

impl OutputPin for LinuxLine {
    type Error = LinuxError;

    fn set_low(&mut self) -> Result<(), LinuxError> {
        match self {
            LinuxLine::Cdev(pin) => pin.set_low().map_err(LinuxError::Cdev),
            LinuxLine::Sysfs(pin) => pin.set_low().map_err(LinuxError::Sysfs),
        }
    }

    fn set_high(&mut self) -> Result<(), LinuxError> {
        match self {
            LinuxLine::Cdev(pin) => pin.set_high().map_err(LinuxError::Cdev),
            LinuxLine::Sysfs(pin) => pin.set_high().map_err(LinuxError::Sysfs),
        }
    }
}
