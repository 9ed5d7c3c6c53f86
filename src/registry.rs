use crate::enums::{Error, PinRole, SpiSettings};
use crate::peripherals::{gpio_chip_device, i2c_device, spi_device, Peripherals};
use tracing::debug;

/// Size of the I2C handle table
pub const MAX_I2C_HANDLES: usize = 16;
/// Size of the SPI handle table, one slot per packed `0xNM` bus index
pub const MAX_SPI_HANDLES: usize = 256;

///
/// Bus handles shared by every display wired to the same bus.
///
/// The first display that initialises a bus opens it, later ones reuse the
/// handle. [`close_all`](Self::close_all) closes everything at shutdown.
///
pub struct BusRegistry<P: Peripherals> {
    peripherals: P,
    i2c: [Option<P::I2c>; MAX_I2C_HANDLES],
    spi: [Option<P::Spi>; MAX_SPI_HANDLES],
}

impl<P: Peripherals> BusRegistry<P> {
    pub fn new(peripherals: P) -> Self {
        Self {
            peripherals,
            i2c: core::array::from_fn(|_| None),
            spi: core::array::from_fn(|_| None),
        }
    }

    ///
    /// Returns the handle for I2C bus `bus`, opening `/dev/i2c-<bus>` if it
    /// is not open yet. A failed open leaves the slot empty.
    ///
    pub fn open_i2c(&mut self, bus: u8) -> Result<&mut P::I2c, Error<P::Error>> {
        let slot = self
            .i2c
            .get_mut(bus as usize)
            .ok_or(Error::BusIndexOutOfRange(bus))?;
        let handle = match slot.take() {
            Some(handle) => handle,
            None => {
                let device = i2c_device(bus);
                let handle = self.peripherals.open_i2c(bus).map_err(|source| Error::Open {
                    device: device.display().to_string(),
                    source,
                })?;
                debug!(device = %device.display(), "opened I2C bus");
                handle
            }
        };
        Ok(slot.insert(handle))
    }

    ///
    /// Returns the handle for SPI bus `bus`, opening `/dev/spidevN.M` with
    /// `settings` if it is not open yet. Settings of later callers are
    /// ignored once the bus is open.
    ///
    pub fn open_spi(
        &mut self,
        bus: u8,
        settings: &SpiSettings,
    ) -> Result<&mut P::Spi, Error<P::Error>> {
        let slot = self
            .spi
            .get_mut(bus as usize)
            .ok_or(Error::BusIndexOutOfRange(bus))?;
        let handle = match slot.take() {
            Some(handle) => handle,
            None => {
                let device = spi_device(bus);
                let handle = self
                    .peripherals
                    .open_spi(bus, settings)
                    .map_err(|source| Error::Open {
                        device: device.display().to_string(),
                        source,
                    })?;
                debug!(device = %device.display(), mode = ?settings.mode, speed_hz = settings.speed_hz, "opened SPI bus");
                handle
            }
        };
        Ok(slot.insert(handle))
    }

    pub fn i2c_mut(&mut self, bus: u8) -> Option<&mut P::I2c> {
        self.i2c.get_mut(bus as usize).and_then(Option::as_mut)
    }

    pub fn spi_mut(&mut self, bus: u8) -> Option<&mut P::Spi> {
        self.spi.get_mut(bus as usize).and_then(Option::as_mut)
    }

    pub fn is_i2c_open(&self, bus: u8) -> bool {
        matches!(self.i2c.get(bus as usize), Some(Some(_)))
    }

    pub fn is_spi_open(&self, bus: u8) -> bool {
        matches!(self.spi.get(bus as usize), Some(Some(_)))
    }

    /// Number of open I2C and SPI handles
    pub fn open_count(&self) -> usize {
        self.i2c.iter().filter(|slot| slot.is_some()).count()
            + self.spi.iter().filter(|slot| slot.is_some()).count()
    }

    ///
    /// Opens a GPIO line for a display. Lines are owned by the display, not
    /// by the registry.
    ///
    pub fn open_line(
        &mut self,
        chip: u8,
        line: u8,
        role: PinRole,
    ) -> Result<P::Line, Error<P::Error>> {
        self.peripherals
            .open_line(chip, line, role)
            .map_err(|source| Error::Open {
                device: format!("{} line {}", gpio_chip_device(chip).display(), line),
                source,
            })
    }

    ///
    /// Closes every open bus handle and returns how many were closed.
    ///
    pub fn close_all(&mut self) -> usize {
        let mut closed = 0;
        for (bus, slot) in self.i2c.iter_mut().enumerate() {
            if slot.take().is_some() {
                debug!(device = %i2c_device(bus as u8).display(), "closed I2C bus");
                closed += 1;
            }
        }
        for (bus, slot) in self.spi.iter_mut().enumerate() {
            if slot.take().is_some() {
                debug!(device = %spi_device(bus as u8).display(), "closed SPI bus");
                closed += 1;
            }
        }
        closed
    }
}
