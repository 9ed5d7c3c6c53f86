//! Recording peripheral backend for unit tests.

use crate::enums::{PinRole, SpiSettings};
use crate::peripherals::Peripherals;
use core::fmt;
use embedded_hal::{
    blocking::{i2c, spi},
    digital::v2::OutputPin,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    OpenI2c(u8),
    OpenSpi(u8, SpiSettings),
    OpenLine { chip: u8, line: u8 },
    CloseI2c(u8),
    CloseSpi(u8),
    CloseLine(u8),
    I2cWrite { bus: u8, address: u8, bytes: Vec<u8> },
    SpiTransfer { bus: u8, bytes: Vec<u8> },
    LineWrite { line: u8, high: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeError(pub &'static str);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Shared log of everything the fake peripherals were asked to do
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn i2c_writes(&self) -> Vec<Event> {
        self.filtered(|e| matches!(e, Event::I2cWrite { .. }))
    }

    pub fn spi_transfers(&self) -> Vec<Event> {
        self.filtered(|e| matches!(e, Event::SpiTransfer { .. }))
    }

    pub fn line_writes(&self) -> Vec<Event> {
        self.filtered(|e| matches!(e, Event::LineWrite { .. }))
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn filtered(&self, predicate: impl Fn(&Event) -> bool) -> Vec<Event> {
        self.0.borrow().iter().filter(|e| predicate(e)).cloned().collect()
    }
}

#[derive(Debug, Default)]
pub struct FakePeripherals {
    pub journal: Journal,
    /// I2C buses whose open fails
    pub fail_i2c: Vec<u8>,
    /// SPI buses whose open fails
    pub fail_spi: Vec<u8>,
    /// GPIO lines whose open fails
    pub fail_lines: Vec<u8>,
}

impl FakePeripherals {
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl Peripherals for FakePeripherals {
    type Error = FakeError;
    type I2c = FakeI2c;
    type Spi = FakeSpi;
    type Line = FakeLine;

    fn open_i2c(&mut self, bus: u8) -> Result<FakeI2c, FakeError> {
        if self.fail_i2c.contains(&bus) {
            return Err(FakeError("no such device"));
        }
        self.journal.push(Event::OpenI2c(bus));
        Ok(FakeI2c {
            bus,
            journal: self.journal.clone(),
        })
    }

    fn open_spi(&mut self, bus: u8, settings: &SpiSettings) -> Result<FakeSpi, FakeError> {
        if self.fail_spi.contains(&bus) {
            return Err(FakeError("no such device"));
        }
        self.journal.push(Event::OpenSpi(bus, *settings));
        Ok(FakeSpi {
            bus,
            journal: self.journal.clone(),
        })
    }

    fn open_line(&mut self, chip: u8, line: u8, _role: PinRole) -> Result<FakeLine, FakeError> {
        if self.fail_lines.contains(&line) {
            return Err(FakeError("device or resource busy"));
        }
        self.journal.push(Event::OpenLine { chip, line });
        Ok(FakeLine {
            line,
            journal: self.journal.clone(),
        })
    }
}

#[derive(Debug)]
pub struct FakeI2c {
    bus: u8,
    journal: Journal,
}

impl i2c::Write for FakeI2c {
    type Error = FakeError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), FakeError> {
        self.journal.push(Event::I2cWrite {
            bus: self.bus,
            address,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

impl Drop for FakeI2c {
    fn drop(&mut self) {
        self.journal.push(Event::CloseI2c(self.bus));
    }
}

#[derive(Debug)]
pub struct FakeSpi {
    bus: u8,
    journal: Journal,
}

impl spi::Transfer<u8> for FakeSpi {
    type Error = FakeError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], FakeError> {
        self.journal.push(Event::SpiTransfer {
            bus: self.bus,
            bytes: words.to_vec(),
        });
        Ok(words)
    }
}

impl Drop for FakeSpi {
    fn drop(&mut self) {
        self.journal.push(Event::CloseSpi(self.bus));
    }
}

#[derive(Debug)]
pub struct FakeLine {
    line: u8,
    journal: Journal,
}

impl OutputPin for FakeLine {
    type Error = FakeError;

    fn set_low(&mut self) -> Result<(), FakeError> {
        self.journal.push(Event::LineWrite {
            line: self.line,
            high: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), FakeError> {
        self.journal.push(Event::LineWrite {
            line: self.line,
            high: true,
        });
        Ok(())
    }
}

impl Drop for FakeLine {
    fn drop(&mut self) {
        self.journal.push(Event::CloseLine(self.line));
    }
}
