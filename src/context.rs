use crate::enums::{Error, FailurePolicy, Interface, PinRole, SpiSettings, PIN_ROLE_COUNT};
use crate::peripherals::Peripherals;
use crate::registry::BusRegistry;
use embedded_hal::digital::v2::OutputPin;
use tracing::{debug, trace};

/// Capacity of the per-display transfer buffer
pub const BUFFER_SIZE: usize = 256;

///
/// Physical GPIO line assigned to each pin role. Unassigned roles are not
/// connected on this board.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wiring {
    lines: [Option<u8>; PIN_ROLE_COUNT],
}

impl Wiring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: PinRole, line: u8) -> Self {
        self.lines[role.index()] = Some(line);
        self
    }

    pub fn set(&mut self, role: PinRole, line: Option<u8>) {
        self.lines[role.index()] = line;
    }

    pub fn line(&self, role: PinRole) -> Option<u8> {
        self.lines[role.index()]
    }

    /// Wired roles with their line numbers
    pub fn wired(&self) -> impl Iterator<Item = (PinRole, u8)> + '_ {
        PinRole::ALL
            .iter()
            .filter_map(|&role| self.line(role).map(|line| (role, line)))
    }
}

///
/// Everything the binding needs to know about one display
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySetup {
    pub interface: Interface,
    /// Index of `/dev/gpiochip<N>`
    pub gpio_chip: u8,
    /// I2C bus number, or packed `0xNM` SPI bus/chip-select
    pub bus: u8,
    /// 8-bit I2C address, read/write bit included
    pub i2c_address: u8,
    pub spi: SpiSettings,
    pub wiring: Wiring,
    pub policy: FailurePolicy,
}

impl Default for DisplaySetup {
    fn default() -> Self {
        Self {
            interface: Interface::HwI2c,
            gpio_chip: 0,
            bus: 0,
            i2c_address: 0x78,
            spi: SpiSettings::default(),
            wiring: Wiring::new(),
            policy: FailurePolicy::default(),
        }
    }
}

/// State of a pin role's GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Role has no physical line
    Unwired,
    /// Wired but not opened yet
    Closed,
    Open,
    /// Opening failed, writes are dropped
    Unusable,
}

enum LineSlot<L> {
    Closed,
    Open(L),
    Unusable,
}

///
/// Per-display state: the opened GPIO lines and the staging buffer for
/// outgoing bus payloads.
///
pub struct DisplayContext<P: Peripherals> {
    setup: DisplaySetup,
    lines: [LineSlot<P::Line>; PIN_ROLE_COUNT],
    buffer: heapless::Vec<u8, BUFFER_SIZE>,
}

impl<P: Peripherals> DisplayContext<P> {
    pub fn new(setup: DisplaySetup) -> Self {
        Self {
            setup,
            lines: core::array::from_fn(|_| LineSlot::Closed),
            buffer: heapless::Vec::new(),
        }
    }

    pub fn setup(&self) -> &DisplaySetup {
        &self.setup
    }

    pub fn line_state(&self, role: PinRole) -> LineState {
        if self.setup.wiring.line(role).is_none() {
            return LineState::Unwired;
        }
        match self.lines[role.index()] {
            LineSlot::Closed => LineState::Closed,
            LineSlot::Open(_) => LineState::Open,
            LineSlot::Unusable => LineState::Unusable,
        }
    }

    ///
    /// Opens the line of `role` as output-high unless the role is unwired or
    /// the line was already opened. A failed open marks the line unusable.
    ///
    pub fn init_line(
        &mut self,
        role: PinRole,
        registry: &mut BusRegistry<P>,
    ) -> Result<(), Error<P::Error>> {
        let Some(line) = self.setup.wiring.line(role) else {
            return Ok(());
        };
        let slot = &mut self.lines[role.index()];
        if !matches!(slot, LineSlot::Closed) {
            return Ok(());
        }
        match registry.open_line(self.setup.gpio_chip, line, role) {
            Ok(handle) => {
                debug!(%role, line, "opened GPIO line");
                *slot = LineSlot::Open(handle);
                Ok(())
            }
            Err(e) => {
                *slot = LineSlot::Unusable;
                Err(e)
            }
        }
    }

    ///
    /// Drives the line of `role`. Unwired roles are ignored without touching
    /// any peripheral.
    ///
    pub fn write_line(&mut self, role: PinRole, high: bool) -> Result<(), Error<P::Error>> {
        if self.setup.wiring.line(role).is_none() {
            return Ok(());
        }
        match &mut self.lines[role.index()] {
            LineSlot::Open(line) => {
                let result = if high { line.set_high() } else { line.set_low() };
                result.map_err(|source| Error::Pin { role, source })
            }
            LineSlot::Closed | LineSlot::Unusable => {
                trace!(%role, high, "line not open, write dropped");
                Ok(())
            }
        }
    }

    ///
    /// Closes every open line and returns how many were closed. Lines that
    /// failed to open become eligible for a new attempt.
    ///
    pub fn close_lines(&mut self) -> usize {
        let mut closed = 0;
        for slot in self.lines.iter_mut() {
            if let LineSlot::Open(_) = core::mem::replace(slot, LineSlot::Closed) {
                closed += 1;
            }
        }
        closed
    }

    /// Empties the staging buffer
    pub fn begin_payload(&mut self) {
        self.buffer.clear();
    }

    /// Appends bytes to the staging buffer
    pub fn stage(&mut self, bytes: &[u8]) -> Result<(), Error<P::Error>> {
        self.buffer
            .extend_from_slice(bytes)
            .map_err(|_| Error::BufferOverflow)
    }

    /// Replaces the staging buffer contents with `bytes`
    pub fn replace_payload(&mut self, bytes: &[u8]) -> Result<(), Error<P::Error>> {
        self.buffer.clear();
        self.stage(bytes)
    }

    pub fn payload(&self) -> &[u8] {
        &self.buffer
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}
