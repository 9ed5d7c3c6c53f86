use core::fmt;

/// Number of pin roles a display can wire up
pub const PIN_ROLE_COUNT: usize = 16;

///
/// Logical signal of a display, independent of the physical GPIO line it is
/// wired to. Discriminants follow the display-driver pin numbering.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinRole {
    /// D0 in 8080 mode, SPI clock otherwise
    D0 = 0,
    /// D1 in 8080 mode, SPI data otherwise
    D1 = 1,
    D2 = 2,
    D3 = 3,
    D4 = 4,
    D5 = 5,
    D6 = 6,
    D7 = 7,
    /// Enable / write strobe
    E = 8,
    Cs = 9,
    Dc = 10,
    Reset = 11,
    I2cClock = 12,
    I2cData = 13,
    Cs1 = 14,
    Cs2 = 15,
}

impl PinRole {
    pub const SPI_CLOCK: Self = Self::D0;
    pub const SPI_DATA: Self = Self::D1;

    pub const ALL: [Self; PIN_ROLE_COUNT] = [
        Self::D0,
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::E,
        Self::Cs,
        Self::Dc,
        Self::Reset,
        Self::I2cClock,
        Self::I2cData,
        Self::Cs1,
        Self::Cs2,
    ];

    /// Roles opened by a GPIO init event, in opening order
    pub const INIT_ORDER: [Self; 14] = [
        Self::SPI_CLOCK,
        Self::SPI_DATA,
        Self::Cs,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::E,
        Self::Reset,
        Self::Dc,
        Self::I2cData,
        Self::I2cClock,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Name used for the role in configuration files and GPIO consumer labels
    pub fn name(self) -> &'static str {
        match self {
            Self::D0 => "d0",
            Self::D1 => "d1",
            Self::D2 => "d2",
            Self::D3 => "d3",
            Self::D4 => "d4",
            Self::D5 => "d5",
            Self::D6 => "d6",
            Self::D7 => "d7",
            Self::E => "e",
            Self::Cs => "cs",
            Self::Dc => "dc",
            Self::Reset => "reset",
            Self::I2cClock => "i2c_clock",
            Self::I2cData => "i2c_data",
            Self::Cs1 => "cs1",
            Self::Cs2 => "cs2",
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// SPI clock polarity/phase combination
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl SpiMode {
    pub fn from_number(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Self::Mode0),
            1 => Some(Self::Mode1),
            2 => Some(Self::Mode2),
            3 => Some(Self::Mode3),
            _ => None,
        }
    }
}

/// SPI settings a display requests when its bus is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiSettings {
    pub mode: SpiMode,
    pub speed_hz: u32,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            mode: SpiMode::Mode0,
            speed_hz: 500_000,
        }
    }
}

///
/// Byte transport a display is attached through
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    HwI2c,
    HwSpi,
}

///
/// What the binding does when a peripheral operation fails
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and report the message as handled
    #[default]
    LogAndContinue,
    /// Return the failure to the caller
    Propagate,
}

///
/// Errors raised by the binding. `E` is the peripheral backend's error.
///
#[derive(Debug)]
pub enum Error<E> {
    /// Opening a device node or GPIO line failed
    Open { device: String, source: E },
    /// Writing a GPIO line failed
    Pin { role: PinRole, source: E },
    /// An I2C or SPI transfer failed
    Bus { bus: u8, source: E },
    /// Transfer requested on a bus that was never opened
    BusNotOpen(u8),
    /// Bus index does not fit the handle table
    BusIndexOutOfRange(u8),
    /// Staged payload exceeds the transfer buffer
    BufferOverflow,
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open { device, source } => write!(f, "cannot open {}: {}", device, source),
            Error::Pin { role, source } => write!(f, "writing {} line failed: {}", role, source),
            Error::Bus { bus, source } => write!(f, "transfer on bus {:#04x} failed: {}", bus, source),
            Error::BusNotOpen(bus) => write!(f, "bus {:#04x} is not open", bus),
            Error::BusIndexOutOfRange(bus) => write!(f, "bus index {:#04x} out of range", bus),
            Error::BufferOverflow => f.write_str("transfer buffer overflow"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for Error<E> {}
