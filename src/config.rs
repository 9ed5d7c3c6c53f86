//! TOML configuration for the display binding and the menu demo.
//!
//! ```toml
//! [display]
//! interface = "spi"
//! gpio_chip = 0
//! bus = 0x00            # /dev/spidev0.0
//! failure_policy = "log"
//!
//! [display.spi]
//! mode = 0
//! speed_hz = 500000
//!
//! [display.pins]
//! dc = 24
//! reset = 25
//!
//! [menu]
//! width = 128
//! height = 64
//! ```

use crate::context::{DisplaySetup, Wiring};
use crate::enums::{FailurePolicy, Interface, PinRole, SpiMode, SpiSettings};
use crate::linux::GpioBackend;
use crate::registry::MAX_I2C_HANDLES;
use core::fmt;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid configuration: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub display: Option<DisplayConfig>,
    #[serde(default)]
    pub menu: MenuConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    I2c,
    Spi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Log,
    Propagate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub interface: InterfaceKind,
    #[serde(default)]
    pub gpio_chip: u8,
    #[serde(default)]
    pub bus: u8,
    #[serde(default = "default_i2c_address")]
    pub i2c_address: u8,
    #[serde(default)]
    pub gpio_backend: GpioBackend,
    #[serde(default)]
    pub failure_policy: PolicyKind,
    #[serde(default)]
    pub spi: SpiConfig,
    #[serde(default)]
    pub pins: PinsConfig,
}

fn default_i2c_address() -> u8 {
    0x78
}

impl DisplayConfig {
    ///
    /// Validates the table and turns it into the binding's setup.
    ///
    pub fn setup(&self) -> Result<DisplaySetup, ConfigError> {
        let interface = match self.interface {
            InterfaceKind::I2c => {
                if self.bus as usize >= MAX_I2C_HANDLES {
                    return Err(ConfigError::Invalid(format!(
                        "I2C bus {} exceeds the {} supported buses",
                        self.bus, MAX_I2C_HANDLES
                    )));
                }
                Interface::HwI2c
            }
            InterfaceKind::Spi => Interface::HwSpi,
        };
        let mode = SpiMode::from_number(self.spi.mode).ok_or_else(|| {
            ConfigError::Invalid(format!("SPI mode {} is not 0..=3", self.spi.mode))
        })?;
        if self.spi.speed_hz == 0 {
            return Err(ConfigError::Invalid("SPI speed must be non-zero".into()));
        }
        Ok(DisplaySetup {
            interface,
            gpio_chip: self.gpio_chip,
            bus: self.bus,
            i2c_address: self.i2c_address,
            spi: SpiSettings {
                mode,
                speed_hz: self.spi.speed_hz,
            },
            wiring: self.pins.wiring(),
            policy: match self.failure_policy {
                PolicyKind::Log => FailurePolicy::LogAndContinue,
                PolicyKind::Propagate => FailurePolicy::Propagate,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpiConfig {
    #[serde(default)]
    pub mode: u8,
    #[serde(default = "default_spi_speed")]
    pub speed_hz: u32,
}

fn default_spi_speed() -> u32 {
    500_000
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            mode: 0,
            speed_hz: default_spi_speed(),
        }
    }
}

/// GPIO line per pin role; absent roles are not connected
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinsConfig {
    #[serde(alias = "spi_clock")]
    pub d0: Option<u8>,
    #[serde(alias = "spi_data")]
    pub d1: Option<u8>,
    pub d2: Option<u8>,
    pub d3: Option<u8>,
    pub d4: Option<u8>,
    pub d5: Option<u8>,
    pub d6: Option<u8>,
    pub d7: Option<u8>,
    pub e: Option<u8>,
    pub cs: Option<u8>,
    pub dc: Option<u8>,
    pub reset: Option<u8>,
    pub i2c_clock: Option<u8>,
    pub i2c_data: Option<u8>,
    pub cs1: Option<u8>,
    pub cs2: Option<u8>,
}

impl PinsConfig {
    pub fn wiring(&self) -> Wiring {
        let mut wiring = Wiring::new();
        for role in PinRole::ALL {
            wiring.set(role, self.line(role));
        }
        wiring
    }

    fn line(&self, role: PinRole) -> Option<u8> {
        match role {
            PinRole::D0 => self.d0,
            PinRole::D1 => self.d1,
            PinRole::D2 => self.d2,
            PinRole::D3 => self.d3,
            PinRole::D4 => self.d4,
            PinRole::D5 => self.d5,
            PinRole::D6 => self.d6,
            PinRole::D7 => self.d7,
            PinRole::E => self.e,
            PinRole::Cs => self.cs,
            PinRole::Dc => self.dc,
            PinRole::Reset => self.reset,
            PinRole::I2cClock => self.i2c_clock,
            PinRole::I2cData => self.i2c_data,
            PinRole::Cs1 => self.cs1,
            PinRole::Cs2 => self.cs2,
        }
    }
}

///
/// Frame size of the menu demo
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    128
}

fn default_height() -> u32 {
    64
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spi_display_config() {
        let config = Config::from_toml(
            r#"
            [display]
            interface = "spi"
            gpio_chip = 1
            bus = 0x12
            failure_policy = "propagate"

            [display.spi]
            mode = 3
            speed_hz = 8000000

            [display.pins]
            spi_clock = 11
            dc = 24
            reset = 25
            "#,
        )
        .unwrap();
        let setup = config.display.unwrap().setup().unwrap();

        assert_eq!(setup.interface, Interface::HwSpi);
        assert_eq!(setup.gpio_chip, 1);
        assert_eq!(setup.bus, 0x12);
        assert_eq!(setup.spi.mode, SpiMode::Mode3);
        assert_eq!(setup.spi.speed_hz, 8_000_000);
        assert_eq!(setup.policy, FailurePolicy::Propagate);
        assert_eq!(setup.wiring.line(PinRole::SPI_CLOCK), Some(11));
        assert_eq!(setup.wiring.line(PinRole::Dc), Some(24));
        assert_eq!(setup.wiring.line(PinRole::Cs), None);
        assert_eq!(setup.wiring.wired().count(), 3);
    }

    #[test]
    fn i2c_defaults() {
        let config = Config::from_toml("[display]\ninterface = \"i2c\"\nbus = 1\n").unwrap();
        let display = config.display.unwrap();
        assert_eq!(display.gpio_backend, GpioBackend::Cdev);
        let setup = display.setup().unwrap();
        assert_eq!(setup.i2c_address, 0x78);
        assert_eq!(setup.policy, FailurePolicy::LogAndContinue);
        assert_eq!(setup.spi, SpiSettings::default());
        assert_eq!(config.menu, MenuConfig::default());
    }

    #[test]
    fn sysfs_backend() {
        let config =
            Config::from_toml("[display]\ninterface = \"i2c\"\ngpio_backend = \"sysfs\"\n").unwrap();
        assert_eq!(config.display.unwrap().gpio_backend, GpioBackend::Sysfs);
    }

    #[test]
    fn rejects_bad_values() {
        let config = Config::from_toml("[display]\ninterface = \"i2c\"\nbus = 16\n").unwrap();
        assert!(matches!(config.display.unwrap().setup(), Err(ConfigError::Invalid(_))));

        let config =
            Config::from_toml("[display]\ninterface = \"spi\"\n[display.spi]\nmode = 4\n").unwrap();
        assert!(matches!(config.display.unwrap().setup(), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            Config::from_toml("[display]\ninterface = \"parallel\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("[display]\ninterface = \"i2c\"\n[display.pins]\nbacklight = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn empty_file_has_no_display() {
        let config = Config::from_toml("").unwrap();
        assert!(config.display.is_none());
        assert_eq!(config.menu.width, 128);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::load("/nonexistent/monohal.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
