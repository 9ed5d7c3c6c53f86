//! This crate binds monochrome display drivers to Linux GPIO, I2C and SPI.
//!
//! A display driver library talks to its hardware through two callbacks:
//! one for GPIO levels and delays, one for the byte transport. A
//! [`DisplayBinding`] answers both, opening GPIO lines on first use and
//! sharing I2C/SPI handles through a [`BusRegistry`] owned by the
//! application.
//!
//! With the `menu` feature the crate also carries a small modal menu demo
//! rendered with `embedded-graphics`.

pub mod binding;
pub mod config;
pub mod context;
pub mod delay;
pub mod enums;
#[cfg(feature = "graphics")]
pub mod framebuffer;
pub mod linux;
#[cfg(feature = "menu")]
pub mod menu;
pub mod message;
pub mod peripherals;
pub mod registry;

#[cfg(test)]
mod testing;

pub use crate::binding::DisplayBinding;
pub use crate::config::{Config, ConfigError};
pub use crate::context::{DisplayContext, DisplaySetup, LineState, Wiring, BUFFER_SIZE};
pub use crate::enums::{Error, FailurePolicy, Interface, PinRole, SpiMode, SpiSettings};
#[cfg(feature = "graphics")]
pub use crate::framebuffer::FrameBuffer;
pub use crate::linux::{GpioBackend, LinuxError, LinuxPeripherals};
pub use crate::message::{ByteMessage, Delay, GpioMessage};
pub use crate::peripherals::Peripherals;
pub use crate::registry::{BusRegistry, MAX_I2C_HANDLES, MAX_SPI_HANDLES};
