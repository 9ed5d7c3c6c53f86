//! Messages the display-driver library sends to its hardware callbacks.
//!
//! The typed enums are what [`DisplayBinding`](crate::DisplayBinding) handles.
//! The `decode` functions accept the driver's numeric message codes for
//! callers that forward raw callback arguments.

use crate::enums::PinRole;

pub const MSG_BYTE_INIT: u8 = 20;
pub const MSG_BYTE_SEND: u8 = 23;
pub const MSG_BYTE_START_TRANSFER: u8 = 24;
pub const MSG_BYTE_END_TRANSFER: u8 = 25;
pub const MSG_BYTE_SET_DC: u8 = 32;

pub const MSG_GPIO_AND_DELAY_INIT: u8 = 40;
pub const MSG_DELAY_MILLI: u8 = 41;
pub const MSG_DELAY_10MICRO: u8 = 42;
pub const MSG_DELAY_100NANO: u8 = 43;
pub const MSG_DELAY_NANO: u8 = 44;
pub const MSG_DELAY_I2C: u8 = 45;
/// GPIO write messages are `MSG_GPIO_BASE + role`
pub const MSG_GPIO_BASE: u8 = 64;

///
/// Blocking delay request. The argument is a multiplier of the unit in the
/// variant name, except for `I2c` where it is the bus speed in 100 kHz.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    Nanos(u8),
    HundredNanos(u8),
    TenMicros(u8),
    Millis(u8),
    I2c(u8),
}

///
/// Message for the gpio-and-delay callback
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioMessage {
    /// Open every wired line as output-high
    Init,
    Delay(Delay),
    /// Drive a line to the given level
    Gpio(PinRole, bool),
}

impl GpioMessage {
    ///
    /// Decodes a raw gpio-and-delay message. Returns `None` for codes the
    /// binding does not handle.
    ///
    pub fn decode(msg: u8, arg: u8) -> Option<Self> {
        let message = match msg {
            MSG_GPIO_AND_DELAY_INIT => Self::Init,
            MSG_DELAY_NANO => Self::Delay(Delay::Nanos(arg)),
            MSG_DELAY_100NANO => Self::Delay(Delay::HundredNanos(arg)),
            MSG_DELAY_10MICRO => Self::Delay(Delay::TenMicros(arg)),
            MSG_DELAY_MILLI => Self::Delay(Delay::Millis(arg)),
            MSG_DELAY_I2C => Self::Delay(Delay::I2c(arg)),
            code if code >= MSG_GPIO_BASE => {
                let role = PinRole::from_index(code - MSG_GPIO_BASE)?;
                // CS1/CS2 are not driven by this binding
                if matches!(role, PinRole::Cs1 | PinRole::Cs2) {
                    return None;
                }
                Self::Gpio(role, arg != 0)
            }
            _ => return None,
        };
        Some(message)
    }
}

///
/// Message for a byte-transport callback
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteMessage<'a> {
    /// Open the bus
    Init,
    /// Drive the data/command line
    SetDc(bool),
    StartTransfer,
    Send(&'a [u8]),
    EndTransfer,
}

impl<'a> ByteMessage<'a> {
    ///
    /// Decodes a raw byte message. `data` is only consulted for send
    /// messages, where `arg` is the number of bytes to take from it.
    ///
    pub fn decode(msg: u8, arg: u8, data: &'a [u8]) -> Option<Self> {
        match msg {
            MSG_BYTE_INIT => Some(Self::Init),
            MSG_BYTE_SET_DC => Some(Self::SetDc(arg != 0)),
            MSG_BYTE_START_TRANSFER => Some(Self::StartTransfer),
            MSG_BYTE_SEND => {
                let len = (arg as usize).min(data.len());
                Some(Self::Send(&data[..len]))
            }
            MSG_BYTE_END_TRANSFER => Some(Self::EndTransfer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_delays() {
        assert_eq!(
            GpioMessage::decode(MSG_DELAY_MILLI, 10),
            Some(GpioMessage::Delay(Delay::Millis(10)))
        );
        assert_eq!(
            GpioMessage::decode(MSG_DELAY_I2C, 4),
            Some(GpioMessage::Delay(Delay::I2c(4)))
        );
    }

    #[test]
    fn decodes_gpio_writes() {
        assert_eq!(
            GpioMessage::decode(MSG_GPIO_BASE + PinRole::Reset as u8, 0),
            Some(GpioMessage::Gpio(PinRole::Reset, false))
        );
        assert_eq!(
            GpioMessage::decode(MSG_GPIO_BASE + PinRole::SPI_CLOCK as u8, 1),
            Some(GpioMessage::Gpio(PinRole::D0, true))
        );
        assert_eq!(GpioMessage::decode(MSG_GPIO_BASE + PinRole::Cs1 as u8, 1), None);
        // menu input lines
        assert_eq!(GpioMessage::decode(MSG_GPIO_BASE + 16, 1), None);
    }

    #[test]
    fn unknown_codes_are_not_handled() {
        assert_eq!(GpioMessage::decode(0, 0), None);
        assert_eq!(ByteMessage::decode(21, 0, &[]), None);
    }

    #[test]
    fn send_takes_arg_bytes() {
        let data = [1, 2, 3, 4];
        assert_eq!(
            ByteMessage::decode(MSG_BYTE_SEND, 3, &data),
            Some(ByteMessage::Send(&[1, 2, 3]))
        );
    }
}
