use crate::context::{DisplayContext, DisplaySetup};
use crate::enums::{Error, FailurePolicy, Interface, PinRole};
use crate::message::{ByteMessage, GpioMessage};
use crate::peripherals::Peripherals;
use crate::registry::BusRegistry;
use embedded_hal::blocking::{i2c, spi};
use tracing::{error, warn};

///
/// Hardware callbacks of one display.
///
/// Translates the display-driver library's messages into GPIO, I2C and SPI
/// operations. The bus registry is lent in on every call so several
/// displays can share buses.
///
pub struct DisplayBinding<P: Peripherals> {
    context: DisplayContext<P>,
}

impl<P: Peripherals> DisplayBinding<P> {
    pub fn new(setup: DisplaySetup) -> Self {
        Self {
            context: DisplayContext::new(setup),
        }
    }

    pub fn context(&self) -> &DisplayContext<P> {
        &self.context
    }

    ///
    /// Handles delay and GPIO messages.
    ///
    /// # Arguments
    ///
    /// * `registry` - bus registry the display's lines are opened through
    /// * `message` - message from the display driver
    ///
    pub fn gpio_and_delay(
        &mut self,
        registry: &mut BusRegistry<P>,
        message: GpioMessage,
    ) -> Result<(), Error<P::Error>> {
        match message {
            GpioMessage::Init => {
                for role in PinRole::INIT_ORDER {
                    let result = self.context.init_line(role, registry);
                    self.settle(result)?;
                }
                Ok(())
            }
            GpioMessage::Delay(delay) => {
                delay.block();
                Ok(())
            }
            GpioMessage::Gpio(role, high) => {
                let result = self.context.write_line(role, high);
                self.settle(result)
            }
        }
    }

    ///
    /// Byte transport over a hardware I2C bus. Bytes sent between start and
    /// end of a transfer go out as one write transaction.
    ///
    /// Returns `Ok(false)` for messages I2C has no use for.
    ///
    pub fn byte_hw_i2c(
        &mut self,
        registry: &mut BusRegistry<P>,
        message: ByteMessage<'_>,
    ) -> Result<bool, Error<P::Error>> {
        let bus = self.context.setup().bus;
        match message {
            ByteMessage::Init => {
                let result = registry.open_i2c(bus).map(|_| ());
                self.settle(result)?;
            }
            ByteMessage::StartTransfer => self.context.begin_payload(),
            ByteMessage::Send(bytes) => {
                let result = self.context.stage(bytes);
                self.settle(result)?;
            }
            ByteMessage::EndTransfer => {
                // drop the read/write bit
                let address = self.context.setup().i2c_address >> 1;
                let result = match registry.i2c_mut(bus) {
                    Some(handle) => i2c::Write::write(handle, address, self.context.payload())
                        .map_err(|source| Error::Bus { bus, source }),
                    None => Err(Error::BusNotOpen(bus)),
                };
                self.settle(result)?;
            }
            ByteMessage::SetDc(_) => return Ok(false),
        }
        Ok(true)
    }

    ///
    /// Byte transport over a hardware SPI bus. Every send is transferred
    /// immediately; nothing accumulates across sends.
    ///
    pub fn byte_hw_spi(
        &mut self,
        registry: &mut BusRegistry<P>,
        message: ByteMessage<'_>,
    ) -> Result<bool, Error<P::Error>> {
        let bus = self.context.setup().bus;
        match message {
            ByteMessage::Init => {
                let settings = self.context.setup().spi;
                let result = registry.open_spi(bus, &settings).map(|_| ());
                self.settle(result)?;
            }
            ByteMessage::SetDc(high) => {
                let result = self.context.write_line(PinRole::Dc, high);
                self.settle(result)?;
            }
            ByteMessage::Send(bytes) => {
                let staged = self.context.replace_payload(bytes);
                self.settle(staged)?;
                let result = match registry.spi_mut(bus) {
                    Some(handle) => spi::Transfer::transfer(handle, self.context.payload_mut())
                        .map(|_| ())
                        .map_err(|source| Error::Bus { bus, source }),
                    None => Err(Error::BusNotOpen(bus)),
                };
                self.settle(result)?;
            }
            ByteMessage::StartTransfer | ByteMessage::EndTransfer => {}
        }
        Ok(true)
    }

    /// Routes a byte message to the display's configured transport
    pub fn byte(
        &mut self,
        registry: &mut BusRegistry<P>,
        message: ByteMessage<'_>,
    ) -> Result<bool, Error<P::Error>> {
        match self.context.setup().interface {
            Interface::HwI2c => self.byte_hw_i2c(registry, message),
            Interface::HwSpi => self.byte_hw_spi(registry, message),
        }
    }

    ///
    /// Raw gpio-and-delay callback: returns 1 if `msg` was handled, 0 if
    /// the code is unknown. Errors cannot travel through this entry point
    /// and are logged.
    ///
    pub fn gpio_and_delay_raw(&mut self, registry: &mut BusRegistry<P>, msg: u8, arg: u8) -> u8 {
        let Some(message) = GpioMessage::decode(msg, arg) else {
            return 0;
        };
        if let Err(e) = self.gpio_and_delay(registry, message) {
            error!(msg, error = %e, "gpio callback failed");
        }
        1
    }

    ///
    /// Raw byte callback for the configured transport. For send messages
    /// `arg` bytes are taken from `data`.
    ///
    pub fn byte_raw(
        &mut self,
        registry: &mut BusRegistry<P>,
        msg: u8,
        arg: u8,
        data: &[u8],
    ) -> u8 {
        let Some(message) = ByteMessage::decode(msg, arg, data) else {
            return 0;
        };
        match self.byte(registry, message) {
            Ok(handled) => handled as u8,
            Err(e) => {
                error!(msg, error = %e, "byte callback failed");
                1
            }
        }
    }

    ///
    /// Closes the display's GPIO lines. Buses stay open in the registry
    /// since other displays may share them.
    ///
    pub fn teardown(&mut self) -> usize {
        self.context.close_lines()
    }

    fn settle(&self, result: Result<(), Error<P::Error>>) -> Result<(), Error<P::Error>> {
        match (result, self.context.setup().policy) {
            (Err(e), FailurePolicy::LogAndContinue) => {
                match e {
                    Error::Open { .. } => error!(error = %e, "peripheral open failed"),
                    _ => warn!(error = %e, "peripheral operation failed"),
                }
                Ok(())
            }
            (result, _) => result,
        }
    }
}
