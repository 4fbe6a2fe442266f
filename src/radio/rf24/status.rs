use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::{
    radio::{prelude::EsbStatus, Nrf24Error, RF24},
    types::StatusFlags,
};

use super::{Command, Register};

impl<SPI, DO, DI, DELAY> EsbStatus for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(Register::Status, flags.into_bits() & StatusFlags::IRQ_MASK)?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.command(Command::Nop)?;
        Ok(())
    }
}
