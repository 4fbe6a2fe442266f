use super::Register;
use crate::radio::{prelude::EsbChannel, Nrf24Error, RF24};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

impl<SPI, DO, DI, DELAY> EsbChannel for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    /// The `RF_CH` register is 7 bits wide. The specified `channel` is
    /// clamped to the range [0, 127].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        self.write_register(Register::RfCh, channel.min(127))?;
        Ok(())
    }

    /// See also [`RF24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.read_register(Register::RfCh)
    }
}
