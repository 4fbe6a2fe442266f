use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use super::{bit_fields::RfSetup, Register};
use crate::radio::{prelude::EsbPaLevel, Nrf24Error, RF24};
use crate::PaLevel;

impl<SPI, DO, DI, DELAY> EsbPaLevel for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        let rf_setup = self.read_register(Register::RfSetup)?;
        Ok(PaLevel::from_bits(rf_setup))
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType> {
        let rf_setup = self.read_register(Register::RfSetup)?;
        self.write_register(
            Register::RfSetup,
            RfSetup::with_pa_level_bits(rf_setup, pa_level),
        )?;
        Ok(())
    }
}
