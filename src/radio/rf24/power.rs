use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::radio::{prelude::EsbPower, Nrf24Error, RF24};
use crate::TxState;

use super::{bit_fields::Config, mnemonics, Register};

impl<SPI, DO, DI, DELAY> EsbPower for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    /// In standby mode (when powered up but not transmitting), a non-PA/LNA radio
    /// will consume about 26uA (.026mA).
    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?; // Guarantee CE is low on powerDown
        self._tx_state = TxState::Idle;
        let config = self.read_register(Register::Config)?;
        self.write_register(Register::Config, Config::with_power_bit(config, false))?;
        Ok(())
    }

    fn wake(&mut self) -> Result<(), Self::PowerErrorType> {
        let config = self.read_register(Register::Config)?;
        self.write_register(Register::Config, Config::with_power_bit(config, true))?;
        Ok(())
    }

    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType> {
        let config = self.read_register(Register::Config)?;
        Ok(config & mnemonics::PWR_UP == mnemonics::PWR_UP)
    }
}
