use super::{Nrf24Error, Register, RF24};
use crate::{
    radio::{
        prelude::{EsbChannel, EsbInit},
        TxConfig,
    },
    TxState,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Written to (and read back from) the TX_ADDR register by
/// [`RF24::is_present()`](fn@crate::radio::prelude::EsbInit::is_present).
const PRESENCE_PATTERN: [u8; 5] = *b"nRF24";

impl<SPI, DO, DI, DELAY> EsbInit for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    /// Initialize the radio's control lines given to [`RF24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._tx_state = TxState::Idle;
        Ok(())
    }

    fn is_present(&mut self) -> Result<bool, Self::ConfigErrorType> {
        self.write_buffer(Register::TxAddr, &PRESENCE_PATTERN)?;
        let mut echo = [0u8; 5];
        self.read_buffer(Register::TxAddr, &mut echo)?;
        let present = echo == PRESENCE_PATTERN;
        #[cfg(feature = "defmt")]
        defmt::debug!("Presence check: TX_ADDR echoed {=[u8]:#x}", &echo[..]);
        Ok(present)
    }

    fn enter_tx_mode(&mut self, config: &TxConfig) -> Result<(), Self::ConfigErrorType> {
        // the radio must not be transmitting while it is reconfigured
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._tx_state = TxState::Idle;

        self.write_register(Register::SetupRetr, config.auto_retries.into_bits())?;
        self.write_register(Register::RfSetup, config.rf_setup.into_bits())?;

        // Set CONFIG register:
        //      Set all TX events on IRQ pin
        //      Set CRC length
        //      Set power state
        //      Enable PTX
        self.write_register(
            Register::Config,
            config.config_reg.with_is_rx(false).into_bits(),
        )?;

        // this also resets the lost packets count in OBSERVE_TX
        self.set_channel(config.channel())?;

        // SETUP_AW encodes 3, 4, or 5 bytes as 1, 2, or 3
        self.write_register(Register::SetupAw, config.address_length() - 2)?;
        let address = config.tx_address();
        self.write_buffer(Register::TxAddr, address)?;

        self.write_register(Register::EnAa, config.auto_ack())?;
        // ACK packets are received on pipe 0 using the TX address
        self.write_buffer(Register::RxAddrP0, address)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Entered TX mode on channel {} at {} ({})",
            config.channel(),
            config.data_rate(),
            config.pa_level()
        );
        Ok(())
    }
}
