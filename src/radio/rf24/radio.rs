use super::{mnemonics, Command, Nrf24Error, Register, RF24};
use crate::{
    radio::prelude::{EsbFifo, EsbRadio},
    TxOutcome, TxState,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// The TX FIFO is 32 bytes wide.
const MAX_PAYLOAD_LENGTH: usize = 32;

/// Minimum time (in microseconds) the CE pin must stay active to start a transmission.
const CE_HOLD_TIME: u32 = 10;

/// Time (in microseconds) between reads of the IRQ pin.
const IRQ_POLL_INTERVAL: u32 = 10;

impl<SPI, DO, DI, DELAY> RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Block until the IRQ pin is active (LOW).
    ///
    /// Returns `false` if [`RF24::irq_timeout`] expired first.
    fn wait_for_irq(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        let mut waited = 0u32;
        while self._irq_pin.is_high().map_err(Nrf24Error::Gpi)? {
            if let Some(timeout) = self.irq_timeout {
                if waited >= timeout {
                    return Ok(false);
                }
            }
            self._delay_impl.delay_us(IRQ_POLL_INTERVAL);
            waited = waited.saturating_add(IRQ_POLL_INTERVAL);
        }
        Ok(true)
    }
}

impl<SPI, DO, DI, DELAY> EsbRadio for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    /// See [`EsbRadio::transmit()`] for implementation-agnostic detail.
    ///
    /// The radio's STATUS register is read once the IRQ pin is active, and that
    /// same value is written back to clear the latched events. If both
    /// "TX Data Failed" and "TX Data Sent" flags are set, the result is
    /// [`TxOutcome::MaxRetransmitExceeded`].
    ///
    /// <div class="warning">
    ///
    /// The radio must be in TX mode (see
    /// [`EsbInit::enter_tx_mode()`](fn@crate::radio::prelude::EsbInit::enter_tx_mode))
    /// and powered up. Otherwise, nothing is sent and the result is
    /// [`TxOutcome::Timeout`] (or a blocked call if [`RF24::irq_timeout`] is `None`).
    ///
    /// </div>
    fn transmit(&mut self, buf: &[u8]) -> Result<TxOutcome, Self::RadioErrorType> {
        if self._tx_state != TxState::Idle {
            return Err(Nrf24Error::NotIdle);
        }
        if buf.is_empty() {
            return Err(Nrf24Error::InvalidPayloadLength);
        }
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        // the radio does not start a new transmission while MAX_RT is asserted
        self.write_register(
            Register::Status,
            mnemonics::MASK_MAX_RT | mnemonics::MASK_TX_DS,
        )?;
        let len = buf.len().min(MAX_PAYLOAD_LENGTH);
        self.spi_write(Command::WriteTxPayload.into_bits(), &buf[..len])?;
        #[cfg(feature = "defmt")]
        defmt::trace!("Loaded {} byte payload into TX FIFO", len);

        self._ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._tx_state = TxState::Armed;
        self._delay_impl.delay_us(CE_HOLD_TIME);

        self._tx_state = TxState::AwaitingCompletion;
        let waited = self.wait_for_irq();
        // CE goes LOW even if the IRQ pin could not be read
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let asserted = waited?;

        if !asserted {
            // discard the payload so it is not sent by the next transmission
            self.flush_tx()?;
            self._tx_state = TxState::Idle;
            #[cfg(feature = "defmt")]
            defmt::debug!("Transmission timed out after {} us", self.irq_timeout);
            return Ok(TxOutcome::Timeout);
        }

        let status = self.read_register(Register::Status)?;
        self.write_register(Register::Status, status)?;
        let outcome = if status & mnemonics::MASK_MAX_RT != 0 {
            TxOutcome::MaxRetransmitExceeded
        } else if status & mnemonics::MASK_TX_DS != 0 {
            TxOutcome::Success
        } else {
            TxOutcome::Unknown(status)
        };
        // a failed payload is not removed from the TX FIFO by the radio
        self.flush_tx()?;
        self._tx_state = TxState::Idle;

        #[cfg(feature = "defmt")]
        defmt::debug!("Transmission result: {}", outcome);
        Ok(outcome)
    }

    fn tx_state(&self) -> TxState {
        self._tx_state
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        let observe_tx = self.read_register(Register::ObserveTx)?;
        Ok(observe_tx & mnemonics::ARC_CNT)
    }
}
