use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::radio::{prelude::EsbFifo, Nrf24Error, RF24};
use crate::FifoState;

use super::{Command, Register};

impl<SPI, DO, DI, DELAY> EsbFifo for RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error, DI::Error>;

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(Command::FlushRx)?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    ///
    /// A payload that exhausted its retries is not removed by the radio;
    /// it stays in the TX FIFO until flushed.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(Command::FlushTx)?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo_status = self.read_register(Register::FifoStatus)?;
        Ok(FifoState::from_bits(fifo_status, about_tx))
    }
}
