use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod fifo;
mod init;
mod pa_level;
mod power;
mod radio;
mod status;
pub use constants::{mnemonics, Command, Register};

use crate::types::{StatusFlags, TxState};

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO, DI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (CSN or CE pin).
    Gpo(DO),
    /// Represents a DigitalInput error (IRQ pin).
    Gpi(DI),
    /// [`RF24::transmit()`](fn@crate::radio::prelude::EsbRadio::transmit) was called
    /// while a previous transmission had not finished.
    ///
    /// This only occurs when a previous transmission was aborted by a hardware error.
    /// Use [`EsbInit::enter_tx_mode()`](fn@crate::radio::prelude::EsbInit::enter_tx_mode)
    /// or [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) to recover.
    NotIdle,
    /// An empty payload cannot be transmitted.
    InvalidPayloadLength,
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver (in TX role only).
///
/// Additionally, the register-level commands are exposed as
/// [`RF24::read_register()`], [`RF24::write_register()`],
/// [`RF24::read_buffer()`], [`RF24::write_buffer()`] and [`RF24::command()`].
pub struct RF24<SPI, DO, DI, DELAY> {
    /// The time (in microseconds) that
    /// [`EsbRadio::transmit()`](fn@crate::radio::prelude::EsbRadio::transmit)
    /// will wait for the radio's IRQ pin.
    ///
    /// The worst case of a transmission with 15 retries of 4000 microseconds each
    /// is about 64 milliseconds. Defaults to 100 milliseconds.
    ///
    /// <div class="warning">
    ///
    /// If set to `None`, the wait is unbounded and a disconnected
    /// or miswired IRQ pin will block forever.
    ///
    /// </div>
    pub irq_timeout: Option<u32>,
    _spi: SPI,
    _csn_pin: DO,
    _ce_pin: DO,
    _irq_pin: DI,
    _delay_impl: DELAY,
    _status: StatusFlags,
    _tx_state: TxState,
}

impl<SPI, DO, DI, DELAY> RF24<SPI, DO, DI, DELAY>
where
    SPI: SpiBus<u8>,
    DO: OutputPin,
    DI: InputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`RF24`] object for use on the specified
    /// `spi` bus with the given pins.
    ///
    /// Unlike drivers built on [`SpiDevice`](trait@embedded_hal::spi::SpiDevice),
    /// the radio's CSN pin (aka Chip Select pin) is driven by this object, so the
    /// `spi` bus must not be shared with other devices.
    pub fn new(
        spi: SPI,
        csn_pin: DO,
        ce_pin: DO,
        irq_pin: DI,
        delay_impl: DELAY,
    ) -> RF24<SPI, DO, DI, DELAY> {
        RF24 {
            irq_timeout: Some(100_000),
            _spi: spi,
            _csn_pin: csn_pin,
            _ce_pin: ce_pin,
            _irq_pin: irq_pin,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _tx_state: TxState::Idle,
        }
    }

    /// Destroy this object and return the bus, pins and delay
    /// (in the same order given to [`RF24::new()`]).
    pub fn release(self) -> (SPI, DO, DO, DI, DELAY) {
        (
            self._spi,
            self._csn_pin,
            self._ce_pin,
            self._irq_pin,
            self._delay_impl,
        )
    }

    /// Shift one byte out while shifting one byte in.
    fn exchange(&mut self, byte: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        let mut word = [byte];
        self._spi
            .transfer_in_place(&mut word)
            .map_err(Nrf24Error::Spi)?;
        Ok(word[0])
    }

    fn shift_in(
        &mut self,
        command: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        // the STATUS byte is shifted in during the command byte
        self._status = StatusFlags::from_bits(self.exchange(command)?);
        for byte in buf.iter_mut() {
            *byte = self.exchange(0)?;
        }
        Ok(())
    }

    fn shift_out(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self._status = StatusFlags::from_bits(self.exchange(command)?);
        for byte in buf {
            self.exchange(*byte)?;
        }
        Ok(())
    }

    /// Deactivate the CSN pin, even if flushing the bus failed.
    fn end_transaction(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        let flushed = self._spi.flush().map_err(Nrf24Error::Spi);
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        flushed
    }

    /// A framed transaction that reads `buf.len()` bytes after the `command` byte.
    fn spi_read(
        &mut self,
        command: u8,
        buf: &mut [u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self.shift_in(command, buf);
        let ended = self.end_transaction();
        result?;
        ended?;
        Ok(self._status)
    }

    /// A framed transaction that writes `buf` after the `command` byte.
    ///
    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_write(Command::Nop.into_bits(), &[])?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_write(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self.shift_out(command, buf);
        let ended = self.end_transaction();
        result?;
        ended?;
        Ok(self._status)
    }

    /// Read the value of a single byte register.
    pub fn read_register(
        &mut self,
        register: Register,
    ) -> Result<u8, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        let mut value = [0u8];
        self.spi_read(
            Command::ReadRegister.into_bits() | register.into_bits(),
            &mut value,
        )?;
        Ok(value[0])
    }

    /// Write the value of a single byte register.
    ///
    /// Returns the STATUS byte captured during the command byte
    /// (before the new value takes effect).
    pub fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self.spi_write(
            Command::WriteRegister.into_bits() | register.into_bits(),
            &[value],
        )
    }

    /// Read a multi-byte register (like [`Register::TxAddr`]) into `buf`.
    ///
    /// Bytes are stored in the order they are shifted in (LSByte first).
    pub fn read_buffer(
        &mut self,
        register: Register,
        buf: &mut [u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self.spi_read(
            Command::ReadRegister.into_bits() | register.into_bits(),
            buf,
        )
    }

    /// Write a multi-byte register (like [`Register::TxAddr`]) from `buf`.
    pub fn write_buffer(
        &mut self,
        register: Register,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self.spi_write(
            Command::WriteRegister.into_bits() | register.into_bits(),
            buf,
        )
    }

    /// Send a command that consists of a single byte
    /// (like [`Command::FlushTx`] or [`Command::Nop`]).
    ///
    /// [`Command::ReadRegister`] and [`Command::WriteRegister`] are register 0 accesses
    /// without data; use the register functions instead.
    pub fn command(
        &mut self,
        command: Command,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error, DI::Error>> {
        self.spi_write(command.into_bits(), &[])
    }
}
