//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24tx::radio::prelude::*;
//! ```

use crate::types::{FifoState, PaLevel, StatusFlags, TxOutcome, TxState};

use super::TxConfig;

/// A trait to represent the bring-up of an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Put the radio's control lines in their idle state.
    ///
    /// The Chip Select pin is deactivated (HIGH) and the Chip Enable pin is
    /// deactivated (LOW), which leaves the radio in power down or standby mode.
    /// This also resets the [`TxState`] to [`TxState::Idle`].
    ///
    /// Configuring the SPI bus and pin directions is the responsibility of the caller.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Is the radio connected to the SPI bus?
    ///
    /// A known pattern is written to the radio's TX address and read back.
    /// Any mismatch (such as the all `0x00` or all `0xFF` data of
    /// a disconnected bus) returns `false`.
    ///
    /// <div class="warning">
    ///
    /// This overwrites the TX address. Call this before
    /// [`EsbInit::enter_tx_mode()`].
    ///
    /// </div>
    fn is_present(&mut self) -> Result<bool, Self::ConfigErrorType>;

    /// Apply a [`TxConfig`] and put the radio in TX role.
    ///
    /// The Chip Enable pin is deactivated first, so this can be called at any time
    /// to recover from an interrupted transmission.
    ///
    /// There is no rollback. If a bus transaction fails, the radio is left
    /// partially configured and this function should be called again.
    fn enter_tx_mode(&mut self, config: &TxConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// The specified `channel` is clamped to the range [0, 127].
    ///
    /// Writing this also resets the radio's count of lost packets (`PLOS_CNT`).
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;

    /// Clear the radio's IRQ status flags
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// interrupt event. Setting any member of [`StatusFlags`] to `false` will leave
    /// the corresponding status flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction).
    ///
    /// Use [`EsbStatus::get_status_flags()`] to get the updated status flags.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the power amplitude level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Get the currently configured Power Amplitude Level (PA Level)
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Set the radio's Power Amplitude Level (PA Level)
    ///
    /// The data rate setting is left untouched.
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;
}

/// A trait to represent manipulation of the state of power
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio.
    ///
    /// The Chip Enable pin is deactivated first. No other configuration is changed.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio (into standby mode).
    ///
    /// <div class="warning">
    ///
    /// This function does not block. The radio takes about 1.5 milliseconds
    /// to leave power down mode; the caller is responsible for that delay
    /// before transmitting.
    ///
    /// </div>
    fn wake(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&mut self) -> Result<bool, Self::PowerErrorType>;
}

/// A trait to represent transmission of packets
/// for an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Blocking transmission of a single payload.
    ///
    /// The payload is loaded into the TX FIFO, the transmission is started, and
    /// this function waits for the radio's IRQ pin to signal the end of the
    /// transmission. Payloads longer than 32 bytes are truncated.
    ///
    /// The returned [`TxOutcome`] describes what happened over the air.
    /// In every case, the TX FIFO is flushed and the TX event flags are cleared.
    fn transmit(&mut self, buf: &[u8]) -> Result<TxOutcome, Self::RadioErrorType>;

    /// The current stage of a transmission.
    ///
    /// Anything other than [`TxState::Idle`] means the last
    /// [`EsbRadio::transmit()`] was aborted by a hardware error.
    fn tx_state(&self) -> TxState;

    /// Get the Auto-Retry Count (ARC) about the previous transmission.
    ///
    /// This data is reset for every payload attempted to transmit.
    /// It cannot exceed 15 per the `count` parameter in
    /// [`TxConfig::with_auto_retries()`].
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;
}
