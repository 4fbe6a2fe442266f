use crate::radio::rf24::bit_fields::{Config, RfSetup, SetupRetry};
use crate::{CrcLength, DataRate, PaLevel};

/// An object to configure the radio for transmitting.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`TxConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use rf24tx::radio::TxConfig;
/// let config = TxConfig::default()
///     .with_channel(42)
///     .with_auto_retries(3, 5)
///     .with_tx_address(b"1Node");
/// assert_eq!(config.channel(), 42);
/// ```
///
/// The configuration is applied all at once by
/// [`EsbInit::enter_tx_mode()`](fn@crate::radio::prelude::EsbInit::enter_tx_mode).
#[derive(Debug, Clone, Copy)]
pub struct TxConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    channel: u8,
    auto_ack: u8,
    tx_address: [u8; 5],
    address_length: u8,
}

impl Default for TxConfig {
    /// Instantiate a [`TxConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`TxConfig::channel()`] | `76` |
    /// | [`TxConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`TxConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`TxConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`TxConfig::power()`] | `true` |
    /// | [`TxConfig::auto_ack()`] | `0x01` (enabled for pipe 0 only) |
    /// | [`TxConfig::auto_retry_delay()`] | `5` |
    /// | [`TxConfig::auto_retry_count()`] | `15` |
    /// | [`TxConfig::tx_address()`] | `[0xE7; 5]` |
    /// | [`TxConfig::address_length()`] | `5` |
    fn default() -> Self {
        Self {
            // 16 bit CRC, powered up, PTX, both TX events on the IRQ pin
            config_reg: Config::default(),
            // 1500 us between up to 15 retries
            auto_retries: SetupRetry::default(),
            // 1 Mbps at 0 dBm
            rf_setup: RfSetup::default(),
            channel: 76,
            auto_ack: 1,
            tx_address: [0xE7; 5],
            address_length: 5,
        }
    }
}

impl TxConfig {
    /// Returns the value set by [`TxConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// The radio forces CRC on when auto-ack is enabled for any pipe.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_config = self.config_reg.with_crc_length(length);
        Self {
            config_reg: new_config,
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_power()`].
    pub const fn power(&self) -> bool {
        self.config_reg.power()
    }

    /// Should the radio be powered up when the configuration is applied?
    ///
    /// Powering up from a power down state takes about 1.5 milliseconds.
    /// The caller is responsible for that delay before transmitting.
    pub fn with_power(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_power(enable),
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate()
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_config = self.rf_setup.with_data_rate(data_rate);
        Self {
            rf_setup: new_config,
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    /// The Power Amplitude (PA) level.
    ///
    /// See [`EsbPaLevel::set_pa_level()`](fn@crate::radio::prelude::EsbPaLevel::set_pa_level)
    /// to change only this setting after the configuration is applied.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_config = self.rf_setup.with_pa_level(level);
        Self {
            rf_setup: new_config,
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 127].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(127),
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`TxConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's `count` (set via [`TxConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// Both values are clamped to range [0, 15].
    /// The `delay` is in steps of 250 microseconds, where `0` means 250 microseconds.
    /// A `count` of `0` disables automatic retransmission.
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        let new_config = self
            .auto_retries
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        Self {
            auto_retries: new_config,
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Set the pipes that have the auto-ack feature enabled (as a bit mask).
    ///
    /// Pipe 0 (bit 0) is the pipe that receives the ACK packets
    /// when transmitting. Only the 6 LSBs are used.
    pub fn with_auto_ack(self, mask: u8) -> Self {
        Self {
            auto_ack: mask & 0x3F,
            ..self
        }
    }

    /// Returns the value set by [`TxConfig::with_address_length()`].
    pub const fn address_length(&self) -> u8 {
        self.address_length
    }

    /// The address length.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_length(self, value: u8) -> Self {
        Self {
            address_length: value.clamp(3, 5),
            ..self
        }
    }

    /// Get the TX address (truncated to [`TxConfig::address_length()`]).
    pub fn tx_address(&self) -> &[u8] {
        &self.tx_address[..self.address_length as usize]
    }

    /// Set the TX address.
    ///
    /// Only the first 5 bytes are used. This also sets the
    /// [`TxConfig::address_length()`] to the given `address` length (clamped to range [3, 5]).
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let len = address.len().min(5);
        let mut tx_address = self.tx_address;
        tx_address[..len].copy_from_slice(&address[..len]);
        Self {
            tx_address,
            address_length: (len as u8).clamp(3, 5),
            ..self
        }
    }
}
