use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

use super::mnemonics;

#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    /// Reserved bit and the 3 IRQ mask bits.
    ///
    /// These stay cleared so that both TX events drive the IRQ pin.
    #[bits(4)]
    _irq_mask: u8,

    #[bits(2, access = None, default = 3)]
    crc_length: u8,

    #[bits(1, default = true)]
    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !CrcLength::MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    /// Apply the power state to a CONFIG value read from the radio.
    ///
    /// All other bits are preserved.
    pub const fn with_power_bit(config: u8, enable: bool) -> u8 {
        if enable {
            config | mnemonics::PWR_UP
        } else {
            config & !mnemonics::PWR_UP
        }
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 5)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 15)]
    pub arc: u8,
}

#[bitfield(u8, order = Msb)]
pub(crate) struct RfSetup {
    /// `CONT_WAVE` and reserved bit.
    #[bits(2)]
    _padding: u8,

    #[bits(3, access = None)]
    data_rate: u8,

    #[bits(2, access = None, default = 3)]
    pa_level: u8,

    /// `LNA_HCURR` on older nRF24L01 (non-plus) modules. Left cleared.
    #[bits(1)]
    _lna: u8,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits())
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !DataRate::MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !PaLevel::MASK;
        Self::from_bits(new_val | level.into_bits())
    }

    /// Replace only the `RF_PWR` field of a RF_SETUP value read from the radio.
    ///
    /// The data rate and LNA bits are preserved.
    pub const fn with_pa_level_bits(rf_setup: u8, level: PaLevel) -> u8 {
        rf_setup & !PaLevel::MASK | level.into_bits()
    }
}

// unit tests found in crate::radio::config::test
