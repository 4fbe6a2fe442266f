//! Value types shared by the [`radio::prelude`](mod@crate::radio::prelude) traits.
//!
//! Each enum stores the bit pattern it occupies in the radio's register,
//! so converting to a register value is a cast.

use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

/// Implements [`Display`] and (with the `defmt` feature) `defmt::Format`
/// using the type's `label()`.
macro_rules! labeled {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> Result {
                    f.write_str(self.label())
                }
            }

            #[cfg(feature = "defmt")]
            impl defmt::Format for $name {
                fn format(&self, fmt: defmt::Formatter) {
                    defmt::write!(fmt, "{=str}", self.label())
                }
            }
        )+
    };
}

/// The transmitter's output power, in dBm (decibel-milliwatts).
///
/// Lower levels save current; higher levels reach further.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min = 0,
    /// -12 dBm
    Low = 2,
    /// -6 dBm
    High = 4,
    /// 0 dBm
    Max = 6,
}

impl PaLevel {
    /// The `RF_PWR` field in the RF_SETUP register.
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            PaLevel::Min => "Min",
            PaLevel::Low => "Low",
            PaLevel::High => "High",
            PaLevel::Max => "Max",
        }
    }
}

/// The over-the-air bit rate.
///
/// Both ends of a link must use the same rate.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// 1 Mbps
    Mbps1 = 0,
    /// 2 Mbps
    Mbps2 = 0x08,
    /// 250 Kbps
    ///
    /// Only supported by the nRF24L01+ variants.
    Kbps250 = 0x20,
}

impl DataRate {
    /// The `RF_DR_LOW` and `RF_DR_HIGH` bits in the RF_SETUP register.
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x08 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            DataRate::Mbps1 => "1 Mbps",
            DataRate::Mbps2 => "2 Mbps",
            DataRate::Kbps250 => "250 Kbps",
        }
    }
}

/// The checksum appended to every packet.
///
/// This covers both the `EN_CRC` and `CRCO` bits of the CONFIG register.
/// The radio forces CRC on while auto-ack is enabled.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    Disabled = 0,
    Bit8 = 0b1000,
    Bit16 = 0b1100,
}

impl CrcLength {
    pub(crate) const MASK: u8 = 0b1100;

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0b1000 => CrcLength::Bit8,
            0b1100 => CrcLength::Bit16,
            // CRCO is ignored while EN_CRC is cleared
            _ => CrcLength::Disabled,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            CrcLength::Disabled => "disabled",
            CrcLength::Bit8 => "8 bit",
            CrcLength::Bit16 => "16 bit",
        }
    }
}

/// How many of a FIFO's 3 levels are occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// All 3 levels are occupied.
    Full,
    /// No level is occupied.
    Empty,
    /// 1 or 2 levels are occupied.
    Occupied,
}

impl FifoState {
    /// Decode the FIFO_STATUS register for either the TX FIFO (`about_tx`) or the RX FIFO.
    pub(crate) const fn from_bits(fifo_status: u8, about_tx: bool) -> Self {
        let shift = if about_tx { 4 } else { 0 };
        match (fifo_status >> shift) & 3 {
            1 => FifoState::Empty,
            2 => FifoState::Full,
            _ => FifoState::Occupied,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            FifoState::Full => "Full",
            FifoState::Empty => "Empty",
            FifoState::Occupied => "Occupied",
        }
    }
}

/// The result of a single packet transmission.
///
/// None of these are errors in the sense of a hardware malfunction;
/// a failed bus transaction is reported through
/// [`Nrf24Error`](enum@crate::radio::Nrf24Error) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The payload was sent (and acknowledged if auto-ack is enabled).
    Success,
    /// The receiver did not acknowledge the payload within the configured
    /// number of retries. The payload has been discarded from the TX FIFO.
    MaxRetransmitExceeded,
    /// The IRQ pin was asserted, but neither the "TX Data Sent" nor the
    /// "TX Data Failed" flags were set. Holds the raw STATUS byte.
    Unknown(u8),
    /// The IRQ pin was not asserted within
    /// [`RF24::irq_timeout`](value@crate::radio::RF24::irq_timeout).
    /// The payload has been discarded from the TX FIFO.
    Timeout,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxOutcome::Unknown(status) => defmt::write!(fmt, "Unknown({=u8:#x})", status),
            TxOutcome::Success => defmt::write!(fmt, "Success"),
            TxOutcome::MaxRetransmitExceeded => defmt::write!(fmt, "MaxRetransmitExceeded"),
            TxOutcome::Timeout => defmt::write!(fmt, "Timeout"),
        }
    }
}

impl Display for TxOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TxOutcome::Unknown(status) => write!(f, "Unknown({status:#04X})"),
            TxOutcome::Success => f.write_str("Success"),
            TxOutcome::MaxRetransmitExceeded => f.write_str("MaxRetransmitExceeded"),
            TxOutcome::Timeout => f.write_str("Timeout"),
        }
    }
}

/// The stage of a packet transmission, as driven by the radio's CE pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxState {
    /// CE pin is inactive. The radio can be configured or loaded with a payload.
    #[default]
    Idle,
    /// CE pin is active and the radio is sending the payload.
    Armed,
    /// Waiting for the radio's IRQ pin to signal the end of a transmission.
    AwaitingCompletion,
}

impl TxState {
    const fn label(&self) -> &'static str {
        match self {
            TxState::Idle => "Idle",
            TxState::Armed => "Armed",
            TxState::AwaitingCompletion => "AwaitingCompletion",
        }
    }
}

labeled!(PaLevel, DataRate, CrcLength, FifoState, TxState);

/// A struct used to describe the different interrupt events.
///
/// The radio returns its STATUS register during the first byte of every
/// SPI transaction; this is that byte.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24tx::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_tx_ds(true); // assert only `tx_ds` flag
/// assert!(flags.tx_ds());
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed
    /// (the maximum number of retries was reached).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// The pipe number of the payload available in the RX FIFO.
    /// `7` means the RX FIFO is empty.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    const fn with_flag(self, offset: usize, flag: bool) -> Self {
        let cleared = self.into_bits() & !(1 << offset);
        Self::from_bits(cleared | ((flag as u8) << offset))
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        self.with_flag(Self::RX_DR_OFFSET, flag)
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DS_OFFSET, flag)
    }

    /// A flag to describe if TX Data Failed.
    pub fn with_tx_df(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DF_OFFSET, flag)
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}
