/// The nRF24L01's register map (offsets used with
/// [`Command::ReadRegister`] and [`Command::WriteRegister`]).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Config = 0x00,
    EnAa = 0x01,
    EnRxAddr = 0x02,
    SetupAw = 0x03,
    SetupRetr = 0x04,
    RfCh = 0x05,
    RfSetup = 0x06,
    Status = 0x07,
    ObserveTx = 0x08,
    Rpd = 0x09,
    RxAddrP0 = 0x0A,
    RxAddrP1 = 0x0B,
    RxAddrP2 = 0x0C,
    RxAddrP3 = 0x0D,
    RxAddrP4 = 0x0E,
    RxAddrP5 = 0x0F,
    TxAddr = 0x10,
    RxPwP0 = 0x11,
    RxPwP1 = 0x12,
    RxPwP2 = 0x13,
    RxPwP3 = 0x14,
    RxPwP4 = 0x15,
    RxPwP5 = 0x16,
    FifoStatus = 0x17,
}

impl Register {
    /// Register offsets occupy the 5 LSBs of a command byte.
    pub const ADDRESS_MASK: u8 = 0x1F;

    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// The SPI commands (the first byte of every transaction).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// OR-ed with a [`Register`] offset.
    ReadRegister = 0x00,
    /// OR-ed with a [`Register`] offset.
    WriteRegister = 0x20,
    ReadRxPayload = 0x61,
    WriteTxPayload = 0xA0,
    FlushTx = 0xE1,
    FlushRx = 0xE2,
    /// Does nothing. Useful to fetch the STATUS byte.
    Nop = 0xFF,
}

impl Command {
    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// A module to encapsulate bit mnemonics
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    /// CONFIG register's `PWR_UP` bit.
    pub const PWR_UP: u8 = 1 << 1;
    /// CONFIG register's `PRIM_RX` bit.
    pub const PRIM_RX: u8 = 1;
    /// FIFO_STATUS register's `TX_EMPTY` bit.
    pub const TX_EMPTY: u8 = 1 << 4;
    /// FIFO_STATUS register's `TX_FULL` bit.
    pub const TX_FULL: u8 = 1 << 5;
    /// FIFO_STATUS register's `RX_EMPTY` bit.
    pub const RX_EMPTY: u8 = 1;
    /// OBSERVE_TX register's `ARC_CNT` field.
    pub const ARC_CNT: u8 = 0xF;
}
