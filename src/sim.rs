//! A simulated nRF24L01 (in PTX role) behind the `embedded-hal` traits.
//!
//! The model keeps a register file and a 3 level TX FIFO. Each SPI transaction is
//! applied when the CSN pin is released, and a rising edge on the CE pin resolves the
//! payload at the head of the TX FIFO according to the configured [`Link`].
extern crate std;

use core::{cell::RefCell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::{
    digital::{self, InputPin, OutputPin},
    spi::{self, SpiBus},
};
use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::radio::{mnemonics, Command, Register, RF24};

/// How the simulated receiver responds to a transmission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Link {
    /// The payload is acknowledged.
    Ack,
    /// No acknowledgement within the retry budget.
    NoAck,
    /// Both TX_DS and MAX_RT are latched.
    Glitch,
    /// Nothing happens (the IRQ pin is never asserted).
    Silent,
}

pub struct Chip {
    pub regs: [u8; 0x18],
    pub tx_addr: [u8; 5],
    pub rx_addr_p0: [u8; 5],
    pub tx_fifo: Vec<Vec<u8>>,
    /// Payloads that were acknowledged.
    pub sent: Vec<Vec<u8>>,
    pub link: Link,
    /// Flip a bit of this TX_ADDR byte when it is read back.
    pub corrupt_echo: Option<usize>,
    /// Number of IRQ pin reads that still see it inactive.
    pub irq_latency: u32,
    frame: Vec<u8>,
    csn_low: bool,
    ce_high: bool,
}

impl Chip {
    fn new(link: Link) -> Self {
        let mut regs = [0u8; 0x18];
        regs[Register::Config as usize] = 0x08;
        regs[Register::EnAa as usize] = 0x3F;
        regs[Register::EnRxAddr as usize] = 0x03;
        regs[Register::SetupAw as usize] = 0x03;
        regs[Register::SetupRetr as usize] = 0x03;
        regs[Register::RfCh as usize] = 0x02;
        regs[Register::RfSetup as usize] = 0x0F;
        Self {
            regs,
            tx_addr: [0xE7; 5],
            rx_addr_p0: [0xE7; 5],
            tx_fifo: Vec::new(),
            sent: Vec::new(),
            link,
            corrupt_echo: None,
            irq_latency: 0,
            frame: Vec::new(),
            csn_low: false,
            ce_high: false,
        }
    }

    /// Only the IRQ flags are stored in `regs[STATUS]`.
    pub fn status(&self) -> u8 {
        let tx_full = (self.tx_fifo.len() == 3) as u8;
        self.regs[Register::Status as usize] & 0x70 | 0x0E | tx_full
    }

    fn fifo_status(&self) -> u8 {
        let mut value = mnemonics::RX_EMPTY;
        if self.tx_fifo.is_empty() {
            value |= mnemonics::TX_EMPTY;
        }
        if self.tx_fifo.len() == 3 {
            value |= mnemonics::TX_FULL;
        }
        value
    }

    fn read(&self, register: u8, index: usize) -> u8 {
        match register {
            r if r == Register::TxAddr as u8 => {
                let value = self.tx_addr.get(index).copied().unwrap_or(0);
                match self.corrupt_echo {
                    Some(i) if i == index => value ^ 1,
                    _ => value,
                }
            }
            r if r == Register::RxAddrP0 as u8 => {
                self.rx_addr_p0.get(index).copied().unwrap_or(0)
            }
            r if r == Register::Status as u8 => self.status(),
            r if r == Register::FifoStatus as u8 => self.fifo_status(),
            r if (r as usize) < self.regs.len() && index == 0 => self.regs[r as usize],
            _ => 0,
        }
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        assert!(self.csn_low, "SPI traffic while CSN is inactive");
        let position = self.frame.len();
        self.frame.push(byte);
        if position == 0 {
            return self.status();
        }
        let command = self.frame[0];
        if command & 0xE0 == Command::ReadRegister as u8 {
            self.read(command & Register::ADDRESS_MASK, position - 1)
        } else {
            0
        }
    }

    fn write(&mut self, register: u8, data: &[u8]) {
        let Some(&value) = data.first() else {
            return;
        };
        match register {
            r if r == Register::Status as u8 => {
                self.regs[r as usize] &= !(value & 0x70);
            }
            r if r == Register::RfCh as u8 => {
                self.regs[r as usize] = value & 0x7F;
                // clears PLOS_CNT
                self.regs[Register::ObserveTx as usize] &= 0x0F;
            }
            r if r == Register::TxAddr as u8 => {
                let len = data.len().min(5);
                self.tx_addr[..len].copy_from_slice(&data[..len]);
            }
            r if r == Register::RxAddrP0 as u8 => {
                let len = data.len().min(5);
                self.rx_addr_p0[..len].copy_from_slice(&data[..len]);
            }
            r if r == Register::ObserveTx as u8
                || r == Register::Rpd as u8
                || r == Register::FifoStatus as u8 => {}
            r if (r as usize) < self.regs.len() => self.regs[r as usize] = value,
            _ => {}
        }
    }

    fn end_frame(&mut self) {
        let frame = core::mem::take(&mut self.frame);
        let Some((&command, data)) = frame.split_first() else {
            return;
        };
        if command & 0xE0 == Command::WriteRegister as u8 {
            self.write(command & Register::ADDRESS_MASK, data);
        } else if command == Command::WriteTxPayload as u8 {
            if self.tx_fifo.len() < 3 {
                self.tx_fifo.push(data.to_vec());
            }
        } else if command == Command::FlushTx as u8 {
            self.tx_fifo.clear();
        }
    }

    fn set_csn(&mut self, high: bool) {
        if high && self.csn_low {
            self.end_frame();
        }
        if !high {
            self.frame.clear();
        }
        self.csn_low = !high;
    }

    fn set_ce(&mut self, high: bool) {
        let rising = high && !self.ce_high;
        self.ce_high = high;
        if rising {
            self.resolve_transmission();
        }
    }

    fn resolve_transmission(&mut self) {
        let config = self.regs[Register::Config as usize];
        let status = self.regs[Register::Status as usize];
        if config & mnemonics::PWR_UP == 0
            || config & mnemonics::PRIM_RX != 0
            || status & mnemonics::MASK_MAX_RT != 0
            || self.tx_fifo.is_empty()
        {
            return;
        }
        let retries = self.regs[Register::SetupRetr as usize] & 0xF;
        let observe_tx = &mut self.regs[Register::ObserveTx as usize];
        match self.link {
            Link::Ack => {
                let payload = self.tx_fifo.remove(0);
                self.sent.push(payload);
                *observe_tx &= 0xF0;
                self.regs[Register::Status as usize] |= mnemonics::MASK_TX_DS;
            }
            Link::NoAck => {
                let lost = (*observe_tx >> 4).saturating_add(1).min(15);
                *observe_tx = lost << 4 | retries;
                self.regs[Register::Status as usize] |= mnemonics::MASK_MAX_RT;
            }
            Link::Glitch => {
                *observe_tx = *observe_tx & 0xF0 | retries;
                self.regs[Register::Status as usize] |=
                    mnemonics::MASK_MAX_RT | mnemonics::MASK_TX_DS;
            }
            Link::Silent => {}
        }
    }

    /// The IRQ pin is active (LOW) while an unmasked event flag is set.
    fn irq_active(&self) -> bool {
        let masks = self.regs[Register::Config as usize] & 0x70;
        self.regs[Register::Status as usize] & 0x70 & !masks != 0
    }
}

pub type SharedChip = Rc<RefCell<Chip>>;

pub struct SimBus(SharedChip);

impl spi::ErrorType for SimBus {
    type Error = Infallible;
}

impl SpiBus<u8> for SimBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = self.0.borrow_mut().exchange(0);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for word in words {
            self.0.borrow_mut().exchange(*word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for i in 0..read.len().max(write.len()) {
            let incoming = self
                .0
                .borrow_mut()
                .exchange(write.get(i).copied().unwrap_or(0));
            if let Some(word) = read.get_mut(i) {
                *word = incoming;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = self.0.borrow_mut().exchange(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Line {
    Csn,
    Ce,
}

pub struct SimPin {
    chip: SharedChip,
    line: Line,
}

impl SimPin {
    fn set(&mut self, high: bool) {
        let mut chip = self.chip.borrow_mut();
        match self.line {
            Line::Csn => chip.set_csn(high),
            Line::Ce => chip.set_ce(high),
        }
    }
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

pub struct SimIrq(SharedChip);

impl digital::ErrorType for SimIrq {
    type Error = Infallible;
}

impl InputPin for SimIrq {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let mut chip = self.0.borrow_mut();
        if chip.irq_latency > 0 {
            chip.irq_latency -= 1;
            return Ok(false);
        }
        Ok(chip.irq_active())
    }
}

pub type SimRadio = RF24<SimBus, SimPin, SimIrq, NoopDelay>;

/// Create a driver wired to a fresh simulated chip.
pub fn sim_radio(link: Link) -> (SimRadio, SharedChip) {
    let chip = Rc::new(RefCell::new(Chip::new(link)));
    let radio = RF24::new(
        SimBus(chip.clone()),
        SimPin {
            chip: chip.clone(),
            line: Line::Csn,
        },
        SimPin {
            chip: chip.clone(),
            line: Line::Ce,
        },
        SimIrq(chip.clone()),
        NoopDelay::new(),
    );
    (radio, chip)
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{sim_radio, Link, SimRadio};
    use crate::radio::{prelude::*, mnemonics, Register, TxConfig};
    use crate::{FifoState, TxOutcome, TxState};

    fn tx_ready(link: Link) -> (SimRadio, super::SharedChip) {
        let (mut radio, chip) = sim_radio(link);
        radio.init().unwrap();
        radio.enter_tx_mode(&TxConfig::default()).unwrap();
        (radio, chip)
    }

    #[test]
    fn register_round_trip() {
        let (mut radio, _chip) = sim_radio(Link::Ack);
        let registers = [
            Register::Config,
            Register::EnAa,
            Register::EnRxAddr,
            Register::SetupAw,
            Register::SetupRetr,
            Register::RfSetup,
            Register::RxAddrP2,
            Register::RxAddrP5,
            Register::RxPwP0,
            Register::RxPwP5,
        ];
        for register in registers {
            for value in 0..=u8::MAX {
                radio.write_register(register, value).unwrap();
                assert_eq!(radio.read_register(register).unwrap(), value);
            }
        }
    }

    #[test]
    fn buffer_round_trip() {
        let (mut radio, _chip) = sim_radio(Link::Ack);
        radio.write_buffer(Register::RxAddrP0, b"2Node").unwrap();
        let mut buf = [0u8; 5];
        radio.read_buffer(Register::RxAddrP0, &mut buf).unwrap();
        assert_eq!(&buf, b"2Node");
    }

    #[test]
    fn presence() {
        let (mut radio, chip) = sim_radio(Link::Ack);
        radio.init().unwrap();
        assert!(radio.is_present().unwrap());
        assert_eq!(&chip.borrow().tx_addr, b"nRF24");
        for index in 0..5 {
            chip.borrow_mut().corrupt_echo = Some(index);
            assert!(!radio.is_present().unwrap());
        }
    }

    #[test]
    fn tx_mode_registers() {
        let (mut radio, chip) = sim_radio(Link::Ack);
        radio.init().unwrap();
        let config = TxConfig::default()
            .with_auto_retries(3, 5)
            .with_channel(110)
            .with_tx_address(b"1Node");
        radio.enter_tx_mode(&config).unwrap();
        let chip = chip.borrow();
        assert_eq!(chip.regs[Register::SetupRetr as usize], 0x35);
        assert_eq!(chip.regs[Register::RfSetup as usize], 0x06);
        assert_eq!(chip.regs[Register::Config as usize], 0x0E);
        assert_eq!(chip.regs[Register::RfCh as usize], 110);
        assert_eq!(chip.regs[Register::SetupAw as usize], 3);
        assert_eq!(chip.regs[Register::EnAa as usize], 1);
        assert_eq!(&chip.tx_addr, b"1Node");
        assert_eq!(chip.rx_addr_p0, chip.tx_addr);
    }

    fn transmit_and_settle(link: Link, expected: TxOutcome) {
        let (mut radio, chip) = tx_ready(link);
        assert_eq!(radio.transmit(b"hello").unwrap(), expected);
        assert_eq!(radio.tx_state(), TxState::Idle);
        // TX FIFO is flushed and TX events are cleared
        assert_eq!(radio.get_fifo_state(true).unwrap(), FifoState::Empty);
        assert_eq!(
            chip.borrow().regs[Register::Status as usize]
                & (mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT),
            0
        );
    }

    #[test]
    fn transmit_acknowledged() {
        transmit_and_settle(Link::Ack, TxOutcome::Success);
    }

    #[test]
    fn transmit_not_acknowledged() {
        transmit_and_settle(Link::NoAck, TxOutcome::MaxRetransmitExceeded);
    }

    #[test]
    fn transmit_both_events() {
        transmit_and_settle(Link::Glitch, TxOutcome::MaxRetransmitExceeded);
    }

    #[test]
    fn transmit_timeout() {
        let (mut radio, chip) = tx_ready(Link::Silent);
        radio.irq_timeout = Some(100);
        assert_eq!(radio.transmit(b"hello").unwrap(), TxOutcome::Timeout);
        assert_eq!(radio.tx_state(), TxState::Idle);
        assert!(chip.borrow().tx_fifo.is_empty());
    }

    #[test]
    fn transmit_starts_with_ce_high() {
        let (mut radio, chip) = tx_ready(Link::Ack);
        // a previous owner of the pin left CE active
        chip.borrow_mut().set_ce(true);
        assert_eq!(radio.transmit(b"hello").unwrap(), TxOutcome::Success);
        assert_eq!(chip.borrow().sent, [b"hello".to_vec()]);
    }

    #[test]
    fn unbounded_wait_for_late_irq() {
        let (mut radio, chip) = tx_ready(Link::Ack);
        radio.irq_timeout = None;
        // well past the default timeout of 10000 polls
        chip.borrow_mut().irq_latency = 50_000;
        assert_eq!(radio.transmit(b"hello").unwrap(), TxOutcome::Success);
        assert_eq!(chip.borrow().irq_latency, 0);
        assert_eq!(radio.tx_state(), TxState::Idle);
    }

    #[test]
    fn recover_after_failure() {
        let (mut radio, chip) = tx_ready(Link::NoAck);
        assert_eq!(
            radio.transmit(b"lost").unwrap(),
            TxOutcome::MaxRetransmitExceeded
        );
        assert_eq!(radio.get_last_arc().unwrap(), 15);
        chip.borrow_mut().link = Link::Ack;
        assert_eq!(radio.transmit(b"found").unwrap(), TxOutcome::Success);
        assert_eq!(radio.get_last_arc().unwrap(), 0);
        // the failed payload was not sent with the next one
        assert_eq!(chip.borrow().sent, [b"found".to_vec()]);
    }

    #[test]
    fn stale_events_are_cleared() {
        let (mut radio, chip) = tx_ready(Link::Ack);
        chip.borrow_mut().regs[Register::Status as usize] = mnemonics::MASK_MAX_RT;
        assert_eq!(radio.transmit(b"hello").unwrap(), TxOutcome::Success);
        assert_eq!(chip.borrow().sent.len(), 1);
    }

    #[test]
    fn channel_clears_lost_packets() {
        let (mut radio, chip) = tx_ready(Link::NoAck);
        radio.transmit(b"lost").unwrap();
        assert_eq!(chip.borrow().regs[Register::ObserveTx as usize] >> 4, 1);
        radio.set_channel(200).unwrap();
        assert_eq!(radio.get_channel().unwrap(), 127);
        assert_eq!(chip.borrow().regs[Register::ObserveTx as usize] >> 4, 0);
    }

    #[test]
    fn power_toggles_only_pwr_up() {
        let (mut radio, chip) = tx_ready(Link::Ack);
        radio.set_pa_level(crate::PaLevel::Low).unwrap();
        let before = chip.borrow().regs;
        let addresses = (chip.borrow().tx_addr, chip.borrow().rx_addr_p0);

        radio.power_down().unwrap();
        assert!(!radio.is_powered().unwrap());
        let after_down = chip.borrow().regs;
        for (i, (a, b)) in before.iter().zip(after_down.iter()).enumerate() {
            if i == Register::Config as usize {
                assert_eq!(a ^ b, mnemonics::PWR_UP);
            } else {
                assert_eq!(a, b);
            }
        }

        radio.wake().unwrap();
        assert!(radio.is_powered().unwrap());
        assert_eq!(chip.borrow().regs, before);
        assert_eq!((chip.borrow().tx_addr, chip.borrow().rx_addr_p0), addresses);
    }

    #[test]
    fn powered_down_radio_times_out() {
        let (mut radio, _chip) = tx_ready(Link::Ack);
        radio.power_down().unwrap();
        radio.irq_timeout = Some(50);
        assert_eq!(radio.transmit(b"hello").unwrap(), TxOutcome::Timeout);
    }

    #[test]
    fn status_flags_are_cached() {
        let (mut radio, _chip) = tx_ready(Link::Ack);
        radio.transmit(b"hello").unwrap();
        radio.update().unwrap();
        let flags = radio.get_status_flags();
        assert!(!flags.tx_ds());
        assert!(!flags.tx_df());
        assert_eq!(flags.rx_pipe(), 7);
    }
}
