#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`RF24::new()`](fn@crate::radio::RF24::new)
//! - [`RF24::init()`](radio/struct.RF24.html#method.init)
//! - [`RF24::is_present()`](radio/struct.RF24.html#method.is_present)
//! - [`RF24::enter_tx_mode()`](radio/struct.RF24.html#method.enter_tx_mode)
//! - [`RF24::transmit()`](radio/struct.RF24.html#method.transmit)
//! - [`RF24::set_channel()`](radio/struct.RF24.html#method.set_channel)
//! - [`RF24::get_channel()`](radio/struct.RF24.html#method.get_channel)
//! - [`RF24::irq_timeout`](value@crate::radio::RF24::irq_timeout)
//!
//! ## Advanced API
//!
//! - [`RF24::tx_state()`](radio/struct.RF24.html#method.tx_state)
//! - [`RF24::get_last_arc()`](radio/struct.RF24.html#method.get_last_arc)
//! - [`RF24::get_fifo_state()`](radio/struct.RF24.html#method.get_fifo_state)
//! - [`RF24::clear_status_flags()`](radio/struct.RF24.html#method.clear_status_flags)
//! - [`RF24::update()`](radio/struct.RF24.html#method.update)
//! - [`RF24::get_status_flags()`](radio/struct.RF24.html#method.get_status_flags)
//! - [`RF24::flush_rx()`](radio/struct.RF24.html#method.flush_rx)
//! - [`RF24::flush_tx()`](radio/struct.RF24.html#method.flush_tx)
//! - [`RF24::release()`](fn@crate::radio::RF24::release)
//!
//! ## Register API
//!
//! - [`RF24::read_register()`](fn@crate::radio::RF24::read_register)
//! - [`RF24::write_register()`](fn@crate::radio::RF24::write_register)
//! - [`RF24::read_buffer()`](fn@crate::radio::RF24::read_buffer)
//! - [`RF24::write_buffer()`](fn@crate::radio::RF24::write_buffer)
//! - [`RF24::command()`](fn@crate::radio::RF24::command)
//!
//! ## Configuration API
//!
//! - [`TxConfig`](struct@crate::radio::TxConfig)
//! - [`RF24::set_pa_level()`](radio/struct.RF24.html#method.set_pa_level)
//! - [`RF24::get_pa_level()`](radio/struct.RF24.html#method.get_pa_level)
//! - [`RF24::is_powered()`](radio/struct.RF24.html#method.is_powered)
//! - [`RF24::wake()`](radio/struct.RF24.html#method.wake)
//! - [`RF24::power_down()`](radio/struct.RF24.html#method.power_down)
//!
#![no_std]

mod types;
pub use types::{CrcLength, DataRate, FifoState, PaLevel, StatusFlags, TxOutcome, TxState};
pub mod radio;

#[cfg(test)]
mod sim;
