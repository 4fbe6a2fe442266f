//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod rf24;
pub use rf24::{mnemonics, Command, Nrf24Error, Register, RF24};

mod config;
pub use config::TxConfig;
