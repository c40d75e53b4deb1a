//! Makerville conference badge firmware.
//!
//! The core (event queue, state machine, control loop, display document,
//! scroll animation, press classification, BLE characteristic value,
//! console) is hardware independent and tested on the host.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! The `embedded` feature adds the nRF52840 adapters (SoftDevice GATT
//! server, SSD1306 scroll task, button task, UART console, [`board`]) used
//! by the firmware binary in `main.rs`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod ble;
pub mod config;
pub mod console;
pub mod control;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod led;
pub mod state_machine;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod board;

pub use control::ControlLoop;
pub use error::{Error, Subsystem};
pub use event::Event;
pub use event_queue::EventQueue;
pub use state_machine::{BadgeState, Board, StateMachine};
pub use ui::display_job::DisplayJob;
