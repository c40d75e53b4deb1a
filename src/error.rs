//! Unified error type for the badge firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use crate::ble::GattError;
use crate::event::Event;
use crate::state_machine::BadgeState;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A subsystem failed its one-time initialisation.
    Bringup(Subsystem),

    /// The event queue was full; the event was dropped.
    QueueFull,

    /// An event was dispatched before the state machine was started.
    NotStarted,

    /// An event was dispatched to a state without a `run` action.
    NoRunAction(BadgeState),

    /// The peer's write to the badge characteristic was rejected.
    Gatt(GattError),
}

/// Subsystems brought up on entry to the initial state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    Display,
    Wireless,
}

impl Subsystem {
    /// The event a failure of this subsystem is reported as.
    pub const fn failure_event(self) -> Event {
        match self {
            Subsystem::Display => Event::DisplayError,
            Subsystem::Wireless => Event::WirelessError,
        }
    }
}

// Convenience conversions

impl From<GattError> for Error {
    fn from(e: GattError) -> Self {
        Error::Gatt(e)
    }
}
