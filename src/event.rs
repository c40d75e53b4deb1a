//! Discrete events flowing from the adapters into the control loop.

/// Everything the state machine can react to.
///
/// Events carry no payload: adapters translate their own failure codes
/// into one of these coarse tags before handing them to the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The display failed to come up.
    DisplayError,
    /// BLE bring-up, advertising or a connection failed.
    WirelessError,
    /// Button released before the long-press threshold.
    ShortPress,
    /// Button held for at least the long-press threshold.
    LongPress,
}
