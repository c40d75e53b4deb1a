//! Bluetooth Low Energy subsystem.
//!
//! The badge runs the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertising** - connectable undirected advertising carrying the
//!    badge name, restarted after every disconnect ([`Link`]).
//! 2. **Badge service** - one GATT service (0x1234) with a read/write text
//!    characteristic (0x5678). A peer write goes straight to the display.
//! 3. **Failure reporting** - an advertising or connection failure is pushed
//!    into the event queue once as `Event::WirelessError`; advertising then
//!    stays off.

pub mod characteristic;
pub mod link;
#[cfg(feature = "embedded")]
pub mod server;

pub use characteristic::BadgeCharacteristic;
pub use link::{Link, LinkState};

/// AD type: flags.
const AD_FLAGS: u8 = 0x01;
/// AD type: complete list of 16-bit service UUIDs.
const AD_COMPLETE_16BIT_UUIDS: u8 = 0x03;
/// AD type: complete local name.
const AD_COMPLETE_LOCAL_NAME: u8 = 0x09;
/// LE General Discoverable, BR/EDR not supported.
const FLAGS_LE_GENERAL_DISC: u8 = 0x06;

/// Rejected peer access to the badge characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GattError {
    /// `offset + len` runs past the attribute capacity.
    InvalidOffset,
    /// The written value is not valid UTF-8.
    InvalidText,
}

/// Advertising payload: flags + complete local name.
///
/// `N` must be `5 + name.len()` and at most 31 bytes.
pub const fn advertising_data<const N: usize>(name: &str) -> [u8; N] {
    let name = name.as_bytes();
    assert!(N == 5 + name.len() && N <= 31);

    let mut out = [0u8; N];
    out[0] = 2;
    out[1] = AD_FLAGS;
    out[2] = FLAGS_LE_GENERAL_DISC;
    out[3] = name.len() as u8 + 1;
    out[4] = AD_COMPLETE_LOCAL_NAME;
    let mut i = 0;
    while i < name.len() {
        out[5 + i] = name[i];
        i += 1;
    }
    out
}

/// Scan response payload: the badge service UUID.
pub const fn scan_response_data(service_uuid: u16) -> [u8; 4] {
    let le = service_uuid.to_le_bytes();
    [3, AD_COMPLETE_16BIT_UUIDS, le[0], le[1]]
}
