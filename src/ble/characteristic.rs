//! Badge text characteristic value.
//!
//! The peer reads and writes the text shown on the badge through a single
//! 32-byte attribute. A write lands at the requested offset and ends the
//! value there; whatever was stored before `offset` is kept.

use heapless::Vec;

use crate::ble::GattError;
use crate::config::{BADGE_CHARACTERISTIC_LEN, DEFAULT_GREETING};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeCharacteristic {
    value: [u8; BADGE_CHARACTERISTIC_LEN],
    len: usize,
}

impl BadgeCharacteristic {
    /// Characteristic holding the default greeting.
    pub fn new() -> Self {
        let mut value = [0u8; BADGE_CHARACTERISTIC_LEN];
        let greeting = DEFAULT_GREETING.as_bytes();
        let len = greeting.len().min(BADGE_CHARACTERISTIC_LEN);
        value[..len].copy_from_slice(&greeting[..len]);
        Self { value, len }
    }

    /// Apply a peer write and return the resulting text.
    ///
    /// Rejects writes running past the attribute capacity and values that
    /// are not UTF-8. A rejected write leaves the value untouched. The text
    /// ends at the first NUL byte, if any.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<&str, GattError> {
        let end = offset
            .checked_add(data.len())
            .filter(|&end| end <= BADGE_CHARACTERISTIC_LEN)
            .ok_or(GattError::InvalidOffset)?;

        let mut next = self.value;
        next[offset..end].copy_from_slice(data);
        let text_len = next[..end].iter().position(|&b| b == 0).unwrap_or(end);
        core::str::from_utf8(&next[..text_len]).map_err(|_| GattError::InvalidText)?;

        self.value = next;
        self.len = text_len;
        Ok(self.as_str())
    }

    pub fn as_str(&self) -> &str {
        // Only UTF-8 validated bytes are ever committed.
        core::str::from_utf8(&self.value[..self.len]).unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.value[..self.len]
    }

    /// The committed text as the attribute value peers read back.
    ///
    /// Published after every write, accepted or not, so the served value
    /// never holds rejected bytes or anything past the first NUL.
    pub fn attribute_value(&self) -> Vec<u8, BADGE_CHARACTERISTIC_LEN> {
        Vec::from_slice(self.as_bytes()).unwrap_or_default()
    }
}

impl Default for BadgeCharacteristic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let c = BadgeCharacteristic::new();
        assert_eq!(c.as_str(), "Makerville Badge");
        assert_eq!(c.attribute_value().as_slice(), b"Makerville Badge");
    }

    #[test]
    fn write_at_zero_replaces_value() {
        let mut c = BadgeCharacteristic::new();
        assert_eq!(c.write(0, b"Hello").unwrap(), "Hello");
        assert_eq!(c.as_bytes(), b"Hello");
    }

    #[test]
    fn write_at_offset_keeps_prefix() {
        let mut c = BadgeCharacteristic::new();
        assert_eq!(c.write(11, b"Crew").unwrap(), "Makerville Crew");
    }

    #[test]
    fn full_capacity_write_is_accepted() {
        let mut c = BadgeCharacteristic::new();
        let data = [b'x'; BADGE_CHARACTERISTIC_LEN];
        assert_eq!(c.write(0, &data).unwrap().len(), BADGE_CHARACTERISTIC_LEN);
    }

    #[test]
    fn write_past_capacity_is_rejected() {
        let mut c = BadgeCharacteristic::new();
        assert_eq!(c.write(30, b"abc"), Err(GattError::InvalidOffset));
        assert_eq!(c.write(usize::MAX, b"a"), Err(GattError::InvalidOffset));
        assert_eq!(c.as_str(), "Makerville Badge");
    }

    #[test]
    fn invalid_utf8_is_rejected_without_change() {
        let mut c = BadgeCharacteristic::new();
        assert_eq!(c.write(0, &[0xFF, 0xFE]), Err(GattError::InvalidText));
        assert_eq!(c.as_str(), "Makerville Badge");
    }

    #[test]
    fn text_ends_at_nul() {
        let mut c = BadgeCharacteristic::new();
        assert_eq!(c.write(0, b"Hi\0there").unwrap(), "Hi");
    }

    #[test]
    fn rejected_write_publishes_previous_value() {
        let mut c = BadgeCharacteristic::new();
        c.write(0, b"Hello").unwrap();
        assert!(c.write(0, &[0xFF, 0xFE]).is_err());
        assert_eq!(c.attribute_value().as_slice(), b"Hello");
    }

    #[test]
    fn published_value_stops_at_nul() {
        let mut c = BadgeCharacteristic::new();
        c.write(0, b"Hi\0there").unwrap();
        assert_eq!(c.attribute_value().as_slice(), b"Hi");
    }
}
