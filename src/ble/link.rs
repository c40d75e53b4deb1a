//! Advertising lifecycle.
//!
//! Decides when the BLE task advertises and which failures it reports,
//! independently of the SoftDevice calls that carry it out. Advertising
//! restarts after every disconnect. A failed advertising start is reported
//! once and takes the link down for good; there is no retry.

use crate::event::Event;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Waiting for (or about to start) advertising.
    Advertising,
    /// A peer is connected.
    Connected,
    /// Advertising failed; the link stays down.
    Failed,
}

#[derive(Clone, Copy, Debug)]
pub struct Link {
    state: LinkState,
}

impl Link {
    pub const fn new() -> Self {
        Self {
            state: LinkState::Advertising,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Whether the task should start advertising now.
    pub fn should_advertise(&self) -> bool {
        self.state == LinkState::Advertising
    }

    pub fn on_connected(&mut self) {
        if self.state == LinkState::Advertising {
            self.state = LinkState::Connected;
        }
    }

    /// The peer went away; advertise again.
    pub fn on_disconnected(&mut self) {
        if self.state == LinkState::Connected {
            self.state = LinkState::Advertising;
        }
    }

    /// Advertising or connection setup failed.
    ///
    /// Returns the event to report the first time only.
    pub fn on_advertise_failed(&mut self) -> Option<Event> {
        if self.state == LinkState::Failed {
            return None;
        }
        self.state = LinkState::Failed;
        Some(Event::WirelessError)
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_again_after_every_disconnect() {
        let mut link = Link::new();
        for _ in 0..3 {
            assert!(link.should_advertise());
            link.on_connected();
            assert_eq!(link.state(), LinkState::Connected);
            assert!(!link.should_advertise());
            link.on_disconnected();
        }
        assert!(link.should_advertise());
    }

    #[test]
    fn advertise_failure_is_reported_once_and_stops_advertising() {
        let mut link = Link::new();
        assert_eq!(link.on_advertise_failed(), Some(Event::WirelessError));
        assert!(!link.should_advertise());
        assert_eq!(link.on_advertise_failed(), None);
        assert_eq!(link.state(), LinkState::Failed);
    }

    #[test]
    fn failed_link_ignores_later_connection_callbacks() {
        let mut link = Link::new();
        link.on_advertise_failed();
        link.on_connected();
        link.on_disconnected();
        assert_eq!(link.state(), LinkState::Failed);
        assert!(!link.should_advertise());
    }
}
