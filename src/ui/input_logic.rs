use crate::config::LONG_PRESS_THRESHOLD_MS;
use crate::event::Event;

/// Logical button edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Down,
    Up,
}

/// Classify a completed press by how long it was held.
///
/// The boundary belongs to the long side: exactly the threshold is a
/// long press.
pub fn classify_press(held_ms: u64) -> Event {
    if held_ms >= LONG_PRESS_THRESHOLD_MS {
        Event::LongPress
    } else {
        Event::ShortPress
    }
}

/// Remembers when the tracked button went down.
///
/// Owned by the button handler alone; never shared across contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressTimer {
    pressed_at_ms: Option<u64>,
}

impl PressTimer {
    pub const fn new() -> Self {
        Self { pressed_at_ms: None }
    }

    /// Feed one edge observed at `now_ms` (monotonic uptime).
    ///
    /// Returns the classified press on the release edge. A release with no
    /// recorded press yields nothing.
    pub fn on_edge(&mut self, edge: Edge, now_ms: u64) -> Option<Event> {
        match edge {
            Edge::Down => {
                self.pressed_at_ms = Some(now_ms);
                None
            }
            Edge::Up => {
                let pressed_at = self.pressed_at_ms.take()?;
                Some(classify_press(now_ms.saturating_sub(pressed_at)))
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive_on_the_long_side() {
        assert_eq!(classify_press(0), Event::ShortPress);
        assert_eq!(classify_press(999), Event::ShortPress);
        assert_eq!(classify_press(1000), Event::LongPress);
        assert_eq!(classify_press(5000), Event::LongPress);
    }

    #[test]
    fn press_and_release_classify() {
        let mut timer = PressTimer::new();
        assert_eq!(timer.on_edge(Edge::Down, 10_000), None);
        assert!(timer.is_pressed());
        assert_eq!(timer.on_edge(Edge::Up, 10_250), Some(Event::ShortPress));
        assert!(!timer.is_pressed());

        timer.on_edge(Edge::Down, 20_000);
        assert_eq!(timer.on_edge(Edge::Up, 21_000), Some(Event::LongPress));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut timer = PressTimer::new();
        assert_eq!(timer.on_edge(Edge::Up, 500), None);
    }

    #[test]
    fn repeated_down_restarts_the_timer() {
        let mut timer = PressTimer::new();
        timer.on_edge(Edge::Down, 0);
        timer.on_edge(Edge::Down, 900);
        assert_eq!(timer.on_edge(Edge::Up, 1500), Some(Event::ShortPress));
    }

    #[test]
    fn clock_going_backwards_counts_as_short() {
        let mut timer = PressTimer::new();
        timer.on_edge(Edge::Down, 2000);
        assert_eq!(timer.on_edge(Edge::Up, 1000), Some(Event::ShortPress));
    }
}
