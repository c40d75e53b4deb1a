//! Control loop - the single consumer of the event queue.
//!
//! Every poll period the loop takes at most one event off the queue and
//! hands it to the state machine. Dispatch errors are logged and dropped;
//! nothing escalates out of the loop.

use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::state_machine::{Board, StateMachine};
use crate::ui::display_job::DisplayJob;

pub struct ControlLoop<'a, B: Board> {
    machine: StateMachine<'a, B>,
    events: &'a EventQueue,
}

impl<'a, B: Board> ControlLoop<'a, B> {
    pub fn new(board: B, events: &'a EventQueue, display: &'a DisplayJob) -> Self {
        Self {
            machine: StateMachine::new(board, events, display),
            events,
        }
    }

    /// Enter the initial state (subsystem bring-up).
    pub fn start(&mut self) {
        self.machine.start();
    }

    /// One dispatch cycle. Returns the event that was dispatched, if any.
    pub fn poll_once(&mut self) -> Option<Event> {
        let event = self.events.pop_nonblocking()?;
        if let Err(e) = self.machine.dispatch(event) {
            error!("Dispatch of {} failed: {}", event, e);
        }
        Some(event)
    }

    pub fn machine(&self) -> &StateMachine<'a, B> {
        &self.machine
    }

    /// Start the machine and poll forever at [`CONTROL_POLL_MS`].
    ///
    /// [`CONTROL_POLL_MS`]: crate::config::CONTROL_POLL_MS
    #[cfg(feature = "embedded")]
    pub async fn run(mut self) -> ! {
        use embassy_time::{Duration, Timer};

        info!("Control loop started");
        self.start();

        loop {
            self.poll_once();
            Timer::after(Duration::from_millis(crate::config::CONTROL_POLL_MS)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Subsystem};
    use crate::state_machine::BadgeState;

    struct Healthy;

    impl Board for Healthy {
        fn bring_up(&mut self, _: Subsystem) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn poll_on_empty_queue_does_nothing() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut control = ControlLoop::new(Healthy, &events, &display);
        control.start();
        assert_eq!(control.poll_once(), None);
        assert_eq!(control.machine().context().current_event(), None);
    }

    #[test]
    fn one_event_per_poll_in_arrival_order() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut control = ControlLoop::new(Healthy, &events, &display);
        control.start();

        events.push(Event::ShortPress).unwrap();
        events.push(Event::LongPress).unwrap();

        assert_eq!(control.poll_once(), Some(Event::ShortPress));
        assert_eq!(display.text().as_str(), "Short press");
        assert_eq!(control.poll_once(), Some(Event::LongPress));
        assert_eq!(display.text().as_str(), "Long press");
        assert_eq!(control.poll_once(), None);
    }

    #[test]
    fn dispatch_error_is_swallowed() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut control = ControlLoop::new(Healthy, &events, &display);
        // Not started: dispatch fails, the loop keeps going.
        events.push(Event::ShortPress).unwrap();
        assert_eq!(control.poll_once(), Some(Event::ShortPress));
        assert!(events.is_empty());
        assert_eq!(control.machine().state(), None);

        control.start();
        assert_eq!(control.machine().state(), Some(BadgeState::Idle));
    }
}
