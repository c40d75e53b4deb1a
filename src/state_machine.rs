//! Badge state machine.
//!
//! Three flat states, each with an `enter` action and an optional `run`
//! action. State identity is an enum tag; [`BadgeState::handlers`] resolves
//! it to a table entry of plain function pointers with an exhaustive
//! `match`, so dispatch is a lookup rather than dynamic polymorphism.
//!
//! ```text
//!          bring-up ok            WirelessError
//!  Init ───────────────▶ Idle ──────────────────▶ Error (latched)
//!    │                                              ▲
//!    └──────────────── bring-up failed ─────────────┘
//! ```
//!
//! Transitions requested by a handler are applied before the dispatch cycle
//! that triggered them returns: the target's `enter` runs exactly once, and
//! its `run` only sees events dispatched afterwards. Handlers that need the
//! target state to react to an event re-emit it into the queue.

use crate::config::DEFAULT_GREETING;
use crate::error::{Error, Subsystem};
use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::ui::display_job::DisplayJob;

const SHORT_PRESS_TEXT: &str = "Short press";
const LONG_PRESS_TEXT: &str = "Long press";
const ERROR_TEXT: &str = "ERROR";
const DISPLAY_ERROR_TEXT: &str = "DISP ERROR";
const WIRELESS_ERROR_TEXT: &str = "BLE ERROR";

/// Hardware bring-up performed by the initial state.
///
/// Implemented by the firmware over the real peripherals and by test
/// doubles on the host.
pub trait Board {
    /// Initialise one subsystem. Called at most once per subsystem, in
    /// display-then-wireless order.
    fn bring_up(&mut self, subsystem: Subsystem) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BadgeState {
    /// One-shot subsystem bring-up.
    Init,
    /// Normal operation: button presses change the text.
    Idle,
    /// Latched failure display. Nothing leads back out.
    Error,
}

/// Everything a state action is allowed to touch.
pub struct Actions<'a, B> {
    pub board: &'a mut B,
    events: &'a EventQueue,
    display: &'a DisplayJob,
}

impl<B> Actions<'_, B> {
    pub fn set_text(&self, text: &str) {
        self.display.request_text(text);
    }

    pub fn emit(&self, event: Event) {
        self.events.emit(event);
    }
}

/// `enter` action; returns the next state to transition to, if any.
pub type EnterFn<B> = fn(&mut Actions<'_, B>) -> Option<BadgeState>;

/// `run` action; returns the next state to transition to, if any.
pub type RunFn<B> = fn(&mut Actions<'_, B>, Event) -> Option<BadgeState>;

/// One row of the state table.
pub struct StateHandlers<B> {
    pub enter: EnterFn<B>,
    pub run: Option<RunFn<B>>,
}

impl BadgeState {
    /// State table lookup.
    pub fn handlers<B: Board>(self) -> StateHandlers<B> {
        match self {
            BadgeState::Init => StateHandlers {
                enter: init_enter::<B>,
                run: None,
            },
            BadgeState::Idle => StateHandlers {
                enter: idle_enter::<B>,
                run: Some(idle_run::<B>),
            },
            BadgeState::Error => StateHandlers {
                enter: error_enter::<B>,
                run: Some(error_run::<B>),
            },
        }
    }
}

fn init_enter<B: Board>(io: &mut Actions<'_, B>) -> Option<BadgeState> {
    info!("Badge init entry");

    for subsystem in [Subsystem::Display, Subsystem::Wireless] {
        if let Err(e) = io.board.bring_up(subsystem) {
            error!("{} bring-up failed: {}", subsystem, e);
            io.emit(subsystem.failure_event());
            return Some(BadgeState::Error);
        }
    }

    Some(BadgeState::Idle)
}

fn idle_enter<B: Board>(io: &mut Actions<'_, B>) -> Option<BadgeState> {
    info!("Badge idle entry");
    io.set_text(DEFAULT_GREETING);
    None
}

fn idle_run<B: Board>(io: &mut Actions<'_, B>, event: Event) -> Option<BadgeState> {
    match event {
        Event::ShortPress => io.set_text(SHORT_PRESS_TEXT),
        Event::LongPress => io.set_text(LONG_PRESS_TEXT),
        Event::WirelessError => {
            io.emit(Event::WirelessError);
            return Some(BadgeState::Error);
        }
        // Display failures are only detected during bring-up.
        Event::DisplayError => {}
    }
    None
}

fn error_enter<B: Board>(io: &mut Actions<'_, B>) -> Option<BadgeState> {
    info!("Badge error entry");
    io.set_text(ERROR_TEXT);
    None
}

fn error_run<B: Board>(io: &mut Actions<'_, B>, event: Event) -> Option<BadgeState> {
    match event {
        Event::DisplayError => io.set_text(DISPLAY_ERROR_TEXT),
        Event::WirelessError => io.set_text(WIRELESS_ERROR_TEXT),
        Event::ShortPress | Event::LongPress => {}
    }
    None
}

/// The active state and the event being dispatched.
///
/// Only the control loop mutates this, one dispatch cycle at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateMachineContext {
    state: Option<BadgeState>,
    current_event: Option<Event>,
}

impl StateMachineContext {
    /// Active state, `None` before the machine is started.
    pub fn state(&self) -> Option<BadgeState> {
        self.state
    }

    /// The event of the most recent dispatch cycle.
    pub fn current_event(&self) -> Option<Event> {
        self.current_event
    }
}

pub struct StateMachine<'a, B: Board> {
    ctx: StateMachineContext,
    board: B,
    events: &'a EventQueue,
    display: &'a DisplayJob,
}

impl<'a, B: Board> StateMachine<'a, B> {
    pub fn new(board: B, events: &'a EventQueue, display: &'a DisplayJob) -> Self {
        Self {
            ctx: StateMachineContext::default(),
            board,
            events,
            display,
        }
    }

    /// Enter the initial state, running bring-up. Does nothing if the
    /// machine is already running.
    pub fn start(&mut self) {
        if let Some(state) = self.ctx.state {
            warn!("State machine already started in {}", state);
            return;
        }
        self.transition(BadgeState::Init);
    }

    /// Run the active state's `run` action for one event and apply any
    /// transition it requests.
    pub fn dispatch(&mut self, event: Event) -> Result<(), Error> {
        let state = self.ctx.state.ok_or(Error::NotStarted)?;
        self.ctx.current_event = Some(event);

        let run = state
            .handlers::<B>()
            .run
            .ok_or(Error::NoRunAction(state))?;

        let mut io = Actions {
            board: &mut self.board,
            events: self.events,
            display: self.display,
        };
        if let Some(next) = run(&mut io, event) {
            self.transition(next);
        }
        Ok(())
    }

    /// Switch to `target` and run its `enter`, following any further
    /// transitions the entry actions request.
    fn transition(&mut self, target: BadgeState) {
        let mut next = Some(target);
        while let Some(state) = next {
            debug!("State {} -> {}", self.ctx.state, state);
            self.ctx.state = Some(state);

            let mut io = Actions {
                board: &mut self.board,
                events: self.events,
                display: self.display,
            };
            next = (state.handlers::<B>().enter)(&mut io);
        }
    }

    pub fn state(&self) -> Option<BadgeState> {
        self.ctx.state
    }

    pub fn context(&self) -> &StateMachineContext {
        &self.ctx
    }

    pub fn board(&self) -> &B {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBoard {
        failing: Option<Subsystem>,
        brought_up: std::vec::Vec<Subsystem>,
    }

    impl Board for FakeBoard {
        fn bring_up(&mut self, subsystem: Subsystem) -> Result<(), Error> {
            self.brought_up.push(subsystem);
            if self.failing == Some(subsystem) {
                Err(Error::Bringup(subsystem))
            } else {
                Ok(())
            }
        }
    }

    fn failing(subsystem: Subsystem) -> FakeBoard {
        FakeBoard {
            failing: Some(subsystem),
            ..FakeBoard::default()
        }
    }

    /// Drain the queue through the machine like the control loop does.
    fn drain(machine: &mut StateMachine<'_, FakeBoard>, events: &EventQueue) {
        while let Some(event) = events.pop_nonblocking() {
            let _ = machine.dispatch(event);
        }
    }

    #[test]
    fn dispatch_before_start_is_rejected() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        assert_eq!(machine.dispatch(Event::ShortPress), Err(Error::NotStarted));
        assert_eq!(machine.state(), None);
    }

    #[test]
    fn successful_bringup_lands_in_idle_with_greeting() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        machine.start();

        assert_eq!(machine.state(), Some(BadgeState::Idle));
        assert_eq!(
            machine.board().brought_up,
            [Subsystem::Display, Subsystem::Wireless]
        );
        assert_eq!(display.take_update().unwrap().as_str(), DEFAULT_GREETING);
        assert!(events.is_empty());
    }

    #[test]
    fn start_twice_does_not_rerun_bringup() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        machine.start();
        machine.start();
        assert_eq!(machine.board().brought_up.len(), 2);
    }

    #[test]
    fn display_failure_latches_error_and_skips_wireless() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(failing(Subsystem::Display), &events, &display);
        machine.start();

        assert_eq!(machine.state(), Some(BadgeState::Error));
        assert_eq!(machine.board().brought_up, [Subsystem::Display]);
        assert_eq!(display.take_update().unwrap().as_str(), "ERROR");

        drain(&mut machine, &events);
        assert_eq!(display.take_update().unwrap().as_str(), "DISP ERROR");
        assert_eq!(machine.context().current_event(), Some(Event::DisplayError));
    }

    #[test]
    fn wireless_failure_latches_error() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(failing(Subsystem::Wireless), &events, &display);
        machine.start();

        assert_eq!(machine.state(), Some(BadgeState::Error));
        assert_eq!(events.len(), 1);
        drain(&mut machine, &events);
        assert_eq!(display.text().as_str(), "BLE ERROR");
    }

    #[test]
    fn idle_maps_presses_to_text() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        machine.start();

        machine.dispatch(Event::ShortPress).unwrap();
        assert_eq!(display.text().as_str(), "Short press");
        machine.dispatch(Event::LongPress).unwrap();
        assert_eq!(display.text().as_str(), "Long press");
        assert_eq!(machine.state(), Some(BadgeState::Idle));
    }

    #[test]
    fn idle_ignores_display_error() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        machine.start();
        display.take_update();

        machine.dispatch(Event::DisplayError).unwrap();
        assert_eq!(machine.state(), Some(BadgeState::Idle));
        assert!(!display.is_dirty());
        assert!(events.is_empty());
    }

    #[test]
    fn idle_wireless_error_reemits_into_error_state() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(FakeBoard::default(), &events, &display);
        machine.start();

        machine.dispatch(Event::WirelessError).unwrap();
        assert_eq!(machine.state(), Some(BadgeState::Error));
        // Error's enter ran; the triggering event did not reach Error's run.
        assert_eq!(display.text().as_str(), "ERROR");
        assert_eq!(events.len(), 1);

        drain(&mut machine, &events);
        assert_eq!(display.text().as_str(), "BLE ERROR");
    }

    #[test]
    fn error_state_is_a_latch() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(failing(Subsystem::Display), &events, &display);
        machine.start();
        drain(&mut machine, &events);

        for event in [
            Event::ShortPress,
            Event::LongPress,
            Event::WirelessError,
            Event::DisplayError,
        ] {
            machine.dispatch(event).unwrap();
            assert_eq!(machine.state(), Some(BadgeState::Error));
        }
        assert_eq!(display.text().as_str(), "DISP ERROR");
        assert!(events.is_empty());
    }

    #[test]
    fn error_ignores_presses() {
        let (events, display) = (EventQueue::new(), DisplayJob::new());
        let mut machine = StateMachine::new(failing(Subsystem::Wireless), &events, &display);
        machine.start();
        drain(&mut machine, &events);
        display.take_update();

        machine.dispatch(Event::ShortPress).unwrap();
        machine.dispatch(Event::LongPress).unwrap();
        assert!(!display.is_dirty());
    }

    #[test]
    fn init_has_no_run_action() {
        assert!(BadgeState::Init.handlers::<FakeBoard>().run.is_none());
        assert!(BadgeState::Idle.handlers::<FakeBoard>().run.is_some());
        assert!(BadgeState::Error.handlers::<FakeBoard>().run.is_some());
    }
}
