//! GPIO button input.
//!
//! The badge has one button (active-low with internal pull-up). Every edge
//! is timestamped; the release edge is classified into a short or long
//! press and pushed into the event queue.

use embassy_nrf::gpio::Input;
use embassy_time::Instant;

use crate::event_queue::EventQueue;
use crate::ui::input_logic::{Edge, PressTimer};

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, events: &'static EventQueue) -> ! {
    let mut timer = PressTimer::new();

    loop {
        button.wait_for_any_edge().await;

        let edge = if button.is_low() { Edge::Down } else { Edge::Up };
        if let Some(event) = timer.on_edge(edge, Instant::now().as_millis()) {
            info!("Button: {}", event);
            events.emit(event);
        }
    }
}
