//! User interface subsystem - scrolling OLED text + the badge button.
//!
//! ## Components
//!
//! - **Display job**: the shared text document any context may update
//! - **Scroller**: right-to-left marquee, restarted only between passes
//! - **Input logic**: press timing, short vs long classification
//! - **Display** (embedded): SSD1306 128×64 OLED via I²C
//! - **Buttons** (embedded): GPIO edge task feeding the event queue

pub mod display_job;
pub mod input_logic;
pub mod scroll;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
