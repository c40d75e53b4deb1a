//! SSD1306 OLED display wrapper and the scroll task.

use embassy_nrf::peripherals;
use embassy_nrf::twim::Twim;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::SCROLL_FRAME_MS;
use crate::error::{Error, Subsystem};
use crate::ui::display_job::DisplayJob;
use crate::ui::scroll::{Frame, ScrollGeometry, Scroller};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// The display as wired on the badge.
pub type BadgeDisplay = Display<Twim<'static, peripherals::TWISPI0>>;

/// Hand-over slot from bring-up to the scroll task.
pub type DisplaySlot = Signal<CriticalSectionRawMutex, BadgeDisplay>;

/// Initialise the SSD1306 display and clear the screen.
///
/// Any bus error during init is a display bring-up failure.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display
        .init()
        .map_err(|_| Error::Bringup(Subsystem::Display))?;
    display.clear_buffer();
    display
        .flush()
        .map_err(|_| Error::Bringup(Subsystem::Display))?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_8X13)
        .text_color(BinaryColor::On)
        .build()
}

/// Render one scroll frame: `text` with its left edge at `frame.x`.
///
/// The first frame of new text blanks the panel itself before drawing, so
/// nothing of the previous text survives a partial flush.
pub fn draw_frame<I2C>(display: &mut Display<I2C>, text: &str, frame: Frame)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();
    if frame.restarted && display.flush().is_err() {
        warn!("Display clear failed");
    }
    let _ = Text::with_baseline(text, Point::new(frame.x, 0), text_style(), Baseline::Top)
        .draw(display);
    if display.flush().is_err() {
        warn!("Display flush failed");
    }
}

/// Drive the scroll animation once the display has been brought up.
#[embassy_executor::task]
pub async fn scroll_task(slot: &'static DisplaySlot, job: &'static DisplayJob) -> ! {
    let mut display = slot.wait().await;
    let mut scroller = Scroller::new(ScrollGeometry::BADGE);
    let mut ticker = Ticker::every(Duration::from_millis(SCROLL_FRAME_MS));
    info!("Scroll task started");

    loop {
        if let Some(frame) = scroller.tick(job) {
            draw_frame(&mut display, scroller.text(), frame);
        }
        ticker.next().await;
    }
}
