//! WS2812 status LED strip.
//!
//! All pixels always show the same preset color. The strip is driven over
//! SPI by `ws2812-spi` on target; anything implementing `SmartLedsWrite`
//! works, which is how the host tests observe it.

use smart_leds::{SmartLedsWrite, RGB8};

use crate::config::{LED_INTENSITY, LED_STRIP_PIXELS};

/// Preset strip colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Red,
    Green,
    Blue,
    /// Boot indication.
    White,
}

impl LedColor {
    pub const fn rgb(self) -> RGB8 {
        let i = LED_INTENSITY;
        match self {
            LedColor::Red => RGB8 { r: i, g: 0, b: 0 },
            LedColor::Green => RGB8 { r: 0, g: i, b: 0 },
            LedColor::Blue => RGB8 { r: 0, g: 0, b: i },
            LedColor::White => RGB8 { r: i, g: i, b: i },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LedColor::Red => "RED",
            LedColor::Green => "GREEN",
            LedColor::Blue => "BLUE",
            LedColor::White => "WHITE",
        }
    }
}

/// Anything that can show a preset color.
pub trait LedOutput {
    fn set_color(&mut self, color: LedColor);
}

pub struct StatusLed<W> {
    writer: W,
    color: Option<LedColor>,
}

impl<W> StatusLed<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: None,
        }
    }

    /// Last color successfully written to the strip.
    pub fn color(&self) -> Option<LedColor> {
        self.color
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W> LedOutput for StatusLed<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn set_color(&mut self, color: LedColor) {
        let pixels = [color.rgb(); LED_STRIP_PIXELS];
        match self.writer.write(pixels.iter().cloned()) {
            Ok(()) => {
                debug!("LED strip set to {}", color.name());
                self.color = Some(color);
            }
            Err(_) => error!("LED strip write failed ({})", color.name()),
        }
    }
}
