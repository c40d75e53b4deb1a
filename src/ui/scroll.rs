//! Horizontal scroll animation.
//!
//! The animator is a small phase machine advanced one frame per tick by the
//! display task:
//!
//! ```text
//!            text requested
//! Waiting ───────────────────▶ Scrolling ◀──────────┐
//!                                  │ text fully     │ no change
//!                                  ▼ exited left    │
//!                             PassComplete ─────────┘
//!                                  │ text changed
//!                                  └──▶ Scrolling (new text, stage-right)
//! ```
//!
//! There is no terminal phase: once text has been requested the animation
//! loops for as long as it is ticked.

use crate::config::{DISPLAY_WIDTH_PX, GLYPH_WIDTH_PX, SCROLL_STEP_PX};
use crate::ui::display_job::{DisplayJob, DisplayText};

/// Pixel geometry of the scroll stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollGeometry {
    /// Visible width; a pass starts with the text just off the right edge.
    pub stage_width: i32,
    /// Advance width of one character.
    pub glyph_width: i32,
    /// Cursor movement per frame.
    pub step: i32,
}

impl ScrollGeometry {
    /// SSD1306 128 px wide, 8 px glyphs, 2 px per frame.
    pub const BADGE: Self = Self {
        stage_width: DISPLAY_WIDTH_PX,
        glyph_width: GLYPH_WIDTH_PX,
        step: SCROLL_STEP_PX,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollPhase {
    /// No text has been requested yet; nothing is drawn.
    Waiting,
    /// Moving the current text right to left.
    Scrolling,
    /// The text has left the stage; the next tick checks for new text.
    PassComplete,
}

/// One frame to render: draw the animator's text with its left edge at `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub x: i32,
    /// First frame of new text; the panel is blanked before it is drawn.
    pub restarted: bool,
}

pub struct Scroller {
    geometry: ScrollGeometry,
    text: DisplayText,
    cursor: i32,
    phase: ScrollPhase,
    restarted: bool,
    passes: u32,
}

impl Scroller {
    pub const fn new(geometry: ScrollGeometry) -> Self {
        Self {
            geometry,
            text: DisplayText::new(),
            cursor: geometry.stage_width,
            phase: ScrollPhase::Waiting,
            restarted: false,
            passes: 0,
        }
    }

    /// Advance the animation by one frame.
    ///
    /// Returns the frame to draw, or `None` while no text has ever been
    /// requested. New text in `job` is only picked up between passes; the
    /// pass in flight always finishes with the text it started with.
    pub fn tick(&mut self, job: &DisplayJob) -> Option<Frame> {
        match self.phase {
            ScrollPhase::Waiting => {
                let text = job.take_update()?;
                self.begin(text);
            }
            ScrollPhase::PassComplete => match job.take_update() {
                Some(text) => self.begin(text),
                None => self.phase = ScrollPhase::Scrolling,
            },
            ScrollPhase::Scrolling => {}
        }

        let frame = Frame {
            x: self.cursor,
            restarted: core::mem::take(&mut self.restarted),
        };

        self.cursor -= self.geometry.step;
        if self.cursor <= -self.text_width() {
            self.cursor = self.geometry.stage_width;
            self.phase = ScrollPhase::PassComplete;
            self.passes = self.passes.wrapping_add(1);
        }

        Some(frame)
    }

    fn begin(&mut self, text: DisplayText) {
        debug!("Scroll restart: {}", text.as_str());
        self.text = text;
        self.cursor = self.geometry.stage_width;
        self.phase = ScrollPhase::Scrolling;
        self.restarted = true;
    }

    /// Total pixel width of the current text.
    pub fn text_width(&self) -> i32 {
        self.text.chars().count() as i32 * self.geometry.glyph_width
    }

    /// The text frames are currently drawn with.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Number of completed passes since creation.
    pub fn passes(&self) -> u32 {
        self.passes
    }
}
