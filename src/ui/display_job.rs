//! The shared display document.
//!
//! Any context may request new text; the scroll task picks it up at the end
//! of its current pass. Text and the dirty flag always change together
//! inside one critical section, so the scroll task can never observe a set
//! flag next to half-written text.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::String;

use crate::config::{DISPLAY_TEXT_CAPACITY, DISPLAY_TEXT_MAX_LEN};

/// Text as held by the display job (bounded, no allocation).
pub type DisplayText = String<DISPLAY_TEXT_CAPACITY>;

struct Document {
    text: DisplayText,
    dirty: bool,
}

/// Single-instance display document shared between text requesters and the
/// scroll task.
pub struct DisplayJob {
    doc: Mutex<CriticalSectionRawMutex, RefCell<Document>>,
}

impl DisplayJob {
    pub const fn new() -> Self {
        Self {
            doc: Mutex::new(RefCell::new(Document {
                text: String::new(),
                dirty: false,
            })),
        }
    }

    /// Replace the display text and mark it changed.
    ///
    /// Text longer than [`DISPLAY_TEXT_MAX_LEN`] bytes is truncated on a
    /// character boundary. Must not be called from inside the scroll task's
    /// own critical section.
    pub fn request_text(&self, text: &str) {
        let bounded = bounded_text(text);
        debug!("Display text requested: {}", bounded.as_str());
        self.doc.lock(|doc| {
            let mut doc = doc.borrow_mut();
            doc.text = bounded;
            doc.dirty = true;
        });
    }

    /// Take the pending text if it changed since the last call, clearing
    /// the dirty flag in the same critical section.
    pub fn take_update(&self) -> Option<DisplayText> {
        self.doc.lock(|doc| {
            let mut doc = doc.borrow_mut();
            if doc.dirty {
                doc.dirty = false;
                Some(doc.text.clone())
            } else {
                None
            }
        })
    }

    /// Whether a text change is waiting for the scroll task.
    pub fn is_dirty(&self) -> bool {
        self.doc.lock(|doc| doc.borrow().dirty)
    }

    /// Snapshot of the most recently requested text.
    pub fn text(&self) -> DisplayText {
        self.doc.lock(|doc| doc.borrow().text.clone())
    }
}

impl Default for DisplayJob {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `text` into a display buffer, truncating on a char boundary.
pub fn bounded_text(text: &str) -> DisplayText {
    let mut out = DisplayText::new();
    for c in text.chars() {
        if out.len() + c.len_utf8() > DISPLAY_TEXT_MAX_LEN {
            break;
        }
        // Cannot fail: the length check above keeps us under capacity.
        let _ = out.push(c);
    }
    out
}
