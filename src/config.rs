//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Event handling

/// Maximum number of pending events between producers and the control loop.
pub const EVENT_QUEUE_CAPACITY: usize = 10;

/// Control loop poll period (ms).
pub const CONTROL_POLL_MS: u64 = 10;

/// A press held at least this long (ms) is a long press.
pub const LONG_PRESS_THRESHOLD_MS: u64 = 1000;

// Display

/// Size of the shared display text buffer (bytes, including the terminator
/// slot the badge protocol reserves).
pub const DISPLAY_TEXT_CAPACITY: usize = 32;

/// Longest text the display job will hold (bytes).
pub const DISPLAY_TEXT_MAX_LEN: usize = DISPLAY_TEXT_CAPACITY - 1;

/// Visible stage width (px) - SSD1306 128x64.
pub const DISPLAY_WIDTH_PX: i32 = 128;

/// Advance width of one glyph of the scroll font (px).
pub const GLYPH_WIDTH_PX: i32 = 8;

/// Cursor movement per animation frame (px).
pub const SCROLL_STEP_PX: i32 = 2;

/// Delay between two animation frames (ms).
pub const SCROLL_FRAME_MS: u64 = 10;

/// Text shown when the badge reaches Idle.
pub const DEFAULT_GREETING: &str = "Makerville Badge";

// BLE

/// Advertised GAP device name.
pub const BLE_DEVICE_NAME: &str = "Makerville Badge";

/// 16-bit UUID of the badge GATT service.
pub const BADGE_SERVICE_UUID: u16 = 0x1234;

/// 16-bit UUID of the badge text characteristic.
pub const BADGE_CHARACTERISTIC_UUID: u16 = 0x5678;

/// Capacity of the badge text characteristic value (bytes).
pub const BADGE_CHARACTERISTIC_LEN: usize = 32;

/// Pause before advertising is (re)started (ms).
pub const BLE_ADV_RESTART_DELAY_MS: u64 = 1000;

/// Fast advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

// LED strip

/// Number of WS2812 pixels chained on the badge.
pub const LED_STRIP_PIXELS: usize = 4;

/// Per-channel intensity used for every preset color.
pub const LED_INTENSITY: u8 = 0x0F;

// Console

/// Longest accepted console line (bytes).
pub const CONSOLE_LINE_LEN: usize = 64;

// GPIO pin assignments (badge rev A)
//
//   Button         → P0.11 (active-low, internal pull-up)
//   I²C SDA (OLED) → P0.26
//   I²C SCL (OLED) → P0.27
//   LED strip DIN  → P0.13 (SPIM3 MOSI)
//   Console TX     → P0.06
//   Console RX     → P0.08
