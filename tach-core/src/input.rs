//! Button line state and short/long press classification.
//!
//! Each button has a [`ButtonLine`] written by its edge task and a
//! [`PressTracker`] owned by the poll loop. The tracker turns raw levels
//! into at most one event per press/release cycle:
//!
//! - [`PressKind::Long`] fires once as soon as the hold reaches the long
//!   press threshold (while still held, so menu navigation does not wait
//!   for the release).
//! - [`PressKind::Short`] fires on release for holds between the debounce
//!   window and the long press threshold.
//! - Releases shorter than the debounce window are contact bounce and
//!   produce nothing.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{DEBOUNCE_MS, LONG_PRESS_MS};

/// A classified press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
}

/// Raw button state shared between the edge task and the poll loop.
/// Lives in a `static`, one per button.
pub struct ButtonLine {
    pressed: AtomicBool,
    pressed_at_ms: AtomicU32,
}

impl ButtonLine {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
            pressed_at_ms: AtomicU32::new(0),
        }
    }

    /// Edge-task side: record the level after an edge. A press edge also
    /// records its timestamp, which is kept across the release so the
    /// consumer can measure the held duration.
    pub fn set_level(&self, pressed: bool, now_ms: u32) {
        if pressed {
            self.pressed_at_ms.store(now_ms, Ordering::Relaxed);
        }
        // Timestamp first, then the level the consumer keys on.
        self.pressed.store(pressed, Ordering::Release);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    pub fn pressed_at_ms(&self) -> u32 {
        self.pressed_at_ms.load(Ordering::Relaxed)
    }
}

impl Default for ButtonLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll-side press classification; one per button.
///
/// Starts in the released-and-handled state, so a tracker polled right
/// after reset emits nothing until a real press is recorded.
pub struct PressTracker {
    seen_press_at: u32,
    long_fired: bool,
    release_handled: bool,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self {
            seen_press_at: 0,
            long_fired: false,
            release_handled: true,
        }
    }

    /// Classify the current line state. Call on every poll tick.
    pub fn poll(&mut self, line: &ButtonLine, now_ms: u32) -> Option<PressKind> {
        let pressed = line.is_pressed();
        let pressed_at = line.pressed_at_ms();

        if pressed {
            if pressed_at != self.seen_press_at {
                // New press cycle.
                self.seen_press_at = pressed_at;
                self.long_fired = false;
                self.release_handled = false;
            }
            if !self.long_fired && now_ms.wrapping_sub(pressed_at) >= LONG_PRESS_MS {
                self.long_fired = true;
                return Some(PressKind::Long);
            }
        } else if !self.release_handled {
            self.release_handled = true;
            let fired_long = self.long_fired;
            self.long_fired = false;
            let held_ms = now_ms.wrapping_sub(self.seen_press_at);
            if !fired_long && (DEBOUNCE_MS..LONG_PRESS_MS).contains(&held_ms) {
                return Some(PressKind::Short);
            }
        }
        None
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_line_emits_nothing() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();
        assert_eq!(tracker.poll(&line, 100), None);
        // Still nothing well past the long press threshold after boot.
        assert_eq!(tracker.poll(&line, 2_000), None);
    }

    #[test]
    fn test_short_press_fires_on_release() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        assert_eq!(tracker.poll(&line, 1_005), None);
        line.set_level(false, 1_200);
        assert_eq!(tracker.poll(&line, 1_205), Some(PressKind::Short));
    }

    #[test]
    fn test_short_press_handled_once() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        tracker.poll(&line, 1_005);
        line.set_level(false, 1_200);
        assert_eq!(tracker.poll(&line, 1_205), Some(PressKind::Short));
        assert_eq!(tracker.poll(&line, 1_210), None);
        assert_eq!(tracker.poll(&line, 1_400), None);
    }

    #[test]
    fn test_bounce_release_discarded() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        tracker.poll(&line, 1_002);
        line.set_level(false, 1_030);
        assert_eq!(tracker.poll(&line, 1_032), None);
    }

    #[test]
    fn test_long_press_fires_while_held_and_latches() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        assert_eq!(tracker.poll(&line, 1_500), None);
        assert_eq!(tracker.poll(&line, 2_000), Some(PressKind::Long));
        // Keep holding: no repeat.
        assert_eq!(tracker.poll(&line, 3_000), None);
        assert_eq!(tracker.poll(&line, 5_000), None);
    }

    #[test]
    fn test_no_short_after_long() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        assert_eq!(tracker.poll(&line, 2_100), Some(PressKind::Long));
        line.set_level(false, 2_500);
        assert_eq!(tracker.poll(&line, 2_505), None);
    }

    #[test]
    fn test_consecutive_presses_each_classified() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        tracker.poll(&line, 1_005);
        line.set_level(false, 1_200);
        assert_eq!(tracker.poll(&line, 1_205), Some(PressKind::Short));

        line.set_level(true, 2_000);
        tracker.poll(&line, 2_005);
        line.set_level(false, 2_300);
        assert_eq!(tracker.poll(&line, 2_305), Some(PressKind::Short));
    }

    #[test]
    fn test_long_then_new_short_press() {
        let line = ButtonLine::new();
        let mut tracker = PressTracker::new();

        line.set_level(true, 1_000);
        assert_eq!(tracker.poll(&line, 2_000), Some(PressKind::Long));
        line.set_level(false, 2_400);
        assert_eq!(tracker.poll(&line, 2_405), None);

        // The latch clears with the cycle; the next press classifies fresh.
        line.set_level(true, 3_000);
        tracker.poll(&line, 3_005);
        line.set_level(false, 3_100);
        assert_eq!(tracker.poll(&line, 3_105), Some(PressKind::Short));
    }
}
