//! Shared pulse-interval accumulator.
//!
//! The producer ([`PulseTiming::record_pulse`]) runs in edge context, the
//! consumer ([`PulseTiming::drain`]) in the foreground loop. The interval
//! sum and count form a matched pair: both sides touch them only inside a
//! critical section, and the one read path resets them in the same section,
//! so a consumer can never pair a sum with a count from a different set of
//! pulses.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

#[derive(Clone, Copy)]
struct Window {
    last_pulse_us: u64,
    interval_sum_us: u64,
    interval_count: u32,
}

const EMPTY: Window = Window {
    last_pulse_us: 0,
    interval_sum_us: 0,
    interval_count: 0,
};

/// One drained accumulator window.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PulseSnapshot {
    /// Timestamp of the most recent pulse, 0 if none has ever arrived.
    pub last_pulse_us: u64,
    /// Sum of the pulse-to-pulse intervals in this window.
    pub interval_sum_us: u64,
    /// Number of intervals in the sum.
    pub interval_count: u32,
}

/// Pulse timing state shared between the sensor edge task and the
/// foreground loop. Lives in a `static`.
pub struct PulseTiming {
    window: Mutex<Cell<Window>>,
    // Hint that fresh intervals exist; the data itself always travels
    // through the critical section, so Relaxed is enough.
    ready: AtomicBool,
}

impl PulseTiming {
    pub const fn new() -> Self {
        Self {
            window: Mutex::new(Cell::new(EMPTY)),
            ready: AtomicBool::new(false),
        }
    }

    /// Record one sensor pulse. The first pulse after reset only seeds the
    /// timestamp; every later one accumulates the interval since its
    /// predecessor. Timestamps come from a monotonic microsecond clock.
    pub fn record_pulse(&self, now_us: u64) {
        critical_section::with(|cs| {
            let cell = self.window.borrow(cs);
            let mut w = cell.get();
            if w.last_pulse_us != 0 {
                w.interval_sum_us += now_us.saturating_sub(w.last_pulse_us);
                w.interval_count += 1;
                self.ready.store(true, Ordering::Relaxed);
            }
            w.last_pulse_us = now_us;
            cell.set(w);
        });
    }

    /// Copy the window out and reset the sum/count pair, atomically. This is
    /// the only way to read the accumulator. `last_pulse_us` survives the
    /// drain so the zero-speed timeout keeps working while the spindle is
    /// stopped.
    pub fn drain(&self) -> PulseSnapshot {
        critical_section::with(|cs| {
            let cell = self.window.borrow(cs);
            let w = cell.get();
            cell.set(Window {
                last_pulse_us: w.last_pulse_us,
                ..EMPTY
            });
            self.ready.store(false, Ordering::Relaxed);
            PulseSnapshot {
                last_pulse_us: w.last_pulse_us,
                interval_sum_us: w.interval_sum_us,
                interval_count: w.interval_count,
            }
        })
    }

    /// Clear and return the ready flag. Lets the foreground recompute as
    /// soon as intervals exist instead of waiting for the periodic tick.
    pub fn take_ready(&self) -> bool {
        self.ready.swap(false, Ordering::Relaxed)
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
