//! RPM estimation from drained pulse windows.
//!
//! The estimator runs in the foreground loop: opportunistically when the
//! capture side signals fresh intervals, and on a fixed cadence so the
//! zero-speed timeout fires even when pulses stop entirely.

use core::f32::consts::PI;

use crate::capture::PulseTiming;
use crate::config::{DECEL_MIN_RPM, DECEL_RATIO, RPM_TIMEOUT_MS};
use crate::settings::TachSettings;

/// Raw and filtered spindle speed.
pub struct RpmEstimator {
    raw: f32,
    filtered: f32,
}

impl RpmEstimator {
    pub const fn new() -> Self {
        Self {
            raw: 0.0,
            filtered: 0.0,
        }
    }

    /// The displayed (filtered) value.
    #[inline]
    pub const fn rpm(&self) -> f32 {
        self.filtered
    }

    /// Latest instantaneous sample, before filtering.
    #[inline]
    pub const fn raw_rpm(&self) -> f32 {
        self.raw
    }

    /// Run one estimation pass over everything accumulated since the last
    /// one. Order matters: the drain happens first so the sum/count pair is
    /// consumed and reset no matter which branch returns.
    pub fn recompute(&mut self, timing: &PulseTiming, settings: &TachSettings, now_us: u64) {
        let snap = timing.drain();

        // A stopped spindle stops producing pulses; the estimate has to be
        // forced down, it cannot decay on its own.
        if now_us.saturating_sub(snap.last_pulse_us) > RPM_TIMEOUT_MS as u64 * 1_000 {
            self.raw = 0.0;
            self.filtered = 0.0;
            return;
        }

        if snap.interval_count == 0 {
            // Nothing new; the filtered value coasts until the next window.
            return;
        }
        let mean_us = snap.interval_sum_us / snap.interval_count as u64;
        if mean_us == 0 {
            return;
        }

        let raw = 60_000_000.0 / mean_us as f32 / settings.pulses_per_rev as f32
            * settings.gear_ratio;

        let previous = self.filtered;
        let rapid_decel = previous > DECEL_MIN_RPM && raw < previous * DECEL_RATIO;

        self.filtered = if settings.filter_strength == 0 || rapid_decel || previous == 0.0 {
            raw
        } else {
            let alpha = settings.filter_strength as f32 / 10.0;
            previous * alpha + raw * (1.0 - alpha)
        };
        self.raw = raw;
    }
}

impl Default for RpmEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface speed at the workpiece circumference: ft/min for an inch
/// diameter, m/min for a millimetre one. Below 0.1 RPM reports 0 so a
/// stopped spindle does not show noise.
pub fn surface_speed(rpm: f32, diameter: f32, use_inches: bool) -> f32 {
    if rpm < 0.1 {
        return 0.0;
    }
    if use_inches {
        rpm * diameter * PI / 12.0
    } else {
        rpm * diameter * PI / 1_000.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
