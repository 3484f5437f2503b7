//! Timing constants and estimator thresholds.
//!
//! Everything time-based is expressed in the unit its consumer works in:
//! milliseconds for the UI and poll cadences, microseconds only inside the
//! pulse capture path.

// =============================================================================
// Poll loop cadences
// =============================================================================

/// Main loop tick. Button polling and event dispatch run at this rate.
pub const POLL_INTERVAL_MS: u64 = 5;

/// Display refresh interval.
pub const DISPLAY_UPDATE_INTERVAL_MS: u32 = 100;

/// Cadence of the periodic estimator pass that enforces the zero-speed
/// timeout even when no pulses arrive.
pub const RPM_TIMEOUT_CHECK_MS: u32 = 100;

// =============================================================================
// Buttons
// =============================================================================

/// Presses shorter than this are treated as contact bounce.
pub const DEBOUNCE_MS: u32 = 50;

/// Hold duration that turns a press into a long press.
pub const LONG_PRESS_MS: u32 = 1_000;

/// Menu inactivity window before it exits (and saves) on its own.
pub const MENU_TIMEOUT_MS: u32 = 10_000;

// =============================================================================
// Estimator
// =============================================================================

/// No pulse for this long means the spindle is stopped: RPM snaps to zero.
pub const RPM_TIMEOUT_MS: u32 = 500;

/// Filtered RPM above this participates in the rapid-deceleration check.
pub const DECEL_MIN_RPM: f32 = 10.0;

/// A raw sample below this fraction of the filtered value bypasses the
/// filter so the display can follow a spin-down immediately.
pub const DECEL_RATIO: f32 = 0.7;

/// Values at or above this render as "HIGH RPM" instead of a number.
/// Display-only; the estimator itself is unaffected.
pub const RPM_DISPLAY_MAX: f32 = 10_000.0;

// =============================================================================
// Boot
// =============================================================================

/// How long the boot screen stays up before the live display takes over.
pub const WELCOME_HOLD_MS: u64 = 2_000;
