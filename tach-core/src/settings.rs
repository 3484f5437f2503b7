//! Persistent tachometer settings.
//!
//! This module provides:
//! - [`TachSettings`] - the settings record and its documented defaults
//! - stepping rules for the menu (wraparound at range edges, never clamping)
//! - the unit toggle with grid snapping
//! - the fixed-layout flash codec ([`TachSettings::encode`] /
//!   [`TachSettings::decode`])
//!
//! Stepped float fields move on an integer grid (tenths for the gear ratio,
//! eighths of an inch or whole millimetres for the diameter) so repeated
//! adjustments cannot drift off the documented increments.

#[cfg(not(test))]
use micromath::F32Ext;

// =============================================================================
// Ranges and increments
// =============================================================================

pub const PULSES_MIN: u8 = 1;
pub const PULSES_MAX: u8 = 66;

pub const RATIO_MIN: f32 = 0.1;
pub const RATIO_MAX: f32 = 10.0;

pub const FILTER_MAX: u8 = 10;

pub const DIAMETER_IN_MIN: f32 = 0.125;
pub const DIAMETER_IN_MAX: f32 = 12.0;
pub const DIAMETER_MM_MIN: f32 = 1.0;
pub const DIAMETER_MM_MAX: f32 = 300.0;

pub const MM_PER_INCH: f32 = 25.4;

// Integer grids backing the stepped float fields.
const RATIO_MIN_TENTHS: i32 = 1; // 0.1
const RATIO_MAX_TENTHS: i32 = 100; // 10.0
const DIA_IN_MIN_EIGHTHS: i32 = 1; // 1/8"
const DIA_IN_MAX_EIGHTHS: i32 = 96; // 12"
const DIA_MM_MIN_WHOLE: i32 = 1;
const DIA_MM_MAX_WHOLE: i32 = 300;

// =============================================================================
// Stored record layout
// =============================================================================

/// Marker that distinguishes a programmed record from erased flash.
pub const SETTINGS_MAGIC: u32 = 0xABCD_1234;

/// Serialized record length: marker + fields, little-endian, fixed offsets.
pub const RECORD_LEN: usize = 16;

/// Direction of a settings adjustment, mapped from the UP/DOWN buttons.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    const fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// The persistent settings record.
///
/// `workpiece_diameter` is stored in whichever unit `use_inches` selects;
/// toggling the unit converts the stored value.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TachSettings {
    /// Hall pulses per spindle revolution (1..=66).
    pub pulses_per_rev: u8,
    /// Spindle revolutions per sensed revolution (0.1..=10.0, 0.1 steps).
    pub gear_ratio: f32,
    /// Show one decimal place below 100 RPM.
    pub show_decimal: bool,
    /// EMA weight, 0 = filtering off, 10 = heaviest smoothing.
    pub filter_strength: u8,
    /// Workpiece diameter in the active unit (1/8" or 1 mm grid).
    pub workpiece_diameter: f32,
    /// Diameter and surface speed in inches / ft/min instead of mm / m/min.
    pub use_inches: bool,
}

impl TachSettings {
    /// Documented defaults: 1 pulse/rev, 1:1 ratio, decimal shown, light
    /// filtering, 25 mm workpiece, metric units.
    pub const fn new() -> Self {
        Self {
            pulses_per_rev: 1,
            gear_ratio: 1.0,
            show_decimal: true,
            filter_strength: 3,
            workpiece_diameter: 25.0,
            use_inches: false,
        }
    }

    // =========================================================================
    // Menu stepping (wraparound, never clamping)
    // =========================================================================

    pub fn step_pulses(&mut self, dir: Direction) {
        self.pulses_per_rev = match dir {
            Direction::Up if self.pulses_per_rev >= PULSES_MAX => PULSES_MIN,
            Direction::Up => self.pulses_per_rev + 1,
            Direction::Down if self.pulses_per_rev <= PULSES_MIN => PULSES_MAX,
            Direction::Down => self.pulses_per_rev - 1,
        };
    }

    pub fn step_ratio(&mut self, dir: Direction) {
        let mut tenths = (self.gear_ratio * 10.0).round() as i32 + dir.delta();
        if tenths > RATIO_MAX_TENTHS {
            tenths = RATIO_MIN_TENTHS;
        } else if tenths < RATIO_MIN_TENTHS {
            tenths = RATIO_MAX_TENTHS;
        }
        self.gear_ratio = tenths as f32 / 10.0;
    }

    pub fn step_filter(&mut self, dir: Direction) {
        self.filter_strength = match dir {
            Direction::Up if self.filter_strength >= FILTER_MAX => 0,
            Direction::Up => self.filter_strength + 1,
            Direction::Down if self.filter_strength == 0 => FILTER_MAX,
            Direction::Down => self.filter_strength - 1,
        };
    }

    /// Step the diameter on the grid of the active unit. Also used for the
    /// direct adjustment from the live screen.
    pub fn step_diameter(&mut self, dir: Direction) {
        if self.use_inches {
            let mut eighths = (self.workpiece_diameter * 8.0).round() as i32 + dir.delta();
            if eighths > DIA_IN_MAX_EIGHTHS {
                eighths = DIA_IN_MIN_EIGHTHS;
            } else if eighths < DIA_IN_MIN_EIGHTHS {
                eighths = DIA_IN_MAX_EIGHTHS;
            }
            self.workpiece_diameter = eighths as f32 / 8.0;
        } else {
            let mut mm = self.workpiece_diameter.round() as i32 + dir.delta();
            if mm > DIA_MM_MAX_WHOLE {
                mm = DIA_MM_MIN_WHOLE;
            } else if mm < DIA_MM_MIN_WHOLE {
                mm = DIA_MM_MAX_WHOLE;
            }
            self.workpiece_diameter = mm as f32;
        }
    }

    /// Flip the unit and convert the stored diameter through 25.4 mm/inch,
    /// snapped to the target grid and clamped into the target range (so a
    /// 12.0" workpiece becomes 300 mm, not 305 mm).
    pub fn toggle_units(&mut self) {
        self.use_inches = !self.use_inches;
        self.workpiece_diameter = if self.use_inches {
            snap_inches(self.workpiece_diameter / MM_PER_INCH)
        } else {
            snap_mm(self.workpiece_diameter * MM_PER_INCH)
        };
    }

    // =========================================================================
    // Flash codec
    // =========================================================================

    /// Serialize to the fixed little-endian layout.
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        out[4] = self.pulses_per_rev;
        out[5..9].copy_from_slice(&self.gear_ratio.to_le_bytes());
        out[9] = self.show_decimal as u8;
        out[10] = self.filter_strength;
        out[11..15].copy_from_slice(&self.workpiece_diameter.to_le_bytes());
        out[15] = self.use_inches as u8;
        out
    }

    /// Decode a stored record. `None` when the buffer is too short or the
    /// validity marker does not match (erased or corrupted flash).
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < RECORD_LEN {
            return None;
        }
        let magic = u32::from_le_bytes(bytes[0..4].try_into().ok()?);
        if magic != SETTINGS_MAGIC {
            return None;
        }
        Some(Self {
            pulses_per_rev: bytes[4],
            gear_ratio: f32::from_le_bytes(bytes[5..9].try_into().ok()?),
            show_decimal: bytes[9] != 0,
            filter_strength: bytes[10],
            workpiece_diameter: f32::from_le_bytes(bytes[11..15].try_into().ok()?),
            use_inches: bytes[15] != 0,
        })
    }

    /// Decode with defaults fallback. The `bool` is true when the stored
    /// record was unusable and the caller should write the defaults back so
    /// the next boot finds a valid record.
    pub fn from_stored(bytes: &[u8]) -> (Self, bool) {
        match Self::decode(bytes) {
            Some(settings) => (settings, false),
            None => (Self::new(), true),
        }
    }
}

impl Default for TachSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn snap_inches(inches: f32) -> f32 {
    let eighths = ((inches * 8.0).round() as i32).clamp(DIA_IN_MIN_EIGHTHS, DIA_IN_MAX_EIGHTHS);
    eighths as f32 / 8.0
}

fn snap_mm(mm: f32) -> f32 {
    let whole = (mm.round() as i32).clamp(DIA_MM_MIN_WHOLE, DIA_MM_MAX_WHOLE);
    whole as f32
}

// =============================================================================
// Unit Tests
// =============================================================================
