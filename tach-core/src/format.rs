//! Display text builders.
//!
//! Keeps every formatting decision (decimal rules, truncation, unit marks)
//! out of the drawing code so it can be tested on the host.

use core::fmt::Write;

use heapless::String;

use crate::config::RPM_DISPLAY_MAX;
use crate::menu::MenuField;
use crate::settings::TachSettings;

/// True when the value exceeds what the numeric readout shows; the live
/// screen renders "HIGH RPM" instead.
pub fn rpm_over_display_max(rpm: f32) -> bool {
    rpm >= RPM_DISPLAY_MAX
}

/// RPM readout: one decimal place below 100 when the decimal option is on,
/// the truncated integer otherwise.
pub fn rpm_text(rpm: f32, show_decimal: bool) -> String<8> {
    let mut out = String::new();
    if rpm < 100.0 && show_decimal {
        let _ = write!(out, "{:.1}", rpm);
    } else {
        let _ = write!(out, "{}", rpm as u32);
    }
    out
}

/// Diameter with its unit mark: `1.125"` or `25mm`.
pub fn diameter_text(diameter: f32, use_inches: bool) -> String<12> {
    let mut out = String::new();
    if use_inches {
        let _ = write!(out, "{:.3}\"", diameter);
    } else {
        let _ = write!(out, "{}mm", diameter as u32);
    }
    out
}

/// Label in front of the surface-speed value.
pub fn surface_speed_label(use_inches: bool) -> &'static str {
    if use_inches { "SFM:" } else { "m/min:" }
}

/// Surface-speed value: one decimal below 10, integer otherwise.
pub fn speed_text(speed: f32) -> String<8> {
    let mut out = String::new();
    if speed < 10.0 {
        let _ = write!(out, "{:.1}", speed);
    } else {
        let _ = write!(out, "{}", speed as u32);
    }
    out
}

/// Menu row value for a field.
pub fn field_value_text(field: MenuField, settings: &TachSettings) -> String<12> {
    let mut out = String::new();
    match field {
        MenuField::Pulses => {
            let _ = write!(out, "{}", settings.pulses_per_rev);
        }
        MenuField::Ratio => {
            let _ = write!(out, "{:.1}", settings.gear_ratio);
        }
        MenuField::Decimal => {
            let _ = out.push_str(if settings.show_decimal { "Yes" } else { "No" });
        }
        MenuField::Filter => {
            let _ = write!(out, "{}", settings.filter_strength);
        }
        MenuField::Diameter => {
            return diameter_text(settings.workpiece_diameter, settings.use_inches);
        }
        MenuField::Units => {
            let _ = out.push_str(if settings.use_inches { "Inches" } else { "mm" });
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_text_decimal_below_hundred() {
        assert_eq!(rpm_text(42.5, true).as_str(), "42.5");
        assert_eq!(rpm_text(0.0, true).as_str(), "0.0");
    }

    #[test]
    fn test_rpm_text_integer_above_hundred() {
        assert_eq!(rpm_text(250.7, true).as_str(), "250");
        assert_eq!(rpm_text(9_999.9, true).as_str(), "9999");
    }

    #[test]
    fn test_rpm_text_integer_when_decimal_off() {
        assert_eq!(rpm_text(42.7, false).as_str(), "42");
    }

    #[test]
    fn test_rpm_over_display_max() {
        assert!(!rpm_over_display_max(9_999.9));
        assert!(rpm_over_display_max(10_000.0));
        assert!(rpm_over_display_max(25_000.0));
    }

    #[test]
    fn test_diameter_text() {
        assert_eq!(diameter_text(1.125, true).as_str(), "1.125\"");
        assert_eq!(diameter_text(25.0, false).as_str(), "25mm");
    }

    #[test]
    fn test_surface_speed_label() {
        assert_eq!(surface_speed_label(true), "SFM:");
        assert_eq!(surface_speed_label(false), "m/min:");
    }

    #[test]
    fn test_speed_text() {
        assert_eq!(speed_text(9.94).as_str(), "9.9");
        assert_eq!(speed_text(157.3).as_str(), "157");
        assert_eq!(speed_text(0.0).as_str(), "0.0");
    }

    #[test]
    fn test_field_value_text() {
        let settings = TachSettings {
            pulses_per_rev: 4,
            gear_ratio: 2.5,
            show_decimal: false,
            filter_strength: 7,
            workpiece_diameter: 50.0,
            use_inches: false,
        };
        assert_eq!(field_value_text(MenuField::Pulses, &settings).as_str(), "4");
        assert_eq!(field_value_text(MenuField::Ratio, &settings).as_str(), "2.5");
        assert_eq!(field_value_text(MenuField::Decimal, &settings).as_str(), "No");
        assert_eq!(field_value_text(MenuField::Filter, &settings).as_str(), "7");
        assert_eq!(field_value_text(MenuField::Diameter, &settings).as_str(), "50mm");
        assert_eq!(field_value_text(MenuField::Units, &settings).as_str(), "mm");
    }
}
