//! Live tachometer screen: large RPM readout with a diameter and
//! surface-speed footer.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use tach_core::format::{
    diameter_text, rpm_over_display_max, rpm_text, speed_text, surface_speed_label,
};
use tach_core::settings::TachSettings;

use super::{FOOTER_Y, SCREEN_WIDTH};
use crate::styles::{CENTERED_TOP, FOOTER_STYLE, TITLE_STYLE, VALUE_CHAR_WIDTH, VALUE_STYLE};

/// Right margin for right-justified readings.
const VALUE_MARGIN: i32 = 10;

pub fn draw_live<D>(display: &mut D, rpm: f32, speed: f32, settings: &TachSettings)
where
    D: DrawTarget<Color = BinaryColor>,
{
    if rpm_over_display_max(rpm) {
        // Out of the display range; the estimator itself is unaffected.
        Text::with_text_style(
            "HIGH RPM",
            Point::new(SCREEN_WIDTH as i32 / 2, 20),
            TITLE_STYLE,
            CENTERED_TOP,
        )
        .draw(display)
        .ok();
    } else {
        let text = rpm_text(rpm, settings.show_decimal);
        // Short readings sit against the right edge; from 1000 up the
        // digits run wide and start at the left edge instead.
        let x = if rpm < 1000.0 {
            let width = text.len() as i32 * VALUE_CHAR_WIDTH as i32;
            (SCREEN_WIDTH as i32 - width - VALUE_MARGIN).max(0)
        } else {
            0
        };
        Text::with_baseline(&text, Point::new(x, 0), VALUE_STYLE, Baseline::Top)
            .draw(display)
            .ok();
    }

    let mut footer: String<24> = String::new();
    let _ = write!(
        footer,
        "D:{} {}{}",
        diameter_text(settings.workpiece_diameter, settings.use_inches),
        surface_speed_label(settings.use_inches),
        speed_text(speed),
    );
    Text::with_baseline(&footer, Point::new(0, FOOTER_Y), FOOTER_STYLE, Baseline::Top)
        .draw(display)
        .ok();
}
