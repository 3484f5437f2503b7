//! Boot screen: program name plus the acquisition parameters loaded
//! from flash, so a misconfigured sensor setup is visible before the
//! spindle even turns.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use tach_core::settings::TachSettings;

use crate::styles::{LABEL_STYLE, TITLE_STYLE};

pub fn draw_boot<D>(display: &mut D, settings: &TachSettings)
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline("LATHE TACH", Point::zero(), TITLE_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    let mut pulses: String<16> = String::new();
    let _ = write!(pulses, "Pulses: {}", settings.pulses_per_rev);
    Text::with_baseline(&pulses, Point::new(0, 24), LABEL_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    let mut ratio: String<16> = String::new();
    let _ = write!(ratio, "Ratio: {:.2}", settings.gear_ratio);
    Text::with_baseline(&ratio, Point::new(0, 36), LABEL_STYLE, Baseline::Top)
        .draw(display)
        .ok();
}
