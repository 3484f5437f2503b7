//! Settings menu screen: a scrolling four-row window over the fields
//! with a cursor on the selected one.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use tach_core::format::field_value_text;
use tach_core::menu::MenuField;
use tach_core::settings::TachSettings;

use super::FOOTER_Y;
use crate::styles::{FOOTER_STYLE, LABEL_STYLE};

/// Field rows visible at once.
const VISIBLE_ROWS: usize = 4;

/// Top edge of the first field row.
const ROWS_TOP_Y: i32 = 14;

/// Vertical pitch between field rows.
const ROW_HEIGHT: i32 = 10;

pub fn draw_menu<D>(display: &mut D, selected: MenuField, settings: &TachSettings)
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline("SETTINGS", Point::zero(), LABEL_STYLE, Baseline::Top)
        .draw(display)
        .ok();

    // Scroll the window so the selected field is always on screen.
    let first = selected.index().saturating_sub(VISIBLE_ROWS - 1);
    let rows = MenuField::ALL.iter().skip(first).take(VISIBLE_ROWS);
    for (row, field) in rows.enumerate() {
        let cursor = if *field == selected { '>' } else { ' ' };
        let mut line: String<24> = String::new();
        let _ = write!(
            line,
            "{} {}: {}",
            cursor,
            field.label(),
            field_value_text(*field, settings)
        );

        let y = ROWS_TOP_Y + row as i32 * ROW_HEIGHT;
        Text::with_baseline(&line, Point::new(0, y), LABEL_STYLE, Baseline::Top)
            .draw(display)
            .ok();
    }

    Text::with_baseline(
        "Short:+/-  Long:Next/Exit",
        Point::new(0, FOOTER_Y),
        FOOTER_STYLE,
        Baseline::Top,
    )
    .draw(display)
    .ok();
}
