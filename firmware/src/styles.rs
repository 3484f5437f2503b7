//! Pre-computed static text styles shared by the screens.
//!
//! `MonoTextStyle` construction is cheap but happens on every redraw when
//! done inline. Defining the styles as `const` lets the compiler place them
//! in read-only data and reference them directly.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_12_POINT, PROFONT_24_POINT};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text anchored at its top edge. Used for the over-range banner.
pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// Large digits for the live RPM value (`ProFont` 24pt).
pub const VALUE_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&PROFONT_24_POINT, BinaryColor::On);

/// Medium text for the boot title and the over-range banner (`ProFont` 12pt).
pub const TITLE_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&PROFONT_12_POINT, BinaryColor::On);

/// Small text for menu rows and value labels (6x10 pixels).
pub const LABEL_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// Smallest text for the bottom help/status line (5x8 pixels). At five
/// pixels per glyph a 25-character line still fits the 128 px panel.
pub const FOOTER_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

/// Advance width in pixels of one glyph of the large value font.
pub const VALUE_CHAR_WIDTH: u32 =
    PROFONT_24_POINT.character_size.width + PROFONT_24_POINT.character_spacing;
