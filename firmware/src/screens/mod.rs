//! Screens for the tachometer OLED.
//!
//! Provides the boot screen, the live RPM screen, and the settings menu.
//! All drawing goes through a generic [`DrawTarget`] so the layouts stay
//! independent of the driver; errors from individual draws are ignored.

mod boot;
mod live;
mod menu;

pub use boot::draw_boot;
pub use live::draw_live;
pub use menu::draw_menu;

/// Panel width in pixels.
pub const SCREEN_WIDTH: u32 = 128;

/// Top edge of the bottom help/status line. The 5x8 footer font fills
/// rows 56..64 exactly.
pub const FOOTER_Y: i32 = 56;
