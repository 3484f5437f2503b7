//! Settings menu state machine.
//!
//! `None` is the live RPM display; `Some(field)` is the menu editing that
//! field. Driven entirely by classified presses from [`crate::input`]:
//!
//! - UP long: enter the menu / advance the field; past the last field the
//!   menu exits and the settings are saved.
//! - DOWN long: exit the menu and save.
//! - UP/DOWN short in the menu: adjust the selected field, wrapping at the
//!   range edges.
//! - UP/DOWN short on the live screen: adjust the workpiece diameter and
//!   save immediately.
//! - 10 s without activity: exit and save.

use crate::config::MENU_TIMEOUT_MS;
use crate::input::PressKind;
use crate::settings::{Direction, TachSettings};

/// One editable settings field. Declaration order is the cycle order and
/// the display order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuField {
    Pulses,
    Ratio,
    Decimal,
    Filter,
    Diameter,
    Units,
}

impl MenuField {
    pub const ALL: [Self; 6] = [
        Self::Pulses,
        Self::Ratio,
        Self::Decimal,
        Self::Filter,
        Self::Diameter,
        Self::Units,
    ];

    pub const FIRST: Self = Self::Pulses;

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pulses => "Pulses/rev",
            Self::Ratio => "Gear ratio",
            Self::Decimal => "Decimal",
            Self::Filter => "Filter",
            Self::Diameter => "Diameter",
            Self::Units => "Units",
        }
    }

    /// Next field in the cycle; `None` exits the menu.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pulses => Some(Self::Ratio),
            Self::Ratio => Some(Self::Decimal),
            Self::Decimal => Some(Self::Filter),
            Self::Filter => Some(Self::Diameter),
            Self::Diameter => Some(Self::Units),
            Self::Units => None,
        }
    }

    /// Position in [`Self::ALL`]; the menu screen scrolls by it.
    pub const fn index(self) -> usize {
        match self {
            Self::Pulses => 0,
            Self::Ratio => 1,
            Self::Decimal => 2,
            Self::Filter => 3,
            Self::Diameter => 4,
            Self::Units => 5,
        }
    }

    /// Apply a short press to this field. Booleans toggle regardless of
    /// direction; `Units` also converts the stored diameter.
    pub fn adjust(self, settings: &mut TachSettings, dir: Direction) {
        match self {
            Self::Pulses => settings.step_pulses(dir),
            Self::Ratio => settings.step_ratio(dir),
            Self::Decimal => settings.show_decimal = !settings.show_decimal,
            Self::Filter => settings.step_filter(dir),
            Self::Diameter => settings.step_diameter(dir),
            Self::Units => settings.toggle_units(),
        }
    }
}

/// Menu state plus the activity clock behind the inactivity timeout.
pub struct Ui {
    field: Option<MenuField>,
    last_activity_ms: u32,
}

impl Ui {
    pub const fn new() -> Self {
        Self {
            field: None,
            last_activity_ms: 0,
        }
    }

    /// Currently edited field, `None` on the live display.
    pub const fn current_field(&self) -> Option<MenuField> {
        self.field
    }

    pub const fn in_menu(&self) -> bool {
        self.field.is_some()
    }

    /// Feed one tick of classified events. Returns true when the settings
    /// must be persisted; that happens exactly on menu exit (cycling past
    /// the last field, long DOWN, timeout) and on the live-screen diameter
    /// adjustment.
    pub fn process(
        &mut self,
        up: Option<PressKind>,
        down: Option<PressKind>,
        settings: &mut TachSettings,
        now_ms: u32,
    ) -> bool {
        let mut save = false;
        if let Some(kind) = up {
            save |= self.handle_up(kind, settings, now_ms);
        }
        if let Some(kind) = down {
            save |= self.handle_down(kind, settings, now_ms);
        }
        // Checked after the events so activity in this tick postpones it.
        if self.field.is_some() && now_ms.wrapping_sub(self.last_activity_ms) >= MENU_TIMEOUT_MS {
            self.field = None;
            save = true;
        }
        save
    }

    fn handle_up(&mut self, kind: PressKind, settings: &mut TachSettings, now_ms: u32) -> bool {
        match kind {
            PressKind::Long => {
                self.last_activity_ms = now_ms;
                self.field = match self.field {
                    None => Some(MenuField::FIRST),
                    Some(field) => field.next(),
                };
                // Cycling past the last field exits and saves.
                self.field.is_none()
            }
            PressKind::Short => match self.field {
                None => {
                    settings.step_diameter(Direction::Up);
                    true
                }
                Some(field) => {
                    field.adjust(settings, Direction::Up);
                    self.last_activity_ms = now_ms;
                    false
                }
            },
        }
    }

    fn handle_down(&mut self, kind: PressKind, settings: &mut TachSettings, now_ms: u32) -> bool {
        match kind {
            PressKind::Long => self.field.take().is_some(),
            PressKind::Short => match self.field {
                None => {
                    settings.step_diameter(Direction::Down);
                    true
                }
                Some(field) => {
                    field.adjust(settings, Direction::Down);
                    self.last_activity_ms = now_ms;
                    false
                }
            },
        }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn long_up(ui: &mut Ui, settings: &mut TachSettings, now_ms: u32) -> bool {
        ui.process(Some(PressKind::Long), None, settings, now_ms)
    }

    #[test]
    fn test_field_cycle_matches_declaration_order() {
        let mut walked = heapless::Vec::<MenuField, 6>::new();
        let mut field = Some(MenuField::FIRST);
        while let Some(f) = field {
            walked.push(f).unwrap();
            field = f.next();
        }
        assert_eq!(&walked[..], &MenuField::ALL[..]);
        for (i, f) in MenuField::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert!(!f.label().is_empty());
        }
    }

    #[test]
    fn test_long_up_cycles_all_fields_then_exits_with_save() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();

        for (i, expected) in MenuField::ALL.iter().enumerate() {
            let save = long_up(&mut ui, &mut settings, 100 * (i as u32 + 1));
            assert!(!save);
            assert_eq!(ui.current_field(), Some(*expected));
        }
        // One more long press past Units: back to live, with a save.
        let save = long_up(&mut ui, &mut settings, 700);
        assert!(save);
        assert_eq!(ui.current_field(), None);
    }

    #[test]
    fn test_long_down_exits_and_saves() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();
        long_up(&mut ui, &mut settings, 100);
        assert!(ui.in_menu());

        let save = ui.process(None, Some(PressKind::Long), &mut settings, 200);
        assert!(save);
        assert!(!ui.in_menu());
    }

    #[test]
    fn test_long_down_in_live_view_does_nothing() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();
        let save = ui.process(None, Some(PressKind::Long), &mut settings, 100);
        assert!(!save);
        assert!(!ui.in_menu());
        assert_eq!(settings, TachSettings::new());
    }

    #[test]
    fn test_menu_timeout_exits_and_saves() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();
        long_up(&mut ui, &mut settings, 1_000);

        let save = ui.process(None, None, &mut settings, 10_999);
        assert!(!save);
        assert!(ui.in_menu());

        let save = ui.process(None, None, &mut settings, 11_000);
        assert!(save);
        assert!(!ui.in_menu());
    }

    #[test]
    fn test_menu_activity_postpones_timeout() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();
        long_up(&mut ui, &mut settings, 0);

        // Adjustment at 9 s resets the inactivity clock.
        ui.process(Some(PressKind::Short), None, &mut settings, 9_000);
        let save = ui.process(None, None, &mut settings, 18_999);
        assert!(!save);
        assert!(ui.in_menu());

        let save = ui.process(None, None, &mut settings, 19_000);
        assert!(save);
        assert!(!ui.in_menu());
    }

    #[test]
    fn test_short_press_in_live_view_steps_diameter_and_saves() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();

        let save = ui.process(Some(PressKind::Short), None, &mut settings, 100);
        assert!(save);
        assert_eq!(settings.workpiece_diameter, 26.0);

        let save = ui.process(None, Some(PressKind::Short), &mut settings, 200);
        assert!(save);
        assert_eq!(settings.workpiece_diameter, 25.0);
    }

    #[test]
    fn test_short_press_in_menu_adjusts_without_save() {
        let mut ui = Ui::new();
        let mut settings = TachSettings::new();
        long_up(&mut ui, &mut settings, 100); // editing Pulses

        let save = ui.process(Some(PressKind::Short), None, &mut settings, 200);
        assert!(!save);
        assert_eq!(settings.pulses_per_rev, 2);

        let save = ui.process(None, Some(PressKind::Short), &mut settings, 300);
        assert!(!save);
        assert_eq!(settings.pulses_per_rev, 1);
    }

    #[test]
    fn test_decimal_toggles_in_either_direction() {
        let mut settings = TachSettings::new();
        assert!(settings.show_decimal);
        MenuField::Decimal.adjust(&mut settings, Direction::Up);
        assert!(!settings.show_decimal);
        MenuField::Decimal.adjust(&mut settings, Direction::Down);
        assert!(settings.show_decimal);
    }

    #[test]
    fn test_units_field_toggles_and_converts() {
        let mut settings = TachSettings::new();
        MenuField::Units.adjust(&mut settings, Direction::Up);
        assert!(settings.use_inches);
        // 25 mm landed on the inch grid.
        assert!((settings.workpiece_diameter - 1.0).abs() < 1e-6);
        MenuField::Units.adjust(&mut settings, Direction::Down);
        assert!(!settings.use_inches);
    }
}
