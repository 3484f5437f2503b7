//! Settings persistence in the last sector of the QSPI flash.
//!
//! The record occupies the first 16 bytes of a 256-byte page; the rest of
//! the page stays in the erased state. Erase and program run with
//! interrupts masked, so pulse edges landing in that window are missed.
//! Saves only happen on menu exit.

use defmt::{info, warn};
use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Error as FlashError, Flash, PAGE_SIZE};
use embassy_rp::peripherals::FLASH;
use tach_core::settings::{RECORD_LEN, TachSettings};

/// Total QSPI flash size on the Pico 2.
const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// The settings record lives in the last sector, well clear of the
/// program image at the front of flash.
const SETTINGS_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Value of a freshly erased flash byte.
const ERASED_BYTE: u8 = 0xFF;

pub struct SettingsStore {
    flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>,
}

impl SettingsStore {
    pub fn new(flash: Peri<'static, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    /// Read the stored settings. A missing or invalid record yields the
    /// defaults, which are written back so the next boot finds a valid one.
    /// Read failures fall back to defaults without touching flash.
    pub fn load(&mut self) -> TachSettings {
        let mut record = [0u8; RECORD_LEN];
        if let Err(e) = self.flash.blocking_read(SETTINGS_OFFSET, &mut record) {
            warn!("Settings read failed: {}", e);
            return TachSettings::new();
        }

        let (settings, needs_save) = TachSettings::from_stored(&record);
        if needs_save {
            info!("No stored settings, writing defaults");
            if let Err(e) = self.save(&settings) {
                warn!("Settings save failed: {}", e);
            }
        }
        settings
    }

    /// Erase the sector and program one page holding the record.
    pub fn save(&mut self, settings: &TachSettings) -> Result<(), FlashError> {
        let mut page = [ERASED_BYTE; PAGE_SIZE];
        page[..RECORD_LEN].copy_from_slice(&settings.encode());

        self.flash
            .blocking_erase(SETTINGS_OFFSET, SETTINGS_OFFSET + ERASE_SIZE as u32)?;
        self.flash.blocking_write(SETTINGS_OFFSET, &page)?;
        Ok(())
    }
}
