//! SSD1306 OLED bring-up over interrupt-driven I2C.
//!
//! The driver runs in async mode so a frame flush yields to the edge
//! tasks instead of holding the executor for the whole transfer.

use defmt::error;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;
use ssd1306::mode::{BufferedGraphicsModeAsync, DisplayConfigAsync};
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306Async};

/// Delay between display init attempts.
const INIT_RETRY_MS: u64 = 1_500;

/// The concrete display driver type used by the firmware.
pub type Oled = Ssd1306Async<
    I2CInterface<I2c<'static, I2C1, Async>>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Initialize the OLED, retrying until it answers. The measurement loop
/// does not start without a working screen.
pub async fn init_display(i2c: I2c<'static, I2C1, Async>) -> Oled {
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    while display.init().await.is_err() {
        error!("Display init failed, retrying");
        Timer::after_millis(INIT_RETRY_MS).await;
    }

    display
}
