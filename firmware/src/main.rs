//! Lathe tachometer firmware for the Raspberry Pi Pico 2 (RP2350).
//!
//! Measures spindle speed from a hall sensor, smooths it, and renders it
//! on an SSD1306 OLED together with the derived surface speed. Settings
//! persist in the last flash sector.
//!
//! # Button Controls
//!
//! - **UP long**: enter the settings menu / advance to the next field
//! - **UP short**: increment the selected field (diameter quick-adjust on
//!   the live screen)
//! - **DOWN long**: leave the menu and save
//! - **DOWN short**: decrement the selected field (diameter quick-adjust
//!   on the live screen)

#![no_std]
#![no_main]
// Crate-level lints (timestamp and pixel arithmetic narrows deliberately)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod display;
mod screens;
mod store;
mod styles;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use tach_core::capture::PulseTiming;
use tach_core::config::{
    DISPLAY_UPDATE_INTERVAL_MS, POLL_INTERVAL_MS, RPM_TIMEOUT_CHECK_MS, WELCOME_HOLD_MS,
};
use tach_core::input::{ButtonLine, PressTracker};
use tach_core::menu::Ui;
use tach_core::rpm::{RpmEstimator, surface_speed};
use {defmt_rtt as _, panic_probe as _};

use crate::store::SettingsStore;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => InterruptHandler<I2C1>;
});

// =============================================================================
// Shared state (written by the edge tasks, consumed by the main loop)
// =============================================================================

/// Pulse timing accumulator fed by the hall sensor edge task.
static PULSES: PulseTiming = PulseTiming::new();

/// UP button level, mirrored from its pin by an edge task.
static BTN_UP: ButtonLine = ButtonLine::new();

/// DOWN button level, mirrored from its pin by an edge task.
static BTN_DOWN: ButtonLine = ButtonLine::new();

/// Heartbeat LED half-period. One full blink every two seconds makes a
/// wedged main loop visible from the bench.
const HEARTBEAT_MS: u32 = 1_000;

/// I2C bus speed for the OLED. 400 kHz is the rated SSD1306 maximum.
const I2C_FREQUENCY_HZ: u32 = 400_000;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"lathe-tach"),
    embassy_rp::binary_info::rp_program_description!(c"Hall sensor lathe tachometer with SSD1306 display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Hall sensor edge task. The sensor pulls the line low once per pulse,
/// so only falling edges are timestamped.
#[embassy_executor::task]
async fn pulse_edge_task(mut pin: Input<'static>) {
    loop {
        pin.wait_for_falling_edge().await;
        PULSES.record_pulse(Instant::now().as_micros());
    }
}

/// Mirrors one button pin into its shared [`ButtonLine`]. Buttons are
/// active low, so a low level means pressed.
#[embassy_executor::task(pool_size = 2)]
async fn button_edge_task(line: &'static ButtonLine, mut pin: Input<'static>) {
    loop {
        pin.wait_for_any_edge().await;
        line.set_level(pin.is_low(), Instant::now().as_millis() as u32);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Lathe tachometer starting");

    // Hall sensor and buttons, all active low with internal pull-ups
    let hall = Input::new(p.PIN_12, Pull::Up);
    let btn_up_pin = Input::new(p.PIN_1, Pull::Up);
    let btn_down_pin = Input::new(p.PIN_2, Pull::Up);

    // Heartbeat LED on the Pico's onboard pin
    let mut led = Output::new(p.PIN_25, Level::Low);

    // OLED on I2C1: SDA=GPIO6, SCL=GPIO7
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, i2c_config);
    let mut display = display::init_display(i2c).await;
    info!("Display initialized");

    // Settings live in the last flash sector
    let mut store = SettingsStore::new(p.FLASH);
    let mut settings = store.load();
    info!("Settings loaded: {}", settings);

    spawner.spawn(pulse_edge_task(hall)).unwrap();
    spawner.spawn(button_edge_task(&BTN_UP, btn_up_pin)).unwrap();
    spawner.spawn(button_edge_task(&BTN_DOWN, btn_down_pin)).unwrap();

    // Boot screen with the loaded acquisition parameters
    screens::draw_boot(&mut display, &settings);
    display.flush().await.ok();
    Timer::after_millis(WELCOME_HOLD_MS).await;

    let mut estimator = RpmEstimator::new();
    let mut up_tracker = PressTracker::new();
    let mut down_tracker = PressTracker::new();
    let mut ui = Ui::new();

    let mut last_recompute_ms: u32 = 0;
    let mut last_redraw_ms: u32 = 0;
    let mut last_blink_ms: u32 = 0;

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    info!("Main loop starting");

    loop {
        ticker.next().await;
        let now = Instant::now();
        let now_ms = now.as_millis() as u32;

        // Buttons first so menu edits apply before this tick's estimate
        let up = up_tracker.poll(&BTN_UP, now_ms);
        let down = down_tracker.poll(&BTN_DOWN, now_ms);
        if ui.process(up, down, &mut settings, now_ms) {
            match store.save(&settings) {
                Ok(()) => info!("Settings saved"),
                Err(e) => warn!("Settings save failed: {}", e),
            }
        }

        // Fresh pulses recompute immediately; the slower cadence keeps the
        // zero-speed timeout alive while the spindle is stopped.
        let timeout_due = now_ms.wrapping_sub(last_recompute_ms) >= RPM_TIMEOUT_CHECK_MS;
        if PULSES.take_ready() || timeout_due {
            estimator.recompute(&PULSES, &settings, now.as_micros());
            last_recompute_ms = now_ms;
        }

        if now_ms.wrapping_sub(last_redraw_ms) >= DISPLAY_UPDATE_INTERVAL_MS {
            last_redraw_ms = now_ms;
            display.clear(BinaryColor::Off).ok();
            match ui.current_field() {
                Some(field) => screens::draw_menu(&mut display, field, &settings),
                None => {
                    let speed = surface_speed(
                        estimator.rpm(),
                        settings.workpiece_diameter,
                        settings.use_inches,
                    );
                    screens::draw_live(&mut display, estimator.rpm(), speed, &settings);
                }
            }
            // The frame transfer rides the I2C interrupt; edge tasks keep
            // running while it is in flight.
            display.flush().await.ok();
        }

        if now_ms.wrapping_sub(last_blink_ms) >= HEARTBEAT_MS {
            last_blink_ms = now_ms;
            led.toggle();
        }
    }
}
