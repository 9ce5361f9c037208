//! Ambient light: a rotating rainbow on the LED strip.
//!
//! Runs forever on its own task, independent of playback. The hue advances
//! one degree per frame and each LED is offset by `360 / N` degrees, so the
//! whole wheel is spread across the strip.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use platform::config::{LED_COUNT, LED_FRAME_MS};
use platform::{LedStrip, Rgb};

/// Hue wheel size in degrees.
const HUE_DEGREES: u16 = 360;

/// Integer HSV to RGB.
///
/// `h` is in degrees (taken modulo 360), `s` and `v` are 0-255.
// All intermediates are bounded by 255 * 255, so u32 cannot overflow and
// every divisor is a non-zero constant.
#[allow(clippy::arithmetic_side_effects)]
pub fn hsv_to_rgb(h: u16, s: u8, v: u8) -> Rgb {
    let h = u32::from(h % HUE_DEGREES);
    let s = u32::from(s);
    let v = u32::from(v);

    let sector = h / 60;
    let f = (h % 60) * 255 / 60;
    let p = v * (255 - s) / 255;
    let q = v * (255 - s * f / 255) / 255;
    let t = v * (255 - s * (255 - f) / 255) / 255;

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

fn channel(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Fill `frame` with the rainbow for base `hue`.
///
/// LED `i` gets hue `hue + i * 360 / len` at full saturation and brightness.
pub fn rainbow_frame(hue: u16, frame: &mut [Rgb]) {
    let len = frame.len();
    for (i, pixel) in frame.iter_mut().enumerate() {
        let offset = i
            .saturating_mul(usize::from(HUE_DEGREES))
            .checked_div(len)
            .unwrap_or(0);
        let offset = u16::try_from(offset).unwrap_or(0);
        let led_hue = hue.wrapping_add(offset).checked_rem(HUE_DEGREES).unwrap_or(0);
        *pixel = hsv_to_rgb(led_hue, u8::MAX, u8::MAX);
    }
}

/// Buffer `frame` onto `strip` and latch it.
///
/// LEDs past the end of the shorter of the two are left untouched.
pub async fn render_frame<L: LedStrip>(strip: &mut L, frame: &[Rgb]) -> Result<(), L::Error> {
    for (index, color) in frame.iter().take(strip.len()).enumerate() {
        strip.set_pixel(index, *color)?;
    }
    strip.refresh().await
}

/// Animate the strip forever, one frame every `LED_FRAME_MS`.
///
/// Strip errors are logged once per failure streak and otherwise ignored.
pub async fn run_ambient<M, L, D>(strip: &Mutex<M, L>, mut delay: D) -> Infallible
where
    M: RawMutex,
    L: LedStrip,
    D: DelayNs,
{
    let frame_ms = u32::try_from(LED_FRAME_MS).unwrap_or(u32::MAX);
    let mut frame = [Rgb::OFF; LED_COUNT];
    let mut hue: u16 = 0;
    let mut failing = false;

    tracing::info!(leds = LED_COUNT, frame_ms, "ambient light started");
    loop {
        rainbow_frame(hue, &mut frame);
        let result = {
            let mut strip = strip.lock().await;
            render_frame(&mut *strip, &frame).await
        };
        match result {
            Ok(()) => failing = false,
            Err(e) => {
                if !failing {
                    tracing::warn!(error = %e, "led strip update failed");
                }
                failing = true;
            }
        }

        hue = hue.wrapping_add(1).checked_rem(HUE_DEGREES).unwrap_or(0);
        delay.delay_ms(frame_ms).await;
    }
}
