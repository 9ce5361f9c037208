//! Now-playing screen rendering onto any Gray4 draw target.
//!
//! Layout (480x320 landscape):
//!
//! ```text
//! +--------------------------------------------+
//! |  <filename label>                          |
//! |                                            |
//! |        |<<        >/||        >>|          |
//! |                                            |
//! |  [=========volume==========        ]       |
//! +--------------------------------------------+
//! ```

use embedded_graphics::mono_font::{ascii::FONT_10X20, MonoTextStyle};
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::Text;

use crate::now_playing::NowPlayingScreen;

const MARGIN: i32 = 20;
const LABEL_BASELINE: i32 = 50;
const BUTTON_ROW_Y: i32 = 130;
const BUTTON_SIZE: u32 = 60;
const SLIDER_Y: i32 = 250;
const SLIDER_HEIGHT: u32 = 20;

/// Label bounding row, for partial redraw checks.
pub const LABEL_AREA: Rectangle =
    Rectangle::new(Point::new(0, 0), Size::new(480, 80));

/// Play/pause button area.
pub const PLAY_BUTTON_AREA: Rectangle = Rectangle::new(
    Point::new(210, BUTTON_ROW_Y),
    Size::new(BUTTON_SIZE, BUTTON_SIZE),
);

/// Draw the whole screen.
pub fn render<D>(screen: &NowPlayingScreen, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let size = target.bounding_box().size;
    target.clear(Gray4::BLACK)?;

    let label_style = MonoTextStyle::new(&FONT_10X20, Gray4::WHITE);
    Text::new(screen.label(), Point::new(MARGIN, LABEL_BASELINE), label_style).draw(target)?;

    draw_previous(target, Point::new(110, BUTTON_ROW_Y))?;
    if screen.is_playing() {
        draw_pause_glyph(target, PLAY_BUTTON_AREA.top_left)?;
    } else {
        draw_play_glyph(target, PLAY_BUTTON_AREA.top_left)?;
    }
    draw_next(target, Point::new(310, BUTTON_ROW_Y))?;

    draw_slider(target, size, screen.volume().get())
}

fn fill(shade: u8) -> PrimitiveStyle<Gray4> {
    PrimitiveStyle::with_fill(Gray4::new(shade))
}

#[allow(clippy::arithmetic_side_effects)] // small layout constants, no overflow
fn draw_play_glyph<D>(target: &mut D, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let s = BUTTON_SIZE as i32;
    Triangle::new(origin, origin + Point::new(0, s), origin + Point::new(s, s / 2))
        .into_styled(fill(0xF))
        .draw(target)
}

#[allow(clippy::arithmetic_side_effects)]
fn draw_pause_glyph<D>(target: &mut D, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let bar = Size::new(BUTTON_SIZE / 3, BUTTON_SIZE);
    Rectangle::new(origin, bar).into_styled(fill(0xF)).draw(target)?;
    Rectangle::new(origin + Point::new((BUTTON_SIZE * 2 / 3) as i32, 0), bar)
        .into_styled(fill(0xF))
        .draw(target)
}

#[allow(clippy::arithmetic_side_effects)]
fn draw_previous<D>(target: &mut D, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let s = BUTTON_SIZE as i32;
    Rectangle::new(origin, Size::new(8, BUTTON_SIZE))
        .into_styled(fill(0xA))
        .draw(target)?;
    Triangle::new(origin + Point::new(s, 0), origin + Point::new(s, s), origin + Point::new(8, s / 2))
        .into_styled(fill(0xA))
        .draw(target)
}

#[allow(clippy::arithmetic_side_effects)]
fn draw_next<D>(target: &mut D, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let s = BUTTON_SIZE as i32;
    Triangle::new(origin, origin + Point::new(0, s), origin + Point::new(s - 8, s / 2))
        .into_styled(fill(0xA))
        .draw(target)?;
    Rectangle::new(origin + Point::new(s - 8, 0), Size::new(8, BUTTON_SIZE))
        .into_styled(fill(0xA))
        .draw(target)
}

fn draw_slider<D>(target: &mut D, size: Size, volume: u8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let track_width = size.width.saturating_sub(MARGIN.unsigned_abs().saturating_mul(2));
    let track = Rectangle::new(Point::new(MARGIN, SLIDER_Y), Size::new(track_width, SLIDER_HEIGHT));
    track
        .into_styled(PrimitiveStyle::with_stroke(Gray4::new(0x6), 1))
        .draw(target)?;

    let filled = track_width.saturating_mul(u32::from(volume)) / 100;
    if filled > 0 {
        Rectangle::new(track.top_left, Size::new(filled, SLIDER_HEIGHT))
            .into_styled(fill(0xC))
            .draw(target)?;
    }
    Ok(())
}
