//! Digital watch face renderer for the 240x240 LCD

use core::f32::consts::PI;

use embedded_graphics::{
    geometry::Angle,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Text, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::Surface;

const LCD_W: i32 = 240;
const LCD_H: i32 = 240;

const BUF_LEN: usize = 16;

const FOREGROUND: Rgb565 = Rgb565::WHITE;
const ACTIVE_BACKGROUND: Rgb565 = Rgb565::new(2, 5, 9);
const AMBIENT_BACKGROUND: Rgb565 = Rgb565::BLACK;
const DIAL_COLOR: Rgb565 = Rgb565::new(10, 22, 12);
const GAUGE_COLOR: Rgb565 = Rgb565::GREEN;
const GAUGE_TRACK: Rgb565 = Rgb565::new(4, 8, 4);

const CENTER: Point = Point::new(LCD_W / 2, LCD_H / 2);
const TIME_BASELINE: i32 = 135;
const GAUGE_CENTER: Point = Point::new(LCD_W / 2, 188);
const GAUGE_DIAMETER: u32 = 36;
const GAUGE_STROKE: u32 = 4;

/// Text region with its own buffer
struct Label {
    str_buf: [u8; BUF_LEN],
    len: usize,
    position: Point,
    font: &'static MonoFont<'static>,
    alignment: Alignment,
}

impl Label {
    /// Create new empty label
    fn new(position: Point, font: &'static MonoFont<'static>, alignment: Alignment) -> Self {
        Self {
            str_buf: [0; BUF_LEN],
            len: 0,
            position,
            font,
            alignment,
        }
    }

    fn text(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }

    /// Replace the text, truncated to the buffer. Returns whether it changed.
    fn set(&mut self, text: &str) -> bool {
        let mut len = text.len().min(BUF_LEN);
        while !text.is_char_boundary(len) {
            len -= 1;
        }
        let bytes = &text.as_bytes()[..len];
        if &self.str_buf[..self.len] == bytes {
            return false;
        }
        self.str_buf[..len].copy_from_slice(bytes);
        self.len = len;
        true
    }

    fn text_item(&self) -> Text<'_, MonoTextStyle<'static, Rgb565>> {
        Text::with_text_style(
            self.text(),
            self.position,
            MonoTextStyle::new(self.font, FOREGROUND),
            TextStyleBuilder::new().alignment(self.alignment).build(),
        )
    }

    fn bounds(&self) -> Rectangle {
        self.text_item().bounding_box()
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.text_item().draw(target)?;
        Ok(())
    }

    /// Erase the old text and draw the new one, if it changed
    fn replace<D>(&mut self, target: &mut D, text: &str, background: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let old = self.bounds();
        if !self.set(text) {
            return Ok(());
        }
        old.into_styled(PrimitiveStyle::with_fill(background))
            .draw(target)?;
        self.draw(target)
    }
}

/// Digital watch face drawn on any RGB565 draw target
pub struct FaceCanvas<D> {
    target: D,
    /// Background imagery shown
    background: bool,
    /// Whole screen drawn at least once
    drawn: bool,
    day: Label,
    month: Label,
    hours: Label,
    minutes: Label,
    gauge: f32,
}

impl<D> FaceCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            background: false,
            drawn: false,
            day: Label::new(Point::new(CENTER.x, 72), &PROFONT_18_POINT, Alignment::Center),
            month: Label::new(Point::new(CENTER.x, 94), &PROFONT_14_POINT, Alignment::Center),
            hours: Label::new(
                Point::new(CENTER.x - 8, TIME_BASELINE),
                &PROFONT_24_POINT,
                Alignment::Right,
            ),
            minutes: Label::new(
                Point::new(CENTER.x + 8, TIME_BASELINE),
                &PROFONT_24_POINT,
                Alignment::Left,
            ),
            gauge: 0.0,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    fn background_color(&self) -> Rgb565 {
        if self.background {
            ACTIVE_BACKGROUND
        } else {
            AMBIENT_BACKGROUND
        }
    }

    /// Draw the whole screen from the stored labels
    fn redraw(&mut self) -> Result<(), D::Error> {
        let background = self.background_color();
        self.target.clear(background)?;
        if self.background {
            self.draw_dial()?;
        }

        Text::with_text_style(
            ":",
            Point::new(CENTER.x, TIME_BASELINE),
            MonoTextStyle::new(&PROFONT_24_POINT, FOREGROUND),
            TextStyleBuilder::new().alignment(Alignment::Center).build(),
        )
        .draw(&mut self.target)?;

        for label in [&self.day, &self.month, &self.hours, &self.minutes] {
            label.draw(&mut self.target)?;
        }
        self.draw_gauge()?;

        self.drawn = true;
        Ok(())
    }

    /// Outer ring with twelve hour marks
    fn draw_dial(&mut self) -> Result<(), D::Error> {
        Circle::with_center(CENTER, LCD_W as u32 - 8)
            .into_styled(PrimitiveStyle::with_stroke(DIAL_COLOR, 2))
            .draw(&mut self.target)?;

        let style = PrimitiveStyle::with_stroke(DIAL_COLOR, 3);
        for mark in 0..12 {
            let angle = mark as f32 * PI / 6.0;
            let (sin, cos) = (libm::sinf(angle), libm::cosf(angle));
            let at = |radius: f32| {
                CENTER + Point::new(libm::roundf(radius * cos) as i32, libm::roundf(radius * sin) as i32)
            };
            Line::new(at(100.0), at(110.0))
                .into_styled(style)
                .draw(&mut self.target)?;
        }
        Ok(())
    }

    /// Battery arc, a full gauge sweeps a quarter of the circle
    fn draw_gauge(&mut self) -> Result<(), D::Error> {
        Rectangle::with_center(
            GAUGE_CENTER,
            Size::new_equal(GAUGE_DIAMETER + 2 * GAUGE_STROKE),
        )
        .into_styled(PrimitiveStyle::with_fill(self.background_color()))
        .draw(&mut self.target)?;

        Circle::with_center(GAUGE_CENTER, GAUGE_DIAMETER)
            .into_styled(PrimitiveStyle::with_stroke(GAUGE_TRACK, 1))
            .draw(&mut self.target)?;

        let sweep = 360.0 * self.gauge / 100.0;
        if sweep > 0.0 {
            Arc::with_center(
                GAUGE_CENTER,
                GAUGE_DIAMETER,
                Angle::from_degrees(-90.0),
                Angle::from_degrees(sweep),
            )
            .into_styled(PrimitiveStyle::with_stroke(GAUGE_COLOR, GAUGE_STROKE))
            .draw(&mut self.target)?;
        }
        Ok(())
    }
}

impl<D> Surface for FaceCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn set_day(&mut self, day: &str) -> Result<(), Self::Error> {
        let background = self.background_color();
        self.day.replace(&mut self.target, day, background)
    }

    fn set_month(&mut self, month: &str) -> Result<(), Self::Error> {
        let background = self.background_color();
        self.month.replace(&mut self.target, month, background)
    }

    fn set_hours(&mut self, hours: &str) -> Result<(), Self::Error> {
        let background = self.background_color();
        self.hours.replace(&mut self.target, hours, background)
    }

    fn set_minutes(&mut self, minutes: &str) -> Result<(), Self::Error> {
        let background = self.background_color();
        self.minutes.replace(&mut self.target, minutes, background)
    }

    fn set_battery_gauge(&mut self, gauge: f32) -> Result<(), Self::Error> {
        if gauge == self.gauge && self.drawn {
            return Ok(());
        }
        self.gauge = gauge;
        self.draw_gauge()
    }

    fn set_background(&mut self, visible: bool) -> Result<(), Self::Error> {
        if visible == self.background && self.drawn {
            return Ok(());
        }
        self.background = visible;
        self.redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::primitives::{ContainsPoint, PointsIter};

    /// In-memory 240x240 target
    struct FrameBuffer {
        pixels: Vec<Rgb565>,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb565::RED; (LCD_W * LCD_H) as usize],
            }
        }

        fn pixel(&self, point: Point) -> Rgb565 {
            self.pixels[(point.y * LCD_W + point.x) as usize]
        }

        fn count(&self, area: Rectangle, color: Rgb565) -> usize {
            area.points().filter(|p| self.pixel(*p) == color).count()
        }

        fn count_all(&self, color: Rgb565) -> usize {
            self.pixels.iter().filter(|c| **c == color).count()
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(LCD_W as u32, LCD_H as u32)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..LCD_W).contains(&point.x) && (0..LCD_H).contains(&point.y) {
                    self.pixels[(point.y * LCD_W + point.x) as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn canvas() -> FaceCanvas<FrameBuffer> {
        let mut canvas = FaceCanvas::new(FrameBuffer::new());
        canvas.set_background(true).unwrap();
        canvas
    }

    #[test]
    fn test_background_toggle() {
        let mut canvas = canvas();
        assert_eq!(canvas.target().pixel(Point::zero()), ACTIVE_BACKGROUND);
        assert!(canvas.target().count_all(DIAL_COLOR) > 0);

        canvas.set_background(false).unwrap();
        assert_eq!(canvas.target().pixel(Point::zero()), AMBIENT_BACKGROUND);
        assert_eq!(canvas.target().count_all(DIAL_COLOR), 0);
        assert_eq!(canvas.target().count_all(Rgb565::RED), 0);
    }

    #[test]
    fn test_labels_survive_background_change() {
        let mut canvas = canvas();
        canvas.set_hours("10").unwrap();
        canvas.set_minutes("42").unwrap();

        canvas.set_background(false).unwrap();
        assert!(canvas.target().count(canvas.hours.bounds(), FOREGROUND) > 0);
        assert!(canvas.target().count(canvas.minutes.bounds(), FOREGROUND) > 0);
    }

    #[test]
    fn test_shorter_text_erases_old_pixels() {
        let mut canvas = canvas();
        canvas.set_month("September").unwrap();
        let old = canvas.month.bounds();
        assert!(canvas.target().count(old, FOREGROUND) > 0);

        canvas.set_month("May").unwrap();
        let new = canvas.month.bounds();
        assert!(new.size.width < old.size.width);
        for point in old.points().filter(|p| !new.contains(*p)) {
            assert_eq!(canvas.target().pixel(point), ACTIVE_BACKGROUND);
        }
        assert_eq!(canvas.month.text(), "May");
    }

    #[test]
    fn test_unchanged_label_is_not_redrawn() {
        let mut canvas = canvas();
        canvas.set_day("07").unwrap();
        let bounds = canvas.day.bounds();
        let before = canvas.target().count(bounds, FOREGROUND);
        assert!(!canvas.day.set("07"));
        canvas.set_day("07").unwrap();
        assert_eq!(canvas.target().count(bounds, FOREGROUND), before);
    }

    #[test]
    fn test_gauge_grows_with_level() {
        let mut canvas = canvas();
        canvas.set_battery_gauge(0.0).unwrap();
        assert_eq!(canvas.target().count_all(GAUGE_COLOR), 0);

        canvas.set_battery_gauge(12.5).unwrap();
        let half = canvas.target().count_all(GAUGE_COLOR);
        canvas.set_battery_gauge(25.0).unwrap();
        let full = canvas.target().count_all(GAUGE_COLOR);
        assert!(half > 0);
        assert!(full > half);

        canvas.set_battery_gauge(0.0).unwrap();
        assert_eq!(canvas.target().count_all(GAUGE_COLOR), 0);
    }

    #[test]
    fn test_label_truncates_to_buffer() {
        let mut label = Label::new(Point::zero(), &PROFONT_14_POINT, Alignment::Left);
        assert!(label.set("a label far longer than the buffer"));
        assert_eq!(label.text().len(), BUF_LEN);
        assert!(label.set("é".repeat(10).as_str()));
        assert_eq!(label.text(), "é".repeat(8));
    }
}
