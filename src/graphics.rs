//! Graphics support via embedded-graphics
//!
//! This module implements [`DrawTarget`] for [`Display`] with [`Rgb565`]
//! colors. The panel keeps its own frame memory, so nothing is buffered on
//! the host: every draw call becomes an address window followed by a pixel
//! burst.
//!
//! - [`DrawTarget::draw_iter`] writes each in-bounds pixel as a 1x1 window
//! - [`DrawTarget::fill_solid`] clips the rectangle and streams one window
//! - [`DrawTarget::fill_contiguous`] clips the area and streams the
//!   on-screen colors into one window
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # use ili9341::{Builder, Dimensions, Display, SpiInterface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let interface = SpiInterface::new(MockSpi, MockPin, MockPin, MockPin);
//! # let config = match Builder::new().dimensions(Dimensions::ILI9341).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut delay = MockDelay;
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = display.clear(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::YELLOW, 2))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, ILI9341!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
//! )
//! .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::{Pixel, PointsIter},
    primitives::Rectangle,
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Pixels staged per data burst when streaming a window
const CHUNK_PIXELS: usize = 32;

/// Staging buffer for a run of big-endian RGB565 pixels
struct PixelChunk {
    bytes: [u8; CHUNK_PIXELS * 2],
    len: usize,
}

impl PixelChunk {
    fn new() -> Self {
        Self {
            bytes: [0; CHUNK_PIXELS * 2],
            len: 0,
        }
    }

    /// Append a pixel, returning true when the chunk is full
    fn push(&mut self, color: Rgb565) -> bool {
        let [hi, lo] = color.into_storage().to_be_bytes();
        self.bytes[self.len] = hi;
        self.bytes[self.len + 1] = lo;
        self.len += 2;
        self.len == self.bytes.len()
    }

    /// Take the staged bytes and reset
    fn take(&mut self) -> &[u8] {
        let len = self.len;
        self.len = 0;
        &self.bytes[..len]
    }
}

/// Inclusive corner coordinates of a non-empty, on-screen rectangle
fn window(area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
    let bottom_right = area.bottom_right()?;
    let Point { x: x0, y: y0 } = area.top_left;
    if x0 < 0 || y0 < 0 {
        return None;
    }
    Some((x0 as u16, y0 as u16, bottom_right.x as u16, bottom_right.y as u16))
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Stream colors into a window already clipped to the screen
    fn stream_window<C>(&mut self, area: &Rectangle, colors: C) -> Result<(), Error<I>>
    where
        C: IntoIterator<Item = Rgb565>,
    {
        let Some((x0, y0, x1, y1)) = window(area) else {
            return Ok(());
        };
        self.set_address_window(x0, y0, x1, y1)?;

        let count = area.size.width as usize * area.size.height as usize;
        let mut chunk = PixelChunk::new();
        for color in colors.into_iter().take(count) {
            if chunk.push(color) {
                self.write_pixels(chunk.take())?;
            }
        }
        if chunk.len > 0 {
            self.write_pixels(chunk.take())?;
        }
        Ok(())
    }
}

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            let (x, y) = (x as u16, y as u16);
            self.set_address_window(x, y, x, y)?;
            self.write_pixels(&color.into_storage().to_be_bytes())?;
        }

        Ok(())
    }

    fn fill_contiguous<C>(&mut self, area: &Rectangle, colors: C) -> Result<(), Self::Error>
    where
        C: IntoIterator<Item = Self::Color>,
    {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.is_zero_sized() {
            return Ok(());
        }
        if drawable == *area {
            return self.stream_window(area, colors);
        }

        // Colors map to positions in `area`; keep the on-screen ones
        self.stream_window(
            &drawable,
            area.points()
                .zip(colors)
                .filter(|(pos, _)| drawable.contains(*pos))
                .map(|(_, color)| color),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if clipped.is_zero_sized() {
            return Ok(());
        }
        self.stream_window(&clipped, core::iter::repeat(color))
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
