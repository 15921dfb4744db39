//! RAM framebuffer with change detection.
//!
//! Widgets can render into this buffer through a [`Canvas`] instead of the
//! display itself. Only the rectangle enclosing changed pixels is pushed to
//! the hardware on [`FrameBuffer::flush`].
//!
//! [`Canvas`]: crate::gfx::Canvas

use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }
}

/// Heap-backed `DrawTarget<Color = Rgb565>` of arbitrary size
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a buffer filled with black pixels.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: alloc::vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Color at `point`, or `None` outside the buffer
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Whether anything changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Push the changed region to `display` and reset change tracking.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let width = rect.max_x - rect.min_x + 1;
        let height = rect.max_y - rect.min_y + 1;

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            width, height, rect.min_x, rect.min_y
        );

        let area = Rectangle::new(
            Point::new(rect.min_x as i32, rect.min_y as i32),
            Size::new(width as u32, height as u32),
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = self.index_of(coord) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_buffer_is_clean() {
        let fb = FrameBuffer::new(Size::new(8, 8));
        assert!(!fb.is_dirty());
        assert_eq!(fb.pixel(Point::new(7, 7)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(Point::new(8, 0)), None);
        assert_eq!(fb.pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_fill_solid_clamps_to_bounds() {
        let mut fb = FrameBuffer::new(Size::new(8, 8));
        fb.fill_solid(
            &Rectangle::new(Point::new(-4, 6), Size::new(20, 20)),
            Rgb565::GREEN,
        )
        .unwrap();

        assert!(fb.is_dirty());
        assert_eq!(fb.pixel(Point::new(0, 7)), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(Point::new(0, 5)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_flush_copies_dirty_region_and_resets() {
        let mut fb = FrameBuffer::new(Size::new(8, 8));
        fb.draw_iter([Pixel(Point::new(3, 4), Rgb565::RED)]).unwrap();

        let mut display = FrameBuffer::new(Size::new(8, 8));
        fb.flush(&mut display).unwrap();

        assert!(!fb.is_dirty());
        assert_eq!(display.pixel(Point::new(3, 4)), Some(Rgb565::RED));
    }
}
