use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

///
/// 1 bit per pixel frame buffer in page layout: each byte holds a vertical
/// run of 8 pixels, least significant bit on top, pages of 8 rows stacked
/// from the top. This is the layout monochrome display controllers take
/// their data in, so a page can be sent as-is.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pages: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let page_count = (height as usize + 7) / 8;
        Self {
            width,
            height,
            pages: vec![0; width as usize * page_count],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn page_count(&self) -> usize {
        (self.height as usize + 7) / 8
    }

    ///
    /// Bytes of page `index`, one per column
    ///
    pub fn page(&self, index: usize) -> Option<&[u8]> {
        if index >= self.page_count() {
            return None;
        }
        let width = self.width as usize;
        self.pages.get(index * width..(index + 1) * width)
    }

    /// Turns every pixel off
    pub fn erase(&mut self) {
        self.pages.iter_mut().for_each(|byte| *byte = 0);
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y / 8) as usize * self.width as usize + x as usize;
        let mask = 1 << (y % 8);
        if on {
            self.pages[index] |= mask;
        } else {
            self.pages[index] &= !mask;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = (y / 8) as usize * self.width as usize + x as usize;
        self.pages[index] & (1 << (y % 8)) != 0
    }

    ///
    /// Renders the frame as text, two pixel rows per line using half block
    /// characters.
    ///
    pub fn to_block_text(&self) -> String {
        let mut text = String::with_capacity((self.width as usize + 1) * (self.height as usize / 2 + 1));
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixel(x, y);
                let bottom = self.pixel(x, y + 1);
                text.push(match (top, bottom) {
                    (false, false) => ' ',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (true, true) => '█',
                });
            }
            text.push('\n');
        }
        text
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::geometry::Point;

    #[test]
    fn pixels_land_in_page_layout() {
        let mut frame = FrameBuffer::new(128, 64);
        frame.set_pixel(3, 0, true);
        frame.set_pixel(3, 9, true);

        assert_eq!(frame.page_count(), 8);
        assert_eq!(frame.page(0).unwrap()[3], 0b0000_0001);
        assert_eq!(frame.page(1).unwrap()[3], 0b0000_0010);
        assert!(frame.pixel(3, 9));
        assert!(!frame.pixel(4, 9));
        assert!(frame.page(8).is_none());
        assert!(frame.page(usize::MAX).is_none());
    }

    #[test]
    fn draw_target_clips_outside_pixels() {
        let mut frame = FrameBuffer::new(16, 8);
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(16, 0), BinaryColor::On),
                Pixel(Point::new(15, 7), BinaryColor::On),
            ])
            .unwrap();

        assert_eq!(frame.page(0).unwrap()[15], 0x80);
        assert_eq!(frame.page(0).unwrap().iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn erase_and_block_text() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set_pixel(0, 0, true);
        frame.set_pixel(1, 1, true);
        assert_eq!(frame.to_block_text(), "▀▄\n");

        frame.erase();
        assert_eq!(frame.to_block_text(), "  \n");
    }
}
