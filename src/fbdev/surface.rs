//! Full-screen fills over framebuffer memory

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb888;

use crate::fbdev::geometry::Geometry;
use crate::fbdev::memory::FrameMemory;

/// Framebuffer memory together with the geometry that addresses it
pub struct Surface<M> {
    geometry: Geometry,
    memory: M,
}

impl<M: FrameMemory> Surface<M> {
    pub fn new(geometry: Geometry, memory: M) -> Self {
        Surface { geometry, memory }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Write `color` into every visible pixel, rows `0..height` of columns `0..width`
    pub fn paint(&mut self, color: Rgb888) {
        let geometry = self.geometry;
        let pixel = geometry.pixel_format().encode(color);
        let bytes = pixel.as_bytes();

        for x in 0..geometry.width {
            for y in 0..geometry.height {
                self.memory.write_at(geometry.pixel_offset(x, y), bytes);
            }
        }
    }
}

impl<M> OriginDimensions for Surface<M> {
    fn size(&self) -> Size {
        Size::new(self.geometry.width, self.geometry.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbdev::geometry::pack_rgb565;
    use crate::fbdev::geometry::tests::geometry;
    use crate::palette::PALETTE;
    use embedded_graphics::pixelcolor::RgbColor;

    fn surface(width: u32, height: u32, bpp: u32, line_length: u32) -> Surface<Vec<u8>> {
        let g = geometry(width, height, bpp, line_length);
        let len = (line_length * height) as usize;
        Surface::new(g, vec![0xEE; len])
    }

    #[test]
    fn red_on_2x2_32bpp_with_padded_stride() {
        let mut s = surface(2, 2, 32, 16);
        s.paint(Rgb888::RED);

        let written: [usize; 12] = [0, 1, 2, 4, 5, 6, 16, 17, 18, 20, 21, 22];
        for (i, &byte) in s.memory().iter().enumerate() {
            match written.iter().position(|&o| o == i) {
                Some(pos) if pos % 3 == 0 => assert_eq!(byte, 255, "red at {i}"),
                Some(_) => assert_eq!(byte, 0, "green/blue at {i}"),
                None => assert_eq!(byte, 0xEE, "untouched at {i}"),
            }
        }
    }

    #[test]
    fn every_pixel_of_32bpp_reads_back_the_color() {
        let mut s = surface(5, 4, 32, 24);
        for swatch in PALETTE {
            s.paint(swatch.color);
            let g = *s.geometry();
            for x in 0..g.width {
                for y in 0..g.height {
                    let o = g.pixel_offset(x, y);
                    let c = swatch.color;
                    assert_eq!(&s.memory()[o..o + 3], &[c.r(), c.g(), c.b()]);
                }
            }
        }
    }

    #[test]
    fn last_row_is_painted() {
        let mut s = surface(3, 3, 32, 12);
        s.paint(Rgb888::WHITE);
        let o = s.geometry().pixel_offset(2, 2);
        assert_eq!(&s.memory()[o..o + 3], &[255, 255, 255]);
    }

    #[test]
    fn white_on_16bpp_is_all_ones() {
        let mut s = surface(4, 3, 16, 10);
        s.paint(Rgb888::WHITE);
        let g = *s.geometry();
        for y in 0..g.height {
            let row = &s.memory()[(y * g.line_length) as usize..][..10];
            // 4 pixels of 0xFFFF, then 2 padding bytes left alone
            assert_eq!(
                row,
                &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xEE, 0xEE]
            );
        }
    }

    #[test]
    fn writes_cover_width_times_height_units_in_bounds() {
        for bpp in [16, 32] {
            let (w, h) = (7u32, 5u32);
            let mut g = geometry(w, h, bpp, (w + 3) * bpp / 8);
            g.virtual_width = w + 3;
            g.virtual_height = h + 2;
            g.x_offset = 1;
            g.y_offset = 2;

            let mut s = Surface::new(g, Recorder::new(g.buffer_size()));
            for swatch in PALETTE {
                s.memory.offsets.clear();
                s.paint(swatch.color);

                let mut offsets = s.memory().offsets.clone();
                assert_eq!(offsets.len(), (w * h) as usize);
                offsets.sort_unstable();
                offsets.dedup();
                assert_eq!(offsets.len(), (w * h) as usize, "{bpp}bpp {}", swatch.name);

                let unit = s.memory().unit;
                let end = offsets.iter().map(|&o| o + unit).max().unwrap();
                assert!(end <= g.buffer_size(), "{bpp}bpp {}: {end}", swatch.name);
            }
        }
    }

    #[test]
    fn purple_on_16bpp_uses_unscaled_packing() {
        let purple = PALETTE[6].color;
        let mut s = surface(1, 1, 16, 2);
        s.paint(purple);
        assert_eq!(s.memory().as_slice(), &pack_rgb565(purple).to_ne_bytes());
    }

    #[test]
    fn size_is_visible_resolution() {
        let s = surface(640, 2, 32, 2560);
        assert_eq!(s.size(), Size::new(640, 2));
    }

    struct Recorder {
        len: usize,
        unit: usize,
        offsets: Vec<usize>,
    }

    impl Recorder {
        fn new(len: usize) -> Self {
            Recorder {
                len,
                unit: 0,
                offsets: Vec::new(),
            }
        }
    }

    impl FrameMemory for Recorder {
        fn len(&self) -> usize {
            self.len
        }

        fn write_at(&mut self, offset: usize, bytes: &[u8]) {
            self.unit = bytes.len();
            self.offsets.push(offset);
        }
    }
}
