//! Screen geometry as reported by the driver, and the pixel addressing built on it

use core::fmt;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::fbdev::ioctl::{FixScreenInfo, VarScreenInfo};

/// How a pixel is laid out in framebuffer memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bpp, bytes R, G, B at +0, +1, +2; the fourth byte is left alone
    Rgb32,
    /// 16 bpp, one native-endian `(r << 11) | (g << 5) | b` word
    Rgb565,
}

impl PixelFormat {
    /// Anything that is not 32 bpp is driven as 16 bpp
    pub fn from_bits_per_pixel(bits_per_pixel: u32) -> Self {
        if bits_per_pixel == 32 {
            PixelFormat::Rgb32
        } else {
            PixelFormat::Rgb565
        }
    }

    /// Encode a color into the bytes written at one pixel offset
    pub fn encode(self, color: Rgb888) -> EncodedPixel {
        match self {
            PixelFormat::Rgb32 => EncodedPixel {
                bytes: [color.r(), color.g(), color.b(), 0],
                len: 3,
            },
            PixelFormat::Rgb565 => {
                let [lo, hi] = pack_rgb565(color).to_ne_bytes();
                EncodedPixel {
                    bytes: [lo, hi, 0, 0],
                    len: 2,
                }
            }
        }
    }
}

/// Pack 8-bit channels into a 16-bit word without rescaling them to 5/6/5 bits.
///
/// Channel values above 31/63/31 bleed into the neighbouring fields, so most
/// colors come out oversaturated. Known limitation, not corrected.
pub fn pack_rgb565(color: Rgb888) -> u16 {
    let packed =
        (u32::from(color.r()) << 11) | (u32::from(color.g()) << 5) | u32::from(color.b());
    packed as u16
}

/// Bytes for one pixel, at most 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedPixel {
    bytes: [u8; 4],
    len: usize,
}

impl EncodedPixel {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Geometry queried once at acquire time and never refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Visible resolution in pixels
    pub width: u32,
    pub height: u32,
    /// Panning offset of the visible area inside the virtual one
    pub x_offset: u32,
    pub y_offset: u32,
    pub bits_per_pixel: u32,
    /// Stride in bytes, may include padding past `width * bytes_per_pixel`
    pub line_length: u32,
    pub virtual_width: u32,
    pub virtual_height: u32,
}

impl Geometry {
    pub fn from_screen_info(fix: &FixScreenInfo, var: &VarScreenInfo) -> Self {
        Geometry {
            width: var.xres,
            height: var.yres,
            x_offset: var.xoffset,
            y_offset: var.yoffset,
            bits_per_pixel: var.bits_per_pixel,
            line_length: fix.line_length,
            virtual_width: var.xres_virtual,
            virtual_height: var.yres_virtual,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_bits_per_pixel(self.bits_per_pixel)
    }

    /// Length of the region to map: virtual resolution times bytes per pixel
    pub fn buffer_size(&self) -> usize {
        self.virtual_width as usize * self.virtual_height as usize * self.bytes_per_pixel()
    }

    /// Byte offset of visible pixel `(x, y)`.
    ///
    /// Not checked against `buffer_size`; the driver's stride is trusted.
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (x as usize + self.x_offset as usize) * self.bytes_per_pixel()
            + (y as usize + self.y_offset as usize) * self.line_length as usize
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}, {}bpp", self.width, self.height, self.bits_per_pixel)
    }
}
