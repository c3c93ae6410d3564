//! The colors shown, in display order

use embedded_graphics::pixelcolor::Rgb888;

/// A named palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Rgb888,
}

impl Swatch {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Swatch {
            name,
            color: Rgb888::new(r, g, b),
        }
    }
}

pub const PALETTE: [Swatch; 11] = [
    Swatch::new("black", 0, 0, 0),
    Swatch::new("white", 255, 255, 255),
    Swatch::new("red", 255, 0, 0),
    Swatch::new("green", 0, 255, 0),
    Swatch::new("blue", 0, 0, 255),
    Swatch::new("cyan", 0, 255, 255),
    Swatch::new("purple", 160, 32, 240),
    Swatch::new("yellow", 255, 250, 0),
    Swatch::new("dim gray", 105, 105, 105),
    Swatch::new("gray", 190, 190, 190),
    Swatch::new("light gray", 211, 211, 211),
];
