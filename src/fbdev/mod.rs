//! Linux framebuffer (fbdev) driver
//!
//! Drives `/dev/fb0` through its memory mapping rather than any display
//! protocol. The device reports its own geometry and everything is
//! addressed from that:
//!
//! 1. [`device::FbDevice::acquire`] opens the node, reads fixed and
//!    variable screen information, and maps the memory
//! 1. [`surface::Surface::paint`] fills the visible area with one color
//! 1. dropping the [`device::FbDevice`] (or calling `release`) blanks the
//!    screen and gives everything back
//!
//! ### Pixel formats
//!
//! - 32 bpp: channel bytes R, G, B at offsets +0, +1, +2
//! - everything else is treated as 16 bpp: one `(r << 11) | (g << 5) | b`
//!   word, written native-endian

pub mod device;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod surface;

mod ioctl;

/// Framebuffer node on current systems
pub const PRIMARY_PATH: &str = "/dev/fb0";

/// Node used by older Android-style device trees
pub const LEGACY_PATH: &str = "/dev/graphics/fb0";
