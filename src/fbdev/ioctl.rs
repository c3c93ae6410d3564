//! Framebuffer ioctl requests and the kernel structures they fill in
//!
//! Layouts follow `<linux/fb.h>` field for field.

use std::ffi::{c_char, c_ulong};
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;

nix::ioctl_read_bad!(fbioget_vscreeninfo, 0x4600, VarScreenInfo);
nix::ioctl_read_bad!(fbioget_fscreeninfo, 0x4602, FixScreenInfo);

/// `FBIOGET_FSCREENINFO`: stride, memory length, driver id
pub fn read_fixed(file: &File) -> io::Result<FixScreenInfo> {
    let mut info = FixScreenInfo::default();
    // SAFETY: `info` is the #[repr(C)] struct this request fills in
    unsafe { fbioget_fscreeninfo(file.as_raw_fd(), &mut info) }?;
    Ok(info)
}

/// `FBIOGET_VSCREENINFO`: resolution, panning offset, depth
pub fn read_variable(file: &File) -> io::Result<VarScreenInfo> {
    let mut info = VarScreenInfo::default();
    // SAFETY: `info` is the #[repr(C)] struct this request fills in
    unsafe { fbioget_vscreeninfo(file.as_raw_fd(), &mut info) }?;
    Ok(info)
}

/// `struct fb_fix_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct FixScreenInfo {
    pub id: [c_char; 16],
    pub smem_start: c_ulong,
    pub smem_len: u32,
    pub type_: u32,
    pub type_aux: u32,
    pub visual: u32,
    pub xpanstep: u16,
    pub ypanstep: u16,
    pub ywrapstep: u16,
    /// Bytes per scanline
    pub line_length: u32,
    pub mmio_start: c_ulong,
    pub mmio_len: u32,
    pub accel: u32,
    pub capabilities: u16,
    pub reserved: [u16; 2],
}

impl FixScreenInfo {
    /// Driver identification string, up to the first NUL
    pub fn id(&self) -> String {
        self.id
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8 as char)
            .collect()
    }
}

/// `struct fb_bitfield`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct Bitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// `struct fb_var_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
#[allow(dead_code)]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: Bitfield,
    pub green: Bitfield,
    pub blue: Bitfield,
    pub transp: Bitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}
