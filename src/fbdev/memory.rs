//! Byte-addressable framebuffer memory
//!
//! [`FrameMemory`] is what the fill code writes through. The device maps the
//! real thing as a `memmap2::MmapMut`; tests and simulations use a `Vec<u8>`.

use std::fs::File;
use std::io;

use memmap2::{MmapMut, MmapOptions};

pub trait FrameMemory {
    /// Length of the region in bytes
    fn len(&self) -> usize;

    /// Copy `bytes` to `offset`
    fn write_at(&mut self, offset: usize, bytes: &[u8]);
}

/// Shared write into a byte slice, with the bounds spelled out in debug builds
fn copy_into(dst: &mut [u8], offset: usize, bytes: &[u8]) {
    debug_assert!(
        offset + bytes.len() <= dst.len(),
        "write of {} bytes at {offset} past end of {}-byte framebuffer",
        bytes.len(),
        dst.len()
    );
    dst[offset..offset + bytes.len()].copy_from_slice(bytes);
}

impl FrameMemory for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        copy_into(self, offset, bytes);
    }
}

impl FrameMemory for MmapMut {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        copy_into(self, offset, bytes);
    }
}

/// Map `len` bytes of `file` from offset zero, shared and writable.
///
/// The mapping is released with the same length when the `MmapMut` drops.
pub fn map(file: &File, len: usize) -> io::Result<MmapMut> {
    // SAFETY: only this process writes the framebuffer; the driver just scans it out
    unsafe { MmapOptions::new().len(len).map_mut(file) }
}
