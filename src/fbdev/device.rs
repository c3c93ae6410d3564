//! Framebuffer device lifecycle
//!
//! [`FbDevice::acquire`] opens the device, reads its geometry and maps its
//! memory. Anything opened before a failure is closed again on the way out.
//! Release happens exactly once, when the device is dropped: the screen is
//! painted black, the memory unmapped, then the descriptor closed.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use memmap2::MmapMut;
use nix::errno::Errno;

use crate::fbdev::error::FbError;
use crate::fbdev::geometry::{Geometry, PixelFormat};
use crate::fbdev::ioctl;
use crate::fbdev::memory::{self, FrameMemory};
use crate::fbdev::surface::Surface;
use crate::fbdev::{LEGACY_PATH, PRIMARY_PATH};

/// An open, mapped framebuffer
pub struct FbDevice<M: FrameMemory = MmapMut> {
    // Fields drop in order: unmap before close
    surface: Surface<M>,
    file: File,
}

impl FbDevice {
    /// Acquire the system framebuffer, falling back to the legacy path when
    /// the primary one does not exist
    pub fn acquire() -> Result<Self, FbError> {
        Self::acquire_from(&[Path::new(PRIMARY_PATH), Path::new(LEGACY_PATH)])
    }

    /// Acquire the first of `paths` that exists
    pub fn acquire_from(paths: &[&Path]) -> Result<Self, FbError> {
        let file = open_first(paths)?;

        let fix = ioctl::read_fixed(&file).map_err(FbError::FixedInfo)?;
        let var = ioctl::read_variable(&file).map_err(FbError::VariableInfo)?;

        let geometry = Geometry::from_screen_info(&fix, &var);
        log::info!("Screen information: {}", geometry);
        log::debug!(
            "Driver '{}', stride {} bytes, virtual {} x {}, offset ({}, {}), smem_len {}",
            fix.id(),
            geometry.line_length,
            geometry.virtual_width,
            geometry.virtual_height,
            geometry.x_offset,
            geometry.y_offset,
            fix.smem_len
        );
        if geometry.bits_per_pixel != 16 && geometry.bits_per_pixel != 32 {
            log::warn!(
                "Unsupported depth {}bpp, driving it as {:?}",
                geometry.bits_per_pixel,
                PixelFormat::Rgb565
            );
        }

        let buffer_size = geometry.buffer_size();
        log::debug!("Mapping {} bytes", buffer_size);
        let region = memory::map(&file, buffer_size).map_err(FbError::Map)?;
        log::info!("The framebuffer device was mapped to memory successfully");

        Ok(FbDevice::from_parts(Surface::new(geometry, region), file))
    }
}

impl<M: FrameMemory> FbDevice<M> {
    pub(crate) fn from_parts(surface: Surface<M>, file: File) -> Self {
        FbDevice { surface, file }
    }

    pub fn surface_mut(&mut self) -> &mut Surface<M> {
        &mut self.surface
    }

    /// Clear the screen, unmap and close
    pub fn release(self) {
        log::debug!("Releasing framebuffer (fd {})", self.file.as_raw_fd());
        drop(self);
    }
}

impl<M: FrameMemory> Drop for FbDevice<M> {
    fn drop(&mut self) {
        // a second panic while unwinding would abort before unmap and close
        if std::thread::panicking() {
            log::warn!("Skipping screen clear while panicking");
            return;
        }
        self.surface.paint(Rgb888::BLACK);
    }
}

/// Device nodes that are simply not there, as opposed to present but unusable
fn is_missing(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
        || err.raw_os_error() == Some(Errno::ENODEV as i32)
        || err.raw_os_error() == Some(Errno::ENXIO as i32)
}

fn open_first(paths: &[&Path]) -> Result<File, FbError> {
    let mut missing = None;

    for path in paths {
        match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => {
                log::debug!("Opened {}", path.display());
                return Ok(file);
            }
            Err(err) if is_missing(&err) => {
                log::debug!("{} not available: {}", path.display(), err);
                missing = Some((path.to_path_buf(), err));
            }
            Err(source) => {
                return Err(FbError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    let (path, source) =
        missing.unwrap_or_else(|| (PathBuf::new(), io::Error::from(io::ErrorKind::NotFound)));
    Err(FbError::Open { path, source })
}
