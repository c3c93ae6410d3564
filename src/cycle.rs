//! Step the screen through the palette

use std::sync::atomic::{AtomicBool, Ordering};

use embedded_graphics::geometry::OriginDimensions;
use embedded_hal::delay::DelayNs;

use crate::fbdev::memory::FrameMemory;
use crate::fbdev::surface::Surface;
use crate::palette::PALETTE;

/// Time each color stays on screen
pub const DWELL_MS: u32 = 1000;

/// Granularity at which a stop request is noticed during the dwell
pub const STOP_POLL_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Show every color once, then exit
    #[default]
    Once,
    /// Repeat the palette until stopped
    Forever,
}

/// Blocking delay backed by `std::thread::sleep`
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Paint each palette entry and hold it for [`DWELL_MS`].
///
/// Returns the number of colors painted. Stops early once `stop` is set.
pub fn run<M, D>(surface: &mut Surface<M>, delay: &mut D, mode: RunMode, stop: &AtomicBool) -> usize
where
    M: FrameMemory,
    D: DelayNs,
{
    let size = surface.size();
    log::info!(
        "Cycling {} colors over {}x{} pixels ({:?})",
        PALETTE.len(),
        size.width,
        size.height,
        mode
    );
    log::debug!(
        "{:?} pixels, {} bytes of framebuffer memory",
        surface.geometry().pixel_format(),
        surface.memory().len()
    );

    let mut painted = 0;
    loop {
        for swatch in PALETTE.iter() {
            if stop.load(Ordering::SeqCst) {
                log::info!("Stop requested after {} colors", painted);
                return painted;
            }
            log::debug!("Showing {}", swatch.name);
            surface.paint(swatch.color);
            painted += 1;
            dwell(delay, stop);
        }

        if mode == RunMode::Once {
            return painted;
        }
    }
}

fn dwell<D: DelayNs>(delay: &mut D, stop: &AtomicBool) {
    for _ in 0..DWELL_MS / STOP_POLL_MS {
        if stop.load(Ordering::SeqCst) {
            return;
        }
        delay.delay_ms(STOP_POLL_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbdev::geometry::tests::geometry;
    use embedded_graphics::pixelcolor::RgbColor;

    const SLICES: u32 = DWELL_MS / STOP_POLL_MS;

    struct CountingDelay<'a> {
        total_ms: u64,
        calls: u32,
        stop_after: Option<u32>,
        stop: &'a AtomicBool,
    }

    impl<'a> CountingDelay<'a> {
        fn new(stop: &'a AtomicBool, stop_after: Option<u32>) -> Self {
            CountingDelay {
                total_ms: 0,
                calls: 0,
                stop_after,
                stop,
            }
        }
    }

    impl DelayNs for CountingDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns) / 1_000_000;
            self.calls += 1;
            if self.stop_after == Some(self.calls) {
                self.stop.store(true, Ordering::SeqCst);
            }
        }
    }

    fn surface() -> Surface<Vec<u8>> {
        Surface::new(geometry(2, 2, 32, 8), vec![0; 16])
    }

    #[test]
    fn once_shows_each_color_for_a_second() {
        let stop = AtomicBool::new(false);
        let mut delay = CountingDelay::new(&stop, None);
        let mut s = surface();

        let painted = run(&mut s, &mut delay, RunMode::Once, &stop);

        assert_eq!(painted, PALETTE.len());
        assert_eq!(delay.total_ms, PALETTE.len() as u64 * u64::from(DWELL_MS));
        // last color left on screen
        let last = PALETTE[PALETTE.len() - 1].color;
        assert_eq!(&s.memory()[..3], &[last.r(), last.g(), last.b()]);
    }

    #[test]
    fn preset_stop_paints_nothing() {
        let stop = AtomicBool::new(true);
        let mut delay = CountingDelay::new(&stop, None);
        let mut s = surface();

        assert_eq!(run(&mut s, &mut delay, RunMode::Forever, &stop), 0);
        assert_eq!(delay.calls, 0);
        assert!(s.memory().iter().all(|&b| b == 0));
    }

    #[test]
    fn stop_during_dwell_is_noticed_within_one_slice() {
        let stop = AtomicBool::new(false);
        // third color, fourth slice
        let mut delay = CountingDelay::new(&stop, Some(2 * SLICES + 4));
        let mut s = surface();

        let painted = run(&mut s, &mut delay, RunMode::Once, &stop);

        assert_eq!(painted, 3);
        assert_eq!(delay.calls, 2 * SLICES + 4);
        assert_eq!(&s.memory()[..3], &[255, 0, 0]);
    }

    #[test]
    fn forever_wraps_around_until_stopped() {
        let stop = AtomicBool::new(false);
        let rounds = 3;
        let mut delay = CountingDelay::new(&stop, Some(rounds * PALETTE.len() as u32 * SLICES));
        let mut s = surface();

        let painted = run(&mut s, &mut delay, RunMode::Forever, &stop);

        assert_eq!(painted, rounds as usize * PALETTE.len());
    }

    #[test]
    fn default_mode_is_once() {
        assert_eq!(RunMode::default(), RunMode::Once);
    }
}
