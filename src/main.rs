use std::process::ExitCode;

use anyhow::Context;

mod config;
mod cycle;
mod fbdev;
mod logging;
mod palette;
mod signal;

pub use crate::config::Config;
pub use crate::cycle::StdDelay;
pub use crate::fbdev::device::FbDevice;
pub use crate::fbdev::error::FbError;

fn main() -> ExitCode {
    // Bind the log crate to the console
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    let stop = signal::install().context("installing termination handlers failed")?;

    let mut fbdev = FbDevice::acquire()?;

    let painted = cycle::run(fbdev.surface_mut(), &mut StdDelay, config.mode, stop);
    log::info!("Displayed {} colors, clearing screen", painted);

    // clear framebuffer and release resources
    fbdev.release();
    Ok(())
}

/// Per-class exit status for device failures, 1 for anything else
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<FbError>().map_or(1, FbError::exit_code)
}
