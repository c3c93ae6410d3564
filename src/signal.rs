//! Termination signals become a stop request for the color cycle

use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

static STOP: AtomicBool = AtomicBool::new(false);

const SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

extern "C" fn request_stop(_signal: c_int) {
    STOP.store(true, Ordering::SeqCst);
}

/// Install handlers for SIGINT, SIGTERM and SIGHUP; returns the flag they set
pub fn install() -> nix::Result<&'static AtomicBool> {
    let action = SigAction::new(
        SigHandler::Handler(request_stop),
        SaFlags::empty(),
        SigSet::empty(),
    );
    for sig in SIGNALS {
        // SAFETY: the handler only touches an atomic, which is async-signal-safe
        unsafe { signal::sigaction(sig, &action) }?;
    }
    Ok(&STOP)
}
