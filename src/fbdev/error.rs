use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while acquiring the framebuffer. All of them are fatal.
#[derive(Debug, Error)]
pub enum FbError {
    #[error("open framebuffer {} failed", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reading fbdev fixed information failed")]
    FixedInfo(#[source] io::Error),
    #[error("reading fbdev variable information failed")]
    VariableInfo(#[source] io::Error),
    #[error("mapping framebuffer device to memory failed")]
    Map(#[source] io::Error),
}

impl FbError {
    /// Process exit status for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            FbError::Open { .. } => 1,
            FbError::FixedInfo(_) => 2,
            FbError::VariableInfo(_) => 3,
            FbError::Map(_) => 5,
        }
    }
}
