//! Command line configuration

use anyhow::bail;

use crate::cycle::RunMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: RunMode,
}

impl Config {
    /// Parse arguments, program name excluded. The last mode flag wins.
    pub fn from_args<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Config::default();
        for arg in args {
            config.mode = match arg.as_ref() {
                "--once" => RunMode::Once,
                "--loop" | "--forever" => RunMode::Forever,
                other => bail!("unknown argument '{}', expected --once or --loop", other),
            };
        }
        Ok(config)
    }
}
