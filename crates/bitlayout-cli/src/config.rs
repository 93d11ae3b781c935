//! Environment-driven defaults.

use anyhow::{Result, anyhow};
use bitlayout::abi::Abi;

pub const ABI_VAR: &str = "BITLAYOUT_ABI";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// ABI used when neither the command line nor a layout file names one.
    pub default_abi: Abi,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(ABI_VAR).ok().as_deref())
    }

    fn from_value(abi: Option<&str>) -> Result<Self> {
        let default_abi = match abi.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name
                .parse::<Abi>()
                .map_err(|e| anyhow!("{ABI_VAR}: {e}"))?,
            None => Abi::default(),
        };

        Ok(Config { default_abi })
    }

    /// A command-line flag wins over the environment.
    pub fn resolve_abi(&self, flag: Option<Abi>) -> Abi {
        flag.unwrap_or(self.default_abi)
    }
}
