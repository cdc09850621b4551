//! # Runtime Configuration
//!
//! Coroutine runtime settings read from the environment at startup.
//!
//! ### `CHAINSERVE_STACK_SIZE`
//!
//! Stack size for the `may` coroutines that serve connections. Accepts
//! decimal (`16384`) or hexadecimal (`0x4000`). Default: `0x4000` (16 KB).
//!
//! ```bash
//! export CHAINSERVE_STACK_SIZE=0x8000
//! chainserve serve --root ./public
//! ```

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let stack_size = env::var("CHAINSERVE_STACK_SIZE")
            .map(|val| parse_stack_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }

    /// Apply the settings to the global `may` runtime.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_stack_size(val: &str) -> usize {
    let parsed = match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.unwrap_or(DEFAULT_STACK_SIZE)
}
