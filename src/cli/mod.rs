//! # CLI Module
//!
//! Command-line entry points for the `chainserve` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! ```bash
//! chainserve serve --root ./public --port 8080
//! chainserve serve --config chainserve.toml --create-samples
//! ```
//!
//! Flags override values from the `--config` file, which override the
//! built-in defaults (see [`crate::config`]).
//!
//! ### `samples`
//!
//! ```bash
//! chainserve samples --root ./public
//! ```
//!
//! Writes `index.html`, `time.py` and `info.py` without touching existing
//! files.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, ServeArgs};
