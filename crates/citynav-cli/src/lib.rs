//! citynav CLI library.
//!
//! Command handlers, output formatting, and logging setup for the `citynav-cli`
//! binary. The binary itself only parses arguments and dispatches here.

pub mod commands;
pub mod logging;
pub mod output;
