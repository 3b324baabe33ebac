//! CLI module for the datesift command-line interface.
//!
//! Command handlers build a mode from the loaded configuration plus any
//! command-line overrides, then hand results to the output formatters.

mod commands;
mod output;

pub use commands::*;
