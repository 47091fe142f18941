//! lexidx command-line front end: argument parsing, config resolution,
//! the `build` and `search` commands, and result formatting.

pub mod cli;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;
