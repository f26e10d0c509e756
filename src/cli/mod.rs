//! Command-line interface module.

mod args;
pub mod convert;
pub mod watch;

pub use args::{Cli, Commands, ConvertArgs, WatchArgs};
