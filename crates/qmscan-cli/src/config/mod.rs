//! Configuration for every subcommand, merged in increasing priority from the
//! built-in defaults, an optional TOML file, `-S KEY=VALUE` overrides and explicit
//! command-line flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
