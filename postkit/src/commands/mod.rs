//! Subcommand implementations. Each module exposes its clap `Args` and a
//! `run` entry point.

pub mod align;
pub mod check;
pub mod check_keys;
pub mod import;
pub mod tag;
pub mod validate;
