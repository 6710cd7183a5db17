//! CLI subcommands.

pub mod breaking;
pub mod changelog;
pub mod checks;
pub mod common;
pub mod diff;
