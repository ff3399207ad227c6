//! CLI subcommand implementations.

pub mod export;
pub mod layouts;
pub mod load;
