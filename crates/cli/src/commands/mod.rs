// Path: crates/cli/src/commands/mod.rs
pub mod check_config;
pub mod replay;
