//! dermassist-cli library root.
//!
//! Re-exports the config and render modules so integration tests can
//! exercise them without going through the command-line parser.

pub mod config;
pub mod render;
