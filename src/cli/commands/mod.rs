//! CLI command implementations.
//!
//! Each command parses its own arguments and returns a process exit
//! code; `main` maps errors that escape to the fatal code.

pub mod extract;
pub mod init;
pub mod pseudo;
pub mod validate;
