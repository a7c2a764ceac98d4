//! Command implementations for the brisk CLI.
//!
//! - [`build`] - Build entries in every configured format
//! - [`check`] - Configuration validation
//! - [`init`] - Write a starter config file
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod build;
pub mod check;
pub mod init;
pub mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use init::execute as init_execute;
