//! Command implementations for the daybook CLI.
//!
//! Each module holds one subcommand: its clap `Args` and a `run` function
//! returning the process exit code.

pub mod check_cmd;
pub mod import_cmd;
pub mod report_cmd;
