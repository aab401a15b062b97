//! Daybook CLI.
//!
//! This crate provides the `daybook` command-line front end:
//!
//! - `daybook import`: group a CSV file into journal entries and optionally
//!   submit them
//! - `daybook report`: fetch and render the trial balance, balance sheet or
//!   profit and loss statement
//! - `daybook check`: validate a draft entry file and print coded
//!   diagnostics
//!
//! # Example Usage
//!
//! ```bash
//! daybook import bank.csv --map entry_date="Posting Date" --submit
//! daybook report trial-balance --base-url http://localhost:8080/api
//! daybook check draft.json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
