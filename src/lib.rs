//! hookcheck library.
//!
//! Pre-commit gate for staged files: formatting, license and copyright
//! headers, and Ginkgo test hygiene.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod git;
pub mod guard;
pub mod report;

pub use error::Error;
