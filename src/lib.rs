//! dirsync command-line application
//!
//! Exposes the CLI layers for integration testing.

pub mod cli;
pub mod config;
