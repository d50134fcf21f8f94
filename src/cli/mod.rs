//! CLI module for kili - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for remembering, reviewing,
//! quizzing, and maintenance.

pub mod commands;

pub use commands::Cli;
