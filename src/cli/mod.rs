//! CLI module
//!
//! Command-line interface for the friend aggregator.
//!
//! # Commands
//!
//! - `friends` - Fetch direct and invitable friends
//! - `profile` - Show the signed-in user's profile
//! - `picture` - Show or download the profile picture
//! - `config` - Print the resolved configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
