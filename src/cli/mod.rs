//! Command-line host.
//!
//! Plays the host runtime for local use: the parameter file is the
//! installation store, stdin/stdout stand in for dialogs and the field.

mod args;
pub mod check;
pub mod common;
pub mod pick;
pub mod resolve;
pub mod spaces;

pub use args::{Cli, Commands, DraftArgs, EditArgs};
