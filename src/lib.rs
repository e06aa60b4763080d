//! A tiny interactive command interpreter with command and process recall.
//!
//! The interpreter reads one line at a time, splits it into an [`Argv`], and either
//! runs one of a handful of built-in commands or launches an external program from
//! a fixed, ordered list of directories. It remembers the last few command lines
//! (recallable with `!n`) and the process ids of the last few children it spawned.
//!
//! The main entry point is [`Interpreter`]. The public modules [`env`] and
//! [`io_adapters`] expose the seams to the host: process spawning and directory
//! changes on one side, line input on the other.

mod argv;
mod builtin;
pub mod config;
pub mod env;
mod history;
mod interpreter;
pub mod io_adapters;
mod launcher;
mod tokenizer;

pub use argv::Argv;
pub use config::{Limits, ShellConfig};
pub use history::{CommandHistory, HistoryStore, PidHistory, RingBuffer};
pub use interpreter::{Flow, Interpreter};
pub use env::Child;
pub use launcher::{LaunchError, Launcher};
pub use tokenizer::tokenize;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;
