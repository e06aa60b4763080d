//! Tunables of the interpreter.
//!
//! Nothing here is read from files or environment variables: the defaults below
//! are what the shell runs with unless the binary's command-line flags override them.

/// Default capacity of the command history (`!0` .. `!14`).
pub const COMMAND_HISTORY_SIZE: usize = 15;

/// Default capacity of the process-id history.
pub const PID_HISTORY_SIZE: usize = 20;

/// Directories tried, in order, when launching an external command.
///
/// The current directory comes first so that locally built binaries win
/// over installed ones.
pub const DEFAULT_SEARCH_PREFIXES: [&str; 4] = ["./", "/usr/local/bin/", "/usr/bin/", "/bin/"];

/// Bounds applied by the tokenizer. Input exceeding them is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of characters of a line that are looked at.
    pub max_line_len: usize,
    /// Maximum number of words kept, command name included.
    pub max_args: usize,
    /// Maximum number of characters kept per word.
    pub max_arg_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_len: 1024,
            max_args: 11,
            max_arg_len: 96,
        }
    }
}

/// Everything needed to build an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub history_size: usize,
    pub pid_history_size: usize,
    pub search_prefixes: Vec<String>,
    pub limits: Limits,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "msh> ".to_string(),
            history_size: COMMAND_HISTORY_SIZE,
            pid_history_size: PID_HISTORY_SIZE,
            search_prefixes: DEFAULT_SEARCH_PREFIXES.iter().map(|p| p.to_string()).collect(),
            limits: Limits::default(),
        }
    }
}
