use crate::argv::Argv;
use crate::builtin::{self, BuiltinCommand, Context};
use crate::config::{Limits, ShellConfig};
use crate::env::{Environment, SystemEnvironment};
use crate::history::HistoryStore;
use crate::io_adapters::LineSource;
use crate::launcher::{LaunchError, Launcher};
use crate::tokenizer::tokenize;
use anyhow::Result;
use log::{debug, error};
use std::io::Write;

/// Whether the dispatch loop should read another line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A minimal interactive interpreter with command and process recall.
///
/// Each line is tokenized, recorded in the command history (unless it is a
/// `!n` recall reference), then dispatched to a built-in or launched as an
/// external program. Output meant for the operator goes to the writer given at
/// construction.
///
/// Example
/// ```
/// use msh::{Flow, Interpreter};
/// let mut sh = Interpreter::default();
/// assert_eq!(sh.execute_line("cd .").unwrap(), Flow::Continue);
/// assert_eq!(sh.execute_line("!0").unwrap(), Flow::Continue);
/// assert_eq!(sh.history().commands.len(), 1);
/// assert_eq!(sh.execute_line("quit").unwrap(), Flow::Exit);
/// ```
pub struct Interpreter {
    prompt: String,
    limits: Limits,
    history: HistoryStore,
    launcher: Launcher,
    builtins: Vec<Box<dyn BuiltinCommand>>,
    env: Box<dyn Environment>,
    stdout: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter running on `env` and printing to `stdout`.
    pub fn new(config: ShellConfig, env: Box<dyn Environment>, stdout: Box<dyn Write>) -> Self {
        Self {
            prompt: config.prompt,
            limits: config.limits,
            history: HistoryStore::new(config.history_size, config.pid_history_size),
            launcher: Launcher::new(config.search_prefixes),
            builtins: builtin::defaults(),
            env,
            stdout,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    /// Tokenize and run one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let argv = tokenize(line, &self.limits);
        self.execute(argv)
    }

    /// Run one argument vector.
    ///
    /// A recall reference (`!n`) is consumed here and never stored; the command
    /// it names is run straight out of the history. Anything else with a command
    /// name is moved into the history first and run from there.
    pub fn execute(&mut self, argv: Argv) -> Result<Flow> {
        let offset = match recall_reference(&argv, self.history.commands.capacity()) {
            Some(offset) => {
                drop(argv);
                let Some(n) = offset else {
                    writeln!(self.stdout, "Invalid n.")?;
                    return Ok(Flow::Continue);
                };
                if self.history.lookup_command(n).is_none() {
                    writeln!(self.stdout, "Command not in history.")?;
                    return Ok(Flow::Continue);
                }
                n
            }
            None if argv.is_empty() => return Ok(Flow::Continue),
            None => {
                self.history.record_command(argv);
                0
            }
        };

        // Borrowed from the history slot; the store keeps ownership.
        let Some(argv) = self.history.commands.lookup(offset) else {
            return Ok(Flow::Continue);
        };
        let Some(name) = argv.name() else {
            return Ok(Flow::Continue);
        };

        if let Some(cmd) = self.builtins.iter().find(|b| b.names().contains(&name)) {
            debug!("builtin: {}", argv);
            let mut ctx = Context {
                history: &self.history,
                env: &mut *self.env,
            };
            return cmd.execute(argv, &mut *self.stdout, &mut ctx);
        }

        debug!("external: {}", argv);
        // The child shares the terminal; pending output goes first.
        self.stdout.flush()?;
        match self.launcher.launch(argv, &mut *self.env) {
            Ok(Some(child)) => {
                self.history.record_pid(child.pid);
                Ok(Flow::Continue)
            }
            Ok(None) => Ok(Flow::Continue),
            Err(LaunchError::Spawn(e)) => {
                error!("giving up after process creation failed");
                self.stdout.flush()?;
                eprintln!("fork: {}", e);
                Ok(Flow::Exit)
            }
        }
    }

    /// Read-eval loop: runs until `exit`/`quit`, a fatal launch failure, or end
    /// of input.
    pub fn repl(&mut self, input: &mut dyn LineSource) -> Result<()> {
        loop {
            self.stdout.flush()?;
            let Some(line) = input.read_line(&self.prompt)? else {
                debug!("end of input");
                break;
            };
            if self.execute_line(&line)? == Flow::Exit {
                break;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Interpreter {
    /// Default configuration on the real host, printing to standard output.
    fn default() -> Self {
        Self::new(
            ShellConfig::default(),
            Box::new(SystemEnvironment),
            Box::new(std::io::stdout()),
        )
    }
}

/// `Some` when `argv` is a recall reference (`!n`); the inner value is the
/// offset, or `None` when it is negative or not below `capacity`.
///
/// `n` is read like C's `atoi`: an optional sign and the leading digits, the
/// rest ignored. No digits at all reads as 0, so `!` and `!x` mean `!0` and
/// `!3x` means `!3`.
fn recall_reference(argv: &Argv, capacity: usize) -> Option<Option<usize>> {
    let text = argv.name()?.strip_prefix('!')?;
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n = match &rest[..end] {
        "" => Some(0),
        digits => digits.parse::<usize>().ok(),
    };
    Some(n.filter(|n| !(negative && *n != 0) && *n < capacity))
}
