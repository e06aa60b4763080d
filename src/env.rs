//! The host primitives the interpreter depends on.
//!
//! The interpreter never touches the process table or the working directory
//! directly; it goes through an [`Environment`]. [`SystemEnvironment`] is the real
//! one, tests substitute their own.

use crate::ExitCode;
use crate::argv::Argv;
use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};
use std::env as stdenv;
use std::ffi::CString;
use std::fs::File;
use std::io::{self, Write};
use std::mem::ManuallyDrop;
use std::os::unix::io::FromRawFd;
use std::path::Path;

/// Exit status of a child that found nothing to execute.
pub const NOT_FOUND_STATUS: ExitCode = 1;

/// A child process that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Child {
    pub pid: u32,
    /// Exit code, or `128 + signal` when the child was killed.
    pub exit_code: ExitCode,
}

/// Host services used by the built-in `cd` and by the launcher.
pub trait Environment {
    /// Changes the working directory of the interpreter process.
    fn change_dir(&mut self, path: &str) -> io::Result<()>;

    /// Creates one child process that executes the first of `candidates` that
    /// can be executed, with `argv` as its arguments (`argv[0]` is the command
    /// name as typed), and blocks until the child exits.
    ///
    /// When no candidate can be executed the child prints
    /// `<name>: Command not found.` and exits with [`NOT_FOUND_STATUS`]; it is
    /// still a child and is still returned. Errors are those of process
    /// creation only.
    fn spawn_and_wait(&mut self, candidates: &[String], argv: &Argv) -> io::Result<Child>;
}

/// [`Environment`] backed by the operating system.
#[derive(Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn change_dir(&mut self, path: &str) -> io::Result<()> {
        stdenv::set_current_dir(Path::new(path))
    }

    fn spawn_and_wait(&mut self, candidates: &[String], argv: &Argv) -> io::Result<Child> {
        // Everything the child needs is prepared before the fork.
        let paths: Vec<CString> = candidates
            .iter()
            .filter_map(|p| CString::new(p.as_str()).ok())
            .collect();
        let args: Option<Vec<CString>> = argv.iter().map(|a| CString::new(a).ok()).collect();
        let not_found = format!("{}: Command not found.\n", argv.name().unwrap_or_default());

        // SAFETY: the child only calls execv, write(2) on fd 1 and _exit.
        match unsafe { unistd::fork() }.map_err(io::Error::from)? {
            ForkResult::Child => {
                if let Some(args) = args.filter(|a| !a.is_empty()) {
                    for path in &paths {
                        let _ = unistd::execv(path, args.as_slice());
                    }
                }
                let mut out = ManuallyDrop::new(unsafe { File::from_raw_fd(1) });
                let _ = out.write_all(not_found.as_bytes());
                unsafe { nix::libc::_exit(NOT_FOUND_STATUS) }
            }
            ForkResult::Parent { child } => {
                let exit_code = wait_for(child);
                debug!("child {} exited with {}", child, exit_code);
                Ok(Child {
                    pid: child.as_raw() as u32,
                    exit_code,
                })
            }
        }
    }
}

/// Blocks until `pid` terminates and converts its status to an exit code.
fn wait_for(pid: Pid) -> ExitCode {
    loop {
        match wait::waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return code,
            Ok(WaitStatus::Signaled(_, signal, _)) => return 128 + signal as i32,
            Ok(status) => debug!("child {} changed state: {:?}", pid, status),
            Err(Errno::EINTR) => continue,
            Err(e) => {
                warn!("failed to wait for child {}: {}", pid, e);
                return -1;
            }
        }
    }
}
