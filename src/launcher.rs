//! Launching of external commands from a fixed, ordered list of directories.

use crate::argv::Argv;
use crate::config::DEFAULT_SEARCH_PREFIXES;
use crate::env::{Child, Environment};
use log::{debug, error};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The host could not create a process at all.
    #[error("{0}")]
    Spawn(#[source] io::Error),
}

/// Resolves a command name against `prefixes`, first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    prefixes: Vec<String>,
}

impl Launcher {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Candidate paths for `name`, in the order they are tried.
    ///
    /// This is plain concatenation: a name containing `/` gets no special treatment.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        self.prefixes
            .iter()
            .map(|p| format!("{}{}", p, name))
            .collect()
    }

    /// Runs `argv` in a child process and waits for it.
    ///
    /// The child executes the first candidate that works; if none does it
    /// reports the command as not found and exits, and is returned all the
    /// same. `Ok(None)` means `argv` was empty and nothing was started.
    pub fn launch(&self, argv: &Argv, env: &mut dyn Environment) -> Result<Option<Child>, LaunchError> {
        let Some(name) = argv.name() else {
            return Ok(None);
        };
        let candidates = self.candidates(name);
        match env.spawn_and_wait(&candidates, argv) {
            Ok(child) => {
                debug!("{} ran as pid {}, exit code {}", name, child.pid, child.exit_code);
                Ok(Some(child))
            }
            Err(e) => {
                error!("cannot create a process for {}: {}", name, e);
                Err(LaunchError::Spawn(e))
            }
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_PREFIXES.iter().map(|p| p.to_string()).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::env::{NOT_FOUND_STATUS, SystemEnvironment};
    use crate::io_adapters::MemWriter;
    use std::collections::HashMap;
    use std::io::Write;

    /// Environment that runs nothing: it knows a set of "installed" paths,
    /// records every path a child would try, and writes the not-found message
    /// to `terminal` like a real child would.
    #[derive(Default)]
    pub(crate) struct FakeEnvironment {
        pub installed: HashMap<String, i32>,
        pub attempts: Vec<(String, Argv)>,
        pub dirs: Vec<String>,
        pub missing_dirs: Vec<String>,
        pub exhausted: bool,
        pub next_pid: u32,
        pub terminal: MemWriter,
    }

    impl FakeEnvironment {
        pub(crate) fn with_installed(paths: &[&str]) -> Self {
            Self {
                installed: paths.iter().map(|p| (p.to_string(), 0)).collect(),
                next_pid: 100,
                ..Self::default()
            }
        }
    }

    impl Environment for FakeEnvironment {
        fn change_dir(&mut self, path: &str) -> io::Result<()> {
            if self.missing_dirs.iter().any(|d| d == path) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            self.dirs.push(path.to_string());
            Ok(())
        }

        fn spawn_and_wait(&mut self, candidates: &[String], argv: &Argv) -> io::Result<Child> {
            if self.exhausted {
                return Err(io::Error::from(io::ErrorKind::WouldBlock));
            }
            self.next_pid += 1;
            let pid = self.next_pid;
            for path in candidates {
                self.attempts.push((path.clone(), argv.clone()));
                if let Some(&exit_code) = self.installed.get(path) {
                    return Ok(Child { pid, exit_code });
                }
            }
            writeln!(self.terminal, "{}: Command not found.", argv.name().unwrap_or_default())?;
            Ok(Child {
                pid,
                exit_code: NOT_FOUND_STATUS,
            })
        }
    }

    fn attempted(env: &FakeEnvironment) -> Vec<&str> {
        env.attempts.iter().map(|(p, _)| p.as_str()).collect()
    }

    #[test]
    fn tries_prefixes_in_order() {
        let mut env = FakeEnvironment::with_installed(&["/bin/ls"]);
        let argv = Argv::from(vec!["ls", "-l"]);
        let child = Launcher::default().launch(&argv, &mut env).unwrap();

        assert_eq!(
            attempted(&env),
            vec!["./ls", "/usr/local/bin/ls", "/usr/bin/ls", "/bin/ls"]
        );
        assert_eq!(
            child,
            Some(Child {
                pid: 101,
                exit_code: 0
            })
        );
        assert_eq!(env.attempts[3].1, argv);
    }

    #[test]
    fn current_directory_wins() {
        let mut env = FakeEnvironment::with_installed(&["./ls", "/usr/bin/ls"]);
        Launcher::default()
            .launch(&Argv::from(vec!["ls"]), &mut env)
            .unwrap();
        assert_eq!(attempted(&env), vec!["./ls"]);
    }

    #[test]
    fn not_found_child_is_still_returned() {
        let mut env = FakeEnvironment::with_installed(&[]);
        let child = Launcher::default()
            .launch(&Argv::from(vec!["nope"]), &mut env)
            .unwrap()
            .expect("a child is created even when nothing can be executed");
        assert_eq!(child.exit_code, NOT_FOUND_STATUS);
        assert_eq!(env.attempts.len(), 4);
        assert_eq!(env.terminal.take(), "nope: Command not found.\n");
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let mut env = FakeEnvironment::with_installed(&["/bin/ls"]);
        env.exhausted = true;
        let res = Launcher::default().launch(&Argv::from(vec!["ls"]), &mut env);
        assert!(matches!(res, Err(LaunchError::Spawn(_))));
        assert!(env.attempts.is_empty());
    }

    #[test]
    fn names_with_slash_are_concatenated() {
        let launcher = Launcher::new(vec!["./".to_string(), "/bin/".to_string()]);
        assert_eq!(launcher.candidates("/bin/ls"), vec![".//bin/ls", "/bin//bin/ls"]);
    }

    #[test]
    fn empty_argv_starts_nothing() {
        let mut env = FakeEnvironment::default();
        let child = Launcher::default()
            .launch(&Argv::default(), &mut env)
            .unwrap();
        assert_eq!(child, None);
        assert_eq!(env.next_pid, 0);
    }

    #[test]
    fn launches_real_true() {
        let launcher = Launcher::new(vec!["/usr/bin/".to_string(), "/bin/".to_string()]);
        let child = launcher
            .launch(&Argv::from(vec!["true"]), &mut SystemEnvironment)
            .unwrap()
            .expect("Expected a child for 'true'");
        assert!(child.pid > 0);
        assert_eq!(child.exit_code, 0);
    }
}
