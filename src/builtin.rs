use crate::argv::Argv;
use crate::env::Environment;
use crate::history::HistoryStore;
use crate::interpreter::Flow;
use anyhow::Result;
use log::debug;
use std::io::Write;

/// What a built-in may look at or act on while it runs.
pub(crate) struct Context<'a> {
    pub history: &'a HistoryStore,
    pub env: &'a mut dyn Environment,
}

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process and never touch either history themselves; the
/// resolver has already recorded the command line by the time they run.
pub(crate) trait BuiltinCommand {
    /// Every name the command answers to, e.g. `["exit", "quit"]`.
    fn names(&self) -> &'static [&'static str];

    fn execute(&self, argv: &Argv, stdout: &mut dyn Write, ctx: &mut Context<'_>) -> Result<Flow>;
}

/// Built-ins in lookup order.
pub(crate) fn defaults() -> Vec<Box<dyn BuiltinCommand>> {
    vec![
        Box::new(Exit),
        Box::new(Cd),
        Box::new(ListPids),
        Box::new(History),
    ]
}

/// Leave the interpreter. Any arguments are ignored.
pub(crate) struct Exit;

impl BuiltinCommand for Exit {
    fn names(&self) -> &'static [&'static str] {
        &["exit", "quit"]
    }

    fn execute(&self, _argv: &Argv, _stdout: &mut dyn Write, _ctx: &mut Context<'_>) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}

/// Change the working directory to the first operand.
///
/// Without an operand nothing happens. A failed change is not reported.
pub(crate) struct Cd;

impl BuiltinCommand for Cd {
    fn names(&self) -> &'static [&'static str] {
        &["cd"]
    }

    fn execute(&self, argv: &Argv, _stdout: &mut dyn Write, ctx: &mut Context<'_>) -> Result<Flow> {
        if let Some(target) = argv.arg(1) {
            if let Err(e) = ctx.env.change_dir(target) {
                debug!("cd: {}: {}", target, e);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Print recently spawned process ids, oldest first.
pub(crate) struct ListPids;

impl BuiltinCommand for ListPids {
    fn names(&self) -> &'static [&'static str] {
        &["listpids"]
    }

    fn execute(&self, _argv: &Argv, stdout: &mut dyn Write, ctx: &mut Context<'_>) -> Result<Flow> {
        for (idx, pid) in ctx.history.list_pids() {
            writeln!(stdout, "{}: {}", idx, pid)?;
        }
        Ok(Flow::Continue)
    }
}

/// Print the remembered command lines, oldest first.
pub(crate) struct History;

impl BuiltinCommand for History {
    fn names(&self) -> &'static [&'static str] {
        &["history"]
    }

    fn execute(&self, _argv: &Argv, stdout: &mut dyn Write, ctx: &mut Context<'_>) -> Result<Flow> {
        for (idx, argv) in ctx.history.list_commands() {
            writeln!(stdout, "{}: {}", idx, argv)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::tests::FakeEnvironment;

    fn run(cmd: &dyn BuiltinCommand, argv: &[&str], history: &HistoryStore, env: &mut FakeEnvironment) -> (Flow, String) {
        let mut out = Vec::new();
        let mut ctx = Context { history, env };
        let flow = cmd
            .execute(&Argv::from(argv.to_vec()), &mut out, &mut ctx)
            .unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_ignores_arguments() {
        let history = HistoryStore::default();
        let mut env = FakeEnvironment::default();
        let (flow, out) = run(&Exit, &["exit", "now", "-f"], &history, &mut env);
        assert_eq!(flow, Flow::Exit);
        assert!(out.is_empty());
        assert_eq!(Exit.names(), &["exit", "quit"]);
    }

    #[test]
    fn cd_changes_to_first_operand() {
        let history = HistoryStore::default();
        let mut env = FakeEnvironment::default();
        let (flow, _) = run(&Cd, &["cd", "/tmp", "ignored"], &history, &mut env);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(env.dirs, vec!["/tmp"]);
    }

    #[test]
    fn cd_without_operand_does_nothing() {
        let history = HistoryStore::default();
        let mut env = FakeEnvironment::default();
        run(&Cd, &["cd"], &history, &mut env);
        assert!(env.dirs.is_empty());
    }

    #[test]
    fn cd_failure_is_silent() {
        let history = HistoryStore::default();
        let mut env = FakeEnvironment::default();
        env.missing_dirs.push("/nope".to_string());
        let (flow, out) = run(&Cd, &["cd", "/nope"], &history, &mut env);
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn listpids_format() {
        let mut history = HistoryStore::default();
        history.record_pid(4242);
        history.record_pid(4243);
        let mut env = FakeEnvironment::default();
        let (_, out) = run(&ListPids, &["listpids"], &history, &mut env);
        assert_eq!(out, "0: 4242\n1: 4243\n");
    }

    #[test]
    fn history_format() {
        let mut history = HistoryStore::default();
        history.record_command(Argv::from(vec!["ls", "-l"]));
        history.record_command(Argv::from(vec!["history"]));
        let mut env = FakeEnvironment::default();
        let (_, out) = run(&History, &["history"], &history, &mut env);
        assert_eq!(out, "0: ls -l \n1: history \n");
    }

    #[test]
    fn listings_are_empty_without_entries() {
        let history = HistoryStore::default();
        let mut env = FakeEnvironment::default();
        assert_eq!(run(&ListPids, &["listpids"], &history, &mut env).1, "");
        assert_eq!(run(&History, &["history"], &history, &mut env).1, "");
    }
}
