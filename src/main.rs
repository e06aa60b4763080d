use argh::FromArgs;
use msh::env::SystemEnvironment;
use msh::io_adapters::Editor;
use msh::{Interpreter, ShellConfig};

#[derive(FromArgs)]
/// A minimal interactive shell with command history and `!n` recall.
struct Args {
    #[argh(option, default = "String::from(\"msh> \")")]
    /// text shown before each input line.
    prompt: String,

    #[argh(option, default = "msh::config::COMMAND_HISTORY_SIZE")]
    /// number of command lines remembered for `history` and `!n`.
    history_size: usize,

    #[argh(option, default = "msh::config::PID_HISTORY_SIZE")]
    /// number of process ids remembered for `listpids`.
    pid_history_size: usize,

    #[argh(option)]
    /// directory prefix to search for commands, in order; may be repeated.
    /// Replaces the default ./, /usr/local/bin/, /usr/bin/, /bin/.
    search_prefix: Vec<String>,

    #[argh(switch, short = 'v')]
    /// log dispatch decisions to stderr.
    verbose: bool,
}

impl Args {
    fn into_config(self) -> ShellConfig {
        let defaults = ShellConfig::default();
        ShellConfig {
            prompt: self.prompt,
            history_size: self.history_size,
            pid_history_size: self.pid_history_size,
            search_prefixes: if self.search_prefix.is_empty() {
                defaults.search_prefixes
            } else {
                self.search_prefix
            },
            limits: defaults.limits,
        }
    }
}

fn main() {
    let args: Args = argh::from_env();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut editor = match Editor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("msh: cannot initialise line editor: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut sh = Interpreter::new(
        args.into_config(),
        Box::new(SystemEnvironment),
        Box::new(std::io::stdout()),
    );
    if let Err(e) = sh.repl(&mut editor) {
        log::error!("{:#}", e);
    }
}
