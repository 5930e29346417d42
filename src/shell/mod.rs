use std::env;
use std::sync::Arc;

pub mod environment;
mod executor;
pub mod parser;

use crate::{
    core::{
        commands::{Builtins, Flow},
        config::Config,
        env::EnvVars,
    },
    error::ShellError,
    input::{Input, LineReader},
    process::{ForegroundHandle, ProcessExecutor, SignalRouter},
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) reader: LineReader,
    pub(crate) builtins: Builtins,
    pub(crate) processes: ProcessExecutor,
    pub(crate) signals: SignalRouter,
    pub(crate) vars: EnvVars,
    pub(crate) config: Config,
}

impl Shell {
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let foreground = Arc::new(ForegroundHandle::new());
        let signals = SignalRouter::install(Arc::clone(&foreground))?;

        let builtins = Builtins::new();
        let reader = LineReader::new(&builtins, config.history_path.clone(), config.quiet)?;
        let processes = ProcessExecutor::new(foreground, config.timeout_secs);

        Ok(Shell {
            reader,
            builtins,
            processes,
            signals,
            vars: EnvVars::new(),
            config,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if self.source_rc() == Flow::Exit {
            self.reader.save_history();
            return Ok(());
        }

        loop {
            let prompt = self.prompt();
            let input = self.reader.read_line(&prompt)?;

            // An interrupt that arrived while idle gets its newline before
            // the next line runs.
            let interrupted = self.signals.take_interrupt();
            if interrupted {
                println!();
            }

            match input {
                Input::Line(line) => {
                    if self.execute_line(&line) == Flow::Exit {
                        break;
                    }
                }
                Input::Interrupted => {
                    if !interrupted {
                        println!();
                    }
                }
                Input::Eof => {
                    println!();
                    break;
                }
            }
        }

        self.reader.save_history();
        Ok(())
    }

    fn prompt(&self) -> String {
        match env::current_dir() {
            Ok(dir) => format!("{}> ", dir.display()),
            Err(e) => {
                eprintln!("getcwd error: {}", e);
                "> ".to_string()
            }
        }
    }

    /// Runs the startup file through the normal dispatch path.
    fn source_rc(&mut self) -> Flow {
        let Some(loader) = self.config.rc_loader() else {
            return Flow::Continue;
        };

        let lines = match loader.load() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(path = %loader.path().display(), "skipping startup file: {}", e);
                if !self.config.quiet {
                    eprintln!("Warning: {}", e);
                }
                return Flow::Continue;
            }
        };

        tracing::debug!(path = %loader.path().display(), count = lines.len(), "sourcing startup file");
        for line in &lines {
            if self.execute_line(line) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }
}
