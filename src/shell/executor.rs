use std::io::{self, Write};

use super::environment::expand_env_vars;
use super::parser::{tokenize, truncate_line, CommandDescriptor, MAX_ARGS, MAX_LINE_LEN};
use crate::core::commands::Flow;
use crate::process::ProcessOutcome;

pub(crate) trait CommandHandler {
    /// Runs one input line to completion. Errors are reported here and never
    /// end the session; only `exit` returns [`Flow::Exit`].
    fn execute_line(&mut self, line: &str) -> Flow;
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, line: &str) -> Flow {
        let kept = truncate_line(line, MAX_LINE_LEN);
        if kept.len() < line.len() {
            tracing::warn!(limit = MAX_LINE_LEN, "input line truncated");
        }

        let mut args = tokenize(kept, MAX_ARGS);
        if args.is_empty() {
            return Flow::Continue;
        }

        expand_env_vars(&self.vars, &mut args);
        let descriptor = CommandDescriptor::classify(args);
        if descriptor.missing_redirect_target {
            eprintln!("No output file specified after '>'");
        }

        let Some(name) = descriptor.name() else {
            return Flow::Continue;
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Some(result) = self.builtins.execute(name, &descriptor.args[1..], &mut out) {
            if let Err(e) = out.flush() {
                tracing::warn!("failed to flush stdout: {}", e);
            }
            return match result {
                Ok(flow) => flow,
                Err(e) => {
                    eprintln!("{}", e);
                    Flow::Continue
                }
            };
        }
        drop(out);

        match self.processes.spawn_process(&descriptor) {
            Ok(ProcessOutcome::Background { pid }) => {
                println!("Started background process with PID: {}", pid);
            }
            Ok(ProcessOutcome::TimedOut { pid }) => {
                eprintln!("Process {} timed out and was killed.", pid);
            }
            Ok(ProcessOutcome::Exited { .. }) => {}
            Err(e) => eprintln!("{}", e),
        }

        if self.signals.take_interrupt() {
            println!();
        }
        Flow::Continue
    }
}
