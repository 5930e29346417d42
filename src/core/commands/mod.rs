use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;

mod cd;
mod echo;
mod env;
mod exit;
mod pwd;
mod setenv;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use env::EnvCommand;
pub use exit::ExitCommand;
pub use pwd::PwdCommand;
pub use setenv::SetenvCommand;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{command}: {message}")]
    Usage {
        command: &'static str,
        message: String,
    },

    #[error("{command}: {source}")]
    Io {
        command: &'static str,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub fn usage(command: &'static str, message: impl Into<String>) -> Self {
        CommandError::Usage {
            command,
            message: message.into(),
        }
    }

    pub fn io(command: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| CommandError::Io { command, source }
    }
}

/// What the read loop does after a built-in returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait Command {
    /// `args` excludes the command name.
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
pub enum CommandType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Echo(EchoCommand),
    Env(EnvCommand),
    Setenv(SetenvCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, out),
            CommandType::Pwd(cmd) => cmd.execute(args, out),
            CommandType::Echo(cmd) => cmd.execute(args, out),
            CommandType::Env(cmd) => cmd.execute(args, out),
            CommandType::Setenv(cmd) => cmd.execute(args, out),
            CommandType::Exit(cmd) => cmd.execute(args, out),
        }
    }
}

/// Fixed table of in-process commands, matched case-sensitively on the
/// command name.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand));
        commands.insert("echo", CommandType::Echo(EchoCommand));
        commands.insert("env", CommandType::Env(EnvCommand::new()));
        commands.insert("setenv", CommandType::Setenv(SetenvCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand));
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandType> {
        self.commands.get(name)
    }

    #[cfg(test)]
    pub(crate) fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs `name` if it is a built-in. `None` means the caller has to spawn it.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Option<Result<Flow, CommandError>> {
        let command = self.get(name)?;
        tracing::debug!(builtin = name, argc = args.len(), "dispatching built-in");
        Some(command.execute(args, out))
    }
}
