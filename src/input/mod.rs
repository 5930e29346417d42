mod helper;

pub use helper::ShellHelper;

use std::path::PathBuf;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use crate::{core::commands::Builtins, error::ShellError};

/// One result of asking the user for a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D or end of piped input.
    Eof,
}

pub struct LineReader {
    editor: Editor<ShellHelper, FileHistory>,
    history_path: Option<PathBuf>,
    quiet: bool,
}

impl LineReader {
    pub fn new(
        builtins: &Builtins,
        history_path: Option<PathBuf>,
        quiet: bool,
    ) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(ShellHelper::new(builtins)));
        editor.set_auto_add_history(true);

        let reader = LineReader {
            editor,
            history_path,
            quiet,
        };
        Ok(reader.with_history())
    }

    fn with_history(mut self) -> Self {
        if let Some(path) = self.history_path.as_ref().filter(|path| path.exists()) {
            if let Err(e) = self.editor.load_history(path) {
                self.warn(format!("Couldn't load history from {}: {}", path.display(), e));
            }
        }
        self
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<Input, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_history(&mut self) {
        let Some(path) = self.history_path.clone() else {
            return;
        };
        if let Err(e) = self.editor.save_history(&path) {
            self.warn(format!("Couldn't save history to {}: {}", path.display(), e));
        }
    }

    fn warn(&self, message: String) {
        tracing::warn!("{}", message);
        if !self.quiet {
            eprintln!("Warning: {}", message);
        }
    }
}
