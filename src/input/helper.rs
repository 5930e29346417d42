use std::{borrow::Cow, collections::BTreeSet, env, fs, os::unix::fs::PermissionsExt};

use rustyline::{
    completion::{Completer, FilenameCompleter, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::{
    core::commands::Builtins, highlight::SyntaxHighlighter, shell::parser::DELIMITERS,
};

/// Completion and highlighting for the interactive prompt.
pub struct ShellHelper {
    commands: BTreeSet<String>,
    files: FilenameCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new(builtins: &Builtins) -> Self {
        let mut commands: BTreeSet<String> = builtins.names().map(str::to_string).collect();
        commands.extend(path_executables());

        ShellHelper {
            commands,
            files: FilenameCompleter::new(),
            highlighter: SyntaxHighlighter::new(builtins.names()),
        }
    }

    fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .range(prefix.to_string()..)
            .take_while(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

/// Names of executable files in every `PATH` directory.
fn path_executables() -> Vec<String> {
    let Some(path_var) = env::var_os("PATH") else {
        return Vec::new();
    };

    env::split_paths(&path_var)
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flat_map(|entries| entries.filter_map(Result::ok))
        // fs::metadata follows symlinks, which many PATH entries are.
        .filter(|entry| {
            fs::metadata(entry.path())
                .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor.rfind(DELIMITERS).map_or(0, |i| i + 1);

        // First word completes against commands, later words against files.
        if before_cursor[..word_start].trim().is_empty() {
            Ok((word_start, self.complete_command(&before_cursor[word_start..])))
        } else {
            self.files.complete(line, pos, ctx)
        }
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight_command(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}
