//! Turns a raw input line into a [`CommandDescriptor`].

use std::path::PathBuf;

/// Characters that separate words. Quotes and backslashes get no special
/// treatment.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n'];

/// Words beyond this count are dropped.
pub const MAX_ARGS: usize = 128;

/// Longest line, in bytes, that is tokenized; the rest is discarded.
pub const MAX_LINE_LEN: usize = 1024;

pub const BACKGROUND_MARKER: &str = "&";
pub const REDIRECT_OPERATOR: &str = ">";

/// Splits `line` into at most `max` non-empty words.
pub fn tokenize(line: &str, max: usize) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|word| !word.is_empty())
        .take(max)
        .map(str::to_string)
        .collect()
}

/// Cuts `line` to at most `max` bytes without splitting a character.
pub fn truncate_line(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// One parsed line, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandDescriptor {
    /// `args[0]` is the command name.
    pub args: Vec<String>,
    pub background: bool,
    pub redirect: Option<PathBuf>,
    /// A `>` ended the line with nothing after it. The operator has been
    /// dropped and no redirection applies.
    pub missing_redirect_target: bool,
}

impl CommandDescriptor {
    /// Strips a trailing `&`, then the first `>` and its target.
    ///
    /// With a target, the argument list is cut at the operator, so anything
    /// following the target is discarded too.
    pub fn classify(mut args: Vec<String>) -> Self {
        let background = args.last().is_some_and(|last| last == BACKGROUND_MARKER);
        if background {
            args.pop();
        }

        let mut redirect = None;
        let mut missing_redirect_target = false;
        if let Some(index) = args.iter().position(|arg| arg == REDIRECT_OPERATOR) {
            match args.get(index + 1) {
                Some(target) => {
                    redirect = Some(PathBuf::from(target));
                    args.truncate(index);
                }
                None => {
                    missing_redirect_target = true;
                    args.pop();
                }
            }
        }

        Self {
            args,
            background,
            redirect,
            missing_redirect_target,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}
