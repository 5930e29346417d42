use std::borrow::Cow;
use std::collections::BTreeSet;

use inksac::prelude::*;

use crate::shell::parser::{BACKGROUND_MARKER, DELIMITERS, REDIRECT_OPERATOR};

/// Colours an input line word by word, leaving the delimiters untouched so
/// the cursor position stays where the editor expects it.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    builtins: BTreeSet<&'static str>,
}

impl SyntaxHighlighter {
    pub fn new(builtins: impl IntoIterator<Item = &'static str>) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support, builtins)
    }

    pub fn with_support(
        color_support: ColorSupport,
        builtins: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            color_support,
            builtins: builtins.into_iter().collect(),
        }
    }

    pub fn highlight_command<'l>(&self, input: &'l str) -> Cow<'l, str> {
        if matches!(self.color_support, ColorSupport::NoColor) || input.trim().is_empty() {
            return Cow::Borrowed(input);
        }

        let mut output = String::with_capacity(input.len() * 2);
        let mut rest = input;
        let mut is_command = true;

        while !rest.is_empty() {
            let word_start = rest.len() - rest.trim_start_matches(DELIMITERS).len();
            output.push_str(&rest[..word_start]);
            rest = &rest[word_start..];

            let word_end = rest.find(DELIMITERS).unwrap_or(rest.len());
            let word = &rest[..word_end];
            if !word.is_empty() {
                output.push_str(&self.highlight_word(word, is_command));
                is_command = false;
            }
            rest = &rest[word_end..];
        }

        Cow::Owned(output)
    }

    fn highlight_word(&self, word: &str, is_command: bool) -> String {
        let style = if word == BACKGROUND_MARKER || word == REDIRECT_OPERATOR {
            Style::builder().foreground(Color::Magenta).bold().build()
        } else if word.starts_with('$') {
            Style::builder().foreground(Color::Green).build()
        } else if is_command && self.builtins.contains(word) {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else if is_command {
            Style::builder().foreground(Color::Cyan).build()
        } else if word.starts_with('-') {
            Style::builder().foreground(Color::Yellow).build()
        } else {
            return word.to_string();
        };

        word.style(style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_is_passthrough() {
        let highlighter = SyntaxHighlighter::with_support(ColorSupport::NoColor, ["echo"]);
        let line = "  echo\thello  > out &";
        assert!(matches!(highlighter.highlight_command(line), Cow::Borrowed(s) if s == line));
    }

    fn strip_ansi(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                plain.push(c);
            }
        }
        plain
    }

    fn styled(word: &str, style: Style) -> String {
        word.style(style).to_string()
    }

    #[test]
    fn test_colors_each_word_kind() {
        let highlighter = SyntaxHighlighter::with_support(ColorSupport::TrueColor, ["echo"]);
        let operator = Style::builder().foreground(Color::Magenta).bold().build();

        let line = "echo\t$HOME -n  > out &";
        let expected = format!(
            "{}\t{} {}  {} out {}",
            styled("echo", Style::builder().foreground(Color::Cyan).bold().build()),
            styled("$HOME", Style::builder().foreground(Color::Green).build()),
            styled("-n", Style::builder().foreground(Color::Yellow).build()),
            styled(">", operator),
            styled("&", operator),
        );
        let highlighted = highlighter.highlight_command(line);
        assert_eq!(highlighted, expected);
        assert_eq!(strip_ansi(&highlighted), line);
    }

    #[test]
    fn test_external_command_is_not_bold() {
        let highlighter = SyntaxHighlighter::with_support(ColorSupport::TrueColor, ["echo"]);
        assert_eq!(
            highlighter.highlight_command(" ls echo"),
            format!(
                " {} echo",
                styled("ls", Style::builder().foreground(Color::Cyan).build())
            )
        );
    }

    #[test]
    fn test_blank_line_is_passthrough() {
        let highlighter = SyntaxHighlighter::new(["echo"]);
        assert_eq!(highlighter.highlight_command("   "), "   ");
    }
}
