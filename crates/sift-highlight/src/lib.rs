//! Terminal styling for sift.
//!
//! Plain ANSI helpers for headings and status text, plus a syntax highlighter used to print
//! configuration files.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra},
};

/// ANSI escape codes.
mod codes {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Faint.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape sequences followed by a reset.
fn paint(prefix: &[&str], text: &str) -> String {
    let mut out = prefix.concat();
    out.push_str(text);
    out.push_str(codes::RESET);
    out
}

/// Bold cyan, for section headings.
pub fn header(text: &str) -> String {
    paint(&[codes::BOLD, codes::CYAN], text)
}

/// Bold, for labels within a section.
pub fn subheader(text: &str) -> String {
    paint(&[codes::BOLD], text)
}

/// Faint, for secondary information.
pub fn dim(text: &str) -> String {
    paint(&[codes::DIM], text)
}

/// Yellow, for warnings.
pub fn warning(text: &str) -> String {
    paint(&[codes::YELLOW], text)
}

/// A faint horizontal rule of the given width.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Indents every line of `content` by three spaces.
pub fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Highlights TOML for terminal output.
pub struct TomlHighlighter {
    /// Syntax definitions, including TOML from the two-face extras.
    syntaxes: SyntaxSet,
    /// Embedded color themes.
    themes: EmbeddedLazyThemeSet,
}

impl Default for TomlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlHighlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntaxes: extra_newlines(),
            themes: extra(),
        }
    }

    /// Returns `content` with 24-bit color escapes, ending in a reset.
    ///
    /// Lines that fail to highlight are emitted unstyled.
    pub fn highlight(&self, content: &str) -> String {
        let syntax = self
            .syntaxes
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, self.themes.get(EmbeddedThemeName::Dracula));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntaxes)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(codes::RESET);
        output
    }
}
