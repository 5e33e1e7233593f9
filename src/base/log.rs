//! Module containing structures and implementations for logging messages to the user.

use colored::Colorize;
use std::fmt::Display;

use super::source_file::Span;

/// Represent the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T> Message<T> {
    /// Create a new log message with the given severity and message to be displayed.
    pub fn new(severity: Severity, display: T) -> Self {
        Self { severity, display }
    }
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = (match self.severity {
            Severity::Error => "[error]:".red(),
            Severity::Info => "[info]:".green(),
            Severity::Warning => "[warning]:".yellow(),
        })
        .bold();

        let message_part = &self.display.to_string().bold();

        write!(f, "{log_header} {message_part}")
    }
}

/// Structure implementing [`Display`] that points at a span of the source code.
///
/// Prints the location as `file:line:column`, the source line containing the start of the
/// span and a marker underneath the spanned characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    /// Create a new source code display with the given span and help message to be displayed.
    pub fn new(span: &'a Span, help_display: Option<T>) -> Self {
        Self { span, help_display }
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let location = self.span.start_location();

        writeln!(
            f,
            " {} {}:{}:{}",
            "-->".cyan().bold(),
            source_file.display_path(),
            location.line,
            location.column
        )?;

        let line = source_file
            .get_line(location.line)
            .unwrap_or_default()
            .trim_end_matches(['\n', '\r']);
        let gutter = location.line.to_string();
        let padding = " ".repeat(gutter.len());

        writeln!(f, "{padding} {}", "|".cyan().bold())?;
        writeln!(f, "{} {} {line}", gutter.cyan().bold(), "|".cyan().bold())?;

        let marker_width = self
            .span
            .str()
            .lines()
            .next()
            .map_or(1, |first| first.chars().count().max(1));
        write!(
            f,
            "{padding} {} {}{}",
            "|".cyan().bold(),
            " ".repeat(location.column.saturating_sub(1)),
            "^".repeat(marker_width).red().bold()
        )?;

        if let Some(help_display) = &self.help_display {
            write!(f, "\n\n{help_display}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::source_file::SourceFile;

    #[test]
    fn test_source_code_display() {
        colored::control::set_override(false);

        let file = SourceFile::new("test.sic", "int x;\nx += @;\n");
        let span = Span::new(file, 12, 13).unwrap();

        let rendered = SourceCodeDisplay::new(&span, Some("remove the `@`")).to_string();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert!(lines[0].ends_with("test.sic:2:6"));
        assert_eq!(lines[2], "2 | x += @;");
        assert_eq!(lines[3], "  |      ^");
        assert_eq!(lines[5], "remove the `@`");
    }
}
