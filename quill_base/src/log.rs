//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::Decoration;

use crate::source_file::{Location, SourceFile};

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Decoration::Bold.with(match self.severity {
            Severity::Error => Decoration::Red.with("[error]:"),
            Severity::Info => Decoration::Green.with("[info]:"),
            Severity::Warning => Decoration::Yellow.with("[warning]:"),
        });

        write!(f, "{log_header} {}", Decoration::Bold.with(&self.display))
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 1;

    while number >= 10 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the source line holding a token with the
/// token underlined.
#[derive(Debug, Clone, Copy, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source file to take the line from.
    pub source_file: &'a SourceFile,

    /// The location of the first character to highlight.
    pub location: Location,

    /// The number of characters to highlight; at least one is always highlighted.
    pub length: usize,

    /// The help message to be displayed under the highlighted characters.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        line_number: Option<usize>,
        width: usize,
    ) -> std::fmt::Result {
        match line_number {
            Some(number) => write!(
                f,
                "{}{:pad$} {} ",
                Decoration::Bold.with(Decoration::Cyan.with(number)),
                "",
                Decoration::Bold.with(Decoration::Cyan.with("┃")),
                pad = width - get_digit(number),
            ),
            None => write!(
                f,
                "{:width$} {} ",
                "",
                Decoration::Bold.with(Decoration::Cyan.with("┃")),
            ),
        }
    }

    fn write_line(f: &mut std::fmt::Formatter<'_>, line: &str) -> std::fmt::Result {
        for char in line.chars() {
            if char == '\t' {
                write!(f, "    ")?;
            } else {
                write!(f, "{char}")?;
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line_number = self.location.line;
        let width = get_digit(line_number);

        writeln!(
            f,
            "{:width$}{} {}:{}",
            "",
            Decoration::Bold.with(Decoration::Cyan.with("-->")),
            self.source_file.full_path().display(),
            self.location,
        )?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)?;

        if let Some(previous) = self.source_file.get_line(line_number.saturating_sub(1)) {
            Self::write_gutter(f, Some(line_number - 1), width)?;
            Self::write_line(f, previous)?;
        }

        let Some(line) = self.source_file.get_line(line_number) else {
            // the location points past the last line, e.g. the end of tokens
            return Ok(());
        };

        Self::write_gutter(f, Some(line_number), width)?;

        let first = self.location.column;
        let last = first + self.length.max(1);

        for (index, char) in line.chars().enumerate() {
            let column = index + 1;
            let text = if char == '\t' { "    ".to_string() } else { char.to_string() };

            if column >= first && column < last {
                write!(
                    f,
                    "{}",
                    Decoration::Underline.with(Decoration::Bold.with(Decoration::Red.with(text)))
                )?;
            } else {
                write!(f, "{text}")?;
            }
        }

        // a location right after the last character gets a visible marker
        if first > line.chars().count() {
            write!(f, "{}", Decoration::Bold.with(Decoration::Red.with("_")))?;
        }

        writeln!(f)?;

        if let Some(help) = &self.help_display {
            Self::write_gutter(f, None, width)?;

            for char in line.chars().take(first.saturating_sub(1)) {
                write!(f, "{}", if char == '\t' { "    " } else { " " })?;
            }

            writeln!(f, "{}: {help}", Decoration::Bold.with("help"))?;
        }

        Self::write_gutter(f, None, width)?;
        writeln!(f)
    }
}
