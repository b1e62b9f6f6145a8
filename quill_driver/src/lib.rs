//! Runs the quill front end on a source file: loads it, lexes it, parses it, and prints the
//! token list and the syntax tree.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

use std::{fmt::Display, io::Write, path::PathBuf, process::ExitCode};

pub use clap::Parser;
use quill_base::{
    diagnostic::Handler,
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{self, Location, SourceFile},
};
use quill_lexical::token_stream::TokenStream;
use quill_syntax::{error::Error as SyntaxError, syntax_tree::Node};
use thiserror::Error;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "quill",
    about = "Lexer and parser for a subset of a C-family language.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The source file to process.
    pub file: PathBuf,

    /// Prints the token list and stops before parsing.
    #[clap(long = "tokens-only", conflicts_with = "no_tokens")]
    pub tokens_only: bool,

    /// Does not print the token list; only the syntax tree is printed.
    #[clap(long = "no-tokens")]
    pub no_tokens: bool,

    /// Prints progress messages to the standard error stream.
    #[clap(short, long)]
    pub verbose: bool,
}

/// Is an enumeration of every error that ends a run.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    SourceFile {
        path: PathBuf,
        #[source]
        source: source_file::Error,
    },

    #[error(transparent)]
    Lexical(#[from] quill_lexical::error::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("failed to write the output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Gets the location in the source file the error points at and the number of characters to
    /// highlight there, if the error comes from the source text.
    #[must_use]
    pub fn location(&self) -> Option<(Location, usize)> {
        match self {
            Self::Lexical(error) => Some((error.location(), 1)),
            Self::Syntax(error) => Some((error.token().location(), error.token().length())),
            Self::SourceFile { .. } | Self::Output(..) => None,
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            Self::Syntax(SyntaxError::UnbalancedParenthesis(..)) => {
                Some("every `(` of a logical expression needs a matching `)`")
            }
            Self::Syntax(SyntaxError::DuplicateMember(..)) => Some("remove this declaration"),
            _ => None,
        }
    }
}

/// A [`Handler`] printing the received messages to the standard error stream. Informational
/// messages are only printed in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Printer {
    verbose: bool,
}

impl<T: Display> Handler<Message<T>> for Printer {
    fn receive(&self, message: Message<T>) {
        if self.verbose || message.severity != Severity::Info {
            eprintln!("{message}");
        }
    }
}

/// Lexes and parses the source text, writing the token list and the syntax tree dump to
/// `output` as the argument asks. Progress is reported to the `handler` as informational
/// messages.
///
/// Returns the syntax tree, or `None` if only the tokens were asked for.
///
/// # Errors
/// - [`Error::Lexical`]: the source text cannot be tokenized.
/// - [`Error::Syntax`]: the tokens do not form a program.
/// - [`Error::Output`]: writing to `output` failed.
pub fn process(
    source: &str,
    argument: &Argument,
    output: &mut impl Write,
    handler: &impl Handler<Message<String>>,
) -> Result<Option<Node>, Error> {
    let token_stream = TokenStream::tokenize(source)?;

    handler.receive(Message::new(
        Severity::Info,
        format!("lexed {} tokens", token_stream.len()),
    ));

    if !argument.no_tokens {
        token_stream.print_tokens(output)?;
    }

    if argument.tokens_only {
        return Ok(None);
    }

    let program = quill_syntax::parser::Parser::new(&token_stream).parse_program()?;

    handler.receive(Message::new(
        Severity::Info,
        format!("parsed {} top-level nodes", program.children().len()),
    ));

    program.print(output)?;

    Ok(Some(program))
}

/// Reports an error that ended the run.
///
/// An error located in the source text prints `error on <line> <column>` to `output`, then its
/// message and the highlighted source line to `diagnostics`. Any other error only prints its
/// message to `diagnostics`.
///
/// # Errors
/// Writing to either stream failed.
pub fn report(
    error: &Error,
    source_file: Option<&SourceFile>,
    output: &mut impl Write,
    diagnostics: &mut impl Write,
) -> std::io::Result<()> {
    let Some((location, length)) = error.location() else {
        return writeln!(diagnostics, "{}", Message::new(Severity::Error, error));
    };

    writeln!(output, "error on {} {}", location.line, location.column)?;

    // lexical and syntax errors already render as a message
    writeln!(diagnostics, "{error}")?;

    if let Some(source_file) = source_file {
        write!(
            diagnostics,
            "{}",
            SourceCodeDisplay::new(source_file, location, length, error.help())
        )?;
    }

    Ok(())
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: &Argument) -> ExitCode {
    let printer = Printer {
        verbose: argument.verbose,
    };
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    let source_file = match SourceFile::open(argument.file.clone()) {
        Ok(source_file) => source_file,
        Err(source) => {
            let error = Error::SourceFile {
                path: argument.file.clone(),
                source,
            };

            let _ = report(&error, None, &mut stdout.lock(), &mut stderr.lock());
            return ExitCode::FAILURE;
        }
    };

    printer.receive(Message::new(
        Severity::Info,
        format!(
            "loaded {} lines from {}",
            source_file.line_count(),
            source_file.full_path().display()
        ),
    ));

    let result = process(source_file.content(), argument, &mut stdout.lock(), &printer);

    match result {
        Ok(..) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = report(
                &error,
                Some(&*source_file),
                &mut stdout.lock(),
                &mut stderr.lock(),
            );

            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests;
