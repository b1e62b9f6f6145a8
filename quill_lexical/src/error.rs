//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use quill_base::{
    log::{Message, Severity},
    source_file::Location,
};

/// No token can be recognized at a position of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnrecognizedInput {
    /// The first character that could not be tokenized.
    pub character: char,

    /// The location of the character.
    pub location: Location,
}

impl Display for UnrecognizedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Message::new(
                Severity::Error,
                format!(
                    "unrecognized input {:?} on line {} column {}",
                    self.character, self.location.line, self.location.column
                )
            )
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnrecognizedInput(UnrecognizedInput),
}

impl Error {
    /// Gets the location the error points at.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::UnrecognizedInput(error) => error.location,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedInput(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
