//! Contains all kinds of syntax errors that can occur while parsing the token stream.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use quill_base::log::{Message, Severity};
use quill_lexical::token::{Token, TokenKind};

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Token(TokenKind),
    Type,
    Expression,
    LogicalExpression,
    Statement,
    Member,
    Assignment,
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(kind) => match kind.spellings().first() {
                Some(spelling) => write!(f, "`{spelling}`"),
                None => write!(f, "a {kind} token"),
            },
            Self::Type => f.write_str("a type"),
            Self::Expression => f.write_str("an expression"),
            Self::LogicalExpression => f.write_str("a logical expression"),
            Self::Statement => f.write_str("a statement"),
            Self::Member => f.write_str("a class member"),
            Self::Assignment => f.write_str("an assignment"),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Token,
}

/// A logical expression opened more parentheses than it closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnbalancedParenthesis {
    /// The token where the closing parenthesis was expected.
    pub found: Token,
}

/// Is an enumeration of the class members that may appear at most once in a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum UniqueMember {
    Constructor,
    Destructor,
}

/// A class body declares a second constructor or destructor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DuplicateMember {
    /// The kind of member that was declared twice.
    pub member: UniqueMember,

    /// The first token of the second declaration.
    pub found: Token,
}

/// Is an enumeration containing all kinds of syntactic errors that can occur while parsing the
/// token stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnexpectedSyntax(UnexpectedSyntax),
    UnbalancedParenthesis(UnbalancedParenthesis),
    DuplicateMember(DuplicateMember),
}

fn describe(token: &Token) -> String {
    if token.is_end() {
        "the end of the input".to_string()
    } else {
        format!("{} `{}`", token.kind(), token.text().escape_debug())
    }
}

impl Error {
    /// Gets the offending token the error points at.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::UnexpectedSyntax(error) => &error.found,
            Self::UnbalancedParenthesis(error) => &error.found,
            Self::DuplicateMember(error) => &error.found,
        }
    }

    /// Gets the undecorated description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedSyntax(error) => format!(
                "expected {}, but found {}",
                error.expected,
                describe(&error.found)
            ),
            Self::UnbalancedParenthesis(error) => format!(
                "expected `)` to close the logical expression, but found {}",
                describe(&error.found)
            ),
            Self::DuplicateMember(error) => match error.member {
                UniqueMember::Constructor => "a class can only have one constructor".to_string(),
                UniqueMember::Destructor => "a class can only have one destructor".to_string(),
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Message::new(Severity::Error, self.message()))
    }
}

impl std::error::Error for Error {}
