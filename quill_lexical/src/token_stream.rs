//! Contains the [`TokenStream`] struct, the output of the lexical analysis phase.

use std::{fmt::Display, io::Write};

use derive_more::Deref;

use crate::{error::Error, lexer::Lexer, token::Token};

/// Is the list of tokens of a whole source text.
///
/// The last token is always the single [`crate::token::TokenKind::EndOfTokens`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.last().map_or(false, Token::is_end));
        debug_assert_eq!(tokens.iter().filter(|token| token.is_end()).count(), 1);

        Self { tokens }
    }

    /// Tokenizes the given source text.
    ///
    /// # Errors
    /// See [`Lexer::produce_tokens`].
    pub fn tokenize(content: &str) -> Result<Self, Error> { Lexer::new(content).produce_tokens() }

    /// Gets the end of tokens marker that closes the stream.
    #[must_use]
    pub fn end_of_tokens(&self) -> &Token { &self.tokens[self.tokens.len() - 1] }

    /// Writes every token on its own line as `<KindName> <text> <line> <column>`.
    ///
    /// # Errors
    /// Writing to `output` failed.
    pub fn print_tokens(&self, output: &mut impl Write) -> std::io::Result<()> {
        write!(output, "{self}")
    }

    /// Dissolves the stream into its list of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{token}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests;
