//! Contains the [`Parser`] logic.

use quill_lexical::{
    token::{Token, TokenKind},
    token_stream::TokenStream,
};

use crate::error::{Error, SyntaxKind, UnexpectedSyntax};

/// The outcome of a grammar production.
///
/// - `Ok(Some(_))`: the production was recognized and the cursor is right after it.
/// - `Ok(None)`: the production does not start at the cursor; the cursor is left untouched.
/// - `Err(_)`: the production started but the input is malformed; the whole parse is aborted.
pub type ParseResult<T> = Result<Option<T>, Error>;

/// A grammar production that can be attempted with [`Parser::parse_alternatives`].
pub type Production<'a, T> = fn(&mut Parser<'a>) -> ParseResult<T>;

/// Reads a token stream with a single cursor.
///
/// Newline tokens are insignificant: [`Parser::peek`] and [`Parser::next_token`] skip them. Only
/// line comments, which end at a newline, read the raw tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    current_index: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser at the start of the given token stream.
    #[must_use]
    pub fn new(token_stream: &'a TokenStream) -> Self {
        Self {
            tokens: token_stream,
            current_index: 0,
        }
    }

    /// Gets the index of the token under the cursor.
    #[must_use]
    pub fn current_index(&self) -> usize { self.current_index }

    /// Moves the cursor back to an index obtained from [`Self::current_index`].
    pub(crate) fn rewind(&mut self, index: usize) { self.current_index = index; }

    // the stream always ends with the end of tokens marker; indices past it read the marker
    fn get(&self, index: usize) -> &'a Token {
        let tokens = self.tokens;
        &tokens[index.min(tokens.len() - 1)]
    }

    fn significant_index(&self, mut index: usize) -> usize {
        while !self.get(index).kind().is_significant() {
            index += 1;
        }

        index
    }

    /// Returns the token under the cursor, newlines included.
    #[must_use]
    pub fn peek_raw(&self) -> &'a Token { self.get(self.current_index) }

    /// Returns the token under the cursor, newlines included, and moves past it.
    pub fn next_raw(&mut self) -> &'a Token {
        let token = self.peek_raw();
        self.forward();

        token
    }

    /// Moves the cursor by one token unless it is at the end of tokens marker.
    pub fn forward(&mut self) {
        if !self.peek_raw().is_end() {
            self.current_index += 1;
        }
    }

    /// Returns the next significant token without moving the cursor.
    #[must_use]
    pub fn peek(&self) -> &'a Token { self.get(self.significant_index(self.current_index)) }

    /// Returns the kind of the next significant token.
    #[must_use]
    pub fn peek_kind(&self) -> TokenKind { self.peek().kind() }

    /// Returns the significant token `offset` positions after the next one without moving the
    /// cursor. Looking past the end yields the end of tokens marker.
    #[must_use]
    pub fn peek_offset(&self, offset: usize) -> &'a Token {
        let mut index = self.significant_index(self.current_index);

        for _ in 0..offset {
            if self.get(index).is_end() {
                break;
            }

            index = self.significant_index(index + 1);
        }

        self.get(index)
    }

    /// Makes the cursor point to the next significant token and returns it.
    pub fn stop_at_significant(&mut self) -> &'a Token {
        self.current_index = self.significant_index(self.current_index);
        self.peek_raw()
    }

    /// Returns the next significant token and moves past it.
    pub fn next_token(&mut self) -> &'a Token {
        let token = self.stop_at_significant();
        self.forward();

        token
    }

    /// Returns `true` if only the end of tokens marker is left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.peek().is_end() }

    /// Consumes the next significant token if it is of the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        (self.peek_kind() == kind).then(|| self.next_token())
    }

    /// Creates the error of expecting the given syntax at the next significant token.
    #[must_use]
    pub fn unexpected(&self, expected: SyntaxKind) -> Error {
        UnexpectedSyntax {
            expected,
            found: self.peek().clone(),
        }
        .into()
    }

    /// Expects the next significant token to be of the given kind, and consumes it.
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the next significant token is of another kind; the cursor is
    /// not moved.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, Error> {
        self.eat(kind)
            .ok_or_else(|| self.unexpected(SyntaxKind::Token(kind)))
    }

    /// Expects the next significant token to be an identifier, and consumes it.
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the next significant token is not an identifier.
    pub fn parse_identifier(&mut self) -> Result<Token, Error> {
        self.expect(TokenKind::Identifier).cloned()
    }

    /// Runs the given production, and if it does not match, resets the cursor to where it was
    /// before the call.
    ///
    /// # Errors
    /// Any error raised by the production.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let current_index = self.current_index;

        let result = f(self);

        if matches!(result, Ok(None)) {
            self.current_index = current_index;
        }

        result
    }

    /// Tries the given productions in order from the same position. The first one that matches
    /// and is followed by one of the `terminators` wins; the terminator is not consumed.
    ///
    /// If no production matches at all, the cursor is left untouched and `Ok(None)` is returned.
    ///
    /// # Errors
    /// - [`Error::UnexpectedSyntax`]: some productions matched but none of them is followed by a
    ///   terminator; the error points at the token where the longest match stopped.
    /// - The error raised by the first failing production when none of them matched.
    pub fn parse_alternatives<T>(
        &mut self,
        alternatives: &[Production<'a, T>],
        terminators: &[TokenKind],
    ) -> ParseResult<T> {
        let start = self.current_index;
        let mut furthest = None;
        let mut first_error = None;

        for alternative in alternatives {
            self.current_index = start;

            match alternative(self) {
                Ok(Some(tree)) if terminators.contains(&self.peek_kind()) => return Ok(Some(tree)),
                Ok(Some(_)) => {
                    furthest = Some(furthest.map_or(self.current_index, |index: usize| {
                        index.max(self.current_index)
                    }));
                }
                Ok(None) => {}
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }

        self.current_index = start;

        if let Some(furthest) = furthest {
            self.current_index = furthest;

            let expected = terminators
                .first()
                .map_or(SyntaxKind::Expression, |kind| SyntaxKind::Token(*kind));

            return Err(self.unexpected(expected));
        }

        first_error.map_or(Ok(None), Err)
    }
}
