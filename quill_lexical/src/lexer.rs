//! Contains the [`Lexer`], which turns source text into a [`TokenStream`].
//!
//! The lexer is a table of prefix matchers tried in a fixed order. The first matcher that
//! recognizes a prefix of the remaining input produces the next token; the order is chosen so
//! that every ambiguous prefix resolves toward its most specific reading.

use std::collections::HashMap;

use lazy_static::lazy_static;
use quill_base::source_file::Location;
use strum::IntoEnumIterator;

use crate::{
    error::{Error, UnrecognizedInput},
    token::{Token, TokenKind},
    token_stream::TokenStream,
};

/// The state of the token stream a matcher may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Context {
    /// `true` if the previous significant token cannot end an operand, so a `+`/`-` directly
    /// followed by a digit starts a signed literal.
    operand_expected: bool,
}

/// A matcher recognizes a prefix of the input and reports its kind and byte length.
type Matcher = fn(&str, Context) -> Option<(TokenKind, usize)>;

/// The matchers in priority order.
const MATCHERS: [Matcher; 12] = [
    match_new_line,
    match_header,
    match_include_directive,
    match_keyword,
    match_float,
    match_int,
    match_unsigned,
    match_char,
    match_string,
    match_bracket_operator,
    match_operator,
    match_identifier,
];

const CHAR_ESCAPES: [char; 11] = ['a', 'b', 'f', 'n', 'r', 't', 'v', '\'', '\\', '"', '?'];

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = TokenKind::iter()
        .filter(|kind| kind.is_keyword())
        .flat_map(|kind| kind.spellings().iter().map(move |spelling| (*spelling, kind)))
        .collect();

    /// Every operator spelling, longest first.
    static ref OPERATORS: Vec<(&'static str, TokenKind)> = {
        let mut operators: Vec<_> = TokenKind::iter()
            .filter(|kind| !kind.is_keyword() && *kind != TokenKind::IncludeDirective)
            .flat_map(|kind| kind.spellings().iter().map(move |spelling| (*spelling, kind)))
            .collect();

        operators.sort_by(|(left, _), (right, _)| right.len().cmp(&left.len()));
        operators
    };
}

fn is_identifier_start(character: char) -> bool {
    character.is_ascii_alphabetic() || character == '_'
}

fn is_identifier_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

/// Counts the leading bytes of `input` satisfying the predicate.
fn walk(input: &str, predicate: impl Fn(char) -> bool) -> usize {
    input
        .find(|character| !predicate(character))
        .unwrap_or(input.len())
}

fn match_new_line(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    if input.starts_with("\r\n") {
        Some((TokenKind::NewLine, 2))
    } else if input.starts_with(['\n', '\r']) {
        Some((TokenKind::NewLine, 1))
    } else {
        None
    }
}

/// `"name.h"`: a string literal naming a header.
fn match_header(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let body = input.strip_prefix('"')?;
    let length = walk(body, |character| !matches!(character, '"' | '\n' | '\r'));

    if !body[length..].starts_with('"') {
        return None;
    }

    let name = &body[..length];
    (name.len() > 2 && name.ends_with(".h")).then_some((TokenKind::Header, length + 2))
}

fn match_include_directive(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let length = "#include".len();

    (input.starts_with("#include")
        && !input[length..].starts_with(is_identifier_character))
    .then_some((TokenKind::IncludeDirective, length))
}

/// Matches a whole word that is a keyword; `integer` is not `int` followed by `eger`.
fn match_keyword(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    if !input.starts_with(is_identifier_start) {
        return None;
    }

    let length = walk(input, is_identifier_character);
    KEYWORDS
        .get(&input[..length])
        .map(|kind| (*kind, length))
}

/// Gets the byte length of a sign the literal at the start of `input` may carry.
fn sign_length(input: &str, context: Context) -> usize {
    usize::from(context.operand_expected && input.starts_with(['+', '-']))
}

/// `[+-]?[0-9]*.[0-9]+` with an optional exponent.
fn match_float(input: &str, context: Context) -> Option<(TokenKind, usize)> {
    let sign = sign_length(input, context);
    let whole = walk(&input[sign..], |character| character.is_ascii_digit());
    let rest = input[sign + whole..].strip_prefix('.')?;
    let fraction = walk(rest, |character| character.is_ascii_digit());

    if fraction == 0 {
        return None;
    }

    let mut length = sign + whole + 1 + fraction;

    if let Some(exponent) = input[length..].strip_prefix(['e', 'E']) {
        let exponent_sign = usize::from(exponent.starts_with(['+', '-']));
        let digits = walk(&exponent[exponent_sign..], |character| character.is_ascii_digit());

        if digits > 0 {
            length += 1 + exponent_sign + digits;
        }
    }

    Some((TokenKind::FloatConst, length))
}

/// `0`, or a nonzero-leading digit run with an optional sign.
///
/// Refuses a run directly followed by a letter or `_` so that suffixed literals reach
/// [`match_unsigned`].
fn match_int(input: &str, context: Context) -> Option<(TokenKind, usize)> {
    let length = if input.starts_with('0') {
        1
    } else {
        let sign = sign_length(input, context);

        if !input[sign..].starts_with(|character: char| matches!(character, '1'..='9')) {
            return None;
        }

        sign + walk(&input[sign..], |character| character.is_ascii_digit())
    };

    (!input[length..].starts_with(is_identifier_start)).then_some((TokenKind::IntConst, length))
}

/// A digit run with a `u` or `U` suffix.
fn match_unsigned(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let digits = walk(input, |character| character.is_ascii_digit());

    if digits == 0 || (digits > 1 && input.starts_with('0')) {
        return None;
    }

    let length = digits + 1;

    (input[digits..].starts_with(['u', 'U']) && !input[length..].starts_with(is_identifier_character))
        .then_some((TokenKind::UnsignedConst, length))
}

/// A quoted single character or one of the fixed escapes.
fn match_char(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let mut characters = input.strip_prefix('\'')?.chars();

    let body_length = match characters.next()? {
        '\\' => {
            let escaped = characters.next()?;
            CHAR_ESCAPES.contains(&escaped).then_some(1 + escaped.len_utf8())?
        }
        '\'' | '\n' | '\r' => return None,
        character => character.len_utf8(),
    };

    (characters.next()? == '\'').then_some((TokenKind::CharConst, body_length + 2))
}

/// A double-quoted run on one line; a backslash escapes the character after it.
fn match_string(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let body = input.strip_prefix('"')?;
    let mut characters = body.char_indices();

    while let Some((index, character)) = characters.next() {
        match character {
            '"' => return Some((TokenKind::StringConst, index + 2)),
            '\\' => {
                characters.next();
            }
            '\n' | '\r' => return None,
            _ => {}
        }
    }

    None
}

/// `[]` or `[N]` with a decimal index.
fn match_bracket_operator(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    let body = input.strip_prefix('[')?;
    let digits = if body.starts_with('0') {
        1
    } else {
        walk(body, |character| character.is_ascii_digit())
    };

    body[digits..]
        .starts_with(']')
        .then_some((TokenKind::BracketOperator, digits + 2))
}

/// The longest operator spelling the input starts with.
fn match_operator(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    OPERATORS
        .iter()
        .find(|(spelling, _)| input.starts_with(spelling))
        .map(|(spelling, kind)| (*kind, spelling.len()))
}

fn match_identifier(input: &str, _: Context) -> Option<(TokenKind, usize)> {
    input
        .starts_with(is_identifier_start)
        .then(|| (TokenKind::Identifier, walk(input, is_identifier_character)))
}

/// Produces the tokens of a source text in a single left-to-right pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexer<'a> {
    remaining: &'a str,
    location: Location,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the first character of `content`.
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            remaining: content,
            location: Location { line: 1, column: 1 },
            tokens: Vec::new(),
        }
    }

    fn context(&self) -> Context {
        let previous = self
            .tokens
            .iter()
            .rev()
            .find(|token| token.kind().is_significant());

        Context {
            operand_expected: previous.map_or(true, |token| !token.kind().ends_operand()),
        }
    }

    fn skip_spaces(&mut self) {
        let spaces = walk(self.remaining, |character| character == ' ');

        self.remaining = &self.remaining[spaces..];
        self.location.column += spaces;
    }

    /// Recognizes the next token and moves past it.
    fn lex_token(&mut self) -> Result<(), Error> {
        let context = self.context();
        let Some((kind, byte_length)) = MATCHERS
            .iter()
            .find_map(|matcher| matcher(self.remaining, context))
        else {
            let character = self.remaining.chars().next().unwrap_or_default();

            return Err(UnrecognizedInput {
                character,
                location: self.location,
            }
            .into());
        };

        let (text, rest) = self.remaining.split_at(byte_length);
        self.remaining = rest;

        if kind == TokenKind::NewLine {
            self.tokens
                .push(Token::new(kind, "\n".to_string(), self.location, 1));

            self.location.line += 1;
            self.location.column = 1;
        } else {
            let length = text.chars().count();

            self.tokens
                .push(Token::new(kind, text.to_string(), self.location, length));

            self.location.column += length;
        }

        Ok(())
    }

    /// Tokenizes the whole input.
    ///
    /// Spaces between tokens are skipped; every other character has to be part of a token. The
    /// returned stream always ends with exactly one [`TokenKind::EndOfTokens`] token.
    ///
    /// # Errors
    /// [`Error::UnrecognizedInput`]: no matcher recognizes the input at some position.
    pub fn produce_tokens(mut self) -> Result<TokenStream, Error> {
        loop {
            self.skip_spaces();

            if self.remaining.is_empty() {
                break;
            }

            self.lex_token()?;
        }

        self.tokens.push(Token::end_of_tokens(self.location));

        Ok(TokenStream::new(self.tokens))
    }
}
