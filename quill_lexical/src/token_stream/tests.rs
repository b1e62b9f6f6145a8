use std::{fmt::Display, str::FromStr};

use proptest::{
    prelude::Arbitrary,
    prop_assert, prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Just, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};
use quill_test::input::Input;

use crate::token::{self, TokenKind};

/// Represents an input for the blank text placed between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Separator {
    Space,
    Spaces,
    NewLine,
    CarriageReturnNewLine,
}

impl Arbitrary for Separator {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            4 => Just(Self::Space),
            1 => Just(Self::Spaces),
            2 => Just(Self::NewLine),
            1 => Just(Self::CarriageReturnNewLine),
        ]
        .boxed()
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Space => " ",
            Self::Spaces => "   ",
            Self::NewLine => "\n",
            Self::CarriageReturnNewLine => "\r\n",
        })
    }
}

/// Represents an input for the [`super::TokenStream`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenStream {
    /// The tokens of the source, each followed by its separator.
    pub tokens: Vec<(token::tests::Token, Separator)>,
}

impl Arbitrary for TokenStream {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(
            (token::tests::Token::arbitrary(), Separator::arbitrary()),
            0..=16,
        )
        .prop_map(|tokens| Self { tokens })
        .boxed()
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (token, separator) in &self.tokens {
            Display::fmt(token, f)?;
            Display::fmt(separator, f)?;
        }

        Ok(())
    }
}

impl Input<&super::TokenStream> for &TokenStream {
    fn assert(self, output: &super::TokenStream) -> TestCaseResult {
        let significant = output
            .iter()
            .filter(|token| token.kind().is_significant() && !token.is_end())
            .collect::<Vec<_>>();

        prop_assert_eq!(self.tokens.len(), significant.len());

        for ((input, _), output) in self.tokens.iter().zip(significant) {
            input.assert(output)?;
        }

        let new_lines = self
            .tokens
            .iter()
            .filter(|(_, separator)| {
                matches!(separator, Separator::NewLine | Separator::CarriageReturnNewLine)
            })
            .count();

        prop_assert_eq!(
            output
                .iter()
                .filter(|token| token.kind() == TokenKind::NewLine)
                .count(),
            new_lines
        );
        prop_assert_eq!(output.end_of_tokens().line(), new_lines + 1);

        Ok(())
    }
}

/// Reads back a line printed by [`super::TokenStream::print_tokens`] into its kind and text.
fn parse_printed_token(line: &str) -> Result<(TokenKind, String), TestCaseError> {
    let (kind, rest) = line
        .split_once(' ')
        .ok_or_else(|| TestCaseError::fail(format!("malformed token line {line:?}")))?;
    let kind = TokenKind::from_str(kind)
        .map_err(|_| TestCaseError::fail(format!("unknown kind name {kind:?}")))?;

    let mut fields = rest.rsplitn(3, ' ');
    let column = fields.next();
    let line_number = fields.next();
    let text = fields.next();

    let (Some(column), Some(line_number), Some(text)) = (column, line_number, text) else {
        return Err(TestCaseError::fail(format!("malformed token line {line:?}")));
    };

    prop_assert!(column.parse::<usize>().is_ok());
    prop_assert!(line_number.parse::<usize>().is_ok());

    let text = if kind == TokenKind::NewLine {
        prop_assert_eq!(text, "\\n");
        "\n".to_string()
    } else {
        text.to_string()
    };

    Ok((kind, text))
}

proptest! {
    #[test]
    fn token_stream_test(input in TokenStream::arbitrary()) {
        let token_stream = super::TokenStream::tokenize(&input.to_string())?;

        input.assert(&token_stream)?;
        prop_assert_eq!(
            token_stream.iter().filter(|token| token.is_end()).count(),
            1
        );
        prop_assert!(token_stream.end_of_tokens().is_end());
    }

    #[test]
    fn printed_tokens_lex_back_to_the_same_kinds(input in TokenStream::arbitrary()) {
        let token_stream = super::TokenStream::tokenize(&input.to_string())?;
        let printed = token_stream.to_string();

        let mut read_back = Vec::new();
        for line in printed.lines() {
            read_back.push(parse_printed_token(line)?);
        }

        prop_assert_eq!(read_back.len(), token_stream.len());

        let source = read_back
            .iter()
            .filter(|(kind, _)| *kind != TokenKind::EndOfTokens)
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let relexed = super::TokenStream::tokenize(&source)?;

        let expected = read_back.iter().map(|(kind, text)| (*kind, text.as_str()));
        let found = relexed.iter().map(|token| (token.kind(), token.text().as_str()));

        prop_assert!(expected.eq(found));
    }
}

#[test]
fn stream_ends_with_a_single_marker() {
    let token_stream = super::TokenStream::tokenize("int x;\n").unwrap();

    assert_eq!(token_stream.len(), 5);
    assert_eq!(token_stream.end_of_tokens().line(), 2);
    assert_eq!(token_stream.end_of_tokens().column(), 1);

    let mut printed = Vec::new();
    token_stream.print_tokens(&mut printed).unwrap();
    assert_eq!(
        String::from_utf8(printed).unwrap(),
        "IntegerType int 1 1\nIdentifier x 1 5\nSemicolon ; 1 6\nNewLine \\n 1 7\nEndOfTokens  2 1\n"
    );

    let tokens = token_stream.dissolve();
    assert_eq!(tokens.len(), 5);
    assert!(tokens[4].is_end());
}
