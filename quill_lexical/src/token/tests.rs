use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Strategy},
    test_runner::TestCaseResult,
};
use quill_base::source_file::Location;
use quill_test::input::Input;
use strum::IntoEnumIterator;

use super::TokenKind;
use crate::token_stream::TokenStream;

lazy_static! {
    static ref KEYWORD_SPELLINGS: Vec<(&'static str, TokenKind)> = TokenKind::iter()
        .filter(|kind| kind.is_keyword())
        .flat_map(|kind| kind.spellings().iter().map(move |spelling| (*spelling, kind)))
        .collect();
    static ref OPERATOR_SPELLINGS: Vec<(&'static str, TokenKind)> = TokenKind::iter()
        .filter(|kind| !kind.is_keyword())
        .flat_map(|kind| kind.spellings().iter().map(move |spelling| (*spelling, kind)))
        .collect();
}

/// Represents an input for a token recognized by a fixed spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed {
    pub spelling: &'static str,
    pub kind: TokenKind,
}

impl Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.spelling) }
}

impl Fixed {
    pub fn keyword() -> BoxedStrategy<Self> {
        proptest::sample::select(KEYWORD_SPELLINGS.as_slice())
            .prop_map(|(spelling, kind)| Self { spelling, kind })
            .boxed()
    }

    pub fn operator() -> BoxedStrategy<Self> {
        proptest::sample::select(OPERATOR_SPELLINGS.as_slice())
            .prop_map(|(spelling, kind)| Self { spelling, kind })
            .boxed()
    }
}

/// Represents an input for a token recognized by a pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Patterned {
    pub text: String,
    pub kind: TokenKind,
}

impl Display for Patterned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.text) }
}

impl Patterned {
    fn with_kind(kind: TokenKind) -> impl Fn(String) -> Self {
        move |text| Self { text, kind }
    }

    pub fn identifier() -> BoxedStrategy<Self> {
        "[A-Za-z_][A-Za-z0-9_]{0,8}"
            .prop_filter("keywords are not identifiers", |text| {
                !KEYWORD_SPELLINGS.iter().any(|(spelling, _)| spelling == text)
            })
            .prop_map(Self::with_kind(TokenKind::Identifier))
            .boxed()
    }

    pub fn int() -> BoxedStrategy<Self> {
        "0|[1-9][0-9]{0,8}"
            .prop_map(Self::with_kind(TokenKind::IntConst))
            .boxed()
    }

    pub fn unsigned() -> BoxedStrategy<Self> {
        "(0|[1-9][0-9]{0,8})[uU]"
            .prop_map(Self::with_kind(TokenKind::UnsignedConst))
            .boxed()
    }

    pub fn float() -> BoxedStrategy<Self> {
        "[0-9]{0,4}\\.[0-9]{1,4}([eE][+-]?[0-9]{1,2})?"
            .prop_map(Self::with_kind(TokenKind::FloatConst))
            .boxed()
    }

    pub fn character() -> BoxedStrategy<Self> {
        "'([a-zA-Z0-9 +*/]|\\\\[abfnrtv'\"?\\\\])'"
            .prop_map(Self::with_kind(TokenKind::CharConst))
            .boxed()
    }

    pub fn string_literal() -> BoxedStrategy<Self> {
        "\"[a-zA-Z0-9 ,.!?]{0,12}\""
            .prop_filter("header names are lexed as headers", |text| {
                !text.trim_end_matches('"').ends_with(".h")
            })
            .prop_map(Self::with_kind(TokenKind::StringConst))
            .boxed()
    }

    pub fn header() -> BoxedStrategy<Self> {
        "\"[a-z_]{1,8}\\.h\""
            .prop_map(Self::with_kind(TokenKind::Header))
            .boxed()
    }

    pub fn bracket_operator() -> BoxedStrategy<Self> {
        "\\[(0|[1-9][0-9]{0,3})?\\]"
            .prop_map(Self::with_kind(TokenKind::BracketOperator))
            .boxed()
    }
}

/// Represents an input for a single [`super::Token`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Fixed(Fixed),
    Patterned(Patterned),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Fixed(fixed) => fixed.kind,
            Self::Patterned(patterned) => patterned.kind,
        }
    }
}

impl Arbitrary for Token {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Fixed::keyword().prop_map(Self::Fixed),
            Fixed::operator().prop_map(Self::Fixed),
            Patterned::identifier().prop_map(Self::Patterned),
            Patterned::int().prop_map(Self::Patterned),
            Patterned::unsigned().prop_map(Self::Patterned),
            Patterned::float().prop_map(Self::Patterned),
            Patterned::character().prop_map(Self::Patterned),
            Patterned::string_literal().prop_map(Self::Patterned),
            Patterned::header().prop_map(Self::Patterned),
            Patterned::bracket_operator().prop_map(Self::Patterned),
        ]
        .boxed()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(fixed) => Display::fmt(fixed, f),
            Self::Patterned(patterned) => Display::fmt(patterned, f),
        }
    }
}

impl Input<&super::Token> for &Token {
    fn assert(self, output: &super::Token) -> TestCaseResult {
        prop_assert_eq!(self.kind(), output.kind());
        let expected = self.to_string();
        let actual = output.text();
        prop_assert_eq!(expected.as_str(), actual.as_str());
        prop_assert_eq!(output.length(), output.text().chars().count());
        Ok(())
    }
}

proptest! {
    #[test]
    fn single_token_test(input in Token::arbitrary()) {
        let token_stream = TokenStream::tokenize(&input.to_string())?;

        prop_assert_eq!(token_stream.len(), 2);
        input.assert(&token_stream[0])?;
        prop_assert_eq!(token_stream[0].location(), Location { line: 1, column: 1 });
        prop_assert_eq!(token_stream[1].kind(), TokenKind::EndOfTokens);
    }
}

#[test]
fn every_kind_name_parses_back() {
    for kind in TokenKind::iter() {
        assert_eq!(TokenKind::from_str(&kind.to_string()), Ok(kind));
    }

    assert_eq!(TokenKind::FloatConst.to_string(), "FloatConstant");
    assert_eq!(TokenKind::LogicalNot.to_string(), "BitwiseNot");
    assert_eq!(TokenKind::IntegerType.to_string(), "IntegerType");
}

#[test]
fn negation_prints_as_bitwise_not() {
    let negation = super::Token::new(
        TokenKind::LogicalNot,
        "!".to_string(),
        Location { line: 3, column: 7 },
        1,
    );

    assert_eq!(negation.to_string(), "BitwiseNot ! 3 7");
}

#[test]
fn token_display() {
    let identifier = super::Token::new(
        TokenKind::Identifier,
        "count".to_string(),
        Location { line: 3, column: 7 },
        5,
    );
    let new_line = super::Token::new(
        TokenKind::NewLine,
        "\n".to_string(),
        Location { line: 3, column: 12 },
        1,
    );
    let end = super::Token::end_of_tokens(Location { line: 4, column: 1 });

    assert_eq!(identifier.to_string(), "Identifier count 3 7");
    assert_eq!(new_line.to_string(), "NewLine \\n 3 12");
    assert_eq!(end.to_string(), "EndOfTokens  4 1");
}

#[test]
fn kind_classification() {
    assert!(TokenKind::IntegerType.is_type_keyword());
    assert!(!TokenKind::Void.is_type_keyword());
    assert!(TokenKind::While.is_keyword());
    assert!(!TokenKind::IncludeDirective.is_keyword());
    assert!(!TokenKind::LeftShift.is_keyword());
    assert!(TokenKind::BitwiseOrEqual.is_assignment_operator());
    assert!(!TokenKind::EqualEqual.is_assignment_operator());
    assert!(TokenKind::LessEqual.is_comparison_operator());
    assert!(!TokenKind::NewLine.is_significant());
    assert!(TokenKind::RightParen.ends_operand());
    assert!(!TokenKind::Equal.ends_operand());
}
