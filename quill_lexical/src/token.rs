//! Is a module containing the [`Token`] type and its [`TokenKind`] classification.

use std::fmt::Display;

use derive_new::new;
use getset::{CopyGetters, Getters};
use quill_base::source_file::Location;
use strum_macros::{EnumIter, EnumString};

/// Is an enumeration of every kind of token the lexer can produce.
///
/// The [`Display`] rendering of a kind is its name, e.g. `IntegerType`, and [`std::str::FromStr`]
/// parses the name back.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    strum_macros::Display,
)]
#[allow(missing_docs)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    DotOperator,
    Tilde,
    BracketOperator,
    Minus,
    Plus,
    Semicolon,
    Star,
    Division,
    Modulo,
    #[strum(serialize = "BitwiseNot")]
    LogicalNot,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    QuestionMark,
    Colon,
    LeftSquareBracket,
    RightSquareBracket,
    Arrow,
    ScopeOperator,

    Equal,
    NotEqual,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    MinusMinus,
    PlusPlus,
    LeftShift,
    RightShift,
    LogicalAnd,
    LogicalOr,
    StarEqual,
    DivideEqual,
    ModuloEqual,
    PlusEqual,
    MinusEqual,
    LeftShiftEqual,
    RightShiftEqual,
    BitwiseAndEqual,
    BitwiseXorEqual,
    BitwiseOrEqual,
    Backslash,

    Identifier,
    StringConst,
    CharConst,
    IntConst,
    UnsignedConst,
    #[strum(serialize = "FloatConstant")]
    FloatConst,

    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Default,
    Delete,
    Do,
    Else,
    Finally,
    For,
    If,
    New,
    Return,
    Struct,
    Switch,
    This,
    Throw,
    Try,
    Void,
    While,
    True,
    False,

    Char,
    FloatType,
    IntegerType,
    Unsigned,
    String,
    Bool,

    NewLine,
    LineComment,
    MultilineCommentStart,
    MultilineCommentEnd,

    AccessSpecifier,
    Using,
    Namespace,

    IncludeDirective,
    Header,

    Cin,
    Cout,

    EndOfTokens,
}

impl TokenKind {
    /// Gets every fixed spelling of this kind of token.
    ///
    /// Kinds recognized by a pattern rather than a fixed text (identifiers, literals, headers,
    /// newlines, the bracket operator and the end of tokens) have no spelling.
    #[must_use]
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Self::LeftParen => &["("],
            Self::RightParen => &[")"],
            Self::LeftBrace => &["{"],
            Self::RightBrace => &["}"],
            Self::Comma => &[","],
            Self::DotOperator => &["."],
            Self::Tilde => &["~"],
            Self::Minus => &["-"],
            Self::Plus => &["+"],
            Self::Semicolon => &[";"],
            Self::Star => &["*"],
            Self::Division => &["/"],
            Self::Modulo => &["%"],
            Self::LogicalNot => &["!"],
            Self::BitwiseAnd => &["&"],
            Self::BitwiseXor => &["^"],
            Self::BitwiseOr => &["|"],
            Self::QuestionMark => &["?"],
            Self::Colon => &[":"],
            Self::LeftSquareBracket => &["["],
            Self::RightSquareBracket => &["]"],
            Self::Arrow => &["->"],
            Self::ScopeOperator => &["::"],
            Self::Equal => &["="],
            Self::NotEqual => &["!="],
            Self::EqualEqual => &["=="],
            Self::Greater => &[">"],
            Self::GreaterEqual => &[">="],
            Self::Less => &["<"],
            Self::LessEqual => &["<="],
            Self::MinusMinus => &["--"],
            Self::PlusPlus => &["++"],
            Self::LeftShift => &["<<"],
            Self::RightShift => &[">>"],
            Self::LogicalAnd => &["&&"],
            Self::LogicalOr => &["||"],
            Self::StarEqual => &["*="],
            Self::DivideEqual => &["/="],
            Self::ModuloEqual => &["%="],
            Self::PlusEqual => &["+="],
            Self::MinusEqual => &["-="],
            Self::LeftShiftEqual => &["<<="],
            Self::RightShiftEqual => &[">>="],
            Self::BitwiseAndEqual => &["&="],
            Self::BitwiseXorEqual => &["^="],
            Self::BitwiseOrEqual => &["|="],
            Self::Backslash => &["\\"],
            Self::LineComment => &["//"],
            Self::MultilineCommentStart => &["/*"],
            Self::MultilineCommentEnd => &["*/"],

            Self::Break => &["break"],
            Self::Case => &["case"],
            Self::Catch => &["catch"],
            Self::Class => &["class"],
            Self::Const => &["const"],
            Self::Continue => &["continue"],
            Self::Default => &["default"],
            Self::Delete => &["delete"],
            Self::Do => &["do"],
            Self::Else => &["else"],
            Self::Finally => &["finally"],
            Self::For => &["for"],
            Self::If => &["if"],
            Self::New => &["new"],
            Self::Return => &["return"],
            Self::Struct => &["struct"],
            Self::Switch => &["switch"],
            Self::This => &["this"],
            Self::Throw => &["throw"],
            Self::Try => &["try"],
            Self::Void => &["void"],
            Self::While => &["while"],
            Self::True => &["true"],
            Self::False => &["false"],
            Self::Char => &["char"],
            Self::FloatType => &["float", "double"],
            Self::IntegerType => &["int", "signed", "short", "long"],
            Self::Unsigned => &["unsigned"],
            Self::String => &["string"],
            Self::Bool => &["bool"],
            Self::AccessSpecifier => &["public", "private", "protected"],
            Self::Using => &["using"],
            Self::Namespace => &["namespace"],
            Self::Cin => &["cin"],
            Self::Cout => &["cout"],

            Self::IncludeDirective => &["#include"],

            Self::BracketOperator
            | Self::Identifier
            | Self::StringConst
            | Self::CharConst
            | Self::IntConst
            | Self::UnsignedConst
            | Self::FloatConst
            | Self::NewLine
            | Self::Header
            | Self::EndOfTokens => &[],
        }
    }

    /// Returns `true` if the kind is spelled as a word, i.e. it is a keyword or a type name.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        self.spellings()
            .first()
            .map_or(false, |spelling| spelling.starts_with(|c: char| c.is_ascii_alphabetic()))
    }

    /// Returns `true` if the kind names a built-in type usable in declarations.
    #[must_use]
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::FloatType
                | Self::IntegerType
                | Self::Unsigned
                | Self::String
                | Self::Bool
        )
    }

    /// Returns `true` if the kind is `=` or one of the compound assignment operators.
    #[must_use]
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::StarEqual
                | Self::DivideEqual
                | Self::ModuloEqual
                | Self::PlusEqual
                | Self::MinusEqual
                | Self::LeftShiftEqual
                | Self::RightShiftEqual
                | Self::BitwiseAndEqual
                | Self::BitwiseXorEqual
                | Self::BitwiseOrEqual
        )
    }

    /// Returns `true` if the kind is one of `== != < <= > >=`.
    #[must_use]
    pub fn is_comparison_operator(self) -> bool {
        matches!(
            self,
            Self::EqualEqual
                | Self::NotEqual
                | Self::Less
                | Self::LessEqual
                | Self::Greater
                | Self::GreaterEqual
        )
    }

    /// Returns `true` if the kind is a numeric literal.
    #[must_use]
    pub fn is_numeric_literal(self) -> bool {
        matches!(self, Self::IntConst | Self::UnsignedConst | Self::FloatConst)
    }

    /// Returns `true` if the parser has to look at tokens of this kind outside of comments.
    #[must_use]
    pub fn is_significant(self) -> bool { self != Self::NewLine }

    /// Returns `true` if a token of this kind can be the last token of an operand, so that a
    /// following `+` or `-` is a binary operator rather than the sign of a literal.
    #[must_use]
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::StringConst
                | Self::CharConst
                | Self::IntConst
                | Self::UnsignedConst
                | Self::FloatConst
                | Self::True
                | Self::False
                | Self::RightParen
                | Self::RightSquareBracket
                | Self::BracketOperator
                | Self::PlusPlus
                | Self::MinusMinus
        )
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters, new)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the literal text the token was produced from.
    #[get = "pub"]
    text: String,

    /// Gets the location of the first character of the token.
    #[get_copy = "pub"]
    location: Location,

    /// Gets the number of characters the token spans.
    #[get_copy = "pub"]
    length: usize,
}

impl Token {
    /// Creates the end of tokens marker placed at the given location.
    #[must_use]
    pub fn end_of_tokens(location: Location) -> Self {
        Self::new(TokenKind::EndOfTokens, String::new(), location, 0)
    }

    /// Gets the line the token starts at (starts at 1).
    #[must_use]
    pub fn line(&self) -> usize { self.location.line }

    /// Gets the column the token starts at (starts at 1).
    #[must_use]
    pub fn column(&self) -> usize { self.location.column }

    /// Returns `true` if this is the end of tokens marker.
    #[must_use]
    pub fn is_end(&self) -> bool { self.kind == TokenKind::EndOfTokens }
}

impl Display for Token {
    /// Renders the token as `<KindName> <text> <line> <column>`.
    ///
    /// A newline's text is rendered as the escape `\n` so that every token stays on one line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = if self.kind == TokenKind::NewLine {
            "\\n"
        } else {
            self.text.as_str()
        };

        write!(f, "{} {text} {} {}", self.kind, self.line(), self.column())
    }
}

#[cfg(test)]
pub(crate) mod tests;
