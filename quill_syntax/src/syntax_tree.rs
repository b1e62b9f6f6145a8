//! Contains the labeled syntax tree produced by the parser and the parsing logic of every
//! grammar production.

use std::{fmt::Display, io::Write};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use quill_lexical::token::Token;

pub mod declaration;
pub mod expression;
pub mod program;
pub mod statement;

/// Is an enumeration of the grammar productions a [`Node`] can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
#[allow(missing_docs)]
pub enum Tag {
    Program,

    IncludeExpr,
    LibraryExpr,
    HeaderExpr,
    UsingExpr,

    VarDeclExpr,
    AssignExpr,
    #[strum(serialize = "LHS")]
    Lhs,
    ArithmExpr,
    StringExpr,
    LogicalExpr,

    InputExpr,
    OutputExpr,

    FuncDeclExpr,
    FuncDefExpr,
    Parameters,
    DeclExpr,
    FuncBody,
    FuncCallExpr,
    Arguments,

    ForExpr,
    ForBody,
    WhileExpr,
    WhileBody,
    IfElseExpr,
    IfBody,
    ElseIfExprs,
    ElseIfExpr,
    ElseIfBody,
    ElseBody,
    ReturnExpr,
    IncrExpr,
    DecrExpr,

    ClassDeclExpr,
    ClassDefExpr,
    ClassBody,
    AccessSpecExpr,
    ClassConstrExpr,
    ClassDestrExpr,
    DeleteExpr,

    LineComment,
    MultilineComment,
}

/// The label of a [`Node`]: either the production it stands for or the token it holds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Label {
    Tag(Tag),
    Token(Token),
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(tag) => Display::fmt(tag, f),
            Self::Token(token) => Display::fmt(token, f),
        }
    }
}

/// A node of the syntax tree.
///
/// A node owns its children; cloning a node copies the whole subtree. The order of the children
/// is the left-to-right order of the syntax they were parsed from. An operator node is labeled
/// with its operator token and has its operands as children, the left operand first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Node {
    /// Gets the label of the node.
    #[get = "pub"]
    label: Label,

    /// Gets the children of the node in syntactic order.
    #[get = "pub"]
    children: Vec<Node>,
}

impl Node {
    /// Creates a childless node tagged with the given production.
    #[must_use]
    pub fn tag(tag: Tag) -> Self {
        Self {
            label: Label::Tag(tag),
            children: Vec::new(),
        }
    }

    /// Creates a leaf node holding the given token.
    #[must_use]
    pub fn leaf(token: Token) -> Self {
        Self {
            label: Label::Token(token),
            children: Vec::new(),
        }
    }

    /// Creates a node with the given label and children.
    #[must_use]
    pub fn with_children(label: impl Into<Label>, children: impl IntoIterator<Item = Self>) -> Self {
        Self {
            label: label.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Appends the given nodes after the existing children.
    pub fn add_children(&mut self, children: impl IntoIterator<Item = Self>) {
        self.children.extend(children);
    }

    /// Gets the tag of the node if it is labeled with a production.
    #[must_use]
    pub fn tag_of(&self) -> Option<Tag> { self.label.as_tag().copied() }

    /// Gets the token of the node if it is labeled with one.
    #[must_use]
    pub fn token(&self) -> Option<&Token> { self.label.as_token() }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool { self.children.is_empty() }

    /// Dissolves the node into its label and children.
    #[must_use]
    pub fn dissolve(self) -> (Label, Vec<Self>) { (self.label, self.children) }

    /// Writes the indented dump of the tree, see the [`Display`] implementation.
    ///
    /// # Errors
    /// Writing to `output` failed.
    pub fn print(&self, output: &mut impl Write) -> std::io::Result<()> { write!(output, "{self}") }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        for _ in 0..depth {
            f.write_str("\t")?;
        }

        writeln!(f, "{}", self.label)?;

        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }

        Ok(())
    }
}

impl Display for Node {
    /// Renders the tree in pre-order, one node per line, each line indented by one tab per
    /// level of depth.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.write_indented(f, 0) }
}
