//! Contains the expression productions and the precedence reduction shared by the infix
//! operator families.

use quill_lexical::token::{Token, TokenKind};

use super::{Node, Tag};
use crate::{
    error::{Error, SyntaxKind, UnbalancedParenthesis, UnexpectedSyntax},
    parser::{ParseResult, Parser, Production},
};

/// A family of infix operators reduced by [`reduce`].
pub trait InfixOperator: Sized + Copy {
    /// Gets the operator spelled by the given kind of token, if it belongs to the family.
    fn from_kind(kind: TokenKind) -> Option<Self>;

    /// Gets the precedence of the operator; the higher, the tighter it binds.
    fn precedence(self) -> u32;
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ArithmeticOperator:
///     '*' | '/' | '%'
///     | '+' | '-'
///     | '^'
///     ;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum ArithmeticOperator {
    Multiplicative,
    Additive,
    Bitwise,
}

impl InfixOperator for ArithmeticOperator {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star | TokenKind::Division | TokenKind::Modulo => Some(Self::Multiplicative),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Additive),
            TokenKind::BitwiseXor => Some(Self::Bitwise),
            _ => None,
        }
    }

    fn precedence(self) -> u32 {
        match self {
            Self::Additive => 1,
            Self::Multiplicative => 2,
            Self::Bitwise => 3,
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// LogicalOperator:
///     '&&' | '||'
///     ;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum LogicalOperator {
    And,
    Or,
}

impl InfixOperator for LogicalOperator {
    fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::LogicalAnd => Some(Self::And),
            TokenKind::LogicalOr => Some(Self::Or),
            _ => None,
        }
    }

    fn precedence(self) -> u32 {
        match self {
            Self::Or => 1,
            Self::And => 2,
        }
    }
}

/// An element of the flat run an infix expression is collected into before [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Item {
    Operand(Node),
    Operator(Token),
    Open(Token),
    Close(Token),
}

#[derive(Debug)]
enum Pending<O> {
    Open(Token),
    Operator(Token, O),
}

fn reduce_top(trees: &mut Vec<Node>, operator: Token) -> Result<(), Error> {
    let (Some(right), Some(left)) = (trees.pop(), trees.pop()) else {
        return Err(UnexpectedSyntax {
            expected: SyntaxKind::Expression,
            found: operator,
        }
        .into());
    };

    trees.push(Node::with_children(operator, [left, right]));

    Ok(())
}

/// Reduces a run of operands, operators and parentheses into a binary tree over two stacks.
///
/// Operands are pushed to the tree stack and `(` to the operator stack. A `)` reduces down to
/// its matching `(`. An incoming operator is pushed when its precedence is greater than or equal
/// to the stacked operator's; otherwise the stacked operator is reduced first. Operators of the
/// same precedence therefore group to the right. A single operand yields itself.
///
/// Returns `Ok(None)` for an empty run.
///
/// # Errors
/// - [`Error::UnbalancedParenthesis`]: a parenthesis has no counterpart.
/// - [`Error::UnexpectedSyntax`]: a token is not an operator of the family, or an operator lacks
///   an operand.
pub fn reduce<O: InfixOperator>(items: impl IntoIterator<Item = Item>) -> ParseResult<Node> {
    let mut operators: Vec<Pending<O>> = Vec::new();
    let mut trees = Vec::new();

    for item in items {
        match item {
            Item::Operand(node) => trees.push(node),
            Item::Open(token) => operators.push(Pending::Open(token)),
            Item::Close(token) => loop {
                match operators.pop() {
                    Some(Pending::Open(..)) => break,
                    Some(Pending::Operator(operator, ..)) => reduce_top(&mut trees, operator)?,
                    None => return Err(UnbalancedParenthesis { found: token }.into()),
                }
            },
            Item::Operator(token) => {
                let Some(incoming) = O::from_kind(token.kind()) else {
                    return Err(UnexpectedSyntax {
                        expected: SyntaxKind::Expression,
                        found: token,
                    }
                    .into());
                };

                while let Some(Pending::Operator(_, top)) = operators.last() {
                    if incoming.precedence() >= top.precedence() {
                        break;
                    }

                    if let Some(Pending::Operator(operator, ..)) = operators.pop() {
                        reduce_top(&mut trees, operator)?;
                    }
                }

                operators.push(Pending::Operator(token, incoming));
            }
        }
    }

    while let Some(pending) = operators.pop() {
        match pending {
            Pending::Operator(operator, ..) => reduce_top(&mut trees, operator)?,
            Pending::Open(token) => return Err(UnbalancedParenthesis { found: token }.into()),
        }
    }

    debug_assert!(trees.len() <= 1);

    Ok(trees.pop())
}

fn is_arithmetic_operand(kind: TokenKind) -> bool {
    kind.is_numeric_literal() || kind == TokenKind::Identifier
}

fn is_string_operand(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::StringConst | TokenKind::Identifier)
}

impl<'a> Parser<'a> {
    /// Parses an arithmetic expression into its operator tree.
    ///
    /// The longest balanced run of operands, arithmetic operators and parentheses starting at
    /// the cursor is taken; a `)` that closes nothing ends the run.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Arithmetic:
    ///     Term (ArithmeticOperator Term)*
    ///     ;
    ///
    /// Term:
    ///     Identifier | IntConst | UnsignedConst | FloatConst
    ///     | '(' Arithmetic ')'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// See [`reduce`].
    pub fn parse_arithmetic_expression(&mut self) -> ParseResult<Node> {
        let mut cursor = *self;
        let mut items = Vec::new();
        let mut checkpoint = None;
        let mut depth = 0_usize;
        let mut operand_expected = true;

        loop {
            let token = cursor.peek();
            let kind = token.kind();

            if operand_expected {
                if kind == TokenKind::LeftParen {
                    items.push(Item::Open(token.clone()));
                    depth += 1;
                } else if is_arithmetic_operand(kind) {
                    items.push(Item::Operand(Node::leaf(token.clone())));
                    operand_expected = false;
                } else {
                    break;
                }
            } else if kind == TokenKind::RightParen && depth > 0 {
                items.push(Item::Close(token.clone()));
                depth -= 1;
            } else if ArithmeticOperator::from_kind(kind).is_some() {
                items.push(Item::Operator(token.clone()));
                operand_expected = true;
            } else {
                break;
            }

            cursor.next_token();

            if !operand_expected && depth == 0 {
                checkpoint = Some((items.len(), cursor.current_index()));
            }
        }

        let Some((length, index)) = checkpoint else {
            return Ok(None);
        };

        items.truncate(length);
        self.rewind(index);

        reduce::<ArithmeticOperator>(items)
    }

    /// Returns `true` if an arithmetic expression starts at the cursor.
    fn starts_arithmetic(&self) -> bool {
        let mut probe = *self;
        matches!(probe.parse_arithmetic_expression(), Ok(Some(..)))
    }

    /// Parses a logical expression into its operator tree.
    ///
    /// A `(` opens a logical group only where it does not start an arithmetic operand, so
    /// `(a + 1) < b` compares a parenthesized sum.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Logical:
    ///     '('* BooleanTerm ')'* (LogicalOperator '('* BooleanTerm ')'*)*
    ///     ;
    ///
    /// BooleanTerm:
    ///     Negated (ComparisonOperator Negated)?
    ///     ;
    ///
    /// Negated:
    ///     '!'* BooleanOperand
    ///     | '!'+ '(' Logical ')'
    ///     ;
    ///
    /// BooleanOperand:
    ///     Arithmetic | 'true' | 'false'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// - [`Error::UnbalancedParenthesis`]: a group is not closed.
    /// - [`Error::UnexpectedSyntax`]: an operator is not followed by an operand.
    pub fn parse_logical_expression(&mut self) -> ParseResult<Node> {
        let start = self.current_index();
        let mut items = Vec::new();
        let mut open = 0_usize;

        loop {
            while self.peek_kind() == TokenKind::LeftParen && !self.starts_arithmetic() {
                items.push(Item::Open(self.next_token().clone()));
                open += 1;
            }

            let Some(term) = self.parse_boolean_term()? else {
                if items.iter().any(|item| matches!(item, Item::Operand(..))) {
                    return Err(self.unexpected(SyntaxKind::Expression));
                }

                self.rewind(start);
                return Ok(None);
            };

            items.push(Item::Operand(term));

            while open > 0 && self.peek_kind() == TokenKind::RightParen {
                items.push(Item::Close(self.next_token().clone()));
                open -= 1;
            }

            if LogicalOperator::from_kind(self.peek_kind()).is_none() {
                break;
            }

            items.push(Item::Operator(self.next_token().clone()));
        }

        if open > 0 {
            return Err(UnbalancedParenthesis {
                found: self.peek().clone(),
            }
            .into());
        }

        reduce::<LogicalOperator>(items)
    }

    fn parse_boolean_term(&mut self) -> ParseResult<Node> {
        let Some(left) = self.parse_negated_operand()? else {
            return Ok(None);
        };

        if !self.peek_kind().is_comparison_operator() {
            return Ok(Some(left));
        }

        let operator = self.next_token().clone();
        let right = self
            .parse_negated_operand()?
            .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;

        Ok(Some(Node::with_children(operator, [left, right])))
    }

    /// Parses a chain of `!` and the operand it applies to. The negations nest right to left,
    /// so `!!a` is `!(!(a))`.
    fn parse_negated_operand(&mut self) -> ParseResult<Node> {
        let mut negations = Vec::new();

        while let Some(negation) = self.eat(TokenKind::LogicalNot) {
            negations.push(negation.clone());
        }

        let operand = if !negations.is_empty()
            && self.peek_kind() == TokenKind::LeftParen
            && !self.starts_arithmetic()
        {
            self.next_token();

            let inner = self
                .parse_logical_expression()?
                .ok_or_else(|| self.unexpected(SyntaxKind::LogicalExpression))?;
            self.expect(TokenKind::RightParen)?;

            inner
        } else if let Some(operand) = self.parse_boolean_operand()? {
            operand
        } else if negations.is_empty() {
            return Ok(None);
        } else {
            return Err(self.unexpected(SyntaxKind::Expression));
        };

        Ok(Some(negations.into_iter().rev().fold(operand, |operand, negation| {
            Node::with_children(negation, [operand])
        })))
    }

    fn parse_boolean_operand(&mut self) -> ParseResult<Node> {
        if let Some(literal) = self
            .eat(TokenKind::True)
            .or_else(|| self.eat(TokenKind::False))
        {
            return Ok(Some(Node::leaf(literal.clone())));
        }

        self.parse_arithmetic_expression()
    }

    /// Parses a left fold of string literals and identifiers joined by `+`.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// String:
    ///     StringOperand ('+' StringOperand)*
    ///     ;
    ///
    /// StringOperand:
    ///     StringConst | Identifier
    ///     ;
    /// ```
    ///
    /// # Errors
    /// This production never fails; it only matches or does not.
    pub fn parse_string_expression(&mut self) -> ParseResult<Node> {
        if !is_string_operand(self.peek_kind()) {
            return Ok(None);
        }

        let mut tree = Node::leaf(self.next_token().clone());

        while self.peek_kind() == TokenKind::Plus && is_string_operand(self.peek_offset(1).kind()) {
            let operator = self.next_token().clone();
            let operand = Node::leaf(self.next_token().clone());

            tree = Node::with_children(operator, [tree, operand]);
        }

        Ok(Some(tree))
    }

    /// Parses a character literal leaf.
    ///
    /// # Errors
    /// This production never fails; it only matches or does not.
    pub fn parse_char_literal(&mut self) -> ParseResult<Node> {
        Ok(self
            .eat(TokenKind::CharConst)
            .map(|literal| Node::leaf(literal.clone())))
    }

    /// Parses an arithmetic expression wrapped in an [`Tag::ArithmExpr`] node.
    ///
    /// # Errors
    /// See [`Self::parse_arithmetic_expression`].
    pub fn parse_arithm_expr(&mut self) -> ParseResult<Node> {
        Ok(self
            .parse_arithmetic_expression()?
            .map(|tree| Node::with_children(Tag::ArithmExpr, [tree])))
    }

    /// Parses a logical expression wrapped in a [`Tag::LogicalExpr`] node.
    ///
    /// # Errors
    /// See [`Self::parse_logical_expression`].
    pub fn parse_logical_expr(&mut self) -> ParseResult<Node> {
        Ok(self
            .parse_logical_expression()?
            .map(|tree| Node::with_children(Tag::LogicalExpr, [tree])))
    }

    /// Parses a string expression wrapped in a [`Tag::StringExpr`] node.
    ///
    /// # Errors
    /// This production never fails; it only matches or does not.
    pub fn parse_string_expr(&mut self) -> ParseResult<Node> {
        Ok(self
            .parse_string_expression()?
            .map(|tree| Node::with_children(Tag::StringExpr, [tree])))
    }

    /// Parses the value of an assignment or a call argument: an arithmetic, string or logical
    /// expression, or a character literal, whichever is complete before one of the
    /// `terminators`.
    ///
    /// # Errors
    /// See [`Self::parse_alternatives`].
    pub fn parse_value(&mut self, terminators: &[TokenKind]) -> ParseResult<Node> {
        let alternatives: [Production<'a, Node>; 4] = [
            Self::parse_arithm_expr,
            Self::parse_string_expr,
            Self::parse_logical_expr,
            Self::parse_char_literal,
        ];

        self.parse_alternatives(&alternatives, terminators)
    }

    /// Parses the value of a `return` statement. A lone identifier is kept as a bare leaf.
    ///
    /// # Errors
    /// See [`Self::parse_alternatives`].
    pub fn parse_return_value(&mut self) -> ParseResult<Node> {
        fn parse_lone_identifier(parser: &mut Parser) -> ParseResult<Node> {
            Ok(parser
                .eat(TokenKind::Identifier)
                .map(|identifier| Node::leaf(identifier.clone())))
        }

        let alternatives: [Production<'a, Node>; 4] = [
            parse_lone_identifier,
            Self::parse_arithm_expr,
            Self::parse_logical_expr,
            Self::parse_string_expr,
        ];

        self.parse_alternatives(&alternatives, &[TokenKind::Semicolon])
    }

    /// Parses an operand of a `cout` chain: a character literal, a string expression or an
    /// arithmetic expression.
    ///
    /// # Errors
    /// See [`Self::parse_alternatives`].
    pub fn parse_output_operand(&mut self) -> ParseResult<Node> {
        let alternatives: [Production<'a, Node>; 3] = [
            Self::parse_char_literal,
            Self::parse_string_expression,
            Self::parse_arithmetic_expression,
        ];

        self.parse_alternatives(&alternatives, &[TokenKind::LeftShift, TokenKind::Semicolon])
    }
}
