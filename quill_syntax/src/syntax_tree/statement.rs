//! Contains the statement productions: comments, stream I/O, calls, control flow and the
//! statements allowed inside a body.

use quill_lexical::token::TokenKind;

use super::{Node, Tag};
use crate::{
    error::{Error, SyntaxKind},
    parser::{ParseResult, Parser, Production},
};

impl<'a> Parser<'a> {
    /// Parses a line comment or a multiline comment.
    ///
    /// The tokens inside the comment are kept as leaves. A line comment ends before the next
    /// newline; a multiline comment ends with its closing `*/`, which is kept.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Comment:
    ///     '//' Token* NewLine
    ///     | '/*' Token* '*/'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: a multiline comment is not closed.
    pub fn parse_comment(&mut self) -> ParseResult<Node> {
        if let Some(start) = self.eat(TokenKind::LineComment) {
            let mut comment = Node::with_children(Tag::LineComment, [Node::leaf(start.clone())]);

            while !matches!(
                self.peek_raw().kind(),
                TokenKind::NewLine | TokenKind::EndOfTokens
            ) {
                comment.add_children([Node::leaf(self.next_raw().clone())]);
            }

            return Ok(Some(comment));
        }

        let Some(start) = self.eat(TokenKind::MultilineCommentStart) else {
            return Ok(None);
        };

        let mut comment = Node::with_children(Tag::MultilineComment, [Node::leaf(start.clone())]);

        loop {
            match self.peek_kind() {
                TokenKind::MultilineCommentEnd => {
                    comment.add_children([Node::leaf(self.next_token().clone())]);
                    return Ok(Some(comment));
                }
                TokenKind::EndOfTokens => {
                    return Err(self.unexpected(SyntaxKind::Token(TokenKind::MultilineCommentEnd)));
                }
                _ => comment.add_children([Node::leaf(self.next_token().clone())]),
            }
        }
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Input:
    ///     'cin' ('>>' Identifier)+ ';'
    ///     ;
    /// ```
    ///
    /// The chain is folded to the left: `cin >> a >> b` is `>>(>>(cin, a), b)`.
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the chain is empty or malformed.
    pub fn parse_input(&mut self) -> ParseResult<Node> {
        let Some(cin) = self.eat(TokenKind::Cin) else {
            return Ok(None);
        };

        let mut tree = Node::leaf(cin.clone());
        let operator = self.expect(TokenKind::RightShift)?;
        tree = Node::with_children(operator.clone(), [tree, Node::leaf(self.parse_identifier()?)]);

        while let Some(operator) = self.eat(TokenKind::RightShift) {
            tree = Node::with_children(operator.clone(), [tree, Node::leaf(self.parse_identifier()?)]);
        }

        self.expect(TokenKind::Semicolon)?;

        Ok(Some(Node::with_children(Tag::InputExpr, [tree])))
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Output:
    ///     'cout' ('<<' (CharConst | String | Arithmetic))+ ';'
    ///     ;
    /// ```
    ///
    /// The chain is folded to the left like [`Self::parse_input`].
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the chain is empty or an operand is malformed.
    pub fn parse_output(&mut self) -> ParseResult<Node> {
        let Some(cout) = self.eat(TokenKind::Cout) else {
            return Ok(None);
        };

        let mut tree = Node::leaf(cout.clone());

        if self.peek_kind() != TokenKind::LeftShift {
            return Err(self.unexpected(SyntaxKind::Token(TokenKind::LeftShift)));
        }

        while let Some(operator) = self.eat(TokenKind::LeftShift) {
            let operand = self
                .parse_output_operand()?
                .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;

            tree = Node::with_children(operator.clone(), [tree, operand]);
        }

        self.expect(TokenKind::Semicolon)?;

        Ok(Some(Node::with_children(Tag::OutputExpr, [tree])))
    }

    /// Parses a function call, without its terminator.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// FunctionCall:
    ///     Identifier '(' (Value (',' Value)*)? ')'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: an argument is malformed or the list is not closed.
    pub fn parse_function_call_expression(&mut self) -> ParseResult<Node> {
        if self.peek_kind() != TokenKind::Identifier
            || self.peek_offset(1).kind() != TokenKind::LeftParen
        {
            return Ok(None);
        }

        let identifier = self.next_token().clone();
        self.next_token();

        let mut arguments = Node::tag(Tag::Arguments);

        if self.eat(TokenKind::RightParen).is_none() {
            loop {
                let argument = self
                    .parse_value(&[TokenKind::Comma, TokenKind::RightParen])?
                    .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;

                arguments.add_children([argument]);

                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }

            self.expect(TokenKind::RightParen)?;
        }

        Ok(Some(Node::with_children(Tag::FuncCallExpr, [
            Node::leaf(identifier),
            arguments,
        ])))
    }

    /// Parses a function call followed by `;`.
    ///
    /// # Errors
    /// See [`Self::parse_function_call_expression`].
    pub fn parse_function_call(&mut self) -> ParseResult<Node> {
        self.terminated(Self::parse_function_call_expression)
    }

    /// Parses a prefix or postfix increment or decrement of a variable, without its terminator.
    /// The tokens are kept in source order.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Step:
    ///     ('++' | '--') Identifier
    ///     | Identifier ('++' | '--')
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: a prefix operator is not followed by an identifier.
    pub fn parse_step_expression(&mut self) -> ParseResult<Node> {
        let tag_of = |kind: TokenKind| match kind {
            TokenKind::PlusPlus => Some(Tag::IncrExpr),
            TokenKind::MinusMinus => Some(Tag::DecrExpr),
            _ => None,
        };

        if let Some(tag) = tag_of(self.peek_kind()) {
            let operator = self.next_token().clone();
            let identifier = self.parse_identifier()?;

            return Ok(Some(Node::with_children(tag, [
                Node::leaf(operator),
                Node::leaf(identifier),
            ])));
        }

        if self.peek_kind() != TokenKind::Identifier {
            return Ok(None);
        }

        let Some(tag) = tag_of(self.peek_offset(1).kind()) else {
            return Ok(None);
        };

        let identifier = self.next_token().clone();
        let operator = self.next_token().clone();

        Ok(Some(Node::with_children(tag, [
            Node::leaf(identifier),
            Node::leaf(operator),
        ])))
    }

    /// Parses an increment or decrement followed by `;`.
    ///
    /// # Errors
    /// See [`Self::parse_step_expression`].
    pub fn parse_step(&mut self) -> ParseResult<Node> { self.terminated(Self::parse_step_expression) }

    /// Parses the parenthesized condition of a `while` or an `if`.
    fn parse_condition(&mut self) -> Result<Node, Error> {
        self.expect(TokenKind::LeftParen)?;

        let condition = self
            .parse_logical_expr()?
            .ok_or_else(|| self.unexpected(SyntaxKind::LogicalExpression))?;

        self.expect(TokenKind::RightParen)?;

        Ok(condition)
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// For:
    ///     'for' '(' ForInit? ';' Logical ';' ForUpdate? ')' '{' Statement* '}'
    ///     ;
    ///
    /// ForInit:
    ///     DeclarationAssignment | Assignment | Step
    ///     ;
    ///
    /// ForUpdate:
    ///     Assignment | Step
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: any part of the loop header or body is malformed.
    pub fn parse_for(&mut self) -> ParseResult<Node> {
        const INIT_TERMINATORS: [TokenKind; 1] = [TokenKind::Semicolon];
        const UPDATE_TERMINATORS: [TokenKind; 1] = [TokenKind::RightParen];

        let Some(keyword) = self.eat(TokenKind::For) else {
            return Ok(None);
        };

        let mut node = Node::with_children(Tag::ForExpr, [Node::leaf(keyword.clone())]);

        self.expect(TokenKind::LeftParen)?;

        if self.peek_kind() != TokenKind::Semicolon {
            let init = if let Some(init) =
                self.parse_declaration_assignment_expression(&INIT_TERMINATORS)?
            {
                init
            } else if let Some(init) = self.parse_assignment_expression(&INIT_TERMINATORS)? {
                init
            } else {
                self.parse_step_expression()?
                    .ok_or_else(|| self.unexpected(SyntaxKind::Assignment))?
            };

            node.add_children([init]);
        }

        self.expect(TokenKind::Semicolon)?;

        let condition = self
            .parse_logical_expr()?
            .ok_or_else(|| self.unexpected(SyntaxKind::LogicalExpression))?;
        node.add_children([condition]);

        self.expect(TokenKind::Semicolon)?;

        if self.peek_kind() != TokenKind::RightParen {
            let update = if let Some(update) =
                self.parse_assignment_expression(&UPDATE_TERMINATORS)?
            {
                update
            } else {
                self.parse_step_expression()?
                    .ok_or_else(|| self.unexpected(SyntaxKind::Assignment))?
            };

            node.add_children([update]);
        }

        self.expect(TokenKind::RightParen)?;

        node.add_children([self.parse_block(Tag::ForBody)?]);

        Ok(Some(node))
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// While:
    ///     'while' '(' Logical ')' '{' Statement* '}'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the condition or the body is malformed.
    pub fn parse_while(&mut self) -> ParseResult<Node> {
        let Some(keyword) = self.eat(TokenKind::While) else {
            return Ok(None);
        };

        let condition = self.parse_condition()?;
        let body = self.parse_block(Tag::WhileBody)?;

        Ok(Some(Node::with_children(Tag::WhileExpr, [
            Node::leaf(keyword.clone()),
            condition,
            body,
        ])))
    }

    /// Parses an `if` with its `else if` and `else` branches as a single node.
    ///
    /// The node has the `if` branch first, then an [`Tag::ElseIfExprs`] node if there is any
    /// `else if` branch, then the `else` branch if there is one.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// If:
    ///     'if' '(' Logical ')' '{' Statement* '}'
    ///     ('else' 'if' '(' Logical ')' '{' Statement* '}')*
    ///     ('else' '{' Statement* '}')?
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: a condition or a body is malformed.
    pub fn parse_if(&mut self) -> ParseResult<Node> {
        let Some(keyword) = self.eat(TokenKind::If) else {
            return Ok(None);
        };

        let condition = self.parse_condition()?;
        let body = self.parse_block(Tag::IfBody)?;

        let mut node = Node::with_children(Tag::IfElseExpr, [Node::with_children(
            keyword.clone(),
            [condition, body],
        )]);

        let mut else_ifs = Node::tag(Tag::ElseIfExprs);

        while self.peek_kind() == TokenKind::Else && self.peek_offset(1).kind() == TokenKind::If {
            let else_keyword = self.next_token().clone();
            let if_keyword = self.next_token().clone();
            let condition = self.parse_condition()?;
            let body = self.parse_block(Tag::ElseIfBody)?;

            else_ifs.add_children([Node::with_children(Tag::ElseIfExpr, [
                Node::leaf(else_keyword),
                Node::leaf(if_keyword),
                condition,
                body,
            ])]);
        }

        if !else_ifs.is_leaf() {
            node.add_children([else_ifs]);
        }

        if let Some(else_keyword) = self.eat(TokenKind::Else) {
            let body = self.parse_block(Tag::ElseBody)?;
            node.add_children([Node::with_children(else_keyword.clone(), [body])]);
        }

        Ok(Some(node))
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Return:
    ///     'return' ReturnValue? ';'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the value is malformed or the terminator is missing.
    pub fn parse_return(&mut self) -> ParseResult<Node> {
        let Some(keyword) = self.eat(TokenKind::Return) else {
            return Ok(None);
        };

        let mut node = Node::with_children(Tag::ReturnExpr, [Node::leaf(keyword.clone())]);

        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(Some(node));
        }

        let value = self
            .parse_return_value()?
            .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;
        node.add_children([value]);

        self.expect(TokenKind::Semicolon)?;

        Ok(Some(node))
    }

    /// Parses a statement allowed inside a function, loop or branch body.
    ///
    /// # Errors
    /// Any error raised by the statement that applies.
    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        let statements: [Production<'a, Node>; 13] = [
            Self::parse_comment,
            Self::parse_variable_declaration,
            Self::parse_declaration_assignment,
            Self::parse_assignment,
            Self::parse_function_call,
            Self::parse_input,
            Self::parse_output,
            Self::parse_for,
            Self::parse_while,
            Self::parse_if,
            Self::parse_return,
            Self::parse_step,
            Self::parse_delete,
        ];

        self.parse_first(&statements)
    }

    /// Tries the productions in order and returns the first match.
    pub(crate) fn parse_first(&mut self, productions: &[Production<'a, Node>]) -> ParseResult<Node> {
        for production in productions {
            if let Some(node) = self.try_parse(*production)? {
                return Ok(Some(node));
            }
        }

        Ok(None)
    }

    /// Parses `{ Statement* }` into a node with the given tag.
    pub(crate) fn parse_block(&mut self, tag: Tag) -> Result<Node, Error> {
        self.expect(TokenKind::LeftBrace)?;

        let mut block = Node::tag(tag);

        while self.eat(TokenKind::RightBrace).is_none() {
            let statement = self
                .parse_statement()?
                .ok_or_else(|| self.unexpected(SyntaxKind::Statement))?;

            block.add_children([statement]);
        }

        Ok(block)
    }
}
