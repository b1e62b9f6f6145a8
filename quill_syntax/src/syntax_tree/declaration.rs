//! Contains the declaration productions: includes, `using`, variables, assignments, functions
//! and classes.

use quill_lexical::token::{Token, TokenKind};

use super::{Node, Tag};
use crate::{
    error::{DuplicateMember, Error, SyntaxKind, UniqueMember},
    parser::{ParseResult, Parser},
};

impl<'a> Parser<'a> {
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Include:
    ///     '#include' ('<' LibraryName '>' | Header)
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: `#include` is not followed by a library or header name.
    pub fn parse_include(&mut self) -> ParseResult<Node> {
        let Some(directive) = self.eat(TokenKind::IncludeDirective) else {
            return Ok(None);
        };

        let name = if let Some(header) = self.eat(TokenKind::Header) {
            Node::with_children(Tag::HeaderExpr, [Node::leaf(header.clone())])
        } else {
            let open = self.expect(TokenKind::Less)?;
            let mut library = Node::with_children(Tag::LibraryExpr, [Node::leaf(open.clone())]);

            if self.peek_kind() == TokenKind::Greater {
                return Err(self.unexpected(SyntaxKind::Token(TokenKind::Identifier)));
            }

            while !matches!(self.peek_kind(), TokenKind::Greater | TokenKind::EndOfTokens) {
                library.add_children([Node::leaf(self.next_token().clone())]);
            }

            let close = self.expect(TokenKind::Greater)?;
            library.add_children([Node::leaf(close.clone())]);

            library
        };

        Ok(Some(Node::with_children(Tag::IncludeExpr, [
            Node::leaf(directive.clone()),
            name,
        ])))
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Using:
    ///     'using' 'namespace' Identifier ';'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the statement is incomplete.
    pub fn parse_using(&mut self) -> ParseResult<Node> {
        let Some(using) = self.eat(TokenKind::Using) else {
            return Ok(None);
        };

        let namespace = self.expect(TokenKind::Namespace)?.clone();
        let identifier = self.parse_identifier()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Some(Node::with_children(Tag::UsingExpr, [
            Node::leaf(using.clone()),
            Node::leaf(namespace),
            Node::leaf(identifier),
        ])))
    }

    /// Returns `true` if a type followed by a declared name starts at the cursor. A type is a
    /// built-in type keyword or the name of a user type.
    fn starts_typed_name(&self) -> bool {
        let kind = self.peek_kind();

        (kind.is_type_keyword() || kind == TokenKind::Identifier)
            && self.peek_offset(1).kind() == TokenKind::Identifier
    }

    /// Consumes a type: a built-in type keyword or an identifier naming a user type.
    fn parse_type(&mut self) -> Result<Token, Error> {
        let kind = self.peek_kind();

        if kind.is_type_keyword() || kind == TokenKind::Identifier {
            Ok(self.next_token().clone())
        } else {
            Err(self.unexpected(SyntaxKind::Type))
        }
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// VariableDeclaration:
    ///     Type Identifier ';'
    ///     ;
    /// ```
    ///
    /// Applies to a type and a name not followed by `=` or `(`.
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the declaration is not terminated by `;`.
    pub fn parse_variable_declaration(&mut self) -> ParseResult<Node> {
        if !self.starts_typed_name()
            || matches!(
                self.peek_offset(2).kind(),
                TokenKind::Equal | TokenKind::LeftParen
            )
        {
            return Ok(None);
        }

        let ty = self.parse_type()?;
        let identifier = self.parse_identifier()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Some(Node::with_children(Tag::VarDeclExpr, [
            Node::leaf(ty),
            Node::leaf(identifier),
        ])))
    }

    /// Parses a declaration with an initializer, without its terminator.
    ///
    /// The initializer has to fit the declared type: an arithmetic expression for numeric
    /// types, a string expression for `string`, a logical expression for `bool` and a character
    /// literal for `char`. A user type takes any value.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// DeclarationAssignment:
    ///     Type Identifier '=' Value
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the initializer is missing or does not fit the type.
    pub fn parse_declaration_assignment_expression(
        &mut self,
        terminators: &[TokenKind],
    ) -> ParseResult<Node> {
        if !self.starts_typed_name() || self.peek_offset(2).kind() != TokenKind::Equal {
            return Ok(None);
        }

        let ty = self.parse_type()?;
        let identifier = self.parse_identifier()?;
        let equal = self.expect(TokenKind::Equal)?.clone();

        let value = match ty.kind() {
            TokenKind::IntegerType | TokenKind::FloatType | TokenKind::Unsigned => {
                self.parse_arithm_expr()?
            }
            TokenKind::String => self.parse_string_expr()?,
            TokenKind::Bool => self.parse_logical_expr()?,
            TokenKind::Char => self.parse_char_literal()?,
            _ => self.parse_value(terminators)?,
        }
        .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;

        let left_hand_side = Node::with_children(Tag::Lhs, [Node::leaf(ty), Node::leaf(identifier)]);

        Ok(Some(Node::with_children(Tag::AssignExpr, [Node::with_children(
            equal,
            [left_hand_side, value],
        )])))
    }

    /// Parses an assignment to a variable, without its terminator.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Assignment:
    ///     Identifier AssignmentOperator Value
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the value is missing or not followed by a terminator.
    pub fn parse_assignment_expression(&mut self, terminators: &[TokenKind]) -> ParseResult<Node> {
        if self.peek_kind() != TokenKind::Identifier
            || !self.peek_offset(1).kind().is_assignment_operator()
        {
            return Ok(None);
        }

        let identifier = self.next_token().clone();
        let operator = self.next_token().clone();
        let value = self
            .parse_value(terminators)?
            .ok_or_else(|| self.unexpected(SyntaxKind::Expression))?;

        Ok(Some(Node::with_children(Tag::AssignExpr, [Node::with_children(
            operator,
            [Node::leaf(identifier), value],
        )])))
    }

    /// Parses a declaration with an initializer followed by `;`.
    ///
    /// # Errors
    /// See [`Self::parse_declaration_assignment_expression`].
    pub fn parse_declaration_assignment(&mut self) -> ParseResult<Node> {
        self.terminated(|parser| {
            parser.parse_declaration_assignment_expression(&[TokenKind::Semicolon])
        })
    }

    /// Parses an assignment followed by `;`.
    ///
    /// # Errors
    /// See [`Self::parse_assignment_expression`].
    pub fn parse_assignment(&mut self) -> ParseResult<Node> {
        self.terminated(|parser| parser.parse_assignment_expression(&[TokenKind::Semicolon]))
    }

    /// Runs a production and expects `;` after it if it matched.
    pub(crate) fn terminated(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let Some(node) = f(self)? else {
            return Ok(None);
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(Some(node))
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Parameters:
    ///     '(' (Type Identifier (',' Type Identifier)*)? ')'
    ///     ;
    /// ```
    fn parse_parameters(&mut self) -> Result<Node, Error> {
        self.expect(TokenKind::LeftParen)?;

        let mut parameters = Node::tag(Tag::Parameters);

        if self.eat(TokenKind::RightParen).is_some() {
            return Ok(parameters);
        }

        loop {
            let ty = self.parse_type()?;
            let identifier = self.parse_identifier()?;

            parameters.add_children([Node::with_children(Tag::DeclExpr, [
                Node::leaf(ty),
                Node::leaf(identifier),
            ])]);

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        self.expect(TokenKind::RightParen)?;

        Ok(parameters)
    }

    /// Parses a function declaration or definition.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Function:
    ///     (Type | 'void') Identifier Parameters (';' | '{' Statement* '}')
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the parameter list or the body is malformed.
    pub fn parse_function(&mut self) -> ParseResult<Node> {
        let kind = self.peek_kind();

        if !(kind.is_type_keyword() || matches!(kind, TokenKind::Void | TokenKind::Identifier))
            || self.peek_offset(1).kind() != TokenKind::Identifier
            || self.peek_offset(2).kind() != TokenKind::LeftParen
        {
            return Ok(None);
        }

        let return_type = self.next_token().clone();
        let identifier = self.parse_identifier()?;
        let parameters = self.parse_parameters()?;

        let mut function = Node::with_children(Tag::FuncDeclExpr, [
            Node::leaf(return_type),
            Node::leaf(identifier),
            parameters,
        ]);

        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(Some(function));
        }

        if self.peek_kind() != TokenKind::LeftBrace {
            return Err(self.unexpected(SyntaxKind::Token(TokenKind::LeftBrace)));
        }

        let body = self.parse_block(Tag::FuncBody)?;
        let (_, children) = function.dissolve();
        function = Node::with_children(Tag::FuncDefExpr, children);
        function.add_children([body]);

        Ok(Some(function))
    }

    /// Parses a class forward declaration or definition.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Class:
    ///     ('class' | 'struct') Identifier (';' | '{' Member* '}' ';'?)
    ///     ;
    /// ```
    ///
    /// # Errors
    /// - [`Error::UnexpectedSyntax`]: the name or the body is malformed.
    /// - [`Error::DuplicateMember`]: the body has a second constructor or destructor.
    pub fn parse_class(&mut self) -> ParseResult<Node> {
        let Some(keyword) = self
            .eat(TokenKind::Class)
            .or_else(|| self.eat(TokenKind::Struct))
        else {
            return Ok(None);
        };

        let identifier = self.parse_identifier()?;

        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(Some(Node::with_children(Tag::ClassDeclExpr, [
                Node::leaf(keyword.clone()),
                Node::leaf(identifier),
            ])));
        }

        self.expect(TokenKind::LeftBrace)?;

        let mut body = Node::tag(Tag::ClassBody);
        let mut has_constructor = false;
        let mut has_destructor = false;

        while self.eat(TokenKind::RightBrace).is_none() {
            let member = if self.peek_kind() == TokenKind::Identifier
                && self.peek().text() == identifier.text()
                && self.peek_offset(1).kind() == TokenKind::LeftParen
            {
                if has_constructor {
                    return Err(DuplicateMember {
                        member: UniqueMember::Constructor,
                        found: self.peek().clone(),
                    }
                    .into());
                }

                has_constructor = true;
                self.parse_constructor()?
            } else if self.peek_kind() == TokenKind::Tilde {
                if has_destructor {
                    return Err(DuplicateMember {
                        member: UniqueMember::Destructor,
                        found: self.peek().clone(),
                    }
                    .into());
                }

                has_destructor = true;
                self.parse_destructor(&identifier)?
            } else {
                self.parse_member()?
                    .ok_or_else(|| self.unexpected(SyntaxKind::Member))?
            };

            body.add_children([member]);
        }

        self.eat(TokenKind::Semicolon);

        Ok(Some(Node::with_children(Tag::ClassDefExpr, [
            Node::leaf(keyword.clone()),
            Node::leaf(identifier),
            body,
        ])))
    }

    /// Parses an access specifier label, a nested class, a method or a field.
    fn parse_member(&mut self) -> ParseResult<Node> {
        if let Some(specifier) = self.eat(TokenKind::AccessSpecifier) {
            self.expect(TokenKind::Colon)?;

            return Ok(Some(Node::with_children(Tag::AccessSpecExpr, [Node::leaf(
                specifier.clone(),
            )])));
        }

        if let Some(comment) = self.parse_comment()? {
            return Ok(Some(comment));
        }

        if let Some(class) = self.parse_class()? {
            return Ok(Some(class));
        }

        if let Some(function) = self.parse_function()? {
            return Ok(Some(function));
        }

        if let Some(field) = self.parse_variable_declaration()? {
            return Ok(Some(field));
        }

        self.parse_declaration_assignment()
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Constructor:
    ///     ClassName Parameters '{' (Assignment ';')* '}'
    ///     ;
    /// ```
    fn parse_constructor(&mut self) -> Result<Node, Error> {
        let identifier = self.parse_identifier()?;
        let parameters = self.parse_parameters()?;

        let mut constructor =
            Node::with_children(Tag::ClassConstrExpr, [Node::leaf(identifier), parameters]);

        self.expect(TokenKind::LeftBrace)?;

        while self.eat(TokenKind::RightBrace).is_none() {
            let assignment = self
                .parse_assignment()?
                .ok_or_else(|| self.unexpected(SyntaxKind::Assignment))?;

            constructor.add_children([assignment]);
        }

        Ok(constructor)
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Destructor:
    ///     '~' ClassName '(' ')' '{' Delete* '}'
    ///     ;
    /// ```
    fn parse_destructor(&mut self, class_name: &Token) -> Result<Node, Error> {
        let tilde = self.expect(TokenKind::Tilde)?.clone();

        if self.peek_kind() != TokenKind::Identifier || self.peek().text() != class_name.text() {
            return Err(self.unexpected(SyntaxKind::Member));
        }

        let identifier = self.parse_identifier()?;
        self.expect(TokenKind::LeftParen)?;
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::LeftBrace)?;

        let mut destructor =
            Node::with_children(Tag::ClassDestrExpr, [Node::leaf(tilde), Node::leaf(identifier)]);

        while self.eat(TokenKind::RightBrace).is_none() {
            let delete = self
                .parse_delete()?
                .ok_or_else(|| self.unexpected(SyntaxKind::Token(TokenKind::Delete)))?;

            destructor.add_children([delete]);
        }

        Ok(destructor)
    }

    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Delete:
    ///     'delete' BracketOperator? Identifier ';'
    ///     ;
    /// ```
    ///
    /// # Errors
    /// [`Error::UnexpectedSyntax`]: the operand or the terminator is missing.
    pub fn parse_delete(&mut self) -> ParseResult<Node> {
        let Some(delete) = self.eat(TokenKind::Delete) else {
            return Ok(None);
        };

        let mut node = Node::with_children(Tag::DeleteExpr, [Node::leaf(delete.clone())]);

        if let Some(brackets) = self.eat(TokenKind::BracketOperator) {
            node.add_children([Node::leaf(brackets.clone())]);
        }

        node.add_children([Node::leaf(self.parse_identifier()?)]);
        self.expect(TokenKind::Semicolon)?;

        Ok(Some(node))
    }
}

#[cfg(test)]
mod tests;
