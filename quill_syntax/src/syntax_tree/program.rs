//! Contains the top-level production.

use super::{Node, Tag};
use crate::{
    error::{Error, SyntaxKind},
    parser::{Parser, Production},
};

impl<'a> Parser<'a> {
    /// Parses a whole program into a [`Tag::Program`] node.
    ///
    /// At every position the top-level productions are tried in a fixed order and the first one
    /// that applies is taken, until only the end of tokens marker is left.
    ///
    /// Syntax Synopsis:
    ///
    /// ``` ebnf
    /// Program:
    ///     (Comment | Include | Using | VariableDeclaration | DeclarationAssignment ';'
    ///     | Assignment ';' | Function | FunctionCall ';' | Input | Output
    ///     | For | While | If | Return | Class | Step ';')*
    ///     ;
    /// ```
    ///
    /// # Errors
    /// The first syntax error found; a position where no production applies is reported as an
    /// [`Error::UnexpectedSyntax`] expecting a statement.
    pub fn parse_program(&mut self) -> Result<Node, Error> {
        let productions: [Production<'a, Node>; 16] = [
            Self::parse_comment,
            Self::parse_include,
            Self::parse_using,
            Self::parse_variable_declaration,
            Self::parse_declaration_assignment,
            Self::parse_assignment,
            Self::parse_function,
            Self::parse_function_call,
            Self::parse_input,
            Self::parse_output,
            Self::parse_for,
            Self::parse_while,
            Self::parse_if,
            Self::parse_return,
            Self::parse_class,
            Self::parse_step,
        ];

        let mut program = Node::tag(Tag::Program);

        while !self.is_exhausted() {
            let node = self
                .parse_first(&productions)?
                .ok_or_else(|| self.unexpected(SyntaxKind::Statement))?;

            program.add_children([node]);
        }

        Ok(program)
    }
}
