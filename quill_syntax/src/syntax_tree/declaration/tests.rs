use std::fmt::Display;

use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, proptest,
    strategy::{BoxedStrategy, Strategy},
    test_runner::TestCaseResult,
};
use quill_lexical::token::TokenKind;
use quill_test::input::Input;

use crate::{
    error::{SyntaxKind, UniqueMember},
    syntax_tree::{
        expression::tests::{Arithmetic, Operand},
        tests::{self, parse_program, shape},
        Node, Tag,
    },
};

/// Represents an input for a numeric variable declaration with an optional initializer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Declaration {
    ty: &'static str,
    name: Operand,
    initializer: Option<Arithmetic>,
}

impl Arbitrary for Declaration {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            proptest::sample::select(&["int", "long", "float", "double", "unsigned"][..]),
            Operand::identifier(),
            proptest::option::of(Arithmetic::arbitrary()),
        )
            .prop_map(|(ty, name, initializer)| Self {
                ty,
                name,
                initializer,
            })
            .boxed()
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;

        if let Some(initializer) = &self.initializer {
            write!(f, " = {initializer}")?;
        }

        f.write_str(";")
    }
}

impl Input<&Node> for &Declaration {
    fn assert(self, output: &Node) -> TestCaseResult {
        let assert_typed_name = |node: &Node| -> TestCaseResult {
            prop_assert_eq!(node.children().len(), 2);
            prop_assert_eq!(
                node.children()[0].token().map(|token| token.text().as_str()),
                Some(self.ty)
            );
            (&self.name).assert(&node.children()[1])
        };

        match &self.initializer {
            None => {
                prop_assert_eq!(output.tag_of(), Some(Tag::VarDeclExpr));
                assert_typed_name(output)
            }
            Some(initializer) => {
                prop_assert_eq!(output.tag_of(), Some(Tag::AssignExpr));

                let assignment = &output.children()[0];
                prop_assert_eq!(assignment.token().map(|token| token.kind()), Some(TokenKind::Equal));

                let left_hand_side = &assignment.children()[0];
                prop_assert_eq!(left_hand_side.tag_of(), Some(Tag::Lhs));
                assert_typed_name(left_hand_side)?;

                let value = &assignment.children()[1];
                prop_assert_eq!(value.tag_of(), Some(Tag::ArithmExpr));
                initializer.assert(&value.children()[0])
            }
        }
    }
}

proptest! {
    #[test]
    fn declaration_test(input in Declaration::arbitrary()) {
        let program = tests::parse(&input, |parser| parser.parse_program().map(Some))?;

        prop_assert_eq!(program.children().len(), 1);
        input.assert(&program.children()[0])?;
    }
}

fn first_statement(source: &str) -> String {
    let program = parse_program(source).unwrap();

    assert_eq!(program.children().len(), 1, "{program}");
    shape(&program.children()[0])
}

#[test]
fn variable_declarations() {
    assert_eq!(first_statement("int x;"), "VarDeclExpr[int x]");
    assert_eq!(first_statement("Foo f;"), "VarDeclExpr[Foo f]");
    assert_eq!(first_statement("unsigned count ;"), "VarDeclExpr[unsigned count]");
}

#[test]
fn initializer_follows_the_declared_type() {
    assert_eq!(
        first_statement("int x = 1+2;"),
        "AssignExpr[=[LHS[int x] ArithmExpr[+[1 2]]]]"
    );
    assert_eq!(
        first_statement("string s = \"a\" + b;"),
        "AssignExpr[=[LHS[string s] StringExpr[+[\"a\" b]]]]"
    );
    assert_eq!(
        first_statement("bool ok = a < b && c;"),
        "AssignExpr[=[LHS[bool ok] LogicalExpr[&&[<[a b] c]]]]"
    );
    assert_eq!(first_statement("char c = 'x';"), "AssignExpr[=[LHS[char c] 'x']]");
    assert_eq!(
        first_statement("Foo f = g;"),
        "AssignExpr[=[LHS[Foo f] ArithmExpr[g]]]"
    );
}

#[test]
fn mistyped_initializer() {
    let error = parse_program("int x = \"s\";")
        .unwrap_err()
        .into_unexpected_syntax()
        .unwrap();

    assert_eq!(error.expected, SyntaxKind::Expression);
    assert_eq!(error.found.kind(), TokenKind::StringConst);

    assert!(parse_program("char c = 1;").is_err());
}

#[test]
fn compound_assignment() {
    assert_eq!(
        first_statement("x += y * 2;"),
        "AssignExpr[+=[x ArithmExpr[*[y 2]]]]"
    );
    assert_eq!(first_statement("x = 'a';"), "AssignExpr[=[x 'a']]");
}

#[test]
fn includes() {
    assert_eq!(
        first_statement("#include <stdio.h>"),
        "IncludeExpr[#include LibraryExpr[< stdio . h >]]"
    );
    assert_eq!(
        first_statement("#include \"util.h\""),
        "IncludeExpr[#include HeaderExpr[\"util.h\"]]"
    );

    let error = parse_program("#include <>").unwrap_err().into_unexpected_syntax().unwrap();
    assert_eq!(error.expected, SyntaxKind::Token(TokenKind::Identifier));
}

#[test]
fn using_namespace() {
    assert_eq!(first_statement("using namespace std;"), "UsingExpr[using namespace std]");
    assert!(parse_program("using std;").is_err());
}

#[test]
fn function_declaration_and_definition() {
    assert_eq!(
        first_statement("int add(int a, int b);"),
        "FuncDeclExpr[int add Parameters[DeclExpr[int a] DeclExpr[int b]]]"
    );
    assert_eq!(
        first_statement("void run() { return; }"),
        "FuncDefExpr[void run Parameters FuncBody[ReturnExpr[return]]]"
    );

    let error = parse_program("int f(int a) return;").unwrap_err().into_unexpected_syntax().unwrap();
    assert_eq!(error.expected, SyntaxKind::Token(TokenKind::LeftBrace));
}

#[test]
fn class_definition() {
    let source = "class Point {\npublic:\n    Point(int a) { x = a; }\n    ~Point() { delete[] \
                  data; }\n    int x;\n    int get() { return x; }\n};\n";

    assert_eq!(
        first_statement(source),
        "ClassDefExpr[class Point ClassBody[AccessSpecExpr[public] ClassConstrExpr[Point \
         Parameters[DeclExpr[int a]] AssignExpr[=[x ArithmExpr[a]]]] ClassDestrExpr[~ Point \
         DeleteExpr[delete [] data]] VarDeclExpr[int x] FuncDefExpr[int get Parameters \
         FuncBody[ReturnExpr[return x]]]]]"
    );
}

#[test]
fn class_forms() {
    assert_eq!(first_statement("struct Node;"), "ClassDeclExpr[struct Node]");
    assert_eq!(
        first_statement("struct Pair { int a; int b; }"),
        "ClassDefExpr[struct Pair ClassBody[VarDeclExpr[int a] VarDeclExpr[int b]]]"
    );
    assert_eq!(
        first_statement("class Outer { class Inner; };"),
        "ClassDefExpr[class Outer ClassBody[ClassDeclExpr[class Inner]]]"
    );
}

#[test]
fn unique_members() {
    let error = parse_program("class A { A() {} A() {} };")
        .unwrap_err()
        .into_duplicate_member()
        .unwrap();
    assert_eq!(error.member, UniqueMember::Constructor);
    assert_eq!(error.found.location().column, 18);

    let error = parse_program("class A { ~A() {} ~A() {} };")
        .unwrap_err()
        .into_duplicate_member()
        .unwrap();
    assert_eq!(error.member, UniqueMember::Destructor);
}

#[test]
fn class_member_restrictions() {
    // constructor bodies only hold assignments
    assert!(parse_program("class A { A() { return; } };").is_err());

    // destructor has to be named after the class
    let error = parse_program("class A { ~B() {} };")
        .unwrap_err()
        .into_unexpected_syntax()
        .unwrap();
    assert_eq!(error.expected, SyntaxKind::Member);

    let error = parse_program("class A { cin >> x; };")
        .unwrap_err()
        .into_unexpected_syntax()
        .unwrap();
    assert_eq!(error.expected, SyntaxKind::Member);
}
