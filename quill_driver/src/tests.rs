use std::{io::Write, path::PathBuf, process::ExitCode};

use quill_base::{
    diagnostic::Storage,
    log::{Message, Severity},
    source_file::SourceFile,
};

use crate::{process, report, run, Argument, Error, Parser};

fn argument() -> Argument {
    Argument {
        file: PathBuf::from("main.cpp"),
        tokens_only: false,
        no_tokens: false,
        verbose: false,
    }
}

fn output_of(source: &str, argument: &Argument) -> (Result<bool, Error>, String) {
    let storage: Storage<Message<String>> = Storage::new();
    let mut output = Vec::new();

    let result = process(source, argument, &mut output, &storage).map(|tree| tree.is_some());

    (result, String::from_utf8(output).unwrap())
}

const TOKENS: &str = "IntegerType int 1 1\nIdentifier x 1 5\nSemicolon ; 1 6\nNewLine \\n 1 7\nEndOfTokens  2 1\n";
const TREE: &str = "Program\n\tVarDeclExpr\n\t\tIntegerType int 1 1\n\t\tIdentifier x 1 5\n";

#[test]
fn prints_tokens_then_the_tree() {
    let (result, output) = output_of("int x;\n", &argument());

    assert!(result.unwrap());
    assert_eq!(output, format!("{TOKENS}{TREE}"));
}

#[test]
fn output_selection() {
    let (result, output) = output_of("int x;\n", &Argument {
        tokens_only: true,
        ..argument()
    });
    assert!(!result.unwrap());
    assert_eq!(output, TOKENS);

    let (result, output) = output_of("int x;\n", &Argument {
        no_tokens: true,
        ..argument()
    });
    assert!(result.unwrap());
    assert_eq!(output, TREE);
}

#[test]
fn progress_is_reported_as_information() {
    let storage: Storage<Message<String>> = Storage::new();
    let mut output = Vec::new();

    process("int x;\nint y;", &argument(), &mut output, &storage).unwrap();

    let messages = storage.into_vec();
    assert_eq!(messages.len(), 2);
    assert!(messages
        .iter()
        .all(|message| message.severity == Severity::Info));
    assert_eq!(messages[0].display, "lexed 8 tokens");
    assert_eq!(messages[1].display, "parsed 2 top-level nodes");
}

#[test]
fn syntax_error_is_reported_at_its_token() {
    let source_file = SourceFile::temp("int x").unwrap();
    let (result, output) = output_of(source_file.content(), &argument());

    // the tokens are printed before parsing starts
    assert!(output.starts_with("IntegerType int 1 1\n"));

    let error = result.unwrap_err();
    assert!(matches!(error, Error::Syntax(..)));

    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    report(&error, Some(&*source_file), &mut output, &mut diagnostics).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "error on 1 6\n");

    let diagnostics = String::from_utf8(diagnostics).unwrap();
    assert!(diagnostics.contains("expected `;`"));
    assert!(diagnostics.contains("int x"));
}

#[test]
fn lexical_error_is_reported_at_its_character() {
    let (result, output) = output_of("int\tx;", &argument());
    let error = result.unwrap_err();

    assert!(output.is_empty());
    assert!(matches!(error, Error::Lexical(..)));

    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    report(&error, None, &mut output, &mut diagnostics).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "error on 1 4\n");
    assert!(String::from_utf8(diagnostics)
        .unwrap()
        .contains("unrecognized input"));
}

#[test]
fn missing_file_has_no_location() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("missing.cpp");

    let error = Error::SourceFile {
        path: path.clone(),
        source: SourceFile::open(path).unwrap_err(),
    };
    assert_eq!(error.location(), None);

    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    report(&error, None, &mut output, &mut diagnostics).unwrap();

    assert!(output.is_empty());
    assert!(String::from_utf8(diagnostics)
        .unwrap()
        .contains("missing.cpp"));
}

#[test]
fn command_line() {
    let argument = Argument::try_parse_from(["quill", "main.cpp", "--no-tokens", "-v"]).unwrap();

    assert_eq!(argument.file, PathBuf::from("main.cpp"));
    assert!(argument.no_tokens);
    assert!(argument.verbose);
    assert!(!argument.tokens_only);

    assert!(Argument::try_parse_from(["quill"]).is_err());
    assert!(Argument::try_parse_from(["quill", "main.cpp", "--tokens-only", "--no-tokens"]).is_err());
}

#[test]
fn exit_codes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "int main() {{\n    return 0;\n}}\n").unwrap();

    assert_eq!(
        run(&Argument {
            file: file.path().to_owned(),
            no_tokens: true,
            ..argument()
        }),
        ExitCode::SUCCESS
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "int main() {{\n    return 0;\n").unwrap();

    assert_eq!(
        run(&Argument {
            file: file.path().to_owned(),
            no_tokens: true,
            ..argument()
        }),
        ExitCode::FAILURE
    );

    let directory = tempfile::tempdir().unwrap();
    assert_eq!(
        run(&Argument {
            file: directory.path().join("missing.cpp"),
            ..argument()
        }),
        ExitCode::FAILURE
    );
}
