use std::path::PathBuf;

use super::{get_line_byte_positions, Error, SourceFile};

#[test]
fn line_ranges_include_every_terminator_kind() {
    let text = "int x;\nx = 1;\r\n//\rcout";
    let byte_positions = get_line_byte_positions(text);
    assert_eq!(byte_positions, vec![0..7, 7..15, 15..18, 18..22]);
}

#[test]
fn temp_file_round_trips_content() {
    const SOURCE: &str = "int main() {\n\treturn 0;\n}\n";
    let source_file = SourceFile::temp(SOURCE).unwrap();

    assert_eq!(source_file.content(), SOURCE);
    assert_eq!(source_file.line_count(), 4);
    assert_eq!(source_file.get_line(1), Some("int main() {"));
    assert_eq!(source_file.get_line(2), Some("\treturn 0;"));
    assert_eq!(source_file.get_line(4), Some(""));
    assert_eq!(source_file.get_line(0), None);
    assert_eq!(source_file.get_line(5), None);
}

#[test]
fn empty_file_is_loadable() {
    let source_file = SourceFile::temp("").unwrap();

    assert_eq!(source_file.content(), "");
    assert_eq!(source_file.line_count(), 1);
}

#[test]
fn missing_file_reports_io_error() {
    let result = SourceFile::open(PathBuf::from("/definitely/not/here.cpp"));

    assert!(matches!(result, Err(Error::IoError(..))));
}
