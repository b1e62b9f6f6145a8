#![allow(clippy::future_not_send)]

//! Contains the [`SourceFile`] type used to feed source text into the lexer.

use std::{
    fmt::{Debug, Display},
    fs::File,
    ops::Range,
    path::PathBuf,
    sync::Arc,
};

use getset::Getters;
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// A source file mapped into memory.
///
/// The whole file is exposed as one newline-preserving string through [`SourceFile::content`].
/// Individual lines can be fetched for diagnostics with [`SourceFile::get_line`].
#[derive(Getters)]
pub struct SourceFile {
    source: MappedSource,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("line_count", &self.lines.len())
            .finish()
    }
}

#[self_referencing]
struct MappedSource {
    file: File,
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    mapped_str: &'this str,
}

impl MappedSource {
    fn create(file: File) -> Result<Self, Error> {
        // zero-length files cannot be mapped
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        MappedSourceTryBuilder {
            file,
            mapped,
            mapped_str_builder: |mapped| {
                mapped.as_ref().map_or(Ok(""), |mapped| {
                    std::str::from_utf8(mapped).map_err(Error::from)
                })
            },
        }
        .try_build()
    }

    fn content(&self) -> &str { self.borrow_mapped_str() }
}

impl SourceFile {
    fn new(full_path: PathBuf, source: MappedSource) -> Arc<Self> {
        let lines = get_line_byte_positions(source.content());
        Arc::new(Self {
            source,
            full_path,
            lines,
        })
    }

    /// Gets the whole text of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.source.content() }

    /// Gets the line of the source file at the given line number, without its line terminator.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let range = self.lines.get(line.checked_sub(1)?)?;

        Some(self.source.content()[range.clone()].trim_end_matches(['\n', '\r']))
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Loads the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        let source = MappedSource::create(file)?;
        Ok(Self::new(path, source))
    }

    /// Opens the file at the given path and loads it.
    ///
    /// # Errors
    /// See [`SourceFile::load`]; opening the file reports [`Error::IoError`] as well.
    pub fn open(path: PathBuf) -> Result<Arc<Self>, Error> {
        let file = File::open(&path)?;
        Self::load(file, path)
    }

    /// Creates a temporary source file and writes the given displayable object to it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("quill")
            .suffix(".cpp")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }
}

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();
    let mut bytes = text.bytes().enumerate().peekable();

    while let Some((byte, char)) = bytes.next() {
        match char {
            b'\n' => {
                results.push(current_position..byte + 1);
                current_position = byte + 1;
            }
            b'\r' => {
                // crlf counts as one terminator
                let end = if bytes.next_if(|(_, next)| *next == b'\n').is_some() {
                    byte + 2
                } else {
                    byte + 1
                };

                results.push(current_position..end);
                current_position = end;
            }
            _ => {}
        }
    }

    results.push(current_position..text.len());

    results
}

#[cfg(test)]
mod tests;
