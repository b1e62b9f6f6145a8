//! This module provides the [`Input`] trait, implemented by generated property test inputs to
//! check the output produced from their source text.

use proptest::test_runner::TestCaseResult;

/// An input generated for testing purposes that knows what a correct output looks like.
///
/// Inputs are usually also [`std::fmt::Display`] so that their source text can be fed to the
/// lexer or the parser; the output is then checked against the input that produced it.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}
