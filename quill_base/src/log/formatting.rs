//! ANSI escape sequences for decorating console output.

use std::fmt::Display;

/// A text decoration, either a style or a foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Decoration {
    Bold,
    Underline,
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Decoration {
    /// Wraps the given displayable object so that it is printed with this decoration.
    pub fn with<T>(self, display: T) -> Decorated<T> {
        Decorated {
            decoration: self,
            display,
        }
    }

    fn escape_code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Cyan => "\x1B[36m",
        }
    }
}

/// A displayable object with a [`Decoration`] applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decorated<T> {
    /// The decoration applied to the displayable object.
    pub decoration: Decoration,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for Decorated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.decoration.escape_code(), self.display)
    }
}
