//! Error types shared by the lexer and the parser.
//!
//! Errors are fatal to the classification session, never to the input: the
//! partial stream already delivered to the sink remains valid, and garbage
//! input on its own never produces an error (see the crate docs).

use std::{error::Error as StdError, fmt};

/// An error raised while classifying a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// One of the two bounded stacks overflowed, a close token arrived with
    /// nothing open, or the stream ended with open brackets on the stack.
    Stack,
    /// The parser failed to advance twice in a row on the same token.
    NoProgress,
    /// The lexer was asked to resolve a `/` under [`InputElement::Neutral`],
    /// i.e. the caller claimed a slash could not appear here.
    ///
    /// [`InputElement::Neutral`]: crate::lexer::InputElement::Neutral
    AmbiguousSlash,
    /// An internal assertion failed; indicates a bug in the parser.
    Internal,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack => f.write_str("bracket or parse stack did not balance"),
            Self::NoProgress => f.write_str("parser failed to advance"),
            Self::AmbiguousSlash => f.write_str("ambiguous slash outside of a value context"),
            Self::Internal => f.write_str("internal parser error"),
        }
    }
}

impl StdError for Error {}
