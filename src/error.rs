//! Error types.

use alloc::string::String;
use thiserror::Error;

/// Detailed cause of a [`UriError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum UriErrorKind {
    /// Illegal character in the authority, unterminated IPv6 literal,
    /// or user information specified twice.
    #[error("bad authority")]
    BadAuthority,
    /// A percent sign seen inside an unfinished escape,
    /// or a non-hexadecimal character inside an escape.
    #[error("bad encoding")]
    BadEncoding,
    /// Malformed escape inside the path component.
    #[error("bad path")]
    BadPath,
    /// The asterisk-form request target `*`.
    #[error("illegal character")]
    IllegalCharacter,
    /// A template variable could not be resolved.
    #[error("template resolution error")]
    TemplateResolution,
    /// A component claimed to be fully encoded is not.
    #[error("component not encoded")]
    NotEncoded,
    /// The text is not a valid RFC 3986 URI.
    #[error("invalid URI")]
    InvalidUri,
    /// The text is not an HTTP(S) URL.
    #[error("invalid HTTP URL")]
    InvalidHttpUrl,
}

/// An error occurred when parsing, building or expanding URI components.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}: {reason}")]
pub struct UriError {
    kind: UriErrorKind,
    index: Option<usize>,
    reason: String,
}

impl UriError {
    pub(crate) fn new(kind: UriErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            index: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn at(kind: UriErrorKind, index: usize, reason: impl Into<String>) -> Self {
        Self {
            kind,
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> UriErrorKind {
        self.kind
    }

    /// Returns the byte index in the input at which the error was detected, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

pub(crate) type Result<T, E = UriError> = core::result::Result<T, E>;
