// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

use crate::key::KeyPath;
use crate::value::Kind;

/// The main error type for building and querying TOME documents.
///
/// Construction errors (`DuplicateKey`, `MixedArrayType`) abort a build.
/// Lookup errors (`KeyError`, `TypeMismatch`, `OutOfRange`) only concern the
/// accessor call that produced them. The front-end variants are here so a
/// parser feeding the builder can report through the same type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TomeError {
    #[error("[TOME] Syntax Error at {line}:{column}: {message}")]
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("[TOME] Invalid escape sequence '{text}'")]
    InvalidEscapeSequence { text: String },

    #[error("[TOME] Invalid unicode character U+{codepoint:04X}")]
    InvalidUnicodeCharacter { codepoint: u32 },

    #[error("[TOME] Invalid date format '{text}'")]
    InvalidDateFormat { text: String },

    /// Raised when a key is bound twice, or when a path tunnels through a
    /// value that is not a table.
    #[error("[TOME] Duplicate key '{path}'")]
    DuplicateKey { path: KeyPath },

    #[error("[TOME] Mixed array types at '{path}': expected {expected}, found {found}")]
    MixedArrayType {
        path: KeyPath,
        expected: Kind,
        found: Kind,
    },

    #[error("[TOME] Key path must not be empty")]
    EmptyKeyPath,

    #[error("[TOME] Invalid key path '{text}'")]
    InvalidKeyPath { text: String },

    #[error("[TOME] Path '{path}' not found in document")]
    KeyError { path: KeyPath },

    #[error("[TOME] Type Error at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: KeyPath,
        expected: Kind,
        found: Kind,
    },

    #[error("[TOME] Integer {value} at '{path}' out of range for {target}")]
    OutOfRange {
        path: KeyPath,
        value: i64,
        target: &'static str,
    },

    #[error("[TOME] Export Error: {message}")]
    Export { message: String },
}

impl TomeError {
    /// Stable numeric code, grouped by family: 2xx front end, 3xx structure
    /// and lookup, 4xx typing, 5xx export.
    pub fn code(&self) -> u32 {
        match self {
            TomeError::SyntaxError { .. } => 201,
            TomeError::InvalidEscapeSequence { .. } => 202,
            TomeError::InvalidUnicodeCharacter { .. } => 203,
            TomeError::InvalidDateFormat { .. } => 204,
            TomeError::DuplicateKey { .. } => 301,
            TomeError::MixedArrayType { .. } => 302,
            TomeError::EmptyKeyPath => 303,
            TomeError::KeyError { .. } => 304,
            TomeError::InvalidKeyPath { .. } => 305,
            TomeError::TypeMismatch { .. } => 401,
            TomeError::OutOfRange { .. } => 403,
            TomeError::Export { .. } => 500,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TomeError::InvalidDateFormat { .. } => {
                Some("Use YYYY-MM-DD, optionally followed by THH:MM:SS and an offset")
            }
            TomeError::DuplicateKey { .. } => Some("Each key may only be defined once per table"),
            TomeError::MixedArrayType { .. } => Some("All elements of an array must have the same type"),
            TomeError::KeyError { .. } => Some("Check that the path exists in your document"),
            TomeError::InvalidKeyPath { .. } => Some("Key path segments must not be empty"),
            TomeError::TypeMismatch { .. } => Some("Request the value with the accessor for its type"),
            _ => None,
        }
    }

    /// True when the error comes from a lookup that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TomeError::KeyError { .. })
    }
}

/// A failed narrowing of a [`Value`](crate::Value), before any path is known.
///
/// The accessor layer turns this into [`TomeError::TypeMismatch`] or
/// [`TomeError::OutOfRange`] with the path attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: Kind, found: Kind },

    #[error("integer {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },
}

impl ConversionError {
    pub(crate) fn at(self, path: KeyPath) -> TomeError {
        match self {
            ConversionError::Mismatch { expected, found } => TomeError::TypeMismatch {
                path,
                expected,
                found,
            },
            ConversionError::OutOfRange { value, target } => TomeError::OutOfRange {
                path,
                value,
                target,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, TomeError>;
