use std::fmt;

use serde::{Deserialize, Serialize};

/// A recovered parse diagnostic.
///
/// The parser never fails: it accumulates these in source order and keeps
/// going, so a single run reports every structural defect it can reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub line: u32,
}

impl SyntaxError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>, line: u32) -> Self {
        SyntaxError {
            expected: expected.into(),
            found: found.into(),
            line,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: expected {}, found {}",
            self.line, self.expected, self.found
        )
    }
}

/// A defect found during semantic analysis.
///
/// At most the analyzer's error cap of these are reported per run; each
/// variant is one defect kind so output stays machine-readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SemanticError {
    #[error("line {line}: duplicate declaration of '{name}' (first declared at line {first_line})")]
    DuplicateDeclaration {
        name: String,
        first_line: u32,
        line: u32,
    },

    #[error("line {line}: malformed array type for '{name}': {detail}")]
    MalformedArrayType {
        name: String,
        detail: String,
        line: u32,
    },

    #[error("line {line}: unknown type '{type_name}' in declaration of '{name}'")]
    UnknownType {
        name: String,
        type_name: String,
        line: u32,
    },

    #[error("line {line}: assignment to undeclared variable '{name}'")]
    UndeclaredVariable { name: String, line: u32 },

    #[error("line {line}: '{name}' is not an array (declared as {declared})")]
    NotAnArray {
        name: String,
        declared: String,
        line: u32,
    },

    #[error("line {line}: array '{name}' assigned without an index (declared as {declared})")]
    MissingIndex {
        name: String,
        declared: String,
        line: u32,
    },

    #[error("line {line}: index {index} is out of bounds for '{name}' ({lower}..{upper})")]
    IndexOutOfBounds {
        name: String,
        index: i64,
        lower: i64,
        upper: i64,
        line: u32,
    },

    #[error("line {line}: undeclared identifier '{name}' in expression")]
    UndeclaredIdentifier { name: String, line: u32 },
}

/// Fatal scanner failure.
///
/// Scanning happens before the recovering parser, so a character the
/// language has no token for aborts the pipeline instead of producing a
/// best-effort stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, line: u32 },
}

/// Failure reading a persisted token-code stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("line {line}: unknown token code {code}")]
    UnknownCode { code: u16, line: u32 },

    #[error("line {line}: identifier entry is missing its lexeme")]
    MissingLexeme { line: u32 },

    #[error("line {line}: unreadable token entry '{entry}'")]
    InvalidEntry { entry: String, line: u32 },
}
