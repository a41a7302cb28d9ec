//! minipas-core: Mini-Pascal front end core library.
//!
//! Provides the pipeline from program source (or a persisted token-code
//! stream) through scanning, recovering parsing, and semantic analysis.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`check_source()`] / [`check_codes()`] -- run the full pipeline
//! - [`Analysis`] -- combined report of one run
//! - [`SyntaxError`] / [`SemanticError`] -- the two diagnostic kinds
//! - [`SymbolTable`] / [`TypeInfo`] -- analyzer output
//! - AST types: [`Program`], [`VarDecl`], [`Stmt`], [`Expr`], [`TypeSpec`]
//!
//! Individual stage entry functions are also re-exported for selective
//! pipeline execution.

pub mod analyzer;
pub mod ast;
pub mod codes;
pub mod error;
pub mod frontend;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod token;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{BinOp, Expr, Program, Stmt, TypeSpec, VarDecl};
pub use error::{DecodeError, ScanError, SemanticError, SyntaxError};
pub use frontend::Analysis;
pub use symbols::{Symbol, SymbolTable, TypeInfo};
pub use token::{Token, TokenKind};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use analyzer::{analyze, analyze_with_limit, DEFAULT_MAX_ERRORS};
pub use codes::{read_codes, write_codes};
pub use frontend::{check_codes, check_source, check_tokens, check_tokens_with_limit};
pub use lexer::scan;
pub use parser::parse_program;
