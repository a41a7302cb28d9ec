//! Front-end pipeline: source or code stream -> tokens -> AST -> checks.
//!
//! This is a thin orchestrator over the scanner, parser, and analyzer.
//! Only scanning and stream decoding can fail outright; from tokens on,
//! every defect lands in the returned report instead.

use serde_json::Value;

use crate::analyzer;
use crate::ast::Program;
use crate::codes;
use crate::error::{DecodeError, ScanError, SemanticError, SyntaxError};
use crate::lexer;
use crate::parser;
use crate::token::Token;

/// Everything one run of the front end produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: Program,
    pub syntax_errors: Vec<SyntaxError>,
    pub semantic_errors: Vec<SemanticError>,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.syntax_errors.is_empty() && self.semantic_errors.is_empty()
    }

    /// JSON shape consumed by the CLI's `--output json` mode.
    pub fn to_json_value(&self) -> Value {
        serde_json::json!({
            "ok": self.is_clean(),
            "syntax_errors": self.syntax_errors,
            "semantic_errors": self.semantic_errors,
        })
    }
}

/// Run the whole front end over program source.
pub fn check_source(src: &str) -> Result<Analysis, ScanError> {
    let tokens = lexer::scan(src)?;
    Ok(check_tokens(&tokens))
}

/// Run the whole front end over a persisted token-code stream.
pub fn check_codes(text: &str) -> Result<Analysis, DecodeError> {
    let tokens = codes::read_codes(text)?;
    Ok(check_tokens(&tokens))
}

/// Parse and analyze an already-scanned token stream.
pub fn check_tokens(tokens: &[Token]) -> Analysis {
    check_tokens_with_limit(tokens, analyzer::DEFAULT_MAX_ERRORS)
}

/// Same as [`check_tokens`], with an explicit semantic error cap.
pub fn check_tokens_with_limit(tokens: &[Token], max_errors: usize) -> Analysis {
    let (program, syntax_errors) = parser::parse_program(tokens);

    // The analyzer runs even when the parse was dirty: whatever made it
    // into the AST is still worth checking.
    let semantic_errors = analyzer::analyze_with_limit(&program, max_errors);

    Analysis {
        program,
        syntax_errors,
        semantic_errors,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
