//! Recursive-descent parser with panic-mode recovery.
//!
//! Parsing never aborts: each structural defect is recorded as a
//! [`SyntaxError`] and the cursor skips forward to a synchronization
//! token chosen at the call site, then parsing resumes. One run yields
//! every reachable defect in source order plus a best-effort AST of
//! whatever parsed cleanly -- malformed regions are dropped from the
//! tree, never patched with placeholders.

use crate::ast::Program;
use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};

mod decls;
mod exprs;
mod stmts;

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

/// Parse a token stream into a program plus all syntax errors, in
/// source order. The stream may close with an explicit `Eof` token or
/// simply stop short; both read the same.
pub fn parse_program(tokens: &[Token]) -> (Program, Vec<SyntaxError>) {
    let mut p = Parser::new(tokens);
    let program = p.parse_whole_program();
    (program, p.errors)
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    // -- Token cursor -------------------------------------------

    /// Current token kind; an exhausted stream reads as `Eof`.
    fn peek(&self) -> TokenKind {
        self.tokens.get(self.pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Line of the current token, or of the last token once the stream
    /// is exhausted.
    fn cur_line(&self) -> u32 {
        match self.tokens.get(self.pos) {
            Some(t) => t.line,
            None => self.tokens.last().map_or(1, |t| t.line),
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Take the current identifier's name and step past it. Callers
    /// check for `Ident` first.
    fn take_ident(&mut self) -> String {
        let name = self
            .tokens
            .get(self.pos)
            .and_then(|t| t.lexeme.clone())
            .unwrap_or_default();
        self.advance();
        name
    }

    // -- Diagnostics and recovery -------------------------------

    /// Describe the current token for an error message.
    fn found(&self) -> String {
        self.tokens
            .get(self.pos)
            .map_or_else(|| "end of input".to_owned(), |t| t.describe())
    }

    /// Record a syntax error at the current position.
    ///
    /// Once the input is exhausted every remaining expectation fails
    /// the same way, so only the first end-of-input report is kept.
    fn error(&mut self, expected: impl Into<String>) {
        let found = self.found();
        if found == "end of input" {
            if let Some(last) = self.errors.last() {
                if last.found == "end of input" {
                    return;
                }
            }
        }
        let line = self.cur_line();
        self.errors.push(SyntaxError::new(expected, found, line));
    }

    /// Skip forward until the cursor sits on one of `kinds`, or the end.
    fn synchronize(&mut self, kinds: &[TokenKind]) {
        while !self.at_eof() && !kinds.contains(&self.peek()) {
            self.advance();
        }
    }

    /// Require `kind` at the cursor. On a match it is consumed; on a
    /// mismatch an error is recorded and the cursor skips to `follow`
    /// (or to `kind` itself, which is then consumed). Returns whether
    /// `kind` was ultimately seen.
    fn expect(&mut self, kind: TokenKind, expected: &str, follow: &[TokenKind]) -> bool {
        if self.at(kind) {
            self.advance();
            return true;
        }
        self.error(expected);
        let mut sync = Vec::with_capacity(follow.len() + 1);
        sync.extend_from_slice(follow);
        sync.push(kind);
        self.synchronize(&sync);
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // -- Program structure --------------------------------------

    fn parse_whole_program(&mut self) -> Program {
        let mut program = Program {
            declarations: Vec::new(),
            statements: Vec::new(),
        };

        self.parse_header();
        self.skip_const_sections();
        self.parse_var_section(&mut program.declarations);
        self.skip_const_sections();
        self.parse_main_block(&mut program.statements);

        // Anything after the closing 'end.' is one error, not a cascade.
        if !self.at_eof() {
            self.error("end of input after 'end.'");
            while !self.at_eof() {
                self.advance();
            }
        }
        program
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
