//! Persisted token-code stream -- the numeric wire format classified
//! token streams travel through between scanning and parsing.
//!
//! Entries are space-separated numeric codes, `code:lexeme` for
//! identifiers. Multi-digit literals are exploded into one code per digit
//! (the parser reassembles the run). Entries are grouped one text line
//! per source line so the reader can restore exact line numbers.

use crate::error::DecodeError;
use crate::token::{Token, TokenKind};

/// Render a token stream as a code file. The EOF sentinel is not written.
pub fn write_codes(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line: u32 = 1;
    let mut line_has_entries = false;

    for token in tokens {
        let code = match token.kind.code() {
            Some(c) => c,
            None => continue,
        };
        while line < token.line {
            out.push('\n');
            line += 1;
            line_has_entries = false;
        }
        if line_has_entries {
            out.push(' ');
        }
        match token.kind {
            TokenKind::Ident => {
                out.push_str(&code.to_string());
                out.push(':');
                out.push_str(token.lexeme.as_deref().unwrap_or(""));
            }
            TokenKind::Digit(_) => match &token.lexeme {
                Some(text) => {
                    for (i, b) in text.bytes().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        let digit_code = 21 + u16::from(b - b'0');
                        out.push_str(&digit_code.to_string());
                    }
                }
                None => out.push_str(&code.to_string()),
            },
            _ => out.push_str(&code.to_string()),
        }
        line_has_entries = true;
    }

    if line_has_entries {
        out.push('\n');
    }
    out
}

/// Read a code file back into a token stream, appending an EOF sentinel.
///
/// Only identifier entries may carry a lexeme; every other decorated or
/// unparseable entry is rejected rather than guessed at.
pub fn read_codes(text: &str) -> Result<Vec<Token>, DecodeError> {
    let mut tokens = Vec::new();
    let mut last_line: u32 = 1;

    for (idx, line_text) in text.lines().enumerate() {
        let line = idx as u32 + 1;
        last_line = line;
        for entry in line_text.split_whitespace() {
            let (code_text, lexeme) = match entry.split_once(':') {
                Some((c, l)) => (c, Some(l)),
                None => (entry, None),
            };
            let code: u16 = code_text.parse().map_err(|_| DecodeError::InvalidEntry {
                entry: entry.to_owned(),
                line,
            })?;
            let kind =
                TokenKind::from_code(code).ok_or(DecodeError::UnknownCode { code, line })?;
            let token = match kind {
                TokenKind::Ident => match lexeme {
                    Some(name) if !name.is_empty() => Token::ident(name, line),
                    _ => return Err(DecodeError::MissingLexeme { line }),
                },
                _ => {
                    if lexeme.is_some() {
                        return Err(DecodeError::InvalidEntry {
                            entry: entry.to_owned(),
                            line,
                        });
                    }
                    Token::new(kind, line)
                }
            };
            tokens.push(token);
        }
    }

    tokens.push(Token::eof(last_line));
    Ok(tokens)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
