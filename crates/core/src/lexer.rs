use crate::error::ScanError;
use crate::token::{Token, TokenKind};

/// Scan source text into a classified token stream.
///
/// Words fold to ASCII lowercase before keyword lookup -- the language is
/// case-insensitive. A single-digit literal becomes a bare digit token;
/// a longer literal keeps the full digit string as its lexeme. The stream
/// is terminated with an EOF sentinel.
pub fn scan(src: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;

        // Word: keyword or identifier
        if c.is_ascii_alphabetic() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_alphanumeric() {
                pos += 1;
            }
            let word: String = chars[start..pos]
                .iter()
                .collect::<String>()
                .to_ascii_lowercase();
            match TokenKind::keyword(&word) {
                Some(kind) => tokens.push(Token::new(kind, tok_line)),
                None => tokens.push(Token::ident(word, tok_line)),
            }
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let digits: String = chars[start..pos].iter().collect();
            tokens.push(Token::number(&digits, tok_line));
            continue;
        }

        // ':' and '.' need one character of lookahead
        match c {
            ':' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    tokens.push(Token::new(TokenKind::Assign, tok_line));
                    pos += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Colon, tok_line));
                    pos += 1;
                }
                continue;
            }
            '.' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '.' {
                    tokens.push(Token::new(TokenKind::Range, tok_line));
                    pos += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Dot, tok_line));
                    pos += 1;
                }
                continue;
            }
            _ => {}
        }

        // Single-character punctuation
        let kind = match c {
            '=' => TokenKind::Equals,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            _ => {
                return Err(ScanError::UnexpectedChar {
                    ch: c,
                    line: tok_line,
                })
            }
        };
        tokens.push(Token::new(kind, tok_line));
        pos += 1;
    }

    tokens.push(Token::eof(line));
    Ok(tokens)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
