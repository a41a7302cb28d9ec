//! Token kinds, classified tokens, and the numeric wire codes used by the
//! persisted token-code stream.

/// Classification of a single token.
///
/// `Digit` carries one decimal digit because the wire format writes numeric
/// literals one digit per code; the parser reassembles runs of digit tokens
/// into full literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Program,
    Var,
    Const,
    Begin,
    End,
    Integer,
    Array,
    Of,
    // Punctuation
    Assign, // :=
    Equals,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Semi,
    Comma,
    Dot,
    Colon,
    Range, // ..
    LBracket,
    RBracket,
    /// Single decimal digit 0-9
    Digit(u8),
    /// Identifier -- the name lives on the token's lexeme
    Ident,
    // End of input
    Eof,
}

impl TokenKind {
    /// Keyword lookup for an already-lowercased word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "program" => Some(TokenKind::Program),
            "var" => Some(TokenKind::Var),
            "const" => Some(TokenKind::Const),
            "begin" => Some(TokenKind::Begin),
            "end" => Some(TokenKind::End),
            "integer" => Some(TokenKind::Integer),
            "array" => Some(TokenKind::Array),
            "of" => Some(TokenKind::Of),
            _ => None,
        }
    }

    /// Source text for kinds whose spelling is fixed.
    pub fn fixed_text(self) -> Option<&'static str> {
        match self {
            TokenKind::Program => Some("program"),
            TokenKind::Var => Some("var"),
            TokenKind::Const => Some("const"),
            TokenKind::Begin => Some("begin"),
            TokenKind::End => Some("end"),
            TokenKind::Integer => Some("integer"),
            TokenKind::Array => Some("array"),
            TokenKind::Of => Some("of"),
            TokenKind::Assign => Some(":="),
            TokenKind::Equals => Some("="),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::Semi => Some(";"),
            TokenKind::Comma => Some(","),
            TokenKind::Dot => Some("."),
            TokenKind::Colon => Some(":"),
            TokenKind::Range => Some(".."),
            TokenKind::LBracket => Some("["),
            TokenKind::RBracket => Some("]"),
            TokenKind::Digit(_) | TokenKind::Ident | TokenKind::Eof => None,
        }
    }

    /// Numeric wire code. EOF is never written to the wire, so it has none.
    ///
    /// Codes 1-31 are the classic table (keywords 1-8, punctuation 9-20,
    /// digits 21-30, identifier marker 31); 32-34 extend it contiguously
    /// for the array syntax.
    pub fn code(self) -> Option<u16> {
        let code = match self {
            TokenKind::Program => 1,
            TokenKind::Var => 2,
            TokenKind::Const => 3,
            TokenKind::Begin => 4,
            TokenKind::End => 5,
            TokenKind::Integer => 6,
            TokenKind::Array => 7,
            TokenKind::Of => 8,
            TokenKind::Assign => 9,
            TokenKind::Equals => 10,
            TokenKind::Plus => 11,
            TokenKind::Minus => 12,
            TokenKind::Star => 13,
            TokenKind::Slash => 14,
            TokenKind::LParen => 15,
            TokenKind::RParen => 16,
            TokenKind::Semi => 17,
            TokenKind::Comma => 18,
            TokenKind::Dot => 19,
            TokenKind::Colon => 20,
            TokenKind::Digit(d) => 21 + u16::from(d),
            TokenKind::Ident => 31,
            TokenKind::LBracket => 32,
            TokenKind::RBracket => 33,
            TokenKind::Range => 34,
            TokenKind::Eof => return None,
        };
        Some(code)
    }

    /// Reverse of [`TokenKind::code`].
    pub fn from_code(code: u16) -> Option<TokenKind> {
        let kind = match code {
            1 => TokenKind::Program,
            2 => TokenKind::Var,
            3 => TokenKind::Const,
            4 => TokenKind::Begin,
            5 => TokenKind::End,
            6 => TokenKind::Integer,
            7 => TokenKind::Array,
            8 => TokenKind::Of,
            9 => TokenKind::Assign,
            10 => TokenKind::Equals,
            11 => TokenKind::Plus,
            12 => TokenKind::Minus,
            13 => TokenKind::Star,
            14 => TokenKind::Slash,
            15 => TokenKind::LParen,
            16 => TokenKind::RParen,
            17 => TokenKind::Semi,
            18 => TokenKind::Comma,
            19 => TokenKind::Dot,
            20 => TokenKind::Colon,
            21..=30 => TokenKind::Digit((code - 21) as u8),
            31 => TokenKind::Ident,
            32 => TokenKind::LBracket,
            33 => TokenKind::RBracket,
            34 => TokenKind::Range,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_digit(self) -> bool {
        matches!(self, TokenKind::Digit(_))
    }
}

/// A classified token with its source line.
///
/// The lexeme is present for identifiers (the name) and for multi-digit
/// numeric literals (the full digit string). Single-digit literals and all
/// fixed-text tokens carry no lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<String>,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Token {
            kind,
            lexeme: None,
            line,
        }
    }

    pub fn ident(name: impl Into<String>, line: u32) -> Self {
        Token {
            kind: TokenKind::Ident,
            lexeme: Some(name.into()),
            line,
        }
    }

    /// Build a numeric literal token from a non-empty ASCII digit string.
    pub fn number(digits: &str, line: u32) -> Self {
        debug_assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
        let first = digits.as_bytes().first().map_or(0, |b| b - b'0');
        let lexeme = if digits.len() > 1 {
            Some(digits.to_owned())
        } else {
            None
        };
        Token {
            kind: TokenKind::Digit(first),
            lexeme,
            line,
        }
    }

    pub fn eof(line: u32) -> Self {
        Token::new(TokenKind::Eof, line)
    }

    /// Human description used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident => match &self.lexeme {
                Some(name) => format!("identifier '{}'", name),
                None => "identifier".to_owned(),
            },
            TokenKind::Digit(d) => match &self.lexeme {
                Some(text) => format!("number '{}'", text),
                None => format!("number '{}'", d),
            },
            TokenKind::Eof => "end of input".to_owned(),
            other => match other.fixed_text() {
                Some(text) => format!("'{}'", text),
                None => format!("{:?}", other),
            },
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
