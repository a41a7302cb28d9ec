use super::Parser;
use crate::ast::{BinOp, Expr};
use crate::error::SyntaxError;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Left-associative `term (+|- term)*`. `follow` is what may
    /// legitimately come after the expression; it steers recovery in
    /// nested index expressions. A failed operand fails the whole
    /// expression, so callers drop the construct instead of keeping a
    /// rewritten half.
    pub(super) fn parse_expression(&mut self, follow: &[TokenKind]) -> Option<Expr> {
        let mut left = self.parse_term(follow)?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Plus,
                TokenKind::Minus => BinOp::Minus,
                _ => break,
            };
            self.advance();
            let right = self.parse_term(follow)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Some(left)
    }

    fn parse_term(&mut self, follow: &[TokenKind]) -> Option<Expr> {
        match self.peek() {
            TokenKind::Digit(_) => self.parse_number().map(Expr::Number),
            TokenKind::Ident => {
                let line = self.cur_line();
                let name = self.take_ident();
                if !self.at(TokenKind::LBracket) {
                    return Some(Expr::Ident { name, line });
                }
                self.advance();
                let mut inner = Vec::with_capacity(follow.len() + 1);
                inner.extend_from_slice(follow);
                inner.push(TokenKind::RBracket);
                match self.parse_expression(&inner) {
                    Some(index) => {
                        self.expect(TokenKind::RBracket, "']' after index expression", follow);
                        Some(Expr::ArrayAccess {
                            name,
                            index: Box::new(index),
                            line,
                        })
                    }
                    None => {
                        self.synchronize(&inner);
                        if self.at(TokenKind::RBracket) {
                            self.advance();
                        }
                        None
                    }
                }
            }
            _ => {
                self.error("an identifier or number in expression");
                None
            }
        }
    }

    /// A digit token carrying a lexeme is one complete literal as
    /// scanned from source.
    fn cur_number_lexeme(&self) -> Option<String> {
        self.tokens.get(self.pos).and_then(|t| {
            if t.kind.is_digit() {
                t.lexeme.clone()
            } else {
                None
            }
        })
    }

    /// Reassemble the numeric literal starting at the current digit
    /// token. Decoded code streams carry one token per digit, so a run
    /// of bare digit tokens reads as a single literal.
    ///
    /// A literal too wide for `i64` is reported as malformed, never
    /// truncated.
    pub(super) fn parse_number(&mut self) -> Option<i64> {
        let line = self.cur_line();
        let digits = match self.cur_number_lexeme() {
            Some(text) => {
                self.advance();
                text
            }
            None => {
                let mut text = String::new();
                while let Some(token) = self.tokens.get(self.pos) {
                    match token.kind {
                        TokenKind::Digit(d) if token.lexeme.is_none() => {
                            text.push(char::from(b'0' + d));
                            self.advance();
                        }
                        _ => break,
                    }
                }
                text
            }
        };
        match digits.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.errors.push(SyntaxError::new(
                    "an integer literal",
                    format!("malformed number '{}'", digits),
                    line,
                ));
                None
            }
        }
    }
}
