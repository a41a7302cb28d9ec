use super::Parser;
use crate::ast::Stmt;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    // -- Main block ---------------------------------------------

    pub(super) fn parse_main_block(&mut self, statements: &mut Vec<Stmt>) {
        if !self.at(TokenKind::Begin) {
            self.error("keyword 'begin'");
            self.synchronize(&[TokenKind::Begin]);
            if !self.at(TokenKind::Begin) {
                return;
            }
        }
        self.advance();
        self.parse_statement_list(statements);
        if self.at(TokenKind::End) {
            self.advance();
            self.expect(TokenKind::Dot, "'.' after final 'end'", &[]);
        } else {
            // The list stopped at '.' or ran out of tokens.
            self.error("keyword 'end'");
            if self.at(TokenKind::Dot) {
                self.advance();
            }
        }
    }

    /// Parse statements until `end`, the final `.`, or exhaustion.
    fn parse_statement_list(&mut self, statements: &mut Vec<Stmt>) {
        loop {
            match self.peek() {
                TokenKind::Ident => {
                    if let Some(stmt) = self.parse_assignment() {
                        statements.push(stmt);
                    }
                }
                TokenKind::Begin => {
                    let stmt = self.parse_compound();
                    statements.push(stmt);
                }
                TokenKind::End | TokenKind::Dot | TokenKind::Eof => return,
                _ => {
                    self.error("a statement or 'end'");
                    self.synchronize(&[
                        TokenKind::Ident,
                        TokenKind::Semi,
                        TokenKind::Begin,
                        TokenKind::End,
                        TokenKind::Dot,
                    ]);
                    if self.at(TokenKind::Semi) {
                        self.advance();
                    }
                }
            }
        }
    }

    /// An inner `begin ... end;` block. Always yields a compound, even
    /// when pieces of its body were dropped.
    fn parse_compound(&mut self) -> Stmt {
        self.advance();
        let mut body = Vec::new();
        self.parse_statement_list(&mut body);
        if self.at(TokenKind::End) {
            self.advance();
            self.expect(
                TokenKind::Semi,
                "';' after 'end'",
                &[
                    TokenKind::Ident,
                    TokenKind::Begin,
                    TokenKind::End,
                    TokenKind::Dot,
                ],
            );
        } else {
            // Stopped at '.' or exhaustion: this block never closed.
            self.error("keyword 'end'");
        }
        Stmt::Compound { body }
    }

    // -- Assignment ---------------------------------------------

    /// `name := expr ;` or `name [ expr ] := expr ;`. Returns `None`
    /// when the statement was too damaged to keep; the cursor still
    /// ends up past its terminator.
    fn parse_assignment(&mut self) -> Option<Stmt> {
        let line = self.cur_line();
        let target = self.take_ident();

        let mut index = None;
        let mut index_failed = false;
        if self.at(TokenKind::LBracket) {
            self.advance();
            let inner = [
                TokenKind::RBracket,
                TokenKind::Assign,
                TokenKind::Semi,
                TokenKind::End,
            ];
            match self.parse_expression(&inner) {
                Some(expr) => {
                    index = Some(expr);
                    self.expect(
                        TokenKind::RBracket,
                        "']' after index expression",
                        &[TokenKind::Assign, TokenKind::Semi, TokenKind::End],
                    );
                }
                None => {
                    index_failed = true;
                    self.synchronize(&inner);
                    if self.at(TokenKind::RBracket) {
                        self.advance();
                    }
                }
            }
        }

        if !self.expect(
            TokenKind::Assign,
            "':=' in assignment",
            &[TokenKind::Semi, TokenKind::End],
        ) {
            if self.at(TokenKind::Semi) {
                self.advance();
            }
            return None;
        }

        let value = self.parse_expression(&[TokenKind::Semi, TokenKind::End]);
        if value.is_none() {
            self.synchronize(&[TokenKind::Semi, TokenKind::End, TokenKind::Begin]);
        }
        self.expect(
            TokenKind::Semi,
            "';' after assignment",
            &[TokenKind::Ident, TokenKind::Begin, TokenKind::End],
        );

        // A statement whose index or value was dropped is itself
        // dropped; keeping a rewritten half would change its meaning.
        if index_failed {
            return None;
        }
        let value = value?;
        Some(Stmt::Assignment {
            target,
            index,
            value,
            line,
        })
    }
}
