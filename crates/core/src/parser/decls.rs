use super::Parser;
use crate::ast::{TypeSpec, VarDecl};
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    // -- Header and const sections ------------------------------

    pub(super) fn parse_header(&mut self) {
        if !self.at(TokenKind::Program) {
            self.error("keyword 'program'");
            self.synchronize(&[
                TokenKind::Program,
                TokenKind::Const,
                TokenKind::Var,
                TokenKind::Begin,
            ]);
            if !self.at(TokenKind::Program) {
                return;
            }
        }
        self.advance();
        if self.at(TokenKind::Ident) {
            // The program name is not kept; nothing refers back to it.
            self.advance();
        } else {
            self.error("a program name");
            self.synchronize(&[
                TokenKind::Semi,
                TokenKind::Const,
                TokenKind::Var,
                TokenKind::Begin,
            ]);
        }
        self.expect(
            TokenKind::Semi,
            "';' after program header",
            &[TokenKind::Const, TokenKind::Var, TokenKind::Begin],
        );
    }

    /// Const sections are recognized and skipped whole; their contents
    /// are not modeled.
    pub(super) fn skip_const_sections(&mut self) {
        while self.at(TokenKind::Const) {
            self.advance();
            self.synchronize(&[TokenKind::Const, TokenKind::Var, TokenKind::Begin]);
        }
    }

    // -- Var section --------------------------------------------

    pub(super) fn parse_var_section(&mut self, declarations: &mut Vec<VarDecl>) {
        if !self.at(TokenKind::Var) {
            return;
        }
        self.advance();
        if !self.at(TokenKind::Ident) {
            self.error("a variable name");
            self.synchronize(&[TokenKind::Ident, TokenKind::Begin]);
        }
        while self.at(TokenKind::Ident) {
            self.parse_decl_group(declarations);
        }
    }

    /// One `a, b, c: type;` group. Every name in the group records the
    /// same parsed type; if the type was malformed the whole group is
    /// dropped.
    fn parse_decl_group(&mut self, declarations: &mut Vec<VarDecl>) {
        let mut names = Vec::new();
        let line = self.cur_line();
        names.push((self.take_ident(), line));
        while self.at(TokenKind::Comma) {
            self.advance();
            if self.at(TokenKind::Ident) {
                let line = self.cur_line();
                names.push((self.take_ident(), line));
            } else {
                self.error("a variable name after ','");
                break;
            }
        }

        let got_colon = self.expect(
            TokenKind::Colon,
            "':' in variable declaration",
            &[
                TokenKind::Integer,
                TokenKind::Array,
                TokenKind::Semi,
                TokenKind::Begin,
            ],
        );
        // A type at the cursor is still usable even when the ':' never
        // turned up.
        let ty = if got_colon || matches!(self.peek(), TokenKind::Integer | TokenKind::Array) {
            self.parse_type_spec()
        } else {
            None
        };
        self.expect(
            TokenKind::Semi,
            "';' after variable declaration",
            &[TokenKind::Begin],
        );

        if let Some(ty) = ty {
            for (name, line) in names {
                declarations.push(VarDecl {
                    name,
                    type_spec: ty.clone(),
                    line,
                });
            }
        }
    }

    // -- Types --------------------------------------------------

    /// Parse a type specifier. `None` means it was malformed; an error
    /// has been recorded and the cursor moved to a safe point.
    fn parse_type_spec(&mut self) -> Option<TypeSpec> {
        match self.peek() {
            TokenKind::Integer => {
                self.advance();
                Some(TypeSpec::Integer)
            }
            TokenKind::Array => {
                self.advance();
                let ty = self.parse_array_type();
                if ty.is_none() {
                    self.synchronize(&[TokenKind::Semi, TokenKind::Begin]);
                }
                ty
            }
            // Unknown type names are the analyzer's to reject; the
            // grammar accepts any identifier here.
            TokenKind::Ident => Some(TypeSpec::Named(self.take_ident())),
            _ => {
                self.error("a type name");
                self.synchronize(&[TokenKind::Semi, TokenKind::Begin]);
                None
            }
        }
    }

    /// `[ lo .. hi ] of <base>` after the `array` keyword. Bails on the
    /// first defect; the caller resynchronizes.
    fn parse_array_type(&mut self) -> Option<TypeSpec> {
        if !self.at(TokenKind::LBracket) {
            self.error("'[' after 'array'");
            return None;
        }
        self.advance();
        let lower = self.parse_bound()?;
        if !self.at(TokenKind::Range) {
            self.error("'..' between array bounds");
            return None;
        }
        self.advance();
        let upper = self.parse_bound()?;
        if !self.at(TokenKind::RBracket) {
            self.error("']' after array bounds");
            return None;
        }
        self.advance();
        if !self.at(TokenKind::Of) {
            self.error("'of' after array bounds");
            return None;
        }
        self.advance();
        let base = self.parse_type_spec()?;
        Some(TypeSpec::Array {
            lower,
            upper,
            base: Box::new(base),
        })
    }

    fn parse_bound(&mut self) -> Option<i64> {
        if !self.peek().is_digit() {
            self.error("an integer array bound");
            return None;
        }
        self.parse_number()
    }
}
