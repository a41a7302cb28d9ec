//! Shared AST types for the mini-Pascal front end.
//!
//! These types are produced by the parser and consumed by the semantic
//! analyzer. They are plain data: no name resolution or type checking
//! happens here.

// ──────────────────────────────────────────────
// Program structure
// ──────────────────────────────────────────────

/// A whole source program: declarations, then the main statement block.
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<VarDecl>,
    pub statements: Vec<Stmt>,
}

/// One declared variable. A group like `a, b: integer;` yields one
/// `VarDecl` per name, each keeping the line its name appeared on.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub type_spec: TypeSpec,
    pub line: u32,
}

/// A type annotation as written.
///
/// `Named` carries any other type word so the analyzer -- not the
/// parser -- decides whether it exists. The parser only checks shape.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    Integer,
    Array {
        lower: i64,
        upper: i64,
        base: Box<TypeSpec>,
    },
    Named(String),
}

// ──────────────────────────────────────────────
// Statements
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Stmt {
    Assignment {
        target: String,
        /// `Some` when the target is subscripted: `a[i] := ...`
        index: Option<Expr>,
        value: Expr,
        line: u32,
    },
    Compound {
        body: Vec<Stmt>,
    },
}

// ──────────────────────────────────────────────
// Expressions
// ──────────────────────────────────────────────

/// An integer-valued expression. Array element reads are a distinct
/// variant, so index expressions stay structured end to end.
#[derive(Debug, Clone)]
pub enum Expr {
    Number(i64),
    Ident {
        name: String,
        line: u32,
    },
    ArrayAccess {
        name: String,
        index: Box<Expr>,
        line: u32,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,
    Minus,
}
