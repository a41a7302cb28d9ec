//! Semantic analysis -- declaration checking, then statement checking,
//! with a hard cap on reported errors.
//!
//! The cap is checked before each unit of work (one declaration, or one
//! statement at any nesting depth): once it is reached, remaining units
//! are skipped outright, not merely silenced. A unit already underway
//! finishes its checks, but reports past the cap are dropped.

use crate::ast::{Expr, Program, Stmt, TypeSpec, VarDecl};
use crate::error::SemanticError;
use crate::symbols::{Symbol, SymbolTable, TypeInfo};

/// Default report cap.
pub const DEFAULT_MAX_ERRORS: usize = 2;

/// Analyze a program with the default error cap.
pub fn analyze(program: &Program) -> Vec<SemanticError> {
    analyze_with_limit(program, DEFAULT_MAX_ERRORS)
}

/// Analyze a program with an explicit error cap.
pub fn analyze_with_limit(program: &Program, max_errors: usize) -> Vec<SemanticError> {
    let mut analyzer = Analyzer::new(max_errors);
    analyzer.run(program);
    analyzer.into_diagnostics()
}

pub struct Analyzer {
    symbols: SymbolTable,
    diagnostics: Vec<SemanticError>,
    max_errors: usize,
}

impl Analyzer {
    pub fn new(max_errors: usize) -> Self {
        Analyzer {
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            max_errors,
        }
    }

    /// Walk the program in source order: declarations first, then the
    /// statement block. The AST is only read, never rewritten.
    pub fn run(&mut self, program: &Program) {
        for decl in &program.declarations {
            if self.at_capacity() {
                break;
            }
            self.declare(decl);
        }
        for stmt in &program.statements {
            if self.at_capacity() {
                break;
            }
            self.check_statement(stmt);
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[SemanticError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<SemanticError> {
        self.diagnostics
    }

    fn at_capacity(&self) -> bool {
        self.diagnostics.len() >= self.max_errors
    }

    /// Record a defect unless the cap is already reached.
    fn report(&mut self, error: SemanticError) {
        if self.diagnostics.len() < self.max_errors {
            self.diagnostics.push(error);
        }
    }

    // ── Phase 1: declarations ────────────────────────────

    fn declare(&mut self, decl: &VarDecl) {
        if let Some(first) = self.symbols.get(&decl.name) {
            let first_line = first.line;
            self.report(SemanticError::DuplicateDeclaration {
                name: decl.name.clone(),
                first_line,
                line: decl.line,
            });
            return;
        }
        match &decl.type_spec {
            TypeSpec::Integer => {
                self.symbols.insert(
                    decl.name.clone(),
                    Symbol {
                        type_info: TypeInfo::Scalar,
                        line: decl.line,
                    },
                );
            }
            TypeSpec::Array { lower, upper, base } => {
                if !matches!(**base, TypeSpec::Integer) {
                    self.report(SemanticError::MalformedArrayType {
                        name: decl.name.clone(),
                        detail: "element type must be integer".to_owned(),
                        line: decl.line,
                    });
                    return;
                }
                if lower > upper {
                    self.report(SemanticError::MalformedArrayType {
                        name: decl.name.clone(),
                        detail: format!("lower bound {} exceeds upper bound {}", lower, upper),
                        line: decl.line,
                    });
                    return;
                }
                self.symbols.insert(
                    decl.name.clone(),
                    Symbol {
                        type_info: TypeInfo::Array {
                            lower: *lower,
                            upper: *upper,
                        },
                        line: decl.line,
                    },
                );
            }
            TypeSpec::Named(type_name) => {
                self.report(SemanticError::UnknownType {
                    name: decl.name.clone(),
                    type_name: type_name.clone(),
                    line: decl.line,
                });
            }
        }
    }

    // ── Phase 2: statements ──────────────────────────────

    fn check_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound { body } => {
                for inner in body {
                    if self.at_capacity() {
                        break;
                    }
                    self.check_statement(inner);
                }
            }
            Stmt::Assignment {
                target,
                index,
                value,
                line,
            } => {
                match self.symbols.get(target).map(|s| s.type_info) {
                    None => {
                        self.report(SemanticError::UndeclaredVariable {
                            name: target.clone(),
                            line: *line,
                        });
                    }
                    Some(TypeInfo::Scalar) => {
                        if index.is_some() {
                            self.report(SemanticError::NotAnArray {
                                name: target.clone(),
                                declared: TypeInfo::Scalar.to_string(),
                                line: *line,
                            });
                        }
                    }
                    Some(info @ TypeInfo::Array { lower, upper }) => match index {
                        None => {
                            self.report(SemanticError::MissingIndex {
                                name: target.clone(),
                                declared: info.to_string(),
                                line: *line,
                            });
                        }
                        // Only literal indices are checked statically.
                        Some(Expr::Number(n)) => {
                            if *n < lower || *n > upper {
                                self.report(SemanticError::IndexOutOfBounds {
                                    name: target.clone(),
                                    index: *n,
                                    lower,
                                    upper,
                                    line: *line,
                                });
                            }
                        }
                        Some(_) => {}
                    },
                }
                // Value expression first, then the index expression.
                if !self.at_capacity() {
                    self.check_expression(value);
                }
                if !self.at_capacity() {
                    if let Some(index) = index {
                        self.check_expression(index);
                    }
                }
            }
        }
    }

    fn check_expression(&mut self, expr: &Expr) {
        if self.at_capacity() {
            return;
        }
        match expr {
            Expr::Number(_) => {}
            Expr::Ident { name, line } => {
                if !self.symbols.contains(name) {
                    self.report(SemanticError::UndeclaredIdentifier {
                        name: name.clone(),
                        line: *line,
                    });
                }
            }
            Expr::ArrayAccess { name, index, line } => {
                if !self.symbols.contains(name) {
                    self.report(SemanticError::UndeclaredIdentifier {
                        name: name.clone(),
                        line: *line,
                    });
                }
                self.check_expression(index);
            }
            Expr::Binary { left, right, .. } => {
                self.check_expression(left);
                self.check_expression(right);
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::parser;

    /// Helper: scan + parse a source string that must be syntactically
    /// clean, then analyze it with the default cap.
    fn analyze_source(src: &str) -> Vec<SemanticError> {
        analyze_source_with_limit(src, DEFAULT_MAX_ERRORS)
    }

    fn analyze_source_with_limit(src: &str, max_errors: usize) -> Vec<SemanticError> {
        let (program, errors) = parse_clean(src);
        assert!(errors.is_empty(), "unexpected syntax errors: {:?}", errors);
        analyze_with_limit(&program, max_errors)
    }

    fn parse_clean(src: &str) -> (Program, Vec<crate::error::SyntaxError>) {
        let tokens = lexer::scan(src).expect("scan should succeed");
        parser::parse_program(&tokens)
    }

    #[test]
    fn clean_program_has_no_errors() {
        let errors = analyze_source("program p; var a: integer; begin a := 1 + 2; end.");
        assert!(errors.is_empty(), "expected no errors, got {:?}", errors);
    }

    #[test]
    fn duplicate_declaration_keeps_first_type() {
        let (program, _) = parse_clean(
            "program p;\nvar a: integer;\n    a: array[1..3] of integer;\nbegin end.",
        );
        let mut analyzer = Analyzer::new(DEFAULT_MAX_ERRORS);
        analyzer.run(&program);
        match analyzer.diagnostics() {
            [SemanticError::DuplicateDeclaration {
                name,
                first_line,
                line,
            }] => {
                assert_eq!(name, "a");
                assert_eq!(*first_line, 2);
                assert_eq!(*line, 3);
            }
            other => panic!("expected one duplicate-declaration error, got {:?}", other),
        }
        // First declaration wins: 'a' stays scalar.
        let sym = analyzer.symbols().get("a").expect("'a' is declared");
        assert_eq!(sym.type_info, TypeInfo::Scalar);
    }

    #[test]
    fn array_bounds_are_inclusive() {
        let ok = analyze_source(
            "program p; var a: array[3..10] of integer; begin a[3] := 1; a[10] := 2; end.",
        );
        assert!(ok.is_empty(), "bounds are inclusive, got {:?}", ok);

        let above = analyze_source(
            "program p; var a: array[3..10] of integer; begin a[11] := 1; end.",
        );
        assert!(
            matches!(
                above.as_slice(),
                [SemanticError::IndexOutOfBounds {
                    index: 11,
                    lower: 3,
                    upper: 10,
                    ..
                }]
            ),
            "got {:?}",
            above
        );

        let below =
            analyze_source("program p; var a: array[3..10] of integer; begin a[2] := 1; end.");
        assert!(
            matches!(below.as_slice(), [SemanticError::IndexOutOfBounds { .. }]),
            "got {:?}",
            below
        );
    }

    #[test]
    fn indexing_a_scalar_is_rejected() {
        let errors = analyze_source("program p; var a: integer; begin a[2] := 1; end.");
        assert!(
            matches!(errors.as_slice(), [SemanticError::NotAnArray { .. }]),
            "got {:?}",
            errors
        );
    }

    #[test]
    fn assigning_an_array_without_index_is_rejected() {
        let errors =
            analyze_source("program p; var a: array[1..5] of integer; begin a := 1; end.");
        assert!(
            matches!(errors.as_slice(), [SemanticError::MissingIndex { .. }]),
            "got {:?}",
            errors
        );
    }

    #[test]
    fn reversed_bounds_are_malformed_and_not_entered() {
        let (program, _) =
            parse_clean("program p; var a: array[5..2] of integer; begin end.");
        let mut analyzer = Analyzer::new(DEFAULT_MAX_ERRORS);
        analyzer.run(&program);
        match analyzer.diagnostics() {
            [SemanticError::MalformedArrayType { name, detail, .. }] => {
                assert_eq!(name, "a");
                assert!(detail.contains("lower bound 5"), "detail: {}", detail);
            }
            other => panic!("expected malformed array type, got {:?}", other),
        }
        assert!(
            !analyzer.symbols().contains("a"),
            "rejected declarations must not enter the table"
        );
    }

    #[test]
    fn non_integer_array_base_is_malformed() {
        let errors = analyze_source(
            "program p; var a: array[1..3] of array[1..2] of integer; begin end.",
        );
        assert!(
            matches!(errors.as_slice(), [SemanticError::MalformedArrayType { .. }]),
            "got {:?}",
            errors
        );
    }

    #[test]
    fn unknown_type_is_reported_and_not_entered() {
        let (program, _) = parse_clean("program p; var a: real; begin end.");
        let mut analyzer = Analyzer::new(DEFAULT_MAX_ERRORS);
        analyzer.run(&program);
        match analyzer.diagnostics() {
            [SemanticError::UnknownType {
                name, type_name, ..
            }] => {
                assert_eq!(name, "a");
                assert_eq!(type_name, "real");
            }
            other => panic!("expected unknown-type error, got {:?}", other),
        }
        assert!(analyzer.symbols().is_empty());
    }

    #[test]
    fn undeclared_target_still_checks_value() {
        // 'x' is undeclared (target) and 'y' is undeclared (value): the
        // right-hand side is still inspected after the target error.
        let errors = analyze_source("program p; begin x := y + 1; end.");
        assert!(
            matches!(
                errors.as_slice(),
                [
                    SemanticError::UndeclaredVariable { .. },
                    SemanticError::UndeclaredIdentifier { .. },
                ]
            ),
            "got {:?}",
            errors
        );
    }

    #[test]
    fn array_access_in_expression_resolves_its_base() {
        let errors = analyze_source(
            "program p; var b: integer; begin b := q[1]; end.",
        );
        match errors.as_slice() {
            [SemanticError::UndeclaredIdentifier { name, .. }] => assert_eq!(name, "q"),
            other => panic!("expected undeclared identifier, got {:?}", other),
        }
    }

    #[test]
    fn identifiers_inside_index_expressions_are_resolved() {
        let errors = analyze_source(
            "program p; var a: array[1..5] of integer; begin a[i] := 1; end.",
        );
        match errors.as_slice() {
            [SemanticError::UndeclaredIdentifier { name, .. }] => assert_eq!(name, "i"),
            other => panic!("expected undeclared identifier, got {:?}", other),
        }
    }

    #[test]
    fn non_literal_index_is_not_bounds_checked() {
        let errors = analyze_source(
            "program p; var a: array[1..5] of integer; i: integer; begin a[i] := 1; end.",
        );
        assert!(errors.is_empty(), "got {:?}", errors);
    }

    #[test]
    fn cap_skips_the_third_defective_unit_entirely() {
        // Two duplicates hit the cap; the third declaration would be a
        // malformed array type, but it is never even inspected -- so it
        // neither reports nor enters the table.
        let src = "program p;\n\
                   var a: integer;\n\
                       a: integer;\n\
                       b: integer;\n\
                       b: integer;\n\
                       c: array[10..3] of integer;\n\
                   begin end.";
        let (program, errors) = parse_clean(src);
        assert!(errors.is_empty(), "unexpected syntax errors: {:?}", errors);
        let mut analyzer = Analyzer::new(2);
        analyzer.run(&program);
        assert_eq!(analyzer.diagnostics().len(), 2);
        assert!(
            analyzer
                .diagnostics()
                .iter()
                .all(|e| matches!(e, SemanticError::DuplicateDeclaration { .. })),
            "got {:?}",
            analyzer.diagnostics()
        );
        assert!(
            !analyzer.symbols().contains("c"),
            "the skipped declaration must leave no trace"
        );
    }

    #[test]
    fn cap_applies_across_statements() {
        // Three statements, each with one defect; cap 2 reports the
        // first two and never visits the third.
        let errors = analyze_source_with_limit(
            "program p; begin x := 1; y := 2; z := 3; end.",
            2,
        );
        assert_eq!(errors.len(), 2);
        match errors.as_slice() {
            [SemanticError::UndeclaredVariable { name: first, .. }, SemanticError::UndeclaredVariable { name: second, .. }] =>
            {
                assert_eq!(first, "x");
                assert_eq!(second, "y");
            }
            other => panic!("expected two undeclared-variable errors, got {:?}", other),
        }
    }

    #[test]
    fn cap_applies_inside_compound_statements() {
        let errors = analyze_source_with_limit(
            "program p; begin begin x := 1; y := 2; z := 3; end; end.",
            2,
        );
        assert_eq!(errors.len(), 2, "got {:?}", errors);
    }

    #[test]
    fn reports_past_the_cap_within_one_unit_are_dropped() {
        // A single statement with two defects under cap 1: the unit
        // completes, but only the first report lands.
        let errors = analyze_source_with_limit("program p; begin x := 1; end.", 1);
        assert_eq!(errors.len(), 1);

        let errors = analyze_source_with_limit(
            "program p; var a: array[1..3] of integer; begin a := x; end.",
            1,
        );
        assert!(
            matches!(errors.as_slice(), [SemanticError::MissingIndex { .. }]),
            "got {:?}",
            errors
        );
    }

    #[test]
    fn names_resolve_case_insensitively() {
        // The scanner folds identifiers, so declarations and uses match
        // regardless of spelling case.
        let errors = analyze_source("program p; var Total: integer; begin TOTAL := 1; end.");
        assert!(errors.is_empty(), "got {:?}", errors);
    }
}
