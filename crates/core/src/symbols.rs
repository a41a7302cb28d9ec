//! Symbol table for the single flat program scope.

use std::collections::HashMap;
use std::fmt;

/// What a declared name is: a scalar integer or a bounded integer array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeInfo {
    Scalar,
    Array { lower: i64, upper: i64 },
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::Scalar => write!(f, "integer"),
            TypeInfo::Array { lower, upper } => {
                write!(f, "array[{}..{}] of integer", lower, upper)
            }
        }
    }
}

/// A table entry: the resolved type and the line of the first declaration.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub type_info: TypeInfo,
    pub line: u32,
}

/// Flat name-to-symbol map. Filled while declarations are checked and
/// read-only afterwards; the first declaration of a name wins.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: String, symbol: Symbol) {
        self.entries.insert(name, symbol);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
