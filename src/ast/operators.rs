use crate::ast::Target;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Unary plus (`+`)
    Positive,
    /// Negation (`-`)
    Negative,
    /// Logical NOT (`!` in notation, `not` in SQL)
    Not,
}

impl UnaryOp {
    /// Returns the `(notation, relational)` symbol pair for this operator.
    pub fn symbols(self) -> (&'static str, &'static str) {
        match self {
            UnaryOp::Positive => ("+", "+"),
            UnaryOp::Negative => ("-", "-"),
            UnaryOp::Not => ("!", "not"),
        }
    }

    /// Returns the symbol used by the given rendering target.
    pub fn symbol(self, target: Target) -> &'static str {
        let (dql, sql) = self.symbols();
        match target {
            Target::Dql => dql,
            Target::Sql => sql,
        }
    }
}

/// Infix operators.
///
/// The logical operators carry their surrounding spaces in both symbol
/// tables; every other symbol is emitted without padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Subtract,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Logical
    /// Logical AND (` and ` / ` AND `)
    And,
    /// Logical OR (` or ` / ` OR `)
    Or,
}

impl BinOp {
    /// Returns the `(notation, relational)` symbol pair for this operator.
    pub fn symbols(self) -> (&'static str, &'static str) {
        match self {
            BinOp::Multiply => ("*", "*"),
            BinOp::Divide => ("/", "/"),
            BinOp::Plus => ("+", "+"),
            BinOp::Subtract => ("-", "-"),
            BinOp::Equal => ("==", "=="),
            BinOp::NotEqual => ("!=", "!="),
            BinOp::LessThan => ("<", "<"),
            BinOp::LessEqual => ("<=", "<="),
            BinOp::GreaterThan => (">", ">"),
            BinOp::GreaterEqual => (">=", ">="),
            BinOp::And => (" and ", " AND "),
            BinOp::Or => (" or ", " OR "),
        }
    }

    /// Returns the symbol used by the given rendering target.
    pub fn symbol(self, target: Target) -> &'static str {
        let (dql, sql) = self.symbols();
        match target {
            Target::Dql => dql,
            Target::Sql => sql,
        }
    }
}
