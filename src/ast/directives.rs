use std::fmt;

use crate::{
    ast::{BinOp, UnaryOp},
    value::Value,
};

/// Rendering target for a directive tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Compact query-description notation (DQL)
    Dql,
    /// Relational SELECT fragments (SQL)
    Sql,
}

/// A node in the query description tree.
///
/// Every directive can render itself in two forms: the compact notation
/// (see [`Directive::dql`]) and a relational fragment (see [`Directive::sql`]).
/// Composite directives own their children; the tree is never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    // Expressions
    /// Column reference
    ///
    /// # Example
    /// ```text
    /// region        (notation)
    /// "region"      (SQL)
    /// ```
    Column(String),

    /// Typed constant
    Constant(Value),

    /// Function call
    ///
    /// # Example
    /// ```text
    /// sum(amount, 2)
    /// ```
    Call { name: String, args: Vec<Directive> },

    /// Explicit parenthesised group
    Group(Box<Directive>),

    /// Prefix operator application
    UnaryOp { op: UnaryOp, operand: Box<Directive> },

    /// Infix operator application, never parenthesised automatically
    BinaryOp {
        op: BinOp,
        left: Box<Directive>,
        right: Box<Directive>,
    },

    // Markers
    /// Select distinct rows
    Distinct,

    /// Select all rows (cancels an earlier `Distinct`)
    All,

    // Clauses
    /// Row filter: `where(...)`
    Where(Box<Directive>),

    /// Grouping key, also selected: `by(...)`
    By(Box<Directive>),

    /// Group filter: `having(...)`
    Having(Box<Directive>),

    /// Sort key: `order(...)` or `order(...,direction)`
    ///
    /// Positive directions sort ascending, negative descending.
    Order {
        expr: Box<Directive>,
        direction: f64,
    },

    /// Row limit: `limit(...)`
    Limit(Box<Directive>),

    /// Row offset: `offset(...)`
    Offset(Box<Directive>),
}

/// Variant tag of a [`Directive`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Column,
    Constant,
    Call,
    Group,
    UnaryOp,
    BinaryOp,
    Distinct,
    All,
    Where,
    By,
    Having,
    Order,
    Limit,
    Offset,
}

impl DirectiveKind {
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Column => "column",
            DirectiveKind::Constant => "constant",
            DirectiveKind::Call => "call",
            DirectiveKind::Group => "group",
            DirectiveKind::UnaryOp => "unary",
            DirectiveKind::BinaryOp => "binary",
            DirectiveKind::Distinct => "distinct",
            DirectiveKind::All => "all",
            DirectiveKind::Where => "where",
            DirectiveKind::By => "by",
            DirectiveKind::Having => "having",
            DirectiveKind::Order => "order",
            DirectiveKind::Limit => "limit",
            DirectiveKind::Offset => "offset",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Directive {
    pub fn column(name: impl Into<String>) -> Self {
        Directive::Column(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Directive::Constant(value.into())
    }

    pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = Directive>) -> Self {
        Directive::Call {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn group(inner: Directive) -> Self {
        Directive::Group(Box::new(inner))
    }

    pub fn unary(op: UnaryOp, operand: Directive) -> Self {
        Directive::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Directive, right: Directive) -> Self {
        Directive::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn distinct() -> Self {
        Directive::Distinct
    }

    pub fn all() -> Self {
        Directive::All
    }

    /// `where` is a keyword, hence the suffix.
    pub fn where_clause(inner: Directive) -> Self {
        Directive::Where(Box::new(inner))
    }

    pub fn by(inner: Directive) -> Self {
        Directive::By(Box::new(inner))
    }

    pub fn having(inner: Directive) -> Self {
        Directive::Having(Box::new(inner))
    }

    /// Ascending sort key (direction `1`).
    pub fn order(inner: Directive) -> Self {
        Self::order_by(inner, 1.0)
    }

    pub fn order_by(inner: Directive, direction: f64) -> Self {
        Directive::Order {
            expr: Box::new(inner),
            direction,
        }
    }

    pub fn limit(inner: Directive) -> Self {
        Directive::Limit(Box::new(inner))
    }

    pub fn offset(inner: Directive) -> Self {
        Directive::Offset(Box::new(inner))
    }

    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Column(_) => DirectiveKind::Column,
            Directive::Constant(_) => DirectiveKind::Constant,
            Directive::Call { .. } => DirectiveKind::Call,
            Directive::Group(_) => DirectiveKind::Group,
            Directive::UnaryOp { .. } => DirectiveKind::UnaryOp,
            Directive::BinaryOp { .. } => DirectiveKind::BinaryOp,
            Directive::Distinct => DirectiveKind::Distinct,
            Directive::All => DirectiveKind::All,
            Directive::Where(_) => DirectiveKind::Where,
            Directive::By(_) => DirectiveKind::By,
            Directive::Having(_) => DirectiveKind::Having,
            Directive::Order { .. } => DirectiveKind::Order,
            Directive::Limit(_) => DirectiveKind::Limit,
            Directive::Offset(_) => DirectiveKind::Offset,
        }
    }

    /// Renders the compact notation form.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataquery::{BinOp, Directive};
    ///
    /// let filter = Directive::where_clause(Directive::binary(
    ///     BinOp::GreaterThan,
    ///     Directive::column("amount"),
    ///     Directive::constant(100),
    /// ));
    /// assert_eq!(filter.dql(), "where(amount>100)");
    /// ```
    pub fn dql(&self) -> String {
        self.render(Target::Dql)
    }

    /// Renders the relational (SQL) form.
    ///
    /// Clause wrappers pass their inner expression through unchanged; the
    /// surrounding keywords are emitted by [`Dataquery::sql`](crate::Dataquery::sql).
    ///
    /// # Examples
    ///
    /// ```
    /// use dataquery::{BinOp, Directive};
    ///
    /// let filter = Directive::where_clause(Directive::binary(
    ///     BinOp::And,
    ///     Directive::column("a"),
    ///     Directive::column("b"),
    /// ));
    /// assert_eq!(filter.sql(), r#""a" AND "b""#);
    /// ```
    pub fn sql(&self) -> String {
        self.render(Target::Sql)
    }

    /// Renders this directive, and recursively its children, for `target`.
    pub fn render(&self, target: Target) -> String {
        match self {
            Directive::Column(name) => match target {
                Target::Dql => name.clone(),
                Target::Sql => format!("\"{}\"", name),
            },
            Directive::Constant(value) => value.to_string(),
            Directive::Call { name, args } => {
                let args: Vec<String> = args.iter().map(|arg| arg.render(target)).collect();
                format!("{}({})", name, args.join(", "))
            }
            Directive::Group(inner) => format!("({})", inner.render(target)),
            Directive::UnaryOp { op, operand } => {
                format!("{}{}", op.symbol(target), operand.render(target))
            }
            Directive::BinaryOp { op, left, right } => format!(
                "{}{}{}",
                left.render(target),
                op.symbol(target),
                right.render(target)
            ),
            Directive::Distinct | Directive::All => String::new(),
            Directive::Where(inner) => clause(target, "where", inner),
            Directive::By(inner) => clause(target, "by", inner),
            Directive::Having(inner) => clause(target, "having", inner),
            Directive::Limit(inner) => clause(target, "limit", inner),
            Directive::Offset(inner) => clause(target, "offset", inner),
            Directive::Order { expr, direction } => match target {
                Target::Dql if *direction != 1.0 => {
                    format!("order({},{})", expr.dql(), direction)
                }
                Target::Dql => format!("order({})", expr.dql()),
                // Direction keyword is appended by the compiler
                Target::Sql => expr.sql(),
            },
        }
    }
}

fn clause(target: Target, keyword: &str, inner: &Directive) -> String {
    match target {
        Target::Dql => format!("{}({})", keyword, inner.dql()),
        Target::Sql => inner.sql(),
    }
}

impl From<Value> for Directive {
    fn from(value: Value) -> Self {
        Directive::Constant(value)
    }
}
