use std::{cell::OnceCell, fmt};

use crate::ast::Directive;

/// Row count emitted as `LIMIT` when an `OFFSET` is present without one.
///
/// SQLite requires `OFFSET` to follow a `LIMIT` and rejects anything above
/// the largest signed 64-bit integer.
pub const SQLITE_MAX_LIMIT: i64 = i64::MAX;

/// Directives sorted into the parts of a SELECT statement.
///
/// Entries are indices into the append log of the owning [`Dataquery`].
#[derive(Debug, Clone, Default, PartialEq)]
struct Buckets {
    distinct: bool,
    values: Vec<usize>,
    wheres: Vec<usize>,
    bys: Vec<usize>,
    havings: Vec<usize>,
    orders: Vec<usize>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Buckets {
    /// Single left-to-right pass over the append log.
    fn classify(directives: &[Directive]) -> Self {
        let mut buckets = Buckets::default();

        for (index, directive) in directives.iter().enumerate() {
            match directive {
                Directive::Distinct => buckets.distinct = true,
                Directive::All => buckets.distinct = false,
                Directive::Where(_) => buckets.wheres.push(index),
                Directive::By(_) => {
                    // A grouping key is also selected
                    buckets.bys.push(index);
                    buckets.values.push(index);
                }
                Directive::Having(_) => buckets.havings.push(index),
                Directive::Order { .. } => buckets.orders.push(index),
                Directive::Limit(_) => buckets.limit = Some(index),
                Directive::Offset(_) => buckets.offset = Some(index),
                Directive::Column(_)
                | Directive::Constant(_)
                | Directive::Call { .. }
                | Directive::Group(_)
                | Directive::UnaryOp { .. }
                | Directive::BinaryOp { .. } => buckets.values.push(index),
            }
        }

        tracing::debug!(
            directives = directives.len(),
            values = buckets.values.len(),
            wheres = buckets.wheres.len(),
            bys = buckets.bys.len(),
            havings = buckets.havings.len(),
            orders = buckets.orders.len(),
            distinct = buckets.distinct,
            "classified dataquery"
        );

        buckets
    }
}

/// An accumulating query description over a single table.
///
/// Directives are appended in order and rendered either as compact notation
/// ([`Dataquery::dql`]), which keeps the append order, or as a SQL SELECT
/// statement ([`Dataquery::sql`]), which places each directive into its
/// clause. Classification happens lazily on the first render after a change
/// and is reused until the next [`append`](Dataquery::append).
///
/// A `Dataquery` is not `Sync`; share it across threads behind a lock.
///
/// # Examples
///
/// ```
/// use dataquery::{BinOp, Dataquery, Directive};
///
/// let query = Dataquery::new("sales")
///     .with(Directive::by(Directive::column("region")))
///     .with(Directive::where_clause(Directive::binary(
///         BinOp::GreaterThan,
///         Directive::column("amount"),
///         Directive::constant(100),
///     )))
///     .with(Directive::order(Directive::column("region")));
///
/// assert_eq!(query.dql(), "sales[by(region),where(amount>100),order(region)]");
/// assert_eq!(
///     query.sql(),
///     r#"SELECT "region" FROM "sales" WHERE "amount">100 GROUP BY "region" ORDER BY "region" ASC"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataquery {
    table: String,
    directives: Vec<Directive>,
    buckets: OnceCell<Buckets>,
    #[cfg(test)]
    classifications: std::cell::Cell<usize>,
}

impl Dataquery {
    /// Creates an empty query over `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Dataquery {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Sets the target table, consuming and returning the query.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.set_table(table);
        self
    }

    /// Sets or overwrites the target table.
    ///
    /// The name is used verbatim in both renderings.
    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// Appends a directive, consuming and returning the query.
    pub fn with(mut self, directive: Directive) -> Self {
        self.append(directive);
        self
    }

    /// Appends a directive to the end of the log.
    pub fn append(&mut self, directive: Directive) -> &mut Self {
        self.directives.push(directive);
        self.buckets.take();
        self
    }

    /// Appends every directive in order. An empty iterator leaves the query
    /// untouched.
    pub fn append_all(&mut self, directives: impl IntoIterator<Item = Directive>) -> &mut Self {
        for directive in directives {
            self.append(directive);
        }
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Directives in append order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Whether the SELECT will be `DISTINCT` (the last marker wins).
    pub fn is_distinct(&self) -> bool {
        self.buckets().distinct
    }

    fn buckets(&self) -> &Buckets {
        self.buckets.get_or_init(|| {
            #[cfg(test)]
            self.classifications.set(self.classifications.get() + 1);
            Buckets::classify(&self.directives)
        })
    }

    /// Renders the compact notation: `table[directive,directive,...]`.
    ///
    /// Directives appear in append order regardless of their kind.
    pub fn dql(&self) -> String {
        self.buckets();

        let items: Vec<String> = self.directives.iter().map(Directive::dql).collect();
        let dql = format!("{}[{}]", self.table, items.join(","));
        tracing::trace!(%dql, "rendered notation");
        dql
    }

    /// Renders a SQL SELECT statement.
    ///
    /// Clauses always appear in the order SELECT, FROM, WHERE, GROUP BY,
    /// HAVING, ORDER BY, LIMIT, OFFSET; empty clauses are omitted.
    pub fn sql(&self) -> String {
        let buckets = self.buckets();
        let mut sql = "SELECT".to_string();

        if buckets.distinct {
            sql.push_str(" DISTINCT");
        }

        if buckets.values.is_empty() {
            sql.push_str(" *");
        } else {
            sql.push(' ');
            sql.push_str(&self.joined(&buckets.values, ", "));
        }

        sql.push_str(&format!(" FROM \"{}\"", self.table));

        if !buckets.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conjunction(&buckets.wheres));
        }

        if !buckets.bys.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.joined(&buckets.bys, ", "));
        }

        if !buckets.havings.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.conjunction(&buckets.havings));
        }

        if !buckets.orders.is_empty() {
            let orders: Vec<String> = buckets
                .orders
                .iter()
                .map(|&index| {
                    let directive = &self.directives[index];
                    let mut order = directive.sql();
                    if let Directive::Order { direction, .. } = directive {
                        if *direction > 0.0 {
                            order.push_str(" ASC");
                        } else if *direction < 0.0 {
                            order.push_str(" DESC");
                        }
                    }
                    order
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = buckets.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.directives[limit].sql());
        }

        if let Some(offset) = buckets.offset {
            if buckets.limit.is_none() {
                sql.push_str(&format!(" LIMIT {}", SQLITE_MAX_LIMIT));
            }
            sql.push_str(" OFFSET ");
            sql.push_str(&self.directives[offset].sql());
        }

        tracing::trace!(%sql, "rendered sql");
        sql
    }

    fn joined(&self, indices: &[usize], separator: &str) -> String {
        let items: Vec<String> = indices
            .iter()
            .map(|&index| self.directives[index].sql())
            .collect();
        items.join(separator)
    }

    /// A single member is emitted bare; several are wrapped as `(a) AND (b)`.
    fn conjunction(&self, indices: &[usize]) -> String {
        match indices {
            [single] => self.directives[*single].sql(),
            _ => format!("({})", self.joined(indices, ") AND (")),
        }
    }
}

impl Extend<Directive> for Dataquery {
    fn extend<I: IntoIterator<Item = Directive>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl FromIterator<Directive> for Dataquery {
    /// Collects directives into a query with an empty table name.
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        let mut query = Dataquery::default();
        query.append_all(iter);
        query
    }
}

impl fmt::Display for Dataquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dql())
    }
}
