//! Documentation content for the dataquery CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Expressions,
    Operators,
    Clauses,
    Sql,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "notation" | "dql" => Some(Self::Syntax),
            "expressions" | "expression" | "expr" => Some(Self::Expressions),
            "operators" | "ops" => Some(Self::Operators),
            "clauses" | "clause" => Some(Self::Clauses),
            "sql" | "relational" => Some(Self::Sql),
            _ => None,
        }
    }

    pub fn content(self) -> &'static str {
        match self {
            Self::Syntax => SYNTAX_DOC,
            Self::Expressions => EXPRESSIONS_DOC,
            Self::Operators => OPERATORS_DOC,
            Self::Clauses => CLAUSES_DOC,
            Self::Sql => SQL_DOC,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"DATAQUERY DOCUMENTATION

Dataquery describes a query over a single table as a list of directives and
renders it either as compact notation (DQL) or as a SQL SELECT statement.

DOCUMENTATION CATEGORIES

  syntax            Shape of a notation query
  expressions       Columns, constants, calls and groups
  operators         Arithmetic, comparison and logical operators
  clauses           where, by, having, order, limit, offset, distinct, all
  sql               How directives are placed into the SELECT statement

QUICK REFERENCE

  sales[region,amount]               Select two columns
  sales[by(region),sum(amount)]      Group and aggregate
  sales[where(amount>100)]           Filter rows
  sales[order(amount,-1),limit(10)]  Top ten by amount

  dataquery render 'sales[by(region)]' --to both
"#
}

/// Get documentation for a category by name
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    DocCategory::from_name(name)
        .map(DocCategory::content)
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

const SYNTAX_DOC: &str = r#"SYNTAX - Notation Queries

  table[directive,directive,...]

  The table name comes first, followed by a bracketed, comma separated list
  of directives. Directives are kept in the order they are written.

  sales[]                      Every column of sales
  sales[region,amount]         Two columns
  sales[distinct,region]       Distinct regions

  Whitespace between tokens is ignored. Nothing inside the brackets is
  escaped: names must not contain '[', ']' or ','.
"#;

const EXPRESSIONS_DOC: &str = r#"EXPRESSIONS - Values in a Query

COLUMNS
  region                       Notation: region     SQL: "region"

CONSTANTS
  100                          Integer
  2.5                          Float
  'north' or "north"           String (rendered without quotes)
  true / false                 Boolean

CALLS
  sum(amount)                  Notation: sum(amount)
                               SQL:      sum("amount")
  round(price, 2)              Arguments are joined with ", "

GROUPS
  (a+b)*c                      Parentheses are kept as written. Operators
                               never add parentheses on their own.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Arithmetic, Comparison, Logical

  Operator      Notation      SQL
  --------      --------      ---
  multiply      *             *
  divide        /             /
  plus          +             +
  subtract      -             -
  equal         ==            ==
  not equal     !=            !=
  less          <             <
  less-eq       <=            <=
  greater       >             >
  greater-eq    >=            >=
  and           ' and '       ' AND '
  or            ' or '        ' OR '

  Prefix operators: +x, -x, !x (SQL: not"x")

  Precedence, lowest first: or, and, comparison, + -, * /, prefix.
"#;

const CLAUSES_DOC: &str = r#"CLAUSES - Shaping the Result

  where(expr)         Filter rows. Several where clauses are combined with AND.
  by(expr)            Group by expr. The key is also selected.
  having(expr)        Filter groups. Several are combined with AND.
  order(expr)         Sort ascending.
  order(expr,-1)      Sort descending. Any positive number sorts ascending,
                      any negative number descending, 0 leaves it unspecified.
  limit(n)            Maximum number of rows. The last limit wins.
  offset(n)           Rows to skip. The last offset wins.
  distinct            Select distinct rows.
  all                 Select all rows. The last of distinct/all wins.

  distinct and all render as nothing in notation.
"#;

const SQL_DOC: &str = r#"SQL - Relational Rendering

  Clauses are always emitted in this order, whatever order they were written:

    SELECT [DISTINCT] values | *
    FROM "table"
    WHERE ...
    GROUP BY ...
    HAVING ...
    ORDER BY ... ASC|DESC
    LIMIT ...
    OFFSET ...

  A single where renders bare:      WHERE "a">1
  Several are bracketed and joined: WHERE ("a">1) AND ("b"<2)

  An offset without a limit gets LIMIT 9223372036854775807 so engines that
  require OFFSET to follow LIMIT accept it.

  Values are not parameterized and identifiers are not escaped. Only render
  input you trust.
"#;
