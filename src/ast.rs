//! # Dataquery - Directive Tree
//!
//! This module defines the tree of *directives* that describes a query. A
//! directive tree knows how to print itself in two target languages and
//! nothing else: there is no type checking and no evaluation.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens of the notation, produced by the lexer
//! - **[directives]** - Directive nodes (columns, constants, calls, operators, clauses)
//! - **[operators]** - Unary and binary operators with their symbol tables
//!
//! ## Two Renderings
//!
//! Every directive renders as compact notation (DQL) and as a relational
//! fragment (SQL):
//!
//! | Directive                    | DQL               | SQL             |
//! |------------------------------|-------------------|-----------------|
//! | `Column("region")`           | `region`          | `"region"`      |
//! | `Constant(100)`              | `100`             | `100`           |
//! | `Call("sum", [amount])`      | `sum(amount)`     | `sum("amount")` |
//! | `Not(flag)`                  | `!flag`           | `not"flag"`     |
//! | `And(a, b)`                  | `a and b`         | `"a" AND "b"`   |
//! | `Where(x>1)`                 | `where(x>1)`      | `"x">1`         |
//! | `Order(x, -1)`               | `order(x,-1)`     | `"x"`           |
//!
//! Operators never add parentheses; wrap an operand in
//! [`Directive::Group`] to force precedence.
//!
//! ## Clauses
//!
//! Clause directives (`Where`, `By`, `Having`, `Order`, `Limit`, `Offset`)
//! and the `Distinct`/`All` markers only take their meaning when collected
//! by a [`Dataquery`](crate::Dataquery), which places them into the right
//! part of the SELECT statement.
pub mod directives;
pub mod operators;
pub mod tokens;

pub use directives::{Directive, DirectiveKind, Target};
pub use operators::{BinOp, UnaryOp};
pub use tokens::Token;
