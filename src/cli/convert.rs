//! Dataquery -> JSON conversion

use serde_json::json;

use crate::Dataquery;

/// Describe a query as a JSON object with its table and both renderings.
///
/// ```
/// use dataquery::{Dataquery, Directive, cli::query_to_json};
///
/// let query = Dataquery::new("t").with(Directive::column("a"));
/// let json = query_to_json(&query);
/// assert_eq!(json["dql"], "t[a]");
/// assert_eq!(json["sql"], r#"SELECT "a" FROM "t""#);
/// ```
pub fn query_to_json(query: &Dataquery) -> serde_json::Value {
    json!({
        "table": query.table(),
        "dql": query.dql(),
        "sql": query.sql(),
    })
}
