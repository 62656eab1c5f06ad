use dataquery::cli::{
    CliError, DocCategory, OutputFormat, RenderOptions, RenderResult, execute_render,
    get_doc_category, get_docs_overview,
};

fn render(query: &str, format: OutputFormat) -> String {
    let options = RenderOptions {
        query: Some(query.to_string()),
        format,
        ..RenderOptions::default()
    };
    match execute_render(&options).unwrap() {
        RenderResult::Text(text) => text,
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_render_sql_by_default() {
    let options = RenderOptions {
        query: Some("sales[by(region),sum(amount)]".to_string()),
        ..RenderOptions::default()
    };
    let result = execute_render(&options).unwrap();
    assert_eq!(
        result.to_output(false).unwrap(),
        r#"SELECT "region", sum("amount") FROM "sales" GROUP BY "region""#
    );
}

#[test]
fn test_render_dql_normalizes_whitespace() {
    assert_eq!(
        render("sales[ where( a > 1 ) ]\n", OutputFormat::Dql),
        "sales[where(a>1)]"
    );
}

#[test]
fn test_render_both() {
    assert_eq!(
        render("t[limit(2)]", OutputFormat::Both),
        "t[limit(2)]\nSELECT * FROM \"t\" LIMIT 2"
    );
}

#[test]
fn test_render_json() {
    let options = RenderOptions {
        query: Some("t[a]".to_string()),
        json: true,
        ..RenderOptions::default()
    };
    let result = execute_render(&options).unwrap();
    let RenderResult::Json(value) = &result else {
        panic!("expected json, got {:?}", result);
    };
    assert_eq!(value["table"], "t");
    assert_eq!(value["dql"], "t[a]");
    assert_eq!(value["sql"], "SELECT \"a\" FROM \"t\"");

    let compact = result.to_output(false).unwrap();
    assert!(!compact.contains('\n'));
    let pretty = result.to_output(true).unwrap();
    assert!(pretty.contains('\n'));
}

#[test]
fn test_render_without_query() {
    let err = execute_render(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));

    let options = RenderOptions {
        query: Some("   \n".to_string()),
        ..RenderOptions::default()
    };
    assert!(matches!(execute_render(&options), Err(CliError::NoInput)));
}

#[test]
fn test_render_parse_error() {
    let options = RenderOptions {
        query: Some("t[".to_string()),
        ..RenderOptions::default()
    };
    let err = execute_render(&options).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert!(err.to_string().starts_with("Parse error: "));
}

#[test]
fn test_output_format_names() {
    assert_eq!("dql".parse::<OutputFormat>(), Ok(OutputFormat::Dql));
    assert_eq!("SQL".parse::<OutputFormat>(), Ok(OutputFormat::Sql));
    assert_eq!("both".parse::<OutputFormat>(), Ok(OutputFormat::Both));
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_docs() {
    assert!(get_docs_overview().contains("DOCUMENTATION CATEGORIES"));
    assert!(get_doc_category("clauses").unwrap().starts_with("CLAUSES"));
    assert!(get_doc_category("ops").unwrap().starts_with("OPERATORS"));
    assert_eq!(DocCategory::from_name("Relational"), Some(DocCategory::Sql));

    let err = get_doc_category("nope").unwrap_err();
    assert!(matches!(err, CliError::UnknownCategory(ref c) if c == "nope"));
}
