use dataquery::{
    BinOp, Dataquery, Directive, LexError, ParseError, UnaryOp, parse_directive, parse_query,
    parser::MAX_DEPTH,
};
use rust_decimal::Decimal;

fn col(name: &str) -> Directive {
    Directive::column(name)
}

fn int(n: i64) -> Directive {
    Directive::constant(n)
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_parse_empty_query() {
    let q = parse_query("sales[]").unwrap();
    assert_eq!(q.table(), "sales");
    assert!(q.is_empty());
}

#[test]
fn test_parse_end_to_end() {
    let q = parse_query("sales[by(region),where(amount>100),order(region)]").unwrap();
    assert_eq!(
        q.directives(),
        &[
            Directive::by(col("region")),
            Directive::where_clause(Directive::binary(
                BinOp::GreaterThan,
                col("amount"),
                int(100)
            )),
            Directive::order(col("region")),
        ]
    );
    assert_eq!(
        q.sql(),
        r#"SELECT "region" FROM "sales" WHERE "amount">100 GROUP BY "region" ORDER BY "region" ASC"#
    );
}

#[test]
fn test_parse_with_whitespace() {
    let q = parse_query("  sales [ region , limit( 10 ) ]  ").unwrap();
    assert_eq!(q.dql(), "sales[region,limit(10)]");
}

#[test]
fn test_parse_markers() {
    let q = parse_query("t[distinct,a,all,distinct]").unwrap();
    assert_eq!(q.len(), 4);
    assert_eq!(q.directives()[0], Directive::Distinct);
    assert_eq!(q.directives()[2], Directive::All);
    assert!(q.is_distinct());
}

#[test]
fn test_parse_skips_empty_items() {
    let q = parse_query("t[,a,,b,]").unwrap();
    assert_eq!(q.directives(), &[col("a"), col("b")]);
}

#[test]
fn test_parse_order_directions() {
    let q = parse_query("t[order(a,-1),order(b,2),order(c,+0.5),order(d)]").unwrap();
    assert_eq!(
        q.directives(),
        &[
            Directive::order_by(col("a"), -1.0),
            Directive::order_by(col("b"), 2.0),
            Directive::order_by(col("c"), 0.5),
            Directive::order_by(col("d"), 1.0),
        ]
    );
}

#[test]
fn test_parse_all_clauses() {
    let q = parse_query("t[where(a),by(b),having(c),limit(1),offset(2)]").unwrap();
    assert_eq!(
        q.directives(),
        &[
            Directive::where_clause(col("a")),
            Directive::by(col("b")),
            Directive::having(col("c")),
            Directive::limit(int(1)),
            Directive::offset(int(2)),
        ]
    );
}

#[test]
fn test_clause_keyword_as_column() {
    // Without parentheses a clause keyword is an ordinary column
    let q = parse_query("t[order,limit]").unwrap();
    assert_eq!(q.directives(), &[col("order"), col("limit")]);
}

#[test]
fn test_operator_keywords_as_columns() {
    let q = parse_query("t[and,or,and and or]").unwrap();
    assert_eq!(
        q.directives(),
        &[
            col("and"),
            col("or"),
            Directive::binary(BinOp::And, col("and"), col("or")),
        ]
    );
    assert_eq!(parse_query(&q.dql()).unwrap().dql(), q.dql());
}

#[test]
fn test_clause_keyword_in_expression_is_call() {
    let q = parse_query("t[limit(1)+2]").unwrap();
    assert_eq!(
        q.directives(),
        &[Directive::binary(
            BinOp::Plus,
            Directive::call("limit", vec![int(1)]),
            int(2)
        )]
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence() {
    let d = parse_directive("a+b*c>1 and !d or e").unwrap();
    let expected = Directive::binary(
        BinOp::Or,
        Directive::binary(
            BinOp::And,
            Directive::binary(
                BinOp::GreaterThan,
                Directive::binary(
                    BinOp::Plus,
                    col("a"),
                    Directive::binary(BinOp::Multiply, col("b"), col("c")),
                ),
                int(1),
            ),
            Directive::unary(UnaryOp::Not, col("d")),
        ),
        col("e"),
    );
    assert_eq!(d, expected);
}

#[test]
fn test_parentheses_become_groups() {
    let d = parse_directive("(a+b)*c").unwrap();
    assert_eq!(
        d,
        Directive::binary(
            BinOp::Multiply,
            Directive::group(Directive::binary(BinOp::Plus, col("a"), col("b"))),
            col("c"),
        )
    );
}

#[test]
fn test_literals() {
    assert_eq!(parse_directive("42").unwrap(), int(42));
    assert_eq!(parse_directive("2.5").unwrap(), Directive::constant(2.5));
    assert_eq!(parse_directive("'north'").unwrap(), Directive::constant("north"));
    assert_eq!(parse_directive("\"a\\tb\"").unwrap(), Directive::constant("a\tb"));
    assert_eq!(parse_directive("false").unwrap(), Directive::constant(false));
    assert_eq!(
        parse_directive("-3").unwrap(),
        Directive::unary(UnaryOp::Negative, int(3))
    );
}

#[test]
fn test_calls() {
    assert_eq!(
        parse_directive("round(avg(price), 2)").unwrap(),
        Directive::call(
            "round",
            vec![Directive::call("avg", vec![col("price")]), int(2)]
        )
    );
    assert_eq!(parse_directive("now()").unwrap(), Directive::call("now", Vec::new()));
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_notation_round_trip() {
    let q = Dataquery::new("sales")
        .with(Directive::by(col("region")))
        .with(Directive::call("sum", vec![col("amount")]))
        .with(Directive::where_clause(Directive::binary(
            BinOp::And,
            Directive::group(Directive::binary(BinOp::GreaterEqual, col("amount"), int(10))),
            Directive::unary(UnaryOp::Not, col("refunded")),
        )))
        .with(Directive::having(Directive::binary(
            BinOp::LessThan,
            Directive::call("count", vec![col("id")]),
            Directive::constant(2.5),
        )))
        .with(Directive::order_by(col("region"), -1.0))
        .with(Directive::offset(int(3)));

    let dql = q.dql();
    let parsed = parse_query(&dql).unwrap();
    assert_eq!(parsed.dql(), dql);
    assert_eq!(parsed.sql(), q.sql());
}

#[test]
fn test_numeric_round_trip_at_boundaries() {
    let wide = Decimal::from_str_exact("100000000000000000000").unwrap();
    let fraction = Decimal::from_str_exact("0.1234567890123456789").unwrap();
    let q = Dataquery::new("t")
        .with(Directive::constant(wide))
        .with(Directive::constant(i64::MIN))
        .with(Directive::constant(i64::MAX))
        .with(Directive::constant(fraction))
        .with(Directive::constant(0.1))
        .with(Directive::constant(1e300))
        .with(Directive::order_by(col("a"), 1e20))
        .with(Directive::limit(Directive::constant(wide)));

    let dql = q.dql();
    assert!(dql.contains("100000000000000000000,"), "{}", dql);
    assert!(dql.contains("-9223372036854775808,"), "{}", dql);
    assert!(dql.contains("0.1234567890123456789,"), "{}", dql);

    let parsed = parse_query(&dql).unwrap();
    assert_eq!(parsed.dql(), dql);
    assert_eq!(parsed.sql(), q.sql());
}

#[test]
fn test_wide_numbers_parse_as_decimals() {
    assert_eq!(
        parse_directive("100000000000000000000").unwrap(),
        Directive::constant(Decimal::from_str_exact("100000000000000000000").unwrap())
    );
    assert_eq!(
        parse_directive("-9223372036854775808").unwrap(),
        Directive::unary(
            UnaryOp::Negative,
            Directive::constant(Decimal::from_str_exact("9223372036854775808").unwrap())
        )
    );
    assert_eq!(
        parse_query("t[order(a,100000000000000000000)]").unwrap().directives(),
        &[Directive::order_by(col("a"), 1e20)]
    );
}

#[test]
fn test_markers_do_not_round_trip() {
    let q = Dataquery::new("t")
        .with(Directive::distinct())
        .with(col("a"));
    assert_eq!(q.dql(), "t[,a]");

    let parsed = parse_query(&q.dql()).unwrap();
    assert!(!parsed.is_distinct());
    assert_eq!(parsed.dql(), "t[a]");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_bracket() {
    let err = parse_query("sales[a").unwrap_err();
    assert!(matches!(err, ParseError::Unexpected { .. }));
    assert!(err.to_string().contains("expected ']'"), "{}", err);
}

#[test]
fn test_missing_table() {
    let err = parse_query("[a]").unwrap_err();
    assert!(err.to_string().contains("expected identifier"), "{}", err);
}

#[test]
fn test_trailing_input() {
    let err = parse_query("t[a] extra").unwrap_err();
    assert!(err.to_string().contains("end of input"), "{}", err);
}

#[test]
fn test_lone_equals() {
    let err = parse_query("t[where(a=1)]").unwrap_err();
    assert!(matches!(err, ParseError::Lex(LexError::LoneEquals { .. })));
}

#[test]
fn test_unterminated_string() {
    let err = parse_directive("'abc").unwrap_err();
    assert!(matches!(err, ParseError::Lex(LexError::UnterminatedString { .. })));
}

#[test]
fn test_bad_order_direction() {
    let err = parse_query("t[order(a,b)]").unwrap_err();
    assert!(err.to_string().contains("numeric order direction"), "{}", err);
    match err {
        ParseError::InvalidDirection { found, position } => {
            assert_eq!(found, "column");
            assert_eq!(position.column, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_bad_order_direction_names_what_was_found() {
    let found = |input: &str| match parse_query(input).unwrap_err() {
        ParseError::InvalidDirection { found, .. } => found,
        other => panic!("unexpected error: {:?}", other),
    };
    assert_eq!(found("t[order(a,'x')]"), "string constant");
    assert_eq!(found("t[order(a,true)]"), "boolean constant");
    assert_eq!(found("t[order(a,f(1))]"), "call");
    assert_eq!(found("t[order(a,1+1)]"), "binary");
    assert_eq!(found("t[order(a,!1)]"), "unary");
}

#[test]
fn test_clause_with_two_arguments() {
    let err = parse_query("t[ where(a,b)]").unwrap_err();
    assert!(err.to_string().contains("'where' takes a single argument, found 2"), "{}", err);
    match err {
        ParseError::ClauseArity { clause, count, position } => {
            assert_eq!(clause, "where");
            assert_eq!(count, 2);
            assert_eq!(position.line, 1);
            assert_eq!(position.column, 4);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_order_with_three_arguments() {
    let err = parse_query("t[a,order(a,1,2)]").unwrap_err();
    match err {
        ParseError::ClauseArity { clause, count, position } => {
            assert_eq!(clause, "order");
            assert_eq!(count, 3);
            assert_eq!(position.column, 5);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_deep_unary_chain_is_rejected() {
    let input = format!("{}a", "!".repeat(100_000));
    let err = parse_directive(&input).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { limit: MAX_DEPTH, .. }), "{:?}", err);
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let input = format!("t[{}a{}]", "(".repeat(100_000), ")".repeat(100_000));
    let err = parse_query(&input).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{:?}", err);
    assert!(err.to_string().contains("nested deeper than"), "{}", err);
}

#[test]
fn test_deep_calls_are_rejected() {
    let input = format!("{}a{}", "f(".repeat(100_000), ")".repeat(100_000));
    let err = parse_directive(&input).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{:?}", err);
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let input = vec!["a"; 100_000].join("+");
    let err = parse_directive(&input).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }), "{:?}", err);
}

#[test]
fn test_nesting_within_limit() {
    let depth = MAX_DEPTH / 2;
    let input = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
    let d = parse_directive(&input).unwrap();
    assert_eq!(d.dql(), input);

    let chain = vec!["a"; MAX_DEPTH / 2].join("+");
    assert_eq!(parse_directive(&chain).unwrap().dql(), chain);
}

#[test]
fn test_error_position() {
    let err = parse_query("t[a,\n  )]").unwrap_err();
    match err {
        ParseError::Unexpected { position, .. } => {
            assert_eq!(position.line, 2);
            assert_eq!(position.column, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
