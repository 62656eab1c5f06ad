//! Reads DQL notation back into a [`Dataquery`].
//!
//! ```text
//! query      := IDENT '[' (item (',' item)*)? ']'
//! item       := 'distinct' | 'all'
//!             | ('where' | 'by' | 'having' | 'limit' | 'offset') '(' expr ')'
//!             | 'order' '(' expr (',' ['+'|'-'] NUMBER)? ')'
//!             | expr
//!             | (empty)
//! expr       := and ('or' and)*
//! and        := comparison ('and' comparison)*
//! comparison := additive (('=='|'!='|'<'|'<='|'>'|'>=') additive)*
//! additive   := multiplicative (('+'|'-') multiplicative)*
//! multiplicative := unary (('*'|'/') unary)*
//! unary      := ('+'|'-'|'!') unary | primary
//! primary    := NUMBER | STRING | BOOLEAN | IDENT | 'and' | 'or'
//!             | IDENT '(' args ')' | '(' expr ')'
//! ```
//!
//! Empty items are accepted because the `distinct`/`all` markers render as
//! nothing in notation. `and` and `or` in operand position are read as
//! column names.
//!
//! Directive trees nest at most [`MAX_DEPTH`] levels deep; deeper input is
//! rejected with [`ParseError::TooDeep`].

use std::mem;

use rust_decimal::prelude::ToPrimitive;

use crate::{
    ast::{BinOp, Directive, Token, UnaryOp},
    compiler::Dataquery,
    lexer::{LexError, Lexer, Position},
    value::Value,
};

/// Deepest directive nesting the parser accepts.
pub const MAX_DEPTH: usize = 128;

/// Errors raised while parsing notation text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {position}")]
    Unexpected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("expected a numeric order direction, found {found} at {position}")]
    InvalidDirection { found: String, position: Position },

    #[error("'{clause}' takes a single argument, found {count} at {position}")]
    ClauseArity {
        clause: String,
        count: usize,
        position: Position,
    },

    #[error("expression nested deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    /// Start of `current_token`
    token_position: Position,
    /// Nesting depth of the directive being built
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        lexer.skip_whitespace();
        let token_position = lexer.position();
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            token_position,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.lexer.skip_whitespace();
        self.token_position = self.lexer.position();
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: self.current_token.describe(),
            position: self.token_position,
        }
    }

    /// Enters one more level of nesting.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: self.token_position,
            });
        }
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&expected.describe()));
        }
        self.advance()
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(name)
            }
            other => {
                self.current_token = other;
                Err(self.unexpected("identifier"))
            }
        }
    }

    /// Parse a complete query: `table[item,item,...]`
    pub fn parse_query(&mut self) -> Result<Dataquery, ParseError> {
        let table = self.expect_identifier()?;
        let mut query = Dataquery::new(table);

        self.expect(Token::LBracket)?;
        loop {
            if self.check(&Token::RBracket) || self.check(&Token::Comma) {
                // empty item
            } else {
                query.append(self.parse_item()?);
            }

            if self.check(&Token::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(Token::RBracket)?;
        self.expect(Token::Eof)?;

        Ok(query)
    }

    /// Parse a single directive, including top-level clauses, to end of input.
    pub fn parse(&mut self) -> Result<Directive, ParseError> {
        let directive = self.parse_item()?;
        self.expect(Token::Eof)?;
        Ok(directive)
    }

    fn parse_item(&mut self) -> Result<Directive, ParseError> {
        let start = self.token_position;
        let keyword = match &self.current_token {
            Token::Identifier(name) => name.clone(),
            _ => return self.parse_expression(),
        };

        // Markers are bare words; clauses are keywords followed by '('
        match keyword.as_str() {
            "distinct" => {
                self.advance()?;
                return Ok(Directive::Distinct);
            }
            "all" => {
                self.advance()?;
                return Ok(Directive::All);
            }
            "where" | "by" | "having" | "limit" | "offset" | "order" => {}
            _ => return self.parse_expression(),
        }

        let call = self.parse_expression()?;
        let args = match call {
            Directive::Call { name, args } if name == keyword => args,
            other => return Ok(other),
        };

        if args.is_empty() {
            return Ok(Directive::call(keyword, args));
        }

        let count = args.len();
        let arity = || ParseError::ClauseArity {
            clause: keyword.clone(),
            count,
            position: start,
        };

        let mut args = args.into_iter();
        let (inner, direction) = match (args.next(), args.next(), args.next()) {
            (Some(inner), direction, None) => (inner, direction),
            _ => return Err(arity()),
        };

        let clause = match (keyword.as_str(), direction) {
            ("where", None) => Directive::where_clause(inner),
            ("by", None) => Directive::by(inner),
            ("having", None) => Directive::having(inner),
            ("limit", None) => Directive::limit(inner),
            ("offset", None) => Directive::offset(inner),
            ("order", None) => Directive::order(inner),
            ("order", Some(direction)) => match direction_value(&direction) {
                Some(value) => Directive::order_by(inner, value),
                None => {
                    return Err(ParseError::InvalidDirection {
                        found: describe_directive(&direction),
                        position: start,
                    });
                }
            },
            _ => return Err(arity()),
        };

        Ok(clause)
    }

    /// Parse an expression (lowest precedence first)
    pub fn parse_expression(&mut self) -> Result<Directive, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Directive, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            self.descend()?;
            let right = self.parse_and()?;
            left = Directive::binary(BinOp::Or, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Directive, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_comparison()?;

        while self.check(&Token::And) {
            self.advance()?;
            self.descend()?;
            let right = self.parse_comparison()?;
            left = Directive::binary(BinOp::And, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Directive, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_additive()?;

        loop {
            let op = match &self.current_token {
                Token::EqEq => BinOp::Equal,
                Token::NotEq => BinOp::NotEqual,
                Token::Lt => BinOp::LessThan,
                Token::LtEq => BinOp::LessEqual,
                Token::Gt => BinOp::GreaterThan,
                Token::GtEq => BinOp::GreaterEqual,
                _ => break,
            };

            self.advance()?;
            self.descend()?;
            let right = self.parse_additive()?;
            left = Directive::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Directive, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinOp::Plus,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };

            self.advance()?;
            self.descend()?;
            let right = self.parse_multiplicative()?;
            left = Directive::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Directive, ParseError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current_token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                _ => break,
            };

            self.advance()?;
            self.descend()?;
            let right = self.parse_unary()?;
            left = Directive::binary(op, left, right);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Directive, ParseError> {
        let op = match &self.current_token {
            Token::Plus => UnaryOp::Positive,
            Token::Minus => UnaryOp::Negative,
            Token::Exclamation => UnaryOp::Not,
            _ => return self.parse_primary(),
        };

        self.advance()?;
        let depth = self.depth;
        self.descend()?;
        let operand = self.parse_unary()?;
        self.depth = depth;
        Ok(Directive::unary(op, operand))
    }

    /// Parse primary expressions: literals, columns, calls and groups
    fn parse_primary(&mut self) -> Result<Directive, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Directive::constant(n))
            }
            Token::Float(n) => {
                self.advance()?;
                Ok(Directive::constant(n))
            }
            Token::Decimal(d) => {
                self.advance()?;
                Ok(Directive::constant(d))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Directive::constant(s))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Directive::constant(b))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.advance()?;
                    let depth = self.depth;
                    self.descend()?;
                    let args = self.parse_arguments()?;
                    self.depth = depth;
                    Ok(Directive::call(name, args))
                } else {
                    Ok(Directive::column(name))
                }
            }
            // Operator keywords in operand position name columns
            Token::And => {
                self.advance()?;
                Ok(Directive::column("and"))
            }
            Token::Or => {
                self.advance()?;
                Ok(Directive::column("or"))
            }
            Token::LParen => {
                self.advance()?;
                let depth = self.depth;
                self.descend()?;
                let inner = self.parse_expression()?;
                self.depth = depth;
                self.expect(Token::RParen)?;
                Ok(Directive::group(inner))
            }
            other => {
                self.current_token = other;
                Err(self.unexpected("expression"))
            }
        }
    }

    /// Parse call arguments after '(' up to and including ')'
    fn parse_arguments(&mut self) -> Result<Vec<Directive>, ParseError> {
        let mut args = Vec::new();

        while !self.check(&Token::RParen) {
            args.push(self.parse_expression()?);

            if !self.check(&Token::RParen) {
                self.expect(Token::Comma)?;
            }
        }

        self.expect(Token::RParen)?;
        Ok(args)
    }
}

/// Numeric value of an order direction: a number with an optional sign.
fn direction_value(directive: &Directive) -> Option<f64> {
    match directive {
        Directive::Constant(Value::Integer(n)) => Some(*n as f64),
        Directive::Constant(Value::Float(n)) => Some(*n),
        Directive::Constant(Value::Decimal(d)) => d.to_f64(),
        Directive::UnaryOp {
            op: UnaryOp::Negative,
            operand,
        } => direction_value(operand).map(|n| -n),
        Directive::UnaryOp {
            op: UnaryOp::Positive,
            operand,
        } => direction_value(operand),
        _ => None,
    }
}

/// Names a directive for diagnostics, e.g. `column` or `string constant`.
fn describe_directive(directive: &Directive) -> String {
    match directive {
        Directive::Constant(value) => format!("{} constant", value.type_name()),
        other => other.kind().to_string(),
    }
}

/// Parses a notation query such as `sales[by(region),where(amount>100)]`.
///
/// # Examples
///
/// ```
/// use dataquery::parse_query;
///
/// let query = parse_query("sales[by(region),order(total,-1),offset(10)]").unwrap();
/// assert_eq!(
///     query.sql(),
///     r#"SELECT "region" FROM "sales" GROUP BY "region" ORDER BY "total" DESC LIMIT 9223372036854775807 OFFSET 10"#
/// );
/// ```
pub fn parse_query(input: &str) -> Result<Dataquery, ParseError> {
    Parser::new(Lexer::new(input))?.parse_query()
}

/// Parses a single directive such as `where(a>1)` or `sum(x)*2`.
pub fn parse_directive(input: &str) -> Result<Directive, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}
