use std::fmt;

use rust_decimal::Decimal;

use crate::ast::Token;

/// Location of a character in the lexer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// 0-based character offset
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while tokenizing notation text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unexpected '=' at {position} (did you mean '==' or '!='?)")]
    LoneEquals { position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },

    #[error("invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position(),
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let invalid = || LexError::InvalidNumber {
            text: number.clone(),
            position: start,
        };

        // Integers too wide for i64, and fractions that f64 would not print
        // back identically, stay exact as decimals. f64 is the last resort.
        if !is_float && let Ok(n) = number.parse::<i64>() {
            return Ok(Token::Integer(n));
        }
        if is_float
            && let Ok(n) = number.parse::<f64>()
            && n.to_string() == number
        {
            return Ok(Token::Float(n));
        }
        if let Ok(d) = Decimal::from_str_exact(&number) {
            return Ok(Token::Decimal(d));
        }
        number.parse::<f64>().map(Token::Float).map_err(|_| invalid())
    }

    /// Consumes one character and returns `token`.
    fn single(&mut self, token: Token) -> Result<Token, LexError> {
        self.advance();
        Ok(token)
    }

    /// Returns `double` if the next character is `=`, otherwise `single`.
    fn with_equals(&mut self, double: Token, single: Token) -> Result<Token, LexError> {
        if self.peek_char(1) == Some('=') {
            self.advance();
            self.advance();
            Ok(double)
        } else {
            self.single(single)
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some(',') => self.single(Token::Comma),
            Some('+') => self.single(Token::Plus),
            Some('-') => self.single(Token::Minus),
            Some('*') => self.single(Token::Star),
            Some('/') => self.single(Token::Slash),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::EqEq)
                } else {
                    Err(LexError::LoneEquals {
                        position: self.position(),
                    })
                }
            }
            Some('!') => self.with_equals(Token::NotEq, Token::Exclamation),
            Some('<') => self.with_equals(Token::LtEq, Token::Lt),
            Some('>') => self.with_equals(Token::GtEq, Token::Gt),
            Some('"') => self.read_string('"').map(Token::String),
            Some('\'') => self.read_string('\'').map(Token::String),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                Ok(match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    _ => Token::Identifier(ident),
                })
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position(),
            }),
        }
    }

    /// Tokenizes the remaining input, ending with [`Token::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or true false where");
    assert_eq!(lexer.next_token(), Ok(Token::And));
    assert_eq!(lexer.next_token(), Ok(Token::Or));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("where".to_string())));
}

#[test]
fn test_number_widths() {
    let mut lexer = Lexer::new("42 2.5 100000000000000000000 0.1234567890123456789");
    assert_eq!(lexer.next_token(), Ok(Token::Integer(42)));
    assert_eq!(lexer.next_token(), Ok(Token::Float(2.5)));
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Decimal(Decimal::from_str_exact("100000000000000000000").unwrap()))
    );
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Decimal(Decimal::from_str_exact("0.1234567890123456789").unwrap()))
    );
}

#[test]
fn test_number_beyond_decimal_falls_back_to_float() {
    let digits = "1".repeat(40);
    let mut lexer = Lexer::new(&digits);
    assert_eq!(lexer.next_token(), Ok(Token::Float(digits.parse::<f64>().unwrap())));
}

#[test]
fn test_position_tracks_lines() {
    let mut lexer = Lexer::new("t[\n  @]");
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("t".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LBracket));
    let err = lexer.next_token().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '@',
            position: Position {
                line: 2,
                column: 3,
                offset: 5
            }
        }
    );
}
