//! Parser for the textual format expression syntax.
//!
//! ```text
//! expr    := or
//! or      := and ("or" and)*
//! and     := concat ("and" concat)*
//! concat  := atom ("+" atom)*
//! atom    := IDENT | STRING | "[" [literal ("," literal)*] "]" | "(" expr ")"
//! literal := STRING | "pause"
//! ```
//!
//! Identifiers are quantity references. Blank input is the empty literal.

use crate::error::ParseError;
use crate::expr::Expr;
use crate::types::Fragment;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Plus,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Or,
    And,
    Pause,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::Str(_) => "string".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Comma => "','".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Or => "'or'".to_string(),
            Token::And => "'and'".to_string(),
            Token::Pause => "'pause'".to_string(),
        }
    }
}

/// Parse a textual format expression.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Ok(Expr::empty());
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: source.len(),
    };
    let expr = parser.or_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some((token, offset)) => Err(ParseError::Expected {
            expected: "end of expression",
            found: token.describe(),
            offset,
        }),
    }
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | ',' | '[' | ']' | '(' | ')' => {
                chars.next();
                let token = match c {
                    '+' => Token::Plus,
                    ',' => Token::Comma,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                };
                tokens.push((token, offset));
            }
            '"' | '\'' => {
                chars.next();
                let quote = c;
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, ch)) = chars.next() {
                    match ch {
                        '\\' => match chars.next() {
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, 'r')) => value.push('\r'),
                            Some((_, '0')) => value.push('\0'),
                            Some((_, escaped)) => value.push(escaped),
                            None => break,
                        },
                        ch if ch == quote => {
                            closed = true;
                            break;
                        }
                        ch => value.push(ch),
                    }
                }
                if !closed {
                    return Err(ParseError::UnterminatedString(offset));
                }
                tokens.push((Token::Str(value), offset));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let token = match ident.as_str() {
                    "or" => Token::Or,
                    "and" => Token::And,
                    "pause" => Token::Pause,
                    _ => Token::Ident(ident),
                };
                tokens.push((token, offset));
            }
            other => {
                return Err(ParseError::UnexpectedChar {
                    found: other,
                    offset,
                })
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.pos).map(|(token, offset)| (token, *offset))
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if matches!(self.peek(), Some((token, _)) if token == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token, label: &'static str) -> Result<(), ParseError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(label))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some((token, offset)) => ParseError::Expected {
                expected,
                found: token.describe(),
                offset,
            },
            None => ParseError::Expected {
                expected,
                found: "end of input".to_string(),
                offset: self.end,
            },
        }
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.and_expr()?;
        while self.eat(&Token::Or) {
            let right = self.and_expr()?;
            left = Expr::or(left, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.concat_expr()?;
        while self.eat(&Token::And) {
            let right = self.concat_expr()?;
            left = Expr::and(left, right);
        }
        Ok(left)
    }

    fn concat_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.atom()?;
        while self.eat(&Token::Plus) {
            let right = self.atom()?;
            left = Expr::concat(left, right);
        }
        Ok(left)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let Some((token, _)) = self.peek() else {
            return Err(self.unexpected("a quantity, literal, or '('"));
        };
        match token.clone() {
            Token::Ident(name) => {
                self.pos += 1;
                Ok(Expr::reference(name))
            }
            Token::Str(value) => {
                self.pos += 1;
                Ok(Expr::text(value))
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.or_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::LBracket => {
                self.pos += 1;
                self.list_literal()
            }
            _ => Err(self.unexpected("a quantity, literal, or '('")),
        }
    }

    fn list_literal(&mut self) -> Result<Expr, ParseError> {
        let mut fragments = Vec::new();
        if self.eat(&Token::RBracket) {
            return Ok(Expr::Literal(fragments));
        }
        loop {
            match self.peek() {
                Some((Token::Str(value), _)) => {
                    fragments.push(Fragment::text(value.clone()));
                    self.pos += 1;
                }
                Some((Token::Pause, _)) => {
                    fragments.push(Fragment::Pause);
                    self.pos += 1;
                }
                _ => return Err(self.unexpected("a string or 'pause'")),
            }
            if self.eat(&Token::RBracket) {
                return Ok(Expr::Literal(fragments));
            }
            self.expect(Token::Comma, "',' or ']'")?;
        }
    }
}
