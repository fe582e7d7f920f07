//! Trial filter predicates
//!
//! A small boolean language over metadata columns, e.g.
//! `(target_present == True) and detect_seen == False`.
//!
//! ```text
//! expr       := or
//! or         := and (("or" | "|") and)*
//! and        := unary (("and" | "&") unary)*
//! unary      := ("not" | "~") unary | primary
//! primary    := "(" expr ")" | comparison
//! comparison := IDENT OP literal
//! literal    := NUMBER | True | False | 'text' | "text"
//! ```
//!
//! Missing values never satisfy a comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::metadata::{MetadataTable, MetadataValue};
use crate::error::{Error, Result};

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Parsed filter expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// `column OP literal`
    Compare { column: String, op: CompareOp, value: MetadataValue },
    /// Both sides hold
    And(Box<Predicate>, Box<Predicate>),
    /// Either side holds
    Or(Box<Predicate>, Box<Predicate>),
    /// Negation
    Not(Box<Predicate>),
}

impl Predicate {
    /// Parse a filter string.
    pub fn parse(query: &str) -> Result<Self> {
        let tokens = tokenize(query)?;
        let mut parser = Parser { tokens: &tokens, pos: 0, query };
        let expr = parser.or()?;
        if parser.pos != tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }

    /// Evaluate against every trial of a table, returning a boolean mask.
    pub fn evaluate(&self, table: &MetadataTable) -> Result<Vec<bool>> {
        match self {
            Predicate::Compare { column, op, value } => {
                let cells = table.require(column)?;
                Ok(cells.iter().map(|cell| compare(cell, *op, value)).collect())
            }
            Predicate::And(a, b) => {
                let (a, b) = (a.evaluate(table)?, b.evaluate(table)?);
                Ok(a.iter().zip(&b).map(|(x, y)| *x && *y).collect())
            }
            Predicate::Or(a, b) => {
                let (a, b) = (a.evaluate(table)?, b.evaluate(table)?);
                Ok(a.iter().zip(&b).map(|(x, y)| *x || *y).collect())
            }
            Predicate::Not(inner) => Ok(inner.evaluate(table)?.iter().map(|x| !x).collect()),
        }
    }

    /// Conjunction of two predicates.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }
}

impl FromStr for Predicate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Predicate::parse(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { column, op, value } => {
                write!(f, "{column} {} {value}", op.symbol())
            }
            Predicate::And(a, b) => write!(f, "({a}) and ({b})"),
            Predicate::Or(a, b) => write!(f, "({a}) or ({b})"),
            Predicate::Not(a) => write!(f, "not ({a})"),
        }
    }
}

/// Evaluate an optional query string; `None` keeps every trial.
pub fn filter_mask(query: Option<&str>, table: &MetadataTable) -> Result<Vec<bool>> {
    match query {
        Some(q) => Predicate::parse(q)?.evaluate(table),
        None => Ok(vec![true; table.n_trials()]),
    }
}

fn compare(cell: &MetadataValue, op: CompareOp, literal: &MetadataValue) -> bool {
    if cell.is_missing() {
        return false;
    }
    match (cell, literal) {
        (MetadataValue::Text(a), MetadataValue::Text(b)) => op.holds(a.as_str().cmp(b.as_str())),
        (MetadataValue::Text(_), _) | (_, MetadataValue::Text(_)) => false,
        _ => match (cell.as_f64(), literal.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).is_some_and(|ord| op.holds(ord)),
            _ => false,
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Literal(MetadataValue),
    Op(CompareOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

fn tokenize(query: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = query.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let fail = |msg: String| Error::config("query", format!("{msg} in '{query}'"));

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '&' => {
                tokens.push(Token::And);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Or);
                i += 1;
            }
            '~' => {
                tokens.push(Token::Not);
                i += 1;
            }
            '=' | '!' | '<' | '>' => {
                let next = chars.get(i + 1).copied();
                let (op, width) = match (c, next) {
                    ('=', Some('=')) => (CompareOp::Eq, 2),
                    ('!', Some('=')) => (CompareOp::Ne, 2),
                    ('<', Some('=')) => (CompareOp::Le, 2),
                    ('>', Some('=')) => (CompareOp::Ge, 2),
                    ('<', _) => (CompareOp::Lt, 1),
                    ('>', _) => (CompareOp::Gt, 1),
                    _ => return Err(fail(format!("unknown operator at position {i}"))),
                };
                tokens.push(Token::Op(op));
                i += width;
            }
            '\'' | '"' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&ch| ch == c)
                    .ok_or_else(|| fail("unterminated string".into()))?;
                let text: String = chars[i + 1..i + 1 + end].iter().collect();
                tokens.push(Token::Literal(MetadataValue::Text(text)));
                i += end + 2;
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let start = i;
                i += 1;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || matches!(chars[i], '.' | 'e' | 'E'))
                {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value: f64 =
                    text.parse().map_err(|_| fail(format!("invalid number '{text}'")))?;
                tokens.push(Token::Literal(MetadataValue::Number(value)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "True" | "true" => Token::Literal(MetadataValue::Bool(true)),
                    "False" | "false" => Token::Literal(MetadataValue::Bool(false)),
                    _ => Token::Ident(word),
                });
            }
            other => return Err(fail(format!("unexpected character '{other}'"))),
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    query: &'a str,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> Error {
        Error::config("query", format!("{message} at token {} in '{}'", self.pos, self.query))
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn or(&mut self) -> Result<Predicate> {
        let mut left = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.and()?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Predicate> {
        let mut left = self.unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.unary()?;
            left = Predicate::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Predicate> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            return Ok(Predicate::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Predicate> {
        match self.next().cloned() {
            Some(Token::LParen) => {
                let inner = self.or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("expected ')'")),
                }
            }
            Some(Token::Ident(column)) => {
                let op = match self.next() {
                    Some(Token::Op(op)) => *op,
                    _ => return Err(self.error("expected comparison operator")),
                };
                let value = match self.next() {
                    Some(Token::Literal(v)) => v.clone(),
                    _ => return Err(self.error("expected literal")),
                };
                Ok(Predicate::Compare { column, op, value })
            }
            _ => Err(self.error("expected column or '('")),
        }
    }
}
