//! Parser and type checker for the filter query language.
//!
//! Implements the grammar
//!
//! ```text
//! query   := <empty> | or
//! or      := and ( OR and )*
//! and     := cmp ( AND cmp )*
//! cmp     := NOT cmp | '(' or ')' | field op literal
//! op      := '=' | '!=' | '<' | '<=' | '>' | '>=' | '~'
//! literal := quoted string | integer | true | false
//! ```
//!
//! by recursive descent. `AND` binds tighter than `OR`, both left-associative,
//! parentheses override, `NOT` applies to the following comparison or group.
//!
//! # Error collection
//!
//! The parser never stops at the first problem. Field references are checked
//! against the descriptor as atoms are built (unknown field, operator/type and
//! literal/type mismatches), and a malformed atom is skipped up to the next
//! connective or closing parenthesis so independent sub-expressions still get
//! checked. Every problem is a [`FilterError`] carrying the byte offset of the
//! offending token; the caller reports them all at once.

use super::fields::{CmpOp, FieldType, Value};
use super::lexer::{SpannedToken, Token};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// One problem found while compiling a query.
///
/// Compile errors are data, not control flow: the compiler collects every
/// error in the query and returns them together, ordered by source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The query references a field the descriptor does not declare.
    #[error("unknown field `{name}` at offset {offset}")]
    UnknownField { name: String, offset: usize },

    /// A literal or operator is incompatible with a field's declared type.
    #[error("type mismatch at offset {offset}: {message}")]
    TypeMismatch { message: String, offset: usize },

    /// Malformed token sequence.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },
}

impl FilterError {
    /// Byte offset of the offending token within the query string.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownField { offset, .. }
            | Self::TypeMismatch { offset, .. }
            | Self::Syntax { offset, .. } => *offset,
        }
    }
}

/// Parsed expression tree of a compiled filter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// Matches every entity. Produced by the empty query, and substituted for
    /// malformed sub-expressions so parsing can continue (the substitute is
    /// never evaluated, since its presence implies a non-empty error list).
    All,
    /// One `field op literal` comparison.
    Cmp {
        field: String,
        op: CmpOp,
        value: Value,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

/// Parses and type-checks a token stream against a field-type lookup.
///
/// Returns the expression tree together with every error found. The tree is
/// only meaningful when the error list is empty.
pub(crate) fn parse(
    tokens: &[SpannedToken],
    field_type: impl Fn(&str) -> Option<FieldType>,
) -> (Expr, Vec<FilterError>) {
    let mut parser = Parser {
        tokens,
        pos: 0,
        field_type: &field_type,
        errors: Vec::new(),
    };
    let expr = parser.parse_or();
    if let Some(trailing) = parser.peek().cloned() {
        parser.errors.push(FilterError::Syntax {
            message: format!("unexpected {}", trailing.token.describe()),
            offset: trailing.offset,
        });
    }
    (expr, parser.errors)
}

struct Parser<'t> {
    tokens: &'t [SpannedToken],
    pos: usize,
    field_type: &'t dyn Fn(&str) -> Option<FieldType>,
    errors: Vec<FilterError>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&SpannedToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Offset just past the last token, used for errors at end of input.
    fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.offset + 1)
    }

    fn parse_or(&mut self) -> Expr {
        let mut left = self.parse_and();
        while matches!(self.peek(), Some(t) if t.token == Token::Or) {
            self.advance();
            let right = self.parse_and();
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        left
    }

    fn parse_and(&mut self) -> Expr {
        let mut left = self.parse_unary();
        while matches!(self.peek(), Some(t) if t.token == Token::And) {
            self.advance();
            let right = self.parse_unary();
            left = Expr::And(Box::new(left), Box::new(right));
        }
        left
    }

    fn parse_unary(&mut self) -> Expr {
        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Not) => {
                self.advance();
                Expr::Not(Box::new(self.parse_unary()))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_or();
                if matches!(self.peek(), Some(t) if t.token == Token::RParen) {
                    self.advance();
                } else {
                    let offset = self.peek().map_or_else(|| self.end_offset(), |t| t.offset);
                    self.errors.push(FilterError::Syntax {
                        message: "expected `)`".to_string(),
                        offset,
                    });
                }
                inner
            }
            _ => self.parse_atom(),
        }
    }

    /// Parses one `field op literal` atom, recovering to the next connective
    /// on failure so later atoms still get checked.
    fn parse_atom(&mut self) -> Expr {
        let Some(first) = self.advance().cloned() else {
            let offset = self.end_offset();
            self.errors.push(FilterError::Syntax {
                message: "expected a comparison".to_string(),
                offset,
            });
            return Expr::All;
        };

        let Token::Word(field) = first.token else {
            self.errors.push(FilterError::Syntax {
                message: format!("expected field name, found {}", first.token.describe()),
                offset: first.offset,
            });
            self.synchronize();
            return Expr::All;
        };

        let declared = (self.field_type)(&field);
        if declared.is_none() {
            self.errors.push(FilterError::UnknownField {
                name: field.clone(),
                offset: first.offset,
            });
        }

        let op = match self.advance().cloned() {
            Some(SpannedToken { token: Token::Op(op), offset }) => {
                if let Some(ty) = declared {
                    if !op.valid_for(ty) {
                        self.errors.push(FilterError::TypeMismatch {
                            message: format!(
                                "operator `{}` is not valid on {} field `{field}`",
                                op.symbol(),
                                ty.name()
                            ),
                            offset,
                        });
                    }
                }
                op
            }
            other => {
                let (found, offset) = other.map_or_else(
                    || ("end of query".to_string(), self.end_offset()),
                    |t| (t.token.describe(), t.offset),
                );
                self.errors.push(FilterError::Syntax {
                    message: format!("expected comparison operator after `{field}`, found {found}"),
                    offset,
                });
                self.synchronize();
                return Expr::All;
            }
        };

        let Some(literal) = self.advance().cloned() else {
            let offset = self.end_offset();
            self.errors.push(FilterError::Syntax {
                message: format!("expected literal after `{}`", op.symbol()),
                offset,
            });
            return Expr::All;
        };

        let value = self.check_literal(&field, declared, &literal);
        value.map_or(Expr::All, |value| Expr::Cmp { field, op, value })
    }

    /// Coerces and type-checks the literal token of one atom.
    ///
    /// Returns `None` when a usable value cannot be produced; the error has
    /// already been recorded. With an unknown field there is no declared type
    /// to check against, so the literal is accepted as lexed.
    fn check_literal(
        &mut self,
        field: &str,
        declared: Option<FieldType>,
        literal: &SpannedToken,
    ) -> Option<Value> {
        let lexed = match &literal.token {
            Token::Str(text) => Value::Str(text.clone()),
            Token::Int(n) => Value::Int(*n),
            Token::Word(word) if word.eq_ignore_ascii_case("true") => Value::Bool(true),
            Token::Word(word) if word.eq_ignore_ascii_case("false") => Value::Bool(false),
            other => {
                self.errors.push(FilterError::Syntax {
                    message: format!(
                        "expected literal, found {} (string literals must be quoted)",
                        other.describe()
                    ),
                    offset: literal.offset,
                });
                return None;
            }
        };

        let Some(ty) = declared else {
            // Unknown field was already reported; keep the literal so parsing
            // of the surrounding expression continues normally.
            return Some(lexed);
        };

        match (ty, lexed) {
            (FieldType::Date, Value::Str(text)) => match parse_date(&text) {
                Some(date) => Some(Value::Date(date)),
                None => {
                    self.errors.push(FilterError::TypeMismatch {
                        message: format!(
                            "field `{field}` is a date; expected `YYYY-MM-DD` or RFC 3339, found \"{text}\""
                        ),
                        offset: literal.offset,
                    });
                    None
                }
            },
            (_, lexed) if lexed.field_type() == ty => Some(lexed),
            (_, lexed) => {
                self.errors.push(FilterError::TypeMismatch {
                    message: format!(
                        "field `{field}` has type {}, literal has type {}",
                        ty.name(),
                        lexed.field_type().name()
                    ),
                    offset: literal.offset,
                });
                None
            }
        }
    }

    /// Skips tokens up to the next connective or group boundary after a
    /// malformed atom.
    fn synchronize(&mut self) {
        while let Some(t) = self.peek() {
            if matches!(t.token, Token::And | Token::Or | Token::RParen) {
                break;
            }
            self.pos += 1;
        }
    }
}

/// Parses a date literal: `YYYY-MM-DD` (midnight UTC) or full RFC 3339.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::lexer::lex;

    fn types(name: &str) -> Option<FieldType> {
        match name.to_ascii_lowercase().as_str() {
            "name" | "author" => Some(FieldType::Str),
            "age" => Some(FieldType::Int),
            "head" => Some(FieldType::Bool),
            "date" => Some(FieldType::Date),
            _ => None,
        }
    }

    fn parse_query(query: &str) -> (Expr, Vec<FilterError>) {
        let (tokens, lex_errors) = lex(query);
        let (expr, mut errors) = parse(&tokens, types);
        errors.extend(lex_errors);
        (expr, errors)
    }

    fn errors_of(query: &str) -> Vec<FilterError> {
        parse_query(query).1
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let (expr, errors) = parse_query(r#"name = "a" OR name = "b" AND head = true"#);
        assert!(errors.is_empty());
        // Must parse as a OR (b AND head).
        match expr {
            Expr::Or(_, right) => assert!(matches!(*right, Expr::And(_, _))),
            other => panic!("expected Or at the root, got {other:?}"),
        }
    }

    #[test]
    fn parentheses_override_precedence() {
        let (expr, errors) = parse_query(r#"(name = "a" OR name = "b") AND head = true"#);
        assert!(errors.is_empty());
        match expr {
            Expr::And(left, _) => assert!(matches!(*left, Expr::Or(_, _))),
            other => panic!("expected And at the root, got {other:?}"),
        }
    }

    #[test]
    fn not_applies_to_following_comparison() {
        let (expr, errors) = parse_query(r#"NOT name = "a" AND head = true"#);
        assert!(errors.is_empty());
        match expr {
            Expr::And(left, _) => assert!(matches!(*left, Expr::Not(_))),
            other => panic!("expected And at the root, got {other:?}"),
        }
    }

    #[test]
    fn unknown_field_is_reported_once_with_name() {
        let errors = errors_of(r#"upstream = "origin""#);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FilterError::UnknownField { name, .. } if name == "upstream"
        ));
    }

    #[test]
    fn ordering_operator_on_string_field_is_a_type_mismatch() {
        let errors = errors_of(r#"name < "a""#);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], FilterError::TypeMismatch { .. }));
    }

    #[test]
    fn literal_type_must_match_field_type() {
        let errors = errors_of("age = \"old\"");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FilterError::TypeMismatch { message, .. } if message.contains("int")
        ));
    }

    #[test]
    fn date_literals_coerce_from_quoted_strings() {
        let (expr, errors) = parse_query(r#"date >= "2024-03-01""#);
        assert!(errors.is_empty());
        assert!(matches!(
            expr,
            Expr::Cmp { value: Value::Date(_), op: CmpOp::Ge, .. }
        ));
    }

    #[test]
    fn malformed_date_literal_is_a_type_mismatch() {
        let errors = errors_of(r#"date = "last tuesday""#);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], FilterError::TypeMismatch { .. }));
    }

    #[test]
    fn bare_word_in_literal_position_is_malformed() {
        let errors = errors_of("name = main");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FilterError::Syntax { message, .. } if message.contains("quoted")
        ));
    }

    #[test]
    fn errors_in_independent_subexpressions_all_collect() {
        let errors = errors_of(r#"upstream = "x" AND age = "old" OR name < "a""#);
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], FilterError::UnknownField { .. }));
        assert!(matches!(&errors[1], FilterError::TypeMismatch { .. }));
        assert!(matches!(&errors[2], FilterError::TypeMismatch { .. }));
    }

    #[test]
    fn recovery_skips_to_next_connective() {
        // First atom is malformed; the unknown-field atom after AND must
        // still be checked.
        let errors = errors_of(r#"= "a" AND upstream = "b""#);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], FilterError::Syntax { .. }));
        assert!(matches!(&errors[1], FilterError::UnknownField { .. }));
    }

    #[test]
    fn missing_close_paren_is_reported() {
        let errors = errors_of(r#"(name = "a" AND head = true"#);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            FilterError::Syntax { message, .. } if message.contains(")")
        ));
    }

    #[test]
    fn trailing_tokens_are_a_syntax_error() {
        let errors = errors_of(r#"name = "a" )"#);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], FilterError::Syntax { .. }));
    }

    #[test]
    fn bool_keywords_are_case_insensitive_literals() {
        let (expr, errors) = parse_query("head = TRUE");
        assert!(errors.is_empty());
        assert!(matches!(
            expr,
            Expr::Cmp { value: Value::Bool(true), .. }
        ));
    }
}
