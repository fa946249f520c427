//! Tokenizer for the filter query language.
//!
//! Splits a UTF-8 query string into [`SpannedToken`]s, each carrying the byte
//! offset it started at so later stages can report positions. Lexing never
//! aborts: invalid input produces a [`FilterError`] and the lexer resumes at
//! the next character, so one pass surfaces every lexical problem alongside
//! whatever the parser finds in the salvageable tokens.

use super::fields::CmpOp;
use super::parser::FilterError;

/// One lexical token of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Bare word: a field name, or `true`/`false` in literal position.
    Word(String),
    /// Double-quoted string literal, unescaped.
    Str(String),
    /// Integer literal.
    Int(i64),
    /// Comparison operator.
    Op(CmpOp),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `AND` keyword or `&&`.
    And,
    /// `OR` keyword or `||`.
    Or,
    /// `NOT` keyword or `!`.
    Not,
}

impl Token {
    /// Short description used in syntax error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Word(w) => format!("`{w}`"),
            Self::Str(_) => "string literal".to_string(),
            Self::Int(n) => format!("`{n}`"),
            Self::Op(op) => format!("`{}`", op.symbol()),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::And => "`AND`".to_string(),
            Self::Or => "`OR`".to_string(),
            Self::Not => "`NOT`".to_string(),
        }
    }
}

/// A token together with the byte offset of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Tokenizes `query`, collecting lexical errors instead of stopping at the
/// first one.
pub(crate) fn lex(query: &str) -> (Vec<SpannedToken>, Vec<FilterError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut chars = query.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            _ if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(SpannedToken { token: Token::LParen, offset });
            }
            ')' => {
                chars.next();
                tokens.push(SpannedToken { token: Token::RParen, offset });
            }
            '=' => {
                chars.next();
                tokens.push(SpannedToken { token: Token::Op(CmpOp::Eq), offset });
            }
            '~' => {
                chars.next();
                tokens.push(SpannedToken { token: Token::Op(CmpOp::Fuzzy), offset });
            }
            '!' => {
                chars.next();
                if chars.peek().is_some_and(|&(_, next)| next == '=') {
                    chars.next();
                    tokens.push(SpannedToken { token: Token::Op(CmpOp::Ne), offset });
                } else {
                    tokens.push(SpannedToken { token: Token::Not, offset });
                }
            }
            '<' => {
                chars.next();
                let op = if chars.peek().is_some_and(|&(_, next)| next == '=') {
                    chars.next();
                    CmpOp::Le
                } else {
                    CmpOp::Lt
                };
                tokens.push(SpannedToken { token: Token::Op(op), offset });
            }
            '>' => {
                chars.next();
                let op = if chars.peek().is_some_and(|&(_, next)| next == '=') {
                    chars.next();
                    CmpOp::Ge
                } else {
                    CmpOp::Gt
                };
                tokens.push(SpannedToken { token: Token::Op(op), offset });
            }
            '&' => {
                chars.next();
                if chars.peek().is_some_and(|&(_, next)| next == '&') {
                    chars.next();
                    tokens.push(SpannedToken { token: Token::And, offset });
                } else {
                    errors.push(FilterError::Syntax {
                        message: "stray `&` (use `AND` or `&&`)".to_string(),
                        offset,
                    });
                }
            }
            '|' => {
                chars.next();
                if chars.peek().is_some_and(|&(_, next)| next == '|') {
                    chars.next();
                    tokens.push(SpannedToken { token: Token::Or, offset });
                } else {
                    errors.push(FilterError::Syntax {
                        message: "stray `|` (use `OR` or `||`)".to_string(),
                        offset,
                    });
                }
            }
            '"' => {
                chars.next();
                match lex_string(&mut chars) {
                    Ok(text) => tokens.push(SpannedToken { token: Token::Str(text), offset }),
                    Err(message) => errors.push(FilterError::Syntax { message, offset }),
                }
            }
            _ if c.is_ascii_digit() || c == '-' => {
                let (text, consumed_digits) = take_while(&mut chars, |ch| {
                    ch == '-' || ch.is_ascii_digit()
                });
                if consumed_digits && text != "-" {
                    match text.parse::<i64>() {
                        Ok(n) => tokens.push(SpannedToken { token: Token::Int(n), offset }),
                        Err(_) => errors.push(FilterError::Syntax {
                            message: format!("invalid integer literal `{text}`"),
                            offset,
                        }),
                    }
                } else {
                    errors.push(FilterError::Syntax {
                        message: format!("unexpected character `{c}`"),
                        offset,
                    });
                }
            }
            _ if is_word_start(c) => {
                let (word, _) = take_while(&mut chars, is_word_continue);
                let token = if word.eq_ignore_ascii_case("and") {
                    Token::And
                } else if word.eq_ignore_ascii_case("or") {
                    Token::Or
                } else if word.eq_ignore_ascii_case("not") {
                    Token::Not
                } else {
                    Token::Word(word)
                };
                tokens.push(SpannedToken { token, offset });
            }
            _ => {
                chars.next();
                errors.push(FilterError::Syntax {
                    message: format!("unexpected character `{c}`"),
                    offset,
                });
            }
        }
    }

    (tokens, errors)
}

/// Consumes characters while `keep` holds, returning the collected text and
/// whether anything was consumed.
fn take_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    keep: impl Fn(char) -> bool,
) -> (String, bool) {
    let mut text = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !keep(c) {
            break;
        }
        text.push(c);
        chars.next();
    }
    let consumed = !text.is_empty();
    (text, consumed)
}

/// Consumes a double-quoted string body after the opening quote, handling
/// `\"` and `\\` escapes.
fn lex_string(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> std::result::Result<String, String> {
    let mut text = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => return Ok(text),
            Some((_, '\\')) => match chars.next() {
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, other)) => {
                    text.push('\\');
                    text.push(other);
                }
                None => return Err("unterminated string literal".to_string()),
            },
            Some((_, c)) => text.push(c),
            None => return Err("unterminated string literal".to_string()),
        }
    }
}
