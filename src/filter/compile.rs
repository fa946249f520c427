//! Query compilation and predicate evaluation.
//!
//! [`compile`] turns a query string and a [`FieldProfile`] into a
//! [`CompiledFilter`]: a reusable, pure predicate over one entity kind. The
//! compiler validates every field reference and literal up front and returns
//! *all* problems it finds as one ordered list, so the caller can display them
//! together; a predicate is only produced when the query is entirely clean.
//!
//! Evaluation touches no shared mutable state, so one compiled filter may be
//! applied concurrently across many entities (e.g. when filtering a large ref
//! list in parallel).

use super::fields::{CmpOp, FieldProfile, Value};
use super::lexer::lex;
use super::parser::{parse, Expr, FilterError};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A compiled, reusable filter predicate for one entity kind.
///
/// Produced by [`compile`]. Holds the parsed expression tree and the field
/// profile it was compiled against; evaluation is `&self`-pure.
#[derive(Debug, Clone)]
pub struct CompiledFilter<P: FieldProfile> {
    profile: P,
    expr: Expr,
}

/// Compiles `query` against `profile` into a reusable predicate.
///
/// An empty (or all-whitespace) query compiles to a predicate that accepts
/// every entity, which is how "no filter active" is represented uniformly.
///
/// # Errors
///
/// Returns every problem found in the query — unknown fields, type
/// mismatches, syntax errors — ordered by byte offset. The list is never
/// empty in the `Err` case, and no predicate exists until the query compiles
/// cleanly.
pub fn compile<P: FieldProfile>(
    query: &str,
    profile: P,
) -> std::result::Result<CompiledFilter<P>, Vec<FilterError>> {
    let _span = tracing::debug_span!("compile_filter", query_len = query.len()).entered();

    if query.trim().is_empty() {
        tracing::debug!("empty query, compiling pass-through filter");
        return Ok(CompiledFilter { profile, expr: Expr::All });
    }

    let (tokens, mut errors) = lex(query);
    // Parse whatever lexed cleanly even when the lexer reported problems, so
    // one compile surfaces lexical and semantic errors together.
    let (expr, parse_errors) = parse(&tokens, |name| profile.field_type(name));
    errors.extend(parse_errors);

    if errors.is_empty() {
        Ok(CompiledFilter { profile, expr })
    } else {
        errors.sort_by_key(FilterError::offset);
        tracing::debug!(error_count = errors.len(), "query failed to compile");
        Err(errors)
    }
}

impl<P: FieldProfile> CompiledFilter<P> {
    /// Evaluates the filter against one entity.
    ///
    /// Pure and side-effect free; `AND`/`OR` short-circuit. String equality
    /// is exact and case-sensitive, `~` matches fuzzily and
    /// case-insensitively, integers and dates compare by natural order.
    #[must_use]
    pub fn matches(&self, entity: &P::Entity) -> bool {
        self.eval(&self.expr, entity)
    }

    fn eval(&self, expr: &Expr, entity: &P::Entity) -> bool {
        match expr {
            Expr::All => true,
            Expr::And(left, right) => self.eval(left, entity) && self.eval(right, entity),
            Expr::Or(left, right) => self.eval(left, entity) || self.eval(right, entity),
            Expr::Not(inner) => !self.eval(inner, entity),
            Expr::Cmp { field, op, value } => {
                let Some(actual) = self.profile.field_value(entity, field) else {
                    // The compiler only emits registered field names.
                    debug_assert!(false, "unregistered field `{field}` reached evaluation");
                    return false;
                };
                compare(&actual, *op, value)
            }
        }
    }
}

fn compare(actual: &Value, op: CmpOp, literal: &Value) -> bool {
    match op {
        CmpOp::Eq => actual == literal,
        CmpOp::Ne => actual != literal,
        CmpOp::Lt => natural_order(actual, literal).is_some_and(std::cmp::Ordering::is_lt),
        CmpOp::Le => natural_order(actual, literal).is_some_and(std::cmp::Ordering::is_le),
        CmpOp::Gt => natural_order(actual, literal).is_some_and(std::cmp::Ordering::is_gt),
        CmpOp::Ge => natural_order(actual, literal).is_some_and(std::cmp::Ordering::is_ge),
        CmpOp::Fuzzy => match (actual, literal) {
            (Value::Str(haystack), Value::Str(needle)) => SkimMatcherV2::default()
                .fuzzy_match(&haystack.to_lowercase(), &needle.to_lowercase())
                .is_some(),
            _ => false,
        },
    }
}

/// Natural ordering of two values of the same ordered type.
///
/// Type checking restricts ordering operators to `Int`/`Date`, so other
/// combinations never reach evaluation.
fn natural_order(actual: &Value, literal: &Value) -> Option<std::cmp::Ordering> {
    match (actual, literal) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
