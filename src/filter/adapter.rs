//! Row-level filter adapter with structural-row bypass.
//!
//! [`RowFilter`] binds a compiled predicate to one entity kind and applies the
//! one domain rule the generic compiler must not know about: structural rows
//! (group headers, separators, loading placeholders) are never hidden by a
//! filter, only data rows are. A view applies its active filter by asking the
//! adapter about every row it is about to draw.

use super::compile::{compile, CompiledFilter};
use super::fields::{CommitFields, FieldProfile, RefFields};
use super::parser::FilterError;
use crate::domain::FilterRow;

/// A compiled filter bound to one row kind, with structural rows passing
/// unconditionally.
///
/// Construction propagates compile errors, so a `RowFilter` that exists is
/// always backed by a valid predicate.
#[derive(Debug, Clone)]
pub struct RowFilter<P: FieldProfile> {
    filter: CompiledFilter<P>,
}

/// Row filter over the refs view.
pub type RefFilter = RowFilter<RefFields>;

/// Row filter over the log view.
pub type CommitFilter = RowFilter<CommitFields>;

impl<P: FieldProfile> RowFilter<P> {
    /// Compiles `query` against `profile` and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns the full compile error list when the query is invalid; see
    /// [`compile`].
    pub fn new(query: &str, profile: P) -> std::result::Result<Self, Vec<FilterError>> {
        compile(query, profile).map(|filter| Self { filter })
    }

    /// Decides whether `row` stays visible under this filter.
    ///
    /// Structural rows always pass; data rows defer to the compiled
    /// predicate.
    #[must_use]
    pub fn matches<R>(&self, row: &R) -> bool
    where
        R: FilterRow<Entry = P::Entity>,
    {
        row.entry().map_or(true, |entry| self.filter.matches(entry))
    }
}
