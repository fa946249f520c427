//! Query-language filter engine for displayed rows.
//!
//! This module decides, per displayed item, whether it should be visible under
//! the user's current filter query. It is pluggable over entity kinds: the
//! compiler works against the [`FieldProfile`] capability rather than any
//! concrete entity, so refs, commits, and future kinds share one grammar, one
//! parser, and one evaluator.
//!
//! # Pipeline
//!
//! ```text
//! query string ──lexer──▶ tokens ──parser──▶ Expr + Vec<FilterError>
//!                                    │
//!                              (errors empty)
//!                                    ▼
//!                            CompiledFilter ──RowFilter──▶ per-row bool
//! ```
//!
//! Compilation collects every error before giving up; evaluation is pure and
//! reusable. See [`compile`] for the entry point and [`RowFilter`] for the
//! structural-row bypass the views use.
//!
//! # Example
//!
//! ```
//! use gitscope::filter::{RefFilter, RefFields};
//! use gitscope::domain::{RefEntry, RefKind, RefRow};
//!
//! let filter = RefFilter::new(r#"kind = "branch" AND name ~ "fix""#, RefFields)
//!     .expect("query compiles");
//!
//! let row = RefRow::Entry(RefEntry {
//!     name: "fix/panic-on-empty-repo".to_string(),
//!     kind: RefKind::Branch,
//!     remote: None,
//!     head: false,
//! });
//! assert!(filter.matches(&row));
//! assert!(filter.matches(&RefRow::Header("Branches".to_string())));
//! ```

mod adapter;
mod compile;
mod fields;
mod lexer;
mod parser;

pub use adapter::{CommitFilter, RefFilter, RowFilter};
pub use compile::{compile, CompiledFilter};
pub use fields::{CmpOp, CommitFields, FieldProfile, FieldType, RefFields, Value};
pub use parser::FilterError;
