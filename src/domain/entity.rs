//! Entity models for displayable repository items.
//!
//! This module defines the concrete entity kinds the filter engine can bind to:
//! git references ([`RefEntry`]) and commits ([`Commit`]), together with the row
//! wrappers the rendering layer actually displays ([`RefRow`], [`CommitRow`]).
//!
//! # Rows vs. entities
//!
//! A view displays *rows*. Most rows carry an entity (a ref, a commit), but some
//! are structural scaffolding: group headers, separators, loading placeholders.
//! Structural rows are never subject to filtering — hiding the "Tags" header
//! because no tag matched would leave the view unreadable — so the row wrappers
//! distinguish the two through the [`FilterRow`] trait, and the filter adapter
//! passes structural rows through unconditionally.
//!
//! Entities are owned by the rendering layer; the filter engine only borrows
//! them for the duration of one predicate evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a git reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefKind {
    /// The checked-out `HEAD` reference.
    Head,
    /// A local branch under `refs/heads/`.
    Branch,
    /// A remote-tracking branch under `refs/remotes/`.
    RemoteBranch,
    /// A tag under `refs/tags/`.
    Tag,
}

/// A git reference as displayed in the refs view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefEntry {
    /// Short reference name (e.g. `main`, `v1.2.0`), without the `refs/` prefix.
    pub name: String,
    /// What kind of reference this is.
    pub kind: RefKind,
    /// Remote name for remote-tracking branches, `None` otherwise.
    pub remote: Option<String>,
    /// Whether this reference is the current `HEAD` or points at it.
    pub head: bool,
}

/// A commit as displayed in the log view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full object id (hex).
    pub id: String,
    /// First line of the commit message.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Author date.
    pub date: DateTime<Utc>,
}

/// A displayable row that may or may not carry a filterable entity.
///
/// Implemented by the per-view row wrappers. `entry` returns `None` for
/// structural rows (headers, separators, placeholders), which the filter
/// adapter treats as an unconditional pass.
pub trait FilterRow {
    /// The entity kind carried by data rows of this row type.
    type Entry;

    /// Returns the carried entity, or `None` for a structural row.
    fn entry(&self) -> Option<&Self::Entry>;
}

/// One row of the refs view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefRow {
    /// Group header, e.g. "Branches" or "Tags".
    Header(String),
    /// Blank separator between groups.
    Separator,
    /// Placeholder shown while the ref list is being loaded.
    Loading,
    /// A data row carrying one reference.
    Entry(RefEntry),
}

impl FilterRow for RefRow {
    type Entry = RefEntry;

    fn entry(&self) -> Option<&RefEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Header(_) | Self::Separator | Self::Loading => None,
        }
    }
}

/// One row of the log view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitRow {
    /// Group header, e.g. a date heading.
    Header(String),
    /// Blank separator between groups.
    Separator,
    /// Placeholder shown while history is being loaded.
    Loading,
    /// A data row carrying one commit.
    Entry(Commit),
}

impl FilterRow for CommitRow {
    type Entry = Commit;

    fn entry(&self) -> Option<&Commit> {
        match self {
            Self::Entry(commit) => Some(commit),
            Self::Header(_) | Self::Separator | Self::Loading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str) -> RefEntry {
        RefEntry {
            name: name.to_string(),
            kind: RefKind::Branch,
            remote: None,
            head: false,
        }
    }

    #[test]
    fn structural_ref_rows_carry_no_entry() {
        assert!(RefRow::Header("Branches".to_string()).entry().is_none());
        assert!(RefRow::Separator.entry().is_none());
        assert!(RefRow::Loading.entry().is_none());
    }

    #[test]
    fn data_rows_expose_their_entity() {
        let row = RefRow::Entry(branch("main"));
        assert_eq!(row.entry().map(|r| r.name.as_str()), Some("main"));

        let commit = Commit {
            id: "a".repeat(40),
            title: "Initial commit".to_string(),
            author: "Alice".to_string(),
            date: Utc::now(),
        };
        let row = CommitRow::Entry(commit);
        assert_eq!(row.entry().map(|c| c.author.as_str()), Some("Alice"));
    }
}
