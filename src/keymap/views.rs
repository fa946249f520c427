//! The closed enumeration of browser views.
//!
//! [`ViewId`] tags every view the browser can stack. The set is closed and
//! known at build time, which is what lets the binding table provision a
//! (possibly empty) table for every view up front and makes dispatch total:
//! there is no "unconfigured view" failure mode at resolve time.
//!
//! A *view hierarchy* is an ordered slice of `ViewId`s, innermost (currently
//! focused) first, outermost last — e.g. `[Diff, Log, Main]` when a diff is
//! open on top of the log. The external view-stack management builds it fresh
//! for each input event; the dispatcher never stores one.

use crate::domain::GitscopeError;
use std::fmt;
use std::str::FromStr;

/// Identifier of one browser view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Root view hosting the global bindings.
    Main,
    /// Commit diff.
    Diff,
    /// Commit history.
    Log,
    /// Branches, remotes, and tags.
    Refs,
    /// Working-tree status.
    Status,
    /// Repository file tree.
    Tree,
    /// Key binding help.
    Help,
}

impl ViewId {
    /// Every view, in a fixed order matching [`ViewId::index`].
    pub const ALL: [Self; 7] = [
        Self::Main,
        Self::Diff,
        Self::Log,
        Self::Refs,
        Self::Status,
        Self::Tree,
        Self::Help,
    ];

    /// Number of views; the binding-table array length.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index used by the binding-table array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The view's configuration spelling, also used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Diff => "diff",
            Self::Log => "log",
            Self::Refs => "refs",
            Self::Status => "status",
            Self::Tree => "tree",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = GitscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| GitscopeError::Config(format!("unknown view `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_match_all_order() {
        for (position, view) in ViewId::ALL.iter().enumerate() {
            assert_eq!(view.index(), position);
        }
    }

    #[test]
    fn names_round_trip() {
        for view in ViewId::ALL {
            assert_eq!(view.as_str().parse::<ViewId>().unwrap(), view);
        }
        assert_eq!("REFS".parse::<ViewId>().unwrap(), ViewId::Refs);
        assert!("commit-graph".parse::<ViewId>().is_err());
    }
}
