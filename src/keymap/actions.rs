//! Semantic action identifiers.
//!
//! An [`Action`] names one operation the browser can perform. The dispatcher
//! resolves input keys to actions; an external action-execution component
//! performs the actual state change. Actions are stable identifiers rather
//! than closures so bindings stay serializable, testable, and loggable.
//!
//! [`Action::None`] is the sentinel meaning "no binding found". It is a
//! normal, non-error outcome: most keys are simply not bound in most views.

use crate::domain::GitscopeError;
use std::fmt;
use std::str::FromStr;

/// One semantic operation of the browser, or the no-binding sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// No binding found. Also bindable explicitly to mask an outer view's
    /// default for a key.
    None,
    /// Exit the browser.
    Quit,
    /// Reload the displayed data.
    Refresh,
    /// Activate the row under the cursor.
    Select,
    /// Close the innermost view.
    Close,
    /// Move the cursor to the previous line.
    LineUp,
    /// Move the cursor to the next line.
    LineDown,
    /// Move to the previous commit.
    PrevCommit,
    /// Move to the next commit.
    NextCommit,
    /// Scroll one page up.
    PageUp,
    /// Scroll one page down.
    PageDown,
    /// Scroll half a page up.
    HalfPageUp,
    /// Scroll half a page down.
    HalfPageDown,
    /// Scroll the viewport left.
    ScrollLeft,
    /// Scroll the viewport right.
    ScrollRight,
    /// Jump to the first row.
    Top,
    /// Jump to the last row.
    Bottom,
    /// Open the diff view for the current selection.
    ViewDiff,
    /// Open the log view.
    ViewLog,
    /// Open the refs view.
    ViewRefs,
    /// Open the status view.
    ViewStatus,
    /// Open the tree view.
    ViewTree,
    /// Open the help view.
    ViewHelp,
    /// Check out the ref under the cursor.
    SelectRef,
    /// Stage or unstage the file under the cursor.
    StageToggle,
    /// Open the filter/search prompt.
    Search,
    /// Jump to the next search match.
    SearchNext,
    /// Jump to the previous search match.
    SearchPrev,
}

/// Canonical configuration spellings, kept in one table so `FromStr` and
/// `as_str` cannot drift apart.
const ACTION_NAMES: &[(Action, &str)] = &[
    (Action::None, "none"),
    (Action::Quit, "quit"),
    (Action::Refresh, "refresh"),
    (Action::Select, "select"),
    (Action::Close, "close"),
    (Action::LineUp, "line-up"),
    (Action::LineDown, "line-down"),
    (Action::PrevCommit, "prev-commit"),
    (Action::NextCommit, "next-commit"),
    (Action::PageUp, "page-up"),
    (Action::PageDown, "page-down"),
    (Action::HalfPageUp, "half-page-up"),
    (Action::HalfPageDown, "half-page-down"),
    (Action::ScrollLeft, "scroll-left"),
    (Action::ScrollRight, "scroll-right"),
    (Action::Top, "top"),
    (Action::Bottom, "bottom"),
    (Action::ViewDiff, "view-diff"),
    (Action::ViewLog, "view-log"),
    (Action::ViewRefs, "view-refs"),
    (Action::ViewStatus, "view-status"),
    (Action::ViewTree, "view-tree"),
    (Action::ViewHelp, "view-help"),
    (Action::SelectRef, "select-ref"),
    (Action::StageToggle, "stage-toggle"),
    (Action::Search, "search"),
    (Action::SearchNext, "search-next"),
    (Action::SearchPrev, "search-prev"),
];

impl Action {
    /// The action's configuration spelling, also used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        ACTION_NAMES
            .iter()
            .find(|(action, _)| *action == self)
            .map_or("none", |(_, name)| name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GitscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ACTION_NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(action, _)| *action)
            .ok_or_else(|| GitscopeError::Config(format!("unknown action `{s}`")))
    }
}
