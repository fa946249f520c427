//! Per-view key binding tables and hierarchical dispatch.
//!
//! [`Keymap`] holds one binding table per [`ViewId`] and resolves an input
//! key against a view hierarchy: tables are consulted innermost-first, the
//! first one containing the key wins, and an exhausted hierarchy yields
//! [`Action::None`].
//!
//! # Why dispatch cannot fail
//!
//! The tables live in a fixed-size array indexed by the closed `ViewId`
//! enumeration, so every view has a (possibly empty) table from the moment a
//! `Keymap` exists. "View without a table" is unrepresentable, which turns
//! what would otherwise be a runtime configuration crash into a construction
//! guarantee — `resolve` and `bind` are total functions.
//!
//! # Concurrency
//!
//! The keymap is the one piece of shared mutable state in the interactive
//! core. Resolution is a pure function of `(hierarchy, key, table contents)`;
//! callers serialize `bind` against concurrent `resolve` calls, which the
//! single-threaded event loop does naturally.

use super::actions::Action;
use super::keys::Key;
use super::views::ViewId;
use std::collections::HashMap;

/// Process-wide key binding state: one table per view.
#[derive(Debug, Clone)]
pub struct Keymap {
    tables: [HashMap<Key, Action>; ViewId::COUNT],
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Keymap {
    /// Creates a keymap with every table empty.
    ///
    /// Every key resolves to [`Action::None`] until bindings are added.
    /// Mostly useful in tests; production code starts from
    /// [`Keymap::with_defaults`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tables: std::array::from_fn(|_| HashMap::new()),
        }
    }

    /// Creates a keymap seeded with the browser's default bindings.
    ///
    /// The main view carries the global bindings (quit, refresh, view
    /// switching, line navigation) that every hierarchy falls back to;
    /// inner views override only what they specialize — the diff view
    /// rebinds the arrow keys to line movement it already inherits, the
    /// log view rebinds them to commit navigation. The help view's table
    /// is intentionally empty: it resolves entirely through its outer views.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut keymap = Self::empty();

        let main = [
            (Key::Char('q'), Action::Close),
            (Key::Char('Q'), Action::Quit),
            (Key::Ctrl('c'), Action::Quit),
            (Key::Char('R'), Action::Refresh),
            (Key::F(5), Action::Refresh),
            (Key::Enter, Action::Select),
            (Key::Up, Action::LineUp),
            (Key::Down, Action::LineDown),
            (Key::Char('k'), Action::LineUp),
            (Key::Char('j'), Action::LineDown),
            (Key::PageUp, Action::PageUp),
            (Key::PageDown, Action::PageDown),
            (Key::Home, Action::Top),
            (Key::End, Action::Bottom),
            (Key::Char('d'), Action::ViewDiff),
            (Key::Char('l'), Action::ViewLog),
            (Key::Char('r'), Action::ViewRefs),
            (Key::Char('s'), Action::ViewStatus),
            (Key::Char('t'), Action::ViewTree),
            (Key::Char('h'), Action::ViewHelp),
            (Key::F(1), Action::ViewHelp),
            (Key::Char('/'), Action::Search),
            (Key::Char('n'), Action::SearchNext),
            (Key::Char('N'), Action::SearchPrev),
        ];
        for (key, action) in main {
            keymap.bind(ViewId::Main, key, action);
        }

        let diff = [
            (Key::Up, Action::LineUp),
            (Key::Down, Action::LineDown),
            (Key::Left, Action::ScrollLeft),
            (Key::Right, Action::ScrollRight),
            (Key::Char(' '), Action::PageDown),
            (Key::Ctrl('d'), Action::HalfPageDown),
            (Key::Ctrl('u'), Action::HalfPageUp),
        ];
        for (key, action) in diff {
            keymap.bind(ViewId::Diff, key, action);
        }

        let log = [
            (Key::Up, Action::PrevCommit),
            (Key::Down, Action::NextCommit),
        ];
        for (key, action) in log {
            keymap.bind(ViewId::Log, key, action);
        }

        keymap.bind(ViewId::Refs, Key::Enter, Action::SelectRef);
        keymap.bind(ViewId::Status, Key::Char('u'), Action::StageToggle);
        keymap.bind(ViewId::Tree, Key::Backspace, Action::Close);

        keymap
    }

    /// Inserts or overwrites the binding for `(view, key)`.
    ///
    /// Exactly that entry changes; the same key under every other view is
    /// untouched.
    pub fn bind(&mut self, view: ViewId, key: Key, action: Action) {
        self.tables[view.index()].insert(key, action);
    }

    /// Looks up the binding for `key` in `view`'s own table, ignoring the
    /// hierarchy.
    #[must_use]
    pub fn binding(&self, view: ViewId, key: Key) -> Option<Action> {
        self.tables[view.index()].get(&key).copied()
    }

    /// Resolves `key` against a view hierarchy, innermost first.
    ///
    /// Walks `hierarchy` from index 0 outward and returns the action of the
    /// first table containing `key`; an innermost match wins over anything
    /// the outer views bind. Returns [`Action::None`] when no table in the
    /// hierarchy binds the key.
    #[must_use]
    pub fn resolve(&self, hierarchy: &[ViewId], key: Key) -> Action {
        let _span =
            tracing::debug_span!("resolve_key", key = %key, depth = hierarchy.len()).entered();

        for &view in hierarchy {
            if let Some(action) = self.binding(view, key) {
                tracing::debug!(view = %view, action = %action, "binding resolved");
                return action;
            }
        }

        tracing::debug!("no binding in hierarchy");
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_match_wins() {
        // Default tables bind Up in the diff view to line movement and in
        // the log view to commit movement; with a diff stacked on the log,
        // the diff's binding must win.
        let keymap = Keymap::with_defaults();
        let action = keymap.resolve(&[ViewId::Diff, ViewId::Log, ViewId::Main], Key::Up);
        assert_eq!(action, Action::LineUp);

        // Without the diff on top, the log's binding applies.
        let action = keymap.resolve(&[ViewId::Log, ViewId::Main], Key::Up);
        assert_eq!(action, Action::PrevCommit);
    }

    #[test]
    fn unbound_key_falls_through_to_outer_views() {
        let keymap = Keymap::with_defaults();
        // `q` is not bound in the diff view; the main view's binding applies.
        let action = keymap.resolve(&[ViewId::Diff, ViewId::Log, ViewId::Main], Key::Char('q'));
        assert_eq!(action, Action::Close);
    }

    #[test]
    fn exhausted_hierarchy_yields_none() {
        let keymap = Keymap::with_defaults();
        // Tab is unbound in the refs view, and the hierarchy has no fallback.
        assert_eq!(keymap.resolve(&[ViewId::Refs], Key::Tab), Action::None);
        // The empty hierarchy trivially resolves to nothing.
        assert_eq!(keymap.resolve(&[], Key::Char('q')), Action::None);
    }

    #[test]
    fn bind_then_resolve_round_trips() {
        let mut keymap = Keymap::with_defaults();
        keymap.bind(ViewId::Refs, Key::Char('x'), Action::Refresh);
        assert_eq!(keymap.resolve(&[ViewId::Refs], Key::Char('x')), Action::Refresh);
    }

    #[test]
    fn bind_does_not_leak_into_other_views() {
        let mut keymap = Keymap::empty();
        keymap.bind(ViewId::Diff, Key::Char('z'), Action::PageDown);
        keymap.bind(ViewId::Log, Key::Char('z'), Action::Top);

        assert_eq!(keymap.binding(ViewId::Diff, Key::Char('z')), Some(Action::PageDown));
        assert_eq!(keymap.binding(ViewId::Log, Key::Char('z')), Some(Action::Top));
        for view in [ViewId::Main, ViewId::Refs, ViewId::Status, ViewId::Tree, ViewId::Help] {
            assert_eq!(keymap.binding(view, Key::Char('z')), None);
        }
    }

    #[test]
    fn bind_overwrites_exactly_one_entry() {
        let mut keymap = Keymap::with_defaults();
        keymap.bind(ViewId::Main, Key::Char('q'), Action::Quit);
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Char('q')), Action::Quit);
        // Neighboring bindings survive.
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Char('Q')), Action::Quit);
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Enter), Action::Select);
    }

    #[test]
    fn every_view_has_a_table_from_construction() {
        let keymap = Keymap::empty();
        for view in ViewId::ALL {
            // No panic, no error: unprovisioned views are unrepresentable.
            assert_eq!(keymap.resolve(&[view], Key::Enter), Action::None);
        }
    }

    #[test]
    fn help_view_resolves_through_main_defaults() {
        let keymap = Keymap::with_defaults();
        let action = keymap.resolve(&[ViewId::Help, ViewId::Main], Key::Char('q'));
        assert_eq!(action, Action::Close);
    }

    #[test]
    fn explicit_none_binding_masks_outer_default() {
        let mut keymap = Keymap::with_defaults();
        keymap.bind(ViewId::Diff, Key::Char('q'), Action::None);
        let action = keymap.resolve(&[ViewId::Diff, ViewId::Main], Key::Char('q'));
        assert_eq!(action, Action::None);
    }
}
