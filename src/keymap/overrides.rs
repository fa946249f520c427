//! User keymap overrides.
//!
//! The external configuration-loading component hands gitscope the override
//! text it read (a TOML document: one table per view, `key = "action"` pairs)
//! and this module applies it binding by binding through [`Keymap::bind`].
//! Reading or persisting the file stays outside the crate.
//!
//! ```toml
//! [log]
//! Up = "line-up"
//! "C-r" = "refresh"
//!
//! [main]
//! q = "quit"
//! ```
//!
//! Every name is validated: an unknown view, key, or action spelling is a
//! [`GitscopeError::Config`] naming the offending string, and nothing from a
//! rejected document is applied.

use super::actions::Action;
use super::keys::Key;
use super::table::Keymap;
use super::views::ViewId;
use crate::domain::{GitscopeError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Parsed override document: view name to key/action spellings, as written.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct OverrideDoc {
    views: BTreeMap<String, BTreeMap<String, String>>,
}

/// Parses TOML override text and applies every binding to `keymap`.
///
/// Application is all-or-nothing: the whole document is validated before the
/// first `bind` call, so a typo in one entry does not leave the keymap half
/// overridden. Returns the number of bindings applied.
///
/// # Errors
///
/// [`GitscopeError::Config`] when the text is not valid TOML or names an
/// unknown view, key, or action.
pub fn apply_overrides(keymap: &mut Keymap, text: &str) -> Result<usize> {
    let doc: OverrideDoc = toml::from_str(text)
        .map_err(|e| GitscopeError::Config(format!("invalid keymap overrides: {e}")))?;

    let mut bindings: Vec<(ViewId, Key, Action)> = Vec::new();
    for (view_name, entries) in &doc.views {
        let view: ViewId = view_name.parse()?;
        for (key_name, action_name) in entries {
            let key: Key = key_name.parse()?;
            let action: Action = action_name.parse()?;
            bindings.push((view, key, action));
        }
    }

    let applied = bindings.len();
    for (view, key, action) in bindings {
        tracing::debug!(view = %view, key = %key, action = %action, "applying keymap override");
        keymap.bind(view, key, action);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_to_the_named_view_only() {
        let mut keymap = Keymap::with_defaults();
        let applied = apply_overrides(
            &mut keymap,
            r#"
            [log]
            Up = "line-up"

            [main]
            q = "quit"
            "#,
        )
        .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(keymap.resolve(&[ViewId::Log], Key::Up), Action::LineUp);
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Char('q')), Action::Quit);
        // The diff view's Up binding is untouched.
        assert_eq!(keymap.resolve(&[ViewId::Diff], Key::Up), Action::LineUp);
    }

    #[test]
    fn quoted_chord_keys_parse() {
        let mut keymap = Keymap::with_defaults();
        apply_overrides(
            &mut keymap,
            r#"
            [main]
            "C-r" = "refresh"
            "F5" = "view-help"
            "#,
        )
        .unwrap();

        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Ctrl('r')), Action::Refresh);
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::F(5)), Action::ViewHelp);
    }

    #[test]
    fn unknown_action_rejects_the_whole_document() {
        let mut keymap = Keymap::with_defaults();
        let before = keymap.binding(ViewId::Main, Key::Char('q'));

        let err = apply_overrides(
            &mut keymap,
            r#"
            [main]
            q = "quit"
            x = "self-destruct"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("self-destruct"));
        // The valid `q = "quit"` entry must not have been applied.
        assert_eq!(keymap.binding(ViewId::Main, Key::Char('q')), before);
    }

    #[test]
    fn unknown_view_and_key_are_named_in_the_error() {
        let mut keymap = Keymap::with_defaults();

        let err = apply_overrides(&mut keymap, "[sidebar]\nq = \"quit\"\n").unwrap_err();
        assert!(err.to_string().contains("sidebar"));

        let err = apply_overrides(&mut keymap, "[main]\n\"Hyper-x\" = \"quit\"\n").unwrap_err();
        assert!(err.to_string().contains("Hyper-x"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut keymap = Keymap::with_defaults();
        let err = apply_overrides(&mut keymap, "[main\nq=").unwrap_err();
        assert!(matches!(err, GitscopeError::Config(_)));
    }

    #[test]
    fn empty_document_applies_nothing() {
        let mut keymap = Keymap::with_defaults();
        assert_eq!(apply_overrides(&mut keymap, "").unwrap(), 0);
    }
}
