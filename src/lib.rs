//! Gitscope: the interactive core of a terminal git repository browser.
//!
//! Gitscope provides the two subsystems of the browser that carry real
//! interaction logic:
//! - A query-language **filter engine** deciding, per displayed row, whether it
//!   is visible — pluggable over entity kinds (refs, commits) through a
//!   field-resolution capability
//! - A hierarchical **key dispatcher** resolving raw input keys to semantic
//!   actions through per-view binding tables, innermost view first
//!
//! # Architecture
//!
//! The crate is a library; the event loop, git data access, and rendering are
//! external collaborators:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host application (input loop, git access, render)  │  ← External
//! └─────────────────────────────────────────────────────┘
//!          │ query strings,              │ keys + view
//!          │ entities                    │ hierarchy
//! ┌───────────────────────┐   ┌───────────────────────┐
//! │ Filter Engine         │   │ Key Dispatcher        │
//! │ (filter/)             │   │ (keymap/)             │
//! │ - Field descriptors   │   │ - Per-view tables     │
//! │ - Query compiler      │   │ - Innermost-first     │
//! │ - Row adapter         │   │   resolution          │
//! └───────────────────────┘   └───────────────────────┘
//!          │                             │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Observability Layers                      │
//! │  - Entity models, errors (domain/)                  │
//! │  - Tracing setup (observability/)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`filter`]: Query compilation and row filtering
//! - [`keymap`]: Key binding tables and hierarchical dispatch
//! - [`domain`]: Entity models and error types
//! - [`observability`]: Tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use gitscope::{Config, initialize};
//! use gitscope::keymap::{Action, Key, ViewId};
//! use gitscope::filter::{RefFields, RefFilter};
//! use gitscope::domain::{RefEntry, RefKind, RefRow};
//!
//! // Key dispatch: seeded defaults plus user overrides.
//! let config = Config {
//!     keymap_overrides: Some("[main]\nq = \"quit\"\n".to_string()),
//!     ..Config::default()
//! };
//! let keymap = initialize(&config);
//! assert_eq!(keymap.resolve(&[ViewId::Main], Key::Char('q')), Action::Quit);
//!
//! // Row filtering: compile once, evaluate per row.
//! let filter = RefFilter::new(r#"kind = "branch""#, RefFields).expect("valid query");
//! let row = RefRow::Entry(RefEntry {
//!     name: "main".to_string(),
//!     kind: RefKind::Branch,
//!     remote: None,
//!     head: true,
//! });
//! assert!(filter.matches(&row));
//! ```
//!
//! # Concurrency
//!
//! Both subsystems are designed for a single-threaded, event-driven loop: one
//! key press or one filter re-evaluation runs to completion before the next.
//! Compiled filters are pure, so one filter may be evaluated across many rows
//! in parallel if the host parallelizes rendering. The [`Keymap`] is the one
//! piece of shared mutable state; callers serialize `bind` against `resolve`.

pub mod domain;
pub mod filter;
pub mod keymap;
pub mod observability;

pub use domain::{GitscopeError, Result};
pub use filter::{CompiledFilter, FilterError, RowFilter};
pub use keymap::{Action, Key, Keymap, ViewId};

/// Host-supplied configuration for the interactive core.
///
/// The host application assembles this from whatever configuration sources it
/// owns (command line, config files) and passes it to [`initialize`] and
/// [`observability::init_tracing`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Tracing level for the subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// Overridden by `RUST_LOG` when set.
    pub trace_level: Option<String>,

    /// Keymap override text in TOML form, already read by the host.
    ///
    /// See [`keymap::apply_overrides`] for the format. Invalid override text
    /// is logged and ignored; the defaults stay in effect.
    pub keymap_overrides: Option<String>,
}

/// Initializes the key dispatcher from configuration.
///
/// Builds the default [`Keymap`] and applies the configured overrides. A bad
/// override document never leaves the keymap half-configured: the defaults
/// are kept intact and the problem is logged, matching the principle that
/// user configuration must not brick the browser's input handling.
#[must_use]
pub fn initialize(config: &Config) -> Keymap {
    tracing::debug!("initializing gitscope interactive core");

    let mut keymap = Keymap::with_defaults();

    if let Some(overrides) = config.keymap_overrides.as_ref() {
        match keymap::apply_overrides(&mut keymap, overrides) {
            Ok(applied) => {
                tracing::debug!(bindings = applied, "keymap overrides applied");
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to apply keymap overrides, using defaults");
            }
        }
    }

    keymap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_without_overrides_yields_defaults() {
        let keymap = initialize(&Config::default());
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Char('Q')), Action::Quit);
    }

    #[test]
    fn initialize_survives_bad_override_text() {
        let config = Config {
            keymap_overrides: Some("not toml at all [".to_string()),
            ..Config::default()
        };
        let keymap = initialize(&config);
        // Defaults are intact.
        assert_eq!(keymap.resolve(&[ViewId::Main], Key::Enter), Action::Select);
    }

    #[test]
    fn initialize_applies_valid_overrides() {
        let config = Config {
            keymap_overrides: Some("[refs]\nTab = \"view-log\"\n".to_string()),
            ..Config::default()
        };
        let keymap = initialize(&config);
        assert_eq!(keymap.resolve(&[ViewId::Refs], Key::Tab), Action::ViewLog);
    }
}
