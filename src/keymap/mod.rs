//! Hierarchical key-binding dispatch.
//!
//! This module maps raw input events to semantic actions depending on which
//! nested view currently has focus. The pieces:
//!
//! - [`Key`]: the input key model the external input loop produces
//! - [`Action`]: stable identifiers for the browser's operations
//! - [`ViewId`]: the closed enumeration of views; a hierarchy is a caller-built
//!   slice of these, innermost first
//! - [`Keymap`]: per-view binding tables with [`Keymap::resolve`] and
//!   [`Keymap::bind`]
//! - [`apply_overrides`]: applies user override text to a keymap
//!
//! # Example
//!
//! ```
//! use gitscope::keymap::{Action, Key, Keymap, ViewId};
//!
//! let keymap = Keymap::with_defaults();
//!
//! // A diff stacked on the log: the diff's Up binding wins.
//! let hierarchy = [ViewId::Diff, ViewId::Log, ViewId::Main];
//! assert_eq!(keymap.resolve(&hierarchy, Key::Up), Action::LineUp);
//!
//! // Keys nothing binds resolve to the sentinel, not an error.
//! assert_eq!(keymap.resolve(&[ViewId::Refs], Key::Tab), Action::None);
//! ```

mod actions;
mod keys;
mod overrides;
mod table;
mod views;

pub use actions::Action;
pub use keys::Key;
pub use overrides::apply_overrides;
pub use table::Keymap;
pub use views::ViewId;
