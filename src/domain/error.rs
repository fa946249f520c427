//! Error types for the gitscope interactive core.
//!
//! This module defines the centralized error type [`GitscopeError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Filter compilation failures are deliberately *not* represented here: the filter
//! compiler reports every problem it finds in one pass, so it returns all of them
//! together as data rather than a single error value. See
//! [`FilterError`](crate::filter::FilterError).

use thiserror::Error;

/// The main error type for gitscope operations.
///
/// This enum consolidates error conditions that can occur outside the filter
/// compiler, currently configuration parsing and keymap override application.
/// Filter compilation has its own collected-error channel (see module docs).
#[derive(Debug, Error)]
pub enum GitscopeError {
    /// Configuration is invalid.
    ///
    /// Occurs when keymap override text is malformed or names an unknown
    /// view, key, or action. The string describes the specific problem,
    /// including the offending spelling.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for gitscope operations.
///
/// This is a type alias for `std::result::Result<T, GitscopeError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, GitscopeError>;
