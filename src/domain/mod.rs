//! Domain layer for the gitscope interactive core.
//!
//! This module contains the core domain types shared by the filter engine and
//! the key dispatcher, independent of any terminal, git-access, or rendering
//! concerns. It follows domain-driven design principles by keeping the entity
//! models isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entity`]: Ref/commit entity models and displayable row wrappers

pub mod entity;
pub mod error;

pub use entity::{Commit, CommitRow, FilterRow, RefEntry, RefKind, RefRow};
pub use error::{GitscopeError, Result};
