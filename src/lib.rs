//! notepub - Note store with publish state synchronization
//!
//! Keeps a local note's publish toggle in step with an external sync service:
//! requests are applied optimistically and resolved when the service confirms
//! the authoritative state and public link.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::PublishController;
pub use error::NotepubError;
