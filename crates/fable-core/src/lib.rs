//! # Fable Core
//!
//! The domain layer of the Fable blog engine.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, repository and collaborator ports, slug allocation, listing, and
//! the comment/sharing workflows.

pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod slug;
pub mod workflows;

pub use error::DomainError;
