//! # Fable Infrastructure
//!
//! Concrete implementations of the ports defined in `fable-core`.
//! This crate contains the PostgreSQL and in-memory content stores, the
//! identity provider, and the mail sender adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL content store via SeaORM
//! - `auth` - JWT + Argon2 identity provider

pub mod database;
pub mod mail;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::MemoryStore;
pub use mail::{LogMailer, RecordingMailer};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresImageRepository, PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};
