//! Content Store adapters: PostgreSQL (SeaORM) and in-memory.

mod memory;

#[cfg(feature = "postgres")]
mod connections;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub use postgres::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresImageRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
