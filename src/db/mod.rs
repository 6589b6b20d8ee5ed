//! Database connection pool module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus the embedded migrations run by the `migrate` subcommand.

mod pool;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use pool::{AsyncDbPool, establish_async_connection_pool};

/// SQL migrations embedded into the binary at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
