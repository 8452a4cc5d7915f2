//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements. Queries are checked at runtime and mapped with `FromRow`.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Short URLs, metadata and click history
//! - [`PgUserRepository`] - User accounts

pub mod pg_url_repository;
pub mod pg_user_repository;

pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
