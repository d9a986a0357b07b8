//! # Database Operations
//!
//! The process-wide PostgreSQL connection pool.
//!
//! One [`DatabaseConnection`] is created at process start, shared through an
//! `Arc` with everything that needs it, and closed once at shutdown. The
//! health subsystem only ever runs a stateless liveness query against it.

pub mod connection;

pub use connection::DatabaseConnection;
