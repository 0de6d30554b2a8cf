//! # Gazette Shared Library
//!
//! This crate contains the types, storage adapter, and access-control logic
//! shared by the Gazette API server (and any future tooling built on the
//! same store).
//!
//! ## Module Organization
//!
//! - `models`: Entity structs and their document (de)serialization
//! - `auth`: Password hashing, principals/capabilities, Basic auth middleware
//! - `store`: The `DocumentStore` trait plus Postgres and in-memory backends
//! - `db`: Connection pool construction and schema migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Gazette shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
