//! # Gazette API Server Library
//!
//! REST API over the gazette document store: open user registration,
//! Basic-auth credential resolution, and owner-scoped article CRUD.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `validate`: Field-error accumulation for request payloads
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod validate;
