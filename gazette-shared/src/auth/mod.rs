/// Authentication and authorization
///
/// This module provides the access-control building blocks:
///
/// - `password`: Argon2id hashing and verification
/// - `principal`: Principals, capabilities, and the authorize check
/// - `basic`: HTTP Basic credential parsing
/// - `middleware`: Axum middleware resolving a principal on every request

pub mod basic;
pub mod middleware;
pub mod password;
pub mod principal;

pub use principal::{authorize, Capability, Forbidden, Principal};
