/// API route handlers
///
/// Organized by resource:
///
/// - `meta`: Hello and credential introspection endpoints
/// - `users`: Registration, username listing, password change
/// - `articles`: Article CRUD and the by-user listing

pub mod articles;
pub mod meta;
pub mod users;

use serde::{Deserialize, Serialize};

/// The standard success acknowledgement for mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always `true`
    pub ok: bool,
}
