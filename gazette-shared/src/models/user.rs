/// User model
///
/// A user document holds a unique username and an Argon2id password hash.
/// The username doubles as the document id in the `users` collection, which
/// makes uniqueness structural rather than enforced by a separate index
/// lookup at write time.
///
/// The hash is stored in PHC string format and is never serialized into an
/// API response: handlers only ever return usernames, not user objects.
///
/// # Example
///
/// ```
/// use gazette_shared::models::User;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::new("alice", "wonderland")?;
/// assert!(user.check_password("wonderland")?);
/// assert!(!user.check_password("through the looking glass")?);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

use crate::auth::password::{self, PasswordError};

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username, immutable after registration
    pub username: String,

    /// Argon2id hash of the password (PHC string format)
    pub password_hash: String,
}

impl User {
    /// Creates a user from a username and plaintext password.
    ///
    /// The plaintext is hashed immediately and never stored.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError` if hashing fails.
    pub fn new(username: impl Into<String>, plaintext: &str) -> Result<Self, PasswordError> {
        Ok(Self {
            username: username.into(),
            password_hash: password::hash_password(plaintext)?,
        })
    }

    /// Replaces the stored hash with a hash of `plaintext`.
    ///
    /// Callers must persist the user afterwards; this only mutates the
    /// in-memory struct.
    pub fn set_password(&mut self, plaintext: &str) -> Result<(), PasswordError> {
        self.password_hash = password::hash_password(plaintext)?;
        Ok(())
    }

    /// Verifies `plaintext` against the stored hash.
    pub fn check_password(&self, plaintext: &str) -> Result<bool, PasswordError> {
        password::verify_password(plaintext, &self.password_hash)
    }
}
