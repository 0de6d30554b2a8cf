/// Authentication middleware for Axum
///
/// Resolves a [`Principal`] for every inbound request and stores it in the
/// request extensions, where handlers pick it up with Axum's `Extension`
/// extractor.
///
/// The middleware runs unconditionally, even on routes that work
/// anonymously, so introspection endpoints like `/whoami` always reflect
/// the credentials actually presented.
///
/// # Resolution rules
///
/// - No `Authorization` header, a non-Basic scheme, undecodable payload, an
///   unknown username, or a wrong password all resolve to
///   `Principal::Anonymous`. Bad credentials are not an error; endpoints
///   that require authentication then deny with 403 on their own.
/// - A store failure during the lookup is surfaced as 503: it says nothing
///   about the credentials and must not silently downgrade a real user to
///   anonymous.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::basic::parse_basic;
use super::principal::Principal;
use crate::store::{DocumentStore, StoreError};

/// Error type for the credential-resolution middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backing store could not be reached during the credential lookup
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response()
            }
        }
    }
}

/// Basic-auth resolution middleware
///
/// Wire it up with `axum::middleware::from_fn`, capturing the store handle:
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Router};
/// use gazette_shared::auth::middleware::resolve_principal;
/// use gazette_shared::store::{DocumentStore, MemStore};
///
/// let store: Arc<dyn DocumentStore> = Arc::new(MemStore::new());
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hello" }))
///     .layer(middleware::from_fn(move |req, next| {
///         resolve_principal(store.clone(), req, next)
///     }));
/// ```
pub async fn resolve_principal(
    store: Arc<dyn DocumentStore>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = match credentials_from(&req) {
        Some((username, password)) => check_credentials(&*store, &username, &password).await?,
        None => Principal::Anonymous,
    };

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn credentials_from(req: &Request) -> Option<(String, String)> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let creds = parse_basic(header_value)?;
    Some((creds.username, creds.password))
}

async fn check_credentials(
    store: &dyn DocumentStore,
    username: &str,
    password: &str,
) -> Result<Principal, AuthError> {
    let user = match store.get_user(username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(username, "credentials presented for unknown user");
            return Ok(Principal::Anonymous);
        }
        Err(StoreError::NotFound) => return Ok(Principal::Anonymous),
        Err(e) => return Err(AuthError::StoreUnavailable(e.to_string())),
    };

    match user.check_password(password) {
        Ok(true) => Ok(Principal::Authenticated(username.to_string())),
        Ok(false) => {
            debug!(username, "password mismatch");
            Ok(Principal::Anonymous)
        }
        Err(e) => {
            // A stored hash that fails to parse is a data problem, not a
            // credential problem. Treat the request as anonymous and log it.
            warn!(username, error = %e, "stored password hash could not be verified");
            Ok(Principal::Anonymous)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::MemStore;

    #[tokio::test]
    async fn test_check_credentials_valid() {
        let store = MemStore::new();
        let user = User::new("alice", "wonderland").expect("user creation should succeed");
        store.put_user(user).await.expect("put should succeed");

        let principal = check_credentials(&store, "alice", "wonderland")
            .await
            .expect("check should succeed");

        assert_eq!(principal, Principal::Authenticated("alice".to_string()));
    }

    #[tokio::test]
    async fn test_check_credentials_wrong_password() {
        let store = MemStore::new();
        let user = User::new("alice", "wonderland").expect("user creation should succeed");
        store.put_user(user).await.expect("put should succeed");

        let principal = check_credentials(&store, "alice", "not-it")
            .await
            .expect("check should succeed");

        assert_eq!(principal, Principal::Anonymous);
    }

    #[tokio::test]
    async fn test_check_credentials_unknown_user() {
        let store = MemStore::new();

        let principal = check_credentials(&store, "nobody", "anything")
            .await
            .expect("check should succeed");

        assert_eq!(principal, Principal::Anonymous);
    }
}
