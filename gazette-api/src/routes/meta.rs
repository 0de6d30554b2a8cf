/// Hello and introspection endpoints
///
/// # Endpoints
///
/// - `GET /` - Liveness hello
/// - `GET /whoami` - The caller's resolved principal

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use gazette_shared::auth::Principal;

/// Whoami response
#[derive(Debug, Serialize, Deserialize)]
pub struct WhoamiResponse {
    /// Authenticated username, `null` when anonymous
    pub username: Option<String>,

    /// Effective principals for this request
    pub principals: Vec<String>,
}

/// Returns Hello in JSON
pub async fn hello() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Returns the caller's credentials as resolved by the auth middleware.
///
/// Because the middleware runs on every request, this reflects the
/// credentials actually presented even though the endpoint itself works
/// anonymously.
pub async fn whoami(Extension(principal): Extension<Principal>) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        username: principal.username().map(str::to_string),
        principals: principal.effective_principals(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hello() {
        let Json(body) = hello().await;
        assert_eq!(body, json!({ "Hello": "World" }));
    }

    #[tokio::test]
    async fn test_whoami_anonymous() {
        let Json(body) = whoami(Extension(Principal::Anonymous)).await;

        assert_eq!(body.username, None);
        assert_eq!(body.principals, vec!["everyone"]);
    }

    #[tokio::test]
    async fn test_whoami_authenticated() {
        let principal = Principal::Authenticated("alice".to_string());
        let Json(body) = whoami(Extension(principal)).await;

        assert_eq!(body.username.as_deref(), Some("alice"));
        assert_eq!(body.principals, vec!["everyone", "authenticated", "alice"]);
    }
}
