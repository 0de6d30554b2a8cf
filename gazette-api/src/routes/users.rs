/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - List all usernames (open)
/// - `POST /users` - Register a new user (open; registration requires no
///   authentication, a deliberate policy of this API)
/// - `POST /mypassword` - Change the calling user's password (authenticated)
///
/// The password change operates on the calling principal's own record only;
/// there is no username parameter, so cross-user password changes are
/// impossible by construction.

use axum::{body::Bytes, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use gazette_shared::auth::{authorize, Capability, Principal};
use gazette_shared::models::User;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::OkResponse,
    validate::{parse_json_body, required_trimmed, FieldErrors},
};

/// Username listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    /// All registered usernames
    pub users: Vec<String>,
}

/// Registration payload; both fields required non-empty after trimming
#[derive(Debug, Deserialize)]
struct UserPayload {
    username: Option<String>,
    password: Option<String>,
}

/// Returns a list of all usernames.
///
/// In a real app, use pagination/batching and/or search.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UsersResponse>> {
    let users = state.store.usernames().await?;
    Ok(Json(UsersResponse { users }))
}

/// Registers a new user.
///
/// Validates that the payload is a JSON object with non-empty trimmed
/// `username` and `password`, and that the username is not taken
/// (case-sensitive exact match). All violations are reported together as a
/// 400; a taken username is a field error on `username`, not a 409.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    let payload: UserPayload = parse_json_body(&body)?;

    let mut errors = FieldErrors::new();
    let username = required_trimmed(&mut errors, "username", payload.username.as_deref());
    let password = required_trimmed(&mut errors, "password", payload.password.as_deref());

    // Uniqueness is only worth checking when a username was supplied at all.
    if let Some(ref username) = username {
        if state.store.get_user(username).await?.is_some() {
            errors.add("username", "Already in use.");
        }
    }

    errors.into_result()?;

    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::Internal(
            "validation passed with missing fields".to_string(),
        ));
    };

    let user = User::new(username, &password)?;
    state.store.put_user(user).await?;

    Ok(Json(OkResponse { ok: true }))
}

/// Changes the authenticated user's password.
///
/// The request body is the new password as plain text, trimmed and required
/// non-empty. Capability: `authenticated`, checked before the body is
/// looked at.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    authorize(&principal, Capability::Authenticated, None)?;

    let text = std::str::from_utf8(&body).unwrap_or("");

    let mut errors = FieldErrors::new();
    let newpassword = required_trimmed(&mut errors, "newpassword", Some(text));
    errors.into_result()?;

    let Some(newpassword) = newpassword else {
        return Err(ApiError::Internal(
            "validation passed with missing password".to_string(),
        ));
    };

    let username = principal
        .username()
        .ok_or_else(|| ApiError::Internal("authenticated principal without username".to_string()))?;

    let mut user = state.store.get_user(username).await?.ok_or_else(|| {
        ApiError::Internal(format!("authenticated user '{}' missing from store", username))
    })?;

    user.set_password(&newpassword)?;
    state.store.put_user(user).await?;

    Ok(Json(OkResponse { ok: true }))
}
