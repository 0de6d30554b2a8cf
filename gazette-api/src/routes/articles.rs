/// Article endpoints
///
/// # Endpoints
///
/// - `GET /articles` - All articles, reverse-chronological (open)
/// - `POST /articles` - Create an article (authenticated)
/// - `GET /articles/:id` - One article (open)
/// - `PUT /articles/:id` - Update an article (authenticated + owner)
/// - `DELETE /articles/:id` - Delete an article (authenticated + owner)
/// - `GET /articles/by-user/:username` - One owner's articles, reverse-
///   chronological (open; empty list for an unknown owner, never an error)
///
/// # Check ordering on mutation
///
/// For PUT and DELETE the checks run: authentication (403 for anonymous,
/// even on an unknown id), then existence (404), then ownership (403),
/// and only then body validation (400). Ownership is decided before the
/// payload is ever parsed.
///
/// The owner of a created article is always the calling principal; any
/// client-supplied owner field is ignored.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use gazette_shared::auth::{authorize, Capability, Principal};
use gazette_shared::models::{Article, ArticleInput};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::OkResponse,
    validate::{parse_json_body, required_trimmed, FieldErrors},
};

/// Article listing response
#[derive(Debug, serde::Serialize, Deserialize)]
pub struct ArticlesResponse {
    /// Articles, newest `created` first
    pub articles: Vec<Article>,
}

/// Create/update payload; both fields required non-empty after trimming.
/// An `username` key, if sent, is simply not deserialized.
#[derive(Debug, Deserialize)]
struct ArticlePayload {
    title: Option<String>,
    body: Option<String>,
}

/// Validates an article payload, accumulating all field errors
fn validated_content(bytes: &[u8]) -> Result<(String, String), ApiError> {
    let payload: ArticlePayload = parse_json_body(bytes)?;

    let mut errors = FieldErrors::new();
    let title = required_trimmed(&mut errors, "title", payload.title.as_deref());
    let body = required_trimmed(&mut errors, "body", payload.body.as_deref());
    errors.into_result()?;

    match (title, body) {
        (Some(title), Some(body)) => Ok((title, body)),
        _ => Err(ApiError::Internal(
            "validation passed with missing fields".to_string(),
        )),
    }
}

/// A malformed id cannot name any article, so it reads as 404 rather than
/// a syntax error.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("No article with id {}", raw)))
}

/// Loads an article for mutation, running the capability checks in order
async fn load_owned(
    state: &AppState,
    principal: &Principal,
    raw_id: &str,
) -> Result<Article, ApiError> {
    authorize(principal, Capability::Authenticated, None)?;

    let id = parse_id(raw_id)?;
    let article = state
        .store
        .get_article(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No article with id {}", id)))?;

    authorize(principal, Capability::Owner, Some(&article.username))?;

    Ok(article)
}

/// Lists all articles in reverse created order.
///
/// In a real app, use pagination/batching.
pub async fn list_articles(State(state): State<AppState>) -> ApiResult<Json<ArticlesResponse>> {
    let articles = state.store.articles_by_created().await?;
    Ok(Json(ArticlesResponse { articles }))
}

/// Creates an article owned by the calling principal
pub async fn create_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    authorize(&principal, Capability::Authenticated, None)?;

    let username = principal
        .username()
        .ok_or_else(|| ApiError::Internal("authenticated principal without username".to_string()))?;

    let (title, content) = validated_content(&body)?;

    state
        .store
        .put_article(ArticleInput {
            id: None,
            username: username.to_string(),
            title,
            body: content,
        })
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

/// Gets a single article
pub async fn get_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Article>> {
    let id = parse_id(&raw_id)?;

    let article = state
        .store
        .get_article(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No article with id {}", id)))?;

    Ok(Json(article))
}

/// Updates a single article.
///
/// Note: concurrent updates to the same article are last-write-wins; there
/// is no optimistic concurrency control in this scope.
pub async fn update_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<OkResponse>> {
    let article = load_owned(&state, &principal, &raw_id).await?;

    let (title, content) = validated_content(&body)?;

    state.store.put_article(article.edited(title, content)).await?;

    Ok(Json(OkResponse { ok: true }))
}

/// Deletes a single article
pub async fn delete_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let article = load_owned(&state, &principal, &raw_id).await?;

    state.store.delete_article(article.id).await?;

    Ok(Json(OkResponse { ok: true }))
}

/// Lists all articles for a given user in reverse created order
pub async fn articles_by_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ArticlesResponse>> {
    let articles = state.store.articles_by_owner(&username).await?;
    Ok(Json(ArticlesResponse { articles }))
}
