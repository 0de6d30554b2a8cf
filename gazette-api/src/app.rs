/// Application state and router builder
///
/// The shared state carries the document store handle behind the
/// `DocumentStore` trait, so the router works identically over Postgres in
/// production and the in-memory store in tests.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use gazette_api::{app::{build_router, AppState}, config::Config};
/// use gazette_shared::store::MemStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemStore::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use gazette_shared::auth::middleware::resolve_principal;
use gazette_shared::store::DocumentStore;

use crate::config::Config;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; both
/// fields are Arcs, so the clone is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub store: Arc<dyn DocumentStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// GET    /                             # Hello
/// GET    /whoami                       # Principal introspection
/// GET    /users                        # List usernames
/// POST   /users                        # Register (open)
/// POST   /mypassword                   # Change own password
/// GET    /articles                     # List articles, newest first
/// POST   /articles                     # Create article
/// GET    /articles/:id                 # Get article
/// PUT    /articles/:id                 # Update article (owner)
/// DELETE /articles/:id                 # Delete article (owner)
/// GET    /articles/by-user/:username   # One owner's articles
/// ```
///
/// # Middleware Stack
///
/// The principal-resolution middleware wraps every route, protected or not,
/// so `/whoami` always reflects the presented credentials. Request logging
/// (tower-http TraceLayer) and permissive CORS wrap the whole router.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let store = state.store.clone();

    Router::new()
        .route("/", get(routes::meta::hello))
        .route("/whoami", get(routes::meta::whoami))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/mypassword", post(routes::users::change_password))
        .route(
            "/articles",
            get(routes::articles::list_articles).post(routes::articles::create_article),
        )
        .route(
            "/articles/by-user/:username",
            get(routes::articles::articles_by_user),
        )
        .route(
            "/articles/:id",
            get(routes::articles::get_article)
                .put(routes::articles::update_article)
                .delete(routes::articles::delete_article),
        )
        .layer(middleware::from_fn(move |req, next| {
            resolve_principal(store.clone(), req, next)
        }))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
