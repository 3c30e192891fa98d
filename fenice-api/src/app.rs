/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use fenice_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = fenice_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use fenice_shared::auth::middleware::authenticate_bearer;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Page size applied when a listing request sends none
    pub fn default_page_size(&self) -> i64 {
        self.config.api.default_page_size
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── /health                              # Health check (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /login                  # public
///     │   ├── POST /refresh                # public
///     │   └── GET  /me
///     ├── /cleaning-slots/
///     │   ├── GET  /                       # upcoming, paged
///     │   ├── POST /
///     │   ├── GET  /calendar
///     │   ├── GET  /areas
///     │   ├── GET  /:id/assignments
///     │   └── POST /:id/sign-up
///     ├── /tasks/
///     │   ├── GET    /                     # upcoming, paged
///     │   ├── POST   /                     # admin
///     │   ├── DELETE /:id                  # admin
///     │   ├── GET    /:id/assignments
///     │   └── POST   /:id/sign-up
///     └── /contributions/
///         ├── GET    /
///         ├── POST   /
///         ├── GET    /summary
///         └── DELETE /:id                  # admin
/// ```
///
/// Everything except `/health`, login and refresh requires a bearer access
/// token. Admin checks happen in the core operations, not in the router.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let cleaning_routes = Router::new()
        .route(
            "/",
            get(routes::cleaning::list_slots).post(routes::cleaning::create_slot),
        )
        .route("/calendar", get(routes::cleaning::calendar))
        .route("/areas", get(routes::cleaning::areas))
        .route("/:id/assignments", get(routes::cleaning::slot_assignments))
        .route("/:id/sign-up", post(routes::cleaning::sign_up));

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/assignments", get(routes::tasks::task_assignments))
        .route("/:id/sign-up", post(routes::tasks::sign_up));

    let contribution_routes = Router::new()
        .route(
            "/",
            get(routes::contributions::list_contributions)
                .post(routes::contributions::record_contribution),
        )
        .route("/summary", get(routes::contributions::summary))
        .route("/:id", delete(routes::contributions::delete_contribution));

    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .nest("/cleaning-slots", cleaning_routes)
        .nest("/tasks", task_routes)
        .nest("/contributions", contribution_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", public_auth_routes)
        .merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// JWT authentication middleware layer
///
/// Validates the bearer access token and injects the acting
/// `FamilyContext` into request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let ctx = authenticate_bearer(req.headers(), state.jwt_secret())?;

    tracing::debug!(family = %ctx.username, is_admin = ctx.is_admin, "Request authenticated");
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
