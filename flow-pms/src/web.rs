mod api;
pub(crate) mod error;

use std::net::SocketAddr;

use axum::extract::FromRef;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use flow_pms_db::FlowDb;
use tower_http::cors::CorsLayer;

use crate::search_service::SearchService;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) db: FlowDb,
    pub(crate) search: SearchService,
}

impl FromRef<WebState> for FlowDb {
    fn from_ref(input: &WebState) -> Self {
        input.db.clone()
    }
}

impl FromRef<WebState> for SearchService {
    fn from_ref(input: &WebState) -> Self {
        input.search.clone()
    }
}

/// The SPA dev servers are the only browsers expected to call this API
/// directly.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:3001"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(tower_http::cors::Any)
}

pub(crate) async fn start_web(state: WebState) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/api/search", get(api::search_all))
        .route("/api/search/projects", get(api::search_projects))
        .route("/api/search/users", get(api::search_users))
        .route("/api/search/status", get(api::search_status_messages))
        .route("/api/search/quick", get(api::quick_search))
        .route("/api/search/stats", get(api::search_statistics))
        .route("/api/search/popular", get(api::popular_terms))
        .route("/api/search/suggest", get(api::suggestions))
        .route("/api/search/user/{user_id}", get(api::search_for_user))
        .route(
            "/api/search/category/{category}",
            get(api::search_by_category),
        )
        .route("/api/projects", get(api::get_all_projects))
        .route("/api/projects", post(api::create_project))
        .route("/api/projects/public", get(api::get_public_projects))
        .route("/api/projects/search", get(api::search_project_records))
        .route("/api/projects/recent", get(api::get_recent_projects))
        .route("/api/projects/stats", get(api::get_project_stats))
        .route("/api/projects/{id}", get(api::get_project))
        .route("/api/projects/{id}", put(api::update_project))
        .route("/api/projects/{id}", delete(api::delete_project))
        .route("/api/projects/{id}/status", patch(api::change_project_status))
        .route("/api/projects/user/{user_id}", get(api::get_projects_by_owner))
        .route(
            "/api/projects/category/{category}",
            get(api::get_projects_by_category),
        )
        .route(
            "/api/projects/status/{status}",
            get(api::get_projects_by_status),
        )
        .route("/api/users", get(api::get_active_users))
        .route("/api/users", post(api::create_user))
        .route("/api/users/{id}", get(api::get_user))
        .route("/api/users/{id}", put(api::update_user))
        .route("/api/users/{id}", delete(api::deactivate_user))
        .route("/api/users/{id}/activate", post(api::activate_user))
        .route("/api/users/{id}/status", patch(api::update_user_status))
        .route("/api/users/username/{username}", get(api::get_user_by_username))
        .fallback(fallback)
        .layer(cors_layer())
        .with_state(state);

    let port = std::env::var("PORT")
        .map(|p| p.parse::<u16>().ok())
        .ok()
        .flatten()
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
