use axum::extract::{Path, Query, State};
use axum::Json;
use flow_pms_api_types::result::ApiResponse;
use flow_pms_api_types::search::{QuickSearch, SearchResult, SearchStatistics};
use serde::Deserialize;

use crate::search_service::SearchService;
use crate::web::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) q: String,
}

pub(crate) async fn search_all(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_all(&query.q).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "Search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn search_for_user(
    State(search): State<SearchService>,
    Path(user_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_for_user(&query.q, user_id).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "Search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn search_projects(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_projects(&query.q).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "Project search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn search_users(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_users(&query.q).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "User search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn search_status_messages(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_status_messages(&query.q).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "Status search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn search_by_category(
    State(search): State<SearchService>,
    Path(category): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, ApiError> {
    let results = search.search_by_category(&category, &query.q).await?;
    let count = results.len();
    Ok(Json(
        ApiResponse::ok(results, "Category search completed")
            .query(query.q)
            .count(count),
    ))
}

pub(crate) async fn quick_search(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<QuickSearch>>, ApiError> {
    let quick = search.quick_search(&query.q).await?;
    Ok(Json(
        ApiResponse::ok(quick, "Quick search completed").query(query.q),
    ))
}

pub(crate) async fn search_statistics(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchStatistics>>, ApiError> {
    let stats = search.search_statistics(&query.q).await?;
    Ok(Json(
        ApiResponse::ok(stats, "Search statistics computed").query(query.q),
    ))
}

pub(crate) async fn popular_terms(
    State(search): State<SearchService>,
) -> Json<ApiResponse<Vec<String>>> {
    let terms = search.popular_terms();
    let count = terms.len();
    Json(ApiResponse::ok(terms, "Popular search terms").count(count))
}

pub(crate) async fn suggestions(
    State(search): State<SearchService>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<String>>> {
    let suggestions = search.suggestions(&query.q);
    let count = suggestions.len();
    Json(
        ApiResponse::ok(suggestions, "Search suggestions")
            .query(query.q)
            .count(count),
    )
}
