use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use flow_pms_api_types::result::ApiResponse;
use flow_pms_api_types::search::ProjectSearchRecord;
use flow_pms_api_types::{CreateProject, Project, ProjectStats, UpdateProject};
use flow_pms_db::FlowDb;
use serde::Deserialize;

use crate::web::error::ApiError;

pub(crate) async fn create_project(
    State(db): State<FlowDb>,
    Json(create): Json<CreateProject>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = db.create_project(create).await?;
    Ok(Json(ApiResponse::ok(project, "Project created")))
}

pub(crate) async fn get_project(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = db
        .get_project(id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(ApiResponse::ok(project, "Project found")))
}

pub(crate) async fn get_all_projects(
    State(db): State<FlowDb>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = db.get_all_projects().await?;
    let count = projects.len();
    Ok(Json(ApiResponse::ok(projects, "Projects listed").count(count)))
}

pub(crate) async fn get_public_projects(
    State(db): State<FlowDb>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = db.get_public_projects().await?;
    let count = projects.len();
    Ok(Json(
        ApiResponse::ok(projects, "Public projects listed").count(count),
    ))
}

pub(crate) async fn get_projects_by_owner(
    State(db): State<FlowDb>,
    Path(owner_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = db.get_projects_by_owner(owner_id).await?;
    let count = projects.len();
    Ok(Json(
        ApiResponse::ok(projects, "Projects listed by owner").count(count),
    ))
}

pub(crate) async fn get_projects_by_category(
    State(db): State<FlowDb>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = db.get_projects_by_category(&category).await?;
    let count = projects.len();
    Ok(Json(
        ApiResponse::ok(projects, "Projects listed by category").count(count),
    ))
}

pub(crate) async fn get_projects_by_status(
    State(db): State<FlowDb>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = db.get_projects_by_status(&status).await?;
    let count = projects.len();
    Ok(Json(
        ApiResponse::ok(projects, "Projects listed by status").count(count),
    ))
}

pub(crate) async fn update_project(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateProject>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = db
        .update_project(id, update)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(ApiResponse::ok(project, "Project updated")))
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeywordQuery {
    pub(crate) keyword: String,
}

pub(crate) async fn search_project_records(
    State(db): State<FlowDb>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectSearchRecord>>>, ApiError> {
    let records = db.search_projects_matching(&query.keyword).await?;
    let count = records.len();
    Ok(Json(
        ApiResponse::ok(records, "Project keyword search completed")
            .query(query.keyword)
            .count(count),
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentQuery {
    pub(crate) days: Option<i64>,
}

pub(crate) async fn get_recent_projects(
    State(db): State<FlowDb>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let since = Utc::now().naive_utc() - Duration::days(query.days.unwrap_or(7));
    let projects = db.get_recently_updated_projects(since).await?;
    let count = projects.len();
    Ok(Json(
        ApiResponse::ok(projects, "Recently updated projects listed").count(count),
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    pub(crate) status: String,
}

pub(crate) async fn change_project_status(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
    Json(change): Json<StatusChange>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = db
        .change_project_status(id, &change.status)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(ApiResponse::ok(project, "Project status changed")))
}

pub(crate) async fn delete_project(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !db.delete_project(id).await? {
        return Err(ApiError::NotFound("project"));
    }
    Ok(Json(ApiResponse::ok((), "Project deleted")))
}

pub(crate) async fn get_project_stats(
    State(db): State<FlowDb>,
) -> Result<Json<ApiResponse<ProjectStats>>, ApiError> {
    let stats = db.project_stats().await?;
    Ok(Json(ApiResponse::ok(stats, "Project statistics computed")))
}
