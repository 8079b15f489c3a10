use axum::extract::{Path, State};
use axum::Json;
use flow_pms_api_types::result::ApiResponse;
use flow_pms_api_types::{CreateUser, UpdateUser, UpdateUserStatus, User};
use flow_pms_db::FlowDb;

use crate::web::error::ApiError;

pub(crate) async fn create_user(
    State(db): State<FlowDb>,
    Json(create): Json<CreateUser>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db.create_user(create).await?;
    Ok(Json(ApiResponse::ok(user, "User created")))
}

pub(crate) async fn get_user(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db.get_user(id).await?.ok_or(ApiError::NotFound("user"))?;
    Ok(Json(ApiResponse::ok(user, "User found")))
}

pub(crate) async fn get_user_by_username(
    State(db): State<FlowDb>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db
        .get_user_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(ApiResponse::ok(user, "User found")))
}

pub(crate) async fn get_active_users(
    State(db): State<FlowDb>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = db.get_active_users().await?;
    let count = users.len();
    Ok(Json(ApiResponse::ok(users, "Active users listed").count(count)))
}

pub(crate) async fn update_user(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateUser>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db.update_user(id, update).await?;
    Ok(Json(ApiResponse::ok(user, "User updated")))
}

pub(crate) async fn deactivate_user(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    db.deactivate_user(id).await?;
    Ok(Json(ApiResponse::ok((), "User deactivated")))
}

pub(crate) async fn activate_user(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db.activate_user(id).await?;
    Ok(Json(ApiResponse::ok(user, "User activated")))
}

pub(crate) async fn update_user_status(
    State(db): State<FlowDb>,
    Path(id): Path<i64>,
    Json(status): Json<UpdateUserStatus>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = db.update_user_status(id, status).await?;
    Ok(Json(ApiResponse::ok(user, "User status updated")))
}
