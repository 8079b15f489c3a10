use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flow_pms_api_types::result::JsonError;
use flow_pms_db::{SeaDbErr, UserStoreError};
use thiserror::Error;
use tracing::error;

use crate::search_service::SearchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Search(#[from] SearchError),
    #[error("{0}")]
    UserStore(#[from] UserStoreError),
    #[error("Generic error {0}")]
    AnyhowError(#[from] anyhow::Error),
    #[error("Db Error {0}")]
    DbError(#[from] SeaDbErr),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ApiError::Search(SearchError::EmptyQuery) => StatusCode::BAD_REQUEST,
            ApiError::UserStore(UserStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::UserStore(UserStoreError::DuplicateUsername(_))
            | ApiError::UserStore(UserStoreError::DuplicateEmail(_)) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("error {}", self);
        let e = format!("{self}");

        (self.as_status_code(), Json(JsonError { error_message: e })).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_query_maps_to_bad_request() {
        let error = ApiError::Search(SearchError::EmptyQuery);
        assert_eq!(error.as_status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_username_maps_to_conflict() {
        let error = ApiError::UserStore(UserStoreError::DuplicateUsername("alice".to_string()));
        assert_eq!(error.as_status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_records_map_to_not_found() {
        assert_eq!(
            ApiError::NotFound("project").as_status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::UserStore(UserStoreError::NotFound(9)).as_status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn lookup_failures_map_to_internal_error() {
        let error = ApiError::Search(SearchError::Lookup(anyhow::anyhow!("connection reset")));
        assert_eq!(error.as_status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
