use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub is_public: bool,
    pub has_admin_access: bool,
    pub status: String,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
    pub owner_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    pub category: Option<String>,
    pub is_public: Option<bool>,
    pub has_admin_access: Option<bool>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub title: Option<String>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
    pub has_admin_access: Option<bool>,
    pub status: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: u64,
    pub public_count: u64,
    pub categories: Vec<CategoryCount>,
}
