use serde::{Deserialize, Serialize};

/// Which source a search result came from. The kind drives grouping in the
/// quick-search view and picks the fallback icon.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum SearchResultKind {
    Project,
    OwnedProject,
    Menu,
    User,
    StatusMessage,
    Blog,
}

impl SearchResultKind {
    pub fn default_icon(&self) -> &'static str {
        match self {
            SearchResultKind::Project => "📋",
            SearchResultKind::OwnedProject => "📌",
            SearchResultKind::Menu => "📱",
            SearchResultKind::User => "👤",
            SearchResultKind::StatusMessage => "💬",
            SearchResultKind::Blog => "📝",
        }
    }
}

/// Uniform record produced by every search source.
///
/// `icon` is never empty: constructors fall back to the kind's default when
/// no explicit icon is supplied.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub kind: SearchResultKind,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub entity_id: Option<i64>,
    pub url: Option<String>,
    pub icon: String,
}

impl SearchResult {
    pub fn new(kind: SearchResultKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            category: None,
            description: None,
            entity_id: None,
            url: None,
            icon: kind.default_icon().to_string(),
        }
    }

    /// Result for a static menu entry. Menu hits carry a navigation target
    /// and no backing entity id.
    pub fn menu(label: impl Into<String>, path: impl Into<String>) -> Self {
        let mut result = Self::new(SearchResultKind::Menu, label);
        result.url = Some(path.into());
        result
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn entity_id(mut self, entity_id: i64) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Overrides the kind-derived icon. Empty strings are ignored so the
    /// non-empty icon invariant holds.
    pub fn icon(mut self, icon: Option<String>) -> Self {
        if let Some(icon) = icon.filter(|i| !i.is_empty()) {
            self.icon = icon;
        }
        self
    }
}

/// Raw per-source match counts for a single query. `total_count` is always
/// the sum of the per-source counts, so it matches the length of the full
/// aggregated result list.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatistics {
    pub project_count: usize,
    pub user_count: usize,
    pub menu_count: usize,
    pub status_message_count: usize,
    pub blog_count: usize,
    pub total_count: usize,
}

/// Per-category preview of the full result list, capped at
/// [`QUICK_SEARCH_GROUP_LIMIT`] entries per bucket. The blog bucket has no
/// backing source yet and is always empty.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickSearch {
    pub projects: Vec<SearchResult>,
    pub menu: Vec<SearchResult>,
    pub users: Vec<SearchResult>,
    pub blog: Vec<SearchResult>,
    pub total_count: usize,
}

pub const QUICK_SEARCH_GROUP_LIMIT: usize = 3;

/// Field projection of a project row, as returned by the record lookup.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearchRecord {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
}

/// Field projection of a user row, as returned by the record lookup.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchRecord {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

/// Field projection of a status message row, as returned by the record
/// lookup. `icon` is the emoji stored with the message, not the kind default.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessageSearchRecord {
    pub user_id: i64,
    pub message: String,
    pub icon: String,
    pub label: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_kind_has_a_nonempty_default_icon() {
        let kinds = [
            SearchResultKind::Project,
            SearchResultKind::OwnedProject,
            SearchResultKind::Menu,
            SearchResultKind::User,
            SearchResultKind::StatusMessage,
            SearchResultKind::Blog,
        ];
        for kind in kinds {
            assert!(!kind.default_icon().is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn icon_defaults_from_kind() {
        let result = SearchResult::new(SearchResultKind::Project, "Alpha");
        assert_eq!(result.icon, "📋");
    }

    #[test]
    fn explicit_icon_overrides_default() {
        let result =
            SearchResult::new(SearchResultKind::StatusMessage, "in a meeting").icon(Some("🎧".to_string()));
        assert_eq!(result.icon, "🎧");
    }

    #[test]
    fn empty_icon_override_is_ignored() {
        let result = SearchResult::new(SearchResultKind::User, "alice").icon(Some(String::new()));
        assert_eq!(result.icon, "👤");
    }

    #[test]
    fn menu_results_carry_a_url_and_no_entity_id() {
        let result = SearchResult::menu("Dashboard", "/dashboard");
        assert_eq!(result.url.as_deref(), Some("/dashboard"));
        assert_eq!(result.entity_id, None);
        assert_eq!(result.icon, "📱");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = SearchResult::new(SearchResultKind::Project, "Alpha").entity_id(7);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "project");
        assert_eq!(json["entityId"], 7);
    }
}
