use std::sync::Arc;

use async_trait::async_trait;
use flow_pms_api_types::search::{
    ProjectSearchRecord, QuickSearch, SearchResult, SearchResultKind, SearchStatistics,
    StatusMessageSearchRecord, UserSearchRecord, QUICK_SEARCH_GROUP_LIMIT,
};
use flow_pms_db::FlowDb;
use thiserror::Error;

pub const MAX_SUGGESTIONS: usize = 5;

use crate::menu::MenuRegistry;

/// Seed list behind the popular-terms endpoint. Configuration data, not
/// usage telemetry.
pub fn default_popular_terms() -> Vec<String> {
    [
        "dashboard",
        "design",
        "sprint",
        "roadmap",
        "meeting notes",
        "calendar",
        "onboarding",
        "retrospective",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query must not be empty")]
    EmptyQuery,
    #[error("search lookup failed: {0}")]
    Lookup(#[from] anyhow::Error),
}

/// Record store the aggregator reads from. Each method performs a
/// case-insensitive substring match over that source's designated fields and
/// returns hits in the source's own order.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn find_projects_matching(
        &self,
        keyword: &str,
    ) -> anyhow::Result<Vec<ProjectSearchRecord>>;
    async fn find_users_matching(&self, keyword: &str) -> anyhow::Result<Vec<UserSearchRecord>>;
    async fn find_status_messages_matching(
        &self,
        keyword: &str,
    ) -> anyhow::Result<Vec<StatusMessageSearchRecord>>;
}

#[async_trait]
impl RecordLookup for FlowDb {
    async fn find_projects_matching(
        &self,
        keyword: &str,
    ) -> anyhow::Result<Vec<ProjectSearchRecord>> {
        self.search_projects_matching(keyword).await
    }

    async fn find_users_matching(&self, keyword: &str) -> anyhow::Result<Vec<UserSearchRecord>> {
        self.search_users_matching(keyword).await
    }

    async fn find_status_messages_matching(
        &self,
        keyword: &str,
    ) -> anyhow::Result<Vec<StatusMessageSearchRecord>> {
        self.search_status_messages_matching(keyword).await
    }
}

/// Aggregates project, menu, user and status message hits into one typed,
/// ordered result list.
#[derive(Clone)]
pub struct SearchService {
    lookup: Arc<dyn RecordLookup>,
    menu: Arc<MenuRegistry>,
    popular_terms: Arc<[String]>,
}

impl SearchService {
    pub fn new(
        lookup: Arc<dyn RecordLookup>,
        menu: Arc<MenuRegistry>,
        popular_terms: Vec<String>,
    ) -> Self {
        Self {
            lookup,
            menu,
            popular_terms: popular_terms.into(),
        }
    }

    /// Searches every source and concatenates the hits in the fixed order
    /// Project, Menu, User, StatusMessage. The order is a pinned behavioral
    /// contract: navigation shortcuts stay near the front of long lists.
    /// Distinct sources are never merged, so the result length is the sum of
    /// the per-source match counts. Any failing lookup fails the whole call.
    pub async fn search_all(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.search_with_owner(query, None).await
    }

    /// Same as [`Self::search_all`], but projects owned by `user_id` come
    /// back tagged [`SearchResultKind::OwnedProject`]. An id that owns none
    /// of the matches degrades to plain `Project` tags.
    pub async fn search_for_user(
        &self,
        query: &str,
        user_id: i64,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search_with_owner(query, Some(user_id)).await
    }

    async fn search_with_owner(
        &self,
        query: &str,
        owner: Option<i64>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = validated(query)?;
        let projects = self.project_results(query, owner).await?;
        let users = self.user_results(query).await?;
        let menu = self.menu_results(query);
        let status = self.status_results(query).await?;
        Ok(projects
            .into_iter()
            .chain(menu)
            .chain(users)
            .chain(status)
            .collect())
    }

    pub async fn search_projects(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = validated(query)?;
        self.project_results(query, None).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = validated(query)?;
        self.user_results(query).await
    }

    pub async fn search_status_messages(
        &self,
        query: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = validated(query)?;
        self.status_results(query).await
    }

    pub fn search_menu(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let query = validated(query)?;
        Ok(self.menu_results(query))
    }

    /// Restricts the search to one source. An unknown category yields an
    /// empty list, not an error.
    pub async fn search_by_category(
        &self,
        category: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        match category {
            "projects" => self.search_projects(query).await,
            "menu" => self.search_menu(query),
            "users" => self.search_users(query).await,
            "status" => self.search_status_messages(query).await,
            // "blog" has no backing source yet, so it falls through to the
            // empty case like any unknown category.
            _ => {
                validated(query)?;
                Ok(Vec::new())
            }
        }
    }

    /// Groups the full result list into the four fixed preview buckets,
    /// keeping at most [`QUICK_SEARCH_GROUP_LIMIT`] entries per bucket in
    /// their `search_all` order. `total_count` is the pre-truncation total.
    pub async fn quick_search(&self, query: &str) -> Result<QuickSearch, SearchError> {
        let results = self.search_all(query).await?;
        let mut quick = QuickSearch {
            total_count: results.len(),
            ..QuickSearch::default()
        };
        for result in results {
            let bucket = match result.kind {
                SearchResultKind::Project | SearchResultKind::OwnedProject => &mut quick.projects,
                SearchResultKind::Menu => &mut quick.menu,
                SearchResultKind::User => &mut quick.users,
                SearchResultKind::Blog => &mut quick.blog,
                // the preview keeps the original four buckets; status hits
                // only appear in the full list
                SearchResultKind::StatusMessage => continue,
            };
            if bucket.len() < QUICK_SEARCH_GROUP_LIMIT {
                bucket.push(result);
            }
        }
        Ok(quick)
    }

    /// Raw per-source match counts. Re-runs the lookups rather than reusing
    /// a truncated view, so `total_count` equals `search_all(query).len()`
    /// for the same query at the same instant.
    pub async fn search_statistics(&self, query: &str) -> Result<SearchStatistics, SearchError> {
        let query = validated(query)?;
        let project_count = self.lookup.find_projects_matching(query).await?.len();
        let user_count = self.lookup.find_users_matching(query).await?.len();
        let menu_count = self.menu.matching(query).len();
        let status_message_count = self
            .lookup
            .find_status_messages_matching(query)
            .await?
            .len();
        let blog_count = 0;
        Ok(SearchStatistics {
            project_count,
            user_count,
            menu_count,
            status_message_count,
            blog_count,
            total_count: project_count
                + user_count
                + menu_count
                + status_message_count
                + blog_count,
        })
    }

    pub fn popular_terms(&self) -> Vec<String> {
        self.popular_terms.to_vec()
    }

    /// Popular terms containing `query` case-insensitively, original order,
    /// capped at [`MAX_SUGGESTIONS`].
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.popular_terms
            .iter()
            .filter(|term| term.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    async fn project_results(
        &self,
        query: &str,
        owner: Option<i64>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .lookup
            .find_projects_matching(query)
            .await?
            .into_iter()
            .map(|record| {
                let kind = match owner {
                    Some(user_id) if record.owner_id == Some(user_id) => {
                        SearchResultKind::OwnedProject
                    }
                    _ => SearchResultKind::Project,
                };
                SearchResult::new(kind, record.title)
                    .category(record.category)
                    .description(record.description)
                    .entity_id(record.id)
            })
            .collect())
    }

    fn menu_results(&self, query: &str) -> Vec<SearchResult> {
        self.menu
            .matching(query)
            .into_iter()
            .map(|entry| SearchResult::menu(entry.label.clone(), entry.path.clone()))
            .collect()
    }

    async fn user_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .lookup
            .find_users_matching(query)
            .await?
            .into_iter()
            .map(|record| {
                SearchResult::new(SearchResultKind::User, record.display_name)
                    .category(Some(record.role))
                    .description(Some(record.email))
                    .entity_id(record.id)
            })
            .collect())
    }

    async fn status_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .lookup
            .find_status_messages_matching(query)
            .await?
            .into_iter()
            .map(|record| {
                SearchResult::new(SearchResultKind::StatusMessage, record.message)
                    .category(record.label)
                    .entity_id(record.user_id)
                    .icon(Some(record.icon))
            })
            .collect())
    }
}

fn validated(query: &str) -> Result<&str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::MenuEntry;

    fn contains(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    #[derive(Default)]
    struct FakeLookup {
        projects: Vec<ProjectSearchRecord>,
        users: Vec<UserSearchRecord>,
        status_messages: Vec<StatusMessageSearchRecord>,
    }

    #[async_trait]
    impl RecordLookup for FakeLookup {
        async fn find_projects_matching(
            &self,
            keyword: &str,
        ) -> anyhow::Result<Vec<ProjectSearchRecord>> {
            Ok(self
                .projects
                .iter()
                .filter(|p| {
                    contains(&p.title, keyword)
                        || p.description.as_deref().is_some_and(|d| contains(d, keyword))
                })
                .cloned()
                .collect())
        }

        async fn find_users_matching(
            &self,
            keyword: &str,
        ) -> anyhow::Result<Vec<UserSearchRecord>> {
            Ok(self
                .users
                .iter()
                .filter(|u| {
                    contains(&u.username, keyword)
                        || contains(&u.display_name, keyword)
                        || contains(&u.email, keyword)
                })
                .cloned()
                .collect())
        }

        async fn find_status_messages_matching(
            &self,
            keyword: &str,
        ) -> anyhow::Result<Vec<StatusMessageSearchRecord>> {
            Ok(self
                .status_messages
                .iter()
                .filter(|s| {
                    contains(&s.message, keyword)
                        || s.label.as_deref().is_some_and(|l| contains(l, keyword))
                })
                .cloned()
                .collect())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl RecordLookup for FailingLookup {
        async fn find_projects_matching(
            &self,
            _keyword: &str,
        ) -> anyhow::Result<Vec<ProjectSearchRecord>> {
            Err(anyhow::anyhow!("connection reset"))
        }

        async fn find_users_matching(
            &self,
            _keyword: &str,
        ) -> anyhow::Result<Vec<UserSearchRecord>> {
            Err(anyhow::anyhow!("connection reset"))
        }

        async fn find_status_messages_matching(
            &self,
            _keyword: &str,
        ) -> anyhow::Result<Vec<StatusMessageSearchRecord>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    fn project(id: i64, title: &str, owner_id: Option<i64>) -> ProjectSearchRecord {
        ProjectSearchRecord {
            id,
            title: title.to_string(),
            category: Some("design".to_string()),
            description: None,
            owner_id,
        }
    }

    fn user(id: i64, username: &str, display_name: &str) -> UserSearchRecord {
        UserSearchRecord {
            id,
            username: username.to_string(),
            display_name: display_name.to_string(),
            email: format!("{username}@flow.dev"),
            role: "USER".to_string(),
        }
    }

    fn status(user_id: i64, message: &str, icon: &str) -> StatusMessageSearchRecord {
        StatusMessageSearchRecord {
            user_id,
            message: message.to_string(),
            icon: icon.to_string(),
            label: None,
        }
    }

    fn service(lookup: impl RecordLookup + 'static) -> SearchService {
        let menu = MenuRegistry::new(vec![
            MenuEntry::new("Dashboard", "/dashboard"),
            MenuEntry::new("My Projects", "/projects"),
        ]);
        SearchService::new(Arc::new(lookup), Arc::new(menu), default_popular_terms())
    }

    fn seeded_service() -> SearchService {
        service(FakeLookup {
            projects: vec![
                project(7, "Alice's Board", Some(42)),
                project(9, "Alice's Plan", Some(99)),
            ],
            users: vec![user(42, "alice", "Alice Kim")],
            status_messages: vec![status(42, "alice is out this week", "🌴")],
        })
    }

    #[tokio::test]
    async fn search_all_length_is_the_sum_of_per_source_counts() {
        let service = seeded_service();
        let all = service.search_all("alice").await.unwrap();
        let projects = service.search_projects("alice").await.unwrap();
        let menu = service.search_menu("alice").unwrap();
        let users = service.search_users("alice").await.unwrap();
        let status = service.search_status_messages("alice").await.unwrap();
        assert_eq!(
            all.len(),
            projects.len() + menu.len() + users.len() + status.len()
        );
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn results_concatenate_in_fixed_source_order() {
        // "a" matches both projects, the Dashboard entry, the user and the
        // status message.
        let service = seeded_service();
        let kinds: Vec<_> = service
            .search_all("a")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SearchResultKind::Project,
                SearchResultKind::Project,
                SearchResultKind::Menu,
                SearchResultKind::User,
                SearchResultKind::StatusMessage,
            ]
        );
    }

    #[tokio::test]
    async fn search_all_is_idempotent() {
        let service = seeded_service();
        let first = service.search_all("alice").await.unwrap();
        let second = service.search_all("alice").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let service = seeded_service();
        assert!(matches!(
            service.search_all("   ").await,
            Err(SearchError::EmptyQuery)
        ));
        assert!(matches!(
            service.search_all("").await,
            Err(SearchError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn lookup_failure_fails_the_whole_aggregation() {
        let service = service(FailingLookup);
        assert!(matches!(
            service.search_all("alice").await,
            Err(SearchError::Lookup(_))
        ));
    }

    #[tokio::test]
    async fn owned_projects_are_tagged_for_the_requesting_user() {
        let service = seeded_service();
        let results = service.search_for_user("alice", 42).await.unwrap();
        let board = results.iter().find(|r| r.title == "Alice's Board").unwrap();
        let plan = results.iter().find(|r| r.title == "Alice's Plan").unwrap();
        assert_eq!(board.kind, SearchResultKind::OwnedProject);
        assert_eq!(plan.kind, SearchResultKind::Project);
    }

    #[tokio::test]
    async fn unknown_user_id_degrades_to_plain_project_tags() {
        let service = seeded_service();
        let results = service.search_for_user("alice", 1000).await.unwrap();
        assert!(results
            .iter()
            .all(|r| r.kind != SearchResultKind::OwnedProject));
    }

    #[tokio::test]
    async fn unknown_category_yields_empty_not_error() {
        let service = seeded_service();
        let results = service.search_by_category("wiki", "alice").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn blog_category_is_an_empty_placeholder() {
        let service = seeded_service();
        let results = service.search_by_category("blog", "alice").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn category_search_restricts_to_one_source() {
        let service = seeded_service();
        let results = service
            .search_by_category("projects", "alice")
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.kind == SearchResultKind::Project));
    }

    #[tokio::test]
    async fn quick_search_caps_each_bucket_at_three() {
        let service = service(FakeLookup {
            projects: (1..=5)
                .map(|i| project(i, &format!("alpha {i}"), None))
                .collect(),
            ..FakeLookup::default()
        });
        let quick = service.quick_search("alpha").await.unwrap();
        assert_eq!(quick.projects.len(), 3);
        assert_eq!(quick.total_count, 5);
        let titles: Vec<_> = quick.projects.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha 1", "alpha 2", "alpha 3"]);
        assert!(quick.blog.is_empty());
    }

    #[tokio::test]
    async fn quick_search_preserves_relative_order_within_categories() {
        let service = seeded_service();
        let all = service.search_all("a").await.unwrap();
        let quick = service.quick_search("a").await.unwrap();
        let all_menu: Vec<_> = all
            .iter()
            .filter(|r| r.kind == SearchResultKind::Menu)
            .take(QUICK_SEARCH_GROUP_LIMIT)
            .cloned()
            .collect();
        assert_eq!(quick.menu, all_menu);
        let total_previewed =
            quick.projects.len() + quick.menu.len() + quick.users.len() + quick.blog.len();
        assert!(total_previewed <= 4 * QUICK_SEARCH_GROUP_LIMIT);
    }

    #[tokio::test]
    async fn owned_projects_share_the_projects_bucket() {
        let service = seeded_service();
        let quick = service.quick_search("alice").await.unwrap();
        // both projects land in the same bucket regardless of ownership tag
        assert_eq!(quick.projects.len(), 2);
    }

    #[tokio::test]
    async fn statistics_total_matches_search_all_length() {
        let service = seeded_service();
        let stats = service.search_statistics("alice").await.unwrap();
        let all = service.search_all("alice").await.unwrap();
        assert_eq!(stats.total_count, all.len());
        assert_eq!(stats.project_count, 2);
        assert_eq!(stats.user_count, 1);
        assert_eq!(stats.menu_count, 0);
        assert_eq!(stats.status_message_count, 1);
        assert_eq!(stats.blog_count, 0);
    }

    #[tokio::test]
    async fn menu_seed_answers_the_dashboard_query() {
        let service = seeded_service();
        let results = service.search_all("dashboard").await.unwrap();
        let menu_hit = results
            .iter()
            .find(|r| r.kind == SearchResultKind::Menu)
            .unwrap();
        assert_eq!(menu_hit.url.as_deref(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn status_results_use_the_stored_icon() {
        let service = seeded_service();
        let results = service.search_status_messages("out this week").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].icon, "🌴");
        assert_eq!(results[0].entity_id, Some(42));
    }

    #[test]
    fn suggestions_filter_and_cap_popular_terms() {
        let service = seeded_service();
        let hits = service.suggestions("o");
        assert!(hits.len() <= MAX_SUGGESTIONS);
        assert!(hits.iter().all(|term| term.contains('o')));

        let exact = service.suggestions("DASH");
        assert_eq!(exact, vec!["dashboard".to_string()]);
    }

    #[test]
    fn suggestions_preserve_popular_term_order() {
        let service = seeded_service();
        let all_terms = service.popular_terms();
        let hits = service.suggestions("r");
        let mut last_index = 0;
        for hit in &hits {
            let index = all_terms.iter().position(|t| t == hit).unwrap();
            assert!(index >= last_index);
            last_index = index;
        }
    }
}
