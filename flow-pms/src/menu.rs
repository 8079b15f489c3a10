#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub path: String,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Static navigation shortcuts. Seeded once at startup, shared read-only
/// across requests, never persisted.
#[derive(Clone, Debug, Default)]
pub struct MenuRegistry {
    entries: Vec<MenuEntry>,
}

impl MenuRegistry {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    /// The navigation set the sidebar ships with.
    pub fn with_default_entries() -> Self {
        Self::new(vec![
            MenuEntry::new("Dashboard", "/dashboard"),
            MenuEntry::new("My Projects", "/projects"),
            MenuEntry::new("Public Projects", "/projects/public"),
            MenuEntry::new("New Project", "/projects/create"),
            MenuEntry::new("Gantt Chart", "/gantt"),
            MenuEntry::new("Calendar", "/calendar"),
            MenuEntry::new("Files", "/files"),
            MenuEntry::new("Bookmarks", "/bookmarks"),
        ])
    }

    /// Entries whose label contains `query` case-insensitively, in
    /// declaration order.
    pub fn matching(&self, query: &str) -> Vec<&MenuEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.label.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        let registry = MenuRegistry::with_default_entries();
        let hits = registry.matching("DASHBOARD");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "/dashboard");
    }

    #[test]
    fn matches_keep_declaration_order() {
        let registry = MenuRegistry::with_default_entries();
        let labels: Vec<_> = registry
            .matching("projects")
            .into_iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, vec!["My Projects", "Public Projects"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let registry = MenuRegistry::with_default_entries();
        assert!(registry.matching("retrospective").is_empty());
    }
}
