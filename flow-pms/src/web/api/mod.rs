mod projects;
mod search;
mod users;

pub(crate) use projects::{
    change_project_status, create_project, delete_project, get_all_projects, get_project,
    get_project_stats, get_projects_by_category, get_projects_by_owner, get_projects_by_status,
    get_public_projects, get_recent_projects, search_project_records, update_project,
};
pub(crate) use search::{
    popular_terms, quick_search, search_all, search_by_category, search_for_user,
    search_projects, search_statistics, search_status_messages, search_users, suggestions,
};
pub(crate) use users::{
    activate_user, create_user, deactivate_user, get_active_users, get_user, get_user_by_username,
    update_user, update_user_status,
};
