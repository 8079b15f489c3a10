use flow_pms_api_types::search::{ProjectSearchRecord, StatusMessageSearchRecord, UserSearchRecord};
use flow_pms_api_types::{Project, User};

use crate::entity::{project, status_message, user};

impl From<(project::Model, Option<user::Model>)> for Project {
    fn from((project, owner): (project::Model, Option<user::Model>)) -> Self {
        let project::Model {
            id,
            title,
            category,
            is_public,
            has_admin_access,
            status,
            description,
            owner_id,
            created_at,
            updated_at,
        } = project;
        Self {
            id,
            title,
            category,
            is_public,
            has_admin_access,
            status,
            description,
            owner_id,
            owner_name: owner.map(|owner| owner.display_name),
            created_at,
            updated_at,
        }
    }
}

impl From<project::Model> for ProjectSearchRecord {
    fn from(value: project::Model) -> Self {
        let project::Model {
            id,
            title,
            category,
            description,
            owner_id,
            ..
        } = value;
        Self {
            id,
            title,
            category,
            description,
            owner_id,
        }
    }
}

impl From<(user::Model, u64)> for User {
    fn from((user, project_count): (user::Model, u64)) -> Self {
        let user::Model {
            id,
            username,
            email,
            display_name,
            profile_icon,
            status_message,
            role,
            is_active,
            created_at,
            updated_at,
        } = user;
        Self {
            id,
            username,
            email,
            display_name,
            profile_icon,
            status_message,
            role,
            is_active,
            created_at,
            updated_at,
            project_count,
        }
    }
}

impl From<user::Model> for UserSearchRecord {
    fn from(value: user::Model) -> Self {
        let user::Model {
            id,
            username,
            display_name,
            email,
            role,
            ..
        } = value;
        Self {
            id,
            username,
            display_name,
            email,
            role,
        }
    }
}

impl From<status_message::Model> for StatusMessageSearchRecord {
    fn from(value: status_message::Model) -> Self {
        let status_message::Model {
            user_id,
            icon,
            message,
            label,
            ..
        } = value;
        Self {
            user_id,
            message,
            icon,
            label,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDateTime;
    use flow_pms_api_types::search::StatusMessageSearchRecord;
    use flow_pms_api_types::{Project, User};

    use crate::entity::{project, status_message, user};

    fn sample_user() -> user::Model {
        user::Model {
            id: 42,
            username: "alice".to_string(),
            email: "alice@flow.dev".to_string(),
            display_name: "Alice Kim".to_string(),
            profile_icon: "😊".to_string(),
            status_message: Some("heads down".to_string()),
            role: "ADMIN".to_string(),
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn project_dto_takes_owner_display_name() {
        let model = project::Model {
            id: 7,
            title: "Alice's Board".to_string(),
            category: Some("design".to_string()),
            is_public: true,
            has_admin_access: true,
            status: "In Progress".to_string(),
            description: None,
            owner_id: Some(42),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let dto = Project::from((model, Some(sample_user())));
        assert_eq!(dto.owner_id, Some(42));
        assert_eq!(dto.owner_name.as_deref(), Some("Alice Kim"));
    }

    #[test]
    fn ownerless_project_has_no_owner_name() {
        let model = project::Model {
            id: 9,
            title: "Orphaned".to_string(),
            category: None,
            is_public: false,
            has_admin_access: true,
            status: "On Hold".to_string(),
            description: None,
            owner_id: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let dto = Project::from((model, None));
        assert_eq!(dto.owner_name, None);
    }

    #[test]
    fn user_dto_carries_project_count() {
        let dto = User::from((sample_user(), 3));
        assert_eq!(dto.project_count, 3);
        assert_eq!(dto.username, "alice");
    }

    #[test]
    fn status_record_points_at_the_author() {
        let model = status_message::Model {
            id: 1,
            user_id: 42,
            icon: "🎧".to_string(),
            message: "in a meeting".to_string(),
            label: Some("busy".to_string()),
            is_active: true,
            created_at: NaiveDateTime::default(),
        };
        let record = StatusMessageSearchRecord::from(model);
        assert_eq!(record.user_id, 42);
        assert_eq!(record.icon, "🎧");
        assert_eq!(record.label.as_deref(), Some("busy"));
    }
}
