use anyhow::Result;
use chrono::Utc;
use flow_pms_api_types::search::UserSearchRecord;
use flow_pms_api_types::{CreateUser, UpdateUser, UpdateUserStatus, User};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use thiserror::Error;
use tracing::instrument;

use crate::contains_ignore_case;
use crate::entity::{project, status_message, user};
use crate::FlowDb;

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("user {0} not found")]
    NotFound(i64),
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl FlowDb {
    #[instrument(skip(self))]
    pub async fn create_user(&self, create: CreateUser) -> Result<User, UserStoreError> {
        let username_taken = user::Entity::find()
            .filter(user::Column::Username.eq(create.username.as_str()))
            .count(&self.db)
            .await?
            > 0;
        if username_taken {
            return Err(UserStoreError::DuplicateUsername(create.username));
        }
        let email_taken = user::Entity::find()
            .filter(user::Column::Email.eq(create.email.as_str()))
            .count(&self.db)
            .await?
            > 0;
        if email_taken {
            return Err(UserStoreError::DuplicateEmail(create.email));
        }

        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            id: NotSet,
            username: Set(create.username),
            email: Set(create.email),
            display_name: Set(create.display_name),
            profile_icon: Set(create.profile_icon.unwrap_or_else(|| "😊".to_string())),
            status_message: Set(create.status_message),
            role: Set(create.role.unwrap_or_else(|| "USER".to_string())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(User::from((model, 0)))
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, UserStoreError> {
        let Some(model) = user::Entity::find_by_id(user_id).one(&self.db).await? else {
            return Ok(None);
        };
        let project_count = self.count_owned_projects(model.id).await?;
        Ok(Some(User::from((model, project_count))))
    }

    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserStoreError> {
        let Some(model) = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let project_count = self.count_owned_projects(model.id).await?;
        Ok(Some(User::from((model, project_count))))
    }

    pub async fn get_active_users(&self) -> Result<Vec<User>, UserStoreError> {
        let users = user::Entity::find()
            .find_with_related(project::Entity)
            .filter(user::Column::IsActive.eq(true))
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(users
            .into_iter()
            .map(|(user, projects)| User::from((user, projects.len() as u64)))
            .collect())
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(
        &self,
        user_id: i64,
        update: UpdateUser,
    ) -> Result<User, UserStoreError> {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(UserStoreError::NotFound(user_id))?;

        if let Some(username) = &update.username {
            let taken = user::Entity::find()
                .filter(user::Column::Username.eq(username.as_str()))
                .filter(user::Column::Id.ne(user_id))
                .count(&self.db)
                .await?
                > 0;
            if taken {
                return Err(UserStoreError::DuplicateUsername(username.clone()));
            }
        }
        if let Some(email) = &update.email {
            let taken = user::Entity::find()
                .filter(user::Column::Email.eq(email.as_str()))
                .filter(user::Column::Id.ne(user_id))
                .count(&self.db)
                .await?
                > 0;
            if taken {
                return Err(UserStoreError::DuplicateEmail(email.clone()));
            }
        }

        let mut active = model.into_active_model();
        if let Some(username) = update.username {
            active.username = Set(username);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(display_name) = update.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(profile_icon) = update.profile_icon {
            active.profile_icon = Set(profile_icon);
        }
        if let Some(status_message) = update.status_message {
            active.status_message = Set(Some(status_message));
        }
        if let Some(role) = update.role {
            active.role = Set(role);
        }
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().naive_utc());
        let model = active.update(&self.db).await?;
        let project_count = self.count_owned_projects(model.id).await?;
        Ok(User::from((model, project_count)))
    }

    /// Soft delete: the row stays so old projects keep their owner.
    #[instrument(skip(self))]
    pub async fn deactivate_user(&self, user_id: i64) -> Result<(), UserStoreError> {
        self.set_user_active(user_id, false).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn activate_user(&self, user_id: i64) -> Result<User, UserStoreError> {
        self.set_user_active(user_id, true).await
    }

    async fn set_user_active(&self, user_id: i64, is_active: bool) -> Result<User, UserStoreError> {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(UserStoreError::NotFound(user_id))?;
        let mut active = model.into_active_model();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now().naive_utc());
        let model = active.update(&self.db).await?;
        let project_count = self.count_owned_projects(model.id).await?;
        Ok(User::from((model, project_count)))
    }

    /// Updates the user's current status and appends a row to the status
    /// message history so the status feed stays searchable.
    #[instrument(skip(self, status))]
    pub async fn update_user_status(
        &self,
        user_id: i64,
        status: UpdateUserStatus,
    ) -> Result<User, UserStoreError> {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(UserStoreError::NotFound(user_id))?;
        let previous_icon = model.profile_icon.clone();

        let mut active = model.into_active_model();
        if let Some(icon) = &status.profile_icon {
            active.profile_icon = Set(icon.clone());
        }
        if let Some(message) = &status.status_message {
            active.status_message = Set(Some(message.clone()));
        }
        active.updated_at = Set(Utc::now().naive_utc());
        let model = active.update(&self.db).await?;

        if let Some(message) = status.status_message {
            status_message::ActiveModel {
                id: NotSet,
                user_id: Set(model.id),
                icon: Set(status.profile_icon.unwrap_or(previous_icon)),
                message: Set(message),
                label: Set(None),
                is_active: Set(true),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(&self.db)
            .await?;
        }

        let project_count = self.count_owned_projects(model.id).await?;
        Ok(User::from((model, project_count)))
    }

    /// Case-insensitive substring match over username, display name and
    /// email; active users only, most-recently-updated first.
    #[instrument(skip(self))]
    pub async fn search_users_matching(&self, keyword: &str) -> Result<Vec<UserSearchRecord>> {
        Ok(user::Entity::find()
            .filter(user::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(contains_ignore_case(user::Column::Username, keyword))
                    .add(contains_ignore_case(user::Column::DisplayName, keyword))
                    .add(contains_ignore_case(user::Column::Email, keyword)),
            )
            .order_by_desc(user::Column::UpdatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(UserSearchRecord::from)
            .collect())
    }

    async fn count_owned_projects(&self, user_id: i64) -> Result<u64, sea_orm::DbErr> {
        project::Entity::find()
            .filter(project::Column::OwnerId.eq(user_id))
            .count(&self.db)
            .await
    }
}
