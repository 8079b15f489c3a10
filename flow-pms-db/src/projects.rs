use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use flow_pms_api_types::search::ProjectSearchRecord;
use flow_pms_api_types::{CategoryCount, CreateProject, Project, ProjectStats, UpdateProject};
use itertools::Itertools;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::instrument;

use crate::contains_ignore_case;
use crate::entity::{project, user};
use crate::FlowDb;

impl FlowDb {
    #[instrument(skip(self))]
    pub async fn create_project(&self, create: CreateProject) -> Result<Project> {
        let CreateProject {
            title,
            category,
            is_public,
            has_admin_access,
            status,
            description,
            owner_id,
        } = create;
        let now = Utc::now().naive_utc();
        let model = project::ActiveModel {
            id: NotSet,
            title: Set(title),
            category: Set(category),
            is_public: Set(is_public.unwrap_or(true)),
            has_admin_access: Set(has_admin_access.unwrap_or(true)),
            status: Set(status.unwrap_or_else(|| "In Progress".to_string())),
            description: Set(description),
            owner_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        let owner = model.find_related(user::Entity).one(&self.db).await?;
        Ok(Project::from((model, owner)))
    }

    pub async fn get_project(&self, id: i64) -> Result<Option<Project>> {
        Ok(project::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
            .map(Project::from))
    }

    pub async fn get_all_projects(&self) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    pub async fn get_public_projects(&self) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .filter(project::Column::IsPublic.eq(true))
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    pub async fn get_projects_by_owner(&self, owner_id: i64) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .filter(project::Column::OwnerId.eq(owner_id))
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    pub async fn get_projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .filter(project::Column::Category.eq(category))
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    pub async fn get_projects_by_status(&self, status: &str) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .filter(project::Column::Status.eq(status))
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    pub async fn get_recently_updated_projects(
        &self,
        since: NaiveDateTime,
    ) -> Result<Vec<Project>> {
        Ok(project::Entity::find()
            .find_also_related(user::Entity)
            .filter(project::Column::UpdatedAt.gte(since))
            .order_by_desc(project::Column::UpdatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn update_project(&self, id: i64, update: UpdateProject) -> Result<Option<Project>> {
        let Some(existing) = project::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active = existing.into_active_model();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(category) = update.category {
            active.category = Set(Some(category));
        }
        if let Some(is_public) = update.is_public {
            active.is_public = Set(is_public);
        }
        if let Some(has_admin_access) = update.has_admin_access {
            active.has_admin_access = Set(has_admin_access);
        }
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().naive_utc());
        let model = active.update(&self.db).await?;
        let owner = model.find_related(user::Entity).one(&self.db).await?;
        Ok(Some(Project::from((model, owner))))
    }

    pub async fn change_project_status(&self, id: i64, status: &str) -> Result<Option<Project>> {
        self.update_project(
            id,
            UpdateProject {
                status: Some(status.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: i64) -> Result<bool> {
        let result = project::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn project_stats(&self) -> Result<ProjectStats> {
        let total = project::Entity::find().count(&self.db).await?;
        let public_count = project::Entity::find()
            .filter(project::Column::IsPublic.eq(true))
            .count(&self.db)
            .await?;
        let categories: Vec<Option<String>> = project::Entity::find()
            .select_only()
            .column(project::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await?;
        let categories = categories
            .into_iter()
            .flatten()
            .counts()
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category,
                count: count as u64,
            })
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)))
            .collect();
        Ok(ProjectStats {
            total,
            public_count,
            categories,
        })
    }

    /// Case-insensitive substring match over title and description,
    /// most-recently-updated first.
    #[instrument(skip(self))]
    pub async fn search_projects_matching(&self, keyword: &str) -> Result<Vec<ProjectSearchRecord>> {
        Ok(project::Entity::find()
            .filter(
                Condition::any()
                    .add(contains_ignore_case(project::Column::Title, keyword))
                    .add(contains_ignore_case(project::Column::Description, keyword)),
            )
            .order_by_desc(project::Column::UpdatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ProjectSearchRecord::from)
            .collect())
    }
}
