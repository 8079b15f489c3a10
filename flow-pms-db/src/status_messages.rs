use anyhow::Result;
use flow_pms_api_types::search::StatusMessageSearchRecord;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use tracing::instrument;

use crate::contains_ignore_case;
use crate::entity::status_message;
use crate::FlowDb;

impl FlowDb {
    /// Case-insensitive substring match over message text and label; active
    /// messages only, newest first.
    #[instrument(skip(self))]
    pub async fn search_status_messages_matching(
        &self,
        keyword: &str,
    ) -> Result<Vec<StatusMessageSearchRecord>> {
        Ok(status_message::Entity::find()
            .filter(status_message::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(contains_ignore_case(status_message::Column::Message, keyword))
                    .add(contains_ignore_case(status_message::Column::Label, keyword)),
            )
            .order_by_desc(status_message::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(StatusMessageSearchRecord::from)
            .collect())
    }
}
