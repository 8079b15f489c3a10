pub mod entity;

mod common_type_conversions;
mod projects;
mod status_messages;
mod users;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ColumnTrait, ConnectOptions, Database, DatabaseConnection};
use sea_query::{Expr, Func, SimpleExpr};
use tracing::info;

pub use sea_orm::DbErr as SeaDbErr;
pub use users::UserStoreError;

#[derive(Clone, Debug)]
pub struct FlowDb {
    db: DatabaseConnection,
}

impl FlowDb {
    pub async fn connect() -> Result<Self> {
        let url = std::env::var("DATABASE_URL")?;
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(50).min_connections(0);
        let db: DatabaseConnection = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;
        info!("database connected, migrations applied");
        Ok(Self { db })
    }
}

/// `LOWER(col) LIKE '%keyword%'`, the case-insensitive substring match every
/// search lookup uses.
pub(crate) fn contains_ignore_case<C: ColumnTrait>(col: C, keyword: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col)))
        .like(format!("%{}%", keyword.to_lowercase()))
}
