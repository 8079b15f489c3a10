mod menu;
mod search_service;
mod web;

use std::sync::Arc;

use anyhow::Result;
use flow_pms_db::FlowDb;
use tracing::info;

use crate::menu::MenuRegistry;
use crate::search_service::{default_popular_terms, SearchService};
use crate::web::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    // Create the db before we proceed
    tracing_subscriber::fmt::init();
    let db = FlowDb::connect().await?;
    info!("DB connected & migrations applied");
    let search = SearchService::new(
        Arc::new(db.clone()),
        Arc::new(MenuRegistry::with_default_entries()),
        default_popular_terms(),
    );
    let web_state = WebState { db, search };
    web::start_web(web_state).await?;
    Ok(())
}
