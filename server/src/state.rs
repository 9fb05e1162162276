use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::TokenKey,
    config::Config,
    stores::{
        directory::GraphDirectory,
        media::S3MediaStore,
        pgsql::{PgBuildingStore, PgDepartmentStore, PgProjectStore},
        BuildingStore, DepartmentStore, ProjectMediaStore, ProjectStore, UserDirectory,
    },
};

/// Everything the handlers share. Tests build this directly over the
/// in-memory stores.
pub struct State {
    pub projects: Arc<dyn ProjectStore>,
    pub buildings: Arc<dyn BuildingStore>,
    pub departments: Arc<dyn DepartmentStore>,
    pub media: Arc<dyn ProjectMediaStore>,
    pub directory: Arc<dyn UserDirectory>,
    pub auth: TokenKey,
}

impl State {
    pub async fn new(config: &Config) -> Arc<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&config.database_url)
            .await
            .expect("Database unreachable!");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Migrations failed!");

        Arc::new(Self {
            projects: Arc::new(PgProjectStore::new(pool.clone())),
            buildings: Arc::new(PgBuildingStore::new(pool.clone())),
            departments: Arc::new(PgDepartmentStore::new(pool.clone())),
            media: Arc::new(S3MediaStore::new(pool, config.media.clone())),
            directory: Arc::new(GraphDirectory::new(config.directory.clone())),
            auth: TokenKey::new(config.auth_secret.as_bytes().to_vec()),
        })
    }
}
