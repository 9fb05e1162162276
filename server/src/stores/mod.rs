//! # Stores
//!
//! Seams between the handlers and the outside world. Production wiring uses
//! PostgreSQL, the S3 media bucket and Microsoft Graph; tests run entirely
//! on the in-memory variants.

use std::collections::HashMap;

use async_trait::async_trait;
use openhouse_domain::{Building, Department, Organizer, Project, ProjectMedia, SelectionType};
use uuid::Uuid;

use crate::error::AppError;

pub mod directory;
pub mod inmemory;
pub mod media;
pub mod pgsql;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Project>, AppError>;
    async fn get(&self, project_id: Uuid) -> Result<Option<Project>, AppError>;
    /// Distinct non-null floors across all projects, sorted.
    async fn floors(&self) -> Result<Vec<String>, AppError>;
    /// Configured selection types, in display order.
    async fn project_types(&self) -> Result<Vec<SelectionType>, AppError>;
    async fn create(&self, project: &Project) -> Result<(), AppError>;
    async fn update(&self, project: &Project) -> Result<(), AppError>;
    async fn delete(&self, project_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait BuildingStore: Send + Sync {
    async fn buildings(&self) -> Result<Vec<Building>, AppError>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// Ordered by name.
    async fn departments(&self) -> Result<Vec<Department>, AppError>;
}

#[async_trait]
pub trait ProjectMediaStore: Send + Sync {
    /// Presigned download links per project.
    async fn media_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ProjectMedia>>, AppError>;

    async fn media_names(&self, project_id: Uuid) -> Result<Vec<String>, AppError>;

    /// Register the uploads under collision-free object names and answer one
    /// presigned PUT URL per submitted file name, in order.
    async fn new_upload_urls(
        &self,
        project_id: Uuid,
        file_names: &[String],
    ) -> Result<Vec<String>, AppError>;

    async fn remove_media(&self, project_id: Uuid, file_names: &[String]) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Everyone who may organize or co-organize a project.
    async fn organizer_candidates(&self) -> Result<Vec<Organizer>, AppError>;
}
