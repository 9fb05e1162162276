//! # In-memory stores
//!
//! Backing fakes for the integration tests and local demo runs. Behavior
//! mirrors the real stores closely enough that handler tests cannot tell
//! the difference: upload names get uniquified, download URLs are stable
//! per object, unknown content types are skipped.

use std::collections::HashMap;

use async_trait::async_trait;
use openhouse_domain::{
    Building, Department, MediaKind, Organizer, Project, ProjectMedia, SelectionType,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    media::unique_object_name, BuildingStore, DepartmentStore, ProjectMediaStore, ProjectStore,
    UserDirectory,
};
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<HashMap<Uuid, Project>>,
    types: Vec<SelectionType>,
}

impl InMemoryProjectStore {
    pub fn new(types: Vec<SelectionType>) -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            types,
        }
    }

    pub async fn insert(&self, project: Project) {
        self.projects.write().await.insert(project.id, project);
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn get_all(&self) -> Result<Vec<Project>, AppError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(projects)
    }

    async fn get(&self, project_id: Uuid) -> Result<Option<Project>, AppError> {
        Ok(self.projects.read().await.get(&project_id).cloned())
    }

    async fn floors(&self) -> Result<Vec<String>, AppError> {
        let mut floors: Vec<String> = self
            .projects
            .read()
            .await
            .values()
            .filter_map(|v| v.floor.clone())
            .collect();
        floors.sort();
        floors.dedup();
        Ok(floors)
    }

    async fn project_types(&self) -> Result<Vec<SelectionType>, AppError> {
        Ok(self.types.clone())
    }

    async fn create(&self, project: &Project) -> Result<(), AppError> {
        self.projects.write().await.insert(project.id, project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), AppError> {
        self.projects.write().await.insert(project.id, project.clone());
        Ok(())
    }

    async fn delete(&self, project_id: Uuid) -> Result<(), AppError> {
        self.projects.write().await.remove(&project_id);
        Ok(())
    }
}

pub struct InMemoryBuildingStore {
    buildings: Vec<Building>,
}

impl InMemoryBuildingStore {
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }
}

#[async_trait]
impl BuildingStore for InMemoryBuildingStore {
    async fn buildings(&self) -> Result<Vec<Building>, AppError> {
        Ok(self.buildings.clone())
    }
}

pub struct InMemoryDepartmentStore {
    departments: Vec<Department>,
}

impl InMemoryDepartmentStore {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }
}

#[async_trait]
impl DepartmentStore for InMemoryDepartmentStore {
    async fn departments(&self) -> Result<Vec<Department>, AppError> {
        Ok(self.departments.clone())
    }
}

#[derive(Default)]
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<Uuid, Vec<String>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn object_names(&self, project_id: Uuid) -> Vec<String> {
        self.objects
            .read()
            .await
            .get(&project_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProjectMediaStore for InMemoryMediaStore {
    async fn media_for_projects(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ProjectMedia>>, AppError> {
        let objects = self.objects.read().await;
        let mut media: HashMap<Uuid, Vec<ProjectMedia>> = HashMap::new();
        for project_id in project_ids {
            let Some(names) = objects.get(project_id) else {
                continue;
            };
            for name in names {
                let Some(content_type) = MediaKind::content_type_for_file(name) else {
                    continue;
                };
                let kind = MediaKind::from_content_type(content_type)
                    .expect("allow-listed content types map to a kind");
                media.entry(*project_id).or_default().push(ProjectMedia {
                    kind,
                    url: format!("memory://{project_id}/{name}"),
                });
            }
        }
        Ok(media)
    }

    async fn media_names(&self, project_id: Uuid) -> Result<Vec<String>, AppError> {
        Ok(self.object_names(project_id).await)
    }

    async fn new_upload_urls(
        &self,
        project_id: Uuid,
        file_names: &[String],
    ) -> Result<Vec<String>, AppError> {
        let mut objects = self.objects.write().await;
        let entry = objects.entry(project_id).or_default();
        let mut urls = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            if MediaKind::content_type_for_file(file_name).is_none() {
                return Err(AppError::Validation(format!(
                    "Unsupported media file type: \"{file_name}\""
                )));
            }
            let object_name = unique_object_name(file_name);
            urls.push(format!("memory://upload/{project_id}/{object_name}"));
            entry.push(object_name);
        }
        Ok(urls)
    }

    async fn remove_media(&self, project_id: Uuid, file_names: &[String]) -> Result<(), AppError> {
        let mut objects = self.objects.write().await;
        if let Some(names) = objects.get_mut(&project_id) {
            names.retain(|v| !file_names.contains(v));
        }
        Ok(())
    }
}

pub struct InMemoryDirectory {
    candidates: Vec<Organizer>,
}

impl InMemoryDirectory {
    pub fn new(candidates: Vec<Organizer>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn organizer_candidates(&self) -> Result<Vec<Organizer>, AppError> {
        Ok(self.candidates.clone())
    }
}
