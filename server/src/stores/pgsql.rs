//! # PostgreSQL
//!
//! Row mapping follows the single-table layout: nested values (selection,
//! schedule, organizers, department ids) live in jsonb columns, so every
//! project write is one row. Buildings, departments and selection types are
//! small lookup tables maintained by the seeder.

use async_trait::async_trait;
use openhouse_domain::{
    Building, Department, Organizer, Project, Schedule, Selection, SelectionChoice, SelectionType,
};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use super::{BuildingStore, DepartmentStore, ProjectStore};
use crate::error::AppError;

pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct DbProject {
    id: Uuid,
    title: String,
    description: String,
    selection: Json<Selection>,
    departments: Json<Vec<String>>,
    building: String,
    floor: Option<String>,
    location: String,
    schedule: Json<Schedule>,
    organizer: Json<Organizer>,
    co_organizers: Json<Vec<Organizer>>,
}

impl DbProject {
    fn into_domain(self) -> Project {
        Project {
            id: self.id,
            title: self.title,
            description: self.description,
            selection: self.selection.0,
            departments: self.departments.0,
            building: self.building,
            floor: self.floor,
            location: self.location,
            schedule: self.schedule.0,
            organizer: self.organizer.0,
            co_organizers: self.co_organizers.0,
        }
    }
}

const PROJECT_COLUMNS: &str = "id, title, description, selection, departments, building, floor, location, schedule, organizer, co_organizers";

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn get_all(&self) -> Result<Vec<Project>, AppError> {
        let rows: Vec<DbProject> =
            sqlx::query_as(&format!("SELECT {PROJECT_COLUMNS} FROM project ORDER BY title"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(DbProject::into_domain).collect())
    }

    async fn get(&self, project_id: Uuid) -> Result<Option<Project>, AppError> {
        let row: Option<DbProject> =
            sqlx::query_as(&format!("SELECT {PROJECT_COLUMNS} FROM project WHERE id = $1"))
                .bind(project_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(DbProject::into_domain))
    }

    async fn floors(&self) -> Result<Vec<String>, AppError> {
        let floors = sqlx::query_scalar(
            "SELECT DISTINCT floor FROM project WHERE floor IS NOT NULL ORDER BY floor",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(floors)
    }

    async fn project_types(&self) -> Result<Vec<SelectionType>, AppError> {
        let rows: Vec<DbSelectionType> = sqlx::query_as(
            "SELECT id, title, color, choices FROM selection_type ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().filter_map(DbSelectionType::into_domain).collect())
    }

    async fn create(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO project (id, title, description, selection, departments, building, floor, location, schedule, organizer, co_organizers) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(Json(&project.selection))
        .bind(Json(&project.departments))
        .bind(&project.building)
        .bind(&project.floor)
        .bind(&project.location)
        .bind(Json(&project.schedule))
        .bind(Json(&project.organizer))
        .bind(Json(&project.co_organizers))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE project SET title = $2, description = $3, selection = $4, departments = $5, building = $6, floor = $7, location = $8, schedule = $9, organizer = $10, co_organizers = $11 \
             WHERE id = $1",
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(Json(&project.selection))
        .bind(Json(&project.departments))
        .bind(&project.building)
        .bind(&project.floor)
        .bind(&project.location)
        .bind(Json(&project.schedule))
        .bind(Json(&project.organizer))
        .bind(Json(&project.co_organizers))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, project_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM project WHERE id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct DbSelectionType {
    id: String,
    title: String,
    color: Option<String>,
    choices: Option<Json<Vec<SelectionChoice>>>,
}

impl DbSelectionType {
    fn into_domain(self) -> Option<SelectionType> {
        match (self.color, self.choices) {
            (Some(color), None) => Some(SelectionType::Simple {
                id: self.id,
                title: self.title,
                color,
            }),
            (None, Some(choices)) => Some(SelectionType::MultiSelect {
                id: self.id,
                title: self.title,
                choices: choices.0,
            }),
            _ => {
                warn!("Malformed selection_type row: {}", self.id);
                None
            }
        }
    }
}

pub struct PgBuildingStore {
    pool: PgPool,
}

impl PgBuildingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuildingStore for PgBuildingStore {
    async fn buildings(&self) -> Result<Vec<Building>, AppError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, name FROM building ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| Building { id, name }).collect())
    }
}

pub struct PgDepartmentStore {
    pool: PgPool,
}

impl PgDepartmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for PgDepartmentStore {
    async fn departments(&self) -> Result<Vec<Department>, AppError> {
        let rows: Vec<(String, String, String, String)> =
            sqlx::query_as("SELECT id, name, long_name, color FROM department ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, long_name, color)| Department { id, name, long_name, color })
            .collect())
    }
}
