//! Public listing for the visitor app. No authentication, no links, no
//! organizer details.

use std::sync::Arc;

use axum::{extract::State as AxumState, Json};
use openhouse_domain::selection;
use uuid::Uuid;

use crate::{
    dto::{VisitorProjectDto, VisitorProjectListDto},
    error::AppError,
    state::State,
};

pub async fn list_projects(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<VisitorProjectListDto>, AppError> {
    let projects = state.projects.get_all().await?;
    let project_ids: Vec<Uuid> = projects.iter().map(|v| v.id).collect();
    let mut media = state.media.media_for_projects(&project_ids).await?;
    let project_types = state.projects.project_types().await?;
    let buildings = state.buildings.buildings().await?;
    let departments = state.departments.departments().await?;

    let project_dtos = projects
        .into_iter()
        .map(|project| VisitorProjectDto {
            id: project.id.to_string(),
            tags: selection::tags_for(&project.selection, &project_types)
                .into_iter()
                .map(Into::into)
                .collect(),
            media: media.remove(&project.id).unwrap_or_default().into_iter().map(Into::into).collect(),
            departments: departments
                .iter()
                .filter(|v| project.departments.contains(&v.id))
                .cloned()
                .map(Into::into)
                .collect(),
            title: project.title,
            description: project.description,
            building: project.building,
            floor: project.floor,
            location: project.location,
            schedule: project.schedule.into(),
        })
        .collect();

    Ok(Json(VisitorProjectListDto {
        projects: project_dtos,
        all_project_tags: selection::all_tags(&project_types)
            .into_iter()
            .map(|group| group.into_iter().map(Into::into).collect())
            .collect(),
        all_buildings: buildings.into_iter().map(Into::into).collect(),
        all_departments: departments.into_iter().map(Into::into).collect(),
    }))
}
