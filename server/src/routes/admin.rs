//! # Admin handlers
//!
//! The organizer console. Every handler authenticates via [`CurrentUser`]
//! and checks the policy predicates itself; 403s carry no detail. Links in
//! the DTOs double as capability hints: the client only renders buttons for
//! links that are present.

use std::{collections::HashMap, sync::Arc};

use anyhow::anyhow;
use axum::{
    extract::{Path, State as AxumState},
    Json,
};
use openhouse_domain::{
    policy, selection, Organizer, Project, ProjectMedia, Selection, SelectionType,
};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    dto::{
        EditingProjectDataDto, EditingProjectDto, EditingProjectLinksDto, OrganizerDto,
        ProjectDto, ProjectLinksDto, ProjectListDto, ProjectListLinksDto, ScheduleDto,
        UserRoleDto,
    },
    error::AppError,
    mapper,
    state::State,
};

pub async fn list_projects(
    AxumState(state): AxumState<Arc<State>>,
    user: CurrentUser,
) -> Result<Json<ProjectListDto>, AppError> {
    if !policy::can_list_projects(&user.actor) {
        return Err(AppError::Forbidden);
    }

    let projects = state.projects.get_all().await?;
    let project_ids: Vec<Uuid> = projects.iter().map(|v| v.id).collect();
    let mut media = state.media.media_for_projects(&project_ids).await?;
    let project_types = state.projects.project_types().await?;
    let buildings = state.buildings.buildings().await?;
    let departments = state.departments.departments().await?;

    let project_dtos = projects
        .into_iter()
        .map(|project| {
            let project_media = media.remove(&project.id).unwrap_or_default();
            project_dto(&user, project, project_media, &project_types, &departments)
        })
        .collect();

    Ok(Json(ProjectListDto {
        projects: project_dtos,
        all_project_tags: selection::all_tags(&project_types)
            .into_iter()
            .flatten()
            .map(Into::into)
            .collect(),
        all_buildings: buildings.into_iter().map(Into::into).collect(),
        links: ProjectListLinksDto {
            create_project: policy::can_create_project(&user.actor, None)
                .then(|| "projects/new".to_string()),
        },
    }))
}

pub async fn get_editing_project(
    AxumState(state): AxumState<Arc<State>>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<Json<EditingProjectDto>, AppError> {
    let mut candidates = state.directory.organizer_candidates().await?;
    candidates.sort_by(|a, b| {
        (a.last_name.as_str(), a.first_name.as_str())
            .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
    });
    let co_organizer_candidates: Vec<OrganizerDto> =
        candidates.iter().map(organizer_dto).collect();
    // Only the all-projects role may hand a project to someone else.
    let organizer_candidates: Vec<OrganizerDto> =
        if policy::can_change_project_organizer(&user.actor) {
            co_organizer_candidates.clone()
        } else {
            co_organizer_candidates
                .iter()
                .filter(|v| v.id == user.actor.id)
                .cloned()
                .collect()
        };

    let project_types = state.projects.project_types().await?;
    let buildings = state.buildings.buildings().await?;
    let departments = state.departments.departments().await?;
    let floors = state.projects.floors().await?;

    let (data, save_link) = if project_id == "new" {
        if !policy::can_create_project(&user.actor, None) {
            return Err(AppError::Forbidden);
        }
        let default_selection = project_types
            .first()
            .map(Selection::default_for)
            .ok_or_else(|| anyhow!("no project types configured"))?;
        (
            EditingProjectDataDto {
                title: String::new(),
                description: String::new(),
                project_type: default_selection.into(),
                media_file_names: vec![],
                media_file_names_to_remove: vec![],
                departments: vec![],
                building: None,
                floor: None,
                location: String::new(),
                schedule: ScheduleDto::Continuous,
                organizer_id: user.actor.id.clone(),
                co_organizer_ids: vec![],
            },
            "/api/projects".to_string(),
        )
    } else {
        let project = find_project(&state, &project_id).await?;
        if !policy::can_update_project(&user.actor, &project) {
            return Err(AppError::Forbidden);
        }
        let media_file_names = state.media.media_names(project.id).await?;
        let save_link = format!("/api/projects/{}", project.id);
        (
            EditingProjectDataDto {
                title: project.title,
                description: project.description,
                project_type: project.selection.into(),
                media_file_names,
                media_file_names_to_remove: vec![],
                departments: project.departments,
                building: Some(project.building),
                floor: project.floor,
                location: project.location,
                schedule: project.schedule.into(),
                organizer_id: project.organizer.id,
                co_organizer_ids: project.co_organizers.into_iter().map(|v| v.id).collect(),
            },
            save_link,
        )
    };

    Ok(Json(EditingProjectDto {
        data,
        all_project_types: project_types.into_iter().map(Into::into).collect(),
        all_buildings: buildings.into_iter().map(Into::into).collect(),
        all_departments: departments.into_iter().map(Into::into).collect(),
        all_floors: floors,
        organizer_candidates,
        co_organizer_candidates,
        links: EditingProjectLinksDto { save: save_link },
    }))
}

pub async fn create_project(
    AxumState(state): AxumState<Arc<State>>,
    user: CurrentUser,
    Json(data): Json<EditingProjectDataDto>,
) -> Result<Json<Vec<String>>, AppError> {
    mapper::validate_media_file_names(&data.media_file_names).map_err(AppError::Validation)?;
    let project = map_edit_payload(&state, &data, Uuid::new_v4()).await?;
    if !policy::can_create_project(&user.actor, Some(&project)) {
        return Err(AppError::Forbidden);
    }

    state.projects.create(&project).await?;
    let upload_urls = state
        .media
        .new_upload_urls(project.id, &data.media_file_names)
        .await?;
    Ok(Json(upload_urls))
}

pub async fn update_project(
    AxumState(state): AxumState<Arc<State>>,
    user: CurrentUser,
    Path(project_id): Path<String>,
    Json(data): Json<EditingProjectDataDto>,
) -> Result<Json<Vec<String>>, AppError> {
    let existing = find_project(&state, &project_id).await?;

    mapper::validate_media_file_names(&data.media_file_names).map_err(AppError::Validation)?;
    let project = map_edit_payload(&state, &data, existing.id).await?;

    if !policy::can_update_project(&user.actor, &existing) {
        return Err(AppError::Forbidden);
    }
    if project.organizer.id != existing.organizer.id
        && !policy::can_change_project_organizer(&user.actor)
    {
        return Err(AppError::Forbidden);
    }

    state.projects.update(&project).await?;
    state
        .media
        .remove_media(project.id, &data.media_file_names_to_remove)
        .await?;
    let upload_urls = state
        .media
        .new_upload_urls(project.id, &data.media_file_names)
        .await?;
    Ok(Json(upload_urls))
}

pub async fn delete_project(
    AxumState(state): AxumState<Arc<State>>,
    user: CurrentUser,
    Path(project_id): Path<String>,
) -> Result<(), AppError> {
    let existing = find_project(&state, &project_id).await?;
    if !policy::can_delete_project(&user.actor, &existing) {
        return Err(AppError::Forbidden);
    }

    // Media first: deleting the project row cascades away the media index.
    let media_names = state.media.media_names(existing.id).await?;
    state.media.remove_media(existing.id, &media_names).await?;
    state.projects.delete(existing.id).await?;
    Ok(())
}

/// Unparseable ids behave like unknown ones.
async fn find_project(state: &State, project_id: &str) -> Result<Project, AppError> {
    let Ok(project_id) = Uuid::parse_str(project_id) else {
        return Err(AppError::NotFound("Project doesn't exist."));
    };
    state
        .projects
        .get(project_id)
        .await?
        .ok_or(AppError::NotFound("Project doesn't exist."))
}

async fn map_edit_payload(
    state: &State,
    data: &EditingProjectDataDto,
    project_id: Uuid,
) -> Result<Project, AppError> {
    let candidates: HashMap<String, Organizer> = state
        .directory
        .organizer_candidates()
        .await?
        .into_iter()
        .map(|v| (v.id.clone(), v))
        .collect();
    let buildings = state.buildings.buildings().await?;
    let departments = state.departments.departments().await?;
    let project_types = state.projects.project_types().await?;

    mapper::project_from_edit(data, project_id, &candidates, &buildings, &departments, &project_types)
        .map_err(AppError::Validation)
}

fn project_dto(
    user: &CurrentUser,
    project: Project,
    media: Vec<ProjectMedia>,
    project_types: &[SelectionType],
    departments: &[openhouse_domain::Department],
) -> ProjectDto {
    let current_user_role = if project.is_organized_by(&user.actor.id) {
        UserRoleDto::Organizer
    } else if project.is_co_organized_by(&user.actor.id) {
        UserRoleDto::CoOrganizer
    } else {
        UserRoleDto::NotRelated
    };

    let can_update = policy::can_update_project(&user.actor, &project);
    let can_delete = policy::can_delete_project(&user.actor, &project);

    ProjectDto {
        tags: selection::tags_for(&project.selection, project_types)
            .into_iter()
            .map(Into::into)
            .collect(),
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
        organizer: organizer_dto(&project.organizer),
        co_organizers: project.co_organizers.iter().map(organizer_dto).collect(),
        current_user_role,
        media: media.into_iter().map(Into::into).collect(),
        links: ProjectLinksDto {
            edit: can_update.then(|| format!("projects/edit/{}", project.id)),
            delete: can_delete.then(|| format!("/api/projects/{}", project.id)),
        },
    }
}

fn organizer_dto(organizer: &Organizer) -> OrganizerDto {
    OrganizerDto {
        id: organizer.id.clone(),
        display_name: organizer.display_name(),
    }
}
