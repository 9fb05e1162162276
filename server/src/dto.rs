//! # Data transfer objects
//!
//! The JSON surface of both apps. Kept apart from the domain model so the
//! wire shape can keep evolving without touching stored data. Polymorphic
//! payloads (selection types/references, schedules) are internally tagged
//! with `"type"`.

use chrono::{DateTime, Utc};
use openhouse_domain::{
    Building, Department, MediaKind, ProjectMedia, Schedule, Selection, SelectionType, Tag,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListDto {
    pub projects: Vec<ProjectDto>,
    pub all_project_tags: Vec<TagDto>,
    pub all_buildings: Vec<BuildingDto>,
    pub links: ProjectListLinksDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListLinksDto {
    pub create_project: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub title: String,
    pub description: String,
    pub tags: Vec<TagDto>,
    pub departments: Vec<DepartmentDto>,
    pub building: String,
    pub floor: Option<String>,
    pub location: String,
    pub organizer: OrganizerDto,
    pub co_organizers: Vec<OrganizerDto>,
    pub current_user_role: UserRoleDto,
    pub media: Vec<MediaDto>,
    pub links: ProjectLinksDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinksDto {
    pub edit: Option<String>,
    pub delete: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRoleDto {
    NotRelated,
    Organizer,
    CoOrganizer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub short_name: Option<String>,
    pub long_name: String,
    pub color: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            short_name: tag.short_name,
            long_name: tag.long_name,
            color: tag.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDto {
    pub id: String,
    pub name: String,
}

impl From<Building> for BuildingDto {
    fn from(building: Building) -> Self {
        Self {
            id: building.id,
            name: building.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    pub id: String,
    pub name: String,
    pub long_name: String,
    pub color: String,
}

impl From<Department> for DepartmentDto {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
            long_name: department.long_name,
            color: department.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDto {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub kind: MediaKindDto,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKindDto {
    Image,
    Video,
}

impl From<ProjectMedia> for MediaDto {
    fn from(media: ProjectMedia) -> Self {
        Self {
            kind: match media.kind {
                MediaKind::Image => MediaKindDto::Image,
                MediaKind::Video => MediaKindDto::Video,
            },
            url: media.url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingProjectDto {
    pub data: EditingProjectDataDto,
    pub all_project_types: Vec<SelectionTypeDto>,
    pub all_buildings: Vec<BuildingDto>,
    pub all_departments: Vec<DepartmentDto>,
    pub all_floors: Vec<String>,
    pub organizer_candidates: Vec<OrganizerDto>,
    pub co_organizer_candidates: Vec<OrganizerDto>,
    pub links: EditingProjectLinksDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingProjectLinksDto {
    pub save: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingProjectDataDto {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: SelectionReferenceDto,
    pub media_file_names: Vec<String>,
    pub media_file_names_to_remove: Vec<String>,
    pub departments: Vec<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub location: String,
    pub schedule: ScheduleDto,
    pub organizer_id: String,
    pub co_organizer_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SelectionReferenceDto {
    Simple { name: String },
    MultiSelect { name: String, selected_values: Vec<String> },
}

impl From<Selection> for SelectionReferenceDto {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Simple { name } => Self::Simple { name },
            Selection::MultiSelect { name, selected_values } => Self::MultiSelect { name, selected_values },
        }
    }
}

impl From<SelectionReferenceDto> for Selection {
    fn from(dto: SelectionReferenceDto) -> Self {
        match dto {
            SelectionReferenceDto::Simple { name } => Self::Simple { name },
            SelectionReferenceDto::MultiSelect { name, selected_values } => {
                Self::MultiSelect { name, selected_values }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SelectionTypeDto {
    Simple {
        id: String,
        title: String,
        color: String,
    },
    MultiSelect {
        id: String,
        title: String,
        items: Vec<SelectionItemDto>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItemDto {
    pub id: String,
    pub color: String,
    pub short_name: String,
    pub long_name: String,
}

impl From<SelectionType> for SelectionTypeDto {
    fn from(selection_type: SelectionType) -> Self {
        match selection_type {
            SelectionType::Simple { id, title, color } => Self::Simple { id, title, color },
            SelectionType::MultiSelect { id, title, choices } => Self::MultiSelect {
                id,
                title,
                items: choices
                    .into_iter()
                    .map(|choice| SelectionItemDto {
                        id: choice.id,
                        color: choice.color,
                        short_name: choice.short_name,
                        long_name: choice.long_name,
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ScheduleDto {
    Continuous,
    Regular { interval_minutes: u32 },
    Individual { times: Vec<DateTime<Utc>> },
}

impl From<Schedule> for ScheduleDto {
    fn from(schedule: Schedule) -> Self {
        match schedule {
            Schedule::Continuous => Self::Continuous,
            Schedule::Regular { interval_minutes } => Self::Regular { interval_minutes },
            Schedule::Individual { times } => Self::Individual { times },
        }
    }
}

impl From<ScheduleDto> for Schedule {
    fn from(dto: ScheduleDto) -> Self {
        match dto {
            ScheduleDto::Continuous => Self::Continuous,
            ScheduleDto::Regular { interval_minutes } => Self::Regular { interval_minutes },
            ScheduleDto::Individual { times } => Self::Individual { times },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorProjectListDto {
    pub projects: Vec<VisitorProjectDto>,
    /// Tag universe grouped per selection type, for filter chips.
    pub all_project_tags: Vec<Vec<TagDto>>,
    pub all_buildings: Vec<BuildingDto>,
    pub all_departments: Vec<DepartmentDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorProjectDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<TagDto>,
    pub departments: Vec<DepartmentDto>,
    pub building: String,
    pub floor: Option<String>,
    pub location: String,
    pub schedule: ScheduleDto,
    pub media: Vec<MediaDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_reference_wire_shape() {
        let json = serde_json::to_value(SelectionReferenceDto::MultiSelect {
            name: "department".into(),
            selected_values: vec!["it".into()],
        })
        .unwrap();
        assert_eq!(json["type"], "multi-select");
        assert_eq!(json["selectedValues"][0], "it");

        let parsed: SelectionReferenceDto =
            serde_json::from_value(serde_json::json!({ "type": "simple", "name": "highlight" }))
                .unwrap();
        assert_eq!(parsed, SelectionReferenceDto::Simple { name: "highlight".into() });
    }

    #[test]
    fn schedule_wire_shape() {
        let json = serde_json::to_value(ScheduleDto::Regular { interval_minutes: 30 }).unwrap();
        assert_eq!(json["type"], "regular");
        assert_eq!(json["intervalMinutes"], 30);
    }
}
