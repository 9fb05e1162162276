//! # Payload validation
//!
//! Turns the admin editing payload into a domain [`Project`] or a message
//! for a 400. All checks are against data the caller could have fixed:
//! nothing in here touches the database.

use std::collections::{HashMap, HashSet};

use openhouse_domain::{
    Building, Department, MediaKind, Organizer, Project, Schedule, Selection, SelectionType,
};
use uuid::Uuid;

use crate::dto::EditingProjectDataDto;

pub fn project_from_edit(
    data: &EditingProjectDataDto,
    project_id: Uuid,
    organizer_candidates: &HashMap<String, Organizer>,
    buildings: &[Building],
    departments: &[Department],
    project_types: &[SelectionType],
) -> Result<Project, String> {
    let title = data.title.trim();
    if title.is_empty() {
        return Err("Project title must not be empty.".into());
    }

    let selection = normalize_selection(data.project_type.clone().into(), project_types)?;

    for department_id in &data.departments {
        if !departments.iter().any(|v| &v.id == department_id) {
            return Err(format!("Department with ID \"{department_id}\" not found"));
        }
    }

    let Some(building) = data.building.as_deref().filter(|v| !v.is_empty()) else {
        return Err("Building must be selected.".into());
    };
    if !buildings.iter().any(|v| v.id == building) {
        return Err(format!("Building with ID \"{building}\" not found"));
    }

    let schedule: Schedule = data.schedule.clone().into();
    let schedule = schedule.normalize()?;

    let Some(organizer) = organizer_candidates.get(&data.organizer_id) else {
        return Err(format!("Organizer with ID \"{}\" not found", data.organizer_id));
    };

    // The organizer is silently dropped from the co-organizer list and
    // duplicates collapse to their first occurrence, anyone left has to
    // resolve. Report every unresolved id at once.
    let mut seen = HashSet::new();
    let co_organizer_ids: Vec<&String> = data
        .co_organizer_ids
        .iter()
        .filter(|v| **v != data.organizer_id && seen.insert(v.as_str()))
        .collect();
    let unresolved: Vec<String> = co_organizer_ids
        .iter()
        .filter(|v| !organizer_candidates.contains_key(v.as_str()))
        .map(|v| format!("\"{v}\""))
        .collect();
    if !unresolved.is_empty() {
        return Err(format!(
            "Co-Organizers with ID(s) {} not found",
            unresolved.join(", ")
        ));
    }
    let co_organizers = co_organizer_ids
        .into_iter()
        .map(|v| organizer_candidates[v].clone())
        .collect();

    Ok(Project {
        id: project_id,
        title: title.to_string(),
        description: data.description.clone(),
        selection,
        departments: data.departments.clone(),
        building: building.to_string(),
        floor: data.floor.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(String::from),
        location: data.location.clone(),
        schedule,
        organizer: organizer.clone(),
        co_organizers,
    })
}

/// The selection must reference a configured type of matching shape, and
/// selected values must come from its choice set. Values are deduplicated
/// into choice-set order.
fn normalize_selection(
    selection: Selection,
    project_types: &[SelectionType],
) -> Result<Selection, String> {
    let Some(selection_type) = project_types.iter().find(|v| v.id() == selection.name()) else {
        return Err(format!("Project type \"{}\" not found", selection.name()));
    };
    match (selection, selection_type) {
        (Selection::Simple { name }, SelectionType::Simple { .. }) => Ok(Selection::Simple { name }),
        (Selection::MultiSelect { name, selected_values }, SelectionType::MultiSelect { choices, .. }) => {
            if let Some(unknown) = selected_values.iter().find(|v| !choices.iter().any(|c| &c.id == *v)) {
                return Err(format!(
                    "Value \"{unknown}\" is not a choice of project type \"{name}\""
                ));
            }
            let selected_values = choices
                .iter()
                .filter(|c| selected_values.contains(&c.id))
                .map(|c| c.id.clone())
                .collect();
            Ok(Selection::MultiSelect { name, selected_values })
        }
        (selection, _) => Err(format!(
            "Project type \"{}\" does not match the submitted selection shape",
            selection.name()
        )),
    }
}

/// Upload names must map to an allowed content type before we hand out
/// presigned URLs for them.
pub fn validate_media_file_names(file_names: &[String]) -> Result<(), String> {
    for file_name in file_names {
        if MediaKind::content_type_for_file(file_name).is_none() {
            return Err(format!("Unsupported media file type: \"{file_name}\""));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{ScheduleDto, SelectionReferenceDto};
    use openhouse_domain::SelectionChoice;

    fn candidates() -> HashMap<String, Organizer> {
        ["anna", "ben", "cleo"]
            .into_iter()
            .map(|id| {
                (
                    id.to_string(),
                    Organizer {
                        id: id.to_string(),
                        first_name: id.to_string(),
                        last_name: "Test".into(),
                        short_name: id.to_uppercase(),
                    },
                )
            })
            .collect()
    }

    fn buildings() -> Vec<Building> {
        vec![Building { id: "main".into(), name: "Main building".into() }]
    }

    fn departments() -> Vec<Department> {
        vec![Department {
            id: "it".into(),
            name: "IT".into(),
            long_name: "Informationstechnologie".into(),
            color: "#00f".into(),
        }]
    }

    fn project_types() -> Vec<SelectionType> {
        vec![
            SelectionType::Simple {
                id: "highlight".into(),
                title: "Highlight".into(),
                color: "#d00".into(),
            },
            SelectionType::MultiSelect {
                id: "audience".into(),
                title: "Audience".into(),
                choices: vec![
                    SelectionChoice {
                        id: "pupils".into(),
                        color: "#0a0".into(),
                        short_name: "P".into(),
                        long_name: "Pupils".into(),
                    },
                    SelectionChoice {
                        id: "parents".into(),
                        color: "#a0a".into(),
                        short_name: "E".into(),
                        long_name: "Parents".into(),
                    },
                ],
            },
        ]
    }

    fn edit_data() -> EditingProjectDataDto {
        EditingProjectDataDto {
            title: "Robotics lab".into(),
            description: "Try our robots".into(),
            project_type: SelectionReferenceDto::Simple { name: "highlight".into() },
            media_file_names: vec![],
            media_file_names_to_remove: vec![],
            departments: vec!["it".into()],
            building: Some("main".into()),
            floor: Some("2".into()),
            location: "A204".into(),
            schedule: ScheduleDto::Continuous,
            organizer_id: "anna".into(),
            co_organizer_ids: vec!["ben".into()],
        }
    }

    fn map(data: &EditingProjectDataDto) -> Result<Project, String> {
        project_from_edit(
            data,
            Uuid::new_v4(),
            &candidates(),
            &buildings(),
            &departments(),
            &project_types(),
        )
    }

    #[test]
    fn valid_payload_maps() {
        let project = map(&edit_data()).unwrap();
        assert_eq!(project.title, "Robotics lab");
        assert_eq!(project.organizer.id, "anna");
        assert_eq!(project.co_organizers.len(), 1);
        assert_eq!(project.floor.as_deref(), Some("2"));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut data = edit_data();
        data.title = "   ".into();
        assert_eq!(map(&data).unwrap_err(), "Project title must not be empty.");
    }

    #[test]
    fn missing_building_is_rejected() {
        let mut data = edit_data();
        data.building = None;
        assert_eq!(map(&data).unwrap_err(), "Building must be selected.");

        data.building = Some("annex".into());
        assert!(map(&data).unwrap_err().contains("annex"));
    }

    #[test]
    fn unknown_department_is_rejected() {
        let mut data = edit_data();
        data.departments.push("chemistry".into());
        assert!(map(&data).unwrap_err().contains("chemistry"));
    }

    #[test]
    fn unknown_organizer_is_rejected() {
        let mut data = edit_data();
        data.organizer_id = "nobody".into();
        assert!(map(&data).unwrap_err().contains("nobody"));
    }

    #[test]
    fn all_unresolved_co_organizers_are_reported() {
        let mut data = edit_data();
        data.co_organizer_ids = vec!["ghost".into(), "ben".into(), "phantom".into()];
        let message = map(&data).unwrap_err();
        assert!(message.contains("\"ghost\""));
        assert!(message.contains("\"phantom\""));
        assert!(!message.contains("\"ben\""));
    }

    #[test]
    fn organizer_is_dropped_from_co_organizers() {
        let mut data = edit_data();
        data.co_organizer_ids = vec!["anna".into(), "ben".into()];
        let project = map(&data).unwrap();
        let ids: Vec<_> = project.co_organizers.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["ben"]);
    }

    #[test]
    fn duplicate_co_organizers_are_stored_once() {
        let mut data = edit_data();
        data.co_organizer_ids = vec!["ben".into(), "cleo".into(), "ben".into()];
        let project = map(&data).unwrap();
        let ids: Vec<_> = project.co_organizers.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["ben", "cleo"]);
    }

    #[test]
    fn selection_values_outside_choice_set_are_rejected() {
        let mut data = edit_data();
        data.project_type = SelectionReferenceDto::MultiSelect {
            name: "audience".into(),
            selected_values: vec!["pupils".into(), "teachers".into()],
        };
        assert!(map(&data).unwrap_err().contains("teachers"));
    }

    #[test]
    fn selection_values_are_deduplicated_into_choice_order() {
        let mut data = edit_data();
        data.project_type = SelectionReferenceDto::MultiSelect {
            name: "audience".into(),
            selected_values: vec!["parents".into(), "pupils".into(), "parents".into()],
        };
        let project = map(&data).unwrap();
        assert_eq!(
            project.selection,
            Selection::MultiSelect {
                name: "audience".into(),
                selected_values: vec!["pupils".into(), "parents".into()],
            }
        );
    }

    #[test]
    fn selection_shape_mismatch_is_rejected() {
        let mut data = edit_data();
        data.project_type = SelectionReferenceDto::MultiSelect {
            name: "highlight".into(),
            selected_values: vec![],
        };
        assert!(map(&data).unwrap_err().contains("shape"));
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let mut data = edit_data();
        data.schedule = ScheduleDto::Regular { interval_minutes: 0 };
        assert!(map(&data).is_err());
    }

    #[test]
    fn blank_floor_becomes_none() {
        let mut data = edit_data();
        data.floor = Some("  ".into());
        assert_eq!(map(&data).unwrap().floor, None);
    }

    #[test]
    fn media_file_names_must_have_known_extensions() {
        assert!(validate_media_file_names(&["a.jpg".into(), "b.mp4".into()]).is_ok());
        assert!(validate_media_file_names(&["slides.pdf".into()]).is_err());
    }
}
