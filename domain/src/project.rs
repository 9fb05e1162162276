use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{schedule::Schedule, selection::Selection};

/// Directory identity of someone running a project. `short_name` is the
/// user-principal-name with the domain part cut off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub short_name: String,
}

impl Organizer {
    /// "Lastname Firstname (shortname)" as shown in organizer pickers.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.last_name, self.first_name, self.short_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub selection: Selection,
    /// Department ids, see [`Department`].
    pub departments: Vec<String>,
    /// Building id, see [`Building`].
    pub building: String,
    pub floor: Option<String>,
    /// Free-form room/booth designation within the building.
    pub location: String,
    pub schedule: Schedule,
    pub organizer: Organizer,
    /// Invariant: never contains `organizer`.
    pub co_organizers: Vec<Organizer>,
}

impl Project {
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer.id == user_id
    }

    pub fn is_co_organized_by(&self, user_id: &str) -> bool {
        self.co_organizers.iter().any(|v| v.id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub long_name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Only a small allow-list of content types ends up in the guide.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/png" => Some(Self::Image),
            "video/mp4" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn content_type_for_file(file_name: &str) -> Option<&'static str> {
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "mp4" => Some("video/mp4"),
            _ => None,
        }
    }
}

/// A media object attached to a project, `url` is a presigned download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMedia {
    pub kind: MediaKind,
    pub url: String,
}
