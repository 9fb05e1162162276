//! # Authorization policy
//!
//! Role/ownership rules as plain predicates. Roles come from the bearer
//! token, ownership from the project row. Handlers translate a `false` into
//! a 403.
//!
//! - `Project.Read` sees the admin project list.
//! - `Project.Write` manages projects the user organizes or co-organizes.
//! - `Project.Write.All` manages everything and may reassign organizers.

use serde::{Deserialize, Serialize};

use crate::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Project.Read")]
    ProjectRead,
    #[serde(rename = "Project.Write")]
    ProjectWrite,
    #[serde(rename = "Project.Write.All")]
    ProjectWriteAll,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Project.Read" => Some(Self::ProjectRead),
            "Project.Write" => Some(Self::ProjectWrite),
            "Project.Write.All" => Some(Self::ProjectWriteAll),
            _ => None,
        }
    }
}

/// The authenticated caller as far as policy is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn new(id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self { id: id.into(), roles }
    }

    fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

pub fn can_list_projects(actor: &Actor) -> bool {
    actor.has(Role::ProjectRead)
}

/// `project` is `None` when asking "may this user create anything at all",
/// e.g. for the empty edit form and the create link.
pub fn can_create_project(actor: &Actor, project: Option<&Project>) -> bool {
    if actor.has(Role::ProjectWriteAll) {
        return true;
    }
    if actor.has(Role::ProjectWrite) {
        return match project {
            None => true,
            Some(p) => p.is_organized_by(&actor.id),
        };
    }
    false
}

pub fn can_update_project(actor: &Actor, project: &Project) -> bool {
    if actor.has(Role::ProjectWriteAll) {
        return true;
    }
    actor.has(Role::ProjectWrite)
        && (project.is_organized_by(&actor.id) || project.is_co_organized_by(&actor.id))
}

pub fn can_delete_project(actor: &Actor, project: &Project) -> bool {
    can_update_project(actor, project)
}

pub fn can_change_project_organizer(actor: &Actor) -> bool {
    actor.has(Role::ProjectWriteAll)
}
