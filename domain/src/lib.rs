//! # Domain
//!
//! Pure model and decision logic for the open-house guide. No I/O in here,
//! everything is unit testable without a database or object store.
//!
//! - Projects are the exhibits/booths organizers run during the event.
//! - Selection types are the configurable tag sets projects pick from.
//! - Schedules say when a booth can be visited.
//! - Policy answers who may touch which project.

pub mod policy;
pub mod project;
pub mod schedule;
pub mod selection;

pub use policy::{Actor, Role};
pub use project::{Building, Department, MediaKind, Organizer, Project, ProjectMedia};
pub use schedule::Schedule;
pub use selection::{Selection, SelectionChoice, SelectionType, Tag};
