//! Test harness: the real router over in-memory stores, served on an
//! ephemeral port and exercised through reqwest.

use std::sync::Arc;

use chrono::Utc;
use openhouse_domain::{
    Building, Department, Organizer, Project, Schedule, Selection, SelectionChoice, SelectionType,
};
use openhouse_server::{
    auth::{Claims, TokenKey},
    config::ServerRole,
    dto::{EditingProjectDataDto, ScheduleDto, SelectionReferenceDto},
    routes,
    state::State,
    stores::inmemory::{
        InMemoryBuildingStore, InMemoryDepartmentStore, InMemoryDirectory, InMemoryMediaStore,
        InMemoryProjectStore,
    },
};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration test secret";

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub auth: TokenKey,
    pub projects: Arc<InMemoryProjectStore>,
    pub media: Arc<InMemoryMediaStore>,
}

impl TestApp {
    pub async fn spawn(role: ServerRole) -> Self {
        let projects = Arc::new(InMemoryProjectStore::new(selection_types()));
        let media = Arc::new(InMemoryMediaStore::new());
        let auth = TokenKey::new(TEST_SECRET);

        let state = Arc::new(State {
            projects: projects.clone(),
            buildings: Arc::new(InMemoryBuildingStore::new(buildings())),
            departments: Arc::new(InMemoryDepartmentStore::new(departments())),
            media: media.clone(),
            directory: Arc::new(InMemoryDirectory::new(organizers())),
            auth: auth.clone(),
        });

        let app = match role {
            ServerRole::Admin => routes::admin_router(state),
            ServerRole::Visitor => routes::visitor_router(state),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            auth,
            projects,
            media,
        }
    }

    pub fn token(&self, user_id: &str, roles: &[&str]) -> String {
        self.auth.sign(&Claims {
            sub: user_id.to_string(),
            name: format!("Test {user_id}"),
            roles: roles.iter().map(|v| v.to_string()).collect(),
            exp: Utc::now().timestamp() + 600,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

pub fn organizer(id: &str) -> Organizer {
    Organizer {
        id: id.into(),
        first_name: capitalize(id),
        last_name: "Tester".into(),
        short_name: id.to_uppercase(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn organizers() -> Vec<Organizer> {
    ["anna", "ben", "cleo"].into_iter().map(organizer).collect()
}

pub fn buildings() -> Vec<Building> {
    vec![
        Building { id: "main".into(), name: "Main building".into() },
        Building { id: "workshop".into(), name: "Workshops".into() },
    ]
}

pub fn departments() -> Vec<Department> {
    vec![
        Department {
            id: "it".into(),
            name: "IT".into(),
            long_name: "Information Technology".into(),
            color: "#1d4ed8".into(),
        },
        Department {
            id: "md".into(),
            name: "MD".into(),
            long_name: "Media Design".into(),
            color: "#15803d".into(),
        },
    ]
}

pub fn selection_types() -> Vec<SelectionType> {
    vec![
        SelectionType::Simple {
            id: "highlight".into(),
            title: "Highlight".into(),
            color: "#dc2626".into(),
        },
        SelectionType::MultiSelect {
            id: "audience".into(),
            title: "Audience".into(),
            choices: vec![
                SelectionChoice {
                    id: "pupils".into(),
                    color: "#0e7490".into(),
                    short_name: "P".into(),
                    long_name: "Pupils".into(),
                },
                SelectionChoice {
                    id: "parents".into(),
                    color: "#7c3aed".into(),
                    short_name: "E".into(),
                    long_name: "Parents".into(),
                },
            ],
        },
    ]
}

pub fn sample_project(organizer_id: &str, co_organizer_ids: &[&str]) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: "Robotics lab".into(),
        description: "Robots solve a parcours".into(),
        selection: Selection::Simple { name: "highlight".into() },
        departments: vec!["it".into()],
        building: "workshop".into(),
        floor: Some("1".into()),
        location: "W104".into(),
        schedule: Schedule::Regular { interval_minutes: 30 },
        organizer: organizer(organizer_id),
        co_organizers: co_organizer_ids.iter().map(|v| organizer(v)).collect(),
    }
}

pub fn edit_payload(organizer_id: &str) -> EditingProjectDataDto {
    EditingProjectDataDto {
        title: "Sound studio".into(),
        description: "Recording and mixing".into(),
        project_type: SelectionReferenceDto::MultiSelect {
            name: "audience".into(),
            selected_values: vec!["pupils".into()],
        },
        media_file_names: vec![],
        media_file_names_to_remove: vec![],
        departments: vec!["md".into()],
        building: Some("main".into()),
        floor: Some("2".into()),
        location: "A203".into(),
        schedule: ScheduleDto::Continuous,
        organizer_id: organizer_id.into(),
        co_organizer_ids: vec![],
    }
}
