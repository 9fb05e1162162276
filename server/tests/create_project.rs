mod common;

use common::TestApp;
use openhouse_server::{config::ServerRole, stores::ProjectStore};
use reqwest::StatusCode;

#[tokio::test]
async fn writer_creates_own_project() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let mut payload = common::edit_payload("ben");
    payload.media_file_names = vec!["booth.jpg".into(), "tour.mp4".into()];

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Read", "Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let upload_urls: Vec<String> = response.json().await.unwrap();
    assert_eq!(upload_urls.len(), 2);

    let projects = app.projects.get_all().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Sound studio");
    assert_eq!(projects[0].organizer.id, "ben");
    assert_eq!(app.media.object_names(projects[0].id).await.len(), 2);
}

#[tokio::test]
async fn writer_may_not_create_for_someone_else() {
    let app = TestApp::spawn(ServerRole::Admin).await;

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&common::edit_payload("anna"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.projects.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_all_creates_for_someone_else() {
    let app = TestApp::spawn(ServerRole::Admin).await;

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("cleo", &["Project.Write.All"]))
        .json(&common::edit_payload("anna"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let projects = app.projects.get_all().await.unwrap();
    assert_eq!(projects[0].organizer.id, "anna");
}

#[tokio::test]
async fn blank_title_is_a_bad_request() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let mut payload = common::edit_payload("ben");
    payload.title = "  ".into();

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Project title must not be empty.");
}

#[tokio::test]
async fn unknown_building_is_a_bad_request() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let mut payload = common::edit_payload("ben");
    payload.building = Some("annex".into());

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("annex"));
}

#[tokio::test]
async fn unsupported_media_file_type_is_a_bad_request() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let mut payload = common::edit_payload("ben");
    payload.media_file_names = vec!["slides.pdf".into()];

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("slides.pdf"));
    assert!(app.projects.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_co_organizers_are_reported_together() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let mut payload = common::edit_payload("ben");
    payload.co_organizer_ids = vec!["ghost".into(), "anna".into(), "phantom".into()];

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = response.text().await.unwrap();
    assert!(message.contains("\"ghost\""));
    assert!(message.contains("\"phantom\""));
    assert!(!message.contains("\"anna\""));
}
