mod common;

use common::TestApp;
use openhouse_server::{
    config::ServerRole,
    stores::{ProjectMediaStore, ProjectStore},
};
use reqwest::StatusCode;

#[tokio::test]
async fn co_organizer_updates_the_project() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let project = common::sample_project("anna", &["ben"]);
    let project_id = project.id;
    app.projects.insert(project).await;

    let mut payload = common::edit_payload("anna");
    payload.title = "Robotics lab, hall B".into();
    payload.co_organizer_ids = vec!["ben".into()];

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{project_id}")))
        .bearer_auth(app.token("ben", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = app.projects.get(project_id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Robotics lab, hall B");
    assert_eq!(stored.organizer.id, "anna");
}

#[tokio::test]
async fn unrelated_writer_may_not_update() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let project = common::sample_project("anna", &["ben"]);
    let project_id = project.id;
    app.projects.insert(project).await;

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{project_id}")))
        .bearer_auth(app.token("cleo", &["Project.Write"]))
        .json(&common::edit_payload("anna"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn organizer_reassignment_needs_write_all() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let project = common::sample_project("anna", &[]);
    let project_id = project.id;
    app.projects.insert(project).await;

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{project_id}")))
        .bearer_auth(app.token("anna", &["Project.Write"]))
        .json(&common::edit_payload("ben"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{project_id}")))
        .bearer_auth(app.token("cleo", &["Project.Write.All"]))
        .json(&common::edit_payload("ben"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = app.projects.get(project_id).await.unwrap().unwrap();
    assert_eq!(stored.organizer.id, "ben");
}

#[tokio::test]
async fn removed_media_disappears_and_new_uploads_are_presigned() {
    let app = TestApp::spawn(ServerRole::Admin).await;
    let project = common::sample_project("anna", &[]);
    let project_id = project.id;
    app.projects.insert(project).await;
    app.media
        .new_upload_urls(project_id, &["old.jpg".into()])
        .await
        .unwrap();
    let old_name = app.media.object_names(project_id).await[0].clone();

    let mut payload = common::edit_payload("anna");
    payload.media_file_names = vec!["new.png".into()];
    payload.media_file_names_to_remove = vec![old_name.clone()];

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{project_id}")))
        .bearer_auth(app.token("anna", &["Project.Write"]))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let upload_urls: Vec<String> = response.json().await.unwrap();
    assert_eq!(upload_urls.len(), 1);

    let names = app.media.object_names(project_id).await;
    assert!(!names.contains(&old_name));
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with(".png"));
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let app = TestApp::spawn(ServerRole::Admin).await;

    let response = app
        .client
        .post(app.url(&format!("/api/projects/{}", uuid::Uuid::new_v4())))
        .bearer_auth(app.token("anna", &["Project.Write.All"]))
        .json(&common::edit_payload("anna"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
