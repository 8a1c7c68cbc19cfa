mod helpers;

use std::time::Duration;

use dashboard::api::models::beta_tester::{BetaTesterFilters, InviteBetaTesterRequest};
use dashboard::api::models::project::{
    CreateProjectRequest, ProjectFilters, ProjectStatus, UpdateProjectRequest,
};
use dashboard::query::QueryStatus;
use dashboard::query::keys::project_keys;
use dashboard::session::AuthDomain;
use helpers::*;

const PROJECTS: &str = "/api/v1/projects";

#[tokio::test]
async fn test_identical_concurrent_reads_share_one_request() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    app.backend.state.set_delay(Duration::from_millis(50));

    let filters = ProjectFilters::default();
    let projects = &app.dashboard.projects;
    let results = futures_util::future::join_all((0..5).map(|_| projects.list(&filters))).await;

    assert_eq!(app.backend.state.count("GET", PROJECTS), 1);
    for result in &results {
        assert!(result.is_success());
        assert_eq!(result.data().map(Vec::len), Some(2));
    }
}

#[tokio::test]
async fn test_distinct_filters_are_cached_separately() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);

    let all = ProjectFilters::default();
    let beta = ProjectFilters {
        status: Some(ProjectStatus::Beta),
        ..Default::default()
    };

    let all_result = app.dashboard.projects.list(&all).await;
    let beta_result = app.dashboard.projects.list(&beta).await;
    app.dashboard.projects.list(&beta).await;

    assert_eq!(app.backend.state.count("GET", PROJECTS), 2);
    assert_eq!(all_result.data().map(Vec::len), Some(2));
    assert_eq!(beta_result.data().map(Vec::len), Some(1));
    assert_ne!(project_keys::list(&all), project_keys::list(&beta));
}

#[tokio::test]
async fn test_successful_mutation_refetches_only_its_resource() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    let d = &app.dashboard;
    let filters = ProjectFilters::default();

    d.projects.list(&filters).await;
    d.projects.detail("1").await;
    d.health.database().await;

    let created = d
        .projects
        .create(&CreateProjectRequest {
            name: "Nova".into(),
            description: None,
            platform: Some("ios".into()),
            launch_date: None,
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Nova");

    let list = d.projects.list(&filters).await;
    d.projects.detail("1").await;
    d.health.database().await;

    assert_eq!(list.data().map(Vec::len), Some(3));
    assert_eq!(app.backend.state.count("GET", PROJECTS), 2);
    assert_eq!(app.backend.state.count("GET", "/api/v1/projects/1"), 2);
    assert_eq!(app.backend.state.count("GET", "/api/v1/health/database"), 1);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    let d = &app.dashboard;
    let filters = BetaTesterFilters::default();

    d.beta_testers.list(&filters).await;
    let err = d
        .beta_testers
        .invite(&InviteBetaTesterRequest {
            project_id: "1".into(),
            email: "taken@example.com".into(),
            name: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));

    d.beta_testers.list(&filters).await;
    assert_eq!(app.backend.state.count("GET", "/api/v1/beta-testers"), 1);
}

#[tokio::test]
async fn test_invite_refreshes_testers_and_projects() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    let d = &app.dashboard;

    d.beta_testers.list(&BetaTesterFilters::default()).await;
    d.projects.list(&ProjectFilters::default()).await;

    let tester = d
        .beta_testers
        .invite(&InviteBetaTesterRequest {
            project_id: "1".into(),
            email: "new@example.com".into(),
            name: Some("Nia".into()),
        })
        .await
        .unwrap();
    assert_eq!(tester.id, "900");

    d.beta_testers.list(&BetaTesterFilters::default()).await;
    d.projects.list(&ProjectFilters::default()).await;
    assert_eq!(app.backend.state.count("GET", "/api/v1/beta-testers"), 2);
    assert_eq!(app.backend.state.count("GET", PROJECTS), 2);
}

#[tokio::test]
async fn test_update_and_delete_invalidate_details() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    let d = &app.dashboard;

    let before = d.projects.detail("2").await;
    assert_eq!(before.data().unwrap().status, ProjectStatus::Draft);

    d.projects
        .update(
            "2",
            &UpdateProjectRequest {
                status: Some(ProjectStatus::Beta),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let after = d.projects.detail("2").await;
    assert_eq!(after.data().unwrap().status, ProjectStatus::Beta);

    d.projects.delete("2").await.unwrap();
    let gone = d.projects.detail("2").await;
    assert_eq!(gone.error.as_ref().unwrap().status(), Some(404));
    // 失败时仍保留之前的数据
    assert_eq!(gone.data().unwrap().id, "2");
}

#[tokio::test]
async fn test_detail_with_empty_id_issues_no_request() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);

    let empty = app.dashboard.projects.detail("").await;
    let blank = app.dashboard.beta_testers.detail("   ").await;
    let manager = app.dashboard.influencer_managers.detail("").await;

    assert_eq!(empty.status, QueryStatus::Idle);
    assert!(blank.is_idle());
    assert!(manager.is_idle() && manager.data.is_none());
    assert_eq!(app.backend.state.total_requests(), 0);
}

#[tokio::test]
async fn test_logout_drops_cached_queries() {
    let app = spawn_app().await;
    app.seed_session(AuthDomain::Admin);
    let d = &app.dashboard;
    let filters = ProjectFilters::default();

    d.projects.list(&filters).await;
    assert!(d.projects.list_state(&filters).has_data);

    d.admin.logout().await;
    assert!(!d.projects.list_state(&filters).has_data);
    assert_eq!(app.backend.state.count("POST", "/api/v1/auth/logout"), 1);
}
