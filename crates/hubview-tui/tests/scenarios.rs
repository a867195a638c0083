use std::time::Duration;

use hubview_core::api::ApiClient;
use hubview_core::config::Config;
use hubview_tui::HeadlessRuntime;
use hubview_tui::events::{Action, UiEvent};
use hubview_tui::repos::RepoStatus;
use hubview_tui::session::SessionStatus;
use hubview_tui::view::{Body, EMAIL_HIDDEN, NO_REPOSITORIES};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runtime_for(server: &MockServer) -> HeadlessRuntime {
    let config = Config {
        base_url: server.uri(),
        request_timeout_secs: 2,
        ..Config::default()
    };
    HeadlessRuntime::new(ApiClient::new(&config).unwrap()).unwrap()
}

async fn mount_session(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/github/me"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_ada(server: &MockServer) {
    mount_session(server, 200, json!({"id": 1, "login": "ada", "avatar_url": "u"})).await;
}

async fn mount_repos(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/github/repos"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn two_repos() -> serde_json::Value {
    json!([
        {
            "id": 10,
            "full_name": "ada/engine",
            "html_url": "https://github.com/ada/engine",
            "private": false,
            "visibility": "public"
        },
        {
            "id": 11,
            "full_name": "ada/notes",
            "html_url": "https://github.com/ada/notes",
            "private": true,
            "visibility": "private"
        }
    ])
}

#[tokio::test]
async fn test_unauthorized_session_offers_connect() {
    let server = MockServer::start().await;
    mount_session(&server, 401, json!({"detail": "Not authenticated"})).await;

    let mut rt = runtime_for(&server);
    rt.start().await;

    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);
    let Body::SignedOut { connect, .. } = rt.view().body else {
        panic!("expected signed-out body");
    };
    assert_eq!(connect.label, "Connect GitHub");

    rt.action(Action::Connect);
    assert_eq!(
        rt.opened_urls(),
        &[format!("{}/api/github/login", server.uri())]
    );
}

#[tokio::test]
async fn test_authenticated_profile_hides_missing_email() {
    let server = MockServer::start().await;
    mount_ada(&server).await;

    let mut rt = runtime_for(&server);
    rt.start().await;

    assert_eq!(rt.state.session().status(), SessionStatus::Authenticated);
    assert_eq!(rt.state.session().user().map(|u| u.login.as_str()), Some("ada"));
    let Body::SignedIn { profile, .. } = rt.view().body else {
        panic!("expected signed-in body");
    };
    assert_eq!(profile.email, EMAIL_HIDDEN);
}

#[tokio::test]
async fn test_empty_repository_list_is_not_an_error() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let mut rt = runtime_for(&server);
    rt.start().await;
    rt.run_action(Action::LoadRepos).await;

    assert_eq!(rt.state.repos().status(), RepoStatus::Ready);
    assert!(rt.view().plain_lines().contains(&NO_REPOSITORIES.to_string()));
}

#[tokio::test]
async fn test_repository_failure_keeps_retry_enabled() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    mount_repos(&server, ResponseTemplate::new(500)).await;

    let mut rt = runtime_for(&server);
    rt.start().await;
    rt.run_action(Action::LoadRepos).await;

    assert_eq!(rt.state.repos().status(), RepoStatus::Error);
    assert_eq!(
        rt.state.repos().error(),
        Some("Failed to load repositories (HTTP 500)")
    );
    let Body::SignedIn { repos, .. } = rt.view().body else {
        panic!("expected signed-in body");
    };
    assert!(repos.load.enabled);
}

#[tokio::test]
async fn test_logout_clears_state_even_when_backend_fails() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(two_repos())).await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut rt = runtime_for(&server);
    rt.start().await;
    rt.run_action(Action::LoadRepos).await;
    assert_eq!(rt.state.repos().repos().len(), 2);

    rt.action(Action::Logout);
    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);
    assert_eq!(rt.state.repos().status(), RepoStatus::Idle);
    assert!(rt.state.repos().repos().is_empty());

    rt.settle().await;
    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);
    assert!(rt.state.notice.is_none());
}

#[tokio::test]
async fn test_failed_logout_request_surfaces_notice() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        base_url: server.uri(),
        request_timeout_secs: 1,
        ..Config::default()
    };
    let mut rt = HeadlessRuntime::new(ApiClient::new(&config).unwrap()).unwrap();
    rt.start().await;
    rt.run_action(Action::Logout).await;

    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);
    let notice = rt.state.notice.clone().unwrap_or_default();
    assert!(
        notice.starts_with("Sign-out request failed: Failed to reach logout endpoint"),
        "unexpected notice: {notice}"
    );
}

#[tokio::test]
async fn test_logout_not_offered_after_failed_session_check() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = Config {
        base_url,
        request_timeout_secs: 2,
        ..Config::default()
    };
    let mut rt = HeadlessRuntime::new(ApiClient::new(&config).unwrap()).unwrap();
    rt.start().await;
    assert_eq!(rt.state.session().status(), SessionStatus::Error);

    rt.run_action(Action::Logout).await;
    assert_eq!(rt.state.session().status(), SessionStatus::Error);
    assert!(rt.state.notice.is_none());
}

#[tokio::test]
async fn test_logout_then_login_leaves_no_residual_repositories() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(two_repos())).await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let mut rt = runtime_for(&server);
    rt.start().await;
    rt.run_action(Action::LoadRepos).await;
    rt.run_action(Action::Logout).await;
    rt.run_action(Action::Reload).await;

    assert_eq!(rt.state.session().status(), SessionStatus::Authenticated);
    assert_eq!(rt.state.repos().status(), RepoStatus::Idle);
    assert!(rt.state.repos().repos().is_empty());
}

#[tokio::test]
async fn test_reload_supersedes_slow_session_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/github/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "login": "ada", "avatar_url": "u"}))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_session(&server, 401, json!({"detail": "Not authenticated"})).await;

    let mut rt = runtime_for(&server);
    rt.dispatch(UiEvent::Init);
    for _ in 0..100 {
        let seen = server.received_requests().await.map_or(0, |r| r.len());
        if seen >= 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    rt.action(Action::Reload);
    rt.settle().await;

    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);

    // Give the superseded request time to finish; its result must not land.
    tokio::time::sleep(Duration::from_millis(400)).await;
    rt.settle().await;
    assert_eq!(rt.state.session().status(), SessionStatus::Anonymous);
}

#[tokio::test]
async fn test_open_selected_repository() {
    let server = MockServer::start().await;
    mount_ada(&server).await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(two_repos())).await;

    let mut rt = runtime_for(&server);
    rt.start().await;
    rt.run_action(Action::LoadRepos).await;
    rt.action(Action::SelectNext);
    rt.action(Action::OpenSelected);

    assert_eq!(rt.opened_urls(), &["https://github.com/ada/notes".to_string()]);
    assert!(
        rt.view()
            .plain_lines()
            .contains(&"- ada/notes  https://github.com/ada/notes  [Private]".to_string())
    );
}
