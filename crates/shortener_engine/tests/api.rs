use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use shortener_engine::{ApiSettings, FailureKind, LinkApi, LinkRecord, ReqwestApi};
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("valid base url")
}

#[tokio::test]
async fn register_posts_json_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "username": "alice"})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .register("alice", "pw")
        .await
        .expect("register ok");
}

#[tokio::test]
async fn register_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = api_for(&server).register("alice", "pw").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}

#[tokio::test]
async fn login_posts_form_and_returns_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=alice&password=pw"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "abc", "token_type": "bearer"})),
        )
        .mount(&server)
        .await;

    let token = api_for(&server).login("alice", "pw").await.expect("login ok");
    assert_eq!(token, "abc");
}

#[tokio::test]
async fn login_rejects_body_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "nope"})))
        .mount(&server)
        .await;

    let err = api_for(&server).login("alice", "pw").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn shorten_sends_bearer_token_and_parses_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({"original_url": "http://x.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "short_url": "http://s/1",
            "original_url": "http://x.com",
            "click_count": 0
        })))
        .mount(&server)
        .await;

    let link = api_for(&server)
        .shorten("abc", "http://x.com")
        .await
        .expect("shorten ok");
    assert_eq!(
        link,
        LinkRecord {
            short_url: "http://s/1".to_string(),
            original_url: "http://x.com".to_string(),
            click_count: 0,
        }
    );
}

#[tokio::test]
async fn shorten_fails_when_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api_for(&server).shorten("stale", "http://x.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn list_links_returns_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/links"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"short_url": "http://s/2", "original_url": "http://b.com", "click_count": 4},
            {"short_url": "http://s/1", "original_url": "http://a.com", "click_count": 7}
        ])))
        .mount(&server)
        .await;

    let links = api_for(&server).list_links("abc").await.expect("links ok");
    let shorts: Vec<_> = links.iter().map(|l| l.short_url.as_str()).collect();
    assert_eq!(shorts, vec!["http://s/2", "http://s/1"]);
    assert_eq!(links[1].click_count, 7);
}

#[tokio::test]
async fn endpoints_are_appended_to_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: format!("{}/api/", server.uri()),
        ..ApiSettings::default()
    })
    .unwrap();
    assert!(api.list_links("abc").await.unwrap().is_empty());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/links"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.list_links("abc").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestApi::new(ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);

    let err = ReqwestApi::new(ApiSettings {
        base_url: "mailto:someone@example.com".to_string(),
        ..ApiSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
