//! Service and service-version commands against a mock API.

use fastly_cli::cli::commands::service::{self, ServiceCommands};
use fastly_cli::cli::commands::service_version::{self, ServiceVersionCommands};
use fastly_cli::cli::commands::{whoami, Context, VersionTarget};
use fastly_cli::error::Error;
use fastly_cli::manifest::Manifest;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer) -> Context {
    Context {
        token_flag: Some("test-token".to_string()),
        endpoint_flag: Some(server.uri()),
        ..Context::default()
    }
}

fn version(number: u32, active: bool) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "service_id": "abc",
        "active": active,
        "locked": false,
        "comment": "",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_service_list_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service"))
        .and(header("Fastly-Key", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "abc", "name": "www.example.com", "type": "vcl", "version": 3},
            {"id": "def", "name": "edge-app", "type": "wasm", "version": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service::execute(ServiceCommands::List, &context(&server), &mut buf)
        .await
        .unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("ACTIVE VERSION"));
    assert!(text.contains("www.example.com"));
    assert!(text.contains("edge-app"));
}

#[tokio::test]
async fn test_service_describe_uses_manifest_service_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/from-manifest/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "from-manifest",
            "name": "edge-app",
            "type": "wasm",
            "active_version": version(2, true),
            "versions": [version(1, false), version(2, true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = context(&server);
    ctx.manifest = Manifest {
        service_id: Some("from-manifest".to_string()),
        ..Manifest::default()
    };
    let mut buf = Vec::new();
    service::execute(ServiceCommands::Describe { service_id: None }, &ctx, &mut buf)
        .await
        .unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("from-manifest"));
    assert!(text.contains("Active version:"));
    assert!(text.lines().any(|l| l.starts_with("Versions:") && l.ends_with('2')));
}

#[tokio::test]
async fn test_service_create_sends_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/service"))
        .and(body_string_contains("name=edge-app"))
        .and(body_string_contains("type=wasm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "new123",
            "name": "edge-app",
            "type": "wasm"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service::execute(
        ServiceCommands::Create {
            name: "edge-app".to_string(),
            comment: None,
            service_type: Some("wasm".to_string()),
        },
        &context(&server),
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "SUCCESS: Created service new123 (edge-app)\n"
    );
}

#[tokio::test]
async fn test_service_delete_force_deactivates_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc",
            "name": "www",
            "active_version": version(5, true)
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/service/abc/version/5/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version(5, false)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/service/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service::execute(
        ServiceCommands::Delete {
            service_id: Some("abc".to_string()),
            force: true,
        },
        &context(&server),
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(String::from_utf8(buf).unwrap(), "SUCCESS: Deleted service ID abc\n");
}

#[tokio::test]
async fn test_service_search_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/search"))
        .and(query_param("name", "www example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc",
            "name": "www example",
            "versions": [version(1, true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service::execute(
        ServiceCommands::Search {
            name: "www example".to_string(),
        },
        &context(&server),
        &mut buf,
    )
    .await
    .unwrap();
    assert!(String::from_utf8(buf).unwrap().contains("abc"));
}

#[tokio::test]
async fn test_version_clone_reports_new_number() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/service/abc/version/3/clone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version(4, false)))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service_version::execute(
        ServiceVersionCommands::Clone {
            target: VersionTarget {
                service_id: Some("abc".to_string()),
                service_version: 3,
            },
        },
        &context(&server),
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "SUCCESS: Cloned service abc version 3 to version 4\n"
    );
}

#[tokio::test]
async fn test_version_activate_and_lock() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/service/abc/version/2/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version(2, true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/service/abc/version/2/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version(2, true)))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let target = || VersionTarget {
        service_id: Some("abc".to_string()),
        service_version: 2,
    };

    let mut buf = Vec::new();
    service_version::execute(ServiceVersionCommands::Activate { target: target() }, &ctx, &mut buf)
        .await
        .unwrap();
    service_version::execute(ServiceVersionCommands::Lock { target: target() }, &ctx, &mut buf)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "SUCCESS: Activated service abc version 2\nSUCCESS: Locked service abc version 2\n"
    );
}

#[tokio::test]
async fn test_version_update_comment() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/service/abc/version/2"))
        .and(body_string_contains("comment=release+candidate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version(2, false)))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    service_version::execute(
        ServiceVersionCommands::Update {
            target: VersionTarget {
                service_id: Some("abc".to_string()),
                service_version: 2,
            },
            comment: "release candidate".to_string(),
        },
        &context(&server),
        &mut buf,
    )
    .await
    .unwrap();
    assert!(String::from_utf8(buf).unwrap().starts_with("SUCCESS: Updated service abc version 2"));
}

#[tokio::test]
async fn test_version_list_without_service_id() {
    let server = MockServer::start().await;
    let result = service_version::execute(
        ServiceVersionCommands::List { service_id: None },
        &context(&server),
        &mut Vec::new(),
    )
    .await;
    assert!(matches!(result, Err(Error::NoServiceId)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_whoami() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "customer": {"id": "cust1", "name": "Example Co"},
            "user": {"id": "user1", "name": "Dev", "login": "dev@example.com"},
            "services": {"abc": "www.example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    whoami::execute_whoami(&context(&server), &mut buf).await.unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Example Co (cust1)"));
    assert!(text.contains("dev@example.com"));
    assert!(text.contains("abc  www.example.com"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "msg": "Provided credentials are missing or invalid"
        })))
        .mount(&server)
        .await;

    let err = service::execute(ServiceCommands::List, &context(&server), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert!(err.hint().is_some());
}
