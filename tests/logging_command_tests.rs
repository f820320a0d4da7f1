//! Logging endpoint commands against a mock API.

use fastly_cli::api::logging::Gcs;
use fastly_cli::cli::commands::logging::gcs::{GcsChanges, GcsCommands, GcsOptions, UpdateArgs};
use fastly_cli::cli::commands::logging::syslog::{self, SyslogCommands};
use fastly_cli::cli::commands::logging::{self as logging_cmd, EndpointTarget, LoggingCommands};
use fastly_cli::cli::commands::{Context, VersionTarget};
use fastly_cli::cli::OutputFormat;
use fastly_cli::error::Error;
use fastly_cli::output::Output;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer) -> Context {
    Context {
        token_flag: Some("test-token".to_string()),
        endpoint_flag: Some(server.uri()),
        ..Context::default()
    }
}

fn target(name: &str) -> EndpointTarget {
    EndpointTarget {
        version: VersionTarget {
            service_id: Some("abc".to_string()),
            service_version: 1,
        },
        name: name.to_string(),
    }
}

fn gcs_logs() -> serde_json::Value {
    serde_json::json!({
        "service_id": "abc",
        "version": "1",
        "name": "logs",
        "bucket_name": "my-bucket",
        "user": "svc@example.com",
        "secret_key": "key",
        "path": "/",
        "period": "3600",
        "gzip_level": 0,
        "format_version": "2",
        "message_type": "classic",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

async fn run(ctx: &Context, command: LoggingCommands) -> (Result<(), Error>, String) {
    let mut buf = Vec::new();
    let result = logging_cmd::execute(command, ctx, &mut buf).await;
    (result, String::from_utf8(buf).unwrap())
}

#[tokio::test]
async fn test_update_merges_supplied_flags_over_current_settings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/version/1/logging/gcs/logs"))
        .and(header("Fastly-Key", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gcs_logs()))
        .expect(1)
        .mount(&server)
        .await;

    let mut updated = gcs_logs();
    updated["period"] = serde_json::json!("600");
    Mock::given(method("PUT"))
        .and(path("/service/abc/version/1/logging/gcs/logs"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("period=600"))
        .and(body_string_contains("bucket_name=my-bucket"))
        .and(body_string_contains("message_type=classic"))
        .and(body_string_contains("gzip_level=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let command = LoggingCommands::Gcs {
        command: GcsCommands::Update(UpdateArgs {
            target: target("logs"),
            changes: GcsChanges {
                options: GcsOptions {
                    period: Some(600),
                    ..GcsOptions::default()
                },
                ..GcsChanges::default()
            },
        }),
    };
    let (result, stdout) = run(&context(&server), command).await;

    result.unwrap();
    assert_eq!(
        stdout,
        "SUCCESS: Updated GCS logging endpoint logs (service abc version 1)\n"
    );
}

#[tokio::test]
async fn test_update_new_name_addresses_old_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/version/1/logging/gcs/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gcs_logs()))
        .mount(&server)
        .await;

    let mut renamed = gcs_logs();
    renamed["name"] = serde_json::json!("archive");
    Mock::given(method("PUT"))
        .and(path("/service/abc/version/1/logging/gcs/logs"))
        .and(body_string_contains("name=archive"))
        .and(body_string_contains("period=3600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed))
        .expect(1)
        .mount(&server)
        .await;

    let command = LoggingCommands::Gcs {
        command: GcsCommands::Update(UpdateArgs {
            target: target("logs"),
            changes: GcsChanges {
                new_name: Some("archive".to_string()),
                ..GcsChanges::default()
            },
        }),
    };
    let (result, stdout) = run(&context(&server), command).await;

    result.unwrap();
    assert!(stdout.contains("Updated GCS logging endpoint archive"));
}

#[tokio::test]
async fn test_missing_service_id_sends_no_requests() {
    let server = MockServer::start().await;

    let mut no_service = target("logs");
    no_service.version.service_id = None;
    let command = LoggingCommands::Gcs {
        command: GcsCommands::Describe(no_service),
    };
    let (result, stdout) = run(&context(&server), command).await;

    assert!(matches!(result, Err(Error::NoServiceId)));
    assert!(stdout.is_empty());
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_service_id_from_environment() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/service/from-env/version/4/logging/syslog/remote%20syslog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = context(&server);
    ctx.env_service_id = Some("from-env".to_string());
    let command = LoggingCommands::Syslog {
        command: SyslogCommands::Delete(EndpointTarget {
            version: VersionTarget {
                service_id: None,
                service_version: 4,
            },
            name: "remote syslog".to_string(),
        }),
    };
    let (result, stdout) = run(&ctx, command).await;

    result.unwrap();
    assert_eq!(
        stdout,
        "SUCCESS: Deleted Syslog logging endpoint remote syslog (service from-env version 4)\n"
    );
}

#[tokio::test]
async fn test_create_sends_only_supplied_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/service/abc/version/1/logging/syslog"))
        .and(body_string_contains("address=logs.example.com"))
        .and(body_string_contains("use_tls=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "service_id": "abc",
            "version": 1,
            "name": "remote",
            "address": "logs.example.com",
            "use_tls": "1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let command = LoggingCommands::Syslog {
        command: SyslogCommands::Create(syslog::CreateArgs {
            target: target("remote"),
            address: "logs.example.com".to_string(),
            options: syslog::SyslogOptions {
                use_tls: Some(true),
                ..syslog::SyslogOptions::default()
            },
        }),
    };
    let (result, stdout) = run(&context(&server), command).await;
    result.unwrap();
    assert_eq!(
        stdout,
        "SUCCESS: Created Syslog logging endpoint remote (service abc version 1)\n"
    );

    let requests = server.received_requests().await.unwrap_or_default();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("port="));
    assert!(!body.contains("format="));
}

#[tokio::test]
async fn test_list_text_and_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/version/1/logging/gcs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([gcs_logs()])))
        .mount(&server)
        .await;

    let list = || LoggingCommands::Gcs {
        command: GcsCommands::List(VersionTarget {
            service_id: Some("abc".to_string()),
            service_version: 1,
        }),
    };

    let (result, text) = run(&context(&server), list()).await;
    result.unwrap();
    assert!(text.contains("NAME"));
    assert!(text.contains("logs"));

    let mut ctx = context(&server);
    ctx.output = Output::new(false, false, OutputFormat::Json);
    let (result, json) = run(&ctx, list()).await;
    result.unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["bucket_name"], "my-bucket");
    assert_eq!(parsed[0]["period"], 3600);
}

#[tokio::test]
async fn test_describe_text_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/version/1/logging/gcs/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gcs_logs()))
        .mount(&server)
        .await;

    let (result, text) = run(
        &context(&server),
        LoggingCommands::Gcs {
            command: GcsCommands::Describe(target("logs")),
        },
    )
    .await;
    result.unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("Service ID:"));
    assert!(lines[0].ends_with("abc"));
    assert!(text.contains("Bucket:"));
    assert!(text.contains("my-bucket"));
    assert!(text.contains("3600"));
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/service/abc/version/1/logging/gcs/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "msg": "Record not found",
            "detail": "Couldn't find GCS 'missing'"
        })))
        .mount(&server)
        .await;

    let (result, _) = run(
        &context(&server),
        LoggingCommands::Gcs {
            command: GcsCommands::Describe(target("missing")),
        },
    )
    .await;

    match result {
        Err(Error::Api {
            status,
            message,
            detail,
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Record not found");
            assert_eq!(detail.as_deref(), Some("Couldn't find GCS 'missing'"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[test]
fn test_update_without_flags_keeps_settings() {
    let current: Gcs = serde_json::from_value(gcs_logs()).unwrap();
    assert_eq!(GcsChanges::default().apply(current.clone()), current);
}
