use std::time::Duration;

use ipatch_agent::{AddressValidator, ValidationOutcome, YardCodeTool};
use mockito::Matcher;

fn tool_for(server: &mockito::ServerGuard) -> YardCodeTool {
    YardCodeTool::new(
        format!("{}/api/validate", server.url()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_success_body_confirms_code() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/validate")
        .match_query(Matcher::UrlEncoded(
            "yard_code".into(),
            "GQ9U88levi".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "data": {"yard_code": "GQ9U88levi"}}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = tool_for(&server).validate("GQ9U88levi").await;

    mock.assert_async().await;
    assert!(outcome.is_success());
    assert!(outcome.to_string().contains("GQ9U88levi"));
}

#[tokio::test]
async fn test_spaces_are_stripped_before_the_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/validate")
        .match_query(Matcher::UrlEncoded(
            "yard_code".into(),
            "GQ9U88levi".into(),
        ))
        .with_status(200)
        .with_body(r#"{"status": "success"}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = tool_for(&server).validate(" GQ9U 88levi ").await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        ValidationOutcome::Success {
            code: " GQ9U 88levi ".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_code_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tool = tool_for(&server);
    assert_eq!(tool.validate("").await, ValidationOutcome::EmptyInput);
    assert_eq!(tool.validate("   ").await, ValidationOutcome::EmptyInput);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_body_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/validate")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "error", "message": "Invalid YardCode format"}"#)
        .create_async()
        .await;

    let outcome = tool_for(&server).validate("not-a-code").await;

    assert_eq!(outcome, ValidationOutcome::Rejected);
    assert!(outcome.to_string().starts_with("Validation FAILED"));
}

#[tokio::test]
async fn test_http_error_status_is_a_connection_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/validate")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(r#"{"status": "success"}"#)
        .create_async()
        .await;

    let outcome = tool_for(&server).validate("GQ9U88levi").await;

    assert!(matches!(outcome, ValidationOutcome::ConnectionError { .. }));
    assert!(!outcome.to_string().contains("SUCCESS"));
}

#[tokio::test]
async fn test_malformed_json_is_a_connection_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/validate")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let outcome = tool_for(&server).validate("GQ9U88levi").await;

    assert!(matches!(outcome, ValidationOutcome::ConnectionError { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_a_connection_error() {
    let tool = YardCodeTool::new("http://127.0.0.1:9/api/validate", Duration::from_secs(2)).unwrap();

    let outcome = tool.validate("GQ9U88levi").await;

    match outcome {
        ValidationOutcome::ConnectionError { detail } => assert!(!detail.is_empty()),
        other => panic!("expected connection error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_silent_server_times_out_as_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let tool = YardCodeTool::new(
        format!("http://{addr}/api/validate"),
        Duration::from_millis(300),
    )
    .unwrap();

    let outcome = tool.validate("GQ9U88levi").await;

    match outcome {
        ValidationOutcome::ConnectionError { detail } => {
            assert!(detail.contains("timed out"), "detail: {detail}")
        }
        other => panic!("expected connection error, got {:?}", other),
    }
}
