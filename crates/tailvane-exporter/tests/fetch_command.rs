//! Status command invocation tests against short-lived real processes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use tailvane_core::TailvaneError;
use tailvane_exporter::fetch::{StatusCommand, StatusSource};

#[tokio::test]
async fn json_stdout_decodes() {
    let cmd = StatusCommand::with_program(
        "echo",
        &[r#"{"Self":{"HostName":"h","TailscaleIPs":["100.64.0.9"]}}"#],
    );
    let status = cmd.fetch_status().await.unwrap();
    assert_eq!(status.self_node.primary_address().unwrap(), "100.64.0.9");
}

#[tokio::test]
async fn nonzero_exit_is_command_failure() {
    let cmd = StatusCommand::with_program("false", &[]);
    let err = cmd.fetch_status().await.unwrap_err();
    assert!(matches!(err, TailvaneError::CommandFailure { .. }));
}

#[tokio::test]
async fn diagnostic_output_is_command_failure_even_on_exit_zero() {
    let cmd = StatusCommand::with_program("sh", &["-c", "echo '{}' ; echo 'not logged in' >&2"]);
    match cmd.fetch_status().await.unwrap_err() {
        TailvaneError::CommandFailure { stderr } => assert!(stderr.contains("not logged in")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_program_is_command_failure() {
    let cmd = StatusCommand::with_program("/nonexistent/status-binary", &[]);
    let err = cmd.fetch_status().await.unwrap_err();
    assert!(matches!(err, TailvaneError::CommandFailure { .. }));
}

#[tokio::test]
async fn non_json_stdout_is_decode_failure() {
    let cmd = StatusCommand::with_program("echo", &["plainly not json"]);
    match cmd.fetch_status().await.unwrap_err() {
        TailvaneError::DecodeFailure { snippet, .. } => {
            assert!(snippet.contains("plainly not json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_command_times_out() {
    let cmd = StatusCommand::with_program("sleep", &["5"])
        .with_timeout(Duration::from_millis(50));
    let err = cmd.fetch_status().await.unwrap_err();
    assert!(matches!(err, TailvaneError::FetchTimeout(_)));
}
