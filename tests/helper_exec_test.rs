//! Integration tests for isolated helper execution against a real shell.

#![cfg(unix)]

use std::time::{Duration, Instant};

use credhelper::{HelperError, HelperRunner, ShellRunner};

#[tokio::test]
async fn test_success_returns_trimmed_stdout() {
    let runner = ShellRunner::default();
    let secret = runner.run("printf '  secret\\n'").await.unwrap();
    assert_eq!(secret.expose(), "secret");
}

#[tokio::test]
async fn test_pipelines_and_subshells_work() {
    let runner = ShellRunner::default();
    let secret = runner
        .run("echo sk-test-12345 | cat && true")
        .await
        .unwrap();
    assert_eq!(secret.expose(), "sk-test-12345");
}

#[tokio::test]
async fn test_no_output_is_empty_output_error() {
    let runner = ShellRunner::default();
    assert!(matches!(
        runner.run("true").await,
        Err(HelperError::EmptyOutput)
    ));
}

#[tokio::test]
async fn test_whitespace_only_output_is_empty_output_error() {
    let runner = ShellRunner::default();
    assert!(matches!(
        runner.run("printf '   \\n\\t\\n'").await,
        Err(HelperError::EmptyOutput)
    ));
}

#[tokio::test]
async fn test_nonzero_exit_fails_without_leaking_stderr() {
    let runner = ShellRunner::default();
    let err = runner
        .run("echo topsecret >&2; exit 3")
        .await
        .unwrap_err();

    assert!(matches!(err, HelperError::CommandFailed { .. }));
    assert!(
        !err.to_string().contains("topsecret"),
        "stderr text must not reach the error message: {err}"
    );
}

#[tokio::test]
async fn test_timeout_returns_timeout_error() {
    let runner = ShellRunner::new(Duration::from_millis(500));
    let start = Instant::now();
    let err = runner.run("sleep 30").await.unwrap_err();

    assert!(matches!(err, HelperError::TimedOut { .. }));
    // 500ms deadline plus at most the 2s SIGTERM grace period.
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_partial_output_before_timeout_is_discarded() {
    let runner = ShellRunner::new(Duration::from_millis(500));
    let result = runner.run("echo early-key; sleep 30").await;

    // The child produced plausible output before the deadline, but a killed
    // helper's output must never be returned.
    assert!(matches!(result, Err(HelperError::TimedOut { .. })));
}

#[tokio::test]
async fn test_timeout_kills_forked_descendants() {
    let dir = tempfile::tempdir().unwrap();
    let pid_file = dir.path().join("child.pid");
    let command = format!("sleep 30 & echo $! > {}; wait", pid_file.display());

    let runner = ShellRunner::new(Duration::from_secs(1));
    let start = Instant::now();
    let result = runner.run(&command).await;

    assert!(matches!(result, Err(HelperError::TimedOut { .. })));
    assert!(start.elapsed() < Duration::from_secs(5));

    let pid: i32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();

    // The backgrounded sleep must die with the group, within a bounded
    // window after the call returned.
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        let alive = std::process::Command::new("kill")
            .args(["-0", &pid.to_string()])
            .status()
            .unwrap()
            .success();
        if !alive {
            break;
        }
        assert!(
            Instant::now() < deadline,
            "descendant process {pid} survived the timeout"
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test]
async fn test_descendant_holding_stdout_open_still_times_out() {
    // The shell prints a key and exits immediately, but the backgrounded
    // sleep inherits the stdout pipe and keeps it open well past the
    // deadline. The call must still end at the deadline with a timeout, not
    // hang on pipe EOF or return the early output.
    let runner = ShellRunner::new(Duration::from_secs(1));
    let start = Instant::now();
    let result = runner.run("echo key; sleep 8 &").await;

    assert!(matches!(result, Err(HelperError::TimedOut { .. })));
    // 1s deadline plus at most the 2s SIGTERM grace period.
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_empty_command_rejected_before_spawn() {
    let runner = ShellRunner::default();
    assert!(matches!(
        runner.run("").await,
        Err(HelperError::EmptyCommand)
    ));
}
