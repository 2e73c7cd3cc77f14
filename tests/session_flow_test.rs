//! End-to-end behavior of a terminal session against mock collaborators.

mod common;

use std::time::{Duration, Instant};

use common::{log_event, log_event_at, TestSession};
use projterm::domain::LineOrigin;
use projterm::error::ExecutorError;
use projterm::input::InputUnit;
use projterm::models::{CommandResult, LogLevel, LogSource};
use projterm::session::{SessionMessage, SessionNotice, SessionOptions, SessionState, Viewport};
use projterm::adapters::mock::MockReply;

// =============================================================================
// Command dispatch
// =============================================================================

#[tokio::test]
async fn test_echo_hi_round_trip() {
    let mut t = TestSession::started().await;
    t.backend.set_result("echo hi", CommandResult::new("hi\n", 0));

    t.submit("echo hi");
    assert_eq!(t.session.state(), SessionState::Dispatching);
    t.settle().await;

    assert_eq!(
        t.contents(),
        vec!["/ $ echo hi", "Executing: echo hi", "hi"]
    );
    assert_eq!(
        t.origins(),
        vec![LineOrigin::EchoedInput, LineOrigin::System, LineOrigin::CommandOutput]
    );
    assert_eq!(t.session.state(), SessionState::Idle);
    assert!(t.session.take_notices().contains(&SessionNotice::PromptReady));
    assert_eq!(t.backend.executed(), vec![("test-session".to_string(), "echo hi".to_string())]);
}

#[tokio::test]
async fn test_false_reports_exit_code_without_output() {
    let mut t = TestSession::started().await;
    t.backend.set_result("false", CommandResult::new("", 1));

    t.submit("false");
    t.settle().await;

    assert_eq!(
        t.contents(),
        vec!["/ $ false", "Executing: false", "Command exited with code 1"]
    );
    assert_eq!(t.origins()[2], LineOrigin::CommandError);
    assert!(!t.origins().contains(&LineOrigin::CommandOutput));
}

#[tokio::test]
async fn test_multiline_output_skips_blank_rows() {
    let mut t = TestSession::started().await;
    t.backend.set_result("ls", CommandResult::new("a.txt\n\nb.txt\n", 0));

    t.submit("ls");
    t.settle().await;

    assert_eq!(&t.contents()[2..], &["a.txt", "b.txt"]);
}

#[tokio::test]
async fn test_backend_error_is_one_error_line() {
    let mut t = TestSession::started().await;
    t.backend.set_error(
        "deploy",
        ExecutorError::Connection("connection refused".to_string()),
    );

    t.submit("deploy");
    t.settle().await;

    let lines = t.session.buffer().lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2].origin, LineOrigin::CommandError);
    assert!(lines[2].content.starts_with("Error: "));
    assert!(!t.session.is_dispatching());
}

#[tokio::test]
async fn test_hanging_command_times_out() {
    let options = SessionOptions {
        command_timeout: Duration::from_millis(50),
        ..SessionOptions::default()
    };
    let mut t = TestSession::with_options(options);
    t.session.start();
    t.pump_one().await;
    t.backend.set_reply("sleep 999", MockReply::Hang);

    t.submit("sleep 999");
    t.settle().await;

    let last = t.session.buffer().last().unwrap();
    assert_eq!(last.origin, LineOrigin::CommandError);
    assert!(last.content.contains("timed out"), "{}", last.content);
    assert_eq!(t.session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_enter_while_dispatching_is_held() {
    let mut t = TestSession::started().await;
    t.backend.set_delay(Duration::from_millis(50));

    t.submit("build");
    t.type_text("status");
    let outcome = t.session.handle_input(InputUnit::Enter);
    assert_eq!(outcome, projterm::domain::EditOutcome::Unchanged);
    assert_eq!(t.session.pending_line().text(), "status");

    t.settle().await;
    assert_eq!(t.backend.executed_commands(), vec!["build"]);

    t.session.handle_input(InputUnit::Enter);
    t.settle().await;
    assert_eq!(t.backend.executed_commands(), vec!["build", "status"]);
    assert!(t.session.pending_line().is_empty());
}

#[tokio::test]
async fn test_submit_while_dispatching_is_ignored() {
    let mut t = TestSession::started().await;
    t.backend.set_reply("slow", MockReply::Hang);

    t.session.submit("slow");
    t.session.submit("fast");
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(t.backend.executed_commands(), vec!["slow"]);
    assert!(t.session.is_dispatching());
    assert_eq!(t.contents(), vec!["/ $ slow", "Executing: slow"]);
    assert_eq!(t.session.history().get(0), Some("slow"));
    assert_eq!(t.drain(), 0);
    assert!(t.session.is_dispatching());
}

#[tokio::test]
async fn test_ctrl_c_while_dispatching_keeps_prompt_down() {
    let mut t = TestSession::started().await;
    t.backend.set_delay(Duration::from_millis(50));
    t.submit("build");
    t.session.take_notices();

    t.type_text("oops");
    t.session.handle_input(InputUnit::CtrlC);

    assert_eq!(t.contents().last().map(String::as_str), Some("/ $ oops^C"));
    assert!(!t.session.take_notices().contains(&SessionNotice::PromptReady));
    assert!(t.session.is_dispatching());

    t.settle().await;
    assert!(t.session.take_notices().contains(&SessionNotice::PromptReady));
}

// =============================================================================
// Built-ins
// =============================================================================

#[tokio::test]
async fn test_blank_submit_produces_nothing() {
    let mut t = TestSession::started().await;
    t.submit("");
    t.submit("   ");

    assert!(t.session.buffer().is_empty());
    assert!(t.session.history().is_empty());
    assert!(t.backend.executed().is_empty());
}

#[tokio::test]
async fn test_cd_navigation() {
    let mut t = TestSession::started().await;
    t.submit("cd /a/b");
    assert_eq!(t.session.path().to_string(), "/a/b");

    t.submit("cd ..");
    assert_eq!(t.session.path().to_string(), "/a");
    assert_eq!(t.session.prompt(), "/a $ ");

    t.submit("cd /");
    t.submit("cd ..");
    assert_eq!(t.session.path().to_string(), "/");

    t.submit("cd src//lib/./");
    assert_eq!(t.session.path().to_string(), "/src/lib");

    // cd never reaches the backend
    assert!(t.backend.executed().is_empty());
    assert!(!t.session.is_dispatching());
}

#[tokio::test]
async fn test_bare_cd_goes_home() {
    let options = SessionOptions {
        home: projterm::domain::WorkingPath::parse("/srv/app"),
        ..SessionOptions::default()
    };
    let mut t = TestSession::with_options(options);
    t.session.start();
    assert_eq!(t.session.prompt(), "/srv/app $ ");

    t.submit("cd /tmp");
    t.submit("cd");
    assert_eq!(t.session.path().to_string(), "/srv/app");
}

#[tokio::test]
async fn test_clear_empties_buffer_keeps_history() {
    let mut t = TestSession::started().await;
    t.submit("echo one");
    t.settle().await;
    assert!(!t.session.buffer().is_empty());

    t.submit("clear");
    assert!(t.session.buffer().is_empty());
    assert!(t.session.take_notices().contains(&SessionNotice::Cleared));
    let history: Vec<&str> = t.session.history().iter().collect();
    assert_eq!(history, vec!["clear", "echo one"]);
}

#[tokio::test]
async fn test_ctrl_l_clears_display_only() {
    let mut t = TestSession::started().await;
    t.submit("echo one");
    t.settle().await;
    t.type_text("draft");

    t.session.handle_input(InputUnit::CtrlL);
    assert!(t.session.buffer().is_empty());
    assert_eq!(t.session.pending_line().text(), "draft");
}

#[tokio::test]
async fn test_reset_clears_remote_and_local_history() {
    let mut t = TestSession::started().await;
    t.submit("ls");
    t.settle().await;

    t.submit("reset");
    assert!(t.session.is_dispatching());
    t.settle().await;

    assert_eq!(t.backend.clear_calls(), 1);
    assert!(t.session.history().is_empty());
    let last = t.session.buffer().last().unwrap();
    assert_eq!(last.origin, LineOrigin::System);
    assert_eq!(last.content, "Command history cleared");
}

#[tokio::test]
async fn test_clear_history_failure_reports_error() {
    let mut t = TestSession::started().await;
    t.backend.set_clear_error(ExecutorError::Server {
        status: 500,
        message: "boom".to_string(),
    });

    t.submit("clear-history");
    t.settle().await;

    let last = t.session.buffer().last().unwrap();
    assert_eq!(last.origin, LineOrigin::CommandError);
    assert!(last.content.starts_with("Failed to clear history"));
    assert_eq!(t.session.history().len(), 1);
}

#[tokio::test]
async fn test_ctrl_c_echoes_and_discards() {
    let mut t = TestSession::started().await;
    t.type_text("rm -rf");
    t.session.handle_input(InputUnit::CtrlC);

    assert!(t.session.pending_line().is_empty());
    assert_eq!(t.contents(), vec!["/ $ rm -rf^C"]);
    assert!(t.backend.executed().is_empty());
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_history_seeded_from_backend() {
    let mut t = TestSession::new();
    t.backend
        .set_history(vec!["npm start".to_string(), "npm install".to_string()]);
    t.session.start();
    t.pump_one().await;

    assert_eq!(t.backend.history_fetches(), vec![50]);
    t.session.handle_input(InputUnit::Up);
    assert_eq!(t.session.pending_line().text(), "npm start");
    t.session.handle_input(InputUnit::Up);
    assert_eq!(t.session.pending_line().text(), "npm install");
}

#[tokio::test]
async fn test_history_fetch_failure_is_not_fatal() {
    let mut t = TestSession::new();
    t.backend
        .set_history_error(ExecutorError::Connection("down".to_string()));
    t.session.start();
    t.pump_one().await;

    assert!(t.session.buffer().is_empty());
    assert!(t.session.history().is_empty());
}

#[tokio::test]
async fn test_history_fetched_before_reset_is_dropped() {
    let mut t = TestSession::started().await;
    t.submit("reset");
    t.settle().await;
    assert!(t.session.history().is_empty());

    t.session
        .handle_message(SessionMessage::HistoryLoaded(Ok(vec!["old-remote".to_string()])));

    assert!(t.session.history().is_empty());
}

#[tokio::test]
async fn test_history_arriving_mid_browse_keeps_position() {
    let mut t = TestSession::started().await;
    for cmd in ["a", "b"] {
        t.submit(cmd);
        t.settle().await;
    }
    t.session.handle_input(InputUnit::Up);
    assert_eq!(t.session.pending_line().text(), "b");

    t.session
        .handle_message(SessionMessage::HistoryLoaded(Ok(vec!["remote".to_string()])));

    t.session.handle_input(InputUnit::Up);
    assert_eq!(t.session.pending_line().text(), "a");
    t.session.handle_input(InputUnit::Up);
    assert_eq!(t.session.pending_line().text(), "remote");
}

#[tokio::test]
async fn test_up_stabilizes_at_oldest() {
    let mut t = TestSession::started().await;
    for cmd in ["one", "two", "three"] {
        t.submit(cmd);
        t.settle().await;
    }
    for _ in 0..10 {
        t.session.handle_input(InputUnit::Up);
    }
    assert_eq!(t.session.pending_line().text(), "one");

    for _ in 0..3 {
        t.session.handle_input(InputUnit::Down);
    }
    assert!(t.session.pending_line().is_empty());
}

// =============================================================================
// Log stream
// =============================================================================

#[tokio::test]
async fn test_log_event_leaves_pending_line_alone() {
    let mut t = TestSession::started().await;
    t.type_text("partial");

    t.logs
        .inject_event(&log_event("server started", LogLevel::Info, LogSource::Runtime));
    t.pump_one().await;

    assert_eq!(t.session.pending_line().text(), "partial");
    assert_eq!(t.session.pending_line().cursor(), 7);
    let last = t.session.buffer().last().unwrap();
    assert_eq!(last.origin, LineOrigin::StreamEvent);
    assert!(last.content.ends_with("RUNTIME INFO: server started"));
    assert!(t.session.take_notices().contains(&SessionNotice::ScrollToBottom));
}

#[tokio::test]
async fn test_build_events_have_no_tag_and_are_escaped() {
    let mut t = TestSession::started().await;
    t.logs.inject_event(&log_event(
        "<b>done</b> & \x1b[32mok\x1b[0m",
        LogLevel::Success,
        LogSource::Build,
    ));
    t.pump_one().await;

    let line = t.session.buffer().last().unwrap();
    assert!(
        line.content
            .ends_with("] SUCCESS: &lt;b&gt;done&lt;/b&gt; &amp; ok"),
        "{}",
        line.content
    );
    // Live form keeps the original colors
    assert!(line.live_text().contains("\x1b[32mok"));
}

#[tokio::test]
async fn test_malformed_and_duplicate_events_dropped() {
    let mut t = TestSession::started().await;
    let event = log_event_at("tick", 1);
    t.logs.inject_raw("not json");
    t.logs.inject_event(&event);
    t.logs.inject_event(&event);
    t.logs.inject_event(&log_event_at("tock", 2));
    for _ in 0..4 {
        t.pump_one().await;
    }

    let stream_lines = t
        .origins()
        .into_iter()
        .filter(|o| *o == LineOrigin::StreamEvent)
        .count();
    assert_eq!(stream_lines, 2);
}

#[tokio::test]
async fn test_dedup_disabled_keeps_duplicates() {
    let options = SessionOptions {
        dedup_window: 0,
        ..SessionOptions::default()
    };
    let mut t = TestSession::with_options(options);
    t.session.start();
    t.pump_one().await;

    let event = log_event_at("tick", 1);
    t.logs.inject_event(&event);
    t.logs.inject_event(&event);
    t.pump_one().await;
    t.pump_one().await;
    assert_eq!(t.session.buffer().len(), 2);
}

#[tokio::test]
async fn test_export_keeps_arrival_order_across_sources() {
    let mut t = TestSession::started().await;
    t.backend.set_result("echo a", CommandResult::new("a", 0));
    t.backend.set_delay(Duration::from_millis(30));

    t.submit("echo a");
    t.logs.inject_event(&log_event_at("mid-flight", 5));
    t.settle().await;
    // The log line may land before or after the output, but only once
    t.drain();

    let export = t.session.export_logs();
    let expected: Vec<String> = t.contents();
    assert_eq!(export, expected.join("\n"));
    assert_eq!(expected[0], "/ $ echo a");
    assert_eq!(expected[1], "Executing: echo a");
    assert_eq!(expected.len(), 4);
    assert!(!export.contains('\x1b'));
}

#[tokio::test]
async fn test_unmount_stops_log_delivery() {
    let mut t = TestSession::started().await;
    assert!(t.session.is_subscribed());
    t.session.unmount();
    assert!(!t.session.is_mounted());

    t.logs.inject_event(&log_event_at("late", 9));
    // Anything already queued is ignored
    t.session
        .handle_message(SessionMessage::LogPayload("{}".to_string()));
    tokio::time::sleep(Duration::from_millis(20)).await;
    t.drain();
    assert!(t.session.buffer().is_empty());
}

// =============================================================================
// Fit, copy, export
// =============================================================================

#[tokio::test]
async fn test_fit_calls_coalesce() {
    let mut t = TestSession::started().await;
    t.session.take_notices();
    let start = Instant::now();

    t.session.fit_at(80, 24, start);
    t.session.fit_at(100, 30, start + Duration::from_millis(40));
    t.session.fit_at(120, 40, start + Duration::from_millis(80));

    t.session.tick(start + Duration::from_millis(150));
    assert!(t.session.has_pending_fit());

    t.session.tick(start + Duration::from_millis(181));
    let resized: Vec<SessionNotice> = t
        .session
        .take_notices()
        .into_iter()
        .filter(|n| matches!(n, SessionNotice::Resized(_)))
        .collect();
    assert_eq!(resized, vec![SessionNotice::Resized(Viewport::new(120, 40))]);
    assert_eq!(t.session.viewport(), Viewport::new(120, 40));
}

#[tokio::test]
async fn test_unmount_cancels_pending_fit() {
    let mut t = TestSession::started().await;
    t.session.fit(90, 20);
    assert!(t.session.has_pending_fit());
    t.session.unmount();
    assert!(!t.session.has_pending_fit());
}

#[tokio::test]
async fn test_copy_puts_export_on_clipboard() {
    let mut t = TestSession::started().await;
    t.submit("cd /app");
    t.submit("pwd");
    t.settle().await;

    let copied = t.session.copy_content().unwrap();
    assert_eq!(copied, t.session.buffer().len());
    assert_eq!(t.clipboard.contents(), Some(t.session.export_logs()));
}

#[tokio::test]
async fn test_save_export_writes_file() {
    let mut t = TestSession::started().await;
    t.submit("echo saved");
    t.settle().await;

    let dir = tempfile::tempdir().unwrap();
    let path = t.session.save_export(dir.path()).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("terminal-test-session-"), "{}", name);
    assert!(name.ends_with(".log"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, format!("{}\n", t.session.export_logs()));
}

#[tokio::test]
async fn test_save_export_missing_dir_fails() {
    let t = TestSession::started().await;
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(t.session.save_export(&missing).is_err());
}
