//! End-to-end analysis of representative CI logs.

use cf_analyze::{analyze, analyze_bytes, LogAnalysisResult, LogAnalyzer, Tier};
use cf_common::log_text_from_response;

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn pytest_assertion_failure() {
    let log = "+ pytest tests/\nE   AssertionError: expected 1, got 2\nFAILED tests/test_x.py";
    let result = analyze(log);

    assert_eq!(result.failing_command.as_deref(), Some("pytest tests/"));
    let message = result.error_message.expect("error message");
    assert!(message.contains("AssertionError: expected 1, got 2"), "{message}");
    assert_eq!(result.tier, Some(Tier::SpecificPattern));
    assert_eq!(
        result.error_context,
        vec![
            "+ pytest tests/",
            "E   AssertionError: expected 1, got 2",
            "FAILED tests/test_x.py",
        ]
    );
}

#[test]
fn artifact_only_log_is_empty() {
    let result = analyze("+++\n---\n~~~\n");
    assert!(result.is_empty());
    assert_eq!(result, LogAnalysisResult::empty());
}

#[test]
fn empty_log_is_empty() {
    assert!(analyze("").is_empty());
    assert!(analyze("\n\n   \r\n\t\n").is_empty());
}

#[test]
fn npm_err_block() {
    let result = analyze("npm ERR! missing script: build");
    assert_eq!(
        result.error_message.as_deref(),
        Some("npm ERR! missing script: build")
    );
    assert_eq!(result.tier, Some(Tier::Multiline));
}

#[test]
fn colored_log_matches_plain_log() {
    let plain = "+ cargo build\n\
                 error: linking with `cc` failed: exit status: 1\n\
                 note: see the linker output above";
    let colored = "+ cargo build\n\
                   \x1b[1m\x1b[31merror\x1b[0m\x1b[1m: linking with `cc` failed: exit status: 1\x1b[0m\n\
                   \x1b[36mnote\x1b[0m: see the linker output above";

    let expected = analyze(plain);
    assert_eq!(analyze(colored), expected);
    assert_eq!(
        expected.error_message.as_deref(),
        Some("linking with `cc` failed: exit status: 1")
    );
    assert_eq!(expected.failing_command.as_deref(), Some("cargo build"));
}

#[test]
fn failure_near_end_of_large_log() {
    let mut lines: Vec<String> = (0..10_000).map(|i| format!("step {i} ok")).collect();
    lines[9_998] = "upload: connection refused by registry".to_string();
    let result = analyze(&lines.join("\n"));

    assert_eq!(result.tier, Some(Tier::FailureKeyword));
    assert_eq!(
        result.error_message.as_deref(),
        Some("upload: connection refused by registry")
    );
    // [9993, 10003) clamps to the last seven lines
    assert_eq!(result.error_context.len(), 7);
    assert_eq!(result.error_context[0], "step 9993 ok");
    assert_eq!(result.error_context.last().map(String::as_str), Some("step 9999 ok"));
}

#[test]
fn failure_on_last_line() {
    let mut lines: Vec<String> = (0..10_000).map(|i| format!("step {i} ok")).collect();
    lines[9_999] = "upload: connection refused by registry".to_string();
    let result = analyze(&lines.join("\n"));

    assert_eq!(result.error_context.len(), 6);
    assert_eq!(
        result.error_context.last().map(String::as_str),
        Some("upload: connection refused by registry")
    );
}

// ============================================================================
// Tier ordering
// ============================================================================

#[test]
fn specific_pattern_beats_earlier_exit_phrase() {
    let log = "exit code 2 returned by step\n\
               running handler\n\
               TypeError: 'NoneType' object is not subscriptable";
    let result = analyze(log);

    assert_eq!(result.tier, Some(Tier::SpecificPattern));
    assert_eq!(
        result.error_message.as_deref(),
        Some("'NoneType' object is not subscriptable")
    );
}

#[test]
fn exit_status_phrase() {
    let log = "step 1\nstep 2\nscript returned exit code 3\nstep 4";
    let result = analyze(log);

    assert_eq!(result.tier, Some(Tier::ExitStatus));
    assert_eq!(result.error_message.as_deref(), Some("script returned exit code 3"));
    assert_eq!(result.error_context.len(), 4);
}

#[test]
fn success_lines_are_not_failures() {
    let log = "upload completed despite timeout warnings\nconnect: cannot reach host mirror";
    let result = analyze(log);

    assert_eq!(result.tier, Some(Tier::FailureKeyword));
    assert!(result.tier.is_some_and(|tier| tier.is_low_confidence()));
    assert_eq!(
        result.error_message.as_deref(),
        Some("connect: cannot reach host mirror")
    );
}

#[test]
fn traceback_replaces_short_match() {
    let log = "FATAL: worker crashed\n\
               Traceback (most recent call last):\n\
               File \"worker.py\", line 9, in run\n\
               KeyError: 'job'";
    let result = analyze(log);

    // tier 1 would have had all four lines, so nothing is replaced
    assert_eq!(result.tier, Some(Tier::SpecificPattern));

    let short = analyze("FATAL: worker crashed in the scheduler\nTraceback (most recent call last):");
    assert_eq!(short.tier, Some(Tier::Multiline));
}

#[test]
fn buildkite_markup_is_ignored() {
    let log = "\x1b_bk;t=1700000000000\x07--- :hammer: Build\n\
               bk;t=1700000000001$ make release\n\
               ^^^ +++\n\
               bk;t=1700000000002make: *** [release] Error 2";
    let result = analyze(log);

    assert_eq!(result.failing_command.as_deref(), Some("make release"));
    assert!(result
        .error_context
        .iter()
        .all(|line| !line.contains("bk;t=") && !line.contains('\x1b')));
}

// ============================================================================
// Payload handling
// ============================================================================

#[test]
fn json_wrapped_log() {
    let body = r#"{"content": "+ make test\nmake: *** [test] Error 2\nError: tests failed in suite core"}"#;
    let result = analyze(&log_text_from_response(body));

    assert_eq!(result.failing_command.as_deref(), Some("make test"));
    assert!(result.has_error());
}

#[test]
fn invalid_utf8_is_analyzed() {
    let mut bytes = b"+ go build ./...\n".to_vec();
    bytes.extend_from_slice(&[0xc3, 0x28, 0xff]);
    bytes.extend_from_slice(b"\nbuild failed: undefined: handler.Serve");
    let result = analyze_bytes(&bytes);

    assert_eq!(result.failing_command.as_deref(), Some("go build ./..."));
    assert!(result.has_error());
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = LogAnalyzer::with_defaults();
    let expected = analyzer.analyze("+ make\nError: disk quota exceeded on runner");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let result = analyzer.analyze("+ make\nError: disk quota exceeded on runner");
                assert_eq!(result, expected);
            });
        }
    });
}
