//! Structured events emitted while analyzing a log.

use cf_analyze::logging::LogConfig;
use cf_analyze::LogAnalyzer;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

fn capture(config: LogConfig, log: &str) -> Vec<Value> {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = config.subscriber(move || writer.clone());

    tracing::subscriber::with_default(subscriber, || {
        LogAnalyzer::with_defaults().analyze(log);
    });
    buffer.lines()
}

fn json_at(level: LevelFilter) -> LogConfig {
    LogConfig {
        json: true,
        ..LogConfig::with_level(level)
    }
}

#[test]
fn debug_events_name_the_tier() {
    let events = capture(
        json_at(LevelFilter::DEBUG),
        "+ make\nstep\nstep\nError: no space left on device",
    );

    let complete = events
        .iter()
        .find(|event| event["fields"]["message"] == "analysis complete")
        .expect("analysis complete event");
    assert_eq!(complete["level"], "DEBUG");
    assert_eq!(complete["fields"]["tier"], "specific_pattern");
    assert_eq!(complete["fields"]["line"], 3);

    assert!(events
        .iter()
        .any(|event| event["fields"]["message"] == "failing command found"));
}

#[test]
fn default_level_is_silent() {
    let config = LogConfig {
        json: true,
        ..LogConfig::default()
    };
    assert!(capture(config, "+ make\nError: no space left on device").is_empty());
}

#[test]
fn directives_select_a_module() {
    let config = LogConfig {
        directives: "cf_analyze::sanitize=trace".to_string(),
        json: true,
        timestamps: true,
    };
    let events = capture(config, "+ make\nError: no space left on device");

    assert!(!events.is_empty());
    assert!(events
        .iter()
        .all(|event| event["target"] == "cf_analyze::sanitize"));
}
