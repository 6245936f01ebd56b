//! Integration tests for the logging module.

use std::fs::{self, File};
use std::sync::Mutex;

use agility_cli::logging::{LogConfig, LogFormat, build_subscriber, default_directives};
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

/// Emits one info and one debug event from an engine target under `config`
/// and returns what the subscriber wrote.
fn capture(config: &LogConfig) -> String {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("agility.log");
    let file = File::create(&path).expect("create log file");
    let subscriber = build_subscriber(config, Mutex::new(file));
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "agility_points", venue = "AKC", "venue tallied");
        tracing::debug!(target: "agility_points", "below the configured level");
    });
    fs::read_to_string(&path).expect("read log file")
}

fn info_config(format: LogFormat) -> LogConfig {
    LogConfig::from_verbosity(1)
        .with_env_filter(false)
        .with_ansi(false)
        .with_format(format)
}

// --- Filter tests ---

#[test]
fn default_directives_cover_workspace_crates() {
    let directives = default_directives(LevelFilter::DEBUG);
    assert!(directives.starts_with("warn,"));
    assert!(directives.contains("agility_points=debug"));
    assert!(directives.contains("agility_cli=debug"));
}

#[test]
fn verbosity_maps_to_levels() {
    assert_eq!(LogConfig::from_verbosity(0).level_filter, LevelFilter::WARN);
    assert_eq!(LogConfig::from_verbosity(2).level_filter, LevelFilter::DEBUG);
    assert_eq!(LogConfig::from_verbosity(9).level_filter, LevelFilter::TRACE);
}

// --- Format tests ---

#[test]
fn text_formats_omit_timestamps_by_default() {
    for format in [LogFormat::Pretty, LogFormat::Compact] {
        let output = capture(&info_config(format));
        assert!(output.contains("venue tallied"), "{format:?}: {output}");
        assert!(!output.contains("below the configured level"));
        assert!(output.trim_start().starts_with("INFO"), "{format:?}: {output}");
    }
}

#[test]
fn text_formats_lead_with_timestamps_when_enabled() {
    for format in [LogFormat::Pretty, LogFormat::Compact] {
        let output = capture(&info_config(format).with_timestamps(true));
        assert!(
            output.starts_with(|c: char| c.is_ascii_digit()),
            "{format:?}: {output}"
        );
        assert!(output.contains("venue tallied"));
    }
}

#[test]
fn json_lines_carry_level_message_and_timestamp() {
    let output = capture(&info_config(LogFormat::Json));
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "INFO");
    assert_eq!(lines[0]["fields"]["message"], "venue tallied");
    assert_eq!(lines[0]["fields"]["venue"], "AKC");
    assert!(lines[0].get("timestamp").is_some());
}
