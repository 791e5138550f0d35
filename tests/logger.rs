//! Tests for logger construction and sink wiring.

use chrono::{DateTime, TimeZone, Utc};
use logline::{AccessData, Error, Level, Logger, Sink};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// Captures written lines for assertions.
#[derive(Default)]
struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl Sink for &'static MemorySink {
    fn write(&self, line: &str) -> Result<(), Error> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Always fails, for error propagation tests.
struct BrokenSink;

impl Sink for BrokenSink {
    fn write(&self, _line: &str) -> Result<(), Error> {
        Err(Error::Format("sink down".to_string()))
    }

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn file_sink_receives_generic_line_without_newline() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.log");

    let logger = Logger::builder()
        .file(path.to_string_lossy())
        .build()
        .unwrap();
    logger.log(noon(), Level::Info, "", "hello", &[]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2024-01-01T12:00:00 info: hello");
}

#[test]
fn file_sink_appends_access_lines_with_newline() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("access.log");

    let logger = Logger::builder()
        .file(path.to_string_lossy())
        .access_format(":remote :status")
        .build()
        .unwrap();

    let data = AccessData {
        remote_ip: "1.2.3.4".to_string(),
        status: 200,
        ..AccessData::default()
    };
    logger.access(noon(), "", &data, &[]).unwrap();
    logger.access(noon(), "", &data, &[]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "1.2.3.4 200\n1.2.3.4 200\n");
}

#[test]
fn file_sink_creates_missing_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a").join("b").join("out.log");

    let logger = Logger::builder()
        .file(path.to_string_lossy())
        .build()
        .unwrap();
    logger.exception(noon(), "", "boom", "stack", &[]).unwrap();

    assert!(path.exists());
}

#[test]
fn custom_sink_receives_rendered_lines() {
    static SINK: MemorySink = MemorySink {
        lines: Mutex::new(Vec::new()),
    };

    let logger = Logger::builder()
        .name("app")
        .sink(&SINK)
        .build()
        .unwrap();
    logger
        .stat(noon(), "", "reqs", "counter", 5.0, &[])
        .unwrap();

    let lines = SINK.lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], "2024-01-01T12:00:00 app.stat: reqs(counter)5\n");
}

#[test]
fn sink_failure_propagates_uninterpreted() {
    let logger = Logger::builder().sink(BrokenSink).build().unwrap();
    let err = logger.info("m", "data").unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn builder_rejects_json_mode_without_mapping_before_opening_sink() {
    let err = Logger::builder()
        .json(true)
        .file("/nonexistent/dir/should/not/be/created.log")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingAccessFields));
}

#[test]
fn flush_is_a_no_op_for_the_file_sink() {
    let tmp = TempDir::new().unwrap();
    let logger = Logger::builder()
        .file(tmp.path().join("f.log").to_string_lossy())
        .build()
        .unwrap();
    logger.flush().unwrap();
}
