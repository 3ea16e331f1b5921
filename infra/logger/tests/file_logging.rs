use ecinv_logger::{LevelFilter, Logger, LoggerError};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

// One process, one global subscriber: both checks live in a single test.
#[test]
fn test_json_file_logging_then_second_init_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("ecinv-file-logging")
        .console(false)
        .directory(&log_dir)
        .json(true)
        .level(LevelFilter::INFO)
        .directive("ecinv::diagnostics=debug")
        .init()?;

    assert!(logger.writes_files());

    tracing::info!(invoice_no = "AB12345678", "hello from integration test");
    tracing::debug!(target: "ecinv::diagnostics", sealed = "abc=", "diagnostic event");

    let err = Logger::builder().name("ecinv-second").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber { .. }));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .ok_or("log file should be created")?;

    let contents = fs::read_to_string(log_file)?;

    assert!(contents.contains("AB12345678"));
    assert!(contents.contains("diagnostic event"));
    assert!(contents.lines().all(|line| line.trim_start().starts_with('{')));

    Ok(())
}
