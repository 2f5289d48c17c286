use notelog_core::{init_logging, logging_status, LoggingError};

#[test]
fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
    let log_dir = tempfile::tempdir().expect("create temp log dir");
    let second_dir = tempfile::tempdir().expect("create second temp dir");
    let log_dir_str = log_dir.path().to_str().expect("utf-8 temp dir").to_string();
    let second_dir_str = second_dir
        .path()
        .to_str()
        .expect("utf-8 temp dir")
        .to_string();

    init_logging("info", &log_dir_str).expect("first init should succeed");
    init_logging("INFO", &log_dir_str).expect("same config should be idempotent");

    let level_error = init_logging("debug", &log_dir_str).expect_err("level conflict");
    assert!(matches!(level_error, LoggingError::Conflict { .. }));
    assert!(level_error.to_string().contains("refusing to switch"));

    let dir_error = init_logging("info", &second_dir_str).expect_err("directory conflict");
    assert!(matches!(dir_error, LoggingError::Conflict { .. }));

    let active = logging_status().expect("logging should be active");
    assert_eq!(active.level(), "info");
    assert_eq!(active.log_dir(), log_dir.path());
}
