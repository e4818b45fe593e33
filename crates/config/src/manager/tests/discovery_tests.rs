//! Tests for env file discovery, resolution policies and merging.

use std::path::PathBuf;

use super::{dotenv, options_for};
use crate::error::EnvError;
use crate::fs::MemoryFilesystem;
use crate::logging::recording::RecordingLogger;
use crate::manager::{EnvFile, EnvironmentManager, FileResolution};
use crate::schema::SchemaDefinition;
use crate::value::EnvValue;

#[test]
fn test_default_reads_dotenv_in_root() {
    let logger = RecordingLogger::default();
    let env = EnvironmentManager::get_instance(options_for(dotenv("A=1\n"), &logger)).unwrap();

    assert_eq!(env.get("A"), Some(&EnvValue::from("1")));
    assert_eq!(env.loaded_files(), &[PathBuf::from("/app/.env")]);
}

#[test]
fn test_merge_all_later_files_win() {
    let logger = RecordingLogger::default();
    let fs = MemoryFilesystem::new()
        .with_file("/app/a.env", "KEY=1\nONLY_A=a\n")
        .with_file("/app/b.env", "KEY=2\nONLY_B=b\n");
    let options = options_for(fs, &logger).with_env_file(["a.env", "b.env"]);

    let env = EnvironmentManager::get_instance(options).unwrap();

    assert_eq!(env.get("KEY"), Some(&EnvValue::from("2")));
    assert_eq!(env.get("ONLY_A"), Some(&EnvValue::from("a")));
    assert_eq!(env.get("ONLY_B"), Some(&EnvValue::from("b")));
    assert_eq!(
        env.loaded_files(),
        &[PathBuf::from("/app/a.env"), PathBuf::from("/app/b.env")]
    );
}

#[test]
fn test_merge_all_logs_missing_candidates() {
    let logger = RecordingLogger::default();
    let fs = MemoryFilesystem::new().with_file("/app/b.env", "KEY=2\n");
    let options = options_for(fs, &logger).with_env_file(["a.env", "b.env"]);

    let env = EnvironmentManager::get_instance(options).unwrap();

    assert_eq!(env.get("KEY"), Some(&EnvValue::from("2")));
    assert!(logger.contains("Environment file not found: /app/a.env"));
}

#[test]
fn test_first_found_reads_only_first_existing() {
    let logger = RecordingLogger::default();
    let fs = MemoryFilesystem::new()
        .with_file("/app/.env.production", "KEY=prod\n")
        .with_file("/app/.env", "KEY=base\nBASE_ONLY=1\n");
    let options = options_for(fs, &logger)
        .with_env_file([".env.local", ".env.production", ".env"])
        .with_resolution(FileResolution::FirstFound);

    let env = EnvironmentManager::get_instance(options).unwrap();

    assert_eq!(env.get("KEY"), Some(&EnvValue::from("prod")));
    assert_eq!(env.get("BASE_ONLY"), None);
    assert!(logger.contains("Trying next environment file..."));
}

#[test]
fn test_absolute_env_file_ignores_root() {
    let logger = RecordingLogger::default();
    let fs = MemoryFilesystem::new().with_file("/etc/app.env", "KEY=etc\n");
    let options = options_for(fs, &logger).with_env_file("/etc/app.env");

    let env = EnvironmentManager::get_instance(options).unwrap();
    assert_eq!(env.get("KEY"), Some(&EnvValue::from("etc")));
}

#[test]
fn test_schema_less_missing_file_is_empty() {
    let logger = RecordingLogger::default();
    let env =
        EnvironmentManager::get_instance(options_for(MemoryFilesystem::new(), &logger)).unwrap();

    assert!(env.all().is_empty());
    assert!(env.loaded_files().is_empty());
    assert!(logger.contains("No environment file found"));
}

#[test]
fn test_strict_missing_single_file_is_fatal() {
    let logger = RecordingLogger::default();
    let options = options_for(MemoryFilesystem::new(), &logger).with_env_file(".env.test");

    let err = EnvironmentManager::create_schema(|s| [("A", s.boolean())].into(), options)
        .unwrap_err();

    match err {
        EnvError::FileNotFound { path } => assert_eq!(path, PathBuf::from("/app/.env.test")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_strict_missing_list_is_fatal() {
    let logger = RecordingLogger::default();
    let options =
        options_for(MemoryFilesystem::new(), &logger).with_env_file(EnvFile::List(vec![
            ".env.local".into(),
            ".env".into(),
        ]));

    let err = EnvironmentManager::create_schema(|s| [("A", s.boolean())].into(), options)
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, EnvError::NoEnvFileFound { ref candidates } if candidates.len() == 2));
}

#[test]
fn test_lenient_missing_file_validates_empty_map() {
    let logger = RecordingLogger::default();
    let options = options_for(MemoryFilesystem::new(), &logger).with_strict(false);

    let env = EnvironmentManager::create_schema(
        |s| SchemaDefinition::new().field("PORT", s.number()),
        options,
    )
    .unwrap();

    assert_eq!(env.get("PORT"), None);
    assert_eq!(env.validation_failures().len(), 1);
    assert!(logger.contains("Missing required environment variable: \"PORT\""));
}

#[test]
fn test_skipped_lines_are_logged_as_errors() {
    let logger = RecordingLogger::default();
    let fs = dotenv("GOOD=1\nBAD={\"x\": }\nNOPE\n");

    let env = EnvironmentManager::get_instance(options_for(fs, &logger)).unwrap();

    assert_eq!(env.get("GOOD"), Some(&EnvValue::from("1")));
    assert_eq!(env.get("BAD"), None);
    assert!(logger.contains("error: Skipped line in /app/.env"));
    assert!(logger.contains("Failed to parse JSON in the environment file for key BAD"));
}

#[test]
fn test_logs_flag_silences_info_but_not_errors() {
    let logger = RecordingLogger::default();
    let fs = dotenv("BAD={oops}\n");
    let options = options_for(fs, &logger)
        .with_env_file([".env", ".env.local"])
        .with_logs(false);

    EnvironmentManager::get_instance(options).unwrap();

    assert!(!logger.contains("info:"));
    assert!(logger.contains("error:"));
}

#[test]
fn test_unreadable_existing_file_is_fatal() {
    use crate::fs::Filesystem;
    use std::io;
    use std::path::Path;

    struct Broken;
    impl Filesystem for Broken {
        fn exists(&self, _path: &Path) -> bool {
            true
        }
        fn read_text(&self, _path: &Path) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    let options = crate::manager::ManagerOptions::new()
        .with_root_path("/app")
        .with_filesystem(Broken)
        .with_logger(RecordingLogger::default());

    let err = EnvironmentManager::get_instance(options).unwrap_err();
    assert!(matches!(err, EnvError::Io { .. }));
}
