//! Tests for strict and lenient validation at construction.

use super::{dotenv, options_for};
use crate::error::EnvError;
use crate::logging::recording::RecordingLogger;
use crate::manager::EnvironmentManager;
use crate::parser::RawKind;
use crate::schema::{SchemaDefinition, StringFormat, ValidationIssue};
use crate::value::EnvValue;

#[test]
fn test_strict_valid_schema_coerces_fields() {
    let logger = RecordingLogger::default();
    let fs = dotenv("BOOLEAN=true\nNUMBER=123\nFOO=bar\n");

    let env = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("BOOLEAN", s.boolean())
                .field("NUMBER", s.number())
                .field("FOO", s.string())
        },
        options_for(fs, &logger),
    )
    .unwrap();

    assert_eq!(env.get("BOOLEAN"), Some(&EnvValue::Boolean(true)));
    assert_eq!(env.get("NUMBER"), Some(&EnvValue::Integer(123)));
    assert_eq!(env.get("FOO"), Some(&EnvValue::from("bar")));
    assert!(env.validation_failures().is_empty());
}

#[test]
fn test_strict_first_failure_in_schema_order_aborts() {
    let logger = RecordingLogger::default();
    let fs = dotenv("PORT=abc\n");

    let err = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("HOST", s.string())
                .field("PORT", s.number())
        },
        options_for(fs, &logger),
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Missing required environment variable: \"HOST\""
    );
}

#[test]
fn test_strict_wrong_type_names_key_value_and_expectation() {
    let logger = RecordingLogger::default();
    let fs = dotenv("PORT=5\n");

    let err = EnvironmentManager::create_schema(
        |s| SchemaDefinition::new().field("PORT", s.number().min(10.0).max(100.0)),
        options_for(fs, &logger),
    )
    .unwrap_err();

    match err {
        EnvError::WrongType {
            key,
            value,
            expected,
            found,
        } => {
            assert_eq!(key, "PORT");
            assert_eq!(value, "5");
            assert_eq!(expected, "number (min: 10, max: 100)");
            assert_eq!(found, "number");
        }
        other => panic!("expected WrongType, got {other:?}"),
    }
}

#[test]
fn test_lenient_leaves_failed_fields_unset_and_logs() {
    let logger = RecordingLogger::default();
    let fs = dotenv("EMAIL=test@example.com\nINVALID_EMAIL=notanemail\n");

    let env = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("EMAIL", s.string().format(StringFormat::Email))
                .field("INVALID_EMAIL", s.string().format(StringFormat::Email))
        },
        options_for(fs, &logger).with_strict(false),
    )
    .unwrap();

    assert_eq!(env.get("EMAIL"), Some(&EnvValue::from("test@example.com")));
    assert_eq!(env.get("INVALID_EMAIL"), None);
    assert_eq!(
        env.get_or("INVALID_EMAIL", "fallback@example.com"),
        EnvValue::from("fallback@example.com")
    );

    let failures = env.validation_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].key, "INVALID_EMAIL");
    assert!(matches!(failures[0].issue, ValidationIssue::WrongType { .. }));
    assert!(logger.contains(
        "INVALID_EMAIL Expected type email, \"notanemail\" is of type string"
    ));

    // The raw value is still reachable
    assert_eq!(env.raw("INVALID_EMAIL").unwrap().text(), "notanemail");
}

#[test]
fn test_lenient_without_logs_is_silent() {
    let logger = RecordingLogger::default();
    let fs = dotenv("");

    let env = EnvironmentManager::create_schema(
        |s| SchemaDefinition::new().field("REQUIRED", s.string()),
        options_for(fs, &logger).with_strict(false).with_logs(false),
    )
    .unwrap();

    assert_eq!(env.validation_failures().len(), 1);
    assert!(logger.lines().is_empty());
}

#[test]
fn test_optional_and_empty_values() {
    let logger = RecordingLogger::default();
    let fs = dotenv("EMPTY=\nQUOTED_EMPTY=\"\"\n");

    let env = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("EMPTY", s.string().optional())
                .field("QUOTED_EMPTY", s.string().optional())
                .field("ABSENT", s.number().optional())
        },
        options_for(fs, &logger),
    )
    .unwrap();

    assert_eq!(env.get("EMPTY"), None);
    assert_eq!(env.get("QUOTED_EMPTY"), None);
    assert_eq!(env.get("ABSENT"), None);
    assert!(!env.all().contains_key("ABSENT"));
}

#[test]
fn test_required_empty_value_is_missing() {
    let logger = RecordingLogger::default();

    let err = EnvironmentManager::create_schema(
        |s| SchemaDefinition::new().field("EMPTY", s.string()),
        options_for(dotenv("EMPTY=\n"), &logger),
    )
    .unwrap_err();

    assert!(matches!(err, EnvError::MissingRequired { key } if key == "EMPTY"));
}

#[test]
fn test_unknown_keys_keep_their_coercion() {
    let logger = RecordingLogger::default();
    let fs = dotenv("PORT=8080\nFLAG=true\nLIST=[a, b]\nNAME=\"true\"\n");

    let env = EnvironmentManager::create_schema(
        |s| SchemaDefinition::new().field("PORT", s.number()),
        options_for(fs, &logger),
    )
    .unwrap();

    assert_eq!(env.get("PORT"), Some(&EnvValue::Integer(8080)));
    assert_eq!(env.get("FLAG"), Some(&EnvValue::Boolean(true)));
    assert_eq!(env.get("LIST"), Some(&EnvValue::from(vec!["a", "b"])));
    assert_eq!(env.get("NAME"), Some(&EnvValue::from("true")));
}

#[test]
fn test_array_and_custom_fields() {
    let logger = RecordingLogger::default();
    let fs = dotenv("HOSTS=a.example.com, b.example.com\nTAGS=[x, 'y z']\nCUSTOM=12\n");

    let env = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("HOSTS", s.array())
                .field("TAGS", s.array())
                .field(
                    "CUSTOM",
                    s.custom(|raw| raw.parse::<i64>().map(|n| n / 2).unwrap_or_default()),
                )
        },
        options_for(fs, &logger),
    )
    .unwrap();

    assert_eq!(
        env.get_typed::<Vec<String>>("HOSTS"),
        Some(vec!["a.example.com".to_string(), "b.example.com".to_string()])
    );
    assert_eq!(env.get("TAGS"), Some(&EnvValue::from(vec!["x", "y z"])));
    assert!(matches!(env.raw("TAGS").unwrap().kind(), RawKind::List(_)));
    assert_eq!(env.get_typed::<i64>("CUSTOM"), Some(6));
}

#[test]
fn test_quoted_values_validate_on_their_contents() {
    let logger = RecordingLogger::default();
    let fs = dotenv("QUOTED_NUMBER=\"42\"\nQUOTED_BOOL='TRUE'\n");

    let env = EnvironmentManager::create_schema(
        |s| {
            SchemaDefinition::new()
                .field("QUOTED_NUMBER", s.number())
                .field("QUOTED_BOOL", s.boolean())
        },
        options_for(fs, &logger),
    )
    .unwrap();

    assert_eq!(env.get_typed::<i64>("QUOTED_NUMBER"), Some(42));
    assert_eq!(env.get_typed::<bool>("QUOTED_BOOL"), Some(true));
}
