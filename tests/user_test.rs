use anyhow::Result;
use lifu_records::{JsonEncoder, JsonRecord, Mapping, RecordError, User};
use serde_json::{json, Value};
use tempfile::TempDir;

fn mapping(value: Value) -> Mapping {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

fn sample_user() -> User {
    User::new("operator1")
        .with_name("Jane Operator")
        .with_description("Clinical site operator")
        .with_password_hash("$2b$12$KIXQJ1b0q5nQ9")
        .with_roles(["operator", "viewer"])
}

#[test]
fn test_mapping_round_trip() {
    let original = mapping(json!({
        "id": "admin",
        "password_hash": "abc123",
        "roles": ["admin"],
        "name": "Administrator",
        "description": "Full access"
    }));

    let user = User::from_mapping(original.clone()).unwrap();
    assert_eq!(user.to_mapping(), original);
}

#[test]
fn test_mapping_round_trip_with_nulls() {
    let original = mapping(json!({
        "id": "guest",
        "password_hash": null,
        "roles": null,
        "name": "Guest",
        "description": ""
    }));

    let user = User::from_mapping(original.clone()).unwrap();
    assert_eq!(user.password_hash, None);
    assert_eq!(user.roles, None);
    assert_eq!(user.to_mapping(), original);
}

#[test]
fn test_json_round_trip_both_forms() -> Result<()> {
    for user in [sample_user(), User::default()] {
        for compact in [true, false] {
            let json = user.to_json(compact)?;
            assert_eq!(User::from_json(&json)?, user);
        }
    }
    Ok(())
}

#[test]
fn test_null_fields_serialize_as_literal_null() -> Result<()> {
    let json = User::default().to_json(true)?;
    assert!(json.contains(r#""password_hash":null"#));
    assert!(json.contains(r#""roles":null"#));

    let parsed = User::from_json(&json)?;
    assert!(parsed.password_hash.is_none());
    assert!(parsed.roles.is_none());
    Ok(())
}

#[test]
fn test_compact_has_no_whitespace() -> Result<()> {
    let json = sample_user().to_json(true)?;
    assert!(!json.contains('\n'));
    assert!(!json.contains(", "));
    assert!(!json.contains(": "));
    Ok(())
}

#[test]
fn test_pretty_is_indented() -> Result<()> {
    let json = sample_user().to_json(false)?;
    let lines: Vec<&str> = json.lines().collect();

    assert_eq!(lines[0], "{");
    assert_eq!(lines[1], r#"    "id": "operator1","#);
    assert_eq!(lines[2], r#"    "password_hash": "$2b$12$KIXQJ1b0q5nQ9","#);
    assert_eq!(lines[3], r#"    "roles": ["#);
    assert_eq!(lines[4], r#"        "operator","#);
    assert_eq!(lines.last(), Some(&"}"));
    Ok(())
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = User::from_json("{\"id\": \"a\",,}").unwrap_err();
    assert!(matches!(err, RecordError::ParseError(_)));
}

#[test]
fn test_well_formed_but_invalid_is_schema_error() {
    let err = User::from_json(r#"{"id": "a", "is_admin": true}"#).unwrap_err();
    assert!(matches!(err, RecordError::SchemaError { .. }));

    let err = User::from_json(r#"{"id": 7}"#).unwrap_err();
    assert!(matches!(err, RecordError::SchemaError { .. }));

    let err = User::from_json(r#""operator""#).unwrap_err();
    assert!(matches!(err, RecordError::SchemaError { .. }));
}

#[test]
fn test_file_round_trip_creates_two_levels() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("a").join("b").join("user.json");

    let user = sample_user();
    user.to_file(&path)?;

    assert!(temp_dir.path().join("a").is_dir());
    assert!(temp_dir.path().join("a").join("b").is_dir());
    assert_eq!(User::from_file(&path)?, user);

    let on_disk = std::fs::read_to_string(&path)?;
    assert_eq!(on_disk, user.to_json(false)?);
    Ok(())
}

#[test]
fn test_storage_path_layout_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let users_dir = temp_dir.path().join("users");

    let user = sample_user();
    let path = user.storage_path(&users_dir);
    user.to_file(&path)?;

    assert!(users_dir.join("operator1").join("operator1.json").is_file());
    assert_eq!(User::from_file(&path)?, user);
    Ok(())
}

#[test]
fn test_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let err = User::from_file(temp_dir.path().join("nobody.json")).unwrap_err();
    assert!(matches!(err, RecordError::NotFoundError { .. }));
}

#[test]
fn test_corrupt_file_is_parse_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("user.json");
    std::fs::write(&path, "not json")?;

    let err = User::from_file(&path).unwrap_err();
    assert!(matches!(err, RecordError::ParseError(_)));
    Ok(())
}

struct RedactCredentials;

impl JsonEncoder for RedactCredentials {
    fn encode(&self, mut value: Value) -> lifu_records::Result<Value> {
        if let Some(hash) = value.get_mut("password_hash") {
            if !hash.is_null() {
                *hash = Value::String("<redacted>".to_string());
            }
        }
        Ok(value)
    }
}

#[test]
fn test_custom_encoder_hook() -> Result<()> {
    let json = sample_user().to_json_with(true, &RedactCredentials)?;
    assert!(json.contains(r#""password_hash":"<redacted>""#));
    assert!(!json.contains("KIXQJ1b0q5nQ9"));

    let json = User::default().to_json_with(true, &RedactCredentials)?;
    assert!(json.contains(r#""password_hash":null"#));
    Ok(())
}
