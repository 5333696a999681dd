use super::{Settings, SettingsError, ENVIRONMENT_SEPARATOR};

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use config::{Environment, Map};
use tempfile::TempDir;

use crate::engine::{DEFAULT_CHUNK_SIZE, DEFAULT_SKIP_LIMIT};

fn environment(variables: &[(&str, &str)]) -> Environment {
    let source: Map<String, String> = variables.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Environment::default()
        .separator(ENVIRONMENT_SEPARATOR)
        .source(Some(source))
}

fn required_directories() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TRANSACTION__INPUT__DIR", "/data/input"),
        ("TRANSACTION__COMPLETED__DIR", "/data/completed"),
        ("TRANSACTION__ERROR__DIR", "/data/error"),
    ]
}

#[test]
fn test_environment_provides_directories_and_defaults() -> Result<()> {
    let directory = TempDir::new()?;
    let empty_file = directory.path().join("application.toml");
    fs::write(&empty_file, "")?;

    let settings = Settings::from_sources(Some(&empty_file), environment(&required_directories()))?;

    assert_eq!(settings.transaction.input.dir, PathBuf::from("/data/input"));
    assert_eq!(settings.transaction.completed.dir, PathBuf::from("/data/completed"));
    assert_eq!(settings.transaction.error.dir, PathBuf::from("/data/error"));
    assert_eq!(settings.transaction.chunk.size, DEFAULT_CHUNK_SIZE);
    assert_eq!(settings.skip_limit(), DEFAULT_SKIP_LIMIT);
    assert_eq!(settings.database.url, None);

    Ok(())
}

#[test]
fn test_file_settings_are_overridden_by_environment() -> Result<()> {
    let directory = TempDir::new()?;
    let file = directory.path().join("application.toml");

    fs::write(&file, r#"
[transaction]
input.dir = "/file/input"
completed.dir = "/file/completed"
error.dir = "/file/error"
chunk.size = 25
skip.limit = 3

[database]
url = "postgres://localhost/transactions"
"#)?;

    let settings = Settings::from_sources(Some(&file), environment(&[("TRANSACTION__INPUT__DIR", "/env/input")]))?;

    assert_eq!(settings.transaction.input.dir, PathBuf::from("/env/input"));
    assert_eq!(settings.transaction.error.dir, PathBuf::from("/file/error"));
    assert_eq!(settings.transaction.chunk.size, 25);
    assert_eq!(settings.skip_limit(), 3);
    assert_eq!(settings.database.url.as_deref(), Some("postgres://localhost/transactions"));
    assert_eq!(settings.database.max_connections, 5);

    Ok(())
}

#[test]
fn test_missing_directory_is_rejected() -> Result<()> {
    let directory = TempDir::new()?;
    let file = directory.path().join("application.toml");
    fs::write(&file, "")?;

    let result = Settings::from_sources(Some(&file), environment(&[
        ("TRANSACTION__INPUT__DIR", "/data/input"),
        ("TRANSACTION__COMPLETED__DIR", "/data/completed"),
    ]));

    assert!(matches!(result, Err(SettingsError::Load(_))));

    Ok(())
}

#[test]
fn test_zero_chunk_size_is_rejected() -> Result<()> {
    let directory = TempDir::new()?;
    let file = directory.path().join("application.toml");
    fs::write(&file, "")?;

    let mut variables = required_directories();
    variables.push(("TRANSACTION__CHUNK__SIZE", "0"));

    let result = Settings::from_sources(Some(&file), environment(&variables));

    assert!(matches!(result, Err(SettingsError::Invalid(_))));

    Ok(())
}
