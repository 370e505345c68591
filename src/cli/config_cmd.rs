//! Config command handler

use std::path::Path;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Validate `value` and store it under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "base_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value cannot be empty".to_string()));
            }
            if !Path::new(value).is_absolute() {
                return Err(invalid("Value must be an absolute path".to_string()));
            }
            config.base_dir = Some(value.to_string());
        }
        "poll_interval_ms" => {
            let ms = value
                .parse::<u64>()
                .ok()
                .filter(|ms| (MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(ms))
                .ok_or_else(|| {
                    invalid(format!(
                        "Value must be a number between {} and {}",
                        MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS
                    ))
                })?;
            config.poll_interval_ms = Some(ms);
        }
        "auto_commit" => {
            let enabled = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.auto_commit = Some(enabled);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "base_dir" => config.base_dir.clone(),
        "poll_interval_ms" => config.poll_interval_ms.map(|ms| ms.to_string()),
        "auto_commit" => config.auto_commit.map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn apply_poll_interval() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "poll_interval_ms", "250").unwrap();
        assert_eq!(config.poll_interval_ms, Some(250));

        assert!(apply_value(&mut config, "poll_interval_ms", "10").is_err());
        assert!(apply_value(&mut config, "poll_interval_ms", "fast").is_err());
        assert_eq!(config.poll_interval_ms, Some(250));
    }

    #[test]
    fn apply_auto_commit() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "auto_commit", "no").unwrap();
        assert_eq!(config.auto_commit, Some(false));
        assert!(apply_value(&mut config, "auto_commit", "sometimes").is_err());
    }

    #[test]
    fn apply_base_dir_requires_absolute_path() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "base_dir", "relative/dir").is_err());
        assert!(apply_value(&mut config, "base_dir", " ").is_err());

        let absolute = std::env::temp_dir().join("deck");
        let absolute = absolute.to_string_lossy();
        apply_value(&mut config, "base_dir", &absolute).unwrap();
        assert_eq!(read_value(&config, "base_dir").as_deref(), Some(&*absolute));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = check_key("api_key").unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[tokio::test]
    async fn set_then_get_through_store() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "auto_commit".to_string(),
                value: "false".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.auto_commit, Some(false));
        assert!(config.poll_interval_ms.is_none());
    }

    #[tokio::test]
    async fn invalid_set_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_config_command(
            ConfigAction::Set {
                key: "poll_interval_ms".to_string(),
                value: "0".to_string(),
            },
            &store,
            &presenter,
        )
        .await;

        assert!(result.is_err());
        assert!(!store.exists());
    }
}
