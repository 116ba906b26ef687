//! Environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use questboard_core::ids::UserId;
use questboard_core::policy::AllowList;
use questboard_persistence::fs_snapshot_store::default_backup_path;

use crate::error::AppError;

/// Everything the host reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Snapshot file.
    pub snapshot_path: PathBuf,
    /// Copy of the previous snapshot.
    pub backup_path: PathBuf,
    /// Time between periodic snapshots.
    pub snapshot_interval: Duration,
    /// Idle time after which a create/edit session lapses; `None` never.
    pub session_timeout: Option<TimeDelta>,
    /// Participants allowed to ban and restart.
    pub admins: AllowList,
    /// Release to announce at startup, if any.
    pub release_id: Option<String>,
    /// Directory holding `patchnotes_<release>.txt` files.
    pub release_notes_dir: PathBuf,
    /// Append-only feedback log.
    pub feedback_path: PathBuf,
    /// Undelivered notifications kept per recipient.
    pub outbox_capacity: usize,
}

impl BotConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns a variable's
    /// value or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_or(var("PORT"), "PORT", 3000)?;

        let snapshot_path =
            PathBuf::from(var("QUESTBOARD_SNAPSHOT_PATH").unwrap_or_else(|| "./questboard.json".into()));
        let backup_path = var("QUESTBOARD_BACKUP_PATH")
            .map_or_else(|| default_backup_path(&snapshot_path), PathBuf::from);

        let interval_secs: u64 = parse_or(
            var("QUESTBOARD_SNAPSHOT_INTERVAL_SECS"),
            "QUESTBOARD_SNAPSHOT_INTERVAL_SECS",
            3600,
        )?;
        if interval_secs == 0 {
            return Err(AppError::Config(
                "QUESTBOARD_SNAPSHOT_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let timeout_secs: i64 = parse_or(
            var("QUESTBOARD_SESSION_TIMEOUT_SECS"),
            "QUESTBOARD_SESSION_TIMEOUT_SECS",
            1800,
        )?;
        let session_timeout = match timeout_secs {
            0 => None,
            secs => Some(TimeDelta::try_seconds(secs).filter(|d| *d > TimeDelta::zero()).ok_or_else(
                || {
                    AppError::Config(format!(
                        "QUESTBOARD_SESSION_TIMEOUT_SECS must be a non-negative number of seconds, got {secs}"
                    ))
                },
            )?),
        };

        let admins = var("QUESTBOARD_ADMINS")
            .map(|raw| parse_admins(&raw))
            .transpose()?
            .unwrap_or_default();

        let outbox_capacity: usize =
            parse_or(var("QUESTBOARD_OUTBOX_CAPACITY"), "QUESTBOARD_OUTBOX_CAPACITY", 256)?;
        if outbox_capacity == 0 {
            return Err(AppError::Config(
                "QUESTBOARD_OUTBOX_CAPACITY must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            snapshot_path,
            backup_path,
            snapshot_interval: Duration::from_secs(interval_secs),
            session_timeout,
            admins,
            release_id: var("QUESTBOARD_RELEASE_ID").map(|id| id.trim().to_string()),
            release_notes_dir: PathBuf::from(
                var("QUESTBOARD_RELEASE_NOTES_DIR").unwrap_or_else(|| "./release_notes".into()),
            ),
            feedback_path: PathBuf::from(
                var("QUESTBOARD_FEEDBACK_PATH").unwrap_or_else(|| "./feedback.txt".into()),
            ),
            outbox_capacity,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
    })
}

fn parse_admins(raw: &str) -> Result<AllowList, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<UserId>()
                .map_err(|e| AppError::Config(format!("QUESTBOARD_ADMINS entry {id:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AllowList::new)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use questboard_core::policy::AdminPolicy;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.snapshot_path, PathBuf::from("./questboard.json"));
        assert_eq!(config.backup_path, PathBuf::from("./questboard.json.bak"));
        assert_eq!(config.snapshot_interval, Duration::from_secs(3600));
        assert_eq!(config.session_timeout, Some(TimeDelta::minutes(30)));
        assert!(config.admins.is_empty());
        assert_eq!(config.release_id, None);
        assert_eq!(config.release_notes_dir, PathBuf::from("./release_notes"));
        assert_eq!(config.feedback_path, PathBuf::from("./feedback.txt"));
        assert_eq!(config.outbox_capacity, 256);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("QUESTBOARD_SNAPSHOT_PATH", "/data/board.json"),
            ("QUESTBOARD_SESSION_TIMEOUT_SECS", "0"),
            ("QUESTBOARD_ADMINS", "539621524, -7"),
            ("QUESTBOARD_RELEASE_ID", "04262020"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.backup_path, PathBuf::from("/data/board.json.bak"));
        assert_eq!(config.session_timeout, None);
        assert_eq!(config.admins.len(), 2);
        assert!(config.admins.is_admin(UserId(539_621_524)));
        assert!(config.admins.is_admin(UserId(-7)));
        assert_eq!(config.release_id.as_deref(), Some("04262020"));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for pairs in [
            [("PORT", "seventy")],
            [("QUESTBOARD_SNAPSHOT_INTERVAL_SECS", "0")],
            [("QUESTBOARD_SESSION_TIMEOUT_SECS", "-5")],
            [("QUESTBOARD_ADMINS", "1,bob")],
            [("QUESTBOARD_OUTBOX_CAPACITY", "0")],
        ] {
            let result = config_from(&pairs);

            assert!(matches!(result, Err(AppError::Config(_))), "{pairs:?}");
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = config_from(&[("HOST", "127.0.0.1"), ("PORT", "4000")]).unwrap();

        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:4000".parse().unwrap());
    }
}
