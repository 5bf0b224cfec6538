use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crawlmark_core::DEFAULT_FILE;

/// Project configuration from crawlmark.toml
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckpointConfig {
    /// Path for the JSON checkpoint file backend.
    pub file: Option<PathBuf>,
    /// Path for the SQLite checkpoint database backend.
    pub db: Option<PathBuf>,
}

/// Which backend a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Db(PathBuf),
}

impl ProjectConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Resolve the target backend. Command-line flags win over the config
    /// file; with neither, the conventional JSON file path is used.
    pub fn resolve_target(&self, file: Option<PathBuf>, db: Option<PathBuf>) -> Result<Target> {
        if file.is_some() && db.is_some() {
            anyhow::bail!("pass either --file or --db, not both");
        }

        if let Some(path) = db {
            return Ok(Target::Db(path));
        }
        if let Some(path) = file {
            return Ok(Target::File(path));
        }

        match (&self.checkpoint.file, &self.checkpoint.db) {
            (Some(_), Some(_)) => {
                anyhow::bail!("crawlmark.toml sets both checkpoint.file and checkpoint.db; pick one or use --file/--db")
            }
            (None, Some(path)) => Ok(Target::Db(path.clone())),
            (Some(path), None) => Ok(Target::File(path.clone())),
            (None, None) => Ok(Target::File(PathBuf::from(DEFAULT_FILE))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = ProjectConfig::load(Path::new("does-not-exist.toml")).unwrap();
        let target = config.resolve_target(None, None).unwrap();
        assert_eq!(target, Target::File(PathBuf::from(DEFAULT_FILE)));
    }

    #[test]
    fn test_flags_win_over_config() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [checkpoint]
            file = "from-config.txt"
            "#,
        )
        .unwrap();

        let target = config
            .resolve_target(None, Some(PathBuf::from("jobs.db")))
            .unwrap();
        assert_eq!(target, Target::Db(PathBuf::from("jobs.db")));
    }

    #[test]
    fn test_config_db_backend() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [checkpoint]
            db = "state/checkpoint.db"
            "#,
        )
        .unwrap();

        let target = config.resolve_target(None, None).unwrap();
        assert_eq!(target, Target::Db(PathBuf::from("state/checkpoint.db")));
    }

    #[test]
    fn test_both_flags_rejected() {
        let config = ProjectConfig::default();
        assert!(config
            .resolve_target(
                Some(PathBuf::from("a.txt")),
                Some(PathBuf::from("b.db"))
            )
            .is_err());
    }
}
