//! One-time startup sequence that gets durable storage ready before serving.

use crate::config::DatabaseConfig;
use crate::db::schema;
use crate::db::sqlite::{HubStorage, connect};
use crate::error::HubError;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseState {
    /// No database file at the configured path.
    Uninitialized,
    /// The file exists, either pre-existing or just created.
    Initialized,
}

impl DatabaseState {
    pub fn detect(path: &Path) -> Self {
        if path.exists() {
            DatabaseState::Initialized
        } else {
            DatabaseState::Uninitialized
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    Existing,
}

/// Open storage, applying the schema script when the database file is new.
///
/// A failed schema load on a fresh database removes the half-created file so
/// the next start runs the bootstrap again.
pub async fn ensure_database(
    cfg: &DatabaseConfig,
) -> Result<(HubStorage, BootstrapOutcome), HubError> {
    match DatabaseState::detect(&cfg.path) {
        DatabaseState::Initialized => {
            let storage = HubStorage::new(connect(cfg).await?);
            debug!(path = %cfg.path.display(), "using existing database");
            Ok((storage, BootstrapOutcome::Existing))
        }
        DatabaseState::Uninitialized => {
            let script = schema::read_script(&cfg.schema_path)?;
            let storage = HubStorage::new(connect(cfg).await?);
            if let Err(e) = storage.init_schema(&script).await {
                storage.close().await;
                discard_database_files(&cfg.path);
                return Err(e);
            }
            info!(
                path = %cfg.path.display(),
                schema = %cfg.schema_path.display(),
                "database not found, created new database"
            );
            Ok((storage, BootstrapOutcome::Created))
        }
    }
}

/// Re-apply the schema script to an open database.
pub async fn apply_schema(storage: &HubStorage, schema_path: &Path) -> Result<(), HubError> {
    let script = schema::read_script(schema_path)?;
    storage.init_schema(&script).await
}

fn discard_database_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        let file = PathBuf::from(name);
        if let Err(e) = fs::remove_file(&file)
            && e.kind() != ErrorKind::NotFound
        {
            warn!(path = %file.display(), error = %e, "failed to remove partial database file");
        }
    }
}

/// Directory to run from: the parent of `cwd` unless `cwd` is already named
/// `project_dir`.
pub fn resolve_project_dir(cwd: &Path, project_dir: &str) -> PathBuf {
    match cwd.file_name() {
        Some(name) if name == OsStr::new(project_dir) => cwd.to_path_buf(),
        _ => cwd
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf()),
    }
}

/// Move into the project root when `basic.project_dir` is configured.
pub fn enter_project_dir(project_dir: Option<&str>) -> Result<(), HubError> {
    let Some(project_dir) = project_dir else {
        return Ok(());
    };
    let cwd = env::current_dir()?;
    let target = resolve_project_dir(&cwd, project_dir);
    if target != cwd {
        info!(
            from = %cwd.display(),
            to = %target.display(),
            project_dir,
            "changing working directory to project root"
        );
        env::set_current_dir(&target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_when_already_in_project_dir() {
        let cwd = Path::new("/srv/chargehub");
        assert_eq!(resolve_project_dir(cwd, "chargehub"), PathBuf::from("/srv/chargehub"));
    }

    #[test]
    fn moves_to_parent_from_subdirectory() {
        let cwd = Path::new("/srv/chargehub/docs");
        assert_eq!(resolve_project_dir(cwd, "chargehub"), PathBuf::from("/srv/chargehub"));
    }

    #[test]
    fn filesystem_root_has_nowhere_to_go() {
        let cwd = Path::new("/");
        assert_eq!(resolve_project_dir(cwd, "chargehub"), PathBuf::from("/"));
    }

    #[test]
    fn missing_file_is_uninitialized() {
        let path = env::temp_dir().join("chargehub-definitely-missing.db");
        assert_eq!(DatabaseState::detect(&path), DatabaseState::Uninitialized);
    }
}
