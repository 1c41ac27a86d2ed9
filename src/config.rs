use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the ledger keeps its data.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) upload_dir: PathBuf,
}

impl Config {
    /// Use the given paths, falling back to the platform data directory,
    /// and make sure the directories exist.
    pub(crate) fn resolve(db_path: Option<PathBuf>, upload_dir: Option<PathBuf>) -> Result<Self> {
        let (db_path, upload_dir) = match (db_path, upload_dir) {
            (Some(db), Some(uploads)) => (db, uploads),
            (db, uploads) => {
                let data_dir = default_data_dir()?;
                (
                    db.unwrap_or_else(|| data_dir.join("ledger.db")),
                    uploads.unwrap_or_else(|| data_dir.join("uploads")),
                )
            }
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }
        create_dir(&upload_dir)?;

        tracing::debug!(
            "Using database {} and upload directory {}",
            db_path.display(),
            upload_dir.display()
        );
        Ok(Self { db_path, upload_dir })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledger", "Ledger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}
