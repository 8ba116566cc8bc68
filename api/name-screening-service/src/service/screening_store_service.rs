use crate::module::name_screening::model::{
    ConsolidatedView, ScreeningSubject, ScreeningViews, WatchlistEntry,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON array")]
    NotAnArray { path: String },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Per-request file locations under the data root.
#[derive(Debug, Clone)]
pub struct RequestPaths {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub detailed_path: PathBuf,
    pub consolidated_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ScreeningStore {
    data_root: PathBuf,
    watchlist_path: PathBuf,
}

impl ScreeningStore {
    pub fn new(data_root: impl Into<PathBuf>, watchlist_path: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            watchlist_path: watchlist_path.into(),
        }
    }

    pub fn watchlist_path(&self) -> &Path {
        &self.watchlist_path
    }

    pub fn request_paths(&self, user_id: &str, request_id: &str) -> Result<RequestPaths, StoreError> {
        ensure_single_segment(user_id)?;
        ensure_single_segment(request_id)?;

        let request_dir = self.data_root.join(user_id).join(request_id);
        let output_dir = request_dir.join("output");
        Ok(RequestPaths {
            input_path: request_dir.join("input").join("input.json"),
            detailed_path: output_dir.join("detailed.json"),
            consolidated_path: output_dir.join("consolidated.json"),
            output_dir,
        })
    }

    pub async fn exists(path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    pub async fn load_subject(&self, paths: &RequestPaths) -> Result<ScreeningSubject, StoreError> {
        read_json(&paths.input_path).await
    }

    pub async fn load_watchlist(&self) -> Result<Vec<WatchlistEntry>, StoreError> {
        let value: Value = read_json(&self.watchlist_path).await?;
        if !value.is_array() {
            return Err(StoreError::NotAnArray {
                path: display(&self.watchlist_path),
            });
        }
        serde_json::from_value(value).map_err(|source| StoreError::Parse {
            path: display(&self.watchlist_path),
            source,
        })
    }

    pub async fn load_consolidated(&self, paths: &RequestPaths) -> Result<ConsolidatedView, StoreError> {
        read_json(&paths.consolidated_path).await
    }

    pub async fn write_outputs(&self, paths: &RequestPaths, views: &ScreeningViews) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&paths.output_dir)
            .await
            .map_err(|source| StoreError::Write {
                path: display(&paths.output_dir),
                source,
            })?;
        write_json(&paths.detailed_path, &views.detailed).await?;
        write_json(&paths.consolidated_path, &views.consolidated).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: display(path),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: display(path),
        source,
    })
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, payload)
        .await
        .map_err(|source| StoreError::Write {
            path: display(path),
            source,
        })
}

fn ensure_single_segment(segment: &str) -> Result<(), StoreError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == segment => Ok(()),
        _ => Err(StoreError::InvalidPathSegment(segment.to_string())),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
