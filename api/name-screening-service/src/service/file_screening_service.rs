use super::screening_service::screen;
use super::screening_store_service::StoreError;
use crate::module::name_screening::model::{ScreeningSubject, ScreeningViews, WatchlistEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs and output location for one offline screening run.
#[derive(Debug, Clone)]
pub struct FileScreeningJob {
    pub input_path: PathBuf,
    pub watchlist_path: PathBuf,
    pub output_dir: PathBuf,
    pub request_id: String,
}

/// Screens `input_path` against `watchlist_path` and writes `detailed.json`
/// and `consolidated.json` into `output_dir`.
pub fn screen_files(job: &FileScreeningJob) -> Result<ScreeningViews, StoreError> {
    let subject: ScreeningSubject = read_json(&job.input_path)?;
    let watchlist = read_watchlist(&job.watchlist_path)?;
    let views = screen(&subject, &job.request_id, &watchlist);

    fs::create_dir_all(&job.output_dir).map_err(|source| StoreError::Write {
        path: job.output_dir.display().to_string(),
        source,
    })?;
    write_json(&job.output_dir.join("detailed.json"), &views.detailed)?;
    write_json(&job.output_dir.join("consolidated.json"), &views.consolidated)?;
    Ok(views)
}

fn read_watchlist(path: &Path) -> Result<Vec<WatchlistEntry>, StoreError> {
    let value: Value = read_json(path)?;
    if !value.is_array() {
        return Err(StoreError::NotAnArray {
            path: path.display().to_string(),
        });
    }
    serde_json::from_value(value).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(value)?;
    fs::write(path, payload).map_err(|source| StoreError::Write {
        path: path.display().to_string(),
        source,
    })
}
