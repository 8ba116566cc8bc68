use super::error::AppError;
use super::model::{ConsolidatedView, ScreeningSubject};
use super::schema::ScreeningRequestBody;
use crate::app::AppState;
use crate::service::screening_service::{names_to_screen, screen};
use crate::service::screening_store_service::{RequestPaths, ScreeningStore, StoreError};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub output_dir: PathBuf,
    pub consolidated: Option<ConsolidatedView>,
    pub reprocessed: bool,
}

/// Screens one request, reading the subject from the request body when it
/// names someone and from `input.json` otherwise, then writes both views.
pub async fn process_request(
    state: &AppState,
    user_id: &str,
    request_id: &str,
    log_prefix: &str,
    body: Option<ScreeningRequestBody>,
) -> Result<ProcessOutcome, AppError> {
    let store = &state.store;
    info!(request_id = %log_prefix, user_id = %user_id, "starting screening");

    let paths = store
        .request_paths(user_id, request_id)
        .map_err(|e| AppError::bad_request("INVALID_PATH_SEGMENT", e.to_string()))?;
    let body = body.filter(ScreeningRequestBody::has_names);

    let (input_exists, watchlist_exists, detailed_exists) = tokio::join!(
        ScreeningStore::exists(&paths.input_path),
        ScreeningStore::exists(store.watchlist_path()),
        ScreeningStore::exists(&paths.detailed_path),
    );

    if !watchlist_exists {
        warn!(request_id = %log_prefix, path = %store.watchlist_path().display(), "watchlist file missing");
        return Err(AppError::bad_request("WATCHLIST_MISSING", "Watchlist file missing"));
    }
    if body.is_none() && !input_exists {
        warn!(request_id = %log_prefix, path = %paths.input_path.display(), "input file missing and no body input");
        return Err(AppError::bad_request("INPUT_MISSING", "Input file missing"));
    }
    if body.is_none() && detailed_exists {
        info!(request_id = %log_prefix, output_dir = %paths.output_dir.display(), "output already exists, skipping reprocessing");
        return Ok(ProcessOutcome {
            consolidated: load_existing(store, &paths, log_prefix).await,
            output_dir: paths.output_dir,
            reprocessed: false,
        });
    }

    let subject = match body {
        Some(body) => {
            info!(request_id = %log_prefix, "using input from request body");
            body.into_subject(request_id)
        }
        None => {
            info!(request_id = %log_prefix, "reading input file");
            store
                .load_subject(&paths)
                .await
                .map_err(|e| store_error(log_prefix, e, "INPUT_READ_FAILED", "INPUT_INVALID_JSON"))?
        }
    };

    let watchlist = store
        .load_watchlist()
        .await
        .map_err(|e| store_error(log_prefix, e, "WATCHLIST_READ_FAILED", "WATCHLIST_INVALID_JSON"))?;

    if detailed_exists {
        info!(request_id = %log_prefix, "reprocessing with body input, overwriting existing output");
    }

    log_names(log_prefix, &subject);
    let views = screen(&subject, request_id, &watchlist);
    let best = &views.detailed.best_match;
    info!(
        request_id = %log_prefix,
        watchlist_id = %best.id.clone().unwrap_or_default(),
        score = best.score,
        match_type = %best.match_type.as_str(),
        "best match"
    );

    store
        .write_outputs(&paths, &views)
        .await
        .map_err(|e| store_error(log_prefix, e, "OUTPUT_WRITE_FAILED", "OUTPUT_WRITE_FAILED"))?;

    info!(request_id = %log_prefix, output_dir = %paths.output_dir.display(), "screening complete");
    Ok(ProcessOutcome {
        output_dir: paths.output_dir,
        consolidated: Some(views.consolidated),
        reprocessed: true,
    })
}

fn log_names(log_prefix: &str, subject: &ScreeningSubject) {
    let names = names_to_screen(subject);
    info!(request_id = %log_prefix, count = names.len(), names = ?names, "names to screen");
}

async fn load_existing(
    store: &ScreeningStore,
    paths: &RequestPaths,
    log_prefix: &str,
) -> Option<ConsolidatedView> {
    match store.load_consolidated(paths).await {
        Ok(view) => Some(view),
        Err(e) => {
            warn!(request_id = %log_prefix, error = %e, "stored consolidated output unreadable");
            None
        }
    }
}

fn store_error(
    log_prefix: &str,
    err: StoreError,
    read_code: &'static str,
    parse_code: &'static str,
) -> AppError {
    warn!(request_id = %log_prefix, error = %err, "screening store error");
    match err {
        StoreError::InvalidPathSegment(_) => AppError::bad_request("INVALID_PATH_SEGMENT", err.to_string()),
        StoreError::Read { .. } => AppError::bad_request(read_code, err.to_string()),
        StoreError::Parse { .. } => AppError::bad_request(parse_code, err.to_string()),
        StoreError::NotAnArray { .. } => {
            AppError::bad_request("WATCHLIST_NOT_ARRAY", "Watchlist must be a JSON array")
        }
        StoreError::Serialize(_) | StoreError::Write { .. } => {
            AppError::internal("OUTPUT_WRITE_FAILED", err.to_string())
        }
    }
}
