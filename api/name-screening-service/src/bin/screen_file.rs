use name_screening_service::service::file_screening_service::{FileScreeningJob, screen_files};
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("screen_file error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let job = FileScreeningJob {
        input_path: env::var("SCREEN_INPUT_PATH")
            .unwrap_or_else(|_| "input.json".to_string())
            .into(),
        watchlist_path: env::var("WATCHLIST_PATH")
            .unwrap_or_else(|_| "watchlist.json".to_string())
            .into(),
        output_dir: env::var("SCREEN_OUTPUT_DIR")
            .unwrap_or_else(|_| "output".to_string())
            .into(),
        request_id: env::var("SCREEN_REQUEST_ID").unwrap_or_else(|_| "cli".to_string()),
    };

    let views = screen_files(&job).map_err(|e| e.to_string())?;
    let consolidated = serde_json::to_string_pretty(&views.consolidated)
        .map_err(|e| format!("failed to serialize consolidated output: {e}"))?;
    println!("{consolidated}");
    Ok(())
}
