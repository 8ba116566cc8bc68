use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub api_host: String,
    pub api_port: u16,
    pub data_root: String,
    pub watchlist_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        load_dotenv_layers();

        Ok(Self {
            rust_env: read_optional_string("RUST_ENV", "development"),
            api_host: read_optional_string("API_HOST", "0.0.0.0"),
            api_port: read_port()?,
            data_root: read_optional_string("DATA_ROOT", "data"),
            watchlist_path: read_optional_string("WATCHLIST_PATH", "watchlist.json"),
        })
    }
}

fn read_port() -> Result<u16, String> {
    for key in ["API_PORT", "PORT"] {
        if let Ok(v) = env::var(key) {
            return v.parse::<u16>().map_err(|e| format!("invalid {key}: {e}"));
        }
    }
    Ok(3000)
}

fn read_optional_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_dotenv_layers() {
    for path in [".env", "../.env", "../../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
