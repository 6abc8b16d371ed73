use crate::locale::Locale;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub locale: Locale,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(),
            data_path: resolve_data_path(),
            locale: resolve_locale(),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    env::var("APP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}

fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn resolve_locale() -> Locale {
    match env::var("APP_LOCALE") {
        Ok(tag) => Locale::from_tag(&tag).unwrap_or_else(|| {
            warn!("unsupported APP_LOCALE {tag:?}, using English");
            Locale::default()
        }),
        Err(_) => Locale::default(),
    }
}
