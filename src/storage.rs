use crate::errors::StoreError;
use crate::locale::Locale;
use crate::models::{DayRecord, Entry, Settings};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{error, warn};

/// On-disk document. Day records and settings live in separate tables so a
/// settings key can never be mistaken for a date.
///
/// Day records stay as raw JSON until someone asks for them; a corrupt day
/// then only affects that day and is written back untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default)]
    pub days: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    locale: Locale,
    data: StoreData,
}

impl Store {
    pub async fn open(path: PathBuf, locale: Locale) -> Self {
        let data = load_data(&path).await;
        Self { path, locale, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn template(&self) -> DayRecord {
        DayRecord::template(self.locale.meal_names())
    }

    /// Validating read of one day. `Ok(None)` means nothing was ever saved.
    pub fn decode_day(&self, date: NaiveDate) -> Result<Option<DayRecord>, StoreError> {
        let key = date_key(date);
        let Some(value) = self.data.days.get(&key) else {
            return Ok(None);
        };
        DayRecord::deserialize(value)
            .map(Some)
            .map_err(|err| StoreError::MalformedRecord {
                date: key,
                reason: err.to_string(),
            })
    }

    /// Stored record for `date`, or the default template when the day is
    /// missing or its stored value does not decode.
    pub fn load_day(&self, date: NaiveDate) -> DayRecord {
        match self.decode_day(date) {
            Ok(Some(record)) => record,
            Ok(None) => self.template(),
            Err(err) => {
                warn!("{err}; falling back to the default template");
                self.template()
            }
        }
    }

    pub async fn save_day(&mut self, date: NaiveDate, record: &DayRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        self.data.days.insert(date_key(date), value);
        self.persist().await
    }

    pub fn ideal_calories(&self) -> Entry {
        self.data.settings.ideal_calories
    }

    pub async fn set_ideal_calories(&mut self, ideal: Entry) -> Result<(), StoreError> {
        self.data.settings.ideal_calories = ideal;
        self.persist().await
    }

    pub fn stored_days(&self) -> usize {
        self.data.days.len()
    }

    /// Writes a sibling temp file and renames it over the data file, so a
    /// crash mid-write leaves the previous document intact.
    async fn persist(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(&self.data)?;
        let temp_path = self.path.with_extension("json.tmp");
        let written = match fs::write(&temp_path, payload).await {
            Ok(()) => fs::rename(&temp_path, &self.path).await,
            Err(err) => Err(err),
        };
        written.map_err(|err| {
            error!("failed to write data file {}: {err}", self.path.display());
            StoreError::from(err)
        })
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                set_aside(path).await;
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            set_aside(path).await;
            StoreData::default()
        }
    }
}

/// Moves an unreadable data file out of the way before anything can be
/// saved over it.
async fn set_aside(path: &Path) {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S%3f")));
    let target = path.with_file_name(name);
    match fs::rename(path, &target).await {
        Ok(()) => warn!("moved unreadable data file to {}", target.display()),
        Err(err) => error!("failed to move unreadable data file aside: {err}"),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Store;
    use crate::locale::Locale;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A data file path inside a directory that is removed on drop.
    pub struct TestData {
        pub path: PathBuf,
        pub dir: TempDir,
    }

    impl TestData {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("state.json");
            Self { path, dir }
        }

        pub async fn open(&self, locale: Locale) -> Store {
            Store::open(self.path.clone(), locale).await
        }
    }
}
