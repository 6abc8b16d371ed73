use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// A single calorie value typed into an entry field, or nothing at all.
///
/// Blank entries count as zero when summed but are kept distinct from a
/// literal `0` so the field renders empty until the user types into it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Entry {
    #[default]
    Blank,
    Value(f64),
}

impl Entry {
    /// Parses raw text from an input field. Anything that is not a finite
    /// number collapses to [`Entry::Blank`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Entry::Value(value),
            _ => Entry::Blank,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Entry::Blank => 0.0,
            Entry::Value(value) => value,
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Blank => serializer.serialize_str(""),
            Entry::Value(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a blank string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Entry, E> {
        if value.is_finite() {
            Ok(Entry::Value(value))
        } else {
            Ok(Entry::Blank)
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Entry, E> {
        Ok(Entry::Value(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Entry, E> {
        Ok(Entry::Value(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Entry, E> {
        Ok(Entry::parse(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::Blank)
    }

    fn visit_none<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealGroup {
    pub name: String,
    #[serde(default)]
    pub numbers: Vec<Entry>,
}

impl MealGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numbers: vec![Entry::Blank],
        }
    }
}

/// All meal groups for one calendar day. Serialized as a bare list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DayRecord {
    pub groups: Vec<MealGroup>,
}

impl DayRecord {
    /// Fresh record for a day nobody has written yet: one blank entry per group.
    pub fn template(names: &[&str]) -> Self {
        Self {
            groups: names.iter().map(|name| MealGroup::new(*name)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieDataPoint {
    pub calories: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(rename = "idealCalories", default)]
    pub ideal_calories: Entry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: String,
    pub groups: Vec<MealGroup>,
    pub total: f64,
    pub group_totals: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SetEntryRequest {
    pub group: usize,
    pub entry: usize,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub group: usize,
}

#[derive(Debug, Deserialize)]
pub struct RemoveEntryRequest {
    pub group: usize,
    pub entry: usize,
}

#[derive(Debug, Deserialize)]
pub struct GoToRequest {
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendResponse {
    pub date: String,
    pub ideal_calories: f64,
    pub points: Vec<CalorieDataPoint>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub ideal_calories: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub ideal_calories: Entry,
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub start_x: f64,
    pub end_x: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DrawerResponse {
    pub open: bool,
    pub scroll_locked: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub width: Option<f64>,
}
