use chrono::{Datelike, NaiveDate, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Hungarian,
}

const EN_MEALS: &[&str] = &["Breakfast", "Lunch", "Snack", "Dinner"];
const HU_MEALS: &[&str] = &["Reggeli", "Ebéd", "Uzsonna", "Vacsora"];

impl Locale {
    /// Accepts `en`/`hu` and region-qualified tags like `hu_HU` or `en-US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::English),
            "hu" => Some(Locale::Hungarian),
            _ => None,
        }
    }

    pub fn meal_names(self) -> &'static [&'static str] {
        match self {
            Locale::English => EN_MEALS,
            Locale::Hungarian => HU_MEALS,
        }
    }

    pub fn weekday_label(self, date: NaiveDate) -> &'static str {
        match (self, date.weekday()) {
            (Locale::English, Weekday::Mon) => "Mon",
            (Locale::English, Weekday::Tue) => "Tue",
            (Locale::English, Weekday::Wed) => "Wed",
            (Locale::English, Weekday::Thu) => "Thu",
            (Locale::English, Weekday::Fri) => "Fri",
            (Locale::English, Weekday::Sat) => "Sat",
            (Locale::English, Weekday::Sun) => "Sun",
            (Locale::Hungarian, Weekday::Mon) => "H",
            (Locale::Hungarian, Weekday::Tue) => "K",
            (Locale::Hungarian, Weekday::Wed) => "Sze",
            (Locale::Hungarian, Weekday::Thu) => "Cs",
            (Locale::Hungarian, Weekday::Fri) => "P",
            (Locale::Hungarian, Weekday::Sat) => "Szo",
            (Locale::Hungarian, Weekday::Sun) => "V",
        }
    }
}
