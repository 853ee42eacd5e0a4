use super::domain::Country;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CountryImportError {
    #[error("failed to read country reference table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid country reference CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("country reference row {row} has an empty code")]
    MissingCode { row: usize },
}

/// Country reference table keyed by normalized code.
///
/// Build once and reuse for every activity (or every call) that shares the
/// same reference data.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    countries: HashMap<String, Country>,
}

impl CountryIndex {
    pub fn new(countries: &[Country]) -> Self {
        countries.iter().cloned().collect()
    }

    pub fn get(&self, code: &str) -> Option<&Country> {
        self.countries.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Adds or replaces entries; later entries win.
    pub fn extend<I: IntoIterator<Item = Country>>(&mut self, countries: I) {
        for country in countries {
            self.countries.insert(normalize_code(&country.code), country);
        }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, CountryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads a `code,high_risk,sanctioned` table. Blank flags read as `false`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CountryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut index = Self::default();

        for (position, row) in csv_reader.deserialize::<CountryRow>().enumerate() {
            let row = row?;
            if row.code.is_empty() {
                return Err(CountryImportError::MissingCode { row: position + 1 });
            }
            index.extend([Country {
                code: row.code,
                high_risk: row.high_risk,
                sanctioned: row.sanctioned,
            }]);
        }

        Ok(index)
    }
}

impl FromIterator<Country> for CountryIndex {
    fn from_iter<I: IntoIterator<Item = Country>>(iter: I) -> Self {
        let mut index = Self::default();
        index.extend(iter);
        index
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    code: String,
    #[serde(default, deserialize_with = "flag")]
    high_risk: bool,
    #[serde(default, deserialize_with = "flag")]
    sanctioned: bool,
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{other}'"
        ))),
    }
}
