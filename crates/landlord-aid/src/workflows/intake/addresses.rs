//! Property address reference data and the autocomplete behavior of the address field.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;

/// Suggestions are only offered once the input is longer than this many characters.
pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 8;
/// How long the list lingers after the field loses focus so a click on an entry still lands.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

const BUNDLED_ADDRESSES: &[&str] = &[
    "100 S Broad St, Philadelphia, PA, 19110",
    "1200 Walnut St, Philadelphia, PA, 19107",
    "123 Main St, Philadelphia, PA 19102",
    "1234 Market St, Philadelphia, PA, 19107",
    "1500 Spring Garden St, Philadelphia, PA, 19130",
    "1600 N Broad St, Philadelphia, PA, 19121",
    "2000 Hamilton St, Philadelphia, PA, 19130",
    "2100 Fairmount Ave, Philadelphia, PA, 19130",
    "2301 E Allegheny Ave, Philadelphia, PA, 19134",
    "2400 S 20th St, Philadelphia, PA, 19145",
    "2600 Belgrade St, Philadelphia, PA, 19125",
    "301 Chestnut St, Philadelphia, PA, 19106",
    "3400 Spruce St, Philadelphia, PA, 19104",
    "4000 Lancaster Ave, Philadelphia, PA, 19104",
    "4301 Main St, Philadelphia, PA, 19127",
    "4500 Frankford Ave, Philadelphia, PA, 19124",
    "5000 Baltimore Ave, Philadelphia, PA, 19143",
    "5500 Germantown Ave, Philadelphia, PA, 19144",
    "600 Catharine St, Philadelphia, PA, 19147",
    "6100 Ridge Ave, Philadelphia, PA, 19128",
    "7000 Castor Ave, Philadelphia, PA, 19149",
    "801 E Passyunk Ave, Philadelphia, PA, 19147",
    "900 N 5th St, Philadelphia, PA, 19123",
];

/// Comma-free, whitespace-collapsed, lowercase form used for prefix matching.
pub fn normalize(value: &str) -> String {
    value
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum AddressBookError {
    #[error("unable to read address export: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct AddressRow {
    #[serde(rename = "addr:housenumber", default)]
    number: String,
    #[serde(rename = "addr:street", default)]
    street: String,
    #[serde(rename = "addr:city", default)]
    city: String,
    #[serde(rename = "addr:state", default)]
    state: String,
    #[serde(rename = "addr:postcode", default)]
    postcode: String,
}

impl AddressRow {
    fn into_address(self) -> Option<String> {
        let number = self.number.trim();
        let street = self.street.trim();
        if number.is_empty() || street.is_empty() {
            return None;
        }

        let mut address = format!("{number} {street}");
        for part in [&self.city, &self.state, &self.postcode] {
            let part = part.trim();
            if !part.is_empty() {
                address.push_str(", ");
                address.push_str(part);
            }
        }
        Some(address)
    }
}

/// Read-only list of known property addresses.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    entries: Vec<(String, String)>,
}

impl AddressBook {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = addresses
            .into_iter()
            .map(|address| {
                let address: String = address.into();
                (normalize(&address), address)
            })
            .collect();
        Self { entries }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_ADDRESSES.iter().copied())
    }

    /// Build the list from an OpenStreetMap-style CSV export (`addr:*` columns).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AddressBookError> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, AddressBookError> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_path(path)?)
    }

    fn from_csv<R: Read>(reader: csv::Reader<R>) -> Result<Self, AddressBookError> {
        let mut addresses = Vec::new();
        for row in reader.into_deserialize::<AddressRow>() {
            if let Some(address) = row?.into_address() {
                addresses.push(address);
            }
        }
        Ok(Self::new(addresses))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to [`MAX_SUGGESTIONS`] addresses whose normalized form starts with the input.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        if input.chars().count() <= MIN_QUERY_CHARS {
            return Vec::new();
        }
        let query = normalize(input);
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|(normalized, _)| normalized.starts_with(&query))
            .take(MAX_SUGGESTIONS)
            .map(|(_, original)| original.clone())
            .collect()
    }
}

/// Suggestion list state for the address input.
#[derive(Debug, Clone)]
pub struct AddressAutocomplete {
    book: Arc<AddressBook>,
    suggestions: Vec<String>,
    focused: bool,
    hide_at: Option<Instant>,
}

impl AddressAutocomplete {
    pub fn new(book: Arc<AddressBook>) -> Self {
        Self {
            book,
            suggestions: Vec::new(),
            focused: false,
            hide_at: None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn update(&mut self, input: &str) {
        self.suggestions = self.book.suggest(input);
    }

    pub fn focus(&mut self, input: &str) {
        self.focused = true;
        self.hide_at = None;
        self.update(input);
    }

    pub fn blur(&mut self, now: Instant) {
        self.focused = false;
        self.hide_at = Some(now + BLUR_GRACE);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        if self.suggestions.is_empty() {
            return false;
        }
        self.focused || self.hide_at.is_some_and(|deadline| now < deadline)
    }

    /// Pick a visible suggestion; the list hides afterwards.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<String> {
        if !self.is_visible(now) {
            return None;
        }
        let chosen = self.suggestions.get(index).cloned()?;
        self.suggestions.clear();
        self.hide_at = None;
        Some(chosen)
    }
}
