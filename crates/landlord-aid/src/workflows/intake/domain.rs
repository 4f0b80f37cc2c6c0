use serde::{Deserialize, Serialize};

/// Repair categories offered on the repair details step, in display order.
pub const REPAIR_CATALOG: [&str; 10] = [
    "Plumbing",
    "Electrical",
    "HVAC",
    "Roofing",
    "Windows",
    "Flooring",
    "Exterior Repairs",
    "Kitchen Renovation",
    "Bathroom Renovation",
    "Safety Improvements",
];

pub fn is_catalog_repair(value: &str) -> bool {
    REPAIR_CATALOG.contains(&value)
}

/// One rentable sub-space within the applicant's property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInfo {
    pub unit_number: String,
    pub monthly_rent: String,
    #[serde(default)]
    pub vacant: bool,
    #[serde(default)]
    pub owner_occupied: bool,
}

impl UnitInfo {
    /// Default unit generated when the unit count grows; `position` is 1-based.
    pub fn placeholder(position: usize) -> Self {
        Self {
            unit_number: format!("Unit {position}"),
            monthly_rent: String::new(),
            vacant: false,
            owner_occupied: false,
        }
    }

    /// Rent input is disabled for vacant and owner-occupied units.
    pub fn rent_editable(&self) -> bool {
        !(self.vacant || self.owner_occupied)
    }

    pub fn set_vacant(&mut self, vacant: bool) {
        self.vacant = vacant;
        if vacant {
            self.owner_occupied = false;
            self.monthly_rent = "0".to_string();
        }
    }

    pub fn set_owner_occupied(&mut self, owner_occupied: bool) {
        self.owner_occupied = owner_occupied;
        if owner_occupied {
            self.vacant = false;
            self.monthly_rent = "0".to_string();
        }
    }

    /// Parsed rent, `None` when blank or not a number.
    pub fn rent_amount(&self) -> Option<f64> {
        let trimmed = self.monthly_rent.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

/// Contact channel the applicant prefers to be reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub const fn label(self) -> &'static str {
        match self {
            ContactMethod::Email => "Email",
            ContactMethod::Phone => "Phone",
        }
    }
}

/// Answer to "Is this property currently rented out?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Yes,
    Vacant,
    Preparing,
}

impl RentalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RentalStatus::Yes => "Currently rented",
            RentalStatus::Vacant => "Currently vacant",
            RentalStatus::Preparing => "Preparing to rent",
        }
    }

    /// Rented now or being readied for a tenant.
    pub const fn is_income_producing(self) -> bool {
        matches!(self, RentalStatus::Yes | RentalStatus::Preparing)
    }
}

/// Estimated repair cost bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostRange {
    #[serde(rename = "0-25k")]
    UpTo25k,
    #[serde(rename = "26-50k")]
    From26kTo50k,
    #[serde(rename = "51-75k")]
    From51kTo75k,
    #[serde(rename = "76-100k")]
    From76kTo100k,
}

impl CostRange {
    pub const ALL: [CostRange; 4] = [
        CostRange::UpTo25k,
        CostRange::From26kTo50k,
        CostRange::From51kTo75k,
        CostRange::From76kTo100k,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            CostRange::UpTo25k => "0-25k",
            CostRange::From26kTo50k => "26-50k",
            CostRange::From51kTo75k => "51-75k",
            CostRange::From76kTo100k => "76-100k",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CostRange::UpTo25k => "$0 - $25,000",
            CostRange::From26kTo50k => "$26,000 - $50,000",
            CostRange::From51kTo75k => "$51,000 - $75,000",
            CostRange::From76kTo100k => "$76,000 - $100,000",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.code() == code)
    }
}

/// Everything the intake form collects; this is the payload submitted and persisted.
///
/// Unanswered single-choice fields are `None` and serialize as empty strings so the stored
/// JSON keeps the shape the browser client has always written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact: Option<ContactMethod>,
    pub property_address: String,
    pub number_of_units: String,
    pub units: Vec<UnitInfo>,
    #[serde(with = "blank_as_none")]
    pub rented_out: Option<RentalStatus>,
    pub repair_type: Vec<String>,
    #[serde(with = "blank_as_none")]
    pub estimated_cost: Option<CostRange>,
}

impl ApplicationData {
    /// Parsed unit count; `None` for blank, unparsable or zero.
    pub fn unit_count(&self) -> Option<usize> {
        self.number_of_units
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| *count > 0)
    }

    /// Update the unit count and resize `units` to match, keeping existing entries by position.
    pub fn set_number_of_units(&mut self, value: impl Into<String>) {
        self.number_of_units = value.into();
        let target = self.unit_count().unwrap_or(0);
        if self.units.len() > target {
            self.units.truncate(target);
        } else {
            let start = self.units.len();
            self.units
                .extend((start..target).map(|index| UnitInfo::placeholder(index + 1)));
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        if self.email.trim().is_empty() && self.preferred_contact == Some(ContactMethod::Email) {
            self.preferred_contact = None;
        }
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        if self.phone.trim().is_empty() && self.preferred_contact == Some(ContactMethod::Phone) {
            self.preferred_contact = None;
        }
    }

    /// A contact method can only be preferred when the matching field is filled in.
    pub fn contact_available(&self, method: ContactMethod) -> bool {
        match method {
            ContactMethod::Email => !self.email.trim().is_empty(),
            ContactMethod::Phone => !self.phone.trim().is_empty(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

mod blank_as_none {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        match raw {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(text)) if text.is_empty() => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
