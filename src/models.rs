use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One submitted (date, distance) pair. `date` is in display format `DD.MM.YY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub date: String,
    pub distance: f64,
}

/// Live input buffer behind the entry form. `date` is ISO `YYYY-MM-DD`,
/// `distance` is whatever the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PendingForm {
    pub date: String,
    pub distance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Distance,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "date" => Ok(FormField::Date),
            "distance" => Ok(FormField::Distance),
            other => Err(format!("unknown form field '{other}'")),
        }
    }
}

/// Per-date total derived from the raw entries. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    pub date: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub form: PendingForm,
    pub entries: Vec<AggregatedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub distance: String,
}

#[derive(Debug, Deserialize)]
pub struct DateKeyRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldValueRequest {
    pub value: String,
}
