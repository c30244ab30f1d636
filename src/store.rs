use crate::dates::{display_to_iso, iso_to_display, parse_display};
use crate::models::{AggregatedEntry, FormField, PendingForm, RawEntry, StoreSnapshot};
use std::cmp::Ordering;

/// Owns the submitted entries and the pending form. All mutation goes
/// through the named operations below; the displayed list is recomputed
/// from `entries` on every read.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<RawEntry>,
    form: PendingForm,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    pub fn form(&self) -> &PendingForm {
        &self.form
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Date => self.form.date = value,
            FormField::Distance => self.form.distance = value,
        }
    }

    /// Appends the pending form as a new entry and clears it. Returns `false`
    /// and leaves everything untouched when the input is rejected.
    pub fn submit(&mut self) -> bool {
        let Some(distance) = parse_distance(&self.form.distance) else {
            return false;
        };
        if self.form.date.is_empty() {
            return false;
        }

        self.entries.push(RawEntry {
            date: iso_to_display(&self.form.date),
            distance,
        });
        self.form = PendingForm::default();
        true
    }

    /// Drops every raw entry recorded under `date_key`.
    pub fn remove(&mut self, date_key: &str) {
        self.entries.retain(|entry| entry.date != date_key);
    }

    /// Loads an aggregated row back into the form and removes every raw entry
    /// behind it. The whole per-date total lands in the form as one value, so
    /// the original split is gone even if the form is never resubmitted.
    pub fn edit(&mut self, entry: &AggregatedEntry) {
        self.form = PendingForm {
            date: display_to_iso(&entry.date),
            distance: entry.distance.to_string(),
        };
        self.remove(&entry.date);
    }

    /// Entries summed per date, newest first.
    pub fn summary(&self) -> Vec<AggregatedEntry> {
        let mut grouped: Vec<AggregatedEntry> = Vec::new();
        for entry in &self.entries {
            match grouped.iter_mut().find(|item| item.date == entry.date) {
                Some(existing) => existing.distance += entry.distance,
                None => grouped.push(AggregatedEntry {
                    date: entry.date.clone(),
                    distance: entry.distance,
                }),
            }
        }

        grouped.sort_by(|a, b| compare_desc(&a.date, &b.date));
        grouped
    }

    pub fn find(&self, date_key: &str) -> Option<AggregatedEntry> {
        self.summary().into_iter().find(|entry| entry.date == date_key)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            form: self.form.clone(),
            entries: self.summary(),
        }
    }
}

fn parse_distance(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().ok()?
    };
    if value.is_nan() || value < 0.0 {
        return None;
    }
    // -0 would otherwise render as "-0".
    Some(if value == 0.0 { 0.0 } else { value })
}

// Unparseable dates sink below every real one.
fn compare_desc(a: &str, b: &str) -> Ordering {
    match (parse_display(a), parse_display(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
