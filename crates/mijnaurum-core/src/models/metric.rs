// ABOUTME: Tagged field set handed to the metric sink
// ABOUTME: Tags and fields are kept sorted by key for stable output

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One measurement: name, string tags, numeric fields and a timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Measurement name
    pub name: &'static str,
    /// Tag set
    pub tags: BTreeMap<&'static str, String>,
    /// Field set
    pub fields: BTreeMap<&'static str, f64>,
    /// Collection time
    pub timestamp: DateTime<Utc>,
}

impl Metric {
    /// Create an empty metric
    #[must_use]
    pub fn new(name: &'static str, timestamp: DateTime<Utc>) -> Self {
        Self {
            name,
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// Add or replace a tag
    #[must_use]
    pub fn with_tag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.tags.insert(key, value.into());
        self
    }

    /// Add or replace a field
    #[must_use]
    pub fn with_field(mut self, key: &'static str, value: f64) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Tag value by key
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Field value by key
    #[must_use]
    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied()
    }
}
