// ABOUTME: Usage types the collector knows how to republish
// ABOUTME: Only heat is implemented; the enum is the extension point for other types

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::CollectorError;

/// A usage type that can be turned into metrics
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collector {
    /// District heating usage
    Heat,
}

impl Collector {
    /// Every collector this build implements
    pub const AVAILABLE: &'static [Self] = &[Self::Heat];

    /// Source type string used by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "heat",
        }
    }

    /// Whether an API source type belongs to this collector
    #[must_use]
    pub fn matches(self, source_type: &str) -> bool {
        self.as_str() == source_type
    }

    /// Parse a configured list, falling back to every available collector when empty
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the first unknown collector
    pub fn parse_set<I, S>(names: I) -> Result<BTreeSet<Self>, CollectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            set.insert(name.parse()?);
        }
        if set.is_empty() {
            set.extend(Self::AVAILABLE.iter().copied());
        }
        Ok(set)
    }
}

impl fmt::Display for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collector {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::AVAILABLE
            .iter()
            .copied()
            .find(|collector| collector.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let available: Vec<&str> = Self::AVAILABLE.iter().map(|c| c.as_str()).collect();
                CollectorError::config(
                    "collectors",
                    format!(
                        "contains unknown collector '{s}' (available: {})",
                        available.join(", ")
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_defaults_to_heat() {
        let set = Collector::parse_set(Vec::<String>::new());
        assert_eq!(set.ok(), Some(BTreeSet::from([Collector::Heat])));

        let set = Collector::parse_set(["", "  "]);
        assert_eq!(set.ok(), Some(BTreeSet::from([Collector::Heat])));
    }

    #[test]
    fn test_unknown_collector_is_config_error() {
        let err = Collector::parse_set(["heat", "electricity"]).err();
        let message = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("electricity"));
        assert!(message.contains("available: heat"));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HEAT".parse::<Collector>().ok(), Some(Collector::Heat));
        assert!(Collector::Heat.matches("heat"));
        assert!(!Collector::Heat.matches("water"));
    }
}
