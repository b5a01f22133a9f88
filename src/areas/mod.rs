//! Area registry
//!
//! The ordered set of areas polled each round. The built-in list covers the
//! provider's tourist zones, palaces and major stations; a config file may
//! replace it with its own `[[area]]` entries.

use serde::Deserialize;
use std::fmt;

/// A named area and the provider's code for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct AreaEntry {
    /// Human-readable area name, as the provider spells it
    pub name: String,

    /// Provider area code (e.g. "POI001")
    pub code: String,
}

impl AreaEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for AreaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const DEFAULT_AREAS: &[(&str, &str)] = &[
    ("강남 MICE 관광특구", "POI001"),
    ("동대문 관광특구", "POI002"),
    ("명동 관광특구", "POI003"),
    ("이태원 관광특구", "POI004"),
    ("잠실 관광특구", "POI005"),
    ("종로·청계 관광특구", "POI006"),
    ("홍대 관광특구", "POI007"),
    ("경복궁", "POI008"),
    ("광화문·덕수궁", "POI009"),
    ("보신각", "POI010"),
    ("서울 암사동 유적", "POI011"),
    ("창덕궁·종묘", "POI012"),
    ("가산디지털단지역", "POI013"),
    ("강남역", "POI014"),
    ("건대입구역", "POI015"),
];

/// Ordered, immutable list of areas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRegistry {
    areas: Vec<AreaEntry>,
}

impl AreaRegistry {
    pub fn new(areas: Vec<AreaEntry>) -> Self {
        Self { areas }
    }

    /// The built-in registry used when the config lists no areas
    pub fn default_areas() -> Self {
        Self::new(
            DEFAULT_AREAS
                .iter()
                .map(|(name, code)| AreaEntry::new(*name, *code))
                .collect(),
        )
    }

    /// Iterates areas in definition order
    pub fn iter(&self) -> std::slice::Iter<'_, AreaEntry> {
        self.areas.iter()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl Default for AreaRegistry {
    fn default() -> Self {
        Self::default_areas()
    }
}

impl<'a> IntoIterator for &'a AreaRegistry {
    type Item = &'a AreaEntry;
    type IntoIter = std::slice::Iter<'a, AreaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
