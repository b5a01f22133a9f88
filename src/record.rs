//! Population records and collection batches
//!
//! A [`PopulationRecord`] is one provider row for one area, decoded from the
//! provider's JSON keys and serialized under the Korean CSV headers used by the
//! exported files. Values are kept verbatim as strings.

use serde::{Deserialize, Deserializer, Serialize};

/// CSV header row, in column order
pub const CSV_HEADERS: [&str; 19] = [
    "지역코드",
    "지역명",
    "데이터 수집 시간",
    "실시간 인구 수준",
    "실시간 인구 메시지",
    "인구 최소값",
    "인구 최대값",
    "남성 비율",
    "여성 비율",
    "0-9세 비율",
    "10대 비율",
    "20대 비율",
    "30대 비율",
    "40대 비율",
    "50대 비율",
    "60대 비율",
    "70대 이상 비율",
    "거주인구 비율",
    "비거주인구 비율",
];

/// One area's real-time population snapshot as reported by the provider
///
/// Every field is required. A missing key or a value that is neither a string
/// nor a number fails decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PopulationRecord {
    #[serde(rename(deserialize = "AREA_CD", serialize = "지역코드"))]
    #[serde(deserialize_with = "verbatim")]
    pub area_code: String,

    #[serde(rename(deserialize = "AREA_NM", serialize = "지역명"))]
    #[serde(deserialize_with = "verbatim")]
    pub area_name: String,

    /// Provider-supplied collection time, e.g. "2024-01-15 14:05"
    #[serde(rename(deserialize = "PPLTN_TIME", serialize = "데이터 수집 시간"))]
    #[serde(deserialize_with = "verbatim")]
    pub collected_at: String,

    #[serde(rename(deserialize = "AREA_CONGEST_LVL", serialize = "실시간 인구 수준"))]
    #[serde(deserialize_with = "verbatim")]
    pub congestion_level: String,

    #[serde(rename(deserialize = "AREA_CONGEST_MSG", serialize = "실시간 인구 메시지"))]
    #[serde(deserialize_with = "verbatim")]
    pub congestion_message: String,

    #[serde(rename(deserialize = "AREA_PPLTN_MIN", serialize = "인구 최소값"))]
    #[serde(deserialize_with = "verbatim")]
    pub population_min: String,

    #[serde(rename(deserialize = "AREA_PPLTN_MAX", serialize = "인구 최대값"))]
    #[serde(deserialize_with = "verbatim")]
    pub population_max: String,

    #[serde(rename(deserialize = "MALE_PPLTN_RATE", serialize = "남성 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub male_rate: String,

    #[serde(rename(deserialize = "FEMALE_PPLTN_RATE", serialize = "여성 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub female_rate: String,

    #[serde(rename(deserialize = "PPLTN_RATE_0", serialize = "0-9세 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_0s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_10", serialize = "10대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_10s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_20", serialize = "20대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_20s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_30", serialize = "30대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_30s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_40", serialize = "40대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_40s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_50", serialize = "50대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_50s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_60", serialize = "60대 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_60s: String,

    #[serde(rename(deserialize = "PPLTN_RATE_70", serialize = "70대 이상 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub rate_70s_plus: String,

    #[serde(rename(deserialize = "RESNT_PPLTN_RATE", serialize = "거주인구 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub resident_rate: String,

    #[serde(rename(deserialize = "NON_RESNT_PPLTN_RATE", serialize = "비거주인구 비율"))]
    #[serde(deserialize_with = "verbatim")]
    pub non_resident_rate: String,
}

/// The provider mixes string and numeric JSON for the same columns
#[derive(Deserialize)]
#[serde(untagged)]
enum Verbatim {
    Text(String),
    Number(serde_json::Number),
}

fn verbatim<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Verbatim::deserialize(deserializer)? {
        Verbatim::Text(s) => s,
        Verbatim::Number(n) => n.to_string(),
    })
}

/// Records collected during one scheduling tick, in registry order
///
/// A batch always holds at least one record; an empty round is represented
/// by the absence of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionBatch {
    records: Vec<PopulationRecord>,
}

impl CollectionBatch {
    /// Wraps collected records, returning `None` if there are none
    pub fn from_records(records: Vec<PopulationRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed batch
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
