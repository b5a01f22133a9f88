//! Provider response envelope
//!
//! A successful response looks like:
//!
//! ```json
//! {
//!   "SeoulRtd.citydata_ppltn": [ { "AREA_NM": "...", "AREA_CD": "POI001", ... } ],
//!   "RESULT": { "RESULT.CODE": "INFO-000", "RESULT.MESSAGE": "정상 처리되었습니다." }
//! }
//! ```
//!
//! Gateway-level failures (bad key, unknown service) carry only a `RESULT`
//! object, with `CODE`/`MESSAGE` keys instead.

use crate::collector::{CollectError, DecodeError};
use crate::record::PopulationRecord;
use serde::Deserialize;

/// Top-level key holding the population rows
pub const ROWS_KEY: &str = "SeoulRtd.citydata_ppltn";

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(rename = "SeoulRtd.citydata_ppltn", default)]
    rows: Option<Vec<serde_json::Value>>,

    #[serde(rename = "RESULT", default)]
    result: Option<ApiResult>,
}

/// Provider status block
#[derive(Debug, Default, Deserialize)]
struct ApiResult {
    #[serde(rename = "RESULT.CODE", alias = "CODE", default)]
    code: String,

    #[serde(rename = "RESULT.MESSAGE", alias = "MESSAGE", default)]
    message: String,
}

impl ApiResult {
    fn describe(&self) -> String {
        match (self.code.is_empty(), self.message.is_empty()) {
            (true, true) => "empty result block".to_string(),
            (false, true) => self.code.clone(),
            (true, false) => self.message.clone(),
            (false, false) => format!("{}: {}", self.code, self.message),
        }
    }
}

/// Decodes a response body into the first population row
///
/// # Returns
///
/// * `Ok(PopulationRecord)` - The first row, fully decoded
/// * `Err(CollectError::Decode)` - Body is not JSON or the row is malformed
/// * `Err(CollectError::Empty)` - The row array is missing or empty
pub fn decode_response(body: &str) -> Result<PopulationRecord, CollectError> {
    let envelope: ApiEnvelope =
        serde_json::from_str(body).map_err(|e| DecodeError::new("response body", e))?;

    let first = envelope.rows.and_then(|rows| rows.into_iter().next());

    match first {
        Some(row) => {
            let record = serde_json::from_value(row)
                .map_err(|e| DecodeError::new("population row", e))?;
            Ok(record)
        }
        None => Err(CollectError::Empty {
            detail: envelope
                .result
                .map(|r| r.describe())
                .unwrap_or_else(|| format!("no '{}' rows", ROWS_KEY)),
        }),
    }
}
