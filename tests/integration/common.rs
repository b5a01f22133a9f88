use chrono::{DateTime, Local, TimeZone};
use citydata_collector::config::ApiConfig;
use citydata_collector::schedule::{Clock, Sleeper};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// Records waits instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.calls.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

/// Clock stuck at one instant
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
}

/// API config pointing at the mock server
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        api_key: API_KEY.to_string(),
        ..ApiConfig::default()
    }
}

pub fn area_path(code: &str) -> String {
    format!("/{}/json/citydata_ppltn/1/5/{}", API_KEY, code)
}

/// A provider row for the given area
pub fn row(code: &str, name: &str) -> Value {
    json!({
        "AREA_NM": name,
        "AREA_CD": code,
        "AREA_CONGEST_LVL": "붐빔",
        "AREA_CONGEST_MSG": "사람들이 몰려있을 가능성이 매우 크고 붐벼서 가급적 피해가세요.",
        "AREA_PPLTN_MIN": "54000",
        "AREA_PPLTN_MAX": 56000,
        "MALE_PPLTN_RATE": "46.9",
        "FEMALE_PPLTN_RATE": "53.1",
        "PPLTN_RATE_0": "0.2",
        "PPLTN_RATE_10": "8.1",
        "PPLTN_RATE_20": "35.7",
        "PPLTN_RATE_30": "24.3",
        "PPLTN_RATE_40": "15.0",
        "PPLTN_RATE_50": "10.2",
        "PPLTN_RATE_60": "4.6",
        "PPLTN_RATE_70": "1.9",
        "RESNT_PPLTN_RATE": "9.8",
        "NON_RESNT_PPLTN_RATE": "90.2",
        "PPLTN_TIME": "2024-01-15 14:05",
        "FCST_YN": "Y"
    })
}

pub fn ok_body(code: &str, name: &str) -> Value {
    json!({
        "SeoulRtd.citydata_ppltn": [row(code, name)],
        "RESULT": { "RESULT.CODE": "INFO-000", "RESULT.MESSAGE": "정상 처리되었습니다." }
    })
}

pub fn empty_body() -> Value {
    json!({
        "SeoulRtd.citydata_ppltn": [],
        "RESULT": { "RESULT.CODE": "INFO-200", "RESULT.MESSAGE": "해당하는 데이터가 없습니다." }
    })
}

/// Mounts a mock answering `code` with a valid row
pub async fn mount_ok(server: &MockServer, code: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(area_path(code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(code, name)))
        .mount(server)
        .await;
}

/// Mounts a mock answering `code` with an empty result, expecting `times` calls
pub async fn mount_empty(server: &MockServer, code: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(area_path(code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(times)
        .mount(server)
        .await;
}
