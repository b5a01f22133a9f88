use crate::common::*;
use citydata_collector::collector::{BatchRunner, CitydataClient, Collector, PopulationApi};
use citydata_collector::output::{CsvExporter, UTF8_BOM};
use citydata_collector::record::CSV_HEADERS;
use citydata_collector::retry::RetryPolicy;
use citydata_collector::{AreaEntry, AreaRegistry};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn area_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_secs(5))
}

fn collector(server: &MockServer) -> Collector<CitydataClient> {
    let client = CitydataClient::new(api_config(server)).expect("Failed to build client");
    Collector::new(client, area_policy())
}

#[tokio::test]
async fn test_fetch_area_success() {
    let server = MockServer::start().await;
    mount_ok(&server, "POI014", "강남역").await;

    let area = AreaEntry::new("강남역", "POI014");
    let sleeper = RecordingSleeper::default();
    let record = collector(&server)
        .fetch_area(&area, &sleeper)
        .await
        .expect("Expected a record");

    assert_eq!(record.area_code, "POI014");
    assert_eq!(record.area_name, "강남역");
    assert_eq!(record.congestion_level, "붐빔");
    // Numeric JSON is kept as text
    assert_eq!(record.population_max, "56000");
    assert!(sleeper.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_area_empty_exhausts_retries() {
    let server = MockServer::start().await;
    mount_empty(&server, "POI014", 3).await;

    let area = AreaEntry::new("강남역", "POI014");
    let sleeper = RecordingSleeper::default();
    let record = collector(&server).fetch_area(&area, &sleeper).await;

    assert!(record.is_none());
    // Sleeps only between attempts: 3 requests, 2 waits
    assert_eq!(sleeper.calls(), vec![Duration::from_secs(5); 2]);
    server.verify().await;
}

#[tokio::test]
async fn test_fetch_area_recovers_from_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(area_path("POI014")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_ok(&server, "POI014", "강남역").await;

    let area = AreaEntry::new("강남역", "POI014");
    let sleeper = RecordingSleeper::default();
    let record = collector(&server).fetch_area(&area, &sleeper).await;

    assert!(record.is_some());
    assert_eq!(sleeper.calls().len(), 1);
}

#[tokio::test]
async fn test_fetch_area_retries_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(area_path("POI014")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>점검 중</html>"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_ok(&server, "POI014", "강남역").await;

    let area = AreaEntry::new("강남역", "POI014");
    let sleeper = RecordingSleeper::default();
    let record = collector(&server).fetch_area(&area, &sleeper).await;

    assert!(record.is_some());
    assert_eq!(sleeper.calls().len(), 2);
}

#[tokio::test]
async fn test_client_errors_hide_access_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = CitydataClient::new(api_config(&server)).unwrap();
    let err = client
        .fetch(&AreaEntry::new("강남역", "POI014"))
        .await
        .unwrap_err();

    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn test_one_area_empty_scenario() {
    let server = MockServer::start().await;
    mount_ok(&server, "100", "A").await;
    mount_empty(&server, "200", 3).await;

    let registry = AreaRegistry::new(vec![AreaEntry::new("A", "100"), AreaEntry::new("B", "200")]);
    let runner = BatchRunner::new(collector(&server), registry);
    let sleeper = RecordingSleeper::default();

    let batch = runner.run_batch(&sleeper).await.expect("Expected a batch");
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.records()[0].area_name, "A");

    let tmp = TempDir::new().unwrap();
    let path = CsvExporter::new(tmp.path())
        .export(&batch, &local(14, 30, 5))
        .expect("Export failed");

    assert!(path.ends_with("population_stats_20240115_1430.csv"));

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "100");
    assert_eq!(&rows[0][1], "A");

    server.verify().await;
}

#[tokio::test]
async fn test_all_areas_empty_scenario() {
    let server = MockServer::start().await;
    mount_empty(&server, "100", 3).await;
    mount_empty(&server, "200", 3).await;

    let registry = AreaRegistry::new(vec![AreaEntry::new("A", "100"), AreaEntry::new("B", "200")]);
    let runner = BatchRunner::new(collector(&server), registry);
    let sleeper = RecordingSleeper::default();

    assert!(runner.run_batch(&sleeper).await.is_none());
    server.verify().await;
}
