use crate::common::*;
use citydata_collector::collector::{BatchRunner, CitydataClient, Collector};
use citydata_collector::config::load_config;
use citydata_collector::output::CsvExporter;
use citydata_collector::retry::RetryPolicy;
use citydata_collector::schedule::{run_collection, Scheduler, TickOutcome};
use citydata_collector::{AreaEntry, AreaRegistry};
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use wiremock::MockServer;

fn scheduler(
    server: &MockServer,
    out: &std::path::Path,
    clock: FixedClock,
) -> Scheduler<CitydataClient, FixedClock, RecordingSleeper> {
    let client = CitydataClient::new(api_config(server)).unwrap();
    let registry = AreaRegistry::new(vec![AreaEntry::new("A", "100"), AreaEntry::new("B", "200")]);
    Scheduler::new(
        BatchRunner::new(
            Collector::new(client, RetryPolicy::new(3, Duration::from_secs(5))),
            registry,
        ),
        CsvExporter::new(out),
        RetryPolicy::with_retries(3, Duration::from_secs(10)),
        clock,
        RecordingSleeper::default(),
    )
}

#[tokio::test]
async fn test_failed_tick_writes_no_file() {
    let server = MockServer::start().await;
    // One initial round plus three reruns, three attempts per area each
    mount_empty(&server, "100", 12).await;
    mount_empty(&server, "200", 12).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("유동인구데이터");
    let scheduler = scheduler(&server, &out, FixedClock(local(14, 7, 0)));

    let (outcome, started_at) = scheduler.run_tick().await;

    assert!(matches!(outcome, TickOutcome::NoData));
    assert_eq!(started_at, local(14, 7, 0));
    assert!(!out.exists());
    server.verify().await;
}

#[tokio::test]
async fn test_tick_then_wait_for_slot() {
    let server = MockServer::start().await;
    mount_ok(&server, "100", "A").await;
    mount_ok(&server, "200", "B").await;

    let tmp = TempDir::new().unwrap();
    let scheduler = scheduler(&server, tmp.path(), FixedClock(local(14, 31, 0)));

    let (outcome, started_at) = scheduler.run_tick().await;
    match outcome {
        TickOutcome::Exported { path, records } => {
            assert_eq!(records, 2);
            assert!(path.ends_with("population_stats_20240115_1431.csv"));
        }
        other => panic!("expected export, got {:?}", other),
    }

    let next = scheduler.wait_until_next_slot(&started_at).await;
    assert_eq!(next, local(15, 0, 0));
}

#[tokio::test]
async fn test_run_once_from_config_file() {
    let server = MockServer::start().await;
    mount_ok(&server, "POI014", "강남역").await;
    mount_empty(&server, "POI015", 2).await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[api]
base-url = "{}"
api-key = "{}"

[retry]
area-max-attempts = 2
area-delay-secs = 0
batch-delay-secs = 0

[output]
directory = "{}"

[[area]]
name = "강남역"
code = "POI014"

[[area]]
name = "건대입구역"
code = "POI015"
"#,
        server.uri(),
        API_KEY,
        out.display()
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).expect("Failed to load config");
    run_collection(&config, Some(1)).await.expect("Run failed");

    let files: Vec<_> = std::fs::read_dir(&out)
        .expect("Output directory missing")
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("population_stats_"));
    assert!(files[0].ends_with(".csv"));

    let mut reader = csv::Reader::from_path(out.join(&files[0])).unwrap();
    assert_eq!(reader.records().count(), 1);

    server.verify().await;
}
