use std::sync::Once;
use std::time::Duration;

use serde_json::json;
use timeline_catalog::{CatalogEvent, CatalogHandle, CatalogSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(viewer_logging::initialize_for_tests);
}

const RECV_TIMEOUT: Duration = Duration::from_secs(10);

// The handle blocks on recv_timeout while wiremock serves from the test
// runtime, so these tests need more than one worker thread.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handle_delivers_completed_fetches_as_events() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/mediafiles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "year": 2018, "count": 140 }
        ])))
        .mount(&server)
        .await;

    let settings = CatalogSettings {
        base_url: server.uri(),
        ..CatalogSettings::default()
    };
    let handle = CatalogHandle::new(settings).expect("handle starts");

    handle.request_years();
    let event = handle.recv_timeout(RECV_TIMEOUT).expect("event arrives");

    match event {
        CatalogEvent::Years(Ok(years)) => {
            assert_eq!(years.len(), 1);
            assert_eq!(years[0].year, 2018);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn events_echo_the_selection_they_were_fetched_for() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/mediafiles/2018/8/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2018-08-04", "count": 19 }
        ])))
        .mount(&server)
        .await;

    let settings = CatalogSettings {
        base_url: server.uri(),
        ..CatalogSettings::default()
    };
    let handle = CatalogHandle::new(settings).expect("handle starts");

    handle.request_days(2018, 8);
    let event = handle.recv_timeout(RECV_TIMEOUT).expect("event arrives");

    match event {
        CatalogEvent::Days {
            year,
            month,
            result,
        } => {
            assert_eq!((year, month), (2018, 8));
            let days = result.expect("fetch ok");
            assert_eq!(days[0].day, 4);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completed_events_queue_until_polled_with_try_recv() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/mediafiles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "year": 2018, "count": 140 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/mediafiles/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mostRecentYearMonth": "2018-08"
        })))
        .mount(&server)
        .await;

    let settings = CatalogSettings {
        base_url: server.uri(),
        ..CatalogSettings::default()
    };
    let handle = CatalogHandle::new(settings).expect("handle starts");

    handle.request_years();
    handle.request_stats();

    // Both responses stay queued until polled; completion order between the
    // two fetches is not fixed.
    let deadline = std::time::Instant::now() + RECV_TIMEOUT;
    let mut events = Vec::new();
    while events.len() < 2 && std::time::Instant::now() < deadline {
        match handle.try_recv() {
            Some(event) => events.push(event),
            None => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }

    assert_eq!(events.len(), 2);
    assert!(handle.try_recv().is_none());
    assert!(events
        .iter()
        .any(|event| matches!(event, CatalogEvent::Years(Ok(_)))));
    assert!(events
        .iter()
        .any(|event| matches!(event, CatalogEvent::Stats(Ok(_)))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn fetch_failures_travel_through_the_handle() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/mediafiles/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let settings = CatalogSettings {
        base_url: server.uri(),
        ..CatalogSettings::default()
    };
    let handle = CatalogHandle::new(settings).expect("handle starts");

    handle.request_years();
    let event = handle.recv_timeout(RECV_TIMEOUT).expect("event arrives");

    match event {
        CatalogEvent::Years(Err(err)) => {
            assert_eq!(err, timeline_catalog::CatalogError::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
