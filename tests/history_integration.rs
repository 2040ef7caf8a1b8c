use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tetrio_api_client::history::HistoryClient;
use tetrio_api_client::rate_limit::RateLimiter;
use tetrio_api_client::{Context, ErrorKind, TetrioError};

const UID: &str = "5e32fc85ab319c2ab1beb07c";

const HISTORY_CSV: &str = "\
user_id,gamesplayed,gameswon,rating,glicko,rank,apm,pps,vs,created_at
5e32fc85ab319c2ab1beb07c,120,70,19000.25,2200.5,ss,90.5,2.31,190.2,2023-05-01 12:00:00
5e32fc85ab319c2ab1beb07c,130,77,19400.75,2240,ss,92,2.4,195,2023-05-02 12:00:00.5
5e32fc85ab319c2ab1beb07c,140,80,18900,2190.25,s+,88,2.28,186.75,2023-05-03 12:00:00.123456789
";

fn build_client(server: &MockServer) -> HistoryClient {
    HistoryClient::new(Arc::new(RateLimiter::unlimited())).base_url(format!("{}/tlhist", server.uri()))
}

#[tokio::test]
async fn test_all_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/tlhist/{UID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY_CSV))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let records = client
        .all_records(&Context::background(), UID)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].rating, 19000.25);
    assert_eq!(records[2].rank, "s+");
    assert_eq!(records[2].created_at.nanosecond(), 123_456_789);
    assert_eq!(records[1].to_fields()[9], "2023-05-02 12:00:00.5");
}

#[tokio::test]
async fn test_unknown_uid_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/tlhist/{UID}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .all_records(&Context::background(), UID)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, TetrioError::HistoryNotFound(ref uid) if uid == UID));
}

#[tokio::test]
async fn test_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/tlhist/{UID}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .raw_data(&Context::background(), UID)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_truncated_row_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/tlhist/{UID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("header\n5e32fc85ab319c2ab1beb07c,120,70\n"),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .all_records(&Context::background(), UID)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
}
