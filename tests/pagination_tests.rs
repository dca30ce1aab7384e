//! Integration tests for listing every page of a resource.

use factorialhr::rest::resources::{Team, TeamFilters};
use factorialhr::rest::{ResourceError, RestResource};
use factorialhr::{ApiKey, BaseUrl, Credential, ErrorKind, FactorialConfig, RestClient};
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEAMS_PATH: &str = "/api/2025-10-01/resources/teams/teams";

fn client(server: &MockServer) -> RestClient {
    client_with_page_size(server, None)
}

fn client_with_page_size(server: &MockServer, page_size: Option<u32>) -> RestClient {
    let mut builder = FactorialConfig::builder().base_url(BaseUrl::new(server.uri()).unwrap());
    if let Some(size) = page_size {
        builder = builder.page_size(size);
    }
    RestClient::new(
        builder.build().unwrap(),
        Credential::api_key(ApiKey::new("key").unwrap()),
    )
    .unwrap()
}

async fn mount_page(server: &MockServer, page: u32, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(TEAMS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_pages_are_concatenated_in_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}], "meta": {"current_page": 1, "total_pages": 2}}),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"data": [{"id": 2}], "meta": {"current_page": 2, "total_pages": 2}}),
        1,
    )
    .await;

    let items: Vec<Value> = client(&server).all("teams/teams", Vec::new()).await.unwrap();

    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_failing_page_fails_the_whole_listing() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}], "meta": {"current_page": 1, "total_pages": 3}}),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(TEAMS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 3, json!({"data": [{"id": 3}]}), 0).await;

    let error = client(&server)
        .all::<Value>("teams/teams", Vec::new())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Http);
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.page(), Some(2));
    assert!(error.to_string().contains("page 2"));
}

#[tokio::test]
async fn test_empty_page_stops_listing_despite_metadata() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}], "meta": {"current_page": 1, "total_pages": 5}}),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"data": [], "meta": {"current_page": 2, "total_pages": 5}}),
        1,
    )
    .await;
    mount_page(&server, 3, json!({"data": [{"id": 3}]}), 0).await;

    let items: Vec<Value> = client(&server).all("teams/teams", Vec::new()).await.unwrap();

    assert_eq!(items, vec![json!({"id": 1})]);
}

#[tokio::test]
async fn test_offset_metadata_drives_pagination() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}], "meta": {"has_next_page": true, "limit": 1}}),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"data": [{"id": 2}], "meta": {"has_next_page": false, "limit": 1}}),
        1,
    )
    .await;

    let items: Vec<Value> = client(&server).all("teams/teams", Vec::new()).await.unwrap();

    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_explicit_page_fetches_only_that_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        3,
        json!({"data": [{"id": 30}], "meta": {"current_page": 3, "total_pages": 9}}),
        1,
    )
    .await;

    let items: Vec<Value> = client(&server)
        .all("teams/teams", vec![("page".to_string(), "3".to_string())])
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": 30})]);
}

#[tokio::test]
async fn test_page_size_is_sent_as_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TEAMS_PATH))
        .and(query_param("limit", "50"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let items: Vec<Value> = client_with_page_size(&server, Some(50))
        .all("teams/teams", Vec::new())
        .await
        .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_stream_fetches_pages_lazily() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}, {"id": 2}], "meta": {"current_page": 1, "total_pages": 2}}),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"data": [{"id": 3}], "meta": {"current_page": 2, "total_pages": 2}}),
        0,
    )
    .await;

    let client = client(&server);
    let first: Vec<Value> = client
        .stream("teams/teams", Vec::new())
        .take(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_stream_stops_after_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 1}], "meta": {"current_page": 1, "total_pages": 2}}),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(TEAMS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let results: Vec<Result<Value, _>> = client.stream("teams/teams", Vec::new()).collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().page(), Some(2));
}

#[tokio::test]
async fn test_typed_listing_sends_filters_and_decodes_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TEAMS_PATH))
        .and(query_param("ids[]", "3"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 3, "name": "Platform", "company_id": 1}],
            "meta": {"current_page": 1, "total_pages": 1, "total_count": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let teams = Team::all(&client, &TeamFilters { ids: vec![3] }).await.unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Platform");
}

#[tokio::test]
async fn test_typed_listing_reports_item_that_fails_to_decode() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"data": [{"id": 3, "name": "Platform", "company_id": 1}, {"id": "x"}]}),
        1,
    )
    .await;

    let client = client(&server);
    let error = Team::all(&client, &TeamFilters::default()).await.unwrap_err();

    let ResourceError::Api(api) = error else {
        panic!("expected an API error, got {error:?}");
    };
    assert_eq!(api.kind(), ErrorKind::Decode);
    assert_eq!(api.page(), Some(1));
    assert!(api.to_string().contains("item 1"));
}
