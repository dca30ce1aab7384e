//! Integration tests for typed resources and the resource registry.

use chrono::NaiveDate;
use factorialhr::rest::resources::{
    CompanyHoliday, CompanyHolidayFilters, Credentials, Employee, HalfDay, Leave, LeaveInput, Team,
    TeamInput, WebhookSubscription,
};
use factorialhr::rest::{lookup, ResourceError, RestResource, WritableResource};
use factorialhr::{ApiKey, BaseUrl, Credential, ErrorKind, FactorialConfig, RestClient};
use futures::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT: &str = "/api/2025-10-01/resources";

fn client(server: &MockServer) -> RestClient {
    let config = FactorialConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(config, Credential::api_key(ApiKey::new("key").unwrap())).unwrap()
}

fn employee_json(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "access_id": id + 100,
        "first_name": "Grace",
        "last_name": "Hopper",
        "full_name": "Grace Hopper",
        "company_id": 1
    })
}

#[tokio::test]
async fn test_get_by_id_decodes_wrapped_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/employees/employees/42")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": employee_json(42)})))
        .expect(1)
        .mount(&server)
        .await;

    let employee = Employee::get_by_id(&client(&server), 42).await.unwrap();

    assert_eq!(employee.id, 42);
    assert_eq!(employee.full_name, "Grace Hopper");
}

#[tokio::test]
async fn test_get_by_id_decodes_bare_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/employees/employees/42")))
        .respond_with(ResponseTemplate::new(200).set_body_json(employee_json(42)))
        .mount(&server)
        .await;

    let employee = Employee::get_by_id(&client(&server), 42).await.unwrap();

    assert_eq!(employee.access_id, 142);
}

#[tokio::test]
async fn test_get_by_id_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let error = Team::get_by_id(&client(&server), 9).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::NotFound { resource: "Team", ref id } if id == "9"
    ));
}

#[tokio::test]
async fn test_get_returns_one_page_with_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/holidays/company_holidays")))
        .and(query_param("page", "2"))
        .and(query_param("location_ids[]", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "location_id": 5, "date": "2025-12-24", "half_day": "end_of_day"}],
            "meta": {"current_page": 2, "total_pages": 4, "total_count": 31, "per_page": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = CompanyHolidayFilters {
        location_ids: vec![5],
        ..Default::default()
    };
    let page = CompanyHoliday::get(&client(&server), &filters, Some(2))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].half_day, Some(HalfDay::EndOfDay));
    assert_eq!(page.meta.current_page, 2);
    assert_eq!(page.meta.total_pages, 4);
    assert_eq!(page.meta.total_count, Some(31));
    assert!(page.meta.has_more());
}

#[tokio::test]
async fn test_stream_yields_typed_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/api_public/credentials")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "me", "company_id": 1, "employee_id": null}],
            "meta": {"current_page": 1, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let credentials: Vec<Credentials> = Credentials::stream(&client, &())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0].id, "me");
}

#[tokio::test]
async fn test_create_update_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ROOT}/teams/teams")))
        .and(body_json(json!({"name": "Platform"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 3, "name": "Platform", "company_id": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{ROOT}/teams/teams/3")))
        .and(body_json(json!({"name": "Infra", "description": "Servers"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 3, "name": "Infra", "description": "Servers", "company_id": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{ROOT}/teams/teams/3")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let created = Team::create(
        &client,
        &TeamInput {
            name: "Platform".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.id, 3);

    let updated = Team::update(
        &client,
        3,
        &TeamInput {
            name: "Infra".to_string(),
            description: Some("Servers".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Servers"));

    Team::delete(&client, 3).await.unwrap();
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let input = LeaveInput {
        employee_id: 1,
        leave_type_id: 2,
        start_on: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        finish_on: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        half_day: None,
        description: None,
    };
    let error = Leave::update(&client(&server), 77, &input).await.unwrap_err();

    assert!(matches!(error, ResourceError::NotFound { resource: "Leave", .. }));
}

#[tokio::test]
async fn test_validation_error_keeps_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"errors":["target_url"]}"#))
        .mount(&server)
        .await;

    let input = factorialhr::rest::resources::WebhookSubscriptionInput {
        target_url: "not a url".to_string(),
        subscription_type: "employee/created".to_string(),
        name: None,
        challenge: None,
    };
    let error = WebhookSubscription::create(&client(&server), &input)
        .await
        .unwrap_err();

    let api = error.api_error().unwrap();
    assert_eq!(api.kind(), ErrorKind::Http);
    assert_eq!(api.status(), Some(422));
}

#[tokio::test]
async fn test_all_raw_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/teams/memberships")))
        .and(query_param("lead", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "employee_id": 2, "team_id": 3, "lead": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client(&server)
        .all_raw("Membership", vec![("lead".to_string(), "true".to_string())])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["team_id"], 3);
}

#[tokio::test]
async fn test_all_raw_rejects_unknown_names_and_filters() {
    let server = MockServer::start().await;
    let client = client(&server);

    let error = client.all_raw("payroll/unknown", Vec::new()).await.unwrap_err();
    assert!(matches!(error, ResourceError::InvalidFilters { .. }));

    let error = client
        .all_raw("teams/teams", vec![("colour".to_string(), "red".to_string())])
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ResourceError::InvalidFilters { resource: "Team", ref reason } if reason.contains("colour")
    ));
}

#[test]
fn test_lookup_exposes_descriptor() {
    let descriptor = lookup("timeoff/leaves").unwrap();
    assert_eq!(descriptor.name, "Leave");
    assert!(descriptor.writable);
    assert!(descriptor.accepts("employee_ids[]"));
}
