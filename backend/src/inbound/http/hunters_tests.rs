//! Tests for the hunter roster handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::Error;
use crate::domain::ports::MockHunterCommand;
use crate::inbound::http::test_utils::{TestWorld, in_memory_world, str_field, test_app, u64_field};
use crate::test_support::FixtureClock;

#[fixture]
fn world() -> TestWorld {
    in_memory_world(Arc::new(FixtureClock::march(10, 9)), 0)
}

#[rstest]
#[actix_web::test]
async fn create_returns_fresh_hunter_with_id(world: TestWorld) {
    let app = actix_test::init_service(test_app(world.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/hunters")
        .set_json(json!({ "name": "Sung Jinwoo", "title": "E-Rank" }))
        .to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert!(str_field(&body, "id").is_some_and(|id| uuid::Uuid::parse_str(id).is_ok()));
    assert_eq!(str_field(&body, "name"), Some("Sung Jinwoo"));
    assert_eq!(str_field(&body, "title"), Some("E-Rank"));
    assert_eq!(u64_field(&body, "level"), Some(1));
    assert_eq!(u64_field(&body, "exp"), Some(0));
    assert_eq!(u64_field(&body, "streak"), Some(0));
    assert_eq!(body.get("last_checkin"), Some(&Value::Null));
}

#[rstest]
#[case(json!({ "name": "" }))]
#[case(json!({ "name": "   ", "title": "Ghost" }))]
#[actix_web::test]
async fn blank_name_fails_validation(world: TestWorld, #[case] payload: Value) {
    let app = actix_test::init_service(test_app(world.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/hunters")
        .set_json(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(str_field(&body, "code"), Some("validation_failed"));
}

#[rstest]
#[actix_web::test]
async fn missing_name_fails_validation(world: TestWorld) {
    let app = actix_test::init_service(test_app(world.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/hunters")
        .set_json(json!({ "title": "Nameless" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(str_field(&body, "code"), Some("validation_failed"));
}

#[rstest]
#[actix_web::test]
async fn unparseable_body_is_a_bad_request(world: TestWorld) {
    let app = actix_test::init_service(test_app(world.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/hunters")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "Jinwoo""#)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(str_field(&body, "code"), Some("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn list_returns_hunters_oldest_first(world: TestWorld) {
    let app = actix_test::init_service(test_app(world.state)).await;
    for name in ["Jinwoo", "Jinho", "Hae-In"] {
        let request = actix_test::TestRequest::post()
            .uri("/api/hunters")
            .set_json(json!({ "name": name }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let request = actix_test::TestRequest::get().uri("/api/hunters").to_request();
    let body: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;

    let names: Vec<_> = body.iter().filter_map(|h| str_field(h, "name")).collect();
    assert_eq!(names, ["Jinwoo", "Jinho", "Hae-In"]);
}

#[rstest]
#[actix_web::test]
async fn store_outage_maps_to_service_unavailable(mut world: TestWorld) {
    let mut hunters = MockHunterCommand::new();
    hunters
        .expect_create_hunter()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("hunter store unavailable")));
    world.state.hunters = Arc::new(hunters);
    let app = actix_test::init_service(test_app(world.state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/hunters")
        .set_json(json!({ "name": "Jinwoo" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().contains_key("trace-id"));
}
