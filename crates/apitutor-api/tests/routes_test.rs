//! Integration tests for the full route table
//!
//! Every test builds the app against an in-memory store, so nothing touches
//! the filesystem.

use actix_web::{http::StatusCode, test, web, App};
use apitutor_api::{configure_routes, Lessons};
use apitutor_auth::AdminSecret;
use apitutor_core::config::TutorConfig;
use apitutor_core::traits::CustomerRepository;
use apitutor_services::{AdminService, CallRecorder, CustomerService};
use apitutor_store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

const SECRET: &str = "tutor-admin";

macro_rules! init_app {
    ($store:expr) => {{
        let store: Arc<MemoryStore> = $store;
        let recorder = CallRecorder::new(store.clone());
        let tutor = TutorConfig {
            project: "postman-customers".to_string(),
            project_domain: "postman-customers".to_string(),
            admin_secret: Some(SECRET.to_string()),
        };
        test::init_service(
            App::new()
                .app_data(web::Data::new(CustomerService::new(
                    store.clone(),
                    recorder.clone(),
                )))
                .app_data(web::Data::new(AdminService::new(
                    store.clone(),
                    recorder.clone(),
                    AdminSecret::new(tutor.admin_secret.clone()),
                )))
                .app_data(web::Data::new(recorder))
                .app_data(web::Data::new(Lessons::new(&tutor)))
                .configure(configure_routes),
        )
        .await
    }};
}

fn new_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

#[actix_web::test]
async fn test_landing_for_postman_and_browser() {
    let app = init_app!(new_store());

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("User-Agent", "PostmanRuntime/7.36.0"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tutorial"]["title"], "postman-customers");

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("User-Agent", "Mozilla/5.0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().starts_with("<h1>postman-customers</h1>"));
}

#[actix_web::test]
async fn test_owner_workflow() {
    let store = new_store();
    let app = init_app!(store.clone());

    // Create as alice
    let req = test::TestRequest::post()
        .uri("/customer")
        .insert_header(("user-id", "alice"))
        .insert_header(("auth_key", "anything"))
        .set_json(json!({ "name": "Dorothy Zbornak", "type": "Individual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["customer"]["id"].as_str().unwrap().to_string();
    assert_eq!(store.find(&id).await.unwrap().unwrap().admin, "alice");

    // Bob may not touch it
    let req = test::TestRequest::put()
        .uri(&format!("/customer/{}", id))
        .insert_header(("user-id", "bob"))
        .insert_header(("auth_key", "anything"))
        .set_json(json!({ "name": "Sophia Petrillo", "type": "Individual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request is invalid! ⛔");

    // Alice may
    let req = test::TestRequest::put()
        .uri(&format!("/customer/{}", id))
        .insert_header(("user-id", "alice"))
        .insert_header(("auth_key", "anything"))
        .set_json(json!({ "name": "Sophia Petrillo", "type": "Individual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(store.find(&id).await.unwrap().unwrap().name, "Sophia Petrillo");

    // Only alice sees it in the list
    let req = test::TestRequest::get()
        .uri("/customers")
        .insert_header(("user-id", "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let customers = body["data"]["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 4);
    assert!(customers.iter().all(|c| c.get("admin").is_none()));

    let req = test::TestRequest::get()
        .uri("/customers")
        .insert_header(("user-id", "bob"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["customers"].as_array().unwrap().len(), 3);

    // Alice deletes it
    let req = test::TestRequest::delete()
        .uri(&format!("/customer/{}", id))
        .insert_header(("user-id", "alice"))
        .insert_header(("auth_key", "anything"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(store.find(&id).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_create_accepts_form_body() {
    let store = new_store();
    let app = init_app!(store.clone());

    let req = test::TestRequest::post()
        .uri("/customer")
        .insert_header(("auth_key", "anything"))
        .set_form([("name", "Stan Zbornak"), ("type", "Individual")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created = store.snapshot().customers.pop().unwrap();
    assert_eq!(created.name, "Stan Zbornak");
    assert_eq!(created.admin, "anonymous");
}

#[actix_web::test]
async fn test_create_refusals() {
    let store = new_store();
    let app = init_app!(store.clone());

    let req = test::TestRequest::post()
        .uri("/customer")
        .set_json(json!({ "name": "Dorothy Zbornak", "type": "Individual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request is unauthorized! 🚫");

    let req = test::TestRequest::post()
        .uri("/customer")
        .insert_header(("auth_key", "anything"))
        .set_json(json!({ "name": "Dorothy Zbornak" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["tutorial"]["steps"][0]["raw_data"],
        json!({ "name": "Dorothy Zbornak", "type": "Individual" })
    );

    // Raw text body is unreadable and counts as empty
    let req = test::TestRequest::post()
        .uri("/customer")
        .insert_header(("auth_key", "anything"))
        .insert_header(("content-type", "text/plain"))
        .set_payload(r#"{"name": "Dorothy Zbornak", "type": "Individual"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.snapshot().customers.len(), 3);
}

#[actix_web::test]
async fn test_placeholder_id() {
    let app = init_app!(new_store());

    let req = test::TestRequest::put()
        .uri("/customer/placeholder")
        .insert_header(("user-id", "alice"))
        .insert_header(("auth_key", "anything"))
        .set_json(json!({ "name": "Sophia Petrillo", "type": "Individual" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request is incomplete! ✋");
    assert!(body["tutorial"]["intro"]
        .as_str()
        .unwrap()
        .ends_with("customer to update."));
}

#[actix_web::test]
async fn test_get_customer() {
    let store = new_store();
    let app = init_app!(store.clone());
    let seed = store.snapshot().customers[1].clone();

    let req = test::TestRequest::get()
        .uri(&format!("/customer?id={}", seed.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"]["customer"],
        json!({ "id": seed.id, "name": "Rose Nylund", "type": "Individual" })
    );

    let req = test::TestRequest::get().uri("/customer").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request is missing some info! 😕");

    let req = test::TestRequest::get().uri("/customer?id=nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request contains invalid info! 😕");

    // Lookups only ever touch the log
    assert_eq!(store.snapshot().customers.len(), 3);
    assert_eq!(store.snapshot().calls.len(), 3);
}

#[actix_web::test]
async fn test_repeated_query_keys_use_first_value() {
    let store = new_store();
    let app = init_app!(store.clone());
    let seed_id = store.snapshot().customers[0].id.clone();

    let req = test::TestRequest::get()
        .uri("/customer?id=a&id=b")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tutorial"]["title"], "Your request contains invalid info! 😕");

    let calls = store.snapshot().calls;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].route, "GET /customer");
    assert_eq!(calls[0].context, "- a");

    let req = test::TestRequest::get()
        .uri(&format!("/customer?id={}&id=other", seed_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/records?cust_id={}&cust_id=other", seed_id))
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "deleted" }));
    assert!(store.find(&seed_id).await.unwrap().is_none());
    assert_eq!(store.snapshot().calls.len(), 3);
}

#[actix_web::test]
async fn test_admin_routes() {
    let store = new_store();
    let app = init_app!(store.clone());
    store
        .insert(apitutor_core::models::Customer::new(
            "Dorothy Zbornak",
            "Individual",
            "alice",
        ))
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/all")
        .insert_header(("admin_key", "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let req = test::TestRequest::get()
        .uri("/all")
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let all = body["data"]["customers"].as_array().unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[3]["admin"], "alice");

    let req = test::TestRequest::get()
        .uri("/reset")
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "DB reset" }));
    assert_eq!(store.snapshot().customers.len(), 3);

    let req = test::TestRequest::get()
        .uri("/clear")
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "DB cleared" }));
    assert!(store.snapshot().customers.is_empty());

    let req = test::TestRequest::get()
        .uri("/calls")
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let routes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["where"].as_str().unwrap())
        .collect();
    assert_eq!(
        routes,
        ["GET /all", "GET /all", "GET /reset", "GET /clear", "GET /calls"]
    );
}

#[actix_web::test]
async fn test_admin_delete_ignores_owner() {
    let store = new_store();
    let app = init_app!(store.clone());
    let seed_id = store.snapshot().customers[0].id.clone();

    let req = test::TestRequest::delete()
        .uri(&format!("/records?cust_id={}", seed_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.find(&seed_id).await.unwrap().is_some());

    let req = test::TestRequest::delete()
        .uri(&format!("/records?cust_id={}", seed_id))
        .insert_header(("admin_key", SECRET))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "deleted" }));
    assert!(store.find(&seed_id).await.unwrap().is_none());

    let req = test::TestRequest::delete()
        .uri("/records")
        .insert_header(("admin_key", SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_routes() {
    let store = new_store();
    let app = init_app!(store.clone());

    for req in [
        test::TestRequest::get().uri("/cats"),
        test::TestRequest::patch().uri("/customer"),
        test::TestRequest::get().uri("/customer/abc123"),
        test::TestRequest::post().uri("/reset"),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["tutorial"]["title"], "Your request is invalid! 🚧");
    }

    // Invalid routes are not operations and leave no call entry
    assert!(store.snapshot().calls.is_empty());
}
