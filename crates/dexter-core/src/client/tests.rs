//! Tests for the client facade

use super::*;
use crate::envelope::ResponseMeta;
use serde_json::json;

fn api_with(mock: MockDataClient) -> Api {
    Api::from_client(mock)
}

#[tokio::test]
async fn test_get_forces_get_method_and_decodes() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("mock");
    mock.expect_call()
        .withf(|endpoint, options| {
            endpoint.to_string() == "/numbers" && options.method == Method::Get
        })
        .times(1)
        .returning(|_, _| {
            ApiResponse::ok(json!([1, 2, 3])).with_meta(ResponseMeta::new(3, 1, 10))
        });

    let api = api_with(mock);
    let response: ApiResponse<Vec<u32>> = api
        .get("/numbers", RequestOptions::new(Method::Post))
        .await;

    assert_eq!(response.data(), Some(&vec![1, 2, 3]));
    assert_eq!(response.meta().and_then(|m| m.total), Some(3));
}

#[tokio::test]
async fn test_post_encodes_body() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("mock");
    mock.expect_call()
        .withf(|_, options| {
            options.method == Method::Post && options.body == Some(json!({"name": "x"}))
        })
        .times(1)
        .returning(|_, _| ApiResponse::empty());

    let api = api_with(mock);
    let response: ApiResponse<Value> = api
        .post("/things", &json!({"name": "x"}), RequestOptions::default())
        .await;

    assert!(response.is_success());
    assert!(response.data().is_none());
}

#[tokio::test]
async fn test_put_patch_delete_set_their_verbs() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("mock");
    mock.expect_call()
        .returning(|_, options| ApiResponse::ok(json!(options.method.as_str())));

    let api = api_with(mock);
    let body = json!({});

    let put: ApiResponse<String> = api.put("/x", &body, RequestOptions::default()).await;
    let patch: ApiResponse<String> = api.patch("/x", &body, RequestOptions::default()).await;
    let delete: ApiResponse<String> = api.delete("/x", RequestOptions::default()).await;

    assert_eq!(put.data().map(String::as_str), Some("PUT"));
    assert_eq!(patch.data().map(String::as_str), Some("PATCH"));
    assert_eq!(delete.data().map(String::as_str), Some("DELETE"));
}

#[tokio::test]
async fn test_undecodable_payload_becomes_failure() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("mock");
    mock.expect_call()
        .returning(|_, _| ApiResponse::ok(json!({"unexpected": true})));

    let api = api_with(mock);
    let response: ApiResponse<Vec<u32>> = api.get("/numbers", RequestOptions::default()).await;

    assert!(!response.is_success());
    assert!(response.error().unwrap().starts_with("Malformed response body"));
}

#[tokio::test]
async fn test_failure_passes_through() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("mock");
    mock.expect_call()
        .returning(|endpoint, _| Error::EndpointNotFound(endpoint.to_string()).into());

    let api = api_with(mock);
    let response: ApiResponse<Value> = api.get("/nowhere", RequestOptions::default()).await;

    assert_eq!(response.error(), Some("Endpoint not found: /nowhere"));
}

#[test]
fn test_backend_name() {
    let mut mock = MockDataClient::new();
    mock.expect_name().return_const("fixtures");

    let api = api_with(mock);
    assert_eq!(api.backend(), "fixtures");
    assert!(format!("{:?}", api).contains("fixtures"));
}
