use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_credentials, HandleReply};
use tower::ServiceExt;

const HANDLE_URI: &str = "/api/handles/21.T11998/abc";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const RECORD: &str = r#"{"handle":"21.T11998/abc","values":[
    {"index":1,"type":"URL","data":"http://example.org"},
    {"index":2,"type":"EMAIL","data":"admin@example.org"}
]}"#;

// --- get ---

#[tokio::test]
async fn get_unknown_handle_returns_404() {
    let resp = app().oneshot(empty_request("GET", HANDLE_URI)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let reply: HandleReply = body_json(resp).await;
    assert_eq!(reply.response_code, 100);
    assert_eq!(reply.handle.as_deref(), Some("21.T11998/abc"));
}

// --- put ---

#[tokio::test]
async fn put_new_handle_returns_201() {
    let resp = app()
        .oneshot(json_request("PUT", HANDLE_URI, RECORD))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let reply: HandleReply = body_json(resp).await;
    assert_eq!(reply.response_code, 1);
}

#[tokio::test]
async fn put_mismatched_handle_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/handles/21.T11998/other",
            RECORD,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("PUT", HANDLE_URI, r#"{"values":[]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- delete ---

#[tokio::test]
async fn delete_unknown_handle_returns_404() {
    let resp = app().oneshot(empty_request("DELETE", HANDLE_URI)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn writes_without_credentials_return_401() {
    let resp = app_with_credentials("user", "pass")
        .oneshot(json_request("PUT", HANDLE_URI, RECORD))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let reply: HandleReply = body_json(resp).await;
    assert_eq!(reply.response_code, 402);
}

#[tokio::test]
async fn writes_with_credentials_succeed() {
    let mut req = json_request("PUT", HANDLE_URI, RECORD);
    req.headers_mut().insert(
        http::header::AUTHORIZATION,
        "Basic dXNlcjpwYXNz".parse().unwrap(),
    );
    let resp = app_with_credentials("user", "pass").oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn reads_do_not_require_credentials() {
    let resp = app_with_credentials("user", "pass")
        .oneshot(empty_request("GET", HANDLE_URI))
        .await
        .unwrap();

    // Unknown, but not rejected.
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn handle_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", HANDLE_URI, RECORD))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // read everything
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", HANDLE_URI))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: HandleReply = body_json(resp).await;
    assert_eq!(reply.values.unwrap().len(), 2);

    // read filtered by type
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("{HANDLE_URI}?type=EMAIL")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: HandleReply = body_json(resp).await;
    let values = reply.values.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].index, 2);
    assert_eq!(values[0].data, "admin@example.org");

    // replace
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            HANDLE_URI,
            r#"{"handle":"21.T11998/abc","values":[{"index":1,"type":"URL","data":"http://example.com"}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", HANDLE_URI))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // read after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", HANDLE_URI))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
