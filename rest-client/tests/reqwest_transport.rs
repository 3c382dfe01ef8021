use rest_client::payload::decode_query_payload;
use rest_client::{ApiError, Form, HeaderValue, Payload, ReqwestClient, RestClient};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => Payload::Json(map),
        _ => panic!("expected object"),
    }
}

async fn client(server: &MockServer) -> RestClient<ReqwestClient> {
    RestClient::new(ReqwestClient::new(), server.uri())
}

#[tokio::test]
async fn get_sends_payload_query_and_resolves_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks"))
        .and(query_param(
            "__payload",
            r#"{"query":"rock","fields":["track:cover"]}"#,
        ))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 42 })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let result = api
        .get("/tracks", object(json!({ "query": "rock" })), &["track:cover"])
        .await
        .unwrap();

    assert_eq!(result, json!(42));
    assert_eq!(api.status_code(), Some(200));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        decode_query_payload(requests[0].url.as_str()).unwrap(),
        json!({ "query": "rock", "fields": ["track:cover"] })
    );
}

#[tokio::test]
async fn post_sends_json_body_with_bearer_and_hook_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(header("authorization", "Bearer secret"))
        .and(header("content-type", "application/json"))
        .and(header("x-lang", "fr"))
        .and(body_json(json!({ "email": "a@b.c", "fields": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "token": "t" } })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    api.set_token(Some("secret".to_string()));
    api.set_headers_handler(|headers| {
        headers.insert("x-lang", HeaderValue::from_static("fr"));
    });

    let result = api
        .post("/users/login", object(json!({ "email": "a@b.c" })), &[])
        .await
        .unwrap();
    assert_eq!(result, json!({ "token": "t" }));
}

#[tokio::test]
async fn cleared_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    api.set_token(Some("old".to_string()));
    api.set_token(None);
    api.get("/users/me", Payload::default(), &[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn application_error_rejects_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/tracks/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "bad" })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let err = api
        .patch("/tracks/1", Payload::default(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Application { status: 400, ref message } if message == "bad"));
    assert_eq!(api.status_code(), Some(400));
}

#[tokio::test]
async fn unauthorized_goes_to_hook_when_registered() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tracks/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "expired" })))
        .mount(&server)
        .await;

    let api = client(&server).await;

    let err = api
        .delete("/tracks/1", Payload::default(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Application { status: 401, ref message } if message == "expired"));

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    api.set_auth_error_handler(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = api
        .delete("/tracks/1", Payload::default(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthIntercepted));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let err = api.get("/broken", Payload::default(), &[]).await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, ApiError::MalformedResponse { status: 502, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = RestClient::new(ReqwestClient::new(), uri);
    let err = api.get("/x", Payload::default(), &[]).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(api.status_code(), None);
}

#[tokio::test]
async fn form_upload_is_sent_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assets/upload/form"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "id": "a1" } })))
        .mount(&server)
        .await;

    let api = client(&server).await;
    let form = Form::new().file_with_mime("upload", "cover.png", "image/png", b"PNGDATA".to_vec());
    let result = api
        .post("/assets/upload/form", form, &["asset:url"])
        .await
        .unwrap();
    assert_eq!(result, json!({ "id": "a1" }));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"fields\""));
    assert!(body.contains("asset:url"));
    assert!(body.contains("filename=\"cover.png\""));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
async fn invalid_mime_type_is_an_encode_error() {
    let server = MockServer::start().await;

    let api = client(&server).await;
    let form = Form::new().file_with_mime("upload", "cover.png", "not a mime", b"x".to_vec());
    let err = api
        .post("/assets/upload/form", form, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Encode(_)));
    assert_eq!(err.code(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}
