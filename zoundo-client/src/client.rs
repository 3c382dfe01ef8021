// zoundo-client/src/client.rs
use crate::assets::Assets;
use crate::config::Config;
use crate::notifications::Notifications;
use crate::performers::Performers;
use crate::tracks::Tracks;
use crate::users::Users;
use anyhow::{anyhow, Result};
use rest_client::{HeaderValue, HttpClient, ReqwestClient, RestClient};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

const LANGUAGE_HEADER: &str = "accept-language";

pub struct ZoundoClient<C: HttpClient = ReqwestClient> {
    inner: RestClient<C>,
    language: Arc<RwLock<HeaderValue>>,
}

impl ZoundoClient<ReqwestClient> {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_http(config, ReqwestClient::new())
    }
}

impl<C: HttpClient> ZoundoClient<C> {
    /// Build a client over any transport
    pub fn with_http(config: &Config, http: C) -> Result<Self> {
        let language = Arc::new(RwLock::new(language_value(&config.language)?));

        let inner = RestClient::with_debug(http, config.api_url.clone(), config.debug);
        inner.set_token(config.token.clone());

        let hook_language = Arc::clone(&language);
        inner.set_headers_handler(move |headers| {
            let value = hook_language
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            headers.insert(LANGUAGE_HEADER, value);
        });

        debug!(api_url = %config.api_url, language = %config.language, "client ready");

        Ok(Self { inner, language })
    }

    /// Language sent with every subsequent request
    pub fn set_language(&self, language: &str) -> Result<()> {
        let value = language_value(language)?;
        *self
            .language
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
        Ok(())
    }

    /// Raw dispatcher: verb methods, token, hooks, last status
    pub fn api(&self) -> &RestClient<C> {
        &self.inner
    }

    pub fn tracks(&self) -> Arc<Tracks<C>> {
        self.inner.resource()
    }

    pub fn users(&self) -> Arc<Users<C>> {
        self.inner.resource()
    }

    pub fn performers(&self) -> Arc<Performers<C>> {
        self.inner.resource()
    }

    pub fn notifications(&self) -> Arc<Notifications<C>> {
        self.inner.resource()
    }

    pub fn assets(&self) -> Arc<Assets<C>> {
        self.inner.resource()
    }
}

fn language_value(language: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(language).map_err(|_| anyhow!("Invalid language tag: {:?}", language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{fields, LoginRequest, PerformersQuery, ReviewStatus, TracksQuery};
    use rest_client::payload::decode_query_payload;
    use rest_client::{ApiError, Body, MockHttp};
    use serde_json::json;

    fn client(config: Config) -> (Arc<MockHttp>, ZoundoClient<Arc<MockHttp>>) {
        let mock = Arc::new(MockHttp::new());
        let client = ZoundoClient::with_http(&config, mock.clone()).unwrap();
        (mock, client)
    }

    fn track_json(id: u64) -> serde_json::Value {
        json!({ "id": id, "title": "Song", "artist": "Band", "isMusic": true })
    }

    #[test]
    fn test_accessors_are_memoized() {
        let (_, client) = client(Config::default());
        assert!(Arc::ptr_eq(&client.tracks(), &client.tracks()));
        assert!(Arc::ptr_eq(&client.users(), &client.users()));
        client.notifications();
        client.assets();
        client.performers();
        assert_eq!(client.api().resources().len(), 5);
    }

    #[tokio::test]
    async fn test_language_header_follows_config_and_updates() {
        let (mock, client) = client(Config {
            language: "fr".to_string(),
            ..Config::default()
        });
        mock.respond_json(200, json!({ "result": track_json(1) }))
            .respond_json(200, json!({ "result": track_json(1) }));

        client.tracks().get(1, &[]).await.unwrap();
        client.set_language("de").unwrap();
        client.tracks().get(1, &[]).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].headers[LANGUAGE_HEADER], "fr");
        assert_eq!(requests[1].headers[LANGUAGE_HEADER], "de");
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let mock = Arc::new(MockHttp::new());
        let config = Config {
            language: "fr\n".to_string(),
            ..Config::default()
        };
        assert!(ZoundoClient::with_http(&config, mock).is_err());
    }

    #[tokio::test]
    async fn test_token_from_config_is_sent() {
        let (mock, client) = client(Config {
            token: Some("saved".to_string()),
            ..Config::default()
        });
        mock.respond_json(200, json!({ "result": { "id": 1, "email": "a@b.c", "role": "admin", "status": "active" } }));

        let me = client.users().me(&[fields::USER_BALANCE]).await.unwrap();
        assert_eq!(me.id, 1);

        let request = mock.last_request().unwrap();
        assert_eq!(request.headers["authorization"], "Bearer saved");
        assert_eq!(
            decode_query_payload(&request.url).unwrap(),
            json!({ "fields": ["user:balance"] })
        );
        assert!(request.url.starts_with("https://api.zoundo.com/users/me?"));
    }

    #[tokio::test]
    async fn test_track_list_sends_filters_in_query() {
        let (mock, client) = client(Config::default());
        mock.respond_json(
            200,
            json!({ "result": { "page": 1, "limit": 20, "count": 1, "pages": 1, "data": [track_json(4)] } }),
        );

        let query = TracksQuery {
            query: Some("rock".to_string()),
            page: Some(1),
            ..Default::default()
        };
        let page = client
            .tracks()
            .list(&query, &[fields::TRACK_OWNER])
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 4);

        let request = mock.last_request().unwrap();
        assert_eq!(
            decode_query_payload(&request.url).unwrap(),
            json!({ "query": "rock", "page": 1, "fields": ["track:owner"] })
        );
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (mock, client) = client(Config::default());
        mock.respond_json(
            200,
            json!({ "result": { "token": "new", "user": { "id": 2, "email": "a@b.c", "role": "performer", "status": "active" } } }),
        );

        let response = client
            .users()
            .login(
                &LoginRequest {
                    email: "a@b.c".to_string(),
                    password: "pw".to_string(),
                    role: None,
                },
                &[],
            )
            .await
            .unwrap();
        assert_eq!(response.token, "new");

        let request = mock.last_request().unwrap();
        match request.body {
            Some(Body::Json(bytes)) => {
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(body, json!({ "email": "a@b.c", "password": "pw", "fields": [] }));
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
        assert_eq!(client.api().token(), None);
    }

    #[tokio::test]
    async fn test_track_rejection_surfaces_server_message() {
        let (mock, client) = client(Config::default());
        mock.respond_json(403, json!({ "error": "Access denied" }));

        let err = client.tracks().reject(9, "low quality").await.unwrap_err();
        assert!(matches!(err, ApiError::Application { status: 403, .. }));
        assert_eq!(err.to_string(), "Access denied");

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "https://api.zoundo.com/tracks/9/reject");
    }

    #[tokio::test]
    async fn test_form_upload_goes_through_assets() {
        let (mock, client) = client(Config::default());
        mock.respond_json(
            200,
            json!({ "result": { "id": "a1", "name": "c.png", "mime": "image/png", "size": 3, "url": "https://cdn/a1" } }),
        );

        let asset = client
            .assets()
            .upload_form("c.png", Some("image/png"), vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(asset.id, "a1");

        let request = mock.last_request().unwrap();
        assert!(request.headers.get("content-type").is_none());
        match request.body {
            Some(Body::Form(form)) => assert_eq!(form.get("fields"), Some("")),
            other => panic!("expected form body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_base64_upload_encodes_data() {
        let (mock, client) = client(Config::default());
        mock.respond_json(
            200,
            json!({ "result": { "id": "a2", "name": "hi.txt", "mime": "text/plain", "size": 5, "url": "https://cdn/a2" } }),
        );

        client
            .assets()
            .upload_base64("hi.txt", b"hello", &[])
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        match request.body {
            Some(Body::Json(bytes)) => {
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(body["upload"]["data"], "aGVsbG8=");
                assert_eq!(body["upload"]["name"], "hi.txt");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notifications_read_all_uses_patch() {
        let (mock, client) = client(Config::default());
        mock.respond_json(200, json!({ "result": true }));

        assert!(client.notifications().read_all().await.unwrap());

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, rest_client::HttpMethod::Patch);
        assert_eq!(request.url, "https://api.zoundo.com/notifications");
    }

    fn performer_json(status: &str) -> serde_json::Value {
        json!({ "id": 3, "stageName": "MC Test", "status": status })
    }

    #[tokio::test]
    async fn test_performer_review_cycle_routes() {
        let (mock, client) = client(Config::default());
        mock.respond_json(
            200,
            json!({ "result": { "page": 1, "limit": 20, "data": [performer_json("review")] } }),
        )
        .respond_json(200, json!({ "result": performer_json("reject") }))
        .respond_json(200, json!({ "result": performer_json("approve") }));

        let query = PerformersQuery {
            status: Some(ReviewStatus::Review),
            ..Default::default()
        };
        let page = client.performers().list(&query, &[]).await.unwrap();
        assert_eq!(page.data[0].stage_name, "MC Test");

        let rejected = client.performers().reject(3, "no passport").await.unwrap();
        assert_eq!(rejected.status, ReviewStatus::Reject);
        client.performers().approve(3).await.unwrap();

        let requests = mock.requests();
        assert_eq!(
            decode_query_payload(&requests[0].url).unwrap(),
            json!({ "status": "review", "fields": [] })
        );
        assert_eq!(requests[1].method, rest_client::HttpMethod::Post);
        assert_eq!(requests[1].url, "https://api.zoundo.com/performers/3/reject");
        match &requests[1].body {
            Some(Body::Json(bytes)) => {
                let body: serde_json::Value = serde_json::from_slice(bytes).unwrap();
                assert_eq!(body, json!({ "reason": "no passport", "fields": [] }));
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
        assert_eq!(requests[2].url, "https://api.zoundo.com/performers/3/approve");
    }
}
