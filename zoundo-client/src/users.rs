// zoundo-client/src/users.rs
use crate::types::{LoginRequest, LoginResponse, PagedData, User};
use rest_client::{Api, ApiError, HttpClient, HttpMethod, Payload, Resource};
use serde_json::json;
use std::fmt::Display;

/// Account endpoints
pub struct Users<C: HttpClient> {
    api: Api<C>,
}

impl<C: HttpClient> Resource<C> for Users<C> {
    const NAME: &'static str = "Users";

    fn new(api: Api<C>) -> Self {
        Self { api }
    }
}

impl<C: HttpClient> Users<C> {
    /// Exchange credentials for a token. The token is not stored; callers
    /// decide whether to `set_token` with it.
    pub async fn login(
        &self,
        request: &LoginRequest,
        fields: &[&str],
    ) -> Result<LoginResponse, ApiError> {
        self.api
            .request_as(HttpMethod::Post, "/users/login", Payload::json(request)?, fields)
            .await
    }

    /// Admin impersonation
    pub async fn login_as(
        &self,
        user: impl Display,
        fields: &[&str],
    ) -> Result<LoginResponse, ApiError> {
        self.api
            .request_as(
                HttpMethod::Post,
                &format!("/users/{}/auth", user),
                Payload::default(),
                fields,
            )
            .await
    }

    pub async fn me(&self, fields: &[&str]) -> Result<User, ApiError> {
        self.api
            .request_as(HttpMethod::Get, "/users/me", Payload::default(), fields)
            .await
    }

    pub async fn get(&self, user: impl Display, fields: &[&str]) -> Result<User, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                &format!("/users/{}", user),
                Payload::default(),
                fields,
            )
            .await
    }

    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        fields: &[&str],
    ) -> Result<PagedData<User>, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                "/users",
                Payload::json(&json!({ "page": page, "limit": limit }))?,
                fields,
            )
            .await
    }

    pub async fn begin_password_reset(&self, email: &str) -> Result<bool, ApiError> {
        self.api
            .request_as(
                HttpMethod::Post,
                "/users/password",
                Payload::json(&json!({ "email": email }))?,
                &[],
            )
            .await
    }
}
