// zoundo-client/src/notifications.rs
use crate::types::Notification;
use rest_client::{Api, ApiError, HttpClient, HttpMethod, Payload, Resource};
use std::fmt::Display;

pub struct Notifications<C: HttpClient> {
    api: Api<C>,
}

impl<C: HttpClient> Resource<C> for Notifications<C> {
    const NAME: &'static str = "Notifications";

    fn new(api: Api<C>) -> Self {
        Self { api }
    }
}

impl<C: HttpClient> Notifications<C> {
    pub async fn list(&self, fields: &[&str]) -> Result<Vec<Notification>, ApiError> {
        self.api
            .request_as(HttpMethod::Get, "/notifications", Payload::default(), fields)
            .await
    }

    /// Mark one notification as read
    pub async fn read(
        &self,
        notification: impl Display,
        fields: &[&str],
    ) -> Result<Notification, ApiError> {
        self.api
            .request_as(
                HttpMethod::Patch,
                &format!("/notifications/{}", notification),
                Payload::default(),
                fields,
            )
            .await
    }

    pub async fn read_all(&self) -> Result<bool, ApiError> {
        self.api
            .request_as(HttpMethod::Patch, "/notifications", Payload::default(), &[])
            .await
    }

    pub async fn delete(&self, notification: impl Display) -> Result<bool, ApiError> {
        self.api
            .request_as(
                HttpMethod::Delete,
                &format!("/notifications/{}", notification),
                Payload::default(),
                &[],
            )
            .await
    }

    pub async fn delete_all(&self) -> Result<bool, ApiError> {
        self.api
            .request_as(HttpMethod::Delete, "/notifications", Payload::default(), &[])
            .await
    }
}
