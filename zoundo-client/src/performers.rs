// zoundo-client/src/performers.rs
use crate::types::{PagedData, Performer, PerformerProfile, PerformersQuery};
use rest_client::{Api, ApiError, HttpClient, HttpMethod, Payload, Resource};
use serde_json::json;
use std::fmt::Display;

/// Performer profiles and their review cycle
pub struct Performers<C: HttpClient> {
    api: Api<C>,
}

impl<C: HttpClient> Resource<C> for Performers<C> {
    const NAME: &'static str = "Performers";

    fn new(api: Api<C>) -> Self {
        Self { api }
    }
}

impl<C: HttpClient> Performers<C> {
    pub async fn list(
        &self,
        query: &PerformersQuery,
        fields: &[&str],
    ) -> Result<PagedData<Performer>, ApiError> {
        self.api
            .request_as(HttpMethod::Get, "/performers", Payload::json(query)?, fields)
            .await
    }

    pub async fn get(&self, performer: impl Display, fields: &[&str]) -> Result<Performer, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                &format!("/performers/{}", performer),
                Payload::default(),
                fields,
            )
            .await
    }

    pub async fn create(
        &self,
        profile: &PerformerProfile,
        fields: &[&str],
    ) -> Result<Performer, ApiError> {
        self.api
            .request_as(HttpMethod::Post, "/performers", Payload::json(profile)?, fields)
            .await
    }

    pub async fn update(
        &self,
        performer: impl Display,
        profile: &PerformerProfile,
        fields: &[&str],
    ) -> Result<Performer, ApiError> {
        self.api
            .request_as(
                HttpMethod::Patch,
                &format!("/performers/{}", performer),
                Payload::json(profile)?,
                fields,
            )
            .await
    }

    pub async fn delete(&self, performer: impl Display) -> Result<bool, ApiError> {
        self.api
            .request_as(
                HttpMethod::Delete,
                &format!("/performers/{}", performer),
                Payload::default(),
                &[],
            )
            .await
    }

    pub async fn review(&self, performer: impl Display) -> Result<Performer, ApiError> {
        self.transition(performer, "review", Payload::default()).await
    }

    pub async fn draft(&self, performer: impl Display) -> Result<Performer, ApiError> {
        self.transition(performer, "draft", Payload::default()).await
    }

    pub async fn approve(&self, performer: impl Display) -> Result<Performer, ApiError> {
        self.transition(performer, "approve", Payload::default()).await
    }

    pub async fn reject(&self, performer: impl Display, reason: &str) -> Result<Performer, ApiError> {
        let payload = Payload::json(&json!({ "reason": reason }))?;
        self.transition(performer, "reject", payload).await
    }

    async fn transition(
        &self,
        performer: impl Display,
        action: &str,
        payload: Payload,
    ) -> Result<Performer, ApiError> {
        self.api
            .request_as(
                HttpMethod::Post,
                &format!("/performers/{}/{}", performer, action),
                payload,
                &[],
            )
            .await
    }
}
