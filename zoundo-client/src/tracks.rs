// zoundo-client/src/tracks.rs
use crate::types::{NewTrack, PagedData, Track, TracksQuery, TrackUpdate};
use rest_client::{Api, ApiError, HttpClient, HttpMethod, Payload, Resource};
use serde_json::json;
use std::fmt::Display;

/// Track endpoints
pub struct Tracks<C: HttpClient> {
    api: Api<C>,
}

impl<C: HttpClient> Resource<C> for Tracks<C> {
    const NAME: &'static str = "Tracks";

    fn new(api: Api<C>) -> Self {
        Self { api }
    }
}

impl<C: HttpClient> Tracks<C> {
    pub async fn list(
        &self,
        query: &TracksQuery,
        fields: &[&str],
    ) -> Result<PagedData<Track>, ApiError> {
        self.api
            .request_as(HttpMethod::Get, "/tracks", Payload::json(query)?, fields)
            .await
    }

    /// Tracks that still have no video attached
    pub async fn remaining_video(&self, fields: &[&str]) -> Result<Vec<Track>, ApiError> {
        self.api
            .request_as(HttpMethod::Get, "/tracks/remaining-video", Payload::default(), fields)
            .await
    }

    pub async fn get(&self, track: impl Display, fields: &[&str]) -> Result<Track, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                &format!("/tracks/{}", track),
                Payload::default(),
                fields,
            )
            .await
    }

    /// Latest track of a performer, if any
    pub async fn last_of_performer(
        &self,
        performer: impl Display,
        fields: &[&str],
    ) -> Result<Option<Track>, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                &format!("/tracks/last/{}", performer),
                Payload::default(),
                fields,
            )
            .await
    }

    pub async fn create(&self, track: &NewTrack, fields: &[&str]) -> Result<Track, ApiError> {
        self.api
            .request_as(HttpMethod::Post, "/tracks", Payload::json(track)?, fields)
            .await
    }

    pub async fn update(
        &self,
        track: impl Display,
        update: &TrackUpdate,
        fields: &[&str],
    ) -> Result<Track, ApiError> {
        self.api
            .request_as(
                HttpMethod::Patch,
                &format!("/tracks/{}", track),
                Payload::json(update)?,
                fields,
            )
            .await
    }

    pub async fn delete(&self, track: impl Display) -> Result<bool, ApiError> {
        self.transition(HttpMethod::Delete, &format!("/tracks/{}", track), Payload::default())
            .await
    }

    /// Move back to draft
    pub async fn draft(&self, track: impl Display) -> Result<bool, ApiError> {
        self.transition(HttpMethod::Patch, &format!("/tracks/{}/draft", track), Payload::default())
            .await
    }

    /// Submit for review
    pub async fn review(&self, track: impl Display) -> Result<bool, ApiError> {
        self.transition(HttpMethod::Patch, &format!("/tracks/{}/review", track), Payload::default())
            .await
    }

    pub async fn approve(&self, track: impl Display, cost: Option<f64>) -> Result<bool, ApiError> {
        let payload = match cost {
            Some(cost) => Payload::json(&json!({ "cost": cost }))?,
            None => Payload::default(),
        };
        self.transition(HttpMethod::Patch, &format!("/tracks/{}/approve", track), payload)
            .await
    }

    pub async fn reject(&self, track: impl Display, reason: &str) -> Result<bool, ApiError> {
        self.transition(
            HttpMethod::Patch,
            &format!("/tracks/{}/reject", track),
            Payload::json(&json!({ "reason": reason }))?,
        )
        .await
    }

    async fn transition(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Payload,
    ) -> Result<bool, ApiError> {
        self.api.request_as(method, endpoint, payload, &[]).await
    }
}
