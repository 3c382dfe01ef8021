// zoundo-client/src/assets.rs
use crate::types::Asset;
use base64::prelude::*;
use rest_client::{Api, ApiError, Form, HttpClient, HttpMethod, Payload, Resource};
use serde_json::json;
use std::fmt::Display;

/// Form field the upload endpoint reads the file from
pub const UPLOAD_FIELD: &str = "upload";

pub struct Assets<C: HttpClient> {
    api: Api<C>,
}

impl<C: HttpClient> Resource<C> for Assets<C> {
    const NAME: &'static str = "Assets";

    fn new(api: Api<C>) -> Self {
        Self { api }
    }
}

impl<C: HttpClient> Assets<C> {
    pub async fn get(&self, asset: impl Display, fields: &[&str]) -> Result<Asset, ApiError> {
        self.api
            .request_as(
                HttpMethod::Get,
                &format!("/assets/{}", asset),
                Payload::default(),
                fields,
            )
            .await
    }

    /// Upload inline as base64 JSON
    pub async fn upload_base64(
        &self,
        name: &str,
        data: &[u8],
        fields: &[&str],
    ) -> Result<Asset, ApiError> {
        let payload = Payload::json(&json!({
            "upload": { "name": name, "data": BASE64_STANDARD.encode(data) }
        }))?;
        self.api
            .request_as(HttpMethod::Post, "/assets/upload/base64", payload, fields)
            .await
    }

    /// Upload as multipart form
    pub async fn upload_form(
        &self,
        file_name: &str,
        mime: Option<&str>,
        data: Vec<u8>,
    ) -> Result<Asset, ApiError> {
        let form = match mime {
            Some(mime) => Form::new().file_with_mime(UPLOAD_FIELD, file_name, mime, data),
            None => Form::new().file(UPLOAD_FIELD, file_name, data),
        };
        self.api
            .request_as(HttpMethod::Post, "/assets/upload/form", Payload::Form(form), &[])
            .await
    }
}
