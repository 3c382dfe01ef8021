// rest-client/src/http/reqwest.rs
use super::{Body, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::form::{Form, FormPart};
use async_trait::async_trait;

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wrap a preconfigured reqwest client (proxies, TLS roots, timeouts)
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn to_multipart(form: Form) -> Result<reqwest::multipart::Form, HttpError> {
    let mut multipart = reqwest::multipart::Form::new();
    for part in form.into_parts() {
        multipart = match part {
            FormPart::Text { name, value } => multipart.text(name, value),
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let mut file = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime {
                    file = file
                        .mime_str(&mime)
                        .map_err(|e| HttpError::invalid_request(e.to_string()))?;
                }
                multipart.part(name, file)
            }
        };
    }
    Ok(multipart)
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req = self
            .inner
            .request(to_reqwest_method(request.method), &request.url)
            .headers(request.headers);

        req = match request.body {
            Some(Body::Json(bytes)) => req.body(bytes),
            Some(Body::Form(form)) => req.multipart(to_multipart(form)?),
            None => req,
        };

        let resp = req.send().await.map_err(|e| {
            if e.is_builder() {
                HttpError::invalid_request(e.to_string())
            } else {
                HttpError::new(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();

        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()).with_status(status))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
