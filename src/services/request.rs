// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request options accepted by the authenticated client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::models::UploadFile;

/// Request body.
///
/// Bodies are rebuilt for every send, so a request can be retried after a
/// token refresh.
#[derive(Debug, Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Text(String),
    /// Raw bytes; the content type is whatever the caller supplies.
    Binary {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// Multipart form; the transport chooses the content type and boundary.
    Multipart(Vec<FormPart>),
}

/// One field of a multipart form.
#[derive(Debug, Clone)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn file(name: impl Into<String>, file: UploadFile) -> Self {
        FormPart::File {
            name: name.into(),
            file,
        }
    }
}

impl Body {
    /// Serialize `value` into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Body::Json)
            .map_err(|e| ClientError::Validation(format!("Unserializable body: {}", e)))
    }

    /// Binary and multipart bodies carry their own content type.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Body::Binary { .. } | Body::Multipart(_))
    }

    fn apply(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self {
            Body::Empty => builder,
            Body::Json(value) => {
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| ClientError::Validation(format!("Unserializable body: {}", e)))?;
                builder.body(bytes)
            }
            Body::Text(text) => builder.body(text.clone()),
            Body::Binary { bytes, .. } => builder.body(bytes.clone()),
            Body::Multipart(parts) => builder.multipart(build_form(parts)?),
        })
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, file } => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| {
                        ClientError::Validation(format!("Invalid MIME type {:?}: {}", file.mime, e))
                    })?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

/// Method, headers and body of a console request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Body,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: Body::Empty,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post(body: Body) -> Self {
        Self {
            method: Method::POST,
            body,
            ..Self::default()
        }
    }

    pub fn put(body: Body) -> Self {
        Self {
            method: Method::PUT,
            body,
            ..Self::default()
        }
    }

    /// Add a caller header. Invalid names or values are rejected.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Validation(format!("Invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Validation(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Caller headers plus bearer auth, `Accept`, and a JSON content type
    /// unless the body is binary or multipart.
    pub(crate) fn headers_with_auth(&self, access_token: &str) -> Result<HeaderMap> {
        let mut headers = self.headers.clone();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("Invalid access token: {}", e)))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        match &self.body {
            Body::Multipart(_) => {
                // The form sets multipart/form-data with its boundary.
                headers.remove(CONTENT_TYPE);
            }
            Body::Binary {
                content_type: Some(ct),
                ..
            } => {
                let value = HeaderValue::from_str(ct).map_err(|e| {
                    ClientError::Validation(format!("Invalid content type {:?}: {}", ct, e))
                })?;
                headers.insert(CONTENT_TYPE, value);
            }
            Body::Binary { .. } => {}
            _ => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }

        Ok(headers)
    }

    pub(crate) fn build(
        &self,
        http: &reqwest::Client,
        url: &str,
        access_token: &str,
    ) -> Result<RequestBuilder> {
        let builder = http
            .request(self.method.clone(), url)
            .headers(self.headers_with_auth(access_token)?);
        self.body.apply(builder)
    }
}
