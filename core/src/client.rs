//! Stateless request builder and response parser for the imgflip API.
//!
//! # Design
//! `ImgflipClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the round-trip in between belongs to a
//! `Transport`.
//!
//! The remote API reports failures in the JSON envelope, so the body is
//! decoded before the status is judged. A non-2xx status only becomes an
//! `HttpStatus` error when the body is not an envelope, or when the envelope
//! claims success anyway.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, UNSUCCESSFUL_REQUEST};
use crate::form;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CaptionData, CaptionRequest, CaptionResponse, Template, TemplatesResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.imgflip.com";
pub const TEMPLATES_PATH: &str = "/get_memes";
pub const CAPTION_PATH: &str = "/caption_image";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct ImgflipClient {
    base_url: String,
}

impl Default for ImgflipClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ImgflipClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_templates(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{TEMPLATES_PATH}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_caption_image(&self, request: &CaptionRequest) -> Result<HttpRequest, ApiError> {
        let fields = form::encode(request)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{CAPTION_PATH}", self.base_url),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(fields.to_body()),
        })
    }

    /// Decode the catalog envelope without looking at its success flag.
    pub fn parse_templates_response(&self, response: HttpResponse) -> Result<TemplatesResponse, ApiError> {
        let envelope: TemplatesResponse = decode_envelope(&response)?;
        if envelope.success && !response.is_success() {
            return Err(status_error(response));
        }
        Ok(envelope)
    }

    pub fn parse_get_templates(&self, response: HttpResponse) -> Result<Vec<Template>, ApiError> {
        let envelope = self.parse_templates_response(response)?;
        if !envelope.success {
            return Err(ApiError::RemoteRejection(UNSUCCESSFUL_REQUEST.to_string()));
        }
        Ok(envelope.data.memes)
    }

    pub fn parse_caption_image(&self, response: HttpResponse) -> Result<CaptionData, ApiError> {
        let envelope: CaptionResponse = decode_envelope(&response)?;
        if !envelope.success {
            return Err(ApiError::rejection(envelope.error_message));
        }
        if !response.is_success() {
            return Err(status_error(response));
        }
        Ok(envelope.data)
    }
}

fn decode_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if response.body.trim().is_empty() {
        if !response.is_success() {
            return Err(status_error(response.clone()));
        }
        return Err(ApiError::Transport("empty response body".to_string()));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        if response.is_success() {
            ApiError::Decode(e.to_string())
        } else {
            status_error(response.clone())
        }
    })
}

fn status_error(response: HttpResponse) -> ApiError {
    ApiError::HttpStatus {
        status: response.status,
        body: response.body,
    }
}
