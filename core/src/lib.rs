//! Blocking client for the imgflip meme API.
//!
//! # Overview
//! Two operations: list the available templates (`TemplateCatalog`) and
//! render a captioned image (`CaptionService`). Both go through
//! `ImgflipClient`, which builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network, and a `Transport`
//! that performs the single exchange in between.
//!
//! # Design
//! - `form::encode` turns a `CaptionRequest` into the exact form fields the
//!   API expects, including the indexed `boxes[i][field]` layout.
//! - Optional fields are `Option`s so an explicit zero is never mistaken for
//!   "use the default".
//! - `CaptionResult` keeps the success flag, the error message and the
//!   `ApiError` in agreement.
//! - No caching, retries, timeouts or shared mutable state; callers layer
//!   those on top if they need them.

pub mod catalog;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod service;
pub mod types;

pub use catalog::TemplateCatalog;
pub use client::ImgflipClient;
pub use error::ApiError;
pub use form::FormFields;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use service::CaptionService;
pub use types::{
    CaptionData, CaptionRequest, CaptionResponse, CaptionResult, Font, Template, TemplatesData,
    TemplatesResponse, TextBox, DEFAULT_MAX_FONT_SIZE_PX, MAX_TEXT_BOXES,
};
