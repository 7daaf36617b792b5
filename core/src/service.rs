//! Caption orchestration: validate, encode, POST, decode, reconcile.
//!
//! # Design
//! `caption` never returns a bare `Err`. Every path ends in a
//! `CaptionResult`, and `CaptionResult::failed` is the only way to build a
//! failure, so the flag, the message and the attached `ApiError` cannot
//! disagree. A missing request is a caller bug and is reported before any
//! I/O happens.

use tracing::{debug, warn};

use crate::client::ImgflipClient;
use crate::error::ApiError;
use crate::http::{Transport, UreqTransport};
use crate::types::{CaptionData, CaptionRequest, CaptionResult, MAX_TEXT_BOXES};

#[derive(Debug, Clone)]
pub struct CaptionService<T> {
    client: ImgflipClient,
    transport: T,
}

impl Default for CaptionService<UreqTransport> {
    fn default() -> Self {
        Self::new(ImgflipClient::default(), UreqTransport::new())
    }
}

impl<T: Transport> CaptionService<T> {
    pub fn new(client: ImgflipClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Render a captioned image. Performs at most one network exchange.
    pub fn caption(&self, request: Option<&CaptionRequest>) -> CaptionResult {
        let result = CaptionResult::from(self.try_caption(request));
        if !result.is_success() {
            warn!(error = result.error_message(), "caption request failed");
        }
        result
    }

    fn try_caption(&self, request: Option<&CaptionRequest>) -> Result<CaptionData, ApiError> {
        let request = request.ok_or_else(|| ApiError::InvalidInput("caption request is required".to_string()))?;
        if request.boxes.len() > MAX_TEXT_BOXES {
            warn!(
                boxes = request.boxes.len(),
                limit = MAX_TEXT_BOXES,
                "more text boxes than the renderer accepts"
            );
        }

        let http_request = self.client.build_caption_image(request)?;
        debug!(
            url = %http_request.url,
            template_id = %request.template_id,
            boxes = request.boxes.len(),
            "posting caption request"
        );
        let response = self.transport.execute(&http_request)?;
        debug!(status = response.status, "caption response received");
        self.client.parse_caption_image(response)
    }
}
