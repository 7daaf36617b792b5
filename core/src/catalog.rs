//! Template listing over a `Transport`.

use tracing::{debug, warn};

use crate::client::ImgflipClient;
use crate::error::ApiError;
use crate::http::{Transport, UreqTransport};
use crate::types::{Template, TemplatesResponse};

/// Lists the templates the remote API offers. One GET per call, no caching.
#[derive(Debug, Clone)]
pub struct TemplateCatalog<T> {
    client: ImgflipClient,
    transport: T,
}

impl Default for TemplateCatalog<UreqTransport> {
    fn default() -> Self {
        Self::new(ImgflipClient::default(), UreqTransport::new())
    }
}

impl<T: Transport> TemplateCatalog<T> {
    pub fn new(client: ImgflipClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Fetch the envelope as the server sent it, success flag unchecked.
    pub fn fetch_templates_response(&self) -> Result<TemplatesResponse, ApiError> {
        let request = self.client.build_get_templates();
        debug!(url = %request.url, "fetching templates");
        let response = self.transport.execute(&request).inspect_err(|e| {
            warn!(error = %e, "template request failed in transport");
        })?;
        debug!(status = response.status, "template response received");
        self.client.parse_templates_response(response)
    }

    /// Fetch templates in server order.
    pub fn fetch_templates(&self) -> Result<Vec<Template>, ApiError> {
        let envelope = self.fetch_templates_response()?;
        if !envelope.success {
            warn!("template listing reported success=false");
            return Err(ApiError::rejection(""));
        }
        debug!(count = envelope.data.memes.len(), "templates fetched");
        Ok(envelope.data.memes)
    }
}
