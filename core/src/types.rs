//! Domain types for the imgflip API.
//!
//! # Design
//! Every overridable field is an `Option`, never a sentinel: zero is a legal
//! coordinate, color, and font size, so "not supplied" has to be its own
//! state. Serde attributes skip absent optionals, which lets requests be
//! loaded from JSON fixtures without collapsing absent into zero.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Font size the remote renderer uses when `max_font_size` is absent.
pub const DEFAULT_MAX_FONT_SIZE_PX: u32 = 50;

/// Most text boxes the remote renderer accepts per image.
pub const MAX_TEXT_BOXES: usize = 20;

/// Read a response field, treating an explicit `null` like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A meme template as listed by `/get_memes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
    /// Number of caption slots the template layout supports.
    #[serde(default, deserialize_with = "null_as_default")]
    pub box_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Arial,
    Impact,
}

impl Font {
    pub fn as_str(self) -> &'static str {
        match self {
            Font::Arial => "arial",
            Font::Impact => "impact",
        }
    }
}

/// One caption slot.
///
/// Geometry (`x`, `y`, `width`, `height`) is meant to be set as a group;
/// unset geometry inherits the template layout. Nothing here enforces the
/// grouping. Colors are 24-bit RGB integers such as `0xFFA500`; a wider
/// value makes encoding fail with `ApiError::InvalidInput`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBox {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<u32>,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_x(mut self, x: u32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: u32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set position and size together, the way the renderer expects them.
    pub fn with_geometry(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        self.with_x(x).with_y(y).with_width(width).with_height(height)
    }

    /// Text color as `0xRRGGBB`. Values above `0xFFFFFF` are rejected when
    /// the request is encoded, never truncated.
    pub fn with_color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }

    /// Outline color as `0xRRGGBB`, same range rule as `with_color`.
    pub fn with_outline_color(mut self, rgb: u32) -> Self {
        self.outline_color = Some(rgb);
        self
    }
}

/// Everything `/caption_image` accepts.
///
/// Credentials and the template id are required by the remote API but are
/// not checked locally; a missing one surfaces as a remote rejection. When
/// `boxes` is non-empty the server ignores `top_text` and `bottom_text`, and
/// box text is not upper-cased for you.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionRequest {
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub top_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bottom_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    /// Pixels; the server uses `DEFAULT_MAX_FONT_SIZE_PX` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_font_size: Option<u32>,
    /// Order matters: with two boxes, the first is top text and the second
    /// bottom text. Leave the first box empty to caption only the bottom.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<TextBox>,
}

impl CaptionRequest {
    pub fn new(
        template_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_top_text(mut self, text: impl Into<String>) -> Self {
        self.top_text = text.into();
        self
    }

    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = text.into();
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_max_font_size(mut self, px: u32) -> Self {
        self.max_font_size = Some(px);
        self
    }

    pub fn with_box(mut self, text_box: TextBox) -> Self {
        self.boxes.push(text_box);
        self
    }

    pub fn with_boxes(mut self, boxes: impl IntoIterator<Item = TextBox>) -> Self {
        self.boxes.extend(boxes);
        self
    }
}

/// Envelope returned by `/get_memes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplatesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: TemplatesData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplatesData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub memes: Vec<Template>,
}

/// Envelope returned by `/caption_image`. Failures usually omit `data` or
/// send it as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: CaptionData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_message: String,
}

/// Where the rendered image ended up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionData {
    /// Direct link to the image file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Human-viewable page for the image.
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_url: String,
}

/// Outcome of one caption call.
///
/// The success flag and the error agree by construction: a failed result
/// always has a non-empty `error_message`, and that message is exactly the
/// `Display` text of `error()`. A successful result has neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionResult {
    success: bool,
    data: CaptionData,
    error_message: String,
    error: Option<ApiError>,
}

impl CaptionResult {
    pub fn succeeded(data: CaptionData) -> Self {
        Self {
            success: true,
            data,
            error_message: String::new(),
            error: None,
        }
    }

    pub fn failed(error: ApiError) -> Self {
        let message = error.to_string();
        // Only a hand-built `RemoteRejection(String::new())` renders empty.
        let (error_message, error) = if message.is_empty() {
            let error = ApiError::rejection("");
            (error.to_string(), error)
        } else {
            (message, error)
        };
        Self {
            success: false,
            data: CaptionData::default(),
            error_message,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn url(&self) -> &str {
        &self.data.url
    }

    pub fn page_url(&self) -> &str {
        &self.data.page_url
    }

    pub fn data(&self) -> &CaptionData {
        &self.data
    }

    /// Empty on success, never empty on failure.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<CaptionData, ApiError> {
        match self.error {
            None => Ok(self.data),
            Some(err) => Err(err),
        }
    }
}

impl From<Result<CaptionData, ApiError>> for CaptionResult {
    fn from(result: Result<CaptionData, ApiError>) -> Self {
        match result {
            Ok(data) => CaptionResult::succeeded(data),
            Err(err) => CaptionResult::failed(err),
        }
    }
}
