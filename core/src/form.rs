//! Form encoding for `/caption_image`.
//!
//! # Design
//! Wire keys live in explicit tables below instead of being derived from
//! field names. Scalars appear only when present (non-empty strings,
//! `Some` numbers). Each box is flattened under `boxes[i][field]`: `text` is
//! always written so an empty slot still exists, while geometry and colors
//! are written only when set, so an unset field keeps the template default
//! and an explicit zero is sent as zero.
//!
//! Encoding is pure. Both `text0`/`text1` and `boxes` are emitted when both
//! are given; the server decides precedence.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::types::{CaptionRequest, TextBox};

pub const TEMPLATE_ID: &str = "template_id";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const TOP_TEXT: &str = "text0";
pub const BOTTOM_TEXT: &str = "text1";
pub const FONT: &str = "font";
pub const MAX_FONT_SIZE: &str = "max_font_size";

/// Sub-fields of one entry in the `boxes` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxField {
    Text,
    X,
    Y,
    Width,
    Height,
    Color,
    OutlineColor,
}

impl BoxField {
    /// Fields emitted only when the caller set them, in wire order.
    pub const OVERRIDES: [BoxField; 6] = [
        BoxField::X,
        BoxField::Y,
        BoxField::Width,
        BoxField::Height,
        BoxField::Color,
        BoxField::OutlineColor,
    ];

    pub fn wire_key(self) -> &'static str {
        match self {
            BoxField::Text => "text",
            BoxField::X => "x",
            BoxField::Y => "y",
            BoxField::Width => "width",
            BoxField::Height => "height",
            BoxField::Color => "color",
            BoxField::OutlineColor => "outline_color",
        }
    }

    fn value(self, text_box: &TextBox) -> Result<Option<String>, ApiError> {
        let value = match self {
            BoxField::Text => Some(text_box.text.clone()),
            BoxField::X => text_box.x.map(|v| v.to_string()),
            BoxField::Y => text_box.y.map(|v| v.to_string()),
            BoxField::Width => text_box.width.map(|v| v.to_string()),
            BoxField::Height => text_box.height.map(|v| v.to_string()),
            BoxField::Color => text_box.color.map(hex_color).transpose()?,
            BoxField::OutlineColor => text_box.outline_color.map(hex_color).transpose()?,
        };
        Ok(value)
    }
}

/// `boxes[i][field]`
pub fn box_key(index: usize, field: BoxField) -> String {
    format!("boxes[{index}][{}]", field.wire_key())
}

/// Largest value `hex_color` accepts.
pub const MAX_RGB: u32 = 0x00FF_FFFF;

/// Render a 24-bit RGB integer as `#rrggbb`.
///
/// Anything wider than 24 bits is refused rather than truncated, since a
/// truncated value would render as a different color.
pub fn hex_color(rgb: u32) -> Result<String, ApiError> {
    if rgb > MAX_RGB {
        return Err(ApiError::InvalidInput(format!(
            "color {rgb:#x} does not fit in 24-bit RGB"
        )));
    }
    Ok(format!("#{rgb:06x}"))
}

/// Flat key/value pairs ready for `application/x-www-form-urlencoded`.
///
/// Keys are kept sorted so the same request always yields the same body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A key may only be written once per request.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), ApiError> {
        let key = key.into();
        if self.0.contains_key(&key) {
            return Err(ApiError::Encode(format!("duplicate form key `{key}`")));
        }
        self.0.insert(key, value.into());
        Ok(())
    }

    fn insert_non_empty(&mut self, key: &str, value: &str) -> Result<(), ApiError> {
        if value.is_empty() {
            return Ok(());
        }
        self.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Percent-encode every key and value and join them with `&`.
    pub fn to_body(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Flatten a caption request into form fields.
///
/// Fails only on a color wider than 24 bits (`InvalidInput`) or, should the
/// key tables ever collide, a duplicate key (`Encode`).
pub fn encode(request: &CaptionRequest) -> Result<FormFields, ApiError> {
    let mut form = FormFields::new();

    form.insert_non_empty(TEMPLATE_ID, &request.template_id)?;
    form.insert_non_empty(USERNAME, &request.username)?;
    form.insert_non_empty(PASSWORD, &request.password)?;
    form.insert_non_empty(TOP_TEXT, &request.top_text)?;
    form.insert_non_empty(BOTTOM_TEXT, &request.bottom_text)?;
    if let Some(font) = request.font {
        form.insert(FONT, font.as_str())?;
    }
    if let Some(px) = request.max_font_size {
        form.insert(MAX_FONT_SIZE, px.to_string())?;
    }

    for (index, text_box) in request.boxes.iter().enumerate() {
        form.insert(box_key(index, BoxField::Text), text_box.text.as_str())?;
        for field in BoxField::OVERRIDES {
            if let Some(value) = field.value(text_box)? {
                form.insert(box_key(index, field), value)?;
            }
        }
    }

    Ok(form)
}
