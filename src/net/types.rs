//! Wire DTOs for the `/api/overlays` collection resource.
//!
//! DESIGN
//! ======
//! The backend owns ids and timestamps; everything else mirrors the overlay
//! table columns. Numeric columns are decoded leniently because older
//! clients stored unrounded drag positions, so a fractional pixel value
//! rounds instead of failing the whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;

/// Default draft position, in pixels from the container's top-left.
pub const DEFAULT_POSITION: i32 = 50;
/// Default image width in pixels.
pub const DEFAULT_WIDTH: i32 = 200;
/// Default image height in pixels.
pub const DEFAULT_HEIGHT: i32 = 100;
/// Default text size in pixels.
pub const DEFAULT_FONT_SIZE: i32 = 24;
/// Default text color.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Backend-assigned overlay identifier. Opaque to the client.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OverlayId(String);

impl OverlayId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OverlayId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_id(deserializer).map(Self)
    }
}

impl From<&str> for OverlayId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What an overlay draws on top of the video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// `content` is display text; `font_size` and `color` apply.
    #[default]
    Text,
    /// `content` is an image URL; `width` and `height` apply.
    Image,
}

impl OverlayKind {
    /// Wire name of the kind (`"text"` / `"image"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    /// Parse a form value. Anything other than `image` is treated as text.
    #[must_use]
    pub fn from_form_value(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("image") {
            Self::Image
        } else {
            Self::Text
        }
    }
}

/// A persisted overlay as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    /// Unique overlay identifier.
    pub id: OverlayId,
    /// Text or image overlay.
    #[serde(rename = "type", default, deserialize_with = "deserialize_or_default")]
    pub kind: OverlayKind,
    /// Display text or image source URL.
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub content: String,
    /// Left offset in pixels relative to the video container.
    #[serde(default, deserialize_with = "deserialize_px")]
    pub position_x: i32,
    /// Top offset in pixels relative to the video container.
    #[serde(default, deserialize_with = "deserialize_px")]
    pub position_y: i32,
    /// Image width in pixels.
    #[serde(default, deserialize_with = "deserialize_opt_px")]
    pub width: Option<i32>,
    /// Image height in pixels.
    #[serde(default, deserialize_with = "deserialize_opt_px")]
    pub height: Option<i32>,
    /// Text size in pixels.
    #[serde(default, deserialize_with = "deserialize_opt_px")]
    pub font_size: Option<i32>,
    /// Text color (hex string).
    #[serde(default)]
    pub color: Option<String>,
    /// Backend creation timestamp, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Backend modification timestamp, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Overlay {
    /// Build a persisted overlay from a full field set.
    #[must_use]
    pub fn from_fields(id: OverlayId, fields: OverlayFields) -> Self {
        Self {
            id,
            kind: fields.kind,
            content: fields.content,
            position_x: fields.position_x,
            position_y: fields.position_y,
            width: Some(fields.width),
            height: Some(fields.height),
            font_size: Some(fields.font_size),
            color: Some(fields.color),
            created_at: None,
            updated_at: None,
        }
    }

    /// Overwrite every field present in `patch`, leaving the rest alone.
    pub fn apply(&mut self, patch: &OverlayPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(x) = patch.position_x {
            self.position_x = x;
        }
        if let Some(y) = patch.position_y {
            self.position_y = y;
        }
        if let Some(width) = patch.width {
            self.width = Some(width);
        }
        if let Some(height) = patch.height {
            self.height = Some(height);
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = Some(font_size);
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
    }
}

/// Full field set for an overlay without its id. This is the create body
/// and the edit-session draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayFields {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    pub content: String,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub font_size: i32,
    pub color: String,
}

impl Default for OverlayFields {
    fn default() -> Self {
        Self {
            kind: OverlayKind::Text,
            content: String::new(),
            position_x: DEFAULT_POSITION,
            position_y: DEFAULT_POSITION,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_COLOR.to_owned(),
        }
    }
}

impl OverlayFields {
    /// Seed a field set from a persisted overlay. Fields the backend left
    /// empty fall back to the draft defaults.
    #[must_use]
    pub fn from_overlay(overlay: &Overlay) -> Self {
        Self {
            kind: overlay.kind,
            content: overlay.content.clone(),
            position_x: overlay.position_x,
            position_y: overlay.position_y,
            width: overlay.width.unwrap_or(DEFAULT_WIDTH),
            height: overlay.height.unwrap_or(DEFAULT_HEIGHT),
            font_size: overlay.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            color: overlay
                .color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        }
    }

    /// True when `content` has nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Partial update body for `PUT /overlays/{id}`. Absent fields are left
/// untouched by the backend and omitted from the JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<OverlayKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl OverlayPatch {
    /// Position-only patch used by drag-and-drop placement.
    #[must_use]
    pub fn position(x: i32, y: i32) -> Self {
        Self { position_x: Some(x), position_y: Some(y), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<OverlayFields> for OverlayPatch {
    fn from(fields: OverlayFields) -> Self {
        Self {
            kind: Some(fields.kind),
            content: Some(fields.content),
            position_x: Some(fields.position_x),
            position_y: Some(fields.position_y),
            width: Some(fields.width),
            height: Some(fields.height),
            font_size: Some(fields.font_size),
            color: Some(fields.color),
        }
    }
}

/// Successful delete response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Backend-supplied confirmation text, if any.
    pub message: Option<String>,
}

/// Response envelope shared by every overlay endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Payload of a successful response.
    ///
    /// # Errors
    ///
    /// `Rejected` when `success` is false (backend message, else `fallback`);
    /// `Malformed` when a successful response carries no `data`.
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        self.check(fallback)?;
        self.data.ok_or_else(|| ApiError::Malformed { detail: "response is missing `data`".to_owned() })
    }

    /// Acknowledgement of a successful response that carries no payload.
    ///
    /// # Errors
    ///
    /// `Rejected` when `success` is false.
    pub fn into_ack(self, fallback: &str) -> Result<Acknowledgement, ApiError> {
        self.check(fallback)?;
        Ok(Acknowledgement { message: self.message })
    }

    fn check(&self, fallback: &str) -> Result<(), ApiError> {
        if self.success {
            return Ok(());
        }
        let message = self
            .error
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(fallback)
            .to_owned();
        Err(ApiError::Rejected { message })
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected string or integer id")),
    }
}

/// Treat an explicit `null` like a missing key.
fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_px<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_px(deserializer)?.unwrap_or(0))
}

fn deserialize_opt_px<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    px_from_value(&value).map_err(D::Error::custom)
}

/// Decode a pixel value: integers pass through, floats round, null is absent.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn px_from_value(value: &serde_json::Value) -> Result<Option<i32>, String> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return i32::try_from(int)
                    .map(Some)
                    .map_err(|_| format!("value {int} out of range for i32"));
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.round() >= f64::from(i32::MIN)
                && float.round() <= f64::from(i32::MAX)
            {
                return Ok(Some(float.round() as i32));
            }
            Err(format!("value {number} out of range for i32"))
        }
        _ => Err("expected number".to_owned()),
    }
}
