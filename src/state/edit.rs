//! Edit session: which overlay the form targets and the staged draft.
//!
//! DESIGN
//! ======
//! Two states. `Idle` commits create a new overlay; `Editing(overlay)`
//! commits update that overlay by id. The draft survives `cancel()` and a
//! successful commit, so the form keeps showing the last values until the
//! next overlay is selected or the draft is reset explicitly.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::net::api::OverlayRepository;
use crate::net::error::ApiError;
use crate::net::types::{Overlay, OverlayFields, OverlayKind, OverlayPatch};
use crate::state::overlays::OverlayStore;
use crate::util::coerce::parse_int_prefix;

pub const FONT_SIZE_RANGE: RangeInclusive<i32> = 12..=72;
pub const POSITION_X_RANGE: RangeInclusive<i32> = 0..=1000;
pub const POSITION_Y_RANGE: RangeInclusive<i32> = 0..=600;
pub const BOX_RANGE: RangeInclusive<i32> = 50..=500;

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("overlay content is empty")]
    EmptyContent,
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Form inputs, addressed by their wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Kind,
    Content,
    PositionX,
    PositionY,
    Width,
    Height,
    FontSize,
    Color,
}

impl FormField {
    pub const ALL: [Self; 8] = [
        Self::Kind,
        Self::Content,
        Self::PositionX,
        Self::PositionY,
        Self::Width,
        Self::Height,
        Self::FontSize,
        Self::Color,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Content => "content",
            Self::PositionX => "position_x",
            Self::PositionY => "position_y",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontSize => "font_size",
            Self::Color => "color",
        }
    }

    /// Whether the form shows this input for the given overlay kind.
    #[must_use]
    pub fn applies_to(self, kind: OverlayKind) -> bool {
        match self {
            Self::FontSize | Self::Color => kind == OverlayKind::Text,
            Self::Width | Self::Height => kind == OverlayKind::Image,
            Self::Kind | Self::Content | Self::PositionX | Self::PositionY => true,
        }
    }

    /// Slider bounds for numeric inputs. Drag-and-drop may place overlays
    /// outside these, and the draft accepts any integer.
    #[must_use]
    pub fn slider_range(self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::FontSize => Some(FONT_SIZE_RANGE),
            Self::PositionX => Some(POSITION_X_RANGE),
            Self::PositionY => Some(POSITION_Y_RANGE),
            Self::Width | Self::Height => Some(BOX_RANGE),
            Self::Kind | Self::Content | Self::Color => None,
        }
    }
}

impl FromStr for FormField {
    type Err = EditError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| EditError::UnknownField(name.to_owned()))
    }
}

/// What a commit will do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// No overlay targeted; commit creates.
    #[default]
    Idle,
    /// Commit updates this overlay.
    Editing(Overlay),
}

#[derive(Clone, Debug, Default)]
pub struct EditSession {
    mode: EditMode,
    draft: OverlayFields,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    #[must_use]
    pub fn target(&self) -> Option<&Overlay> {
        match &self.mode {
            EditMode::Editing(overlay) => Some(overlay),
            EditMode::Idle => None,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    #[must_use]
    pub fn draft(&self) -> &OverlayFields {
        &self.draft
    }

    /// Target `overlay` and seed the draft from its current values.
    pub fn begin_edit(&mut self, overlay: Overlay) {
        self.draft = OverlayFields::from_overlay(&overlay);
        self.mode = EditMode::Editing(overlay);
    }

    /// Stop targeting an overlay. The draft is kept.
    pub fn cancel(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Restore the draft defaults.
    pub fn reset_draft(&mut self) {
        self.draft = OverlayFields::default();
    }

    /// Apply raw form input to one draft field.
    pub fn set_field(&mut self, field: FormField, raw: &str) {
        let draft = &mut self.draft;
        match field {
            FormField::Kind => draft.kind = OverlayKind::from_form_value(raw),
            FormField::Content => raw.clone_into(&mut draft.content),
            FormField::Color => raw.clone_into(&mut draft.color),
            FormField::PositionX => draft.position_x = parse_int_prefix(raw),
            FormField::PositionY => draft.position_y = parse_int_prefix(raw),
            FormField::Width => draft.width = parse_int_prefix(raw),
            FormField::Height => draft.height = parse_int_prefix(raw),
            FormField::FontSize => draft.font_size = parse_int_prefix(raw),
        }
    }

    /// Apply raw form input addressed by field name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `name` is not a form field.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<(), EditError> {
        let field = name.parse::<FormField>()?;
        self.set_field(field, raw);
        Ok(())
    }

    /// Local validation: content must contain something besides whitespace.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContent` for a blank draft.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.draft.is_blank() {
            return Err(EditError::EmptyContent);
        }
        Ok(())
    }

    /// Persist the draft: update the target when editing, create otherwise.
    /// On success the session returns to `Idle` and the store is reloaded.
    ///
    /// # Errors
    ///
    /// `EmptyContent` without any repository call, or the repository error.
    /// Either way the session state is unchanged.
    pub async fn commit<R>(&mut self, repo: &R, store: &mut OverlayStore) -> Result<Overlay, EditError>
    where
        R: OverlayRepository + ?Sized,
    {
        self.validate()?;

        let saved = match &self.mode {
            EditMode::Editing(target) => {
                let patch = OverlayPatch::from(self.draft.clone());
                repo.update(&target.id, &patch).await?
            }
            EditMode::Idle => repo.create(&self.draft).await?,
        };
        tracing::info!(id = %saved.id, kind = saved.kind.as_str(), "overlay saved");
        self.mode = EditMode::Idle;

        if let Err(err) = store.refresh(repo).await {
            tracing::debug!(error = %err, "reload after save failed; keeping previous overlays");
        }
        Ok(saved)
    }

    /// Form heading for the current mode.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        if self.is_editing() { "Edit Overlay" } else { "Create New Overlay" }
    }

    /// Submit button label for the current mode.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update Overlay" } else { "Create Overlay" }
    }

    /// Content input label for the draft's kind.
    #[must_use]
    pub fn content_label(&self) -> &'static str {
        match self.draft.kind {
            OverlayKind::Text => "Text Content:",
            OverlayKind::Image => "Image URL:",
        }
    }

    /// Content input placeholder for the draft's kind.
    #[must_use]
    pub fn content_placeholder(&self) -> &'static str {
        match self.draft.kind {
            OverlayKind::Text => "Enter text...",
            OverlayKind::Image => "Enter image URL...",
        }
    }
}
