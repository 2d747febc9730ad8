//! Presentation of a render mode.
//!
//! [`present`] describes what to put on screen for a [`RenderMode`]: the header, at most one
//! notification banner, the number of skeleton placeholders, the beds and whether the patient
//! workspace side panel is mounted. All text is looked up through a [`Translator`].

use crate::beds::BedOccupancy;
use crate::constants::WORKSPACE_CONTEXT_KEY;
use crate::messages::{
    Translator, ERROR_LOADING_WARD_LOCATION, INVALID_LOCATION_SPECIFIED, INVALID_WARD_LOCATION,
    NO_BEDS_CONFIGURED, UNKNOWN_LOCATION_UUID,
};
use crate::view::{RenderMode, RenderModeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Warning,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        }
    }
}

/// Inline notification banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub subtitle: Option<String>,
}

/// Everything needed to draw the ward view.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    pub mode: RenderModeKind,
    /// Ward name shown above the beds.
    pub header: Option<String>,
    pub notification: Option<Notification>,
    /// Number of skeleton beds to draw.
    pub placeholders: usize,
    pub beds: Vec<BedOccupancy>,
    /// Context key of the side panel container, when mounted.
    pub side_panel: Option<&'static str>,
}

impl Presentation {
    fn empty(mode: RenderModeKind) -> Self {
        Self {
            mode,
            header: None,
            notification: None,
            placeholders: 0,
            beds: Vec::new(),
            side_panel: None,
        }
    }
}

pub fn present(mode: &RenderMode, messages: &dyn Translator) -> Presentation {
    let mut presentation = Presentation::empty(mode.kind());

    // any mode with a resolved location shows the ward frame
    if let Some(location) = mode.location() {
        presentation.header = Some(location.display.clone());
        presentation.side_panel = Some(WORKSPACE_CONTEXT_KEY);
    }

    match mode {
        RenderMode::Hidden => {}
        RenderMode::InvalidLocation { location_uuid } => {
            presentation.notification = Some(Notification {
                kind: NotificationKind::Error,
                title: messages.message(&INVALID_LOCATION_SPECIFIED, &[]),
                subtitle: Some(messages.message(
                    &UNKNOWN_LOCATION_UUID,
                    &[("locationUuidFromUrl", location_uuid.as_str())],
                )),
            });
        }
        RenderMode::Loading { placeholders, .. } => {
            presentation.placeholders = *placeholders;
        }
        RenderMode::Populated { beds, .. } => {
            presentation.beds = beds.clone();
        }
        RenderMode::EmptyBeds { .. } => {
            presentation.notification = Some(Notification {
                kind: NotificationKind::Warning,
                title: messages.message(&NO_BEDS_CONFIGURED, &[]),
                subtitle: None,
            });
        }
        RenderMode::FetchError { location, error } => {
            let subtitle = match &error.message {
                Some(message) => message.clone(),
                None => messages.message(
                    &INVALID_WARD_LOCATION,
                    &[("location", location.display.as_str())],
                ),
            };
            presentation.notification = Some(Notification {
                kind: NotificationKind::Error,
                title: messages.message(&ERROR_LOADING_WARD_LOCATION, &[]),
                subtitle: Some(subtitle),
            });
        }
    }

    presentation
}
