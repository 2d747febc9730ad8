//! User-facing message lookup.
//!
//! Every string the ward view shows goes through a [`Translator`] as a key, a default text and
//! interpolation parameters. Templates use `{{name}}` placeholders.

use crate::{WardError, WardResult};
use std::collections::HashMap;
use std::path::Path;

/// A message key together with its default (English) text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub key: &'static str,
    pub default: &'static str,
}

pub const INVALID_LOCATION_SPECIFIED: Message = Message {
    key: "invalidLocationSpecified",
    default: "Invalid location specified",
};

pub const UNKNOWN_LOCATION_UUID: Message = Message {
    key: "unknownLocationUuid",
    default: "Unknown location uuid: {{locationUuidFromUrl}}",
};

pub const NO_BEDS_CONFIGURED: Message = Message {
    key: "noBedsConfigured",
    default: "No beds configured for this location",
};

pub const ERROR_LOADING_WARD_LOCATION: Message = Message {
    key: "errorLoadingWardLocation",
    default: "Error loading ward location",
};

pub const INVALID_WARD_LOCATION: Message = Message {
    key: "invalidWardLocation",
    default: "Invalid ward location: {{location}}",
};

/// Message lookup collaborator.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, default: &str, params: &[(&str, &str)]) -> String;

    fn message(&self, message: &Message, params: &[(&str, &str)]) -> String {
        self.translate(message.key, message.default, params)
    }
}

/// Translator backed by an in-memory map of overrides, falling back to the default text.
#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), template.into());
        self
    }

    /// Parse overrides from a flat YAML mapping of key to template.
    ///
    /// # Errors
    ///
    /// Returns `WardError::YamlDeserialization` if the text is not a mapping of strings.
    pub fn from_yaml_str(yaml_text: &str) -> WardResult<Self> {
        let overrides: HashMap<String, String> =
            serde_yaml::from_str(yaml_text).map_err(WardError::YamlDeserialization)?;
        Ok(Self { overrides })
    }

    /// Load overrides from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `WardError::FileRead` if the file cannot be read, or
    /// `WardError::YamlDeserialization` if it is not a mapping of strings.
    pub fn load(path: &Path) -> WardResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            overrides = catalog.overrides.len(),
            "loaded message overrides"
        );
        Ok(catalog)
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, default: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .overrides
            .get(key)
            .map(String::as_str)
            .unwrap_or(default);
        interpolate(template, params)
    }
}

/// Replace `{{name}}` placeholders. Unknown placeholders are left as written.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            // unterminated
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after_open[..end].trim();
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn interpolates_named_parameters() {
        assert_eq!(
            interpolate(
                "Unknown location uuid: {{locationUuidFromUrl}}",
                &[("locationUuidFromUrl", "bad-uuid")]
            ),
            "Unknown location uuid: bad-uuid"
        );
        assert_eq!(
            interpolate("{{ a }}-{{b}}", &[("a", "1"), ("b", "2")]),
            "1-2"
        );
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(interpolate("x {{missing}} y", &[]), "x {{missing}} y");
        assert_eq!(interpolate("x {{open", &[("open", "z")]), "x {{open");
    }

    #[test]
    fn defaults_are_used_without_overrides() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.message(&INVALID_WARD_LOCATION, &[("location", "Inpatient Ward")]),
            "Invalid ward location: Inpatient Ward"
        );
    }

    #[test]
    fn overrides_replace_defaults() {
        let catalog = MessageCatalog::from_yaml_str(
            "noBedsConfigured: Aucun lit configuré\ninvalidWardLocation: \"Service invalide : {{location}}\"\n",
        )
        .expect("parse overrides");

        assert_eq!(catalog.message(&NO_BEDS_CONFIGURED, &[]), "Aucun lit configuré");
        assert_eq!(
            catalog.message(&INVALID_WARD_LOCATION, &[("location", "Maternité")]),
            "Service invalide : Maternité"
        );
        assert_eq!(
            catalog.message(&ERROR_LOADING_WARD_LOCATION, &[]),
            "Error loading ward location"
        );
    }

    #[test]
    fn load_reads_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("messages.yaml");
        std::fs::write(&path, "invalidLocationSpecified: Bad location\n").unwrap();

        let catalog = MessageCatalog::load(&path).expect("load");
        assert_eq!(catalog.message(&INVALID_LOCATION_SPECIFIED, &[]), "Bad location");
    }

    #[test]
    fn load_rejects_non_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("messages.yaml");
        std::fs::write(&path, "- just\n- a list\n").unwrap();

        let err = MessageCatalog::load(&path).expect_err("should reject");
        assert!(matches!(err, WardError::YamlDeserialization(_)));
    }
}
