//! OpenMRS location wire models and translation helpers.
//!
//! Responsibilities:
//! - Define the domain-level [`Location`] snapshot used by the ward view
//! - Accept both a bare JSON array of locations and the REST `{"results": [...]}` envelope
//! - Validate location identifiers
//!
//! Notes:
//! - Only `uuid` and `display` are interpreted; every other attribute (tags, links, address
//!   fields, ...) is preserved verbatim in [`Location::attributes`]

use crate::{deserialize_value_with_path, deserialize_with_path, OpenmrsError, OpenmrsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ward_types::LocationUuid;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Immutable snapshot of an OpenMRS location.
///
/// Identity is the `uuid`; two snapshots with the same uuid describe the same physical location.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Location {
    /// Location identifier.
    pub uuid: LocationUuid,

    /// Human-readable name, e.g. `Inpatient Ward`.
    pub display: String,

    /// Opaque extra attributes carried through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Location {
    /// Build a location with no extra attributes.
    pub fn new(uuid: LocationUuid, display: impl Into<String>) -> Self {
        Self {
            uuid,
            display: display.into(),
            attributes: Map::new(),
        }
    }
}

// ============================================================================
// Public Locations operations
// ============================================================================

/// Location list operations.
///
/// Zero-sized namespace for parsing location payloads.
pub struct Locations;

impl Locations {
    /// Parse a list of locations from JSON text.
    ///
    /// Accepts either a JSON array of location objects or the OpenMRS REST envelope
    /// `{"results": [ ... ]}`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenmrsError`] if:
    /// - the text is not JSON,
    /// - it is neither an array nor an object,
    /// - an entry does not match the location schema (the error names the failing element and
    ///   field, e.g. `[1]` or `results[1]`),
    /// - any location uuid is invalid,
    /// - two locations share the same uuid.
    pub fn parse_list(json_text: &str) -> OpenmrsResult<Vec<Location>> {
        let value: Value = serde_json::from_str(json_text)?;

        let items: Vec<LocationWire> = if value.is_array() {
            deserialize_value_with_path(value, "Location list")?
        } else if value.is_object() {
            let envelope: LocationEnvelopeWire = deserialize_value_with_path(value, "Location list")?;
            envelope.results
        } else {
            return Err(OpenmrsError::InvalidInput(
                "location list must be a JSON array or a {\"results\": [...]} object".into(),
            ));
        };

        let mut locations = Vec::with_capacity(items.len());
        for item in items {
            let location = wire_to_domain(item)?;
            if locations
                .iter()
                .any(|existing: &Location| existing.uuid == location.uuid)
            {
                return Err(OpenmrsError::InvalidInput(format!(
                    "duplicate location uuid: {}",
                    location.uuid
                )));
            }
            locations.push(location);
        }

        Ok(locations)
    }

    /// Parse a single location object from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`OpenmrsError`] if the JSON is not a location object or its uuid is invalid.
    pub fn parse_one(json_text: &str) -> OpenmrsResult<Location> {
        let wire: LocationWire = deserialize_with_path(json_text, "Location")?;
        wire_to_domain(wire)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// OpenMRS REST list envelope.
#[derive(Clone, Debug, Deserialize)]
struct LocationEnvelopeWire {
    results: Vec<LocationWire>,
}

/// Wire representation of a location as served by the OpenMRS REST API.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LocationWire {
    pub uuid: String,
    pub display: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

pub(crate) fn wire_to_domain(wire: LocationWire) -> OpenmrsResult<Location> {
    let uuid = LocationUuid::new(&wire.uuid)
        .map_err(|e| OpenmrsError::InvalidUuid(format!("{}: {e}", wire.uuid)))?;

    Ok(Location {
        uuid,
        display: wire.display,
        attributes: wire.attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let input = r#"[
            {"uuid": "loc-1", "display": "Inpatient Ward"},
            {"uuid": "loc-2", "display": "Maternity Ward", "tags": [{"display": "Admission Location"}]}
        ]"#;

        let locations = Locations::parse_list(input).expect("parse locations");
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].uuid, "loc-1");
        assert_eq!(locations[0].display, "Inpatient Ward");
        assert!(locations[0].attributes.is_empty());
        assert!(locations[1].attributes.contains_key("tags"));
    }

    #[test]
    fn parses_rest_envelope() {
        let input = r#"{"results": [{"uuid": "loc-1", "display": "Inpatient Ward", "links": []}]}"#;

        let locations = Locations::parse_list(input).expect("parse envelope");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].uuid, "loc-1");
    }

    #[test]
    fn rejects_missing_display() {
        let err = Locations::parse_one(r#"{"uuid": "loc-1"}"#).expect_err("should reject");
        match err {
            OpenmrsError::Translation(msg) => assert!(msg.contains("display")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn list_mismatch_names_failing_element() {
        let err = Locations::parse_list(r#"[{"uuid": "loc-1", "display": "A"}, {"uuid": "loc-2"}]"#)
            .expect_err("should reject");
        match err {
            OpenmrsError::Translation(msg) => {
                assert!(msg.contains("at [1]"), "{msg}");
                assert!(msg.contains("display"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }

        let err = Locations::parse_list(r#"{"results": [{"uuid": "loc-1", "display": 7}]}"#)
            .expect_err("should reject");
        match err {
            OpenmrsError::Translation(msg) => assert!(msg.contains("results[0].display"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json_and_scalars() {
        assert!(matches!(
            Locations::parse_list("[{\"uuid\": "),
            Err(OpenmrsError::InvalidJson(_))
        ));
        assert!(matches!(
            Locations::parse_list("42"),
            Err(OpenmrsError::InvalidInput(_))
        ));
        assert!(matches!(
            Locations::parse_one(r#"{"uuid": "loc-1", "display": "A"} trailing"#),
            Err(OpenmrsError::InvalidJson(_))
        ));
    }

    #[test]
    fn rejects_invalid_uuid() {
        let err = Locations::parse_list(r#"[{"uuid": "  ", "display": "X"}]"#)
            .expect_err("should reject");
        match err {
            OpenmrsError::InvalidUuid(msg) => assert!(msg.contains("empty")),
            other => panic!("expected InvalidUuid error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_uuids() {
        let input = r#"[
            {"uuid": "loc-1", "display": "A"},
            {"uuid": "loc-1", "display": "B"}
        ]"#;

        let err = Locations::parse_list(input).expect_err("should reject duplicates");
        assert!(matches!(err, OpenmrsError::InvalidInput(_)));
    }
}
